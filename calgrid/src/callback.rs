//! Shared callback handle for month-change notifications.

use std::{fmt, sync::Arc};

use chrono::NaiveDate;

/// A cloneable month-change callback.
///
/// Equality is pointer identity, so configuration structs holding one can
/// still derive `PartialEq` for cheap change detection.
#[derive(Clone)]
pub struct MonthCallback(Arc<dyn Fn(NaiveDate) + Send + Sync>);

impl MonthCallback {
    /// Wraps a closure in a shared callback.
    pub fn new(callback: impl Fn(NaiveDate) + Send + Sync + 'static) -> Self {
        Self(Arc::new(callback))
    }

    /// Invokes the callback with the requested month.
    pub fn call(&self, month: NaiveDate) {
        (self.0)(month);
    }
}

impl<F> From<F> for MonthCallback
where
    F: Fn(NaiveDate) + Send + Sync + 'static,
{
    fn from(callback: F) -> Self {
        Self::new(callback)
    }
}

impl PartialEq for MonthCallback {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for MonthCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MonthCallback")
    }
}
