//! Deadline tracking for the settle transition.

use std::time::Instant;

use chrono::NaiveDate;

/// The single pending settle deadline of a grid.
///
/// At most one deadline exists at a time: arming overwrites any pending one
/// (last writer wins) and cancellation is unconditional and silent. The month
/// to settle to is captured at arm time, so a deadline can never fire against
/// a cursor it was not armed for.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SettleTimer {
    pending: Option<(Instant, NaiveDate)>,
}

impl SettleTimer {
    /// Creates a disarmed timer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules a settle to `month` at `deadline`, replacing any pending one.
    pub fn arm(&mut self, deadline: Instant, month: NaiveDate) {
        self.pending = Some((deadline, month));
    }

    /// Drops any pending deadline.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Whether a deadline is pending.
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Fires the deadline if it is due, disarming it.
    ///
    /// Returns the month to settle to at most once per armed deadline.
    pub fn poll(&mut self, now: Instant) -> Option<NaiveDate> {
        match self.pending {
            Some((deadline, month)) if now >= deadline => {
                self.pending = None;
                Some(month)
            }
            _ => None,
        }
    }
}
