//! A value cell that works controlled or uncontrolled.
//!
//! The four usage quadrants:
//!
//! - controlled with a change handler: the host owns the value and may
//!   intercept change requests (validation, clamping) before pushing the
//!   accepted value back with [`Controllable::force`];
//! - controlled without a handler: the value is read-only for the component;
//! - uncontrolled with a handler: the component owns the value and the host
//!   just observes changes;
//! - uncontrolled without a handler: purely internal state.

use std::sync::Arc;

use parking_lot::RwLock;

/// Shared, optionally host-controlled value.
pub struct Controllable<T> {
    value: Arc<RwLock<T>>,
    controlled: bool,
    on_change: Option<Arc<dyn Fn(&T) + Send + Sync>>,
}

impl<T: Clone> Controllable<T> {
    /// A component-owned cell: change requests are applied directly.
    pub fn uncontrolled(initial: T) -> Self {
        Self {
            value: Arc::new(RwLock::new(initial)),
            controlled: false,
            on_change: None,
        }
    }

    /// A host-owned cell: change requests only notify, the host decides
    /// whether to apply them through [`Controllable::force`].
    pub fn controlled(initial: T) -> Self {
        Self {
            value: Arc::new(RwLock::new(initial)),
            controlled: true,
            on_change: None,
        }
    }

    /// Registers the change observer.
    pub fn on_change(mut self, on_change: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.on_change = Some(Arc::new(on_change));
        self
    }

    /// Reads the current value.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Whether the host owns the value.
    pub fn is_controlled(&self) -> bool {
        self.controlled
    }

    /// Component-side change request.
    ///
    /// Applies the value when uncontrolled, then notifies the observer
    /// either way.
    pub fn request(&self, value: T) {
        if !self.controlled {
            *self.value.write() = value.clone();
        }
        if let Some(on_change) = &self.on_change {
            on_change(&value);
        }
    }

    /// Host-side write, applied unconditionally and without notification.
    pub fn force(&self, value: T) {
        *self.value.write() = value;
    }
}

impl<T> Clone for Controllable<T> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            controlled: self.controlled,
            on_change: self.on_change.clone(),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Controllable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controllable")
            .field("value", &*self.value.read())
            .field("controlled", &self.controlled)
            .finish_non_exhaustive()
    }
}
