//! Change notification
//!
//! A [`ChangeSignal`] carries observers that are called synchronously whenever
//! a parameter value on its host actually changes. Bulk updates that must not
//! echo back to observers (tree restores, derived-parameter recomputation)
//! hold a [`SignalBlock`] for their duration.

use crate::parameters::value::ParamValue;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// A single value change, as delivered to observers
#[derive(Debug, Clone, PartialEq)]
pub struct ParamChange {
    pub name: String,
    pub value: ParamValue,
}

type Observer = Box<dyn Fn(&ParamChange)>;

/// Observer list with a suppression flag
///
/// Observers run while the host is mutably borrowed, so they must not reach
/// back into the host or connect new observers on the same signal.
#[derive(Default)]
pub struct ChangeSignal {
    observers: RefCell<Vec<Observer>>,
    blocked: Cell<bool>,
}

impl ChangeSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer
    pub fn connect<F>(&self, observer: F)
    where
        F: Fn(&ParamChange) + 'static,
    {
        self.observers.borrow_mut().push(Box::new(observer));
    }

    pub fn observer_count(&self) -> usize {
        self.observers.borrow().len()
    }

    /// Check if notifications are currently suppressed
    pub fn is_blocked(&self) -> bool {
        self.blocked.get()
    }

    /// Set the suppression flag directly
    ///
    /// Prefer [`ChangeSignal::block`], which cannot leave the flag set.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.set(blocked);
    }

    /// Suppress notifications until the returned guard is dropped
    ///
    /// The guard restores whatever the flag was before, so blocks nest.
    ///
    /// # Examples
    ///
    /// ```
    /// use paramtree::parameters::ChangeSignal;
    /// use std::rc::Rc;
    ///
    /// let signal = Rc::new(ChangeSignal::new());
    /// {
    ///     let _block = ChangeSignal::block(&signal);
    ///     assert!(signal.is_blocked());
    /// }
    /// assert!(!signal.is_blocked());
    /// ```
    pub fn block(signal: &Rc<ChangeSignal>) -> SignalBlock {
        let previous = signal.blocked.replace(true);
        SignalBlock {
            signal: Rc::clone(signal),
            previous,
        }
    }

    /// Deliver a change to every observer unless blocked
    ///
    /// # Returns
    ///
    /// `true` if observers were called
    pub(crate) fn emit(&self, change: &ParamChange) -> bool {
        if self.blocked.get() {
            tracing::trace!(param = %change.name, "Change notification suppressed");
            return false;
        }

        for observer in self.observers.borrow().iter() {
            observer(change);
        }
        true
    }
}

impl fmt::Debug for ChangeSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeSignal")
            .field("observers", &self.observer_count())
            .field("blocked", &self.blocked.get())
            .finish()
    }
}

/// Scoped suppression of a [`ChangeSignal`]
#[must_use = "notifications are only suppressed while the guard is alive"]
#[derive(Debug)]
pub struct SignalBlock {
    signal: Rc<ChangeSignal>,
    previous: bool,
}

impl Drop for SignalBlock {
    fn drop(&mut self) {
        self.signal.blocked.set(self.previous);
    }
}
