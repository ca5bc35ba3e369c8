//! Engine lifecycle flag.

use std::cell::Cell;
use std::rc::Rc;

/// Shared destroy flag.
///
/// Every asynchronous handler the engine hands to the platform (load/error
/// listeners, intersection and scroll callbacks) checks this flag first and
/// becomes a silent no-op once the owning engine is destroyed. In-flight
/// platform fetches are not cancelled; only their effects on engine state
/// are.
#[derive(Clone, Default)]
pub struct Lifecycle {
    destroyed: Rc<Cell<bool>>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.get()
    }

    /// Flips the flag. Returns `false` when already destroyed, making a
    /// second `destroy()` call a defensive no-op.
    pub fn destroy(&self) -> bool {
        !self.destroyed.replace(true)
    }
}
