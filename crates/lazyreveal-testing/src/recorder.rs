//! Callback recorders for asserting engine callback traffic.

use std::cell::RefCell;
use std::rc::Rc;

use lazyreveal_platform::{ElementHandle, ElementId, ElementRef};

/// Records every element an engine callback was invoked with.
#[derive(Clone, Default)]
pub struct ElementRecorder {
    seen: Rc<RefCell<Vec<ElementId>>>,
}

impl ElementRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A callback suitable for any of the engine's element hooks.
    pub fn hook(&self) -> Rc<dyn Fn(&ElementRef)> {
        let seen = Rc::clone(&self.seen);
        Rc::new(move |element| seen.borrow_mut().push(element.id()))
    }

    /// Ids in invocation order.
    pub fn ids(&self) -> Vec<ElementId> {
        self.seen.borrow().clone()
    }

    pub fn count(&self) -> usize {
        self.seen.borrow().len()
    }
}

/// Records the counts passed to the working-set-size callback.
#[derive(Clone, Default)]
pub struct CountRecorder {
    seen: Rc<RefCell<Vec<usize>>>,
}

impl CountRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hook(&self) -> Rc<dyn Fn(usize)> {
        let seen = Rc::clone(&self.seen);
        Rc::new(move |count| seen.borrow_mut().push(count))
    }

    pub fn counts(&self) -> Vec<usize> {
        self.seen.borrow().clone()
    }
}
