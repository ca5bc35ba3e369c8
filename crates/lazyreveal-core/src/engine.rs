//! The engine instance.

use std::cell::RefCell;
use std::rc::Rc;

use lazyreveal_platform::{Document, ElementHandle, ElementRef};
use log::{debug, warn};

use crate::lifecycle::Lifecycle;
use crate::options::RevealOptions;
use crate::reveal::Revealer;
use crate::strategy::{self, DetectionStrategy};
use crate::tracker;

/// State shared between the engine handle and the closures it hands to the
/// platform. Closures hold it weakly; the engine handle is the one strong
/// owner.
pub(crate) struct EngineShared {
    pub(crate) options: Rc<RevealOptions>,
    pub(crate) document: Rc<dyn Document>,
    pub(crate) elements: RefCell<Vec<ElementRef>>,
    pub(crate) lifecycle: Lifecycle,
    pub(crate) revealer: Revealer,
}

impl EngineShared {
    pub(crate) fn remove_from_working_set(&self, element: &ElementRef) {
        let id = element.id();
        self.elements.borrow_mut().retain(|el| el.id() != id);
    }
}

/// A lazy-reveal engine instance.
///
/// Owns its configuration, the working set of candidate elements, and one
/// detection subscription. Construction selects the detection strategy from
/// platform capability and runs the first scan; call [`update`] after the
/// host injects new matching content, and [`destroy`] on teardown.
///
/// [`update`]: RevealEngine::update
/// [`destroy`]: RevealEngine::destroy
pub struct RevealEngine {
    shared: Rc<EngineShared>,
    strategy: Box<dyn DetectionStrategy>,
}

impl RevealEngine {
    pub fn new(document: Rc<dyn Document>, options: RevealOptions) -> Self {
        let options = Rc::new(options);
        let lifecycle = Lifecycle::new();
        let revealer = Revealer::new(
            Rc::clone(&document),
            Rc::clone(&options),
            lifecycle.clone(),
        );
        let shared = Rc::new(EngineShared {
            options,
            document,
            elements: RefCell::new(Vec::new()),
            lifecycle,
            revealer,
        });
        let strategy = strategy::select(&shared);
        debug!("detection strategy: {}", strategy.name());
        let mut engine = Self { shared, strategy };
        engine.update();
        engine
    }

    /// Re-scans the document for candidate elements and (re)activates
    /// detection for them. Synchronous; already-processed elements are
    /// purged before the strategy sees the set.
    pub fn update(&mut self) {
        if self.shared.lifecycle.is_destroyed() {
            warn!("update() called on a destroyed engine");
            return;
        }
        let collected = tracker::collect(&self.shared.document, &self.shared.options);
        let fresh = tracker::purge(collected);
        *self.shared.elements.borrow_mut() = fresh;
        self.strategy.activate(&self.shared);
    }

    /// Releases every platform subscription and renders all pending
    /// asynchronous callbacks inert. In-flight platform fetches are not
    /// cancelled — they belong to the platform — but their completions no
    /// longer touch engine state. A second call is a no-op.
    pub fn destroy(&mut self) {
        if !self.shared.lifecycle.destroy() {
            return;
        }
        debug!("destroying engine");
        self.strategy.deactivate(&self.shared);
        self.shared.elements.borrow_mut().clear();
    }

    /// Number of elements currently awaiting reveal.
    pub fn pending(&self) -> usize {
        self.shared.elements.borrow().len()
    }
}

/// Explicit bootstrap entry point.
///
/// The host reads its startup configuration once (for instance a
/// process-wide options value scanned at load time) and passes it here;
/// `None` means no engine is wanted. This replaces implicit page-global
/// auto-initialization with a call the host application makes deliberately.
pub fn bootstrap(
    document: Rc<dyn Document>,
    options: Option<RevealOptions>,
) -> Option<RevealEngine> {
    options.map(|options| RevealEngine::new(document, options))
}
