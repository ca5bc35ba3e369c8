//! In-memory element double.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use lazyreveal_platform::{
    ElementHandle, ElementId, ElementKind, ElementRef, ListenerId, MediaEvent, MediaListener,
    Point, Rect,
};
use rustc_hash::{FxHashMap, FxHashSet};

/// A fake live element.
///
/// Positioned in document coordinates via [`FakeElement::set_document_rect`];
/// the client rect reported to the engine subtracts the owning document's
/// scroll offset (wired up by [`FakeDocument::attach`]).
///
/// [`FakeDocument::attach`]: crate::FakeDocument::attach
pub struct FakeElement {
    id: ElementId,
    kind: ElementKind,
    attributes: RefCell<FxHashMap<String, String>>,
    classes: RefCell<FxHashSet<String>>,
    source: RefCell<Option<String>>,
    background_image: RefCell<Option<String>>,
    document_rect: Cell<Rect>,
    laid_out: Cell<bool>,
    scroll: RefCell<Rc<Cell<Point>>>,
    listeners: RefCell<Vec<(ListenerId, MediaEvent, MediaListener)>>,
    next_listener: Cell<u64>,
}

impl FakeElement {
    fn new(id: u64, kind: ElementKind) -> Rc<Self> {
        Rc::new(Self {
            id: ElementId(id),
            kind,
            attributes: RefCell::new(FxHashMap::default()),
            classes: RefCell::new(FxHashSet::default()),
            source: RefCell::new(None),
            background_image: RefCell::new(None),
            document_rect: Cell::new(Rect::default()),
            laid_out: Cell::new(true),
            scroll: RefCell::new(Rc::new(Cell::new(Point::default()))),
            listeners: RefCell::new(Vec::new()),
            next_listener: Cell::new(1),
        })
    }

    pub fn image(id: u64) -> Rc<Self> {
        Self::new(id, ElementKind::Image)
    }

    pub fn frame(id: u64) -> Rc<Self> {
        Self::new(id, ElementKind::Frame)
    }

    pub fn generic(id: u64) -> Rc<Self> {
        Self::new(id, ElementKind::Generic)
    }

    /// Places the element at a rectangle in document coordinates.
    pub fn set_document_rect(&self, rect: Rect) {
        self.document_rect.set(rect);
    }

    pub fn document_rect(&self) -> Rect {
        self.document_rect.get()
    }

    /// Simulates `display: none` (no offset parent) when `false`.
    pub fn set_laid_out(&self, laid_out: bool) {
        self.laid_out.set(laid_out);
    }

    /// Current background-image URL, if one was applied.
    pub fn background_image(&self) -> Option<String> {
        self.background_image.borrow().clone()
    }

    /// Class names currently set, sorted for stable assertions.
    pub fn class_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.classes.borrow().iter().cloned().collect();
        names.sort();
        names
    }

    /// Number of listeners still registered; zero after a clean detach.
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Delivers a load or error event to all matching listeners, the way
    /// the platform event loop would.
    pub fn fire(self: &Rc<Self>, event: MediaEvent) {
        let matching: Vec<MediaListener> = self
            .listeners
            .borrow()
            .iter()
            .filter(|(_, registered, _)| *registered == event)
            .map(|(_, _, listener)| Rc::clone(listener))
            .collect();
        let element: ElementRef = Rc::clone(self) as ElementRef;
        for listener in matching {
            listener(&element);
        }
    }

    pub(crate) fn bind_scroll(&self, scroll: Rc<Cell<Point>>) {
        *self.scroll.borrow_mut() = scroll;
    }
}

impl ElementHandle for FakeElement {
    fn id(&self) -> ElementId {
        self.id
    }

    fn kind(&self) -> ElementKind {
        self.kind
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.borrow().get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.attributes
            .borrow_mut()
            .insert(name.to_owned(), value.to_owned());
    }

    fn source(&self) -> Option<String> {
        self.source.borrow().clone()
    }

    fn set_source(&self, url: &str) {
        *self.source.borrow_mut() = Some(url.to_owned());
    }

    fn set_background_image(&self, url: &str) {
        *self.background_image.borrow_mut() = Some(url.to_owned());
    }

    fn add_class(&self, name: &str) {
        self.classes.borrow_mut().insert(name.to_owned());
    }

    fn remove_class(&self, name: &str) {
        self.classes.borrow_mut().remove(name);
    }

    fn has_class(&self, name: &str) -> bool {
        self.classes.borrow().contains(name)
    }

    fn client_rect(&self) -> Rect {
        let scroll = self.scroll.borrow().get();
        self.document_rect.get().translated(-scroll.x, -scroll.y)
    }

    fn is_laid_out(&self) -> bool {
        self.laid_out.get()
    }

    fn add_listener(&self, event: MediaEvent, listener: MediaListener) -> ListenerId {
        let id = ListenerId(self.next_listener.get());
        self.next_listener.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, event, listener));
        id
    }

    fn remove_listener(&self, event: MediaEvent, id: ListenerId) {
        self.listeners
            .borrow_mut()
            .retain(|(registered_id, registered_event, _)| {
                !(*registered_id == id && *registered_event == event)
            });
    }
}
