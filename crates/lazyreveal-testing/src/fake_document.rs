//! In-memory document double with a simulated intersection observer.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use lazyreveal_platform::{
    Container, Document, ElementHandle, ElementId, ElementKind, ElementRef,
    IntersectionCallback, IntersectionObservation, ListenerId, Point, Rect, Size,
};

use crate::fake_element::FakeElement;

/// An in-memory document.
///
/// Selector support is the subset the engine's defaults exercise:
/// `tag`, `.class`, `tag.class`, an optional `:not(.class)` suffix, and `*`.
/// Tags `img` and `iframe` match the corresponding element kinds; any other
/// tag matches generic elements. Scoped queries
/// ([`Container::Element`]) match direct children of the scope element.
pub struct FakeDocument {
    elements: RefCell<Vec<(Rc<FakeElement>, Option<ElementId>)>>,
    scroll: Rc<Cell<Point>>,
    viewport: Cell<Size>,
    viewport_listeners: RefCell<Vec<(ListenerId, Rc<dyn Fn()>)>>,
    next_listener: Cell<u64>,
    observer_supported: Cell<bool>,
    observation: RefCell<Option<Rc<ObserverState>>>,
    probes: RefCell<Vec<Rc<FakeElement>>>,
    next_probe: Cell<u64>,
}

impl FakeDocument {
    pub fn new(viewport: Size) -> Rc<Self> {
        Rc::new(Self {
            elements: RefCell::new(Vec::new()),
            scroll: Rc::new(Cell::new(Point::default())),
            viewport: Cell::new(viewport),
            viewport_listeners: RefCell::new(Vec::new()),
            next_listener: Cell::new(1),
            observer_supported: Cell::new(true),
            observation: RefCell::new(None),
            probes: RefCell::new(Vec::new()),
            next_probe: Cell::new(1_000_000),
        })
    }

    /// Adds an element to the document (document order = attach order).
    pub fn attach(&self, element: &Rc<FakeElement>) {
        element.bind_scroll(Rc::clone(&self.scroll));
        self.elements.borrow_mut().push((Rc::clone(element), None));
    }

    /// Adds an element as a direct child of `parent`.
    pub fn attach_in(&self, element: &Rc<FakeElement>, parent: &Rc<FakeElement>) {
        element.bind_scroll(Rc::clone(&self.scroll));
        self.elements
            .borrow_mut()
            .push((Rc::clone(element), Some(parent.id())));
    }

    /// Makes `observe_intersections` report no capability, forcing the
    /// engine onto its fallback strategy.
    pub fn disable_intersection_observer(&self) {
        self.observer_supported.set(false);
    }

    pub fn set_viewport(&self, viewport: Size) {
        self.viewport.set(viewport);
    }

    pub fn set_scroll(&self, scroll: Point) {
        self.scroll.set(scroll);
    }

    /// Scrolls and dispatches a scroll event to viewport listeners.
    pub fn scroll_to(&self, x: f32, y: f32) {
        self.set_scroll(Point::new(x, y));
        self.emit_viewport_event();
    }

    /// Dispatches a scroll/resize event without moving the viewport.
    pub fn emit_viewport_event(&self) {
        let listeners: Vec<Rc<dyn Fn()>> = self
            .viewport_listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener();
        }
    }

    pub fn has_viewport_listeners(&self) -> bool {
        !self.viewport_listeners.borrow().is_empty()
    }

    /// Runs one simulated intersection-observer pass: every observed element
    /// whose document rectangle overlaps the observation root expanded by
    /// its margin is delivered to the engine, in observation order.
    pub fn deliver_intersections(&self) {
        let Some(state) = self.observation.borrow().clone() else {
            return;
        };
        if !state.connected.get() {
            return;
        }
        let fold = self.observation_fold(&state);
        let scroll = self.scroll.get();
        let observed: Vec<ElementRef> = state.observed.borrow().clone();
        for element in observed {
            let rect = element.client_rect().translated(scroll.x, scroll.y);
            if overlaps(rect, fold) {
                (state.callback)(&element);
            }
        }
    }

    /// Delivers an intersection for one element regardless of geometry,
    /// provided it is still observed.
    pub fn deliver_to(&self, element: &Rc<FakeElement>) {
        let Some(state) = self.observation.borrow().clone() else {
            return;
        };
        if !state.connected.get() {
            return;
        }
        let id = element.id();
        let is_observed = state.observed.borrow().iter().any(|el| el.id() == id);
        if is_observed {
            let element: ElementRef = Rc::clone(element) as ElementRef;
            (state.callback)(&element);
        }
    }

    /// Ids currently under observation, in observation order.
    pub fn observed_ids(&self) -> Vec<ElementId> {
        match self.observation.borrow().as_ref() {
            Some(state) => state.observed.borrow().iter().map(|el| el.id()).collect(),
            None => Vec::new(),
        }
    }

    pub fn observer_connected(&self) -> bool {
        self.observation
            .borrow()
            .as_ref()
            .is_some_and(|state| state.connected.get())
    }

    /// The most recently created probe image, if any.
    pub fn last_probe(&self) -> Option<Rc<FakeElement>> {
        self.probes.borrow().last().cloned()
    }

    fn observation_fold(&self, state: &ObserverState) -> Rect {
        let margin = state.margin;
        let scroll = self.scroll.get();
        let base = match &state.root {
            Container::Document => {
                let viewport = self.viewport.get();
                Rect::new(scroll.x, scroll.y, viewport.width, viewport.height)
            }
            Container::Element(element) => {
                element.client_rect().translated(scroll.x, scroll.y)
            }
        };
        Rect::new(
            base.x - margin,
            base.y - margin,
            base.width + 2.0 * margin,
            base.height + 2.0 * margin,
        )
    }
}

impl Document for FakeDocument {
    fn query_selector_all(&self, scope: &Container, selector: &str) -> Vec<ElementRef> {
        let filter = SelectorFilter::parse(selector);
        let scope_id = scope.as_element().map(|element| element.id());
        self.elements
            .borrow()
            .iter()
            .filter(|(_, parent)| scope_id.is_none() || *parent == scope_id)
            .filter(|(element, _)| filter.matches(element))
            .map(|(element, _)| Rc::clone(element) as ElementRef)
            .collect()
    }

    fn scroll_offset(&self) -> Point {
        self.scroll.get()
    }

    fn viewport_size(&self) -> Size {
        self.viewport.get()
    }

    fn create_probe_image(&self) -> ElementRef {
        let id = self.next_probe.get();
        self.next_probe.set(id + 1);
        let probe = FakeElement::image(id);
        probe.bind_scroll(Rc::clone(&self.scroll));
        self.probes.borrow_mut().push(Rc::clone(&probe));
        probe as ElementRef
    }

    fn observe_intersections(
        &self,
        root: &Container,
        margin: f32,
        on_intersect: IntersectionCallback,
    ) -> Option<Box<dyn IntersectionObservation>> {
        if !self.observer_supported.get() {
            return None;
        }
        let state = Rc::new(ObserverState {
            margin,
            root: root.clone(),
            callback: on_intersect,
            observed: RefCell::new(Vec::new()),
            connected: Cell::new(true),
        });
        *self.observation.borrow_mut() = Some(Rc::clone(&state));
        Some(Box::new(FakeObservation { state }))
    }

    fn add_viewport_listener(&self, _scope: &Container, listener: Rc<dyn Fn()>) -> ListenerId {
        let id = ListenerId(self.next_listener.get());
        self.next_listener.set(id.0 + 1);
        self.viewport_listeners.borrow_mut().push((id, listener));
        id
    }

    fn remove_viewport_listener(&self, id: ListenerId) {
        self.viewport_listeners
            .borrow_mut()
            .retain(|(listener_id, _)| *listener_id != id);
    }
}

struct ObserverState {
    margin: f32,
    root: Container,
    callback: IntersectionCallback,
    observed: RefCell<Vec<ElementRef>>,
    connected: Cell<bool>,
}

/// Handle returned to the engine for its one intersection subscription.
pub struct FakeObservation {
    state: Rc<ObserverState>,
}

impl IntersectionObservation for FakeObservation {
    fn observe(&self, element: &ElementRef) {
        let id = element.id();
        let mut observed = self.state.observed.borrow_mut();
        if !observed.iter().any(|el| el.id() == id) {
            observed.push(Rc::clone(element));
        }
    }

    fn unobserve(&self, element: &ElementRef) {
        let id = element.id();
        self.state.observed.borrow_mut().retain(|el| el.id() != id);
    }

    fn disconnect(&self) {
        self.state.connected.set(false);
        self.state.observed.borrow_mut().clear();
    }
}

fn overlaps(rect: Rect, fold: Rect) -> bool {
    rect.x <= fold.right()
        && fold.x <= rect.right()
        && rect.y <= fold.bottom()
        && fold.y <= rect.bottom()
}

struct SelectorFilter {
    kind: Option<ElementKind>,
    required_class: Option<String>,
    excluded_class: Option<String>,
}

impl SelectorFilter {
    fn parse(selector: &str) -> Self {
        let selector = selector.trim();
        let (base, excluded_class) = match selector.find(":not(.") {
            Some(start) => {
                let rest = &selector[start + ":not(.".len()..];
                let class = rest.trim_end_matches(')').to_owned();
                (&selector[..start], Some(class))
            }
            None => (selector, None),
        };
        let (tag, required_class) = match base.find('.') {
            Some(dot) => {
                let class = base[dot + 1..].to_owned();
                (&base[..dot], Some(class))
            }
            None => (base, None),
        };
        let kind = match tag {
            "" | "*" => None,
            "img" => Some(ElementKind::Image),
            "iframe" => Some(ElementKind::Frame),
            _ => Some(ElementKind::Generic),
        };
        Self {
            kind,
            required_class,
            excluded_class,
        }
    }

    fn matches(&self, element: &Rc<FakeElement>) -> bool {
        if let Some(kind) = self.kind {
            if element.kind() != kind {
                return false;
            }
        }
        if let Some(class) = &self.required_class {
            if !element.has_class(class) {
                return false;
            }
        }
        if let Some(class) = &self.excluded_class {
            if element.has_class(class) {
                return false;
            }
        }
        true
    }
}
