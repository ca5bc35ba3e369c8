//! Document and observation contracts.

use std::fmt;
use std::rc::Rc;

use crate::element::{ElementRef, ListenerId};
use crate::geometry::{Point, Size};

/// The scroll region an engine instance watches: the whole document
/// viewport, or one scrollable element.
#[derive(Clone)]
pub enum Container {
    Document,
    Element(ElementRef),
}

impl Container {
    pub fn is_document(&self) -> bool {
        matches!(self, Self::Document)
    }

    pub fn as_element(&self) -> Option<&ElementRef> {
        match self {
            Self::Document => None,
            Self::Element(element) => Some(element),
        }
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::Document
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Document => f.write_str("Container::Document"),
            Self::Element(element) => write!(f, "Container::Element({:?})", element.id()),
        }
    }
}

/// Callback delivered by the host once an observed element intersects the
/// expanded container region.
pub type IntersectionCallback = Rc<dyn Fn(&ElementRef)>;

/// An active intersection subscription.
///
/// Hosts deliver intersections asynchronously from their event loop; they
/// must never invoke the callback re-entrantly from within `observe`.
pub trait IntersectionObservation {
    fn observe(&self, element: &ElementRef);

    fn unobserve(&self, element: &ElementRef);

    /// Releases the whole subscription. No callback fires afterwards.
    fn disconnect(&self);
}

/// The hosting document.
pub trait Document {
    /// Queries live elements matching `selector` under `scope`, in document
    /// order. An unmatched selector yields an empty vector, not an error.
    fn query_selector_all(&self, scope: &Container, selector: &str) -> Vec<ElementRef>;

    /// Current scroll offset of the document viewport.
    fn scroll_offset(&self) -> Point;

    /// Current size of the document viewport.
    fn viewport_size(&self) -> Size;

    /// Creates a detached image element used as a load probe. It never
    /// enters layout; only its source property and listeners are used.
    fn create_probe_image(&self) -> ElementRef;

    /// Starts native intersection observation over `root` expanded by
    /// `margin` pixels on every edge. Returns `None` when the platform has
    /// no such capability, which makes the engine fall back to polling.
    fn observe_intersections(
        &self,
        root: &Container,
        margin: f32,
        on_intersect: IntersectionCallback,
    ) -> Option<Box<dyn IntersectionObservation>>;

    /// Subscribes to scroll and resize events of `scope`.
    fn add_viewport_listener(&self, scope: &Container, listener: Rc<dyn Fn()>) -> ListenerId;

    fn remove_viewport_listener(&self, id: ListenerId);
}
