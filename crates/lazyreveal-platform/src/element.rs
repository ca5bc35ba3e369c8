//! Element handle contract.

use std::rc::Rc;

use crate::geometry::Rect;

/// Host-assigned identity of a live element.
///
/// Stable for the lifetime of the element; used by the engine to key
/// observed-element sets and to compact its working set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

/// Identity of a registered event listener, scoped to one element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Coarse tag identity of an element, as far as revealing is concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementKind {
    /// An `img`-like element with a live `src` property and load/error events.
    Image,
    /// An embeddable frame (`iframe`-like): live `src`, load/error events.
    Frame,
    /// Anything else; revealed through a background-image style, no events.
    Generic,
}

impl ElementKind {
    /// Whether the element has a browser-interpreted source property and
    /// emits load/error completion events.
    pub fn is_media(self) -> bool {
        matches!(self, Self::Image | Self::Frame)
    }
}

/// Completion events a media element can deliver after its source is set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaEvent {
    Load,
    Error,
}

/// A shared handle to a live element.
pub type ElementRef = Rc<dyn ElementHandle>;

/// Listener invoked with the element the event fired on.
pub type MediaListener = Rc<dyn Fn(&ElementRef)>;

/// A live document node, as seen by the engine.
///
/// All methods take `&self`; hosts use interior mutability. The engine only
/// ever writes the documented surface: the live source property or
/// background-image style, CSS class membership, and marker attributes.
pub trait ElementHandle {
    fn id(&self) -> ElementId;

    fn kind(&self) -> ElementKind;

    /// Reads an attribute value, `None` when absent.
    fn attribute(&self, name: &str) -> Option<String>;

    fn set_attribute(&self, name: &str, value: &str);

    /// Current value of the live source property, `None` when never set.
    fn source(&self) -> Option<String>;

    /// Writes the live, fetch-triggering source property.
    fn set_source(&self, url: &str);

    /// Writes a `background-image` style for non-media elements.
    fn set_background_image(&self, url: &str);

    fn add_class(&self, name: &str);

    fn remove_class(&self, name: &str);

    fn has_class(&self, name: &str) -> bool;

    /// Bounding rectangle relative to the viewport (client coordinates).
    fn client_rect(&self) -> Rect;

    /// Whether the element currently participates in layout. Elements
    /// hidden via `display: none` (no offset parent) report `false`.
    fn is_laid_out(&self) -> bool;

    /// Registers a completion listener. The host must keep it until it is
    /// removed and invoke it with this element when the event fires.
    fn add_listener(&self, event: MediaEvent, listener: MediaListener) -> ListenerId;

    /// Removes a previously registered listener. Unknown ids are ignored.
    fn remove_listener(&self, event: MediaEvent, id: ListenerId);
}
