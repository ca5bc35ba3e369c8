//! Engine configuration.

use std::rc::Rc;

use lazyreveal_platform::{Container, ElementRef};

/// Callback receiving the affected element.
pub type ElementCallback = Rc<dyn Fn(&ElementRef)>;

/// Callback receiving the size of the working set after a scan pass.
pub type CountCallback = Rc<dyn Fn(usize)>;

/// 1x1 transparent GIF applied before real content loads.
pub const DEFAULT_PLACEHOLDER: &str =
    "data:image/gif;base64,R0lGODlhAQABAIAAAAAAAP///yH5BAEAAAAALAAAAAABAAEAAAIBRAA7";

/// Configuration of one engine instance. Immutable after construction.
///
/// Build by overlaying overrides on the defaults:
///
/// ```rust,ignore
/// let options = RevealOptions {
///     threshold: 300.0,
///     source_attribute: "data-src".into(),
///     ..RevealOptions::default()
/// };
/// ```
#[derive(Clone)]
pub struct RevealOptions {
    /// Selector for candidate elements. The default excludes elements
    /// already carrying the processed class, so re-queries naturally skip
    /// revealed content.
    pub selector: String,

    /// The scroll region driving detection: the whole document viewport, or
    /// one scrollable element.
    pub container: Container,

    /// Pixel margin expanding the container's effective bounds in all four
    /// directions, for early-trigger loading. Non-negative.
    pub threshold: f32,

    /// Attribute holding the deferred source URL.
    pub source_attribute: String,

    /// Class added once an element has been revealed.
    pub processed_class: String,

    /// Class present while the platform fetch is in flight.
    pub loading_class: String,

    /// Class added once the fetch completes.
    pub loaded_class: String,

    /// Class added when the fetch fails.
    pub error_class: String,

    /// Skip elements hidden via layout (`display: none`) during polling
    /// passes; they stay in the working set for the next pass.
    pub skip_hidden: bool,

    /// Apply the source immediately and track state classes optimistically
    /// (suits progressively rendered formats). When `false` (the default),
    /// images load through a detached probe first so state classes track
    /// real completion without flashing a partial asset.
    pub show_while_loading: bool,

    /// When the host lacks intersection observation, fall back to
    /// scroll/resize-driven polling. When `false`, the engine stays
    /// inactive and only evaluates during explicit `update()` calls.
    pub scroll_fallback: bool,

    /// Source applied before real content loads. `None` leaves elements
    /// without a source until reveal.
    pub placeholder: Option<String>,

    /// Invoked right after the deferred source is applied.
    pub on_set: Option<ElementCallback>,

    /// Invoked when an element's fetch completes.
    pub on_load: Option<ElementCallback>,

    /// Invoked when an element's fetch fails. Exactly once per element.
    pub on_error: Option<ElementCallback>,

    /// Invoked after a polling pass that revealed at least one element,
    /// with the number of elements still awaiting reveal.
    pub on_processed: Option<CountCallback>,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            selector: "img:not(.processed)".to_owned(),
            container: Container::Document,
            threshold: 0.0,
            source_attribute: "data-original".to_owned(),
            processed_class: "processed".to_owned(),
            loading_class: "loading".to_owned(),
            loaded_class: "loaded".to_owned(),
            error_class: "error".to_owned(),
            skip_hidden: true,
            show_while_loading: false,
            scroll_fallback: true,
            placeholder: Some(DEFAULT_PLACEHOLDER.to_owned()),
            on_set: None,
            on_load: None,
            on_error: None,
            on_processed: None,
        }
    }
}
