//! Host contracts for the lazyreveal engine.
//!
//! The engine itself is headless: it never talks to a concrete DOM. A host
//! layer (a browser/WASM binding, an embedded web view, or the bundled test
//! double in `lazyreveal-testing`) implements the traits in this crate and
//! supplies element handles, geometry reads, and event delivery.
//!
//! A host is expected to provide:
//! - selector queries over live elements ([`Document::query_selector_all`])
//! - scroll offset and viewport size of the owning document
//! - per-element client rectangles and layout visibility
//! - load/error event delivery on media elements
//! - optionally, native intersection observation
//!
//! Everything here is single-threaded and `Rc`-based; hosts dispatch all
//! callbacks on the one thread that owns the engine.

mod document;
mod element;
mod geometry;

pub use document::{Container, Document, IntersectionObservation, IntersectionCallback};
pub use element::{
    ElementHandle, ElementId, ElementKind, ElementRef, ListenerId, MediaEvent, MediaListener,
};
pub use geometry::{Point, Rect, Size};
