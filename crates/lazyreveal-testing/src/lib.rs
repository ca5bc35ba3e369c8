//! Test doubles for the lazyreveal platform contracts.
//!
//! [`FakeDocument`] and [`FakeElement`] implement the `lazyreveal-platform`
//! traits entirely in memory, with host-side controls the real browser would
//! own: scroll position, viewport size, element layout rectangles, synthetic
//! load/error delivery, and a simulated intersection observer.
//!
//! Elements carry a rectangle in *document* coordinates; client rectangles
//! are derived from the document's current scroll offset, so scrolling the
//! fake document moves every element's client rect the way a real viewport
//! does.

mod fake_document;
mod fake_element;
mod recorder;

pub use fake_document::{FakeDocument, FakeObservation};
pub use fake_element::FakeElement;
pub use recorder::{CountRecorder, ElementRecorder};
