//! Lazy media reveal engine.
//!
//! Defers loading of off-screen media until it approaches the visible
//! viewport. The engine is headless: hosts implement the contracts in
//! `lazyreveal-platform` and the engine supplies the algorithmic core —
//! viewport-membership geometry, the element lifecycle state machine, the
//! reveal side-effect sequence, and two interchangeable detection
//! strategies (native intersection observation when the host offers it,
//! scroll-driven geometry polling otherwise).
//!
//! # Example
//!
//! ```rust,ignore
//! let mut engine = RevealEngine::new(
//!     document,
//!     RevealOptions {
//!         threshold: 300.0,
//!         ..RevealOptions::default()
//!     },
//! );
//! // later, after injecting new content:
//! engine.update();
//! // on teardown:
//! engine.destroy();
//! ```

mod engine;
mod geometry;
mod lifecycle;
mod options;
mod reveal;
mod strategy;
mod tracker;

pub use engine::{bootstrap, RevealEngine};
pub use geometry::{document_fold, element_fold, is_within_threshold, to_document_coords};
pub use lifecycle::Lifecycle;
pub use options::{CountCallback, ElementCallback, RevealOptions, DEFAULT_PLACEHOLDER};
pub use tracker::PROCESSED_ATTRIBUTE;
