//! Working-set collection and the processed marker.

use std::rc::Rc;

use lazyreveal_platform::{Document, ElementHandle, ElementRef};
use log::debug;

use crate::options::RevealOptions;

/// Marker attribute set once an element has been revealed. Prevents
/// re-entry into the working set on subsequent scans.
pub const PROCESSED_ATTRIBUTE: &str = "data-was-processed";

/// Re-queries the document for candidate elements, in document order.
pub fn collect(document: &Rc<dyn Document>, options: &RevealOptions) -> Vec<ElementRef> {
    let found = document.query_selector_all(&options.container, &options.selector);
    debug!(
        "collected {} candidate(s) for selector {:?}",
        found.len(),
        options.selector
    );
    found
}

/// Drops elements already marked processed.
pub fn purge(elements: Vec<ElementRef>) -> Vec<ElementRef> {
    elements
        .into_iter()
        .filter(|element| !is_processed(element))
        .collect()
}

pub fn is_processed(element: &ElementRef) -> bool {
    element.attribute(PROCESSED_ATTRIBUTE).is_some()
}

/// Marks an element processed: sets the marker attribute and adds the
/// processed class. Idempotent.
pub fn mark_processed(element: &ElementRef, options: &RevealOptions) {
    element.set_attribute(PROCESSED_ATTRIBUTE, "true");
    element.add_class(&options.processed_class);
}
