//! Detection strategies.
//!
//! Picked once at construction, so no call site branches on platform
//! capability afterwards:
//! - [`ObserverStrategy`] when the host offers native intersection
//!   observation — the preferred, passive path.
//! - [`PollingStrategy`] otherwise, when the fallback is enabled — a
//!   scroll/resize listener drives full geometry passes.
//! - [`StaticStrategy`] as the last resort — nothing happens between
//!   explicit `update()` calls.

use std::cell::RefCell;
use std::rc::Rc;

use lazyreveal_platform::{
    Container, ElementHandle, ElementId, ElementRef, IntersectionObservation, ListenerId,
};
use log::{debug, trace};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::engine::EngineShared;
use crate::geometry;
use crate::tracker;

pub(crate) trait DetectionStrategy {
    fn name(&self) -> &'static str;

    /// Called by `update()` after the working set has been re-collected.
    fn activate(&mut self, shared: &Rc<EngineShared>);

    /// Called by `destroy()`. Releases every platform subscription.
    fn deactivate(&mut self, shared: &Rc<EngineShared>);
}

/// Passive strategy: one intersection subscription per engine instance,
/// covering the container expanded by the threshold. Each qualifying
/// element is revealed, unobserved (one-shot), and dropped from the
/// working set.
pub(crate) struct ObserverStrategy {
    observation: Rc<RefCell<Option<Box<dyn IntersectionObservation>>>>,
    observed: FxHashSet<ElementId>,
}

impl ObserverStrategy {
    /// Returns `None` when the host has no intersection capability.
    pub(crate) fn try_new(shared: &Rc<EngineShared>) -> Option<Self> {
        // The callback needs the observation handle to unobserve delivered
        // elements, but the handle only exists once the subscription is
        // created. The shared slot closes that loop.
        let slot: Rc<RefCell<Option<Box<dyn IntersectionObservation>>>> = Rc::default();
        let on_intersect = {
            let engine = Rc::downgrade(shared);
            let slot = Rc::clone(&slot);
            Rc::new(move |element: &ElementRef| {
                let Some(shared) = engine.upgrade() else {
                    return;
                };
                if shared.lifecycle.is_destroyed() {
                    return;
                }
                if tracker::is_processed(element) {
                    return;
                }
                shared.revealer.reveal(element);
                if let Some(observation) = slot.borrow().as_deref() {
                    observation.unobserve(element);
                }
                shared.remove_from_working_set(element);
            })
        };
        let observation = shared.document.observe_intersections(
            &shared.options.container,
            shared.options.threshold,
            on_intersect,
        )?;
        *slot.borrow_mut() = Some(observation);
        Some(Self {
            observation: slot,
            observed: FxHashSet::default(),
        })
    }
}

impl DetectionStrategy for ObserverStrategy {
    fn name(&self) -> &'static str {
        "observer"
    }

    fn activate(&mut self, shared: &Rc<EngineShared>) {
        let observation = self.observation.borrow();
        let Some(observation) = observation.as_deref() else {
            return;
        };
        let elements = shared.elements.borrow();
        let mut newly_observed = 0usize;
        for element in elements.iter() {
            if self.observed.insert(element.id()) {
                observation.observe(element);
                newly_observed += 1;
            }
        }
        trace!(
            "observing {} new element(s), {} total",
            newly_observed,
            self.observed.len()
        );
    }

    fn deactivate(&mut self, shared: &Rc<EngineShared>) {
        if let Some(observation) = self.observation.borrow_mut().take() {
            for element in shared.elements.borrow().iter() {
                observation.unobserve(element);
            }
            observation.disconnect();
        }
        self.observed.clear();
    }
}

/// Active strategy: a scroll/resize listener on the container triggers a
/// full geometry pass over the working set.
pub(crate) struct PollingStrategy {
    listener: Option<ListenerId>,
}

impl PollingStrategy {
    pub(crate) fn new(shared: &Rc<EngineShared>) -> Self {
        let listener = {
            let engine = Rc::downgrade(shared);
            shared.document.add_viewport_listener(
                &shared.options.container,
                Rc::new(move || {
                    if let Some(shared) = engine.upgrade() {
                        run_scan_pass(&shared);
                    }
                }),
            )
        };
        Self {
            listener: Some(listener),
        }
    }
}

impl DetectionStrategy for PollingStrategy {
    fn name(&self) -> &'static str {
        "polling"
    }

    fn activate(&mut self, shared: &Rc<EngineShared>) {
        run_scan_pass(shared);
    }

    fn deactivate(&mut self, shared: &Rc<EngineShared>) {
        if let Some(id) = self.listener.take() {
            shared.document.remove_viewport_listener(id);
        }
    }
}

/// Static fallback: no platform subscriptions at all. Geometry is only
/// evaluated synchronously inside explicit `update()` calls.
pub(crate) struct StaticStrategy;

impl DetectionStrategy for StaticStrategy {
    fn name(&self) -> &'static str {
        "static"
    }

    fn activate(&mut self, shared: &Rc<EngineShared>) {
        run_scan_pass(shared);
    }

    fn deactivate(&mut self, _shared: &Rc<EngineShared>) {}
}

/// Picks the strategy once, based on platform capability and configuration.
pub(crate) fn select(shared: &Rc<EngineShared>) -> Box<dyn DetectionStrategy> {
    if let Some(observer) = ObserverStrategy::try_new(shared) {
        return Box::new(observer);
    }
    if shared.options.scroll_fallback {
        return Box::new(PollingStrategy::new(shared));
    }
    Box::new(StaticStrategy)
}

/// One synchronous scan: snapshot the working set, reveal every qualifying
/// element in document order, then compact the set.
///
/// Scan and process are deliberately two separate phases; a pass never
/// re-collects mid-iteration.
pub(crate) fn run_scan_pass(shared: &Rc<EngineShared>) {
    if shared.lifecycle.is_destroyed() {
        return;
    }
    let options = &shared.options;
    let scroll = shared.document.scroll_offset();
    let fold = match &options.container {
        Container::Document => geometry::document_fold(scroll, shared.document.viewport_size()),
        Container::Element(container) => geometry::element_fold(container.client_rect(), scroll),
    };

    let snapshot: Vec<ElementRef> = shared.elements.borrow().clone();
    let mut qualifying: SmallVec<[ElementRef; 8]> = SmallVec::new();
    for element in &snapshot {
        if options.skip_hidden && !element.is_laid_out() {
            continue;
        }
        let rect = geometry::to_document_coords(element.client_rect(), scroll);
        if geometry::is_within_threshold(rect, fold, options.threshold) {
            qualifying.push(Rc::clone(element));
        }
    }

    for element in &qualifying {
        shared.revealer.reveal(element);
    }

    let remaining = {
        let mut elements = shared.elements.borrow_mut();
        elements.retain(|element| !tracker::is_processed(element));
        elements.len()
    };
    debug!(
        "scan pass: {} candidate(s), {} revealed, {} remaining",
        snapshot.len(),
        qualifying.len(),
        remaining
    );
    if !qualifying.is_empty() {
        if let Some(on_processed) = &options.on_processed {
            on_processed(remaining);
        }
    }
}
