//! The reveal side-effect sequence.
//!
//! Revealing copies an element's deferred source into its live,
//! fetch-triggering property, wires completion listeners, and walks the
//! documented class transitions: loading while the fetch is in flight, then
//! loaded or error. Every listener is detached again on its first delivery
//! so neither path can fire twice, and every listener checks the engine
//! [`Lifecycle`] first so callbacks racing a `destroy()` stay inert.

use std::cell::Cell;
use std::rc::Rc;

use lazyreveal_platform::{
    Document, ElementHandle, ElementKind, ElementRef, ListenerId, MediaEvent, MediaListener,
};
use log::trace;

use crate::lifecycle::Lifecycle;
use crate::options::{ElementCallback, RevealOptions};
use crate::tracker;

/// Ids of the paired load/error listeners, shared between the two handler
/// closures so whichever fires first can detach both.
type ListenerPair = Rc<Cell<Option<(ListenerId, ListenerId)>>>;

pub(crate) struct Revealer {
    document: Rc<dyn Document>,
    options: Rc<RevealOptions>,
    lifecycle: Lifecycle,
}

impl Revealer {
    pub(crate) fn new(
        document: Rc<dyn Document>,
        options: Rc<RevealOptions>,
        lifecycle: Lifecycle,
    ) -> Self {
        Self {
            document,
            options,
            lifecycle,
        }
    }

    /// Activates one element.
    ///
    /// Side effects in order: listeners and the loading class (media
    /// elements only), then the source copy, then the processed marker,
    /// then the `on_set` callback. The processed marker is what makes
    /// revealing at-most-once: marked elements never re-enter the working
    /// set on later scans.
    pub(crate) fn reveal(&self, element: &ElementRef) {
        trace!("revealing element {:?}", element.id());
        let source = self.deferred_source(element);
        match element.kind() {
            ElementKind::Image if !self.options.show_while_loading => {
                if let Some(source) = source.as_deref() {
                    self.reveal_via_probe(element, source);
                }
            }
            kind if kind.is_media() => {
                if let Some(source) = source.as_deref() {
                    self.reveal_direct(element, source);
                }
            }
            _ => {
                if let Some(source) = source.as_deref() {
                    element.set_background_image(source);
                }
            }
        }
        tracker::mark_processed(element, &self.options);
        invoke(&self.options.on_set, element);
    }

    /// Deferred source with placeholder fallback.
    fn deferred_source(&self, element: &ElementRef) -> Option<String> {
        element
            .attribute(&self.options.source_attribute)
            .or_else(|| self.options.placeholder.clone())
    }

    /// Reveal-while-loading: the element's own source is set immediately
    /// and its state classes track the element's own events.
    fn reveal_direct(&self, element: &ElementRef, source: &str) {
        let ids: ListenerPair = Rc::default();
        let load_id = element.add_listener(MediaEvent::Load, self.completion_handler(&ids));
        let error_id = element.add_listener(MediaEvent::Error, self.failure_handler(&ids));
        ids.set(Some((load_id, error_id)));
        element.add_class(&self.options.loading_class);
        element.set_source(source);
    }

    /// Reveal-on-completion: the fetch runs through a detached probe image
    /// first; the element keeps its placeholder until the probe finishes,
    /// then receives the real source together with the loaded class.
    fn reveal_via_probe(&self, element: &ElementRef, source: &str) {
        if element.source().is_none() {
            if let Some(placeholder) = self.options.placeholder.as_deref() {
                element.set_source(placeholder);
            }
        }

        let probe = self.document.create_probe_image();
        let ids: ListenerPair = Rc::default();

        let on_load: MediaListener = {
            let options = Rc::clone(&self.options);
            let lifecycle = self.lifecycle.clone();
            let ids = Rc::clone(&ids);
            let target = Rc::clone(element);
            let source = source.to_owned();
            Rc::new(move |probe_element: &ElementRef| {
                if lifecycle.is_destroyed() {
                    return;
                }
                detach(probe_element, &ids);
                target.set_source(&source);
                target.remove_class(&options.loading_class);
                target.add_class(&options.loaded_class);
                invoke(&options.on_load, &target);
            })
        };
        let on_error: MediaListener = {
            let options = Rc::clone(&self.options);
            let lifecycle = self.lifecycle.clone();
            let ids = Rc::clone(&ids);
            let target = Rc::clone(element);
            Rc::new(move |probe_element: &ElementRef| {
                if lifecycle.is_destroyed() {
                    return;
                }
                detach(probe_element, &ids);
                target.remove_class(&options.loading_class);
                target.add_class(&options.error_class);
                invoke(&options.on_error, &target);
            })
        };

        let load_id = probe.add_listener(MediaEvent::Load, on_load);
        let error_id = probe.add_listener(MediaEvent::Error, on_error);
        ids.set(Some((load_id, error_id)));
        element.add_class(&self.options.loading_class);
        probe.set_source(source);
    }

    /// Handler for a completion event arriving on the element itself.
    fn completion_handler(&self, ids: &ListenerPair) -> MediaListener {
        let options = Rc::clone(&self.options);
        let lifecycle = self.lifecycle.clone();
        let ids = Rc::clone(ids);
        Rc::new(move |element: &ElementRef| {
            if lifecycle.is_destroyed() {
                return;
            }
            detach(element, &ids);
            element.remove_class(&options.loading_class);
            element.add_class(&options.loaded_class);
            invoke(&options.on_load, element);
        })
    }

    /// Handler for a failure event arriving on the element itself.
    fn failure_handler(&self, ids: &ListenerPair) -> MediaListener {
        let options = Rc::clone(&self.options);
        let lifecycle = self.lifecycle.clone();
        let ids = Rc::clone(ids);
        Rc::new(move |element: &ElementRef| {
            if lifecycle.is_destroyed() {
                return;
            }
            detach(element, &ids);
            element.remove_class(&options.loading_class);
            element.add_class(&options.error_class);
            invoke(&options.on_error, element);
        })
    }
}

/// Detaches both paired listeners from `element`. The pair is taken, so a
/// second event delivery finds nothing to detach and the handlers' work is
/// done exactly once.
fn detach(element: &ElementRef, ids: &ListenerPair) {
    if let Some((load_id, error_id)) = ids.take() {
        element.remove_listener(MediaEvent::Load, load_id);
        element.remove_listener(MediaEvent::Error, error_id);
    }
}

fn invoke(callback: &Option<ElementCallback>, element: &ElementRef) {
    if let Some(callback) = callback {
        callback(element);
    }
}
