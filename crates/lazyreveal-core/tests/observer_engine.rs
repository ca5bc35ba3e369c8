//! Engine scenarios on the passive (intersection observation) strategy.

use std::rc::Rc;

use lazyreveal_core::{RevealEngine, RevealOptions, DEFAULT_PLACEHOLDER};
use lazyreveal_platform::{Document, ElementHandle, ElementId, MediaEvent, Point, Rect, Size};
use lazyreveal_testing::{ElementRecorder, FakeDocument, FakeElement};

fn new_document() -> Rc<FakeDocument> {
    FakeDocument::new(Size::new(800.0, 600.0))
}

fn deferred_image(id: u64, y: f32) -> Rc<FakeElement> {
    let element = FakeElement::image(id);
    element.set_document_rect(Rect::new(0.0, y, 100.0, 150.0));
    element.set_attribute("data-original", &format!("photo-{id}.jpg"));
    element
}

fn engine(document: &Rc<FakeDocument>, options: RevealOptions) -> RevealEngine {
    RevealEngine::new(Rc::clone(document) as Rc<dyn Document>, options)
}

#[test]
fn below_the_fold_image_loads_only_after_scroll() {
    let document = new_document();
    // 2000px below the 600px fold.
    let image = deferred_image(1, 2600.0);
    document.attach(&image);
    let _engine = engine(&document, RevealOptions::default());

    // Observed, but nothing revealed before any scroll.
    document.deliver_intersections();
    assert_eq!(image.source(), None);
    assert!(image.attribute("data-was-processed").is_none());

    // Scroll until the image is within 0px of the viewport.
    document.set_scroll(Point::new(0.0, 2600.0));
    document.deliver_intersections();

    // Probe policy: placeholder first, loading class while fetching.
    assert_eq!(image.source().as_deref(), Some(DEFAULT_PLACEHOLDER));
    assert!(image.has_class("loading"));
    assert_eq!(image.attribute("data-was-processed").as_deref(), Some("true"));

    document.last_probe().unwrap().fire(MediaEvent::Load);
    assert_eq!(image.source().as_deref(), Some("photo-1.jpg"));
    assert!(!image.has_class("loading"));
    assert!(image.has_class("loaded"));
}

#[test]
fn revealed_element_is_unobserved_and_never_redelivered() {
    let document = new_document();
    let image = deferred_image(1, 100.0);
    document.attach(&image);
    let on_set = ElementRecorder::new();
    let _engine = engine(
        &document,
        RevealOptions {
            on_set: Some(on_set.hook()),
            ..RevealOptions::default()
        },
    );

    document.deliver_intersections();
    assert_eq!(on_set.count(), 1);
    assert!(document.observed_ids().is_empty());

    // A second observer pass has nothing left to deliver.
    document.deliver_intersections();
    assert_eq!(on_set.count(), 1);
}

#[test]
fn threshold_becomes_the_observation_margin() {
    let document = new_document();
    // 100px below the fold: outside a 0px margin, inside a 300px one.
    let image = deferred_image(1, 700.0);
    document.attach(&image);
    let _engine = engine(
        &document,
        RevealOptions {
            threshold: 300.0,
            ..RevealOptions::default()
        },
    );

    document.deliver_intersections();
    assert_eq!(image.attribute("data-was-processed").as_deref(), Some("true"));
}

#[test]
fn update_picks_up_newly_attached_elements() {
    let document = new_document();
    let first = deferred_image(1, 100.0);
    document.attach(&first);
    let mut engine = engine(&document, RevealOptions::default());
    document.deliver_intersections();
    assert!(first.has_class("processed"));

    // Host injects more content; a new scan observes it.
    let second = deferred_image(2, 200.0);
    document.attach(&second);
    engine.update();
    assert_eq!(document.observed_ids(), vec![ElementId(2)]);

    document.deliver_intersections();
    assert!(second.has_class("processed"));
}

#[test]
fn reveal_happens_at_most_once_across_updates() {
    let document = new_document();
    let image = deferred_image(1, 100.0);
    document.attach(&image);
    let on_set = ElementRecorder::new();
    let mut engine = engine(
        &document,
        RevealOptions {
            on_set: Some(on_set.hook()),
            ..RevealOptions::default()
        },
    );

    document.deliver_intersections();
    engine.update();
    document.deliver_intersections();

    assert_eq!(on_set.ids(), vec![ElementId(1)]);
    assert_eq!(engine.pending(), 0);
}

#[test]
fn show_while_loading_skips_the_probe() {
    let document = new_document();
    let image = deferred_image(1, 100.0);
    document.attach(&image);
    let _engine = engine(
        &document,
        RevealOptions {
            show_while_loading: true,
            ..RevealOptions::default()
        },
    );

    document.deliver_intersections();
    assert_eq!(image.source().as_deref(), Some("photo-1.jpg"));
    assert!(document.last_probe().is_none());

    image.fire(MediaEvent::Load);
    assert!(image.has_class("loaded"));
}

#[test]
fn destroy_releases_the_subscription_and_silences_late_events() {
    let document = new_document();
    let visible = deferred_image(1, 100.0);
    let pending = deferred_image(2, 5000.0);
    document.attach(&visible);
    document.attach(&pending);
    let on_set = ElementRecorder::new();
    let on_load = ElementRecorder::new();
    let on_error = ElementRecorder::new();
    let mut engine = engine(
        &document,
        RevealOptions {
            show_while_loading: true,
            on_set: Some(on_set.hook()),
            on_load: Some(on_load.hook()),
            on_error: Some(on_error.hook()),
            ..RevealOptions::default()
        },
    );

    // First element revealed; its fetch is still in flight at destroy time.
    document.deliver_intersections();
    assert_eq!(on_set.count(), 1);

    engine.destroy();
    assert!(!document.observer_connected());

    // Late completion and failure events must not mutate classes or invoke
    // callbacks.
    visible.fire(MediaEvent::Load);
    visible.fire(MediaEvent::Error);
    document.set_scroll(Point::new(0.0, 5000.0));
    document.deliver_intersections();

    assert!(visible.has_class("loading"));
    assert!(!visible.has_class("loaded"));
    assert!(pending.attribute("data-was-processed").is_none());
    assert_eq!(on_load.count(), 0);
    assert_eq!(on_error.count(), 0);
    assert_eq!(on_set.count(), 1);

    // Second destroy is a defensive no-op, as is a later update.
    engine.destroy();
    engine.update();
    assert_eq!(engine.pending(), 0);
}
