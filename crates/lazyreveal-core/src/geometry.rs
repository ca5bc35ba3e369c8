//! Viewport-membership geometry.
//!
//! Pure functions deciding whether an element's bounding box falls inside a
//! container's visible region once that region is expanded outward by a
//! threshold. Both detection strategies share this math: the polling
//! strategy calls it directly, and the observer strategy delegates the same
//! decision to the host's native observation with the threshold as margin.

use lazyreveal_platform::{Point, Rect, Size};

/// Converts a viewport-relative (client) rectangle to document coordinates.
pub fn to_document_coords(client_rect: Rect, scroll: Point) -> Rect {
    client_rect.translated(scroll.x, scroll.y)
}

/// Effective visible rectangle of the whole document viewport, in document
/// coordinates.
pub fn document_fold(scroll: Point, viewport: Size) -> Rect {
    Rect::new(scroll.x, scroll.y, viewport.width, viewport.height)
}

/// Effective visible rectangle of a scrollable element container, in
/// document coordinates.
pub fn element_fold(container_client_rect: Rect, scroll: Point) -> Rect {
    to_document_coords(container_client_rect, scroll)
}

/// Strict AABB-overlap test with margin.
///
/// `element` qualifies unless it lies entirely below, above, right of, or
/// left of `fold` once every fold edge is pushed outward by `threshold`
/// pixels. The four directional checks are independent; any single one
/// disqualifies. Comparisons are inclusive on the fold side: an element
/// whose nearest edge sits at exactly `threshold` pixels beyond the fold is
/// still outside.
///
/// Zero-size rectangles are judged by position alone; a point strictly
/// inside the expanded fold qualifies.
///
/// Both rectangles must be in document coordinates. Pure; no side effects.
pub fn is_within_threshold(element: Rect, fold: Rect, threshold: f32) -> bool {
    let below = fold.bottom() <= element.y - threshold;
    let above = fold.y >= element.bottom() + threshold;
    let right_of = fold.right() <= element.x - threshold;
    let left_of = fold.x >= element.right() + threshold;
    !(below || above || right_of || left_of)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOLD: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 800.0,
        height: 600.0,
    };

    #[test]
    fn fully_inside_qualifies() {
        let element = Rect::new(100.0, 100.0, 200.0, 150.0);
        assert!(is_within_threshold(element, FOLD, 0.0));
    }

    #[test]
    fn fully_outside_every_direction_fails() {
        assert!(!is_within_threshold(
            Rect::new(0.0, 700.0, 100.0, 100.0),
            FOLD,
            0.0
        ));
        assert!(!is_within_threshold(
            Rect::new(0.0, -200.0, 100.0, 100.0),
            FOLD,
            0.0
        ));
        assert!(!is_within_threshold(
            Rect::new(900.0, 0.0, 100.0, 100.0),
            FOLD,
            0.0
        ));
        assert!(!is_within_threshold(
            Rect::new(-200.0, 0.0, 100.0, 100.0),
            FOLD,
            0.0
        ));
    }

    #[test]
    fn straddling_one_edge_qualifies() {
        let element = Rect::new(0.0, 550.0, 100.0, 100.0);
        assert!(is_within_threshold(element, FOLD, 0.0));
    }

    #[test]
    fn below_boundary_at_threshold() {
        let threshold = 100.0;
        // Top edge exactly `threshold` past the bottom fold: outside.
        let at = Rect::new(0.0, FOLD.bottom() + threshold, 100.0, 50.0);
        assert!(!is_within_threshold(at, FOLD, threshold));
        // One pixel nearer: inside.
        let near = Rect::new(0.0, FOLD.bottom() + threshold - 1.0, 100.0, 50.0);
        assert!(is_within_threshold(near, FOLD, threshold));
        // One pixel farther: outside.
        let far = Rect::new(0.0, FOLD.bottom() + threshold + 1.0, 100.0, 50.0);
        assert!(!is_within_threshold(far, FOLD, threshold));
    }

    #[test]
    fn above_boundary_at_threshold() {
        let threshold = 100.0;
        // Bottom edge exactly `threshold` above the fold top: outside.
        let at = Rect::new(0.0, -50.0 - threshold, 100.0, 50.0);
        assert!(!is_within_threshold(at, FOLD, threshold));
        let near = Rect::new(0.0, -50.0 - threshold + 1.0, 100.0, 50.0);
        assert!(is_within_threshold(near, FOLD, threshold));
        let far = Rect::new(0.0, -50.0 - threshold - 1.0, 100.0, 50.0);
        assert!(!is_within_threshold(far, FOLD, threshold));
    }

    #[test]
    fn right_boundary_at_threshold() {
        let threshold = 50.0;
        let at = Rect::new(FOLD.right() + threshold, 0.0, 100.0, 100.0);
        assert!(!is_within_threshold(at, FOLD, threshold));
        let near = Rect::new(FOLD.right() + threshold - 1.0, 0.0, 100.0, 100.0);
        assert!(is_within_threshold(near, FOLD, threshold));
        let far = Rect::new(FOLD.right() + threshold + 1.0, 0.0, 100.0, 100.0);
        assert!(!is_within_threshold(far, FOLD, threshold));
    }

    #[test]
    fn left_boundary_at_threshold() {
        let threshold = 50.0;
        let at = Rect::new(-100.0 - threshold, 0.0, 100.0, 100.0);
        assert!(!is_within_threshold(at, FOLD, threshold));
        let near = Rect::new(-100.0 - threshold + 1.0, 0.0, 100.0, 100.0);
        assert!(is_within_threshold(near, FOLD, threshold));
        let far = Rect::new(-100.0 - threshold - 1.0, 0.0, 100.0, 100.0);
        assert!(!is_within_threshold(far, FOLD, threshold));
    }

    #[test]
    fn zero_size_element_judged_by_position() {
        let inside = Rect::new(400.0, 300.0, 0.0, 0.0);
        assert!(is_within_threshold(inside, FOLD, 0.0));
        let just_inside = Rect::new(0.0, FOLD.bottom() - 1.0, 0.0, 0.0);
        assert!(is_within_threshold(just_inside, FOLD, 0.0));
        // A point sitting exactly on the bottom fold is already past it.
        let on_fold = Rect::new(0.0, FOLD.bottom(), 0.0, 0.0);
        assert!(!is_within_threshold(on_fold, FOLD, 0.0));
    }

    #[test]
    fn document_fold_follows_scroll() {
        let fold = document_fold(Point::new(0.0, 2600.0), Size::new(800.0, 600.0));
        assert_eq!(fold, Rect::new(0.0, 2600.0, 800.0, 600.0));
    }

    #[test]
    fn element_fold_is_container_rect_in_document_coords() {
        let fold = element_fold(Rect::new(10.0, 20.0, 300.0, 200.0), Point::new(0.0, 500.0));
        assert_eq!(fold, Rect::new(10.0, 520.0, 300.0, 200.0));
    }
}
