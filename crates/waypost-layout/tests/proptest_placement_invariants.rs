//! Property-based invariant tests for placement and edge assignment.
//!
//! 1. assign_edges is idempotent.
//! 2. A desired side with clearance is always kept.
//! 3. A single-side precedence with clearance everywhere returns that side.
//! 4. The chosen base is listed in the precedence, or floating.
//! 5. Anchored overlays narrower than the viewport stay inside it horizontally.
//! 6. Anchored overlays shorter than the viewport stay inside it vertically.

use proptest::prelude::*;
use waypost_core::{Offset, Rect, Size};
use waypost_layout::{
    BasePosition, PlacementConfig, Position, Side, assign_edges, decide_placement,
};

const EPSILON: f64 = 1e-6;

// ── Helpers ─────────────────────────────────────────────────────────────

fn side() -> impl Strategy<Value = Side> {
    prop_oneof![
        Just(Side::Top),
        Just(Side::Bottom),
        Just(Side::Left),
        Just(Side::Right),
    ]
}

fn precedence() -> impl Strategy<Value = Vec<Side>> {
    proptest::collection::vec(side(), 0..=4)
}

fn viewport() -> impl Strategy<Value = Size> {
    (200.0f64..2000.0, 200.0f64..1500.0).prop_map(|(w, h)| Size::new(w, h))
}

fn anchor_in(viewport: Size) -> impl Strategy<Value = Offset> {
    (
        -100.0f64..viewport.width + 100.0,
        -100.0f64..viewport.height + 100.0,
        0.0f64..400.0,
        0.0f64..300.0,
    )
        .prop_map(|(x, y, w, h)| Offset::from_rect(Rect::new(x, y, w, h)))
}

fn overlay() -> impl Strategy<Value = Size> {
    (0.0f64..600.0, 0.0f64..400.0).prop_map(|(w, h)| Size::new(w, h))
}

fn scene() -> impl Strategy<Value = (Size, Offset, Size)> {
    viewport().prop_flat_map(|viewport| (Just(viewport), anchor_in(viewport), overlay()))
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Idempotence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn assign_edges_is_idempotent(
        (viewport, anchor, overlay) in scene(),
        precedence in precedence(),
        hint_mode in any::<bool>(),
        show_step_numbers in any::<bool>(),
    ) {
        let placement = decide_placement(&precedence, &anchor, overlay, Position::Auto, viewport);
        let first = assign_edges(placement, &anchor, viewport, overlay, hint_mode, show_step_numbers);
        let second = assign_edges(placement, &anchor, viewport, overlay, hint_mode, show_step_numbers);
        prop_assert_eq!(first, second);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Desired side with clearance is kept
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn desired_side_with_clearance_wins(
        (viewport, anchor, overlay) in scene(),
        desired in side(),
        mut precedence in precedence(),
    ) {
        let config = PlacementConfig::default();
        prop_assume!(config.side_fits(desired, &anchor, overlay, viewport));
        if !precedence.contains(&desired) {
            precedence.push(desired);
        }
        let placement = decide_placement(&precedence, &anchor, overlay, Position::side(desired), viewport);
        prop_assert_eq!(placement.base, BasePosition::from(desired));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Single-side precedence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn single_side_with_room_everywhere_is_returned(
        p in side(),
        desired in prop_oneof![Just(Position::Auto), side().prop_map(Position::side)],
        w in 1.0f64..100.0,
        h in 1.0f64..100.0,
    ) {
        let viewport = Size::new(2000.0, 2000.0);
        let anchor = Offset::from_rect(Rect::new(950.0, 950.0, 100.0, 100.0));
        let placement = decide_placement(&[p], &anchor, Size::new(w, h), desired, viewport);
        prop_assert_eq!(placement.base, BasePosition::from(p));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Chosen base comes from the precedence list
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn base_is_listed_or_floating(
        (viewport, anchor, overlay) in scene(),
        precedence in precedence(),
        desired in side(),
    ) {
        let placement = decide_placement(&precedence, &anchor, overlay, Position::side(desired), viewport);
        let listed = precedence.iter().any(|s| BasePosition::from(*s) == placement.base);
        prop_assert!(listed || placement.base == BasePosition::Floating);
        prop_assert_eq!(
            placement.alignment.is_some(),
            matches!(placement.base, BasePosition::Top | BasePosition::Bottom)
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Horizontal containment
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn anchored_overlay_stays_inside_horizontally(
        (viewport, anchor, overlay) in scene(),
        precedence in precedence(),
        show_step_numbers in any::<bool>(),
    ) {
        prop_assume!(overlay.width <= viewport.width);
        let placement = decide_placement(&precedence, &anchor, overlay, Position::Auto, viewport);
        let edges = assign_edges(placement, &anchor, viewport, overlay, false, show_step_numbers);
        let rect = edges.overlay_rect(&anchor, viewport, overlay);
        prop_assert!(rect.x >= -EPSILON, "left edge {} < 0 ({:?})", rect.x, placement);
        prop_assert!(
            rect.right() <= viewport.width + EPSILON,
            "right edge {} > {} ({:?})", rect.right(), viewport.width, placement
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Vertical containment
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn anchored_overlay_stays_inside_vertically(
        (viewport, anchor, overlay) in scene(),
        precedence in precedence(),
        show_step_numbers in any::<bool>(),
    ) {
        prop_assume!(overlay.height <= viewport.height);
        let placement = decide_placement(&precedence, &anchor, overlay, Position::Auto, viewport);
        prop_assume!(placement.base != BasePosition::Floating);
        let edges = assign_edges(placement, &anchor, viewport, overlay, false, show_step_numbers);
        let rect = edges.overlay_rect(&anchor, viewport, overlay);
        prop_assert!(rect.y >= -EPSILON, "top edge {} < 0 ({:?})", rect.y, placement);
        prop_assert!(
            rect.bottom() <= viewport.height + EPSILON,
            "bottom edge {} > {} ({:?})", rect.bottom(), viewport.height, placement
        );
    }
}
