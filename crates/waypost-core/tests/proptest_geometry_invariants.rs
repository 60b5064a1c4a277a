//! Property tests for the geometry primitives the layout engine builds on.

use proptest::prelude::*;
use waypost_core::{Offset, Rect, Size};

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (
        -2000.0f64..2000.0,
        -2000.0f64..2000.0,
        0.0f64..1500.0,
        0.0f64..1500.0,
    )
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

// ═══════════════════════════════════════════════════════════════════════════
// Rect
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn translate_preserves_size(rect in rect_strategy(), dx in -500.0f64..500.0, dy in -500.0f64..500.0) {
        let moved = rect.translate(dx, dy);
        prop_assert_eq!(moved.size(), rect.size());
        prop_assert!((moved.x - rect.x - dx).abs() < 1e-9);
        prop_assert!((moved.y - rect.y - dy).abs() < 1e-9);
    }

    #[test]
    fn inflate_contains_original(rect in rect_strategy(), amount in 0.0f64..100.0) {
        let grown = rect.inflate(amount);
        prop_assert!(grown.contains_rect(&rect));
        prop_assert!((grown.center_x() - rect.center_x()).abs() < 1e-9);
    }

    #[test]
    fn empty_iff_a_dimension_collapses(rect in rect_strategy()) {
        prop_assert_eq!(rect.is_empty(), rect.width <= 0.0 || rect.height <= 0.0);
        prop_assert_eq!(rect.is_empty(), rect.size().is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Offset
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn offset_edges_agree_with_size(
        top in -1000.0f64..1000.0,
        left in -1000.0f64..1000.0,
        width in 0.0f64..800.0,
        height in 0.0f64..800.0,
        abs_top in -1000.0f64..3000.0,
        abs_left in -1000.0f64..3000.0,
    ) {
        let offset = Offset::new(top, left, Size::new(width, height), abs_top, abs_left);
        prop_assert!((offset.bottom - offset.top - height).abs() < 1e-9);
        prop_assert!((offset.right - offset.left - width).abs() < 1e-9);
        prop_assert!((offset.absolute_bottom - offset.absolute_top - height).abs() < 1e-9);
        prop_assert!((offset.absolute_right - offset.absolute_left - width).abs() < 1e-9);
        prop_assert_eq!(offset.absolute_rect().size(), offset.rect().size());
    }

    #[test]
    fn from_rect_round_trips(rect in rect_strategy()) {
        let offset = Offset::from_rect(rect);
        prop_assert_eq!(offset.rect(), rect);
        prop_assert_eq!(offset.absolute_rect(), rect);
        prop_assert!((offset.absolute_center_x() - rect.center_x()).abs() < 1e-9);
    }
}
