#![forbid(unsafe_code)]

//! Geometry of the highlight layer and the interaction blocker drawn over
//! the current anchor.

use waypost_core::{Offset, Rect};

/// Default padding around a highlighted anchor.
pub const HIGHLIGHT_PADDING: f64 = 10.0;

/// Box of the highlight (or interaction-blocking) layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightRect {
    pub rect: Rect,
    /// The anchor is fixed-positioned; the layer should be too.
    pub fixed: bool,
}

/// Expand the anchor box by half of `padding` on every side.
///
/// `offset` is the anchor's resolved offset, so the box lives in whichever
/// frame the geometry resolver chose.
pub fn highlight_rect(offset: &Offset, padding: f64, fixed: bool) -> HighlightRect {
    let padding = padding.max(0.0);
    HighlightRect {
        rect: offset.rect().inflate(padding / 2.0),
        fixed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_is_split_across_both_sides() {
        let offset = Offset::from_rect(Rect::new(100.0, 200.0, 50.0, 20.0));
        let layer = highlight_rect(&offset, HIGHLIGHT_PADDING, false);
        assert_eq!(layer.rect, Rect::new(95.0, 195.0, 60.0, 30.0));
        assert!(!layer.fixed);
    }

    #[test]
    fn negative_padding_is_ignored() {
        let offset = Offset::from_rect(Rect::new(10.0, 10.0, 5.0, 5.0));
        assert_eq!(highlight_rect(&offset, -4.0, true).rect, offset.rect());
    }
}
