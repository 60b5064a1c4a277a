#![forbid(unsafe_code)]

//! Scroll-into-view requests for the current anchor.

use std::fmt;
use std::str::FromStr;

use waypost_core::{Rect, Size};

use crate::placement::ParsePositionError;

/// Extra room an anchor needs below it to count as visible.
pub const VISIBLE_BOTTOM_ALLOWANCE: f64 = 80.0;

/// What to bring into view when a step becomes current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ScrollTo {
    /// Center the anchor.
    #[default]
    Element,
    /// Center the overlay.
    Tooltip,
    /// Never scroll.
    Off,
}

impl fmt::Display for ScrollTo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Element => "element",
            Self::Tooltip => "tooltip",
            Self::Off => "off",
        })
    }
}

impl FromStr for ScrollTo {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "element" => Ok(Self::Element),
            "tooltip" => Ok(Self::Tooltip),
            "off" => Ok(Self::Off),
            other => Err(ParsePositionError::UnknownScrollTarget(other.to_string())),
        }
    }
}

/// Whether a viewport-relative box is comfortably on screen.
pub fn is_in_viewport(rect: Rect, viewport: Size) -> bool {
    rect.top() >= 0.0
        && rect.left() >= 0.0
        && rect.bottom() + VISIBLE_BOTTOM_ALLOWANCE <= viewport.height
        && rect.right() <= viewport.width
}

/// Vertical page scroll delta that centers the target, or `None` when the
/// anchor is already visible or scrolling is off.
///
/// `anchor` and `overlay` are viewport-relative boxes. With
/// [`ScrollTo::Tooltip`] the overlay box is centered when one is known,
/// otherwise the anchor is.
pub fn scroll_adjustment(
    anchor: Rect,
    viewport: Size,
    overlay: Option<Rect>,
    scroll_to: ScrollTo,
    padding: f64,
) -> Option<f64> {
    let target = match scroll_to {
        ScrollTo::Off => return None,
        ScrollTo::Element => anchor,
        ScrollTo::Tooltip => overlay.unwrap_or(anchor),
    };
    if is_in_viewport(anchor, viewport) {
        return None;
    }

    let centered = target.top() - (viewport.height / 2.0 - target.height / 2.0);
    // Above the fold or taller than the viewport: leave room above the
    // target instead of below it.
    let delta = if target.top() < 0.0 || anchor.height > viewport.height {
        centered - padding
    } else {
        centered + padding
    };
    waypost_core::debug!(delta, scroll_to = %scroll_to, "scroll into view");
    Some(delta)
}
