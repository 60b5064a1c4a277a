#![forbid(unsafe_code)]

//! Coordinate assignment: turn a [`Placement`] into concrete edge offsets.
//!
//! Offsets are relative to the anchor's box, except for
//! [`BasePosition::Floating`], which is relative to the viewport. A final
//! clamp on both axes always runs for anchored overlays and wins over the
//! alignment and lift rules.

use std::fmt;

use waypost_core::{Offset, Rect, Size};

use crate::config::PlacementConfig;
use crate::placement::{Alignment, BasePosition, Placement};

/// A CSS-like length: pixels or a percentage of the containing box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Px(f64),
    Percent(f64),
}

impl Length {
    /// Resolve against a container extent.
    #[inline]
    pub fn resolve(self, container: f64) -> f64 {
        match self {
            Self::Px(px) => px,
            Self::Percent(pct) => container * pct / 100.0,
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(px) => write!(f, "{px}px"),
            Self::Percent(pct) => write!(f, "{pct}%"),
        }
    }
}

/// Pointer indicator drawn on the overlay, named by the overlay edge it sits on.
///
/// An overlay below its anchor points up from its top edge, so
/// [`BasePosition::Bottom`] yields one of the `Top*` arrows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arrow {
    Top,
    TopMiddle,
    TopRight,
    Bottom,
    BottomMiddle,
    BottomRight,
    Left,
    LeftBottom,
    Right,
    RightBottom,
}

impl Arrow {
    /// Kebab-case class suffix.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::TopMiddle => "top-middle",
            Self::TopRight => "top-right",
            Self::Bottom => "bottom",
            Self::BottomMiddle => "bottom-middle",
            Self::BottomRight => "bottom-right",
            Self::Left => "left",
            Self::LeftBottom => "left-bottom",
            Self::Right => "right",
            Self::RightBottom => "right-bottom",
        }
    }

    fn for_vertical(base: BasePosition, alignment: Alignment) -> Self {
        match (base, alignment) {
            (BasePosition::Top, Alignment::Left) => Self::Bottom,
            (BasePosition::Top, Alignment::Middle) => Self::BottomMiddle,
            (BasePosition::Top, Alignment::Right) => Self::BottomRight,
            (_, Alignment::Left) => Self::Top,
            (_, Alignment::Middle) => Self::TopMiddle,
            (_, Alignment::Right) => Self::TopRight,
        }
    }
}

/// Edge offsets for one overlay.
///
/// At most one of `left`/`right` and one of `top`/`bottom` is set by
/// assignment; the others stay `None` (auto).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edges {
    pub top: Option<Length>,
    pub right: Option<Length>,
    pub bottom: Option<Length>,
    pub left: Option<Length>,
    pub margin_top: f64,
    pub margin_left: f64,
    /// `None` for floating overlays.
    pub arrow: Option<Arrow>,
}

impl Edges {
    const EMPTY: Edges = Edges {
        top: None,
        right: None,
        bottom: None,
        left: None,
        margin_top: 0.0,
        margin_left: 0.0,
        arrow: None,
    };

    /// Whether these edges are viewport-relative (floating).
    pub fn is_floating(&self) -> bool {
        matches!(self.top, Some(Length::Percent(_))) || matches!(self.left, Some(Length::Percent(_)))
    }

    /// The overlay box these edges describe.
    ///
    /// Anchored edges yield a document-relative box; floating edges yield a
    /// viewport-relative one.
    pub fn overlay_rect(&self, anchor: &Offset, viewport: Size, overlay: Size) -> Rect {
        if self.is_floating() {
            let x = self.left.map_or(0.0, |l| l.resolve(viewport.width)) + self.margin_left;
            let y = self.top.map_or(0.0, |t| t.resolve(viewport.height)) + self.margin_top;
            return Rect::new(x, y, overlay.width, overlay.height);
        }

        let x = match (self.left, self.right) {
            (Some(left), _) => anchor.absolute_left + left.resolve(anchor.width),
            (None, Some(right)) => {
                anchor.absolute_right - right.resolve(anchor.width) - overlay.width
            }
            (None, None) => anchor.absolute_left,
        } + self.margin_left;
        let y = match (self.top, self.bottom) {
            (Some(top), _) => anchor.absolute_top + top.resolve(anchor.height),
            (None, Some(bottom)) => {
                anchor.absolute_bottom - bottom.resolve(anchor.height) - overlay.height
            }
            (None, None) => anchor.absolute_top,
        } + self.margin_top;
        Rect::new(x, y, overlay.width, overlay.height)
    }
}

impl PlacementConfig {
    /// Assign edge offsets for `placement`.
    ///
    /// Pure: identical inputs give identical edges.
    pub fn assign(
        &self,
        placement: Placement,
        anchor: &Offset,
        viewport: Size,
        overlay: Size,
        hint_mode: bool,
        show_step_numbers: bool,
    ) -> Edges {
        let gap = self.gap;
        let mut edges = Edges::EMPTY;

        match placement.base {
            BasePosition::Floating => {
                edges.top = Some(Length::Percent(50.0));
                edges.left = Some(Length::Percent(50.0));
                edges.margin_top = -overlay.height / 2.0;
                edges.margin_left = -overlay.width / 2.0;
                // Viewport frame: only an overlay wider than the viewport can
                // escape horizontally.
                if overlay.width > viewport.width {
                    edges.left = Some(Length::Px(0.0));
                    edges.margin_left = 0.0;
                }
                return edges;
            }
            base @ (BasePosition::Top | BasePosition::Bottom) => {
                let alignment = placement.alignment.unwrap_or(Alignment::Middle);
                let left = match alignment {
                    Alignment::Left => 0.0,
                    Alignment::Middle => (anchor.width - overlay.width) / 2.0,
                    Alignment::Right => anchor.width - overlay.width,
                };
                let top = if base == BasePosition::Top {
                    -(overlay.height + gap)
                } else {
                    anchor.height + gap
                };
                edges.left = Some(Length::Px(left));
                edges.top = Some(Length::Px(top));
                edges.arrow = Some(Arrow::for_vertical(base, alignment));
            }
            base @ (BasePosition::Left | BasePosition::Right) => {
                let inset = if show_step_numbers && !hint_mode {
                    self.step_number_inset
                } else {
                    0.0
                };
                let mut top = inset;
                let shifted = self.lift_above_viewport_bottom(anchor, viewport, overlay, top);
                if let Some(lifted) = shifted {
                    top = lifted;
                }
                edges.top = Some(Length::Px(top));
                if base == BasePosition::Left {
                    edges.right = Some(Length::Px(anchor.width + gap));
                    edges.arrow = Some(if shifted.is_some() {
                        Arrow::RightBottom
                    } else {
                        Arrow::Right
                    });
                } else {
                    edges.left = Some(Length::Px(anchor.width + gap));
                    edges.arrow = Some(if shifted.is_some() {
                        Arrow::LeftBottom
                    } else {
                        Arrow::Left
                    });
                }
            }
        }

        clamp_horizontal(&mut edges, anchor, viewport, overlay);
        clamp_vertical(&mut edges, anchor, viewport, overlay);
        edges
    }

    /// New top offset that keeps a left/right overlay above the viewport
    /// bottom, or `None` when no upward shift is needed or possible.
    fn lift_above_viewport_bottom(
        &self,
        anchor: &Offset,
        viewport: Size,
        overlay: Size,
        top: f64,
    ) -> Option<f64> {
        if anchor.absolute_top + top + overlay.height <= viewport.height {
            return None;
        }
        let lifted = anchor.height + self.gap - overlay.height;
        (lifted < top && anchor.absolute_top + lifted >= 0.0).then_some(lifted)
    }
}

/// Keep an anchored overlay inside `[0, viewport.width]`.
///
/// Overflow on the left wins: an overlay wider than the viewport ends up
/// flush-left.
fn clamp_horizontal(edges: &mut Edges, anchor: &Offset, viewport: Size, overlay: Size) {
    let absolute_left = match (edges.left, edges.right) {
        (Some(left), _) => anchor.absolute_left + left.resolve(anchor.width),
        (None, Some(right)) => anchor.absolute_right - right.resolve(anchor.width) - overlay.width,
        (None, None) => return,
    };

    let target = if absolute_left < 0.0 {
        0.0
    } else if absolute_left + overlay.width > viewport.width {
        (viewport.width - overlay.width).max(0.0)
    } else {
        return;
    };
    waypost_core::trace!(absolute_left, target, "overlay clamped horizontally");
    edges.left = Some(Length::Px(target - anchor.absolute_left));
    edges.right = None;
}

/// Keep an anchored overlay inside `[0, viewport.height]`.
///
/// Same frame as the side filters: absolute coordinates against the viewport
/// extent. An overlay taller than the viewport ends up flush with the top.
fn clamp_vertical(edges: &mut Edges, anchor: &Offset, viewport: Size, overlay: Size) {
    let absolute_top = match (edges.top, edges.bottom) {
        (Some(top), _) => anchor.absolute_top + top.resolve(anchor.height),
        (None, Some(bottom)) => {
            anchor.absolute_bottom - bottom.resolve(anchor.height) - overlay.height
        }
        (None, None) => return,
    };

    let target = if absolute_top < 0.0 {
        0.0
    } else if absolute_top + overlay.height > viewport.height {
        (viewport.height - overlay.height).max(0.0)
    } else {
        return;
    };
    waypost_core::trace!(absolute_top, target, "overlay clamped vertically");
    edges.top = Some(Length::Px(target - anchor.absolute_top));
    edges.bottom = None;
}

/// [`PlacementConfig::assign`] with the default constants.
pub fn assign_edges(
    placement: Placement,
    anchor: &Offset,
    viewport: Size,
    overlay: Size,
    hint_mode: bool,
    show_step_numbers: bool,
) -> Edges {
    PlacementConfig::default().assign(
        placement,
        anchor,
        viewport,
        overlay,
        hint_mode,
        show_step_numbers,
    )
}
