#![forbid(unsafe_code)]

//! Layout: anchor geometry, placement decisions, and edge assignment.
//!
//! # Role in Waypost
//! This crate is the pure half of Waypost. Every function here is a
//! deterministic function of its inputs; nothing is cached between calls.
//!
//! # Pipeline
//! 1. [`resolve_offset`] measures the anchor through a
//!    [`Document`](waypost_core::Document).
//! 2. [`decide_placement`] picks a base side and, for top/bottom, an
//!    alignment.
//! 3. [`assign_edges`] converts that into edge offsets and clamps the
//!    overlay back inside the viewport.
//!
//! [`PlacementConfig`] carries the pixel constants; the free functions use
//! its defaults.
//!
//! # Example
//! ```
//! use waypost_core::{Offset, Rect, Size};
//! use waypost_layout::{assign_edges, decide_placement, BasePosition, Length, Position, Side};
//!
//! let anchor = Offset::from_rect(Rect::new(400.0, 200.0, 100.0, 50.0));
//! let overlay = Size::new(200.0, 100.0);
//! let viewport = Size::new(1000.0, 800.0);
//!
//! let placement = decide_placement(
//!     &[Side::Bottom, Side::Top],
//!     &anchor,
//!     overlay,
//!     Position::side(Side::Bottom),
//!     viewport,
//! );
//! assert_eq!(placement.base, BasePosition::Bottom);
//!
//! let edges = assign_edges(placement, &anchor, viewport, overlay, false, false);
//! assert_eq!(edges.top, Some(Length::Px(70.0)));
//! ```

pub mod config;
pub mod edges;
pub mod highlight;
pub mod offset;
pub mod placement;
pub mod scroll;

pub use config::PlacementConfig;
pub use edges::{Arrow, Edges, Length, assign_edges};
pub use highlight::{HIGHLIGHT_PADDING, HighlightRect, highlight_rect};
pub use offset::resolve_offset;
pub use placement::{
    Alignment, BasePosition, ParsePositionError, Placement, Position, Side, decide_placement,
    parse_precedence,
};
pub use scroll::{ScrollTo, is_in_viewport, scroll_adjustment};
