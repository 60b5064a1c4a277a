#![forbid(unsafe_code)]

//! Core: geometry primitives and the document collaborator surface.
//!
//! # Role in Waypost
//! `waypost-core` is the leaf of the workspace. It defines the pixel geometry
//! types ([`Rect`], [`Size`], [`Offset`]) and the [`Document`] trait through
//! which every other crate measures the host interface.
//!
//! # How it fits in the system
//! `waypost-layout` turns document measurements into placements and edge
//! offsets; `waypost-runtime` drives that pipeline from the step controller.
//! Neither talks to a real UI directly: they only see `Document`.

pub mod document;
pub mod geometry;
pub mod logging;

#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

pub use document::{
    Ancestors, ComputedStyle, Document, ElementId, Overflow, PositionMode,
};
pub use geometry::{Offset, Rect, ScrollPosition, Size};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace, trace_span, warn};
