#![forbid(unsafe_code)]

//! Waypost public facade crate.
//!
//! Re-exports the placement engine from `waypost-layout`, the document
//! traits from `waypost-core`, and the tour runtime from `waypost-runtime`,
//! plus a prelude for embedders.

// --- Core re-exports -------------------------------------------------------

pub use waypost_core::{
    ComputedStyle, Document, ElementId, Offset, Overflow, PositionMode, Rect, ScrollPosition, Size,
};

// --- Layout re-exports -----------------------------------------------------

pub use waypost_layout::{
    Alignment, Arrow, BasePosition, Edges, HighlightRect, Length, ParsePositionError, Placement,
    PlacementConfig, Position, ScrollTo, Side, assign_edges, decide_placement, highlight_rect,
    resolve_offset, scroll_adjustment,
};

// --- Runtime re-exports ----------------------------------------------------

pub use waypost_runtime::{
    Anchor, CompletionReason, Direction, HookError, NoHooks, OptionsError, Outcome,
    OverlayContent, OverlayController, OverlayFrame, OverlaySurface, SharedDocument, Step,
    StepController, StepSourceError, StepSourceKind, StepSpec, Tour, TourBuilder, TourError,
    TourHooks, TourOptions, TourState,
};

/// Standard result type for tour operations.
pub type Result<T, E = TourError> = std::result::Result<T, E>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Anchor, Direction, Document, ElementId, Outcome, OverlayFrame, OverlaySurface, Position,
        Rect, Result, Side, Size, StepSourceKind, StepSpec, Tour, TourError, TourHooks,
        TourOptions,
    };

    pub use crate::{core, layout, runtime};
}

pub use waypost_core as core;
pub use waypost_layout as layout;
pub use waypost_runtime as runtime;
