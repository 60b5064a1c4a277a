#![forbid(unsafe_code)]

//! Runtime: the stateful half of Waypost.
//!
//! # Role in Waypost
//! `waypost-runtime` owns which step is current. The [`StepController`]
//! gates every transition through the embedder's async [`TourHooks`] and
//! serializes overlapping requests. The [`OverlayController`] turns the
//! current step into an [`OverlayFrame`] through `waypost-layout` and hands
//! it to an [`OverlaySurface`]. [`Tour`] wires both together.
//!
//! # Example
//! ```ignore
//! let tour = Tour::builder(document, surface)
//!     .options(TourOptions::default().show_step_numbers(true))
//!     .steps(StepSourceKind::Explicit(vec![
//!         StepSpec::new("Save your work here").element("#save"),
//!         StepSpec::new("That's it"),
//!     ]))
//!     .build()?;
//!
//! tour.start().await?;
//! tour.advance().await?;
//! ```

pub mod controller;
pub mod error;
pub mod hooks;
pub mod options;
pub mod overlay;
pub mod refresh;
pub mod source;
pub mod step;
pub mod tour;

pub use controller::{Outcome, StepController, TourState};
pub use error::{HookError, Result, StepSourceError, TourError};
pub use hooks::{CompletionReason, Direction, NoHooks, TourHooks};
pub use options::{OptionsError, TourOptions};
pub use overlay::{OverlayContent, OverlayController, OverlayFrame, OverlaySurface, SharedDocument};
pub use refresh::{RefreshCounter, RefreshCursor, RefreshReason};
pub use source::{
    DeclarativeScan, ExplicitList, ExternalSteps, StepLoader, StepSource, StepSourceKind,
    step_source,
};
pub use step::{Anchor, Step, StepSpec, assemble};
pub use tour::{Tour, TourBuilder};
