#![forbid(unsafe_code)]

//! Error types for navigation, hooks, and step loading.

use std::fmt;

use waypost_layout::ParsePositionError;

/// Failure reported by an embedder's before-change hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookError {
    message: String,
}

impl HookError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for HookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for HookError {}

impl From<String> for HookError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for HookError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Failure to build a step list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StepSourceError {
    #[error("step {step}: {source}")]
    InvalidPosition {
        step: usize,
        #[source]
        source: ParsePositionError,
    },
    #[error("invalid step number {value:?}")]
    InvalidStepNumber { value: String },
    #[error("external step source failed: {0}")]
    External(String),
}

/// Why a navigation request did not commit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TourError {
    /// `start()` with an empty step list.
    #[error("no steps to show")]
    NoSteps,
    /// The before-change hook returned `false`.
    #[error("transition to step {target} was vetoed")]
    Aborted { target: usize },
    /// The before-change hook failed; treated as a veto.
    #[error("before-change hook failed: {0}")]
    Hook(#[from] HookError),
    #[error("no tour is active")]
    NotActive,
    #[error("already at the first step")]
    AtStart,
    #[error("step {index} is out of range ({len} steps)")]
    OutOfRange { index: usize, len: usize },
    /// The tour was exited while the gating hook was pending.
    #[error("tour exited while the transition was pending")]
    Superseded,
    /// Operation needs an idle controller.
    #[error("a tour is already active")]
    Busy,
    #[error(transparent)]
    Source(#[from] StepSourceError),
    /// [`TourOptions::validate`](crate::TourOptions::validate) reported problems.
    #[error("invalid tour options: {}", .0.join("; "))]
    InvalidOptions(Vec<String>),
}

impl TourError {
    /// Hook veto or hook failure.
    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted { .. } | Self::Hook(_))
    }
}

pub type Result<T, E = TourError> = std::result::Result<T, E>;
