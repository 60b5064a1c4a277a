#![forbid(unsafe_code)]

//! Embedder hooks around step transitions.

use async_trait::async_trait;

use crate::error::HookError;
use crate::step::Step;

/// Direction of the last committed transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
        }
    }
}

/// Why a tour completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompletionReason {
    /// Advanced past the last step.
    End,
    /// The embedder's explicit completion action.
    Done,
}

/// Hooks invoked by the step controller.
///
/// `before_change` gates every transition: `Ok(false)` vetoes it and an
/// `Err` counts as a veto that is also reported to the caller. The
/// notification hooks run after the state they describe has committed.
/// Every method defaults to a no-op that allows the transition.
#[async_trait]
pub trait TourHooks: Send + Sync {
    async fn before_change(
        &self,
        _from: Option<usize>,
        _to: &Step,
        _direction: Direction,
    ) -> Result<bool, HookError> {
        Ok(true)
    }

    async fn after_change(&self, _step: &Step, _direction: Direction) {}

    async fn on_complete(&self, _last: Option<usize>, _reason: CompletionReason) {}

    async fn on_exit(&self) {}

    async fn on_skip(&self, _current: usize) {}
}

/// Hooks that allow everything and observe nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl TourHooks for NoHooks {}
