#![forbid(unsafe_code)]

//! Step controller: the gated `Idle → Active → Idle` state machine.
//!
//! # Ordering
//!
//! Navigation requests queue on a fair async mutex, so on one controller a
//! request fully commits or aborts before the next one starts. `exit()` does
//! not queue: it takes effect immediately, and a transition whose gating
//! hook was pending at the time resolves to [`TourError::Superseded`]
//! instead of committing.
//!
//! # Commit rule
//!
//! The current step changes only after `before_change` resolves `Ok(true)`.
//! Readers never observe a half-applied transition.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::Instrument;

use crate::error::{Result, TourError};
use crate::hooks::{CompletionReason, Direction, NoHooks, TourHooks};
use crate::refresh::{RefreshCounter, RefreshReason};
use crate::step::Step;

/// Snapshot of the controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TourState {
    /// `None` while idle.
    pub current: Option<usize>,
    pub direction: Direction,
    pub refresh: u64,
}

impl TourState {
    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }
}

/// Result of a navigation request that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A new step is current.
    Changed {
        from: Option<usize>,
        to: usize,
        direction: Direction,
    },
    /// The tour completed and is idle again.
    Completed(CompletionReason),
    /// The tour was skipped and is idle again.
    Skipped,
    /// The tour was exited.
    Exited,
    /// Nothing to do (exit while idle).
    Unchanged,
}

#[derive(Debug, Default)]
struct Machine {
    current: Option<usize>,
    direction: Direction,
    /// Bumped on start and on every return to idle.
    session: u64,
}

struct Inner {
    steps: RwLock<Arc<Vec<Step>>>,
    machine: Mutex<Machine>,
    queue: tokio::sync::Mutex<()>,
    hooks: Arc<dyn TourHooks>,
    refresh: RefreshCounter,
}

/// Owns the step list and the active-step state.
///
/// Cheap to clone; clones share state.
#[derive(Clone)]
pub struct StepController {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for StepController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let steps = self.inner.steps.read().len();
        f.debug_struct("StepController")
            .field("steps", &steps)
            .field("state", &self.state())
            .finish()
    }
}

impl StepController {
    pub fn new(steps: Vec<Step>) -> Self {
        Self::with_hooks(steps, Arc::new(NoHooks))
    }

    pub fn with_hooks(steps: Vec<Step>, hooks: Arc<dyn TourHooks>) -> Self {
        Self {
            inner: Arc::new(Inner {
                steps: RwLock::new(Arc::new(steps)),
                machine: Mutex::new(Machine::default()),
                queue: tokio::sync::Mutex::new(()),
                hooks,
                refresh: RefreshCounter::new(),
            }),
        }
    }

    // ── Read access ──────────────────────────────────────────────────────

    pub fn state(&self) -> TourState {
        let machine = self.inner.machine.lock();
        TourState {
            current: machine.current,
            direction: machine.direction,
            refresh: self.inner.refresh.current(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.inner.machine.lock().current.is_some()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.inner.machine.lock().current
    }

    pub fn current_step(&self) -> Option<Step> {
        let index = self.current_index()?;
        self.inner.steps.read().get(index).cloned()
    }

    /// Shared snapshot of the step list.
    pub fn steps(&self) -> Arc<Vec<Step>> {
        Arc::clone(&self.inner.steps.read())
    }

    pub fn refresh_counter(&self) -> &RefreshCounter {
        &self.inner.refresh
    }

    /// Request re-placement of the current overlay.
    pub fn refresh(&self, reason: RefreshReason) -> u64 {
        self.inner.refresh.bump(reason)
    }

    // ── Mutation ─────────────────────────────────────────────────────────

    /// Replace the step list. Only valid while idle.
    pub fn set_steps(&self, steps: Vec<Step>) -> Result<()> {
        let machine = self.inner.machine.lock();
        if machine.current.is_some() {
            return Err(TourError::Busy);
        }
        *self.inner.steps.write() = Arc::new(steps);
        Ok(())
    }

    // ── Navigation ───────────────────────────────────────────────────────

    /// Show the first step.
    pub async fn start(&self) -> Result<Outcome> {
        let span = tracing::debug_span!("waypost.navigate", op = "start");
        async {
            let _turn = self.inner.queue.lock().await;
            let (current, session) = self.snapshot();
            if current.is_some() {
                return Err(TourError::Busy);
            }
            let steps = self.steps();
            if steps.is_empty() {
                tracing::debug!("start ignored: no steps");
                return Err(TourError::NoSteps);
            }
            self.transition(&steps, None, 0, Direction::Forward, session)
                .await
        }
        .instrument(span)
        .await
    }

    /// Move to the next step, completing the tour past the last one.
    pub async fn advance(&self) -> Result<Outcome> {
        let span = tracing::debug_span!("waypost.navigate", op = "advance");
        async {
            let _turn = self.inner.queue.lock().await;
            let (current, session) = self.snapshot();
            let current = current.ok_or(TourError::NotActive)?;
            let steps = self.steps();
            let target = current + 1;
            if target >= steps.len() {
                return self.finish(session, CompletionReason::End).await;
            }
            self.transition(&steps, Some(current), target, Direction::Forward, session)
                .await
        }
        .instrument(span)
        .await
    }

    /// Move to the previous step.
    pub async fn retreat(&self) -> Result<Outcome> {
        let span = tracing::debug_span!("waypost.navigate", op = "retreat");
        async {
            let _turn = self.inner.queue.lock().await;
            let (current, session) = self.snapshot();
            let current = current.ok_or(TourError::NotActive)?;
            if current == 0 {
                return Err(TourError::AtStart);
            }
            let steps = self.steps();
            self.transition(&steps, Some(current), current - 1, Direction::Backward, session)
                .await
        }
        .instrument(span)
        .await
    }

    /// Jump to the step at `index`.
    pub async fn go_to(&self, index: usize) -> Result<Outcome> {
        let span = tracing::debug_span!("waypost.navigate", op = "go_to", index);
        async {
            let _turn = self.inner.queue.lock().await;
            let (current, session) = self.snapshot();
            let current = current.ok_or(TourError::NotActive)?;
            let steps = self.steps();
            if index >= steps.len() {
                return Err(TourError::OutOfRange {
                    index,
                    len: steps.len(),
                });
            }
            let direction = if index < current {
                Direction::Backward
            } else {
                Direction::Forward
            };
            self.transition(&steps, Some(current), index, direction, session)
                .await
        }
        .instrument(span)
        .await
    }

    /// Jump to the step declared with 1-based `number`.
    pub async fn go_to_step_number(&self, number: usize) -> Result<Outcome> {
        let steps = self.steps();
        match steps.iter().position(|step| step.step_number == number) {
            Some(index) => self.go_to(index).await,
            None => Err(TourError::OutOfRange {
                index: number,
                len: steps.len(),
            }),
        }
    }

    /// Leave the tour immediately.
    ///
    /// Does not wait for queued navigation; a pending transition, including
    /// a `start` still waiting on its hook, is discarded when the hook
    /// resolves. Reports [`Outcome::Unchanged`] when no step was showing.
    pub async fn exit(&self) -> Result<Outcome> {
        let left = {
            let mut machine = self.inner.machine.lock();
            machine.session += 1;
            machine.current.take()
        };
        if left.is_none() {
            return Ok(Outcome::Unchanged);
        }
        tracing::debug!("tour exited");
        self.inner.hooks.on_exit().await;
        Ok(Outcome::Exited)
    }

    /// Skip the rest of the tour.
    pub async fn skip(&self) -> Result<Outcome> {
        let span = tracing::debug_span!("waypost.navigate", op = "skip");
        async {
            let _turn = self.inner.queue.lock().await;
            let Some(current) = self.leave() else {
                return Err(TourError::NotActive);
            };
            tracing::debug!(step = current, "tour skipped");
            self.inner.hooks.on_skip(current).await;
            self.inner.hooks.on_exit().await;
            Ok(Outcome::Skipped)
        }
        .instrument(span)
        .await
    }

    /// Complete the tour through the embedder's completion action.
    pub async fn complete(&self) -> Result<Outcome> {
        let span = tracing::debug_span!("waypost.navigate", op = "complete");
        async {
            let _turn = self.inner.queue.lock().await;
            let (current, session) = self.snapshot();
            if current.is_none() {
                return Err(TourError::NotActive);
            }
            self.finish(session, CompletionReason::Done).await
        }
        .instrument(span)
        .await
    }

    // ── Internals ────────────────────────────────────────────────────────

    fn snapshot(&self) -> (Option<usize>, u64) {
        let machine = self.inner.machine.lock();
        (machine.current, machine.session)
    }

    /// Return to idle, yielding the step that was current.
    fn leave(&self) -> Option<usize> {
        let mut machine = self.inner.machine.lock();
        let current = machine.current.take()?;
        machine.session += 1;
        Some(current)
    }

    /// Complete the tour if `session` still owns it.
    async fn finish(&self, session: u64, reason: CompletionReason) -> Result<Outcome> {
        let last = {
            let mut machine = self.inner.machine.lock();
            if machine.session != session {
                None
            } else {
                let last = machine.current.take();
                if last.is_some() {
                    machine.session += 1;
                }
                last
            }
        };
        let Some(last) = last else {
            tracing::debug!(?reason, "discarding stale completion");
            return Err(TourError::Superseded);
        };
        tracing::debug!(last, ?reason, "tour completed");
        self.inner.hooks.on_complete(Some(last), reason).await;
        self.inner.hooks.on_exit().await;
        Ok(Outcome::Completed(reason))
    }

    async fn transition(
        &self,
        steps: &[Step],
        from: Option<usize>,
        target: usize,
        direction: Direction,
        session: u64,
    ) -> Result<Outcome> {
        let step = &steps[target];
        match self.inner.hooks.before_change(from, step, direction).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!(step = target, "transition vetoed by before-change hook");
                return Err(TourError::Aborted { target });
            }
            Err(err) => {
                tracing::warn!(step = target, error = %err, "before-change hook failed");
                return Err(TourError::Hook(err));
            }
        }

        {
            let mut machine = self.inner.machine.lock();
            if machine.session != session || machine.current != from {
                tracing::debug!(step = target, "discarding stale transition");
                return Err(TourError::Superseded);
            }
            if from.is_none() {
                machine.session += 1;
            }
            machine.current = Some(target);
            machine.direction = direction;
        }
        tracing::debug!(?from, step = target, direction = direction.as_str(), "step committed");

        self.inner.hooks.after_change(step, direction).await;
        Ok(Outcome::Changed {
            from,
            to: target,
            direction,
        })
    }
}
