#![forbid(unsafe_code)]

//! The tour service: step controller, overlay controller, and refresh
//! cursor wired together.
//!
//! A [`Tour`] is built explicitly with [`TourBuilder`] and owns its
//! collaborators; there is no process-wide instance. Navigation methods
//! forward to the [`StepController`] and then repaint (or clear) the
//! overlay. Resize and scroll notifications only bump the refresh counter;
//! [`Tour::sync`] repaints once for however many arrived.

use std::sync::Arc;

use parking_lot::Mutex;
use waypost_core::ElementId;
use waypost_layout::Position;

use crate::controller::{Outcome, StepController, TourState};
use crate::error::{Result, TourError};
use crate::hooks::{NoHooks, TourHooks};
use crate::options::TourOptions;
use crate::overlay::{OverlayController, OverlayFrame, OverlaySurface, SharedDocument};
use crate::refresh::{RefreshCursor, RefreshReason};
use crate::source::{DeclarativeScan, StepSource, StepSourceKind, step_source};
use crate::step::{Anchor, Step};

/// Builder for [`Tour`].
pub struct TourBuilder {
    document: SharedDocument,
    surface: Arc<dyn OverlaySurface>,
    hooks: Arc<dyn TourHooks>,
    options: TourOptions,
    source: StepSourceKind,
    target: Option<ElementId>,
}

impl TourBuilder {
    /// Start a builder. Steps default to the declarative scan.
    pub fn new(document: SharedDocument, surface: Arc<dyn OverlaySurface>) -> Self {
        Self {
            document,
            surface,
            hooks: Arc::new(NoHooks),
            options: TourOptions::default(),
            source: StepSourceKind::Declarative,
            target: None,
        }
    }

    #[must_use]
    pub fn hooks(mut self, hooks: Arc<dyn TourHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    #[must_use]
    pub fn options(mut self, options: TourOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn steps(mut self, source: StepSourceKind) -> Self {
        self.source = source;
        self
    }

    /// Root element of the tour.
    ///
    /// The declarative scan only looks inside it, and anchors are measured
    /// against it when it is a positioned frame.
    #[must_use]
    pub fn target(mut self, root: ElementId) -> Self {
        self.target = Some(root);
        self
    }

    /// Validate the options, load the steps, and assemble the tour.
    pub fn build(self) -> Result<Tour> {
        let problems = self.options.validate();
        if !problems.is_empty() {
            tracing::warn!(problems = problems.len(), "rejecting invalid tour options");
            return Err(TourError::InvalidOptions(problems));
        }
        let options = Arc::new(self.options);
        let source: Box<dyn StepSource> = match (self.source, self.target) {
            (StepSourceKind::Declarative, Some(root)) => Box::new(DeclarativeScan::within(root)),
            (kind, _) => step_source(kind),
        };
        let steps = source.load(&*self.document, &options)?;
        tracing::debug!(steps = steps.len(), root = ?self.target, "tour built");

        let controller = StepController::with_hooks(steps, self.hooks);
        let cursor = controller.refresh_counter().cursor();
        let mut overlay =
            OverlayController::new(self.document.clone(), self.surface, options.clone());
        if let Some(root) = self.target {
            overlay = overlay.with_reference(root);
        }
        Ok(Tour {
            document: self.document,
            options,
            source,
            controller,
            overlay,
            cursor: Mutex::new(cursor),
            frame: Mutex::new(None),
        })
    }
}

/// A running guided tour.
pub struct Tour {
    document: SharedDocument,
    options: Arc<TourOptions>,
    source: Box<dyn StepSource>,
    controller: StepController,
    overlay: OverlayController,
    cursor: Mutex<RefreshCursor>,
    frame: Mutex<Option<OverlayFrame>>,
}

impl std::fmt::Debug for Tour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tour")
            .field("controller", &self.controller)
            .finish_non_exhaustive()
    }
}

impl Tour {
    pub fn builder(document: SharedDocument, surface: Arc<dyn OverlaySurface>) -> TourBuilder {
        TourBuilder::new(document, surface)
    }

    pub fn controller(&self) -> &StepController {
        &self.controller
    }

    pub fn options(&self) -> &TourOptions {
        &self.options
    }

    pub fn state(&self) -> TourState {
        self.controller.state()
    }

    pub fn current_step(&self) -> Option<Step> {
        self.controller.current_step()
    }

    /// The most recently painted frame, if a step is showing.
    pub fn last_frame(&self) -> Option<OverlayFrame> {
        self.frame.lock().clone()
    }

    // ── Navigation ───────────────────────────────────────────────────────

    pub async fn start(&self) -> Result<Outcome> {
        let outcome = self.controller.start().await?;
        self.show(outcome).await;
        Ok(outcome)
    }

    pub async fn advance(&self) -> Result<Outcome> {
        let outcome = self.controller.advance().await?;
        self.show(outcome).await;
        Ok(outcome)
    }

    pub async fn retreat(&self) -> Result<Outcome> {
        let outcome = self.controller.retreat().await?;
        self.show(outcome).await;
        Ok(outcome)
    }

    pub async fn go_to(&self, index: usize) -> Result<Outcome> {
        let outcome = self.controller.go_to(index).await?;
        self.show(outcome).await;
        Ok(outcome)
    }

    pub async fn go_to_step_number(&self, number: usize) -> Result<Outcome> {
        let outcome = self.controller.go_to_step_number(number).await?;
        self.show(outcome).await;
        Ok(outcome)
    }

    pub async fn exit(&self) -> Result<Outcome> {
        let outcome = self.controller.exit().await?;
        self.show(outcome).await;
        Ok(outcome)
    }

    pub async fn skip(&self) -> Result<Outcome> {
        let outcome = self.controller.skip().await?;
        self.show(outcome).await;
        Ok(outcome)
    }

    pub async fn complete(&self) -> Result<Outcome> {
        let outcome = self.controller.complete().await?;
        self.show(outcome).await;
        Ok(outcome)
    }

    /// Reload steps from the tour's source. Only valid while idle.
    pub fn reload_steps(&self) -> Result<usize> {
        let steps = self.source.load(&*self.document, &self.options)?;
        let count = steps.len();
        self.controller.set_steps(steps)?;
        Ok(count)
    }

    // ── Re-placement ─────────────────────────────────────────────────────

    pub fn notify_resize(&self) -> u64 {
        self.controller.refresh(RefreshReason::Resize)
    }

    pub fn notify_scroll(&self) -> u64 {
        self.controller.refresh(RefreshReason::Scroll)
    }

    /// Bump the counter and repaint the current step.
    pub async fn refresh(&self) -> Option<OverlayFrame> {
        self.controller.refresh(RefreshReason::Explicit);
        self.sync().await
    }

    /// Repaint if the refresh counter moved since the last paint.
    pub async fn sync(&self) -> Option<OverlayFrame> {
        let newer = self.cursor.lock().poll();
        let refresh = newer?;
        tracing::trace!(refresh, "refresh observed");
        self.paint_current().await
    }

    // ── Hints ────────────────────────────────────────────────────────────

    /// Place a standalone hint, independent of the tour state.
    pub async fn place_hint(
        &self,
        anchor: &Anchor,
        position: Position,
        text: impl Into<String>,
    ) -> OverlayFrame {
        self.overlay.place_hint(anchor, position, text).await
    }

    // ── Internals ────────────────────────────────────────────────────────

    async fn show(&self, outcome: Outcome) {
        match outcome {
            Outcome::Changed { .. } => {
                // The paint reflects the latest geometry; older refreshes are moot.
                self.cursor.lock().poll();
                self.paint_current().await;
            }
            Outcome::Completed(_) | Outcome::Skipped | Outcome::Exited => {
                self.overlay.clear();
                *self.frame.lock() = None;
            }
            Outcome::Unchanged => {}
        }
    }

    async fn paint_current(&self) -> Option<OverlayFrame> {
        let step = self.controller.current_step()?;
        let total = self.controller.steps().len();
        let refresh = self.controller.state().refresh;
        let frame = self.overlay.render(&step, total, refresh).await;
        *self.frame.lock() = Some(frame.clone());
        Some(frame)
    }
}
