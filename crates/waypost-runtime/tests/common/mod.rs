//! Shared test doubles for the runtime integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Semaphore;
use waypost_core::Size;
use waypost_runtime::{
    CompletionReason, Direction, HookError, OverlayContent, OverlayFrame, OverlaySurface, Step,
    StepController, StepSpec, TourHooks, TourOptions, assemble,
};

/// Hooks that log every call and can hold or veto `before_change`.
pub struct RecordingHooks {
    events: Mutex<Vec<String>>,
    allow: AtomicBool,
    fail: AtomicBool,
    /// `None` lets every hook through immediately.
    gate: Option<Semaphore>,
}

impl RecordingHooks {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            events: Mutex::new(Vec::new()),
            allow: AtomicBool::new(true),
            fail: AtomicBool::new(false),
            gate: None,
        })
    }

    /// Each `before_change` waits for one [`release`](Self::release).
    pub fn gated() -> Arc<Self> {
        Arc::new(Self {
            events: Mutex::new(Vec::new()),
            allow: AtomicBool::new(true),
            fail: AtomicBool::new(false),
            gate: Some(Semaphore::new(0)),
        })
    }

    pub fn release(&self, count: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(count);
        }
    }

    pub fn set_allow(&self, allow: bool) {
        self.allow.store(allow, Ordering::SeqCst);
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().clone()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }

    pub fn saw(&self, event: &str) -> bool {
        self.events.lock().iter().any(|e| e == event)
    }

    fn push(&self, event: String) {
        self.events.lock().push(event);
    }
}

#[async_trait]
impl TourHooks for RecordingHooks {
    async fn before_change(
        &self,
        from: Option<usize>,
        to: &Step,
        _direction: Direction,
    ) -> Result<bool, HookError> {
        self.push(format!("before:{}", to.index));
        if let Some(gate) = &self.gate {
            match gate.acquire().await {
                Ok(permit) => permit.forget(),
                Err(_) => return Err(HookError::new("gate closed")),
            }
        }
        if self.fail.load(Ordering::SeqCst) {
            return Err(HookError::new(format!("refused {from:?} -> {}", to.index)));
        }
        Ok(self.allow.load(Ordering::SeqCst))
    }

    async fn after_change(&self, step: &Step, direction: Direction) {
        self.push(format!("after:{}:{}", step.index, direction.as_str()));
    }

    async fn on_complete(&self, last: Option<usize>, reason: CompletionReason) {
        self.push(format!("complete:{last:?}:{reason:?}"));
    }

    async fn on_exit(&self) {
        self.push("exit".to_string());
    }

    async fn on_skip(&self, current: usize) {
        self.push(format!("skip:{current}"));
    }
}

/// Surface that records frames and can report a different painted size.
pub struct RecordingSurface {
    nominal: Size,
    realized: Mutex<Option<Size>>,
    paints: Mutex<Vec<OverlayFrame>>,
    removed: AtomicUsize,
}

impl RecordingSurface {
    pub fn new(nominal: Size) -> Arc<Self> {
        Arc::new(Self {
            nominal,
            realized: Mutex::new(None),
            paints: Mutex::new(Vec::new()),
            removed: AtomicUsize::new(0),
        })
    }

    /// Paint reports `size` instead of the laid-out size.
    pub fn realize_as(&self, size: Size) {
        *self.realized.lock() = Some(size);
    }

    pub fn paints(&self) -> Vec<OverlayFrame> {
        self.paints.lock().clone()
    }

    pub fn paint_count(&self) -> usize {
        self.paints.lock().len()
    }

    pub fn removed(&self) -> usize {
        self.removed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OverlaySurface for RecordingSurface {
    fn nominal_size(&self, _content: &OverlayContent) -> Size {
        self.nominal
    }

    async fn paint(&self, frame: &OverlayFrame) -> Size {
        self.paints.lock().push(frame.clone());
        self.realized.lock().unwrap_or(frame.overlay_size)
    }

    fn remove(&self) {
        self.removed.fetch_add(1, Ordering::SeqCst);
    }
}

pub fn plain_steps(n: usize) -> Vec<Step> {
    let specs = (0..n).map(|i| StepSpec::new(format!("step {i}"))).collect();
    assemble(specs, &TourOptions::default())
}

pub fn controller(n: usize, hooks: Arc<RecordingHooks>) -> StepController {
    StepController::with_hooks(plain_steps(n), hooks)
}

/// Poll `condition` every couple of milliseconds, giving spawned tasks on
/// other workers time to run. Panics after about two seconds.
pub async fn until(mut condition: impl FnMut() -> bool) {
    for _ in 0..1000 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    panic!("condition never became true");
}

/// Let other tasks run for a while without expecting anything to change.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(20)).await;
}
