#![forbid(unsafe_code)]

//! Coalesced re-placement signal.
//!
//! Resize, scroll, and explicit refresh requests all bump one monotonically
//! increasing counter. Consumers hold a [`RefreshCursor`] and recompute when
//! it reports a value newer than the last one they used, so a burst of
//! triggers costs one recomputation.

use std::sync::Arc;

use tokio::sync::watch;

/// What triggered a refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefreshReason {
    Resize,
    Scroll,
    Explicit,
}

impl RefreshReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Resize => "resize",
            Self::Scroll => "scroll",
            Self::Explicit => "explicit",
        }
    }
}

/// Shared refresh counter. Clones bump the same counter.
#[derive(Debug, Clone)]
pub struct RefreshCounter {
    tx: Arc<watch::Sender<u64>>,
}

impl Default for RefreshCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl RefreshCounter {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx: Arc::new(tx) }
    }

    /// Increment the counter and return the new value.
    pub fn bump(&self, reason: RefreshReason) -> u64 {
        let mut value = 0;
        self.tx.send_modify(|counter| {
            *counter += 1;
            value = *counter;
        });
        tracing::trace!(value, reason = reason.as_str(), "refresh requested");
        value
    }

    pub fn current(&self) -> u64 {
        *self.tx.borrow()
    }

    /// A cursor that has seen the current value.
    pub fn cursor(&self) -> RefreshCursor {
        let rx = self.tx.subscribe();
        let seen = *rx.borrow();
        RefreshCursor { rx, seen }
    }
}

/// A consumer's view of the refresh counter.
#[derive(Debug)]
pub struct RefreshCursor {
    rx: watch::Receiver<u64>,
    seen: u64,
}

impl RefreshCursor {
    /// Last value this cursor acted on.
    pub fn seen(&self) -> u64 {
        self.seen
    }

    /// The counter value if it is newer than the last one seen, marking it
    /// seen.
    pub fn poll(&mut self) -> Option<u64> {
        let current = *self.rx.borrow_and_update();
        if current > self.seen {
            self.seen = current;
            Some(current)
        } else {
            None
        }
    }

    /// Wait for a value newer than the last one seen.
    ///
    /// Returns `None` once every counter handle is dropped.
    pub async fn changed(&mut self) -> Option<u64> {
        loop {
            if let Some(value) = self.poll() {
                return Some(value);
            }
            if self.rx.changed().await.is_err() {
                return None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bursts_coalesce_into_one_observation() {
        let counter = RefreshCounter::new();
        let mut cursor = counter.cursor();
        assert_eq!(cursor.poll(), None);

        counter.bump(RefreshReason::Resize);
        counter.bump(RefreshReason::Scroll);
        counter.bump(RefreshReason::Resize);

        assert_eq!(cursor.poll(), Some(3));
        assert_eq!(cursor.poll(), None);
        assert_eq!(cursor.seen(), 3);
    }

    #[test]
    fn cursors_are_independent() {
        let counter = RefreshCounter::new();
        let mut early = counter.cursor();
        counter.bump(RefreshReason::Explicit);
        let mut late = counter.cursor();

        assert_eq!(early.poll(), Some(1));
        assert_eq!(late.poll(), None);
        assert_eq!(counter.clone().bump(RefreshReason::Explicit), 2);
        assert_eq!(late.poll(), Some(2));
        assert_eq!(counter.current(), 2);
    }

    #[tokio::test]
    async fn changed_wakes_on_bump() {
        let counter = RefreshCounter::new();
        let mut cursor = counter.cursor();
        let bumper = counter.clone();
        let handle = tokio::spawn(async move { bumper.bump(RefreshReason::Scroll) });
        assert_eq!(cursor.changed().await, Some(1));
        assert_eq!(handle.await.unwrap(), 1);
    }

    #[tokio::test]
    async fn changed_ends_when_counter_dropped() {
        let counter = RefreshCounter::new();
        let mut cursor = counter.cursor();
        drop(counter);
        assert_eq!(cursor.changed().await, None);
    }
}
