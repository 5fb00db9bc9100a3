//! Deferred effects with an injectable timer for testable timing logic.
//!
//! The gate's two timed effects (overlay removal after the fade, shake
//! removal after the animation) are fire-and-forget: once scheduled they
//! cannot be cancelled, and nothing waits for them.

use crate::GateError;
use std::time::Duration;

/// A deferred effect.
pub type Deferred = Box<dyn FnOnce() + Send + 'static>;

/// Timer trait for running an effect after a delay.
pub trait Timer: Send + Sync {
    /// Run `task` once `delay` has elapsed.
    fn defer(&self, delay: Duration, task: Deferred) -> Result<(), GateError>;
}

impl<T: Timer + ?Sized> Timer for std::sync::Arc<T> {
    fn defer(&self, delay: Duration, task: Deferred) -> Result<(), GateError> {
        (**self).defer(delay, task)
    }
}

/// Timer backed by the tokio runtime the gate was created on.
#[derive(Debug, Clone)]
pub struct TokioTimer {
    handle: tokio::runtime::Handle,
}

impl TokioTimer {
    /// Capture the current tokio runtime.
    ///
    /// # Errors
    /// Returns `TimerUnavailable` when called outside a runtime.
    pub fn current() -> Result<Self, GateError> {
        let handle = tokio::runtime::Handle::try_current()
            .map_err(|e| GateError::TimerUnavailable(e.to_string()))?;
        Ok(Self { handle })
    }

    /// Use an explicit runtime handle.
    pub fn with_handle(handle: tokio::runtime::Handle) -> Self {
        Self { handle }
    }
}

impl Timer for TokioTimer {
    fn defer(&self, delay: Duration, task: Deferred) -> Result<(), GateError> {
        self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
        Ok(())
    }
}

/// Manually advanced timer for deterministic testing.
#[cfg(any(test, feature = "test-seams"))]
#[derive(Default)]
pub struct MockTimer {
    inner: std::sync::Mutex<MockTimerState>,
}

#[cfg(any(test, feature = "test-seams"))]
#[derive(Default)]
struct MockTimerState {
    now: Duration,
    next_seq: u64,
    pending: Vec<(Duration, u64, Deferred)>,
}

#[cfg(any(test, feature = "test-seams"))]
impl MockTimer {
    /// Create a timer frozen at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.inner.lock().expect("mock timer lock").now
    }

    /// Number of effects not yet run.
    pub fn pending(&self) -> usize {
        self.inner.lock().expect("mock timer lock").pending.len()
    }

    /// Advance the timer, running every effect that falls due in order.
    pub fn advance(&self, duration: Duration) {
        let due = {
            let mut state = self.inner.lock().expect("mock timer lock");
            state.now += duration;
            let now = state.now;
            let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut state.pending)
                .into_iter()
                .partition(|(at, _, _)| *at <= now);
            state.pending = pending;
            due.sort_by_key(|(at, seq, _)| (*at, *seq));
            due
        };

        for (_, _, task) in due {
            task();
        }
    }
}

#[cfg(any(test, feature = "test-seams"))]
impl Timer for MockTimer {
    fn defer(&self, delay: Duration, task: Deferred) -> Result<(), GateError> {
        let mut state = self.inner.lock().expect("mock timer lock");
        let at = state.now + delay;
        let seq = state.next_seq;
        state.next_seq += 1;
        state.pending.push((at, seq, task));
        Ok(())
    }
}
