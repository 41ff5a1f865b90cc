//! Coalescing of rapid parameter changes.
//!
//! A [`Debouncer`] holds at most one pending task. Scheduling a new task aborts
//! the pending one and restarts the quiescence window, so a burst of slider
//! events produces a single enhancement once the input settles. Tasks run on
//! the runtime's blocking pool, so they may be CPU-bound.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::config::EngineConfig;

/// Single-pending-task scheduler on a tokio runtime.
#[derive(Debug)]
pub struct Debouncer {
    runtime: Handle,
    window: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(runtime: Handle, window: Duration) -> Self {
        Self {
            runtime,
            window,
            pending: Mutex::new(None),
        }
    }

    /// Debouncer using the configured `debounce_window`.
    pub fn from_config(runtime: Handle, config: &EngineConfig) -> Self {
        Self::new(runtime, config.debounce_window)
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Run `task` once `window` has passed without another call to `schedule`.
    ///
    /// A task that has already started is not interrupted.
    pub fn schedule<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let window = self.window;
        let handle = self.runtime.spawn(async move {
            tokio::time::sleep(window).await;
            if let Err(e) = tokio::task::spawn_blocking(task).await {
                tracing::warn!(error = %e, "Debounce: task failed");
            }
        });

        let previous = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(handle);
        if let Some(previous) = previous {
            if !previous.is_finished() {
                tracing::trace!("Debounce: rescheduled pending task");
            }
            previous.abort();
        }
    }

    /// Drop the pending task, if any.
    pub fn cancel(&self) {
        if let Some(handle) = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            handle.abort();
        }
    }

    /// True while a scheduled task has not yet finished.
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
