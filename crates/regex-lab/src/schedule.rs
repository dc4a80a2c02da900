//! Debounced scheduling of expensive work.
//!
//! A [`Debouncer`] holds at most one pending job. Scheduling a new job
//! aborts the pending one if its quiet period has not yet elapsed. A job
//! that has already started runs to completion on the blocking pool, but its
//! result is delivered only if no newer job was scheduled in the meantime,
//! so stale output never replaces fresher output.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{trace, warn};

/// Default quiet period before a scheduled job runs.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Proof that a job was the latest one scheduled when it was issued.
///
/// A job can use its ticket to publish intermediate progress under the same
/// fence that guards delivery of its final output.
#[derive(Debug, Clone)]
pub struct Ticket {
    generation: Arc<Mutex<u64>>,
    issued: u64,
}

impl Ticket {
    /// Check if no newer job has been scheduled or the debouncer cancelled.
    #[must_use]
    pub fn is_current(&self) -> bool {
        *self.generation.lock().unwrap_or_else(PoisonError::into_inner) == self.issued
    }

    /// Run `f` only if this ticket is still current.
    ///
    /// The generation lock is held while `f` runs, so a concurrent
    /// reschedule or cancel either happens before `f` (and `f` is skipped)
    /// or waits until `f` returns.
    pub fn run_if_current<R>(&self, f: impl FnOnce() -> R) -> Option<R> {
        let current = self.generation.lock().unwrap_or_else(PoisonError::into_inner);
        if *current == self.issued {
            Some(f())
        } else {
            trace!(ticket = self.issued, current = *current, "Dropping superseded result");
            None
        }
    }
}

/// Single-slot pending-task register.
///
/// Must be used from within a Tokio runtime.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    pending: Option<JoinHandle<()>>,
    generation: Arc<Mutex<u64>>,
}

impl Debouncer {
    /// Create a debouncer with the given quiet period.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
            generation: Arc::new(Mutex::new(0)),
        }
    }

    /// The quiet period.
    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Schedule `job` to run after the quiet period, replacing any pending job.
    ///
    /// `job` runs on Tokio's blocking pool, so a slow job never stalls the
    /// runtime. When it finishes, `deliver` receives its output unless
    /// another job has been scheduled (or [`cancel`](Self::cancel) called)
    /// since.
    pub fn schedule<T, J, D>(&mut self, job: J, deliver: D)
    where
        T: Send + 'static,
        J: FnOnce(&Ticket) -> T + Send + 'static,
        D: FnOnce(T) + Send + 'static,
    {
        let ticket = Ticket {
            generation: Arc::clone(&self.generation),
            issued: self.advance(),
        };
        let window = self.window;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            let worker = ticket.clone();
            let output = match tokio::task::spawn_blocking(move || job(&worker)).await {
                Ok(output) => output,
                Err(e) => {
                    warn!(ticket = ticket.issued, error = %e, "Scheduled job failed");
                    return;
                }
            };
            ticket.run_if_current(|| deliver(output));
        }));
    }

    /// Drop the pending job, if any, and fence off any job already running.
    pub fn cancel(&mut self) {
        self.advance();
    }

    /// Check if a job is scheduled and has not finished.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Bump the generation and abort the pending task. Returns the new generation.
    fn advance(&mut self) -> u64 {
        let mut generation = self.generation.lock().unwrap_or_else(PoisonError::into_inner);
        *generation += 1;
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        *generation
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
