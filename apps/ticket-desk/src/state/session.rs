//! # Batch Session
//!
//! Holds the one "current batch" that print and export act on.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Batch Session Operations                             │
//! │                                                                         │
//! │  Operator Action          Command                 Session Change        │
//! │  ───────────────          ───────                 ──────────────        │
//! │                                                                         │
//! │  Generate ───────────────► generate_batch() ─────► slot = Some(new)     │
//! │                                                   (old batch dropped)   │
//! │                                                                         │
//! │  Print / Export ─────────► print_batch() ────────► (read only)          │
//! │                            export_batch()         None → guard message  │
//! │                                                                         │
//! │  Clear ──────────────────► clear_batch() ────────► slot = None          │
//! │                                                                         │
//! │  NOTE: A batch is swapped in whole under the lock; nobody ever sees     │
//! │        a half-built batch.                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use ticket_core::Batch;

/// Owner of the current batch.
///
/// ## Thread Safety
/// `Arc<Mutex<Option<Batch>>>` mirrors how the counter shares state
/// between commands; cloning the session clones the handle, not the batch.
#[derive(Debug, Clone, Default)]
pub struct BatchSession {
    current: Arc<Mutex<Option<Batch>>>,
}

impl BatchSession {
    /// Creates a session with no batch.
    pub fn new() -> Self {
        BatchSession::default()
    }

    /// Replaces the current batch wholesale, returning the previous one.
    pub fn replace(&self, batch: Batch) -> Option<Batch> {
        self.lock().replace(batch)
    }

    /// Discards the current batch, returning it if there was one.
    pub fn clear(&self) -> Option<Batch> {
        self.lock().take()
    }

    /// Whether a batch is available for print/export.
    pub fn has_batch(&self) -> bool {
        self.lock().as_ref().is_some_and(|batch| !batch.is_empty())
    }

    /// Executes a function with read access to the current batch.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let count = session.with_batch(|batch| batch.map_or(0, |b| b.len()));
    /// ```
    pub fn with_batch<F, R>(&self, f: F) -> R
    where
        F: FnOnce(Option<&Batch>) -> R,
    {
        let guard = self.lock();
        f(guard.as_ref())
    }

    fn lock(&self) -> MutexGuard<'_, Option<Batch>> {
        // A panic mid-replace cannot leave a partial batch: the slot holds
        // either the old or the new value
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
