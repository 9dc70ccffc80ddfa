//! The shared progress record.
//!
//! One record for the whole process: reset at the start of every job,
//! updated once per completed step, finalised or deactivated when the job
//! ends, and copied out for every poller. Every access goes through a single
//! mutex covering the whole record, because `percentage` is derived from
//! `step` and `total_steps` and must never be observed out of sync with
//! them. Hold times are O(1); no blocking work ever happens under the lock.

use std::sync::{Mutex, PoisonError};

use imagegen_core::progress::{percentage, ProgressSnapshot};

/// Tracks progress of the single in-flight generation job.
///
/// The step callback runs on a blocking engine thread while pollers read
/// from async tasks, so the record sits behind a `std::sync::Mutex` rather
/// than an async lock.
#[derive(Debug)]
pub struct ProgressTracker {
    inner: Mutex<ProgressSnapshot>,
}

impl ProgressTracker {
    /// A fresh record: all fields zero, inactive.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(ProgressSnapshot::idle()),
        }
    }

    /// Copy the current record.
    ///
    /// Never waits on a running job; only the short-lived record lock is
    /// taken.
    pub fn snapshot(&self) -> ProgressSnapshot {
        *self.lock()
    }

    /// Reset the record for a new job of `total_steps` steps.
    ///
    /// All four fields are committed in one critical section, so a
    /// concurrent poller sees either the prior job's final state or the
    /// fully reset one -- never a mix.
    pub(crate) fn begin(&self, total_steps: u32) {
        let mut inner = self.lock();
        *inner = ProgressSnapshot {
            step: 0,
            total_steps,
            percentage: 0.0,
            active: true,
        };
    }

    /// Record completion of step `step` (1-indexed).
    ///
    /// Steps beyond the advertised total are clamped, keeping
    /// `step <= total_steps` even against a misbehaving backend.
    pub(crate) fn record_step(&self, step: u32) {
        let mut inner = self.lock();
        let step = step.min(inner.total_steps);
        inner.step = step;
        inner.percentage = percentage(step, inner.total_steps);
    }

    /// Finalise the record after a successful job: all steps done, 100%,
    /// inactive.
    pub(crate) fn complete(&self) {
        let mut inner = self.lock();
        inner.step = inner.total_steps;
        inner.percentage = percentage(inner.total_steps, inner.total_steps);
        inner.active = false;
    }

    /// Deactivate the record after a failed job.
    ///
    /// Step and percentage are left as-is: the last completed step remains
    /// visible to pollers for diagnosis.
    pub(crate) fn deactivate(&self) {
        self.lock().active = false;
    }

    /// Take the record lock, absorbing poisoning.
    ///
    /// A panic on an engine thread must not wedge every future poller, so a
    /// poisoned lock is recovered rather than propagated.
    fn lock(&self) -> std::sync::MutexGuard<'_, ProgressSnapshot> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
