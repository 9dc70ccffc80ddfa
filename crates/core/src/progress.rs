//! Progress snapshot type and percentage math.
//!
//! [`ProgressSnapshot`] is what pollers receive: a consistent copy of the
//! whole progress record taken under one lock. The field names are the wire
//! names served by `GET /sdapi/v1/progress`.

use serde::{Deserialize, Serialize};

/// A consistent point-in-time copy of the generation progress record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    /// Steps completed so far in the current (or last) job.
    pub step: u32,
    /// Total steps for the current (or last) job.
    pub total_steps: u32,
    /// Completion percentage, derived from `step` and `total_steps`.
    pub percentage: f64,
    /// True exactly while a job is running.
    pub active: bool,
}

impl ProgressSnapshot {
    /// The state before any job has ever run.
    pub fn idle() -> Self {
        Self {
            step: 0,
            total_steps: 0,
            percentage: 0.0,
            active: false,
        }
    }
}

/// Completion percentage for `step` of `total` steps.
///
/// Zero when `total` is zero, so the idle record reads as 0% rather than
/// dividing by zero.
pub fn percentage(step: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        f64::from(step) / f64::from(total) * 100.0
    }
}
