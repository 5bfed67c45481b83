//! Wall-clock guard shared by every threshold evaluation of a sweep.

use std::{
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
    time::{Duration, Instant},
};

use crate::{Result, error::SweepError};

/// Tracks elapsed time and completed thresholds for one sweep.
///
/// Once the budget is observed as spent the flag latches, so workers that
/// have not started yet fail fast without reading the clock again.
#[derive(Debug)]
pub(super) struct Budget {
    limit: Option<Duration>,
    started: Instant,
    requested: usize,
    completed: AtomicUsize,
    exhausted: AtomicBool,
}

impl Budget {
    pub(super) fn new(limit: Option<Duration>, requested: usize) -> Self {
        Self {
            limit,
            started: Instant::now(),
            requested,
            completed: AtomicUsize::new(0),
            exhausted: AtomicBool::new(false),
        }
    }

    /// Grants permission to start one more threshold.
    pub(super) fn admit(&self) -> Result<()> {
        let Some(limit) = self.limit else {
            return Ok(());
        };
        if self.exhausted.load(Ordering::Acquire) || self.started.elapsed() >= limit {
            self.exhausted.store(true, Ordering::Release);
            return Err(SweepError::TimeBudgetExceeded {
                completed: self.completed.load(Ordering::Acquire),
                requested: self.requested,
                budget: limit,
            });
        }
        Ok(())
    }

    pub(super) fn complete(&self) {
        self.completed.fetch_add(1, Ordering::AcqRel);
    }
}
