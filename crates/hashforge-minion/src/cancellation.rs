//! Arena of per-job cancellation flags, keyed by job id. A concurrent
//! map with no cleanup schedule beyond `/cancel` handling — acceptable
//! to leak entries until process exit given the in-memory lifecycle of
//! a minion run.

use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Default)]
pub struct CancellationRegistry {
    flags: DashMap<Uuid, Arc<AtomicBool>>,
}

impl CancellationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The flag for `job_id`, creating an unset one if this is the first
    /// time the job has been seen.
    pub fn flag_for(&self, job_id: Uuid) -> Arc<AtomicBool> {
        self.flags
            .entry(job_id)
            .or_insert_with(|| Arc::new(AtomicBool::new(false)))
            .clone()
    }

    /// Sets the flag for `job_id`. Idempotent, and sets the flag even if
    /// no crack request for this job has ever arrived, so a cancel that
    /// races ahead of a late-dispatched chunk still takes effect.
    pub fn cancel(&self, job_id: Uuid) {
        self.flag_for(job_id).store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self, job_id: Uuid) -> bool {
        self.flags
            .get(&job_id)
            .map(|f| f.load(Ordering::Acquire))
            .unwrap_or(false)
    }
}
