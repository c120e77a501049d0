//! Job and chunk state machines.
//!
//! A `JobState` owns its chunk plan and status; every transition is
//! guarded by a single mutex so concurrent chunk completions serialize
//! cleanly and a terminal job is truly terminal (idempotent
//! `report_chunk` after DONE/FAILED).

use std::collections::BTreeMap;
use std::sync::Mutex;

use uuid::Uuid;

/// What a minion reported for one chunk, translated from the wire
/// `ChunkStatus`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkOutcome {
    Found(String),
    NotFound,
    Cancelled,
    /// No usable response at all: transport failure, timeout, non-2xx,
    /// or an undecodable body. Charged against the minion's breaker.
    Error,
    /// A well-formed 2xx body reporting a worker-internal fault. The
    /// minion itself answered fine, so this is not a breaker failure.
    WorkerError,
    InvalidInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkStatus {
    Ready,
    InFlight,
    NotFound,
    Found,
    Cancelled,
    Exhausted,
}

#[derive(Debug, Clone)]
pub struct ChunkRecord {
    pub chunk_id: u32,
    pub lo: u64,
    pub hi: u64,
    pub attempts: u32,
    pub status: ChunkStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Running,
    Done,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobResult {
    Found(String),
    NotFound,
    Failed,
    InvalidInput,
}

struct Inner {
    status: JobStatus,
    result: Option<JobResult>,
    chunks: BTreeMap<u32, ChunkRecord>,
}

pub struct JobState {
    pub job_id: Uuid,
    pub hash: String,
    pub scheme_name: String,
    pub total_size: u64,
    inner: Mutex<Inner>,
}

fn plan_chunks(total_size: u64, chunk_size: u64) -> BTreeMap<u32, ChunkRecord> {
    let chunk_size = chunk_size.max(1);
    let mut chunks = BTreeMap::new();
    let mut lo = 0u64;
    let mut chunk_id = 0u32;
    while lo < total_size {
        let hi = (lo + chunk_size).min(total_size) - 1;
        chunks.insert(
            chunk_id,
            ChunkRecord {
                chunk_id,
                lo,
                hi,
                attempts: 0,
                status: ChunkStatus::Ready,
            },
        );
        lo = hi + 1;
        chunk_id += 1;
    }
    chunks
}

impl JobState {
    pub fn new(hash: String, scheme_name: String, total_size: u64, chunk_size: u64) -> Self {
        Self {
            job_id: Uuid::new_v4(),
            hash,
            scheme_name,
            total_size,
            inner: Mutex::new(Inner {
                status: JobStatus::Pending,
                result: None,
                chunks: plan_chunks(total_size, chunk_size),
            }),
        }
    }

    pub fn start(&self) {
        let mut inner = self.inner.lock().unwrap();
        if inner.status == JobStatus::Pending {
            inner.status = JobStatus::Running;
        }
    }

    pub fn terminal_result(&self) -> Option<JobResult> {
        let inner = self.inner.lock().unwrap();
        match inner.status {
            JobStatus::Done | JobStatus::Failed => inner.result.clone(),
            _ => None,
        }
    }

    /// Marks the next `READY` chunk `IN_FLIGHT` and returns it.
    pub fn take_ready_chunk(&self) -> Option<ChunkRecord> {
        let mut inner = self.inner.lock().unwrap();
        let chunk_id = inner
            .chunks
            .values()
            .find(|c| c.status == ChunkStatus::Ready)
            .map(|c| c.chunk_id)?;
        let chunk = inner.chunks.get_mut(&chunk_id).unwrap();
        chunk.status = ChunkStatus::InFlight;
        Some(chunk.clone())
    }

    /// Returns a chunk to `READY` without charging an attempt — used
    /// when no minion was available to take it.
    pub fn requeue(&self, chunk_id: u32) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(chunk) = inner.chunks.get_mut(&chunk_id) {
            chunk.status = ChunkStatus::Ready;
        }
    }

    pub fn any_in_flight(&self) -> bool {
        let inner = self.inner.lock().unwrap();
        inner.chunks.values().any(|c| c.status == ChunkStatus::InFlight)
    }

    /// Applies a chunk outcome and, if the job just became terminal,
    /// returns the job's result. A no-op (returns `None`) once the job
    /// is already DONE or FAILED.
    pub fn report_chunk(
        &self,
        chunk_id: u32,
        outcome: ChunkOutcome,
        max_attempts: u32,
    ) -> Option<JobResult> {
        let mut inner = self.inner.lock().unwrap();
        if matches!(inner.status, JobStatus::Done | JobStatus::Failed) {
            return None;
        }

        if let Some(chunk) = inner.chunks.get_mut(&chunk_id) {
            match outcome {
                ChunkOutcome::Found(_) => chunk.status = ChunkStatus::Found,
                ChunkOutcome::NotFound => chunk.status = ChunkStatus::NotFound,
                ChunkOutcome::Cancelled => chunk.status = ChunkStatus::Cancelled,
                // ERROR, WORKER_ERROR, and INVALID_INPUT all consume an
                // attempt and either requeue the chunk or exhaust it;
                // INVALID_INPUT should not arise for a chunk the master
                // itself planned, but is handled the same defensive way
                // as a transient error.
                ChunkOutcome::Error | ChunkOutcome::WorkerError | ChunkOutcome::InvalidInput => {
                    chunk.attempts += 1;
                    chunk.status = if chunk.attempts < max_attempts {
                        ChunkStatus::Ready
                    } else {
                        ChunkStatus::Exhausted
                    };
                }
            }
        }

        if let ChunkOutcome::Found(password) = outcome {
            inner.status = JobStatus::Done;
            inner.result = Some(JobResult::Found(password));
            return inner.result.clone();
        }

        if inner.chunks.values().any(|c| c.status == ChunkStatus::Exhausted) {
            inner.status = JobStatus::Failed;
            inner.result = Some(JobResult::Failed);
            return inner.result.clone();
        }

        let all_resolved = inner
            .chunks
            .values()
            .all(|c| matches!(c.status, ChunkStatus::NotFound | ChunkStatus::Cancelled));
        if all_resolved {
            inner.status = JobStatus::Done;
            inner.result = Some(JobResult::NotFound);
            return inner.result.clone();
        }

        None
    }
}
