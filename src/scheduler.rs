//! Per-job scheduling loop: pairs ready chunks with available minions,
//! applies retry/cancel policy, and drives a job to a terminal result.

use std::sync::Arc;
use std::time::Duration;

use hashforge_resilience::ResilienceError;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::jobs::{ChunkOutcome, JobResult, JobState};
use crate::minion_client::{is_breaker_success, MinionClient};
use crate::minion_registry::MinionRegistry;

pub struct SchedulerConfig {
    pub max_attempts: u32,
    pub minion_request_timeout: Duration,
    pub no_minion_wait_time: Duration,
}

struct Completion {
    chunk_id: u32,
    outcome: ChunkOutcome,
}

/// Runs `job` to completion against `registry`, returning its terminal
/// result. Broadcasts cancel to every minion the instant the job
/// becomes FOUND, then drains in-flight work without dispatching more.
///
/// Every `READY` chunk is paired with an available minion as soon as
/// both exist — up to `|available minions|` chunks of this job run
/// concurrently, not one at a time. Only once dispatching stalls (no
/// ready chunk left, or no minion free) does the loop block on the next
/// completion.
pub async fn run_job(
    job: Arc<JobState>,
    registry: Arc<MinionRegistry>,
    client: Arc<MinionClient>,
    config: &SchedulerConfig,
) -> JobResult {
    job.start();

    let (tx, mut rx) = mpsc::unbounded_channel::<Completion>();
    let mut in_flight = 0usize;

    loop {
        if let Some(result) = job.terminal_result() {
            if matches!(result, JobResult::Found(_)) {
                broadcast_cancel(&job, &registry, &client, config).await;
            }
            // Drain remaining completions so their breaker bookkeeping
            // still happens, then return.
            while in_flight > 0 {
                if rx.recv().await.is_none() {
                    break;
                }
                in_flight -= 1;
            }
            return result;
        }

        // Dispatch every chunk currently READY that an available minion
        // can take before ever waiting on a completion.
        let mut starved_for_minion = false;
        while let Some(chunk) = job.take_ready_chunk() {
            match registry.next_available() {
                Some(handle) => {
                    in_flight += 1;
                    let tx = tx.clone();
                    let client = client.clone();
                    let handle = handle.clone();
                    let job = job.clone();
                    let timeout = config.minion_request_timeout;
                    tokio::spawn(async move {
                        let outcome = client
                            .crack(
                                &handle.url,
                                job.job_id,
                                &job.hash,
                                &job.scheme_name,
                                chunk.lo,
                                chunk.hi,
                                timeout,
                            )
                            .await;
                        if is_breaker_success(&outcome) {
                            handle.breaker.record_success();
                        } else {
                            handle.breaker.record_failure();
                        }
                        let _ = tx.send(Completion {
                            chunk_id: chunk.chunk_id,
                            outcome,
                        });
                    });
                }
                None => {
                    job.requeue(chunk.chunk_id);
                    starved_for_minion = true;
                    break;
                }
            }
        }

        if in_flight == 0 {
            if starved_for_minion {
                if let Some(retry_after_secs) = soonest_retry(&registry) {
                    debug!(job_id = %job.job_id, retry_after_secs, "no minion available, backing off");
                }
                tokio::time::sleep(config.no_minion_wait_time).await;
            } else if job.terminal_result().is_none() {
                // No ready chunk and nothing in flight: every chunk is
                // resolved or exhausted, so the last report_chunk call
                // should already have settled the job.
                warn!(job_id = %job.job_id, "no ready chunks and none in flight, but job not terminal");
                return JobResult::Failed;
            }
            continue;
        }

        if let Some(completion) = rx.recv().await {
            in_flight -= 1;
            if let Some(result) =
                job.report_chunk(completion.chunk_id, completion.outcome, config.max_attempts)
            {
                info!(job_id = %job.job_id, ?result, "job reached terminal state");
            }
        }
    }
}

/// The shortest wait, in seconds, before any endpoint's breaker reopens
/// — `None` if every breaker is already closed (a transient race with
/// `next_available`'s own re-check, not the common case).
fn soonest_retry(registry: &MinionRegistry) -> Option<u64> {
    registry
        .all()
        .iter()
        .filter_map(|handle| handle.breaker.check().err())
        .map(|ResilienceError::CircuitOpen { retry_after_secs }| retry_after_secs)
        .min()
}

async fn broadcast_cancel(
    job: &JobState,
    registry: &MinionRegistry,
    client: &Arc<MinionClient>,
    config: &SchedulerConfig,
) {
    let timeout = config.minion_request_timeout;
    let job_id = job.job_id;
    let handles: Vec<_> = registry
        .all()
        .iter()
        .map(|handle| {
            let client = client.clone();
            let url = handle.url.clone();
            tokio::spawn(async move {
                client.cancel(&url, job_id, timeout).await;
            })
        })
        .collect();
    for handle in handles {
        let _ = handle.await;
    }
}
