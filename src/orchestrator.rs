//! Top-level per-input-hash flow: serve from cache, reject invalid
//! input, or open a job and run it through the scheduler. Bounds how
//! many jobs run concurrently.

use std::collections::BTreeMap;
use std::sync::Arc;

use hashforge_scheme::SchemeRegistry;
use tokio::sync::Semaphore;
use tracing::info;
use uuid::Uuid;

use crate::cache::Cache;
use crate::config::MasterConfig;
use crate::input::InputLine;
use crate::jobs::{JobResult, JobState};
use crate::minion_client::MinionClient;
use crate::minion_registry::MinionRegistry;
use crate::output::OutputRecord;
use crate::scheduler::{run_job, SchedulerConfig};

const BUILTIN_SCHEME_NAME: &str = "prefix-numeric";

pub struct Orchestrator {
    config: MasterConfig,
    cache: Arc<Cache>,
    registry: Arc<MinionRegistry>,
    client: Arc<MinionClient>,
    schemes: Arc<SchemeRegistry>,
}

impl Orchestrator {
    pub fn new(
        config: MasterConfig,
        cache: Arc<Cache>,
        registry: Arc<MinionRegistry>,
        client: Arc<MinionClient>,
        schemes: Arc<SchemeRegistry>,
    ) -> Self {
        Self {
            config,
            cache,
            registry,
            client,
            schemes,
        }
    }

    pub async fn run(&self, lines: Vec<InputLine>) -> BTreeMap<String, OutputRecord> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_jobs));
        let mut tasks = Vec::with_capacity(lines.len());

        for line in lines {
            let permit = semaphore.clone().acquire_owned();
            let cache = self.cache.clone();
            let registry = self.registry.clone();
            let client = self.client.clone();
            let schemes = self.schemes.clone();
            let scheduler_config = SchedulerConfig {
                max_attempts: self.config.max_attempts,
                minion_request_timeout: self.config.minion_request_timeout,
                no_minion_wait_time: self.config.no_minion_wait_time,
            };
            let chunk_size = self.config.chunk_size;

            tasks.push(tokio::spawn(async move {
                let _permit = permit.await.expect("semaphore closed");
                let (hash, record) = process_hash(
                    line,
                    cache,
                    registry,
                    client,
                    schemes,
                    &scheduler_config,
                    chunk_size,
                )
                .await;
                (hash, record)
            }));
        }

        let mut results = BTreeMap::new();
        for task in tasks {
            if let Ok((hash, record)) = task.await {
                results.insert(hash, record);
            }
        }
        results
    }
}

async fn process_hash(
    line: InputLine,
    cache: Arc<Cache>,
    registry: Arc<MinionRegistry>,
    client: Arc<MinionClient>,
    schemes: Arc<SchemeRegistry>,
    scheduler_config: &SchedulerConfig,
    chunk_size: u64,
) -> (String, OutputRecord) {
    let Some(hash) = line.normalized else {
        let job_id = Uuid::new_v4();
        return (
            line.raw.clone(),
            OutputRecord::from_result(job_id, &JobResult::InvalidInput),
        );
    };

    if let Some(password) = cache.get(&hash) {
        let job_id = Uuid::new_v4();
        info!(%hash, "cache hit, skipping dispatch");
        return (
            hash,
            OutputRecord::from_result(job_id, &JobResult::Found(password)),
        );
    }

    let scheme = match schemes.get(BUILTIN_SCHEME_NAME) {
        Ok(scheme) => scheme,
        Err(_) => {
            let job_id = Uuid::new_v4();
            return (
                hash,
                OutputRecord::from_result(job_id, &JobResult::InvalidInput),
            );
        }
    };

    let total_size = scheme.size();
    let job = Arc::new(JobState::new(
        hash.clone(),
        BUILTIN_SCHEME_NAME.to_string(),
        total_size,
        chunk_size,
    ));
    let job_id = job.job_id;

    info!(%hash, %job_id, total_size, "job started");
    let result = run_job(job, registry, client, scheduler_config).await;

    if let JobResult::Found(ref password) = result {
        cache.put(&hash, password);
    }

    (hash, OutputRecord::from_result(job_id, &result))
}
