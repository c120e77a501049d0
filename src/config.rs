/*!
 * Configuration structures and defaults for the hashforge master.
 *
 * Loaded entirely from the environment, following the same
 * `env::var(...).ok().and_then(|s| s.parse().ok()).unwrap_or(default)`
 * idiom the fleet's control-plane binary uses for its own startup
 * config.
 */

use crate::error::{MasterError, Result};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct MasterConfig {
    pub chunk_size: u64,
    pub max_concurrent_jobs: usize,
    pub max_attempts: u32,
    pub minion_request_timeout: Duration,
    pub no_minion_wait_time: Duration,
    pub minion_failure_threshold: u32,
    pub minion_breaker_open_seconds: Duration,
    pub minion_urls: Vec<String>,
    pub output_file: String,
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn env_secs(key: &str, default_secs: f64) -> Duration {
    let secs: f64 = env_parsed(key, default_secs);
    Duration::from_secs_f64(secs)
}

impl MasterConfig {
    /// Loads configuration from the environment. `MINION_URLS` is
    /// required (comma-separated); everything else has a spec-mandated
    /// default.
    pub fn from_env() -> Result<Self> {
        let minion_urls: Vec<String> = env::var("MINION_URLS")
            .map_err(|_| MasterError::NoMinionUrls)?
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        if minion_urls.is_empty() {
            return Err(MasterError::NoMinionUrls);
        }

        Ok(Self {
            chunk_size: env_parsed("CHUNK_SIZE", 100_000),
            max_concurrent_jobs: env_parsed("MAX_CONCURRENT_JOBS", 3),
            max_attempts: env_parsed("MAX_ATTEMPTS", 3),
            minion_request_timeout: env_secs("MINION_REQUEST_TIMEOUT", 5.0),
            no_minion_wait_time: env_secs("NO_MINION_WAIT_TIME", 0.5),
            minion_failure_threshold: env_parsed("MINION_FAILURE_THRESHOLD", 3),
            minion_breaker_open_seconds: env_secs("MINION_BREAKER_OPEN_SECONDS", 10.0),
            minion_urls,
            output_file: env::var("OUTPUT_FILE").unwrap_or_else(|_| "output.json".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn missing_minion_urls_is_an_error() {
        let _guard = ENV_LOCK.lock().unwrap();
        env::remove_var("MINION_URLS");
        assert!(matches!(MasterConfig::from_env(), Err(MasterError::NoMinionUrls)));
    }

    #[test]
    fn defaults_match_spec() {
        let _guard = ENV_LOCK.lock().unwrap();
        env::set_var("MINION_URLS", "http://localhost:8080,http://localhost:8081");
        for key in [
            "CHUNK_SIZE",
            "MAX_CONCURRENT_JOBS",
            "MAX_ATTEMPTS",
            "MINION_REQUEST_TIMEOUT",
            "NO_MINION_WAIT_TIME",
            "MINION_FAILURE_THRESHOLD",
            "MINION_BREAKER_OPEN_SECONDS",
            "OUTPUT_FILE",
        ] {
            env::remove_var(key);
        }
        let config = MasterConfig::from_env().unwrap();
        assert_eq!(config.chunk_size, 100_000);
        assert_eq!(config.max_concurrent_jobs, 3);
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.minion_request_timeout, Duration::from_secs_f64(5.0));
        assert_eq!(config.no_minion_wait_time, Duration::from_secs_f64(0.5));
        assert_eq!(config.minion_failure_threshold, 3);
        assert_eq!(
            config.minion_breaker_open_seconds,
            Duration::from_secs_f64(10.0)
        );
        assert_eq!(config.minion_urls.len(), 2);
        assert_eq!(config.output_file, "output.json");
        env::remove_var("MINION_URLS");
    }
}
