//! Environment-driven configuration, following the same
//! `env::var(...).ok().and_then(|s| s.parse().ok()).unwrap_or(default)`
//! idiom the control-plane binary uses for its own startup config.

use std::env;

#[derive(Debug, Clone)]
pub struct MinionConfig {
    pub worker_threads: usize,
    pub subrange_min_size: u64,
    pub cancellation_check_every: u64,
    pub bind_addr: String,
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl MinionConfig {
    pub fn from_env() -> Self {
        Self {
            worker_threads: env_parsed("WORKER_THREADS", 2),
            subrange_min_size: env_parsed("MINION_SUBRANGE_MIN_SIZE", 1_000),
            cancellation_check_every: env_parsed("CANCELLATION_CHECK_EVERY", 5_000),
            bind_addr: env::var("MINION_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
        }
    }
}

impl Default for MinionConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec() {
        let cfg = MinionConfig {
            worker_threads: 2,
            subrange_min_size: 1_000,
            cancellation_check_every: 5_000,
            bind_addr: "0.0.0.0:8080".to_string(),
        };
        assert_eq!(cfg.worker_threads, 2);
        assert_eq!(cfg.subrange_min_size, 1_000);
        assert_eq!(cfg.cancellation_check_every, 5_000);
    }
}
