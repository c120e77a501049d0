//! A stable-order list of minion endpoints, each gated by its own
//! breaker. The scheduler calls `next_available` once per dispatch
//! attempt rather than holding a handle across a request.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use hashforge_resilience::{CircuitBreaker, CircuitBreakerConfig};

pub struct MinionHandle {
    pub url: String,
    pub breaker: CircuitBreaker,
}

pub struct MinionRegistry {
    handles: Vec<Arc<MinionHandle>>,
    cursor: AtomicUsize,
}

impl MinionRegistry {
    pub fn new(urls: Vec<String>, breaker_config: CircuitBreakerConfig) -> Self {
        let handles = urls
            .into_iter()
            .map(|url| {
                Arc::new(MinionHandle {
                    url,
                    breaker: CircuitBreaker::new(CircuitBreakerConfig {
                        failure_threshold: breaker_config.failure_threshold,
                        open_duration: breaker_config.open_duration,
                    }),
                })
            })
            .collect();
        Self {
            handles,
            cursor: AtomicUsize::new(0),
        }
    }

    pub fn all(&self) -> &[Arc<MinionHandle>] {
        &self.handles
    }

    /// Round-robins across endpoints by a shared cursor, skipping any
    /// whose breaker is open. `None` only when every endpoint is open.
    pub fn next_available(&self) -> Option<Arc<MinionHandle>> {
        let len = self.handles.len();
        if len == 0 {
            return None;
        }
        for _ in 0..len {
            let idx = self.cursor.fetch_add(1, Ordering::Relaxed) % len;
            let handle = &self.handles[idx];
            if handle.breaker.allow() {
                return Some(handle.clone());
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config() -> CircuitBreakerConfig {
        CircuitBreakerConfig {
            failure_threshold: 1,
            open_duration: Duration::from_secs(60),
        }
    }

    #[test]
    fn round_robins_across_available_endpoints() {
        let registry = MinionRegistry::new(
            vec!["a".to_string(), "b".to_string()],
            config(),
        );
        let first = registry.next_available().unwrap().url.clone();
        let second = registry.next_available().unwrap().url.clone();
        assert_ne!(first, second);
    }

    #[test]
    fn skips_open_endpoints_and_returns_none_when_all_open() {
        let registry = MinionRegistry::new(vec!["a".to_string(), "b".to_string()], config());
        for handle in registry.all() {
            handle.breaker.record_failure();
        }
        assert!(registry.next_available().is_none());
    }

    #[test]
    fn empty_registry_yields_none() {
        let registry = MinionRegistry::new(vec![], config());
        assert!(registry.next_available().is_none());
    }
}
