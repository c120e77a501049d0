use thiserror::Error;

/// Errors surfaced by the resilience primitives themselves.
///
/// This is deliberately small: the breaker never talks to a network or a
/// disk, so there is nothing transient to retry here. Callers wrap their
/// own transport errors (HTTP timeouts, bad status codes) and report them
/// to the breaker via `record_failure`; this type exists only for the
/// breaker's own contract violations.
#[derive(Debug, Error)]
pub enum ResilienceError {
    #[error("circuit is open, retry after {retry_after_secs}s")]
    CircuitOpen { retry_after_secs: u64 },
}
