//! Two-state circuit breaker for minion calls.
//!
//! Unlike a textbook breaker with a half-open probing state, this one has
//! exactly the two states a minion registry needs: `Closed` while the
//! minion is trusted, `Open` while it is being skipped. There is no
//! half-open state — reopening is decided lazily, the instant `allow()`
//! is called after the cooldown window has elapsed.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::error::ResilienceError;

/// Observable state of the breaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    /// Accepting calls. Carries the current consecutive-failure count.
    Closed { fail_count: u32 },
    /// Rejecting calls until `retry_at`.
    Open { retry_at: Instant },
}

/// Configuration for breaker behavior.
#[derive(Debug, Clone)]
pub struct CircuitBreakerConfig {
    /// Consecutive failures that trip the breaker open.
    pub failure_threshold: u32,
    /// How long the breaker stays open before allowing another attempt.
    pub open_duration: Duration,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 3,
            open_duration: Duration::from_secs(10),
        }
    }
}

/// A single minion's breaker state.
pub struct CircuitBreaker {
    config: CircuitBreakerConfig,
    state: Mutex<CircuitState>,
}

impl CircuitBreaker {
    pub fn new(config: CircuitBreakerConfig) -> Self {
        Self {
            config,
            state: Mutex::new(CircuitState::Closed { fail_count: 0 }),
        }
    }

    pub fn new_default() -> Self {
        Self::new(CircuitBreakerConfig::default())
    }

    /// Returns the current state, lazily closing an expired `Open` state.
    pub fn state(&self) -> CircuitState {
        let mut state = self.state.lock().unwrap();
        if let CircuitState::Open { retry_at } = *state {
            if Instant::now() >= retry_at {
                *state = CircuitState::Closed { fail_count: 0 };
            }
        }
        *state
    }

    /// Whether a call should be attempted right now. Side-effecting:
    /// transitions `Open` to `Closed` when the cooldown has elapsed, per
    /// the lazy-evaluation design — there is no background timer.
    pub fn allow(&self) -> bool {
        matches!(self.state(), CircuitState::Closed { .. })
    }

    /// Same admission check as `allow`, but surfaces how long the caller
    /// should wait before the breaker reopens — used for diagnostic
    /// logging when a dispatch is skipped.
    pub fn check(&self) -> Result<(), ResilienceError> {
        match self.state() {
            CircuitState::Closed { .. } => Ok(()),
            CircuitState::Open { retry_at } => Err(ResilienceError::CircuitOpen {
                retry_after_secs: retry_at.saturating_duration_since(Instant::now()).as_secs(),
            }),
        }
    }

    pub fn record_success(&self) {
        let mut state = self.state.lock().unwrap();
        *state = CircuitState::Closed { fail_count: 0 };
    }

    pub fn record_failure(&self) {
        let mut state = self.state.lock().unwrap();
        let fail_count = match *state {
            CircuitState::Closed { fail_count } => fail_count,
            CircuitState::Open { .. } => 0,
        };
        let next = fail_count + 1;
        *state = if next >= self.config.failure_threshold {
            CircuitState::Open {
                retry_at: Instant::now() + self.config.open_duration,
            }
        } else {
            CircuitState::Closed { fail_count: next }
        };
    }

    pub fn reset(&self) {
        *self.state.lock().unwrap() = CircuitState::Closed { fail_count: 0 };
    }
}
