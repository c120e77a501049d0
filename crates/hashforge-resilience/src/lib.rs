//! Pure-logic fault tolerance primitive for the minion registry.
//!
//! This crate knows nothing about HTTP or minions — it follows the same
//! "pure logic, zero knowledge of transport" boundary the rest of the
//! fleet's resilience code follows, reduced to exactly the breaker the
//! minion registry needs.

pub mod circuit_breaker;
pub mod error;

pub use circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitState};
pub use error::ResilienceError;

pub mod prelude {
    pub use super::circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitState};
    pub use super::error::ResilienceError;
}
