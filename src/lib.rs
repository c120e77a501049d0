/*!
 * hashforge - distributed MD5 preimage cracking master
 *
 * Coordinates a fleet of `hashforge-minion` workers to brute-force a
 * batch of MD5 password hashes against a named candidate scheme. See
 * `orchestrator` for the top-level flow and `scheduler` for the
 * per-job dispatch loop.
 */

pub mod cache;
pub mod config;
pub mod error;
pub mod input;
pub mod jobs;
pub mod logging;
pub mod minion_client;
pub mod minion_registry;
pub mod orchestrator;
pub mod output;
pub mod scheduler;

pub use cache::Cache;
pub use config::MasterConfig;
pub use error::{MasterError, Result};
pub use minion_client::MinionClient;
pub use minion_registry::MinionRegistry;
pub use orchestrator::Orchestrator;
