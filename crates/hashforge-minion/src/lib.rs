pub mod cancellation;
pub mod config;
pub mod error;
pub mod server;
pub mod worker;

pub use cancellation::CancellationRegistry;
pub use config::MinionConfig;
pub use error::MinionError;
pub use server::{build_router, AppState};
