use clap::Parser;
use hashforge_minion::{build_router, AppState, CancellationRegistry, MinionConfig};
use hashforge_scheme::SchemeRegistry;
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Minion: enumerates candidate passwords over an assigned index range.
#[derive(Parser, Debug)]
#[command(name = "hashforge-minion", version)]
struct Args {
    /// Address to bind the HTTP surface to, overrides MINION_BIND_ADDR.
    #[arg(long)]
    bind: Option<String>,

    /// Worker threads per crack request, overrides WORKER_THREADS.
    #[arg(long)]
    worker_threads: Option<usize>,
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("hashforge_minion=info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();

    let mut config = MinionConfig::from_env();
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(worker_threads) = args.worker_threads {
        config.worker_threads = worker_threads;
    }

    let state = AppState {
        schemes: Arc::new(SchemeRegistry::with_builtins()),
        cancellation: Arc::new(CancellationRegistry::new()),
        config: Arc::new(config.clone()),
    };

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, worker_threads = config.worker_threads, "minion listening");
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}
