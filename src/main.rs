/*!
 * `hashforge <input_file>` — reads one hash per line, dispatches cracking
 * jobs against the configured minion fleet, and writes both a JSON
 * output file and a human-readable console line per hash.
 *
 * Exit code is 0 on completion, even when individual hashes end up
 * FAILED or INVALID_INPUT; non-zero only on startup failure (bad
 * config, unreadable input file).
 */

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use hashforge::{input, logging, output, Cache, MasterConfig, MinionClient, MinionRegistry, Orchestrator};
use hashforge_resilience::CircuitBreakerConfig;
use hashforge_scheme::SchemeRegistry;

#[derive(Parser, Debug)]
#[command(name = "hashforge", about = "Distributed MD5 preimage cracking master")]
struct Args {
    /// Path to the input file, one hash per line.
    input_file: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logging();
    let args = Args::parse();

    let config = MasterConfig::from_env()?;
    let lines = input::parse_input_file(&args.input_file)?;

    let cache = Arc::new(Cache::new());
    let registry = Arc::new(MinionRegistry::new(
        config.minion_urls.clone(),
        CircuitBreakerConfig {
            failure_threshold: config.minion_failure_threshold,
            open_duration: config.minion_breaker_open_seconds,
        },
    ));
    let client = Arc::new(MinionClient::new());
    let schemes = Arc::new(SchemeRegistry::with_builtins());

    let output_path = PathBuf::from(&config.output_file);
    let orchestrator = Orchestrator::new(config, cache, registry, client, schemes);

    let records = orchestrator.run(lines).await;

    for (hash, record) in &records {
        println!("{}", record.console_line(hash));
    }
    output::write_output_file(&output_path, &records)?;

    Ok(())
}
