//! Money Movement Engine CLI
//!
//! Applies withdrawals and transfers from a CSV file to a set of accounts.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --accounts accounts.csv operations.csv > result.csv
//! cargo run -- --accounts accounts.csv --strategy sync operations.csv > result.csv
//! cargo run -- --accounts accounts.csv --strategy async --batch-size 2000 --max-concurrent 8 operations.csv
//! cargo run -- --accounts accounts.csv --pay-in-limit 10000 --low-funds-limit 100 operations.csv
//! ```
//!
//! The final account states go to stdout. Logs, including user
//! notifications and skipped operations, go to stderr; set `RUST_LOG` to
//! change the level (default `info`).
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing arguments, file not found, malformed accounts file, etc.)

use money_movement_engine::cli;
use money_movement_engine::strategy;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();

    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy, config, args.to_account_limits())
    };

    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.accounts_file, &args.input_file, &mut output) {
        tracing::error!("{}", e);
        process::exit(1);
    }
}
