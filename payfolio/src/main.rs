//! Payfolio CLI - check balances, transactions and insights from the terminal.
//!
//! Thin front end over the `payfolio` library: every subcommand is one or
//! two API calls, with the session kept in `~/.payfolio/session.json`.

mod cli;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{execute, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    execute(cli).await
}

/// `RUST_LOG` wins; otherwise `--verbose` turns on per-call debug logs.
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "payfolio=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
