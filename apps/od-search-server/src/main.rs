#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::path::PathBuf;

use clap::Parser;
use mimalloc::MiMalloc;

mod config;
mod logging;
mod server;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Authorization-aware search server for a drive-backed file index
#[derive(Debug, Parser)]
#[command(name = "od-search-server", version, about)]
struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override `server.bind_addr`
    #[arg(long, value_name = "ADDR")]
    bind: Option<String>,

    /// Print the effective configuration (secrets redacted) and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut cfg = config::load(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        cfg.server.bind_addr = bind;
    }

    if cli.print_config {
        println!("{cfg:#?}");
        return Ok(());
    }

    logging::init_tracing(&cfg.logging)?;
    tracing::info!(
        protected_routes = cfg.search.protected_routes.len(),
        "Starting od-search-server"
    );

    server::run(cfg).await
}
