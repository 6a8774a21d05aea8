//! qmlprov - QML module provider helpers

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use qmlprov_cli::cmd;
use qmlprov_cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging. RUST_LOG wins over the verbosity flags.
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let config = cmd::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Scan { scan } => cmd::scan::scan(&scan, &config),
        Commands::Prl { plugin, path, link } => {
            cmd::prl::prl(&plugin, path.as_deref(), &link, &config)
        }
        Commands::Link { scan, link } => cmd::link::link(&scan, &link, &config),
        Commands::ImportPlugins { scan, output } => {
            cmd::import_plugins::import_plugins(&scan, output.as_deref(), &config)
        }
    }
}
