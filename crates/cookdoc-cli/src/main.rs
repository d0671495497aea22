//! Cookdoc CLI: the `cookdoc` command.

mod cli;
mod commands;
mod config;
mod report;
mod support;

use clap::Parser;
use cli::{Cli, Commands};

const LOG_ENV: &str = "COOKDOC_LOG";

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose);

    let config = support::load_config_or_exit(cli.config.as_deref(), cli.cookbook_path);

    match cli.command {
        Commands::Check { json } => commands::check::run(&config, json),
        Commands::Inventory { json } => commands::inventory::run(&config, json),
    }
}

fn init_tracing(quiet: bool, verbose: bool) {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    if let Err(error) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("warning: failed to initialize logging: {error}");
    }
}
