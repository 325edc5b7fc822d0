mod cli;
mod commands;
mod config;
mod error;
mod logging;

use crate::cli::{Cli, Commands};
use crate::error::Result;
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    info!("MolAtlas CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let data_dir = cli.data_dir.clone();
    let result = match cli.command {
        Commands::Profile(args) => commands::profile::run(&data_dir, &args),
        Commands::Density(args) => commands::density::run(&data_dir, &args),
    };

    if let Err(e) = &result {
        error!("Command failed: {}", e);
    }
    result
}
