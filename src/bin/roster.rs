//! Roster CLI Binary
//!
//! Command-line interface for the team member record table.

use clap::Parser;
use roster::config::ConfigLoader;
use roster::logging::init_logging;
use roster::tooling::cli::{Cli, CliContext};
use std::process;

fn main() {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(1);
        }
    };

    let logging = config.logging.clone().with_overrides(
        cli.log_level.as_deref(),
        cli.log_format.as_deref(),
        cli.log_output.as_deref(),
        cli.log_file.clone(),
    );
    if let Err(e) = init_logging(Some(&logging)) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let mut context = match CliContext::from_config(&config, cli.data_dir.clone(), cli.ephemeral)
    {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error opening table storage: {}", e);
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
