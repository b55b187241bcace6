//! colalign CLI - match columns across tables by content.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};
use logging::{LogConfig, init_logging};

fn main() {
    let cli = Cli::parse();

    let log_config = LogConfig::from_verbosity(cli.verbose).with_log_file(cli.log_file.clone());
    if let Err(e) = init_logging(&log_config) {
        eprintln!("Error: failed to open log file: {}", e);
        std::process::exit(1);
    }

    let result = match cli.command {
        Commands::Profile { file, load, output } => commands::profile::run(file, load, output),

        Commands::Matrix {
            left,
            right,
            load,
            json,
        } => commands::matrix::run(left, right, load, json),

        Commands::Align {
            left,
            right,
            load,
            select,
            output,
            json,
        } => commands::align::run(left, right, load, select, output, json),

        Commands::Chain {
            files,
            load,
            select,
            json,
        } => commands::chain::run(files, load, select, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
