mod cli;
mod commands;
mod config;
mod logging;

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tally_logging::tally_error;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    let config = match config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err:#}");
            return ExitCode::FAILURE;
        }
    };
    let settings = config::Settings::resolve(&cli, &config);
    logging::initialize(settings.log_destination, settings.log_level);

    let stdout = io::stdout();
    match commands::run(&cli.command, &settings, &mut stdout.lock()) {
        Ok(commands::Outcome::Success) => ExitCode::SUCCESS,
        Ok(commands::Outcome::Mismatch) => ExitCode::FAILURE,
        Err(err) => {
            tally_error!("{err:#}");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
