//! Envstack CLI entry point.

use clap::Parser;
use std::process::ExitCode;

use envstack::cli::commands::{check, loader_for, show};
use envstack::cli::{handle_error, Cli, Commands};
use envstack::infrastructure::config::SettingsLoader;
use envstack::infrastructure::logging::LoggerImpl;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let json = cli.json;

    let settings = SettingsLoader::load().unwrap_or_else(|err| handle_error(&err, json));
    let logger = LoggerImpl::init(&settings.logging).unwrap_or_else(|err| handle_error(&err, json));

    let loader = loader_for(&cli, &settings);
    let result = match cli.command {
        Commands::Check(args) => check::execute(args, &loader, settings.reveal_secrets, json),
        Commands::Show(args) => {
            show::execute(args, &loader, settings.reveal_secrets, json).map(|()| true)
        }
    };

    // Flush buffered file logs before any exit.
    drop(logger);

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => handle_error(&err, json),
    }
}
