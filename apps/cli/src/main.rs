use clap::Parser;
use std::process::ExitCode;
use wunderbar::cli::Cli;
use wunderbar::config::Config;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let config = match Config::from_cli(Cli::parse()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    wunderbar::init_tracing(config.verbosity);

    match wunderbar::run(&config) {
        Ok(outcome) => {
            println!("{}", wunderbar::summary(&outcome, &config.file, &config.deck));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
