pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use quotewire_core::config::AppConfig;

#[derive(Debug, Parser)]
#[command(
    name = "quotewire",
    about = "Quotewire operator CLI",
    long_about = "Submit insurance quote requests to the PBS quoting service and inspect the \
                  effective configuration.",
    after_help = "Examples:\n  quotewire submit --demo\n  quotewire submit --name \"Molly Terrier\" --email foo@bar.com ...\n  quotewire config"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Submit one quote request and print the resulting quote number")]
    Submit(commands::submit::SubmitArgs),
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Submit(args) => commands::submit::run(args),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

/// Install the global subscriber once; later calls (tests, repeated command
/// runs) keep the first one.
pub(crate) fn init_logging(config: &AppConfig) {
    use quotewire_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    let builder = tracing_subscriber::fmt().with_target(false).with_max_level(log_level);
    match config.logging.format {
        Compact => {
            let _ = builder.compact().try_init();
        }
        Pretty => {
            let _ = builder.pretty().try_init();
        }
        Json => {
            let _ = builder.json().try_init();
        }
    }
}
