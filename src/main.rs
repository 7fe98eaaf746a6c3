//! Memento: life-expectancy countdown.
//!
//! Main entry point for the command line tool.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use memento::adapters::sanitize::sanitized_fmt_layer;
use memento::cli::{self, Cli};

fn main() -> ExitCode {
    // Logs go to stderr so stdout carries only the report.
    // Quiet by default; raise with RUST_LOG=info or RUST_LOG=memento=debug.
    let (writer, _guard) = tracing_appender::non_blocking(std::io::stderr());

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(sanitized_fmt_layer(writer))
        .init();

    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(err) => match cli::attribute_error(&err) {
            Some(attr_err) => {
                eprintln!("error: {attr_err}\n\nFor more information, try '--help'.");
                return ExitCode::from(cli::EXIT_USAGE);
            }
            // --help and --version print and exit 0; other usage errors exit 2.
            None => err.exit(),
        },
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!("Run failed: {:?}", err);
            eprintln!("error: {err:#}");
            ExitCode::from(cli::exit_code(&err))
        }
    }
}

fn run(args: &Cli) -> Result<()> {
    tracing::info!("Starting memento...");
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    cli::run(args, &mut out)
}
