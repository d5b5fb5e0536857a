//! wspoll - bounded-retry poller for cloud IDE workspace lifecycles

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use wspoll_cli::cli::Cli;
use wspoll_cli::domain::error::error_code;
use wspoll_cli::output::json::format_error;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let json = cli.json;

    // Logs go to stderr so stdout stays parseable.
    let filter = if cli.verbose {
        EnvFilter::new("wspoll_cli=debug,warn")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            if json {
                match format_error(&format!("{e:#}"), error_code(&e)) {
                    Ok(out) => println!("{out}"),
                    Err(_) => eprintln!("Error: {e:#}"),
                }
            } else {
                eprintln!("Error: {e:#}");
            }
            ExitCode::FAILURE
        }
    }
}
