mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    // Already installed is fine; reqwest only needs one provider.
    let _ = rustls::crypto::ring::default_provider().install_default();

    let cli = Cli::parse();

    if cli.verbose {
        artifactz_core::logging::init_verbose();
    } else {
        artifactz_core::logging::init();
    }

    match commands::run(cli).await {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            tracing::error!(error = %e, "artifactz failed before reaching the registry");
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}
