//! `tempocue` - Resistance-training tempo timer

use clap::Parser;
use tokio_util::sync::CancellationToken;

use tempocue::cli::args::Cli;
use tempocue::cli::commands;
use tempocue::error::ExitCode;
use tempocue::observability::init_logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if !cli.quiet {
        init_logging(cli.log_format, cli.verbose, cli.color);
    }

    let cancel = CancellationToken::new();

    // First signal stops the session; a second one exits immediately
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        let mut sigterm =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(s) => s,
                Err(e) => {
                    tracing::warn!(error = %e, "failed to register SIGTERM handler");
                    if tokio::signal::ctrl_c().await.is_ok() {
                        signal_cancel.cancel();
                    }
                    return;
                }
            };

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }

        eprintln!("\nStopping session... (press Ctrl+C again to force)");
        signal_cancel.cancel();

        tokio::select! {
            _ = tokio::signal::ctrl_c() => std::process::exit(ExitCode::INTERRUPTED),
            _ = sigterm.recv() => std::process::exit(ExitCode::TERMINATED),
        }
    });

    let result = commands::dispatch(cli, cancel).await;

    match result {
        Ok(()) => std::process::exit(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
