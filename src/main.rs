mod app;
mod cli;
mod commands;
mod config;
mod error;
mod output;
mod tui;

use std::fs::File;
use std::sync::Mutex;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::filter::LevelFilter;

use cli::{Cli, Command};
use config::AppConfig;
use error::AppError;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // A missing .env is fine.
    let _ = dotenvy::dotenv();

    let args = Cli::parse();
    let config = AppConfig::from_cli(&args);

    if let Err(e) = init_tracing(&args, &config) {
        eprintln!("failed to initialize logging: {e}");
        std::process::exit(1);
    }

    info!(
        server = %config.server_url,
        data_dir = %config.data_dir.display(),
        "bankdash starting"
    );

    let cancel = setup_signal_handlers();

    let result = match args.command {
        Command::Tui => tui::run(&config, cancel).await,
        Command::Session(command) => {
            tokio::select! {
                res = commands::run(&config, command, args.json) => res,
                _ = cancel.cancelled() => {
                    info!("interrupted");
                    Ok(())
                }
            }
        }
    };

    if let Err(e) = result {
        error!("{e}");
        std::process::exit(1);
    }
}

/// Log to stderr, or to a file while the TUI owns the terminal.
fn init_tracing(args: &Cli, config: &AppConfig) -> Result<(), AppError> {
    let filter = args
        .log_level
        .parse::<LevelFilter>()
        .unwrap_or(LevelFilter::INFO);

    let builder = tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_target(false);

    if matches!(args.command, Command::Tui) {
        std::fs::create_dir_all(&config.data_dir)?;
        let file = File::options()
            .create(true)
            .append(true)
            .open(config.log_path())?;
        builder.with_ansi(false).with_writer(Mutex::new(file)).init();
    } else {
        builder.with_writer(std::io::stderr).init();
    }
    Ok(())
}

/// Cancel on SIGINT, and on SIGTERM where available.
fn setup_signal_handlers() -> CancellationToken {
    let cancel = CancellationToken::new();

    let cancel_clone = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("received SIGINT, shutting down");
            cancel_clone.cancel();
        }
    });

    #[cfg(unix)]
    {
        let cancel_clone = cancel.clone();
        tokio::spawn(async move {
            use tokio::signal::unix::{signal, SignalKind};
            match signal(SignalKind::terminate()) {
                Ok(mut sig) => {
                    sig.recv().await;
                    info!("received SIGTERM, shutting down");
                    cancel_clone.cancel();
                }
                Err(e) => error!(error = %e, "failed to register SIGTERM handler"),
            }
        });
    }

    cancel
}
