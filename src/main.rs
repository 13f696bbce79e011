//! Binary entrypoint for the PhotoShare kiosk carousel.
//!
//! Delegates all logic to the library crate; no local modules here.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tokio_util::sync::CancellationToken;
use tracing::{Level, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use photoshare_kiosk::net::HttpBackend;
use photoshare_kiosk::tasks::controller;
use photoshare_kiosk::{config, qr};

/// Simple CLI
#[derive(Debug, Parser)]
#[command(
    name = "photoshare-kiosk",
    about = "Unattended rotating photo display"
)]
struct Cli {
    /// Path to YAML config file
    #[arg(short, long, value_name = "FILE", default_value = "config.yaml")]
    config: PathBuf,

    /// Override rotation interval (ms)
    #[arg(long, value_name = "MILLIS")]
    rotation_ms: Option<u64>,

    /// Override polling interval (ms)
    #[arg(long, value_name = "MILLIS")]
    polling_ms: Option<u64>,

    /// Upload one photo to the backend, print the response, and exit
    #[arg(long, value_name = "FILE")]
    upload: Option<PathBuf>,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) {
    // map -v to log level
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("photoshare_kiosk={}", level).parse().unwrap());
    fmt().with_env_filter(filter).with_target(true).init();
}

fn spawn_signal_listener(cancel: CancellationToken) {
    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{SignalKind, signal};
            match signal(SignalKind::terminate()) {
                Ok(mut term) => {
                    tokio::select! {
                        _ = tokio::signal::ctrl_c() => {}
                        _ = term.recv() => {}
                    }
                }
                Err(_) => {
                    let _ = tokio::signal::ctrl_c().await;
                }
            }
        }
        #[cfg(not(unix))]
        {
            let _ = tokio::signal::ctrl_c().await;
        }
        info!("shutdown signal received");
        cancel.cancel();
    });
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut cfg = config::Configuration::from_yaml_file(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?
        .validated()
        .context("validating configuration")?;
    if let Some(ms) = cli.rotation_ms {
        cfg.rotation_interval = Duration::from_millis(ms);
    }
    if let Some(ms) = cli.polling_ms {
        cfg.polling_interval = Duration::from_millis(ms);
    }

    let backend = HttpBackend::new(&cfg)?;

    // One-shot upload path, mainly for smoke-testing a deployed backend.
    if let Some(file) = cli.upload {
        let body = backend
            .upload_photo(&file)
            .await
            .with_context(|| format!("uploading {}", file.display()))?;
        info!(response = %body, "upload accepted");
        return Ok(());
    }

    match qr::generate(&cfg) {
        Ok(path) => info!(path = %path.display(), "upload QR code written"),
        Err(err) => warn!(%err, "QR code generation failed; continuing without it"),
    }

    let cancel = CancellationToken::new();
    spawn_signal_listener(cancel.clone());

    let loader = backend.clone();
    controller::run(cfg, backend, loader, cancel).await
}
