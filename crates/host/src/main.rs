use std::net::TcpListener;
use std::path::PathBuf;

use anyhow::Context;
use battbrrr_host::api::{self, AppState};
use battbrrr_host::config::Config;
use tokio::signal;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_help() {
    println!("battbrrr-preview - local preview of the BattBrrr controller web UI");
    println!();
    println!("USAGE:");
    println!("    battbrrr-preview [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <PATH>   Read config from PATH");
    println!("        --init-config     Write a default config file and exit");
    println!("    -v, --version         Print version");
    println!("    -h, --help            Print this help");
    println!();
    println!("Default config: {}", Config::default_config_path().display());
}

/// Graceful start: Check if port is available
fn check_port_available(bind: &str, port: u16) -> bool {
    TcpListener::bind(format!("{bind}:{port}")).is_ok()
}

/// Graceful start: Find available port starting from default
fn find_available_port(bind: &str, start: u16) -> Option<u16> {
    (start..start.saturating_add(10)).find(|&port| check_port_available(bind, port))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging (tracing)
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<PathBuf> = None;
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--version" | "-v" => {
                println!("battbrrr-preview {VERSION}");
                return Ok(());
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--init-config" => {
                Config::create_default_if_missing()?;
                println!("Config at {}", Config::default_config_path().display());
                return Ok(());
            }
            "--config" | "-c" => {
                let path = iter.next().context("--config needs a path")?;
                config_path = Some(PathBuf::from(path));
            }
            other => anyhow::bail!("unknown argument '{other}' (see --help)"),
        }
    }

    let config = match config_path {
        Some(path) => Config::load_from_path(&path)?,
        None => Config::load(),
    };

    let bind = config.server.bind.clone();
    let http_port = if check_port_available(&bind, config.server.http_port) {
        config.server.http_port
    } else {
        let port = find_available_port(&bind, config.server.http_port.saturating_add(1))
            .with_context(|| format!("no free port near {}", config.server.http_port))?;
        tracing::warn!(requested = config.server.http_port, port, "port busy, using fallback");
        port
    };

    tracing::info!(
        device = %config.device.name,
        version = %config.device.version,
        "serving preview"
    );

    let app = api::router(AppState::new(config));
    let addr = format!("{bind}:{http_port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    eprintln!();
    eprintln!("  > Open: http://{addr}");
    eprintln!("  Press Ctrl+C to stop");
    eprintln!();

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
