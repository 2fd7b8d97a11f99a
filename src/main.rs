//! httpbin-worker: an HTTP request echo service.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ request id ─▶ trace ─▶ limits/timeout ─▶ routing table
//!                                                                  │
//!                          ┌───────────────┬──────────────┬────────┴──────┐
//!                          ▼               ▼              ▼               ▼
//!                        echo         fixed content     gzip          status
//!                   (/get, /post…)  (/html, /image/*,  (/gzip)    (/status/{code})
//!                                    /json, /jsonp)
//!     Client Response
//!     ◀────────────── request id ◀─ metrics ◀─────────────── handler response
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use httpbin_worker::config::{load_config, validate_config, ConfigError, ServiceConfig};
use httpbin_worker::lifecycle::{wait_for_signal, Shutdown};
use httpbin_worker::observability::{init_logging, init_metrics};
use httpbin_worker::HttpServer;

#[derive(Parser)]
#[command(name = "httpbin-worker")]
#[command(about = "HTTP request echo service", version)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

/// Load the configuration file (or defaults) and apply command-line overrides.
fn resolve_config(cli: Cli) -> Result<ServiceConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = resolve_config(Cli::parse())?;

    init_logging(&config.observability);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "httpbin-worker starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_connections = config.listener.max_connections,
        request_timeout_secs = config.timeouts.request_secs,
        max_body_bytes = config.limits.max_body_bytes,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        wait_for_signal().await;
        shutdown.trigger();
    });

    HttpServer::new(config).run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_gives_defaults() {
        let config = resolve_config(Cli::parse_from(["httpbin-worker"])).unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8787");
    }

    #[test]
    fn test_bind_override_is_applied() {
        let cli = Cli::parse_from(["httpbin-worker", "--bind", "127.0.0.1:9000"]);
        let config = resolve_config(cli).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
    }

    #[test]
    fn test_invalid_bind_override_is_rejected() {
        let cli = Cli::parse_from(["httpbin-worker", "--bind", "nope"]);
        match resolve_config(cli) {
            Err(ConfigError::Validation(errors)) => assert_eq!(errors.len(), 1),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
