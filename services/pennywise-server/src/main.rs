//! Pennywise Server
//!
//! Personal finance tracker: transactions, category budgets, summaries and
//! AI financial advice over a JSON API.
//!
//! # Usage
//!
//! ```bash
//! # Start with default settings (0.0.0.0:5000)
//! pennywise-server
//!
//! # Start with custom config
//! pennywise-server --config /path/to/config.toml
//!
//! # Provider credentials
//! EURI_API_BASE=https://api.euron.one/api/v1/euri EURI_API_TOKEN=... GROQ_API_KEY=... pennywise-server
//!
//! # Environment overrides
//! PENNYWISE__SERVER__PORT=8080 pennywise-server
//! ```

mod config;

use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pennywise_api::{create_router, ApiConfig, AppState};
use pennywise_ledger::LedgerStore;

use crate::config::ServerConfig;

// =============================================================================
// CLI Arguments
// =============================================================================

/// Pennywise - personal finance tracker with AI advice
#[derive(Parser, Debug)]
#[command(name = "pennywise-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (TOML, JSON, or YAML)
    #[arg(short, long, env = "PENNYWISE_CONFIG")]
    config: Option<String>,

    /// Host to bind to
    #[arg(long, env = "PENNYWISE_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PENNYWISE_PORT")]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "PENNYWISE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format (json, pretty)
    #[arg(long, env = "PENNYWISE_LOG_FORMAT")]
    log_format: Option<String>,

    /// Euri API base URL
    #[arg(long, env = "EURI_API_BASE")]
    euri_api_base: Option<String>,

    /// Euri API token
    #[arg(long, env = "EURI_API_TOKEN", hide_env_values = true)]
    euri_api_token: Option<String>,

    /// Groq API key
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    groq_api_key: Option<String>,
}

impl Args {
    /// Apply CLI and environment overrides on top of loaded configuration
    fn apply(self, config: &mut ServerConfig) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }
        if let Some(format) = self.log_format {
            config.logging.format = format;
        }
        if let Some(base) = self.euri_api_base {
            config.providers.euri_api_base = Some(base);
        }
        if let Some(token) = self.euri_api_token {
            config.providers.euri_api_token = Some(token);
        }
        if let Some(key) = self.groq_api_key {
            config.providers.groq_api_key = Some(key);
        }
    }
}

// =============================================================================
// Main Entry Point
// =============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before clap reads env fallbacks
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    let mut server_config = ServerConfig::load(args.config.as_deref())?;
    args.apply(&mut server_config);

    init_logging(&server_config.logging)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting Pennywise server"
    );

    let llm = server_config.providers.build_router();
    log_providers(&server_config);

    let state = Arc::new(AppState::new(LedgerStore::new(), llm));
    let app = create_router(state, ApiConfig::from(&server_config.api));

    let addr = server_config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        host = %server_config.server.host,
        port = %server_config.server.port,
        "Server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

// =============================================================================
// Initialization Functions
// =============================================================================

/// Initialize tracing/logging
fn init_logging(config: &config::LoggingConfig) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.level))?;

    let subscriber = tracing_subscriber::registry().with(env_filter);

    match config.format.as_str() {
        "json" => subscriber
            .with(fmt::layer().json().with_target(true))
            .try_init()?,
        _ => subscriber
            .with(fmt::layer().pretty().with_target(true))
            .try_init()?,
    }

    Ok(())
}

/// Warn about providers that will fail every call for lack of credentials
fn log_providers(config: &ServerConfig) {
    let providers = &config.providers;
    let kinds = providers.kinds();

    if kinds.is_empty() {
        tracing::warn!("No advice providers configured, advice will use the fallback text");
    }

    for kind in kinds {
        let configured = match kind {
            pennywise_llm::ProviderKind::Euri => {
                providers.euri_api_base.is_some() && providers.euri_api_token.is_some()
            }
            pennywise_llm::ProviderKind::Groq => providers.groq_api_key.is_some(),
        };

        if configured {
            tracing::info!(provider = %kind, "Advice provider enabled");
        } else {
            tracing::warn!(provider = %kind, "Advice provider has no credentials");
        }
    }
}

// =============================================================================
// Graceful Shutdown
// =============================================================================

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
