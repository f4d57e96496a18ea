//! Server Configuration
//!
//! Configuration management for the Pennywise server.
//! Supports environment variables, config files, and CLI arguments.

use std::net::SocketAddr;
use std::time::Duration;

use pennywise_api::ApiConfig;
use pennywise_llm::{EuriConfig, GroqConfig, LLMRouter, LLMRouterBuilder, ProviderKind};
use serde::{Deserialize, Serialize};

/// Server configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server binding configuration
    #[serde(default)]
    pub server: ServerSettings,

    /// API configuration
    #[serde(default)]
    pub api: ApiSettings,

    /// Advice provider configuration
    #[serde(default)]
    pub providers: ProviderSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server binding settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerSettings {
    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|e| anyhow::anyhow!("Invalid socket address {}: {}", addr, e))
    }
}

/// API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// CORS allowed origins
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Enable response compression
    #[serde(default = "default_true")]
    pub enable_compression: bool,

    /// Enable request tracing
    #[serde(default = "default_true")]
    pub enable_tracing: bool,

    /// Maximum request body size in bytes
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            enable_cors: true,
            cors_origins: default_cors_origins(),
            enable_compression: true,
            enable_tracing: true,
            max_body_size: default_max_body_size(),
        }
    }
}

impl From<&ApiSettings> for ApiConfig {
    fn from(settings: &ApiSettings) -> Self {
        Self {
            enable_cors: settings.enable_cors,
            cors_origins: settings.cors_origins.clone(),
            enable_compression: settings.enable_compression,
            enable_tracing: settings.enable_tracing,
            max_body_size: settings.max_body_size,
        }
    }
}

/// Chat-completion provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Fallback order, first entry is tried first
    #[serde(default = "default_provider_order")]
    pub order: Vec<String>,

    /// Euri API base; Euri is skipped at call time when unset
    #[serde(default)]
    pub euri_api_base: Option<String>,

    #[serde(default)]
    pub euri_api_token: Option<String>,

    #[serde(default = "default_euri_model")]
    pub euri_model: String,

    #[serde(default = "default_groq_api_base")]
    pub groq_api_base: String,

    #[serde(default)]
    pub groq_api_key: Option<String>,

    #[serde(default = "default_groq_model")]
    pub groq_model: String,

    /// Per-call timeout in seconds
    #[serde(default = "default_provider_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            order: default_provider_order(),
            euri_api_base: None,
            euri_api_token: None,
            euri_model: default_euri_model(),
            groq_api_base: default_groq_api_base(),
            groq_api_key: None,
            groq_model: default_groq_model(),
            timeout_secs: default_provider_timeout(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl ProviderSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Provider kinds in fallback order, unknown names dropped
    pub fn kinds(&self) -> Vec<ProviderKind> {
        ProviderKind::parse_list(&self.order.join(","))
    }

    /// Build the fallback chain described by these settings
    pub fn build_router(&self) -> LLMRouter {
        let mut builder = LLMRouterBuilder::new().with_timeout(self.timeout());

        for kind in self.kinds() {
            builder = match kind {
                ProviderKind::Euri => builder.with_euri(EuriConfig {
                    base_url: self.euri_api_base.clone(),
                    api_token: self.euri_api_token.clone(),
                    model: self.euri_model.clone(),
                    max_tokens: self.max_tokens,
                }),
                ProviderKind::Groq => builder.with_groq(GroqConfig {
                    base_url: self.groq_api_base.clone(),
                    api_key: self.groq_api_key.clone(),
                    model: self.groq_model.clone(),
                    max_tokens: self.max_tokens,
                    ..Default::default()
                }),
            };
        }

        builder.build()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json, pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// =============================================================================
// Default Functions
// =============================================================================

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_max_body_size() -> usize {
    1024 * 1024 // 1MB
}

fn default_provider_order() -> Vec<String> {
    vec!["euri".to_string(), "groq".to_string()]
}

fn default_euri_model() -> String {
    EuriConfig::default().model
}

fn default_groq_api_base() -> String {
    GroqConfig::default().base_url
}

fn default_groq_model() -> String {
    GroqConfig::default().model
}

fn default_provider_timeout() -> u64 {
    10
}

fn default_max_tokens() -> u32 {
    pennywise_llm::DEFAULT_MAX_TOKENS
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_true() -> bool {
    true
}

// =============================================================================
// Configuration Loading
// =============================================================================

impl ServerConfig {
    /// Load configuration from environment and optional config file
    ///
    /// Later sources win: `config/default`, `config/local`, the explicit
    /// file, then `PENNYWISE__SECTION__KEY` environment variables.
    pub fn load(config_path: Option<&str>) -> anyhow::Result<Self> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false));

        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path).required(true));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("PENNYWISE")
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("providers.order")
                .with_list_parse_key("api.cors_origins")
                .try_parsing(true),
        );

        let server_config: ServerConfig = builder.build()?.try_deserialize()?;
        Ok(server_config)
    }
}
