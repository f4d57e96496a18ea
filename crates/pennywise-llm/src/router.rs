//! LLM Router - Ordered provider fallback chain

use std::sync::Arc;
use std::time::Duration;

use crate::providers::*;
use crate::types::*;

/// Per-call timeout applied to every provider
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// The LLM Router tries each provider in order until one succeeds
pub struct LLMRouter {
    providers: Vec<Arc<dyn LLMProvider>>,
    timeout: Duration,
}

impl LLMRouter {
    /// Create a router over an explicit provider order
    pub fn new(providers: Vec<Arc<dyn LLMProvider>>) -> Self {
        Self {
            providers,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create a router from environment variables
    ///
    /// Reads `PENNYWISE_LLM_PROVIDERS` for the fallback order
    /// (default `euri,groq`). Provider credentials come from
    /// `EURI_API_BASE`, `EURI_API_TOKEN` and `GROQ_API_KEY`.
    pub fn from_env() -> Self {
        // Try to load .env file (ignore errors)
        let _ = dotenvy::dotenv();

        let order = std::env::var("PENNYWISE_LLM_PROVIDERS")
            .unwrap_or_else(|_| "euri,groq".to_string());

        let mut builder = LLMRouterBuilder::new();
        for kind in ProviderKind::parse_list(&order) {
            builder = match kind {
                ProviderKind::Euri => builder.with_euri(EuriConfig::from_env()),
                ProviderKind::Groq => builder.with_groq(GroqConfig::from_env()),
            };
        }
        builder.build()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Providers in fallback order
    pub fn providers(&self) -> &[Arc<dyn LLMProvider>] {
        &self.providers
    }

    pub fn kinds(&self) -> Vec<ProviderKind> {
        self.providers.iter().map(|p| p.kind()).collect()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Try each provider in order, returning the first success.
    ///
    /// Failures are logged and skipped. Returns `None` when every provider
    /// failed (or none is configured).
    pub async fn complete_with_fallback(
        &self,
        request: CompletionRequest,
    ) -> Option<(CompletionResponse, ProviderKind)> {
        for provider in &self.providers {
            match provider.complete(request.clone(), self.timeout).await {
                Ok(response) => {
                    tracing::debug!(provider = %provider.kind(), "Provider answered");
                    return Some((response, provider.kind()));
                }
                Err(e) => {
                    tracing::warn!(
                        provider = %provider.kind(),
                        error = %e,
                        "Provider {} failed, trying next",
                        provider.name()
                    );
                }
            }
        }

        tracing::warn!(
            attempted = self.providers.len(),
            "All LLM providers failed"
        );
        None
    }
}

/// Builder for LLM router with explicit configuration
pub struct LLMRouterBuilder {
    providers: Vec<Arc<dyn LLMProvider>>,
    timeout: Duration,
}

impl LLMRouterBuilder {
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Append any provider to the chain
    pub fn with_provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    pub fn with_euri(self, config: EuriConfig) -> Self {
        self.with_provider(Arc::new(EuriProvider::new(config)))
    }

    pub fn with_groq(self, config: GroqConfig) -> Self {
        self.with_provider(Arc::new(GroqProvider::new(config)))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> LLMRouter {
        LLMRouter::new(self.providers).with_timeout(self.timeout)
    }
}

impl Default for LLMRouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
