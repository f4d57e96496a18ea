//! Pennywise Advisor - Financial advice over the ledger summary
//!
//! The advisor turns the current [`Summary`] and a free-form question into a
//! prompt, then asks the configured providers in order. It never fails:
//! when every provider is down the caller gets [`FALLBACK_ADVICE`].

use pennywise_ledger::{LedgerStore, Summary};
use pennywise_llm::{CompletionRequest, LLMRouter, ProviderKind};
use rust_decimal::Decimal;

/// Returned when no provider produced an answer
pub const FALLBACK_ADVICE: &str = "Unable to get AI advice at the moment.";

/// Advice together with the summary it was based on
#[derive(Debug, Clone)]
pub struct Advice {
    pub advice: String,
    pub summary: Summary,
    /// Provider that answered, `None` for the fallback text
    pub provider: Option<ProviderKind>,
}

/// Gateway between the ledger and the LLM providers
pub struct AdviceGateway {
    ledger: LedgerStore,
    llm: LLMRouter,
}

impl AdviceGateway {
    pub fn new(ledger: LedgerStore, llm: LLMRouter) -> Self {
        Self { ledger, llm }
    }

    pub fn providers(&self) -> Vec<ProviderKind> {
        self.llm.kinds()
    }

    /// Answer `query` using the current ledger summary
    pub async fn advise(&self, query: &str) -> Advice {
        let summary = self.ledger.summarize().await;
        let prompt = build_prompt(&summary, query);

        match self
            .llm
            .complete_with_fallback(CompletionRequest::prompt(prompt))
            .await
        {
            Some((response, provider)) => {
                tracing::info!(provider = %provider, "Advice generated");
                Advice {
                    advice: response.content,
                    summary,
                    provider: Some(provider),
                }
            }
            None => Advice {
                advice: FALLBACK_ADVICE.to_string(),
                summary,
                provider: None,
            },
        }
    }

    /// Advice text only
    pub async fn get_advice(&self, query: &str) -> String {
        self.advise(query).await.advice
    }
}

/// Render the advice prompt for a summary and a user question
pub fn build_prompt(summary: &Summary, query: &str) -> String {
    format!(
        "Financial Summary:\n\
         - Income: {}\n\
         - Expenses: {}\n\
         - Balance: {}\n\
         - Transactions: {}\n\
         \n\
         Question: {}\n\
         \n\
         Provide helpful financial advice.",
        dollars(summary.income),
        dollars(summary.expenses),
        dollars(summary.balance),
        summary.transaction_count,
        query
    )
}

fn dollars(value: Decimal) -> String {
    format!("${:.2}", value.round_dp(2))
}
