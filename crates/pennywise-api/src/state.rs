//! Application state shared across handlers

use std::sync::Arc;

use pennywise_advisor::AdviceGateway;
use pennywise_ledger::LedgerStore;
use pennywise_llm::LLMRouter;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Transactions and budgets
    pub ledger: LedgerStore,
    /// Advice over the same ledger
    pub advisor: Arc<AdviceGateway>,
}

impl AppState {
    /// Create state over a ledger and a provider chain
    pub fn new(ledger: LedgerStore, llm: LLMRouter) -> Self {
        let advisor = Arc::new(AdviceGateway::new(ledger.clone(), llm));
        Self { ledger, advisor }
    }
}
