//! Summary and advice DTOs

use std::collections::BTreeMap;

use pennywise_advisor::Advice;
use pennywise_ledger::Summary;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Aggregate view of the ledger
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SummaryResponse {
    #[schema(value_type = f64)]
    pub income: Decimal,
    #[schema(value_type = f64)]
    pub expenses: Decimal,
    /// `income - expenses`
    #[schema(value_type = f64)]
    pub balance: Decimal,
    /// Expense totals per category
    #[schema(value_type = Object)]
    pub categories: BTreeMap<String, Decimal>,
    pub transaction_count: usize,
}

impl From<Summary> for SummaryResponse {
    fn from(summary: Summary) -> Self {
        Self {
            income: summary.income,
            expenses: summary.expenses,
            balance: summary.balance,
            categories: summary.categories,
            transaction_count: summary.transaction_count,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct AdviceRequest {
    /// Free-form question, passed to the provider verbatim. Missing or
    /// `null` means an empty question.
    #[serde(default)]
    #[schema(example = "How can I save more each month?")]
    pub query: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdviceResponse {
    pub advice: String,
    pub summary: SummaryResponse,
}

impl From<Advice> for AdviceResponse {
    fn from(advice: Advice) -> Self {
        Self {
            advice: advice.advice,
            summary: advice.summary.into(),
        }
    }
}
