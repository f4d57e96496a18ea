//! Transaction DTOs

use chrono::NaiveDate;
use pennywise_ledger::{parse_amount, parse_date, NewTransaction, Transaction, TransactionKind};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{ApiError, ApiResult};

/// Record a transaction
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTransactionRequest {
    /// `income` or `expense`
    #[serde(rename = "type")]
    #[schema(example = "expense")]
    pub kind: String,

    /// Non-negative amount, as a JSON number or numeric string
    #[schema(value_type = f64, example = 42.5)]
    pub amount: Value,

    #[serde(default)]
    #[validate(length(min = 1, message = "category is required"))]
    #[schema(example = "food")]
    pub category: String,

    #[serde(default)]
    pub description: String,

    /// `YYYY-MM-DD`, defaults to today
    #[serde(default)]
    #[schema(example = "2024-01-02")]
    pub date: Option<String>,
}

impl CreateTransactionRequest {
    /// Convert raw request values into a ledger entry
    pub fn into_new_transaction(self) -> ApiResult<NewTransaction> {
        let kind: TransactionKind = self.kind.parse()?;
        let amount = parse_amount("amount", &amount_text("amount", &self.amount)?)?;
        let date = self.date.as_deref().map(parse_date).transpose()?;

        Ok(NewTransaction {
            kind,
            amount,
            category: self.category,
            description: self.description,
            date,
        })
    }
}

/// Render a JSON amount as text for decimal parsing.
///
/// Numbers and strings are accepted; anything else is a validation error.
pub(crate) fn amount_text(field: &str, value: &Value) -> ApiResult<String> {
    match value {
        Value::Number(n) => Ok(n.to_string()),
        Value::String(s) => Ok(s.clone()),
        _ => Err(ApiError::Validation(format!(
            "Invalid {}: must be a number",
            field
        ))),
    }
}

/// A recorded transaction
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TransactionResponse {
    pub id: u64,
    #[serde(rename = "type")]
    #[schema(example = "expense")]
    pub kind: String,
    #[schema(value_type = f64)]
    pub amount: Decimal,
    pub category: String,
    pub description: String,
    #[schema(value_type = String, example = "2024-01-02")]
    pub date: NaiveDate,
}

impl From<Transaction> for TransactionResponse {
    fn from(tx: Transaction) -> Self {
        Self {
            id: tx.id,
            kind: tx.kind.to_string(),
            amount: tx.amount,
            category: tx.category,
            description: tx.description,
            date: tx.date,
        }
    }
}
