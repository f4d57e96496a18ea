//! Budget DTOs

use pennywise_ledger::{parse_amount, parse_month, Budget, BudgetProgress, NewBudget};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

use super::transaction::amount_text;
use crate::error::ApiResult;

/// Create a budget for a category
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBudgetRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "category is required"))]
    #[schema(example = "food")]
    pub category: String,

    /// Non-negative limit, as a JSON number or numeric string
    #[schema(value_type = f64, example = 300)]
    pub limit: Value,

    /// `YYYY-MM`, defaults to the current month
    #[serde(default)]
    #[schema(example = "2024-01")]
    pub month: Option<String>,
}

impl CreateBudgetRequest {
    pub fn into_new_budget(self) -> ApiResult<NewBudget> {
        let limit = parse_amount("limit", &amount_text("limit", &self.limit)?)?;
        let month = self.month.as_deref().map(parse_month).transpose()?;

        Ok(NewBudget {
            category: self.category,
            limit,
            month,
        })
    }
}

/// A budget with its spending snapshot
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BudgetResponse {
    pub id: u64,
    pub category: String,
    #[schema(value_type = f64)]
    pub limit: Decimal,
    /// Category expenses at creation time
    #[schema(value_type = f64)]
    pub spent: Decimal,
    #[schema(example = "2024-01")]
    pub month: String,
}

impl From<Budget> for BudgetResponse {
    fn from(budget: Budget) -> Self {
        Self {
            id: budget.id,
            category: budget.category,
            limit: budget.limit,
            spent: budget.spent,
            month: budget.month,
        }
    }
}

/// A budget with the spending recorded in its month so far
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BudgetProgressResponse {
    pub id: u64,
    pub category: String,
    #[schema(value_type = f64)]
    pub limit: Decimal,
    /// Category expenses at creation time
    #[schema(value_type = f64)]
    pub spent: Decimal,
    #[schema(example = "2024-01")]
    pub month: String,
    /// Live category expenses dated within `month`
    #[schema(value_type = f64)]
    pub month_spent: Decimal,
    /// `limit - month_spent`
    #[schema(value_type = f64)]
    pub remaining: Decimal,
    /// Absent for a zero limit
    #[schema(value_type = Option<f64>, example = 42.5)]
    pub percent_used: Option<Decimal>,
    #[schema(example = "near_limit")]
    pub status: String,
    #[schema(example = "Near Limit")]
    pub status_label: String,
}

impl From<BudgetProgress> for BudgetProgressResponse {
    fn from(progress: BudgetProgress) -> Self {
        let budget = progress.budget;
        Self {
            id: budget.id,
            category: budget.category,
            limit: budget.limit,
            spent: budget.spent,
            month: budget.month,
            month_spent: progress.month_spent,
            remaining: progress.remaining,
            percent_used: progress.percent_used,
            status: progress.status.as_str().to_string(),
            status_label: progress.status.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_budget_request_conversion() {
        let req: CreateBudgetRequest =
            serde_json::from_value(json!({"category": "food", "limit": 300, "month": "2024-01"}))
                .unwrap();
        let new = req.into_new_budget().unwrap();
        assert_eq!(new.limit, dec!(300));
        assert_eq!(new.month.as_deref(), Some("2024-01"));
    }

    #[test]
    fn test_negative_limit_rejected() {
        let req: CreateBudgetRequest =
            serde_json::from_value(json!({"category": "food", "limit": -1})).unwrap();
        assert!(req.into_new_budget().is_err());
    }

    #[test]
    fn test_progress_response_shape() {
        let budget = Budget {
            id: 3,
            category: "food".to_string(),
            limit: dec!(100),
            spent: dec!(10),
            month: "2024-01".to_string(),
        };
        let response = BudgetProgressResponse::from(BudgetProgress::new(budget, dec!(85)));

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["spent"].as_f64(), Some(10.0));
        assert_eq!(json["month_spent"].as_f64(), Some(85.0));
        assert_eq!(json["percent_used"].as_f64(), Some(85.0));
        assert_eq!(json["status"], "near_limit");
        assert_eq!(json["status_label"], "Near Limit");
    }
}
