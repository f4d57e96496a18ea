//! Ledger record types and input parsing

use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{LedgerError, Result};

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl FromStr for TransactionKind {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(LedgerError::validation(
                "type",
                format!("expected 'income' or 'expense', got '{}'", other),
            )),
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

/// A recorded income or expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// The transaction's calendar month, `YYYY-MM`
    pub fn month(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }
}

/// A category budget for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: u64,
    pub category: String,
    pub limit: Decimal,
    /// Expense total for the category when the budget was created
    pub spent: Decimal,
    /// Calendar month, `YYYY-MM`
    pub month: String,
}

/// How a budget's month is going
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    OnTrack,
    /// More than 80% of the limit used
    NearLimit,
    /// More than 100% of the limit used
    OverBudget,
}

impl BudgetStatus {
    /// Wire name, matching the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnTrack => "on_track",
            Self::NearLimit => "near_limit",
            Self::OverBudget => "over_budget",
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OnTrack => write!(f, "On Track"),
            Self::NearLimit => write!(f, "Near Limit"),
            Self::OverBudget => write!(f, "Over Budget"),
        }
    }
}

const NEAR_LIMIT_PERCENT: Decimal = Decimal::from_parts(80, 0, 0, false, 0);

/// A budget alongside the expenses recorded in its month so far
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetProgress {
    pub budget: Budget,
    /// Live expense total for the category within `budget.month`
    pub month_spent: Decimal,
    /// Limit minus `month_spent`, negative when overspent
    pub remaining: Decimal,
    /// Share of the limit used, one decimal place. `None` for a zero limit.
    pub percent_used: Option<Decimal>,
    pub status: BudgetStatus,
}

impl BudgetProgress {
    pub fn new(budget: Budget, month_spent: Decimal) -> Self {
        let percent = month_spent
            .checked_div(budget.limit)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED));

        let status = match percent {
            Some(p) if p > Decimal::ONE_HUNDRED => BudgetStatus::OverBudget,
            Some(p) if p > NEAR_LIMIT_PERCENT => BudgetStatus::NearLimit,
            Some(_) => BudgetStatus::OnTrack,
            // Zero limit, or a ratio too large to represent
            None if month_spent.is_zero() => BudgetStatus::OnTrack,
            None => BudgetStatus::OverBudget,
        };

        Self {
            remaining: budget.limit - month_spent,
            percent_used: percent.map(|p| p.round_dp(1).normalize()),
            month_spent,
            status,
            budget,
        }
    }
}

/// Input for [`crate::LedgerStore::append_transaction`]
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub category: String,
    pub description: String,
    /// Defaults to today's local date
    pub date: Option<NaiveDate>,
}

/// Input for [`crate::LedgerStore::append_budget`]
#[derive(Debug, Clone)]
pub struct NewBudget {
    pub category: String,
    pub limit: Decimal,
    /// Defaults to the current `YYYY-MM`
    pub month: Option<String>,
}

/// Parse a user-supplied monetary value.
///
/// Accepts plain decimals (`"12.50"`) and scientific notation (`"1e3"`).
/// Negative values are rejected.
pub fn parse_amount(field: &str, raw: &str) -> Result<Decimal> {
    let raw = raw.trim();
    let value = Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| LedgerError::validation(field, format!("'{}' is not a number", raw)))?;

    ensure_non_negative(field, value)?;
    Ok(value.normalize())
}

pub(crate) fn ensure_non_negative(field: &str, value: Decimal) -> Result<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(LedgerError::validation(field, "must not be negative"));
    }
    Ok(())
}

/// Parse an ISO-8601 calendar date (`YYYY-MM-DD`)
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| LedgerError::validation("date", format!("'{}' is not a YYYY-MM-DD date", raw)))
}

/// Parse and normalize a budget month (`YYYY-MM`)
pub fn parse_month(raw: &str) -> Result<String> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(&format!("{}-01", raw), "%Y-%m-%d")
        .map(|d| d.format("%Y-%m").to_string())
        .map_err(|_| LedgerError::validation("month", format!("'{}' is not a YYYY-MM month", raw)))
}

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub(crate) fn current_month() -> String {
    Local::now().format("%Y-%m").to_string()
}
