//! Aggregate view over the ledger's transactions

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Transaction, TransactionKind};

/// Income, expense and per-category totals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
    /// Expense totals keyed by category
    pub categories: BTreeMap<String, Decimal>,
    pub transaction_count: usize,
}

impl Summary {
    /// Fold a set of transactions in a single pass.
    ///
    /// Totals saturate at `Decimal::MAX`; [`crate::LedgerStore`] refuses
    /// appends that would get there.
    pub fn from_transactions<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut summary = Summary::default();

        for tx in transactions {
            summary.transaction_count += 1;
            match tx.kind {
                TransactionKind::Income => {
                    summary.income = summary.income.saturating_add(tx.amount)
                }
                TransactionKind::Expense => {
                    summary.expenses = summary.expenses.saturating_add(tx.amount);
                    let total = summary
                        .categories
                        .entry(tx.category.clone())
                        .or_insert(Decimal::ZERO);
                    *total = total.saturating_add(tx.amount);
                }
            }
        }

        summary.balance = summary.income - summary.expenses;
        summary
    }

    /// Expense total for one category (zero when absent)
    pub fn category_total(&self, category: &str) -> Decimal {
        self.categories.get(category).copied().unwrap_or(Decimal::ZERO)
    }
}
