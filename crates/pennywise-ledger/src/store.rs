//! The shared ledger store

use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::RwLock;

use crate::summary::Summary;
use crate::types::*;
use crate::{LedgerError, Result};

#[derive(Debug, Default)]
struct Book {
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
    last_transaction_id: u64,
    last_budget_id: u64,
    /// Running income total, kept so appends can refuse to overflow it
    income: Decimal,
    /// Running expense total
    expenses: Decimal,
}

impl Book {
    fn spent_in_category(&self, category: &str) -> Decimal {
        self.spent_where(|t| t.category == category)
    }

    fn spent_in_month(&self, category: &str, month: &str) -> Decimal {
        self.spent_where(|t| t.category == category && t.month() == month)
    }

    // Bounded by `expenses`, which appends keep below Decimal::MAX
    fn spent_where(&self, pred: impl Fn(&Transaction) -> bool) -> Decimal {
        self.transactions
            .iter()
            .filter(|t| t.is_expense() && pred(t))
            .fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.amount))
    }

    fn total_mut(&mut self, kind: TransactionKind) -> &mut Decimal {
        match kind {
            TransactionKind::Income => &mut self.income,
            TransactionKind::Expense => &mut self.expenses,
        }
    }
}

/// The Pennywise ledger
///
/// Holds every transaction and budget in insertion order. Cloning the store
/// is cheap and every clone sees the same records.
#[derive(Debug, Clone, Default)]
pub struct LedgerStore {
    book: Arc<RwLock<Book>>,
}

impl LedgerStore {
    /// Create an empty in-memory ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a transaction
    pub async fn append_transaction(&self, new: NewTransaction) -> Result<Transaction> {
        ensure_non_negative("amount", new.amount)?;
        let category = required("category", new.category)?;

        let mut book = self.book.write().await;
        let total = book.total_mut(new.kind);
        *total = total.checked_add(new.amount).ok_or_else(|| {
            LedgerError::validation("amount", format!("would overflow the {} total", new.kind))
        })?;
        book.last_transaction_id += 1;

        let transaction = Transaction {
            id: book.last_transaction_id,
            kind: new.kind,
            amount: new.amount,
            category,
            description: new.description,
            date: new.date.unwrap_or_else(today),
        };
        book.transactions.push(transaction.clone());

        tracing::debug!(
            id = transaction.id,
            kind = %transaction.kind,
            category = %transaction.category,
            "Transaction recorded"
        );

        Ok(transaction)
    }

    /// Remove a transaction by id. Unknown ids are ignored.
    ///
    /// Returns whether a record was removed.
    pub async fn remove_transaction(&self, id: u64) -> bool {
        let mut book = self.book.write().await;
        let removed = match book.transactions.iter().position(|t| t.id == id) {
            Some(index) => {
                let tx = book.transactions.remove(index);
                let total = book.total_mut(tx.kind);
                *total -= tx.amount;
                true
            }
            None => false,
        };

        tracing::debug!(id, removed, "Transaction removal");
        removed
    }

    /// Create a budget, snapshotting the category's current expenses
    pub async fn append_budget(&self, new: NewBudget) -> Result<Budget> {
        ensure_non_negative("limit", new.limit)?;
        let category = required("category", new.category)?;
        let month = match new.month {
            Some(month) => parse_month(&month)?,
            None => current_month(),
        };

        let mut book = self.book.write().await;
        book.last_budget_id += 1;

        let budget = Budget {
            id: book.last_budget_id,
            spent: book.spent_in_category(&category),
            category,
            limit: new.limit,
            month,
        };
        book.budgets.push(budget.clone());

        tracing::debug!(
            id = budget.id,
            category = %budget.category,
            spent = %budget.spent,
            "Budget recorded"
        );

        Ok(budget)
    }

    /// Remove a budget by id. Unknown ids are ignored.
    pub async fn remove_budget(&self, id: u64) -> bool {
        let mut book = self.book.write().await;
        let before = book.budgets.len();
        book.budgets.retain(|b| b.id != id);
        let removed = book.budgets.len() != before;

        tracing::debug!(id, removed, "Budget removal");
        removed
    }

    /// All transactions in insertion order
    pub async fn list_transactions(&self) -> Vec<Transaction> {
        self.book.read().await.transactions.clone()
    }

    /// All budgets in insertion order
    pub async fn list_budgets(&self) -> Vec<Budget> {
        self.book.read().await.budgets.clone()
    }

    /// Sum of expense amounts recorded under `category`
    pub async fn spent_in_category(&self, category: &str) -> Decimal {
        self.book.read().await.spent_in_category(category)
    }

    /// Every budget with its live spending for the budget's own month
    pub async fn budget_progress(&self) -> Vec<BudgetProgress> {
        let book = self.book.read().await;
        book.budgets
            .iter()
            .map(|b| BudgetProgress::new(b.clone(), book.spent_in_month(&b.category, &b.month)))
            .collect()
    }

    /// Recompute the summary from scratch
    pub async fn summarize(&self) -> Summary {
        let book = self.book.read().await;
        Summary::from_transactions(&book.transactions)
    }

    /// Number of recorded transactions
    pub async fn transaction_count(&self) -> usize {
        self.book.read().await.transactions.len()
    }
}

fn required(field: &str, value: String) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::validation(field, "is required"));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn expense(amount: Decimal, category: &str) -> NewTransaction {
        NewTransaction {
            kind: TransactionKind::Expense,
            amount,
            category: category.to_string(),
            description: String::new(),
            date: Some(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()),
        }
    }

    #[tokio::test]
    async fn test_append_assigns_sequential_ids() {
        let ledger = LedgerStore::new();

        let first = ledger.append_transaction(expense(dec!(10), "food")).await.unwrap();
        let second = ledger.append_transaction(expense(dec!(20), "food")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(ledger.list_transactions().await, vec![first, second]);
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_removal() {
        let ledger = LedgerStore::new();

        ledger.append_transaction(expense(dec!(10), "food")).await.unwrap();
        let second = ledger.append_transaction(expense(dec!(20), "food")).await.unwrap();
        assert!(ledger.remove_transaction(second.id).await);

        let third = ledger.append_transaction(expense(dec!(30), "food")).await.unwrap();
        assert_eq!(third.id, 3);
    }

    #[tokio::test]
    async fn test_remove_unknown_id_is_noop() {
        let ledger = LedgerStore::new();
        ledger.append_transaction(expense(dec!(10), "food")).await.unwrap();

        assert!(!ledger.remove_transaction(42).await);
        assert!(!ledger.remove_budget(42).await);
        assert_eq!(ledger.transaction_count().await, 1);
    }

    #[tokio::test]
    async fn test_date_defaults_to_today() {
        let ledger = LedgerStore::new();
        let mut new = expense(dec!(1), "misc");
        new.date = None;

        let tx = ledger.append_transaction(new).await.unwrap();
        assert_eq!(tx.date, today());
    }

    #[tokio::test]
    async fn test_rejects_negative_amount_and_blank_category() {
        let ledger = LedgerStore::new();

        let err = ledger.append_transaction(expense(dec!(-1), "food")).await.unwrap_err();
        assert!(matches!(err, LedgerError::Validation { ref field, .. } if field == "amount"));

        let err = ledger.append_transaction(expense(dec!(1), "  ")).await.unwrap_err();
        assert!(matches!(err, LedgerError::Validation { ref field, .. } if field == "category"));

        assert_eq!(ledger.transaction_count().await, 0);
    }

    #[tokio::test]
    async fn test_budget_spent_is_snapshot() {
        let ledger = LedgerStore::new();
        ledger.append_transaction(expense(dec!(120), "food")).await.unwrap();
        ledger.append_transaction(expense(dec!(30), "food")).await.unwrap();
        ledger.append_transaction(expense(dec!(99), "rent")).await.unwrap();

        let budget = ledger
            .append_budget(NewBudget {
                category: "food".to_string(),
                limit: dec!(500),
                month: Some("2024-01".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(budget.id, 1);
        assert_eq!(budget.spent, dec!(150));

        ledger.append_transaction(expense(dec!(70), "food")).await.unwrap();

        let budgets = ledger.list_budgets().await;
        assert_eq!(budgets[0].spent, dec!(150));
        assert_eq!(ledger.spent_in_category("food").await, dec!(220));
    }

    #[tokio::test]
    async fn test_budget_month_defaults_and_validation() {
        let ledger = LedgerStore::new();

        let budget = ledger
            .append_budget(NewBudget {
                category: "fun".to_string(),
                limit: dec!(50),
                month: None,
            })
            .await
            .unwrap();
        assert_eq!(budget.month, current_month());
        assert_eq!(budget.spent, Decimal::ZERO);

        let err = ledger
            .append_budget(NewBudget {
                category: "fun".to_string(),
                limit: dec!(50),
                month: Some("soon".to_string()),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::Validation { ref field, .. } if field == "month"));
        assert_eq!(ledger.list_budgets().await.len(), 1);
    }

    // More than half of Decimal::MAX
    fn big() -> Decimal {
        "50000000000000000000000000000".parse().unwrap()
    }

    #[tokio::test]
    async fn test_append_refuses_to_overflow_totals() {
        let ledger = LedgerStore::new();
        let half = big();

        let mut income = expense(half, "salary");
        income.kind = TransactionKind::Income;
        ledger.append_transaction(income.clone()).await.unwrap();

        let err = ledger.append_transaction(income).await.unwrap_err();
        assert!(matches!(err, LedgerError::Validation { ref field, .. } if field == "amount"));
        assert_eq!(ledger.transaction_count().await, 1);

        // Expenses have their own headroom
        ledger.append_transaction(expense(half, "rent")).await.unwrap();
        assert!(ledger.append_transaction(expense(half, "rent")).await.is_err());

        let summary = ledger.summarize().await;
        assert_eq!(summary.income, half);
        assert_eq!(summary.expenses, half);
        assert_eq!(summary.balance, Decimal::ZERO);
        assert_eq!(ledger.spent_in_category("rent").await, half);
    }

    #[tokio::test]
    async fn test_removal_frees_total_headroom() {
        let ledger = LedgerStore::new();
        let half = big();

        let first = ledger.append_transaction(expense(half, "rent")).await.unwrap();
        assert!(ledger.append_transaction(expense(half, "rent")).await.is_err());

        assert!(ledger.remove_transaction(first.id).await);
        ledger.append_transaction(expense(half, "rent")).await.unwrap();
        assert_eq!(ledger.summarize().await.expenses, half);
    }

    #[tokio::test]
    async fn test_budget_progress_uses_budget_month() {
        let ledger = LedgerStore::new();
        ledger.append_transaction(expense(dec!(90), "food")).await.unwrap();

        let mut february = expense(dec!(500), "food");
        february.date = Some(NaiveDate::from_ymd_opt(2024, 2, 3).unwrap());
        ledger.append_transaction(february).await.unwrap();

        ledger
            .append_budget(NewBudget {
                category: "food".to_string(),
                limit: dec!(100),
                month: Some("2024-01".to_string()),
            })
            .await
            .unwrap();
        ledger.append_transaction(expense(dec!(20), "food")).await.unwrap();

        let progress = ledger.budget_progress().await;
        assert_eq!(progress.len(), 1);
        assert_eq!(progress[0].budget.spent, dec!(590));
        assert_eq!(progress[0].month_spent, dec!(110));
        assert_eq!(progress[0].remaining, dec!(-10));
        assert_eq!(progress[0].status, BudgetStatus::OverBudget);
    }
}
