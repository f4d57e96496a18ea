//! Pennywise Ledger - In-memory transaction and budget records
//!
//! The ledger is:
//! - In-process only (no persistence, no indexing beyond a sequential scan)
//! - Append-only with removal by id (records are never mutated)
//! - Shared across request handlers behind a single async lock
//!
//! # Invariants
//!
//! 1. Ids are unique within each collection and never re-issued after a removal
//! 2. Transaction amounts are non-negative
//! 3. A budget's `spent` is a snapshot taken at creation time
//! 4. `Summary::balance == Summary::income - Summary::expenses`
//! 5. Income and expense totals never exceed `Decimal::MAX`; an append that
//!    would push one past it is rejected

pub mod store;
pub mod summary;
pub mod types;

pub use store::LedgerStore;
pub use summary::Summary;
pub use types::*;

use thiserror::Error;

/// Errors that can occur in ledger operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },
}

impl LedgerError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
