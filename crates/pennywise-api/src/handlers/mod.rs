//! API Handlers
//!
//! Request handlers for all API endpoints.
//! Each module handles a specific domain.

pub mod advice;
pub mod budgets;
pub mod health;
pub mod index;
pub mod transactions;

pub use health::*;
