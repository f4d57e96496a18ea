//! Data Transfer Objects
//!
//! Request and response structures for the API. Monetary values travel as
//! JSON numbers; request amounts may also be numeric strings.

pub mod advice;
pub mod budget;
pub mod common;
pub mod transaction;

pub use advice::*;
pub use budget::*;
pub use common::*;
pub use transaction::*;
