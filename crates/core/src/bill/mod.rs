//! Bills, their totals, and how they are split.
//!
//! This module implements the per-bill side of the engine:
//! - Bill and product types with in-memory editing
//! - Bill totals
//! - The splitter producing a debt mapping per bill
//! - Validation of bills built from untrusted data

pub mod error;
pub mod splitter;
pub mod total;
pub mod types;
pub mod validation;

#[cfg(test)]
mod props;

pub use error::BillError;
pub use splitter::BillSplitter;
pub use total::BillTotal;
pub use types::{Bill, BillType, Product};
pub use validation::validate_bill;
