//! Debt mappings and display rounding.

pub mod allocation;
pub mod mapping;

pub use allocation::AllocationUtil;
pub use mapping::DebtMapping;
