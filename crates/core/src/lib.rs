//! Core bill-splitting logic for splitbill.
//!
//! This crate contains pure business logic with ZERO storage or UI dependencies.
//! Every computation takes its inputs explicitly and never mutates them.
//!
//! # Modules
//!
//! - `bill` - Bills, totals, the per-bill splitter and validation
//! - `group` - Group rosters, group-wide aggregation and summaries
//! - `debt` - Debt mappings and display rounding
//! - `snapshot` - JSON import/export of all groups

pub mod bill;
pub mod debt;
pub mod group;
pub mod snapshot;

pub use bill::{Bill, BillError, BillSplitter, BillTotal, BillType, Product};
pub use debt::DebtMapping;
pub use group::{BillSummary, Circle, Group, GroupAggregator, GroupSummary, Person, PersonDebt};
pub use snapshot::{Snapshot, SnapshotError};
