//! Groups, their rosters, and group-wide debt aggregation.

pub mod aggregator;
pub mod summary;
pub mod types;

#[cfg(test)]
mod props;

pub use aggregator::GroupAggregator;
pub use summary::{BillSummary, GroupSummary, PersonDebt};
pub use types::{Circle, Group, Person};
