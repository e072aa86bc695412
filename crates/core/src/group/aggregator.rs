//! Group-wide debt totals.

use tracing::debug;

use super::types::{Group, Person};
use crate::bill::{Bill, BillSplitter};
use crate::debt::DebtMapping;

/// Folds per-bill debt mappings into group-wide totals.
pub struct GroupAggregator;

impl GroupAggregator {
    /// Total owed by each person across `bills`.
    ///
    /// Every bill is split against the same `active_people` snapshot and the
    /// resulting mappings are added together. The result does not depend on
    /// bill order. People who never participated in any bill are absent.
    #[must_use]
    pub fn aggregate_group(bills: &[Bill], active_people: &[Person]) -> DebtMapping {
        let totals = bills.iter().fold(DebtMapping::new(), |mut totals, bill| {
            totals.merge(&BillSplitter::split(bill, active_people));
            totals
        });

        debug!(
            bills = bills.len(),
            debtors = totals.len(),
            total = %totals.total(),
            "group debts aggregated"
        );

        totals
    }

    /// Aggregates a group's own bills against its current active roster.
    #[must_use]
    pub fn aggregate(group: &Group) -> DebtMapping {
        Self::aggregate_group(&group.bills, &group.active_people())
    }
}
