//! Bill and group summaries for presentation layers.
//!
//! Summaries resolve person ids to names and list debts in roster order.
//! Amounts stay unrounded; use the `rounded` methods for display.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use splitbill_shared::types::{BillId, GroupId, PersonId};

use super::aggregator::GroupAggregator;
use super::types::Group;
use crate::bill::{Bill, BillSplitter, BillTotal};
use crate::debt::DebtMapping;

/// Amount owed by one named person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonDebt {
    /// Person ID.
    pub person_id: PersonId,
    /// Person display name.
    pub person_name: String,
    /// Amount owed.
    pub amount: Decimal,
}

/// Split result of a single bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillSummary {
    /// Bill ID.
    pub bill_id: BillId,
    /// Bill total.
    pub total: Decimal,
    /// Debts of the participating people, in roster order.
    pub debts: Vec<PersonDebt>,
    /// Part of the total charged to nobody (no participants, or shares
    /// assigned to people who do not participate).
    pub unattributed: Decimal,
    /// Bill creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Aggregated debts of a whole group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSummary {
    /// Group ID.
    pub group_id: GroupId,
    /// Sum of all bill totals.
    pub total_spent: Decimal,
    /// Number of bills.
    pub bill_count: usize,
    /// Total debt per person, in roster order.
    pub person_debts: Vec<PersonDebt>,
    /// Part of `total_spent` charged to nobody.
    pub unattributed: Decimal,
}

impl BillSummary {
    /// Splits `bill` against `group`'s active roster and names the debtors.
    #[must_use]
    pub fn build(bill: &Bill, group: &Group) -> Self {
        let debts = BillSplitter::split(bill, &group.active_people());
        let total = BillTotal::total(bill);

        Self {
            bill_id: bill.id.clone(),
            total,
            unattributed: total - debts.total(),
            debts: named_debts(group, &debts),
            created_at: bill.created_at,
        }
    }

    /// Copy with debts rounded for display, keeping their rounded sum.
    #[must_use]
    pub fn rounded(&self, decimal_places: u32) -> Self {
        let total = self.total.round_dp(decimal_places);
        let debts = round_debts(&self.debts, decimal_places);
        let charged: Decimal = debts.iter().map(|d| d.amount).sum();

        Self {
            bill_id: self.bill_id.clone(),
            total,
            unattributed: total - charged,
            debts,
            created_at: self.created_at,
        }
    }
}

impl GroupSummary {
    /// Aggregates every bill of `group` against its active roster.
    #[must_use]
    pub fn build(group: &Group) -> Self {
        let totals = GroupAggregator::aggregate(group);
        let total_spent: Decimal = group.bills.iter().map(BillTotal::total).sum();

        Self {
            group_id: group.id.clone(),
            total_spent,
            bill_count: group.bills.len(),
            unattributed: total_spent - totals.total(),
            person_debts: named_debts(group, &totals),
        }
    }

    /// Copy with debts rounded for display, keeping their rounded sum.
    #[must_use]
    pub fn rounded(&self, decimal_places: u32) -> Self {
        let total_spent = self.total_spent.round_dp(decimal_places);
        let person_debts = round_debts(&self.person_debts, decimal_places);
        let charged: Decimal = person_debts.iter().map(|d| d.amount).sum();

        Self {
            group_id: self.group_id.clone(),
            total_spent,
            bill_count: self.bill_count,
            unattributed: total_spent - charged,
            person_debts,
        }
    }
}

/// Lists the people in `debts` in roster order with their names.
fn named_debts(group: &Group, debts: &DebtMapping) -> Vec<PersonDebt> {
    let mut named: Vec<PersonDebt> = group
        .all_people()
        .filter_map(|person| {
            debts.get(&person.id).map(|amount| PersonDebt {
                person_id: person.id.clone(),
                person_name: person.name.clone(),
                amount,
            })
        })
        .collect();

    // Ids missing from the roster only occur with unvalidated input.
    for (id, amount) in debts.sorted() {
        if group.person(&id).is_none() {
            named.push(PersonDebt {
                person_name: id.to_string(),
                person_id: id,
                amount,
            });
        }
    }

    named
}

fn round_debts(debts: &[PersonDebt], decimal_places: u32) -> Vec<PersonDebt> {
    let mapping: DebtMapping = debts
        .iter()
        .map(|d| (d.person_id.clone(), d.amount))
        .collect();
    let rounded = mapping.rounded(decimal_places);

    debts
        .iter()
        .map(|d| PersonDebt {
            amount: rounded.amount_owed(&d.person_id),
            ..d.clone()
        })
        .collect()
}
