//! Per-bill debt computation.
//!
//! Given a bill and the active roster of its group, the splitter decides how
//! much each participating person owes:
//! - Equal bills divide the total evenly
//! - Distributed bills charge each product to its assignees and divide the
//!   unassigned remainder evenly
//!
//! Shares of products assigned to people who no longer participate
//! (exonerated or inactive) are dropped. They are neither charged to anyone
//! nor returned to the unassigned remainder, so the debts of such a bill add
//! up to less than its total.

use std::collections::HashSet;

use rust_decimal::Decimal;
use splitbill_shared::types::PersonId;
use tracing::{debug, trace};

use super::total::BillTotal;
use super::types::{Bill, BillType};
use crate::debt::DebtMapping;
use crate::group::Person;

/// Computes debt mappings for single bills.
pub struct BillSplitter;

impl BillSplitter {
    /// People who owe money on `bill`: active, not exonerated, de-duplicated.
    ///
    /// Order follows `active_people`.
    #[must_use]
    pub fn participating(bill: &Bill, active_people: &[Person]) -> Vec<PersonId> {
        let mut seen = HashSet::with_capacity(active_people.len());
        active_people
            .iter()
            .filter(|person| person.active && !bill.is_exonerated(&person.id))
            .filter(|&person| seen.insert(&person.id))
            .map(|person| person.id.clone())
            .collect()
    }

    /// Splits a bill among the participating people.
    ///
    /// The result holds every participant (possibly at zero) and nobody else.
    /// With no participants the result is empty and the bill's cost is left
    /// unattributed. Amounts are not rounded.
    #[must_use]
    pub fn split(bill: &Bill, active_people: &[Person]) -> DebtMapping {
        let participants = Self::participating(bill, active_people);
        let mut debts = DebtMapping::with_participants(participants.iter().cloned());

        if participants.is_empty() {
            debug!(bill_id = %bill.id, "no participants, bill left unattributed");
            return debts;
        }

        let total = BillTotal::total(bill);
        let headcount = Decimal::from(participants.len());

        match bill.bill_type {
            BillType::Equal => {
                let per_person = total / headcount;
                for id in &participants {
                    debts.set(id.clone(), per_person);
                }
            }
            BillType::Distributed => {
                let assigned_total = Self::charge_assigned(bill, &mut debts);

                let remainder = total - assigned_total;
                if remainder > Decimal::ZERO {
                    let per_person = remainder / headcount;
                    for id in &participants {
                        debts.add(id.clone(), per_person);
                    }
                }
            }
        }

        debug!(
            bill_id = %bill.id,
            bill_type = ?bill.bill_type,
            participants = participants.len(),
            %total,
            "bill split"
        );

        debts
    }

    /// Charges assigned products to their participating assignees.
    ///
    /// Returns the full subtotal of every assigned product, including shares
    /// dropped because the assignee is not participating.
    fn charge_assigned(bill: &Bill, debts: &mut DebtMapping) -> Decimal {
        let mut assigned_total = Decimal::ZERO;
        let mut dropped = Decimal::ZERO;

        for product in bill.products.iter().filter(|p| p.is_assigned()) {
            let subtotal = product.subtotal();
            let share = subtotal / Decimal::from(product.assigned_to.len());

            for person in &product.assigned_to {
                if !debts.add_existing(person, share) {
                    dropped += share;
                }
            }

            trace!(product_id = %product.id, %subtotal, %share, "product charged");
            assigned_total += subtotal;
        }

        if dropped > Decimal::ZERO {
            debug!(
                bill_id = %bill.id,
                %dropped,
                "shares assigned to non-participating people were dropped"
            );
        }

        assigned_total
    }
}
