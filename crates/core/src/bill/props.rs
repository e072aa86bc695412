//! Property-based tests for bill totals and splitting.
//!
//! - Total additivity
//! - Equal-split fairness
//! - Exoneration exclusion
//! - Distributed conservation under full eligibility
//! - Assignment leak
//! - Empty-participant safety

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use splitbill_shared::types::GroupId;

use super::splitter::BillSplitter;
use super::total::BillTotal;
use super::types::{Bill, BillType};
use crate::group::Person;

/// Strategy to generate prices (0.00 to 1,000.00).
fn price() -> impl Strategy<Value = Decimal> {
    (0i64..100_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate quantities (0 to 20).
fn quantity() -> impl Strategy<Value = Decimal> {
    (0i64..=20i64).prop_map(Decimal::from)
}

/// Strategy to generate `(quantity, price, assignee mask)` product lines.
fn product_lines() -> impl Strategy<Value = Vec<(Decimal, Decimal, u8)>> {
    prop::collection::vec((quantity(), price(), any::<u8>()), 0..8)
}

fn roster(size: usize) -> Vec<Person> {
    (0..size).map(|i| Person::new(format!("P{i}"))).collect()
}

/// Builds a bill whose products are assigned by bitmask over `people`.
fn build_bill(
    bill_type: BillType,
    lines: &[(Decimal, Decimal, u8)],
    people: &[Person],
) -> Bill {
    let mut bill = Bill::new(GroupId::new(), bill_type);
    for (i, (qty, unit_price, mask)) in lines.iter().enumerate() {
        let product = bill.add_product(format!("Item {i}"), *qty, *unit_price);
        for (bit, person) in people.iter().enumerate().take(8) {
            if mask & (1u8 << bit) != 0 {
                bill.assign(&product, person.id.clone()).unwrap();
            }
        }
    }
    bill
}

/// Sums of divided amounts may be off in the last few decimal digits.
fn close(a: Decimal, b: Decimal) -> bool {
    (a - b).abs() < dec!(0.000001)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Total equals the sum of `quantity * price`.
    #[test]
    fn prop_total_is_sum_of_subtotals(lines in product_lines()) {
        let bill = build_bill(BillType::Equal, &lines, &[]);
        let expected: Decimal = lines.iter().map(|(q, p, _)| *q * *p).sum();
        prop_assert_eq!(BillTotal::total(&bill), expected);
    }

    /// Equal bills charge every participant the same and conserve the total.
    #[test]
    fn prop_equal_split_is_fair(lines in product_lines(), size in 1usize..8) {
        let people = roster(size);
        let bill = build_bill(BillType::Equal, &lines, &people);

        let debts = BillSplitter::split(&bill, &people);
        let per_person = BillTotal::total(&bill) / Decimal::from(size);

        prop_assert_eq!(debts.len(), size);
        for person in &people {
            prop_assert_eq!(debts.get(&person.id), Some(per_person));
        }
        prop_assert!(close(debts.total(), BillTotal::total(&bill)));
    }

    /// Exonerated people never owe and do not count as divisors.
    #[test]
    fn prop_exonerated_people_are_excluded(
        lines in product_lines(),
        size in 2usize..8,
        bill_type in prop_oneof![Just(BillType::Equal), Just(BillType::Distributed)],
    ) {
        let people = roster(size);
        let mut bill = build_bill(bill_type, &lines, &people);
        let excused = people[0].id.clone();
        bill.exonerate(excused.clone());

        let debts = BillSplitter::split(&bill, &people);

        prop_assert!(!debts.contains(&excused));
        prop_assert_eq!(debts.len(), size - 1);
        if bill_type == BillType::Equal {
            let per_person = BillTotal::total(&bill) / Decimal::from(size - 1);
            prop_assert_eq!(debts.get(&people[1].id), Some(per_person));
        }
    }

    /// With everyone eligible, a distributed split conserves the total.
    #[test]
    fn prop_distributed_conserves_total_when_all_eligible(
        lines in product_lines(),
        size in 1usize..8,
    ) {
        let people = roster(size);
        let bill = build_bill(BillType::Distributed, &lines, &people);

        let debts = BillSplitter::split(&bill, &people);

        prop_assert_eq!(debts.len(), size);
        prop_assert!(close(debts.total(), BillTotal::total(&bill)));
        for (_, amount) in &debts {
            prop_assert!(*amount >= Decimal::ZERO);
        }
    }

    /// A product owned only by an exonerated person is charged to nobody.
    #[test]
    fn prop_assignment_to_excused_person_leaks(
        lines in product_lines(),
        size in 2usize..8,
        leaked_qty in 1i64..10,
        leaked_price in 1i64..100_000,
    ) {
        let people = roster(size);
        let mut bill = build_bill(BillType::Distributed, &lines, &people);
        // Keep every other product assigned to an eligible person.
        for product in &mut bill.products {
            product.assigned_to.remove(&people[0].id);
            product.assigned_to.insert(people[1].id.clone());
        }
        let leaked = bill.add_product(
            "Leaked",
            Decimal::from(leaked_qty),
            Decimal::new(leaked_price, 2),
        );
        bill.assign(&leaked, people[0].id.clone()).unwrap();
        bill.exonerate(people[0].id.clone());

        let debts = BillSplitter::split(&bill, &people);
        let leaked_subtotal = bill.product(&leaked).unwrap().subtotal();

        prop_assert!(debts.total() < BillTotal::total(&bill));
        prop_assert!(close(debts.total() + leaked_subtotal, BillTotal::total(&bill)));
    }

    /// Nobody participating never panics and yields an empty mapping.
    #[test]
    fn prop_no_participants_is_empty(
        lines in product_lines(),
        size in 0usize..5,
        bill_type in prop_oneof![Just(BillType::Equal), Just(BillType::Distributed)],
    ) {
        let people = roster(size);
        let mut bill = build_bill(bill_type, &lines, &people);
        for person in &people {
            bill.exonerate(person.id.clone());
        }

        prop_assert!(BillSplitter::split(&bill, &people).is_empty());
    }
}
