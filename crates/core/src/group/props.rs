//! Property-based tests for group aggregation.
//!
//! - Aggregation commutativity
//! - Aggregation additivity
//! - Only active people appear as debtors

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::aggregator::GroupAggregator;
use super::types::{Group, Person};
use crate::bill::{Bill, BillSplitter, BillType};

/// `(is_equal, [(quantity, price, assignee mask)], exonerated mask)`.
type BillShape = (bool, Vec<(i64, i64, u8)>, u8);

fn bill_shape() -> impl Strategy<Value = BillShape> {
    (
        any::<bool>(),
        prop::collection::vec((0i64..10, 0i64..50_000, any::<u8>()), 0..5),
        any::<u8>(),
    )
}

/// Bill shapes paired with a random permutation of their indices.
fn shapes_with_permutation() -> impl Strategy<Value = (Vec<BillShape>, Vec<usize>)> {
    prop::collection::vec(bill_shape(), 0..6).prop_flat_map(|shapes| {
        let order: Vec<usize> = (0..shapes.len()).collect();
        (Just(shapes), Just(order).prop_shuffle())
    })
}

fn selected(mask: u8, people: &[Person]) -> impl Iterator<Item = &Person> {
    people
        .iter()
        .enumerate()
        .filter(move |(bit, _)| mask & (1u8 << bit) != 0)
        .map(|(_, person)| person)
}

fn build_group(shapes: &[BillShape], inactive_mask: u8) -> Group {
    let mut group = Group::new("Props");
    for i in 0..5u8 {
        let mut person = Person::new(format!("P{i}"));
        person.active = inactive_mask & (1u8 << i) == 0;
        group.circles[0].people.push(person);
    }
    let people = group.circles[0].people.clone();

    for (is_equal, lines, exonerated) in shapes {
        let bill_type = if *is_equal { BillType::Equal } else { BillType::Distributed };
        let bill = group.add_bill(bill_type);
        for (qty, cents, mask) in lines {
            let product = bill.add_product("Item", Decimal::from(*qty), Decimal::new(*cents, 2));
            for person in selected(*mask, &people) {
                bill.assign(&product, person.id.clone()).unwrap();
            }
        }
        for person in selected(*exonerated, &people) {
            bill.exonerate(person.id.clone());
        }
    }
    group
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Permuting bills does not change the aggregated debts.
    #[test]
    fn prop_aggregation_is_order_independent(
        (shapes, order) in shapes_with_permutation(),
        inactive in any::<u8>(),
    ) {
        let group = build_group(&shapes, inactive);
        let active = group.active_people();
        let shuffled: Vec<Bill> = order.iter().map(|i| group.bills[*i].clone()).collect();

        let forward = GroupAggregator::aggregate_group(&group.bills, &active);
        let permuted = GroupAggregator::aggregate_group(&shuffled, &active);

        prop_assert_eq!(forward.len(), permuted.len());
        for (id, amount) in &forward {
            prop_assert!(permuted.contains(id));
            prop_assert!((permuted.amount_owed(id) - *amount).abs() < dec!(0.000001));
        }
    }

    /// Aggregated debts add up to the sum of the per-bill debts.
    #[test]
    fn prop_aggregation_is_additive(
        shapes in prop::collection::vec(bill_shape(), 0..6),
        inactive in any::<u8>(),
    ) {
        let group = build_group(&shapes, inactive);
        let active = group.active_people();

        let totals = GroupAggregator::aggregate_group(&group.bills, &active);
        let per_bill: Decimal = group
            .bills
            .iter()
            .map(|bill| BillSplitter::split(bill, &active).total())
            .sum();

        prop_assert!((totals.total() - per_bill).abs() < dec!(0.000001));
    }

    /// Inactive people never appear in the aggregated mapping.
    #[test]
    fn prop_only_active_people_owe(
        shapes in prop::collection::vec(bill_shape(), 0..6),
        inactive in any::<u8>(),
    ) {
        let group = build_group(&shapes, inactive);

        let totals = GroupAggregator::aggregate(&group);

        for person in group.all_people().filter(|p| !p.active) {
            prop_assert!(!totals.contains(&person.id));
        }
    }
}
