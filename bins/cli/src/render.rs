//! Plain-text report rendering.

use rust_decimal::Decimal;
use splitbill_core::{BillSummary, BillType, GroupSummary, PersonDebt};
use splitbill_shared::types::{Currency, Money};

/// Renders the split of one bill.
pub fn bill(summary: &BillSummary, bill_type: BillType, currency: Currency) -> String {
    let mut lines = vec![format!(
        "Bill {} ({bill_type}, {})",
        summary.bill_id,
        summary.created_at.format("%Y-%m-%d")
    )];
    lines.extend(debt_table(
        &summary.debts,
        summary.total,
        summary.unattributed,
        currency,
    ));
    lines.join("\n")
}

/// Renders what everyone owes across a group.
pub fn group(summary: &GroupSummary, name: &str, currency: Currency) -> String {
    let bills = if summary.bill_count == 1 { "bill" } else { "bills" };
    let mut lines = vec![format!("Group {name} ({} {bills})", summary.bill_count)];
    lines.extend(debt_table(
        &summary.person_debts,
        summary.total_spent,
        summary.unattributed,
        currency,
    ));
    lines.join("\n")
}

fn debt_table(
    debts: &[PersonDebt],
    total: Decimal,
    unattributed: Decimal,
    currency: Currency,
) -> Vec<String> {
    let width = debts
        .iter()
        .map(|d| d.person_name.chars().count())
        .chain(["Unattributed".len()])
        .max()
        .unwrap_or_default();
    let row = |label: &str, amount: Decimal| {
        format!("  {label:<width$}  {}", Money::new(amount, currency).format())
    };

    let mut lines: Vec<String> = debts
        .iter()
        .map(|d| row(&d.person_name, d.amount))
        .collect();
    if debts.is_empty() {
        lines.push("  (nobody participates)".to_string());
    }
    if !unattributed.is_zero() {
        lines.push(row("Unattributed", unattributed));
    }
    lines.push(row("Total", total));
    lines
}
