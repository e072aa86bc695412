//! Business rule validation for bills.
//!
//! The splitter assumes well-formed bills. Anything built from untrusted data
//! (an imported snapshot, user input) goes through [`validate_bill`] first.

use rust_decimal::Decimal;

use super::error::BillError;
use super::total::BillTotal;
use super::types::Bill;
use crate::group::Group;

/// Validates a bill against the group that holds it.
///
/// # Errors
///
/// - `BillError::GroupMismatch` if the bill references another group
/// - `BillError::NegativeQuantity` / `BillError::NegativePrice` for bad amounts
/// - `BillError::UnknownPerson` if an assignee or exonerated id is not on the
///   group roster (inactive members are fine)
/// - `BillError::AmountOverflow` if the total cannot be represented
pub fn validate_bill(bill: &Bill, group: &Group) -> Result<(), BillError> {
    if bill.group_id != group.id {
        return Err(BillError::GroupMismatch {
            bill: bill.id.clone(),
            expected: group.id.clone(),
            got: bill.group_id.clone(),
        });
    }

    for product in &bill.products {
        if product.quantity < Decimal::ZERO {
            return Err(BillError::NegativeQuantity(product.id.clone()));
        }
        if product.price < Decimal::ZERO {
            return Err(BillError::NegativePrice(product.id.clone()));
        }
        if let Some(unknown) = product
            .assigned_to
            .iter()
            .find(|id| group.person(id).is_none())
        {
            return Err(BillError::UnknownPerson(unknown.clone()));
        }
    }

    if let Some(unknown) = bill
        .exonerated_people
        .iter()
        .find(|id| group.person(id).is_none())
    {
        return Err(BillError::UnknownPerson(unknown.clone()));
    }

    BillTotal::checked_total(bill).ok_or_else(|| BillError::AmountOverflow(bill.id.clone()))?;

    Ok(())
}
