//! Bill error types.

use splitbill_shared::AppError;
use splitbill_shared::types::{BillId, GroupId, PersonId, ProductId};
use thiserror::Error;

/// Bill-related errors.
///
/// These are raised while editing or validating a bill. Splitting a bill
/// that passed validation never fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BillError {
    /// Product not found on the bill.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Bill is stored under a different group than the one it references.
    #[error("Bill {bill} belongs to group {expected}, but references group {got}")]
    GroupMismatch {
        /// The bill.
        bill: BillId,
        /// Group holding the bill.
        expected: GroupId,
        /// Group referenced by the bill.
        got: GroupId,
    },

    /// Product quantity cannot be negative.
    #[error("Product {0} has a negative quantity")]
    NegativeQuantity(ProductId),

    /// Product price cannot be negative.
    #[error("Product {0} has a negative price")]
    NegativePrice(ProductId),

    /// Assigned or exonerated person is not in the group roster.
    #[error("Person {0} is not a member of the bill's group")]
    UnknownPerson(PersonId),

    /// Product subtotals do not fit in a decimal.
    #[error("Bill {0} total is too large to compute")]
    AmountOverflow(BillId),
}

impl From<BillError> for AppError {
    fn from(err: BillError) -> Self {
        match err {
            BillError::ProductNotFound(_) => Self::NotFound(err.to_string()),
            _ => Self::Validation(err.to_string()),
        }
    }
}
