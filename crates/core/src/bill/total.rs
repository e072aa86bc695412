//! Bill totals.

use rust_decimal::Decimal;

use super::types::{Bill, Product};

/// Sums product subtotals for a bill.
pub struct BillTotal;

impl BillTotal {
    /// Sum of `quantity * price` over every product. Empty bills total zero.
    ///
    /// No rounding is applied.
    #[must_use]
    pub fn total(bill: &Bill) -> Decimal {
        bill.products.iter().map(Product::subtotal).sum()
    }

    /// Like [`BillTotal::total`], but returns `None` instead of overflowing.
    #[must_use]
    pub fn checked_total(bill: &Bill) -> Option<Decimal> {
        bill.products
            .iter()
            .try_fold(Decimal::ZERO, |sum, product| {
                sum.checked_add(product.checked_subtotal()?)
            })
    }
}
