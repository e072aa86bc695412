//! Display rounding using the Largest Remainder Method.
//!
//! Splits are computed at full `Decimal` precision, so a bill of 26 shared by
//! three people yields 8.666... each. Rounding every share independently can
//! make the displayed shares disagree with the displayed total. This module
//! rounds a set of amounts while keeping their sum equal to the rounded sum:
//! 1. Round the exact sum to the target precision
//! 2. Round each amount down
//! 3. Calculate the remainder (rounded sum - sum of rounded down amounts)
//! 4. Distribute remainder units to amounts with the largest fractional parts

use rust_decimal::Decimal;
use rust_decimal::prelude::*;

/// Allocation utility for rounding debt amounts.
pub struct AllocationUtil;

impl AllocationUtil {
    /// Round `amounts` to `decimal_places`, preserving the rounded total.
    ///
    /// Amounts are expected to be non-negative. Ties between equal fractional
    /// parts go to the earlier position in `amounts`.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use splitbill_core::debt::AllocationUtil;
    ///
    /// let third = dec!(100) / dec!(3);
    /// let result = AllocationUtil::round_preserving_total(&[third, third, third], 2);
    /// assert_eq!(result, vec![dec!(33.34), dec!(33.33), dec!(33.33)]);
    /// ```
    #[must_use]
    pub fn round_preserving_total(amounts: &[Decimal], decimal_places: u32) -> Vec<Decimal> {
        if amounts.is_empty() {
            return vec![];
        }

        let unit = Decimal::new(1, decimal_places);

        let exact_total: Decimal = amounts.iter().copied().sum();
        let target =
            exact_total.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven);

        let mut rounded: Vec<Decimal> = amounts
            .iter()
            .map(|a| a.round_dp_with_strategy(decimal_places, RoundingStrategy::ToZero))
            .collect();

        let sum_rounded: Decimal = rounded.iter().copied().sum();
        let remainder = target - sum_rounded;

        let units_to_distribute = (remainder / unit)
            .round_dp_with_strategy(0, RoundingStrategy::ToZero)
            .to_usize()
            .unwrap_or(0);

        if units_to_distribute == 0 {
            return rounded;
        }

        let mut remainders: Vec<(usize, Decimal)> = amounts
            .iter()
            .zip(rounded.iter())
            .enumerate()
            .map(|(i, (exact, down))| (i, *exact - *down))
            .collect();

        // Stable sort keeps positional order among equal remainders.
        remainders.sort_by(|a, b| b.1.cmp(&a.1));

        for (idx, _) in remainders.iter().take(units_to_distribute) {
            rounded[*idx] += unit;
        }

        rounded
    }
}
