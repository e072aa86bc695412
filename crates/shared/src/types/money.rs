//! Money type with decimal precision and currency.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! This type wraps `rust_decimal::Decimal` for arbitrary precision.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Represents a monetary amount with currency.
///
/// Uses `Decimal` internally to avoid floating-point precision errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// The amount in major currency units (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code (e.g., "USD", "COP").
    pub currency: Currency,
}

/// ISO 4217 currency codes supported for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US Dollar
    #[default]
    Usd,
    /// Euro
    Eur,
    /// Pound Sterling
    Gbp,
    /// Japanese Yen
    Jpy,
    /// Colombian Peso
    Cop,
    /// Mexican Peso
    Mxn,
}

impl Currency {
    /// Number of decimal places used by the currency's minor unit.
    #[must_use]
    pub const fn minor_units(self) -> u32 {
        match self {
            Self::Jpy => 0,
            Self::Usd | Self::Eur | Self::Gbp | Self::Cop | Self::Mxn => 2,
        }
    }

    /// Prefix printed before a formatted amount.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Eur => "€",
            Self::Gbp => "£",
            Self::Jpy => "¥",
            Self::Cop => "COP ",
            Self::Mxn => "MX$",
        }
    }
}

impl Money {
    /// Creates a new Money instance.
    #[must_use]
    pub const fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Formats the amount for display, e.g. `$1,234.50` or `$26`.
    ///
    /// The amount is rounded half away from zero to the currency's minor
    /// unit. Decimals are hidden entirely when the rounded amount is whole.
    #[must_use]
    pub fn format(&self) -> String {
        let amount = self.format_amount();
        match amount.strip_prefix('-') {
            Some(unsigned) => format!("-{}{unsigned}", self.currency.symbol()),
            None => format!("{}{amount}", self.currency.symbol()),
        }
    }

    /// Same as [`Money::format`] without the currency symbol.
    #[must_use]
    pub fn format_amount(&self) -> String {
        let minor = self.currency.minor_units();
        let rounded = self
            .amount
            .round_dp_with_strategy(minor, RoundingStrategy::MidpointAwayFromZero);
        let places = if rounded.fract().is_zero() { 0 } else { minor as usize };
        let plain = format!("{:.places$}", rounded.abs());

        let (integer, fraction) = match plain.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (plain.as_str(), None),
        };

        let mut out = String::with_capacity(plain.len() + integer.len() / 3 + 1);
        if rounded.is_sign_negative() && !rounded.is_zero() {
            out.push('-');
        }
        out.push_str(&group_thousands(integer));
        if let Some(fraction) = fraction {
            out.push('.');
            out.push_str(fraction);
        }
        out
    }
}

/// Inserts `,` between every group of three integer digits.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format())
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Usd => write!(f, "USD"),
            Self::Eur => write!(f, "EUR"),
            Self::Gbp => write!(f, "GBP"),
            Self::Jpy => write!(f, "JPY"),
            Self::Cop => write!(f, "COP"),
            Self::Mxn => write!(f, "MXN"),
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "USD" => Ok(Self::Usd),
            "EUR" => Ok(Self::Eur),
            "GBP" => Ok(Self::Gbp),
            "JPY" => Ok(Self::Jpy),
            "COP" => Ok(Self::Cop),
            "MXN" => Ok(Self::Mxn),
            _ => Err(format!("Unknown currency: {s}")),
        }
    }
}
