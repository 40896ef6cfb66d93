//! Shared Pricing Rule
//!
//! Carts and orders are priced the same way: the subtotal is the sum of
//! `price x quantity` over the line items, tax is a flat rate on the subtotal
//! rounded to cents, and the total is their sum. The subtotal is kept exact.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::Serialize;
use thiserror::Error;

/// Flat sales tax applied to every subtotal.
pub const TAX_RATE: Decimal = dec!(0.02);

/// Number of decimal places kept for currency amounts.
pub const CURRENCY_DP: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("Total is too large")]
    Overflow,
}

/// Anything that contributes `price x quantity` to a subtotal.
pub trait Priced {
    fn unit_price(&self) -> Decimal;
    fn quantity(&self) -> u32;

    fn line_total(&self) -> Result<Decimal, PricingError> {
        self.unit_price().checked_mul(Decimal::from(self.quantity())).ok_or(PricingError::Overflow)
    }
}

/// Derived monetary view of a list of line items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl Totals {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Prices a set of lines. Idempotent: the same lines always give the same totals.
    ///
    /// Fails instead of panicking when an amount does not fit in a `Decimal`.
    pub fn compute<'a, P, I>(lines: I) -> Result<Self, PricingError>
    where
        P: Priced + 'a,
        I: IntoIterator<Item = &'a P>,
    {
        let subtotal = lines.into_iter().try_fold(Decimal::ZERO, |acc, line| {
            acc.checked_add(line.line_total()?).ok_or(PricingError::Overflow)
        })?;
        let tax = checked_tax_on(subtotal)?;
        let total = subtotal.checked_add(tax).ok_or(PricingError::Overflow)?;
        Ok(Self { subtotal, tax, total })
    }
}

fn checked_tax_on(subtotal: Decimal) -> Result<Decimal, PricingError> {
    subtotal.checked_mul(TAX_RATE).map(round_currency).ok_or(PricingError::Overflow)
}

/// Tax owed on `subtotal`, rounded half away from zero to cents.
pub fn tax_on(subtotal: Decimal) -> Decimal {
    round_currency(subtotal * TAX_RATE)
}

pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CURRENCY_DP, RoundingStrategy::MidpointAwayFromZero)
}
