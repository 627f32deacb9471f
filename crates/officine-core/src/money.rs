//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  The pharmacy sells in CFA francs (XOF), which has NO minor unit:      │
//! │    1 750 FCFA is stored as the integer 1750                            │
//! │                                                                         │
//! │  Every price, line total and subtotal is an i64 of whole francs.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use officine_core::money::Money;
//!
//! let price = Money::from_amount(1750);
//! let line = price * 2;
//! assert_eq!(line.amount(), 3500);
//! assert_eq!(line.to_string(), "3 500 FCFA");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole CFA francs.
///
/// ## Where Money is Used
/// ```text
/// Product.price ──┬──► CartLine.unit_price ──► CartLine.total
///                 │
///                 └──► Inventory stock value (price × stock)
///
/// Σ CartLine.total ──► Totals.subtotal ──► Totals.total ──► Sale.total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from a whole-franc amount.
    #[inline]
    pub const fn from_amount(amount: i64) -> Self {
        Money(amount)
    }

    /// Returns the amount in whole francs.
    #[inline]
    pub const fn amount(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use officine_core::money::Money;
    ///
    /// let unit_price = Money::from_amount(750);
    /// assert_eq!(unit_price.multiply_quantity(3).amount(), 2250);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Multiplies money by a quantity, `None` on overflow.
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(v) => Some(Money(v)),
            None => None,
        }
    }

    /// Adds two amounts, `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Money(v)),
            None => None,
        }
    }

    /// Margin of a sale price over a cost price, as a rounded percentage of
    /// the sale price.
    ///
    /// Returns 0 when the sale price is not positive.
    ///
    /// ## Example
    /// ```rust
    /// use officine_core::money::Money;
    ///
    /// let price = Money::from_amount(1750);
    /// let cost = Money::from_amount(1050);
    /// assert_eq!(price.margin_percent_over(cost), 40);
    /// ```
    pub fn margin_percent_over(&self, cost: Money) -> i64 {
        if self.0 <= 0 {
            return 0;
        }
        // Integer rounding: (diff * 100 + price / 2) / price
        let diff = (self.0 - cost.0) as i128;
        let price = self.0 as i128;
        ((diff * 100 + price / 2).div_euclid(price)) as i64
    }

    /// Share of `self` in `whole`, in percent (for display only).
    pub fn percentage_of(&self, whole: Money) -> f64 {
        if whole.0 == 0 {
            return 0.0;
        }
        self.0 as f64 * 100.0 / whole.0 as f64
    }

    /// Formats the absolute amount with space-separated thousands.
    ///
    /// `1234567` becomes `"1 234 567"`.
    pub fn grouped_digits(&self) -> String {
        group_thousands(self.0.unsigned_abs())
    }
}

pub(crate) fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money the way the counter prints it: `7 950 FCFA`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{} FCFA", sign, self.grouped_digits())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by a quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
