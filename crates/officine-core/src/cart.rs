//! # Cart Engine
//!
//! The line-item collection of one checkout session.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Operation                    Effect                                    │
//! │  ─────────                    ──────                                    │
//! │  add(product)          ──►   line exists? qty + 1 : push(qty 1)         │
//! │  update_quantity(id, n) ──►  n <= 0 ? remove : qty = n                  │
//! │  remove(id)            ──►   retain(id != line.id), unknown id = no-op  │
//! │  clear()               ──►   lines.clear(), customer = None             │
//! │                                                                         │
//! │  State machine:                                                         │
//! │                                                                         │
//! │      ┌───────┐  add          ┌───────────┐                              │
//! │      │ Empty │ ────────────► │ Populated │                              │
//! │      └───────┘ ◄──────────── └───────────┘                              │
//! │                 clear / payment / last line removed                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line per product id
//! - Every line has quantity > 0
//! - `line.total == line.unit_price × line.quantity` after every mutation
//! - Line totals and the subtotal fit in an `i64`; a quantity that would
//!   overflow them is refused before anything is written
//! - The unit price is frozen when the line is created

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{Customer, Product};

// =============================================================================
// Stock Policy
// =============================================================================

/// What to do when a cart quantity exceeds the shelf stock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockPolicy {
    /// Accept silently (backorder).
    #[default]
    Allow,
    /// Accept, but report the shortfall so the counter can warn.
    Warn,
    /// Refuse the mutation and leave the cart unchanged.
    Reject,
}

impl FromStr for StockPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "allow" => Ok(StockPolicy::Allow),
            "warn" => Ok(StockPolicy::Warn),
            "reject" => Ok(StockPolicy::Reject),
            other => Err(ValidationError::InvalidFormat {
                field: "stockPolicy".to_string(),
                reason: format!("unknown policy '{}'", other),
            }),
        }
    }
}

/// Outcome of a stock check on a cart mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum StockCheck {
    Within,
    Exceeds { available: i64, requested: i64 },
}

impl StockCheck {
    pub fn for_product(product: &Product, requested: i64) -> Self {
        if product.has_stock_for(requested) {
            StockCheck::Within
        } else {
            StockCheck::Exceeds {
                available: product.stock,
                requested,
            }
        }
    }

    #[inline]
    pub fn is_exceeded(&self) -> bool {
        matches!(self, StockCheck::Exceeds { .. })
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One product-quantity pairing in the cart.
///
/// `product` is a frozen copy of the catalog entry, so the line displays
/// consistently even if a new catalog snapshot is loaded mid-session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product: Product,
    pub quantity: i64,
    /// Price at time of adding (frozen).
    pub unit_price: Money,
    pub total: Money,
}

impl CartLine {
    fn new(product: &Product) -> Self {
        CartLine {
            product: product.clone(),
            quantity: 1,
            unit_price: product.price,
            total: product.price,
        }
    }

    #[inline]
    pub fn product_id(&self) -> &str {
        &self.product.id
    }

    fn set_quantity(&mut self, quantity: i64, total: Money) {
        self.quantity = quantity;
        self.total = total;
    }
}

// =============================================================================
// Cart
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CartPhase {
    Empty,
    Populated,
}

/// The shopping cart of one checkout session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    lines: Vec<CartLine>,
    customer: Option<Customer>,
    policy: StockPolicy,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl Cart {
    /// Creates an empty cart with the permissive stock policy.
    pub fn new() -> Self {
        Self::with_policy(StockPolicy::default())
    }

    pub fn with_policy(policy: StockPolicy) -> Self {
        Cart {
            lines: Vec::new(),
            customer: None,
            policy,
        }
    }

    pub fn policy(&self) -> StockPolicy {
        self.policy
    }

    fn enforce(&self, product: &Product, requested: i64) -> CoreResult<StockCheck> {
        let check = StockCheck::for_product(product, requested);
        if let (StockPolicy::Reject, StockCheck::Exceeds { available, requested }) =
            (self.policy, check)
        {
            return Err(CoreError::InsufficientStock {
                product_id: product.id.clone(),
                name: product.name.clone(),
                available,
                requested,
            });
        }
        Ok(check)
    }

    /// Whether `total` still fits next to every line except `skip`.
    fn fits_subtotal(&self, skip: Option<usize>, total: Money) -> bool {
        self.lines
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != skip)
            .try_fold(total, |acc, (_, l)| acc.checked_add(l.total))
            .is_some()
    }

    /// Total of line `index` at `quantity`, checked against overflow.
    fn price_line(&self, index: usize, quantity: i64) -> CoreResult<Money> {
        let line = &self.lines[index];
        line.unit_price
            .checked_multiply_quantity(quantity)
            .filter(|total| self.fits_subtotal(Some(index), *total))
            .ok_or_else(|| CoreError::QuantityOverflow {
                product_id: line.product.id.clone(),
                quantity,
            })
    }

    /// Adds one unit of `product`.
    ///
    /// ## Behavior
    /// - Product already in cart: quantity + 1, total recomputed from the
    ///   frozen unit price
    /// - Product not in cart: new line with quantity 1 at the current price
    ///
    /// Only fails under `StockPolicy::Reject`, leaving the cart unchanged.
    pub fn add(&mut self, product: &Product) -> CoreResult<StockCheck> {
        match self.lines.iter().position(|l| l.product_id() == product.id) {
            Some(index) => {
                let line = &self.lines[index];
                let requested = line.quantity.saturating_add(1);
                let check = self.enforce(&line.product, requested)?;
                let total = self.price_line(index, requested)?;
                self.lines[index].set_quantity(requested, total);
                Ok(check)
            }
            None => {
                let check = self.enforce(product, 1)?;
                if !self.fits_subtotal(None, product.price) {
                    return Err(CoreError::QuantityOverflow {
                        product_id: product.id.clone(),
                        quantity: 1,
                    });
                }
                self.lines.push(CartLine::new(product));
                Ok(check)
            }
        }
    }

    /// Sets the quantity of a line.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: removes the line
    /// - Product not in cart: no-op
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> CoreResult<StockCheck> {
        if quantity <= 0 {
            self.remove(product_id);
            return Ok(StockCheck::Within);
        }

        let Some(index) = self.lines.iter().position(|l| l.product_id() == product_id) else {
            return Ok(StockCheck::Within);
        };

        let check = self.enforce(&self.lines[index].product, quantity)?;
        let total = self.price_line(index, quantity)?;
        self.lines[index].set_quantity(quantity, total);
        Ok(check)
    }

    /// Removes a line by product id. Returns whether a line was removed;
    /// an unknown id is not an error.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let initial_len = self.lines.len();
        self.lines.retain(|l| l.product_id() != product_id);
        self.lines.len() != initial_len
    }

    /// Empties the cart and drops the attached customer.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.customer = None;
    }

    pub fn attach_customer(&mut self, customer: Customer) {
        self.customer = Some(customer);
    }

    pub fn detach_customer(&mut self) -> Option<Customer> {
        self.customer.take()
    }

    pub fn customer(&self) -> Option<&Customer> {
        self.customer.as_ref()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id() == product_id)
    }

    pub fn phase(&self) -> CartPhase {
        if self.lines.is_empty() {
            CartPhase::Empty
        } else {
            CartPhase::Populated
        }
    }

    /// Number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    /// Total units across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Σ line totals.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(|l| l.total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
