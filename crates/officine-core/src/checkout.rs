//! # Checkout Simulator
//!
//! Computes totals and "commits" a sale. Nothing is persisted: the
//! finalized [`Sale`] is handed back to the caller, who announces it, and
//! the cart is reset.
//!
//! ## Payment Flow
//! ```text
//! Cart (Populated)
//!      │
//!      ▼
//! compute_totals ──► subtotal = Σ line.total, tax = 0, total = subtotal
//!      │
//!      ▼
//! process_payment ──► Sale { id: UUID v4, items (snapshots), totals }
//!      │
//!      ▼
//! cart.clear() ──► Cart (Empty), customer detached
//! ```
//!
//! Two payments on two carts produce two unrelated sales. There is no
//! "already settled" guard; the transaction id is what one would hang it on.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::{Cart, CartLine};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{PaymentMethod, Sale, SaleItem};

/// Cart totals summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub item_count: usize,
    pub total_quantity: i64,
    pub subtotal: Money,
    /// Always zero: medicines carry no sales tax at this counter.
    pub tax: Money,
    pub total: Money,
}

/// Computes subtotal, tax and total for the cart.
pub fn compute_totals(cart: &Cart) -> Totals {
    let subtotal = cart.subtotal();
    let tax = Money::zero();
    Totals {
        item_count: cart.item_count(),
        total_quantity: cart.total_quantity(),
        subtotal,
        tax,
        total: subtotal + tax,
    }
}

impl From<&CartLine> for SaleItem {
    fn from(line: &CartLine) -> Self {
        SaleItem {
            product_id: line.product.id.clone(),
            name_snapshot: line.product.name.clone(),
            category_snapshot: line.product.category.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price,
            total: line.total,
        }
    }
}

/// Finalizes the sale and clears the cart.
///
/// ## Arguments
/// * `method` - How the customer paid
/// * `cashier_id` - Who rang the sale up
/// * `now` - Sale timestamp, supplied by the caller
///
/// ## Errors
/// `CoreError::EmptyCart` if there is nothing to sell; the cart is untouched.
pub fn process_payment(
    cart: &mut Cart,
    method: PaymentMethod,
    cashier_id: &str,
    now: NaiveDateTime,
) -> CoreResult<Sale> {
    if cart.is_empty() {
        return Err(CoreError::EmptyCart);
    }

    let totals = compute_totals(cart);
    let sale = Sale {
        id: Uuid::new_v4().to_string(),
        date: now,
        customer_id: cart.customer().map(|c| c.id.clone()),
        customer_name: cart.customer().map(|c| c.name.clone()),
        items: cart.lines().iter().map(SaleItem::from).collect(),
        subtotal: totals.subtotal,
        tax: totals.tax,
        total: totals.total,
        payment_method: method,
        cashier_id: cashier_id.to_string(),
    };

    cart.clear();
    Ok(sale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::{demo_catalog, demo_customers};
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 21)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn filled_cart() -> Cart {
        let catalog = demo_catalog();
        let mut cart = Cart::new();
        cart.add(catalog.get("1").unwrap()).unwrap();
        cart.add(catalog.get("1").unwrap()).unwrap();
        cart.add(catalog.get("4").unwrap()).unwrap();
        cart
    }

    #[test]
    fn test_totals() {
        let cart = filled_cart();
        let totals = compute_totals(&cart);

        assert_eq!(totals.item_count, 2);
        assert_eq!(totals.total_quantity, 3);
        assert_eq!(totals.subtotal.amount(), 7950);
        assert!(totals.tax.is_zero());
        assert_eq!(totals.total, totals.subtotal);
    }

    #[test]
    fn test_totals_of_empty_cart() {
        let totals = compute_totals(&Cart::new());
        assert!(totals.subtotal.is_zero());
        assert!(totals.total.is_zero());
        assert_eq!(totals.item_count, 0);
    }

    #[test]
    fn test_process_payment_builds_sale_and_clears() {
        let mut cart = filled_cart();
        cart.attach_customer(demo_customers().remove(0));

        let sale = process_payment(&mut cart, PaymentMethod::Card, "cashier1", now()).unwrap();

        assert_eq!(sale.total.amount(), 7950);
        assert_eq!(sale.items.len(), 2);
        assert_eq!(sale.items[0].quantity, 2);
        assert_eq!(sale.items[0].total.amount(), 3500);
        assert_eq!(sale.customer_name.as_deref(), Some("Fatou Ouédraogo"));
        assert_eq!(sale.payment_method, PaymentMethod::Card);
        assert!(Uuid::parse_str(&sale.id).is_ok());

        assert!(cart.is_empty());
        assert!(cart.customer().is_none());
    }

    #[test]
    fn test_repeated_payments_are_independent() {
        let mut first = filled_cart();
        let mut second = filled_cart();

        let a = process_payment(&mut first, PaymentMethod::Cash, "cashier1", now()).unwrap();
        let b = process_payment(&mut second, PaymentMethod::Cash, "cashier1", now()).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.total, b.total);
    }

    #[test]
    fn test_empty_cart_payment_fails() {
        let mut cart = Cart::new();
        let err = process_payment(&mut cart, PaymentMethod::Cash, "cashier1", now()).unwrap_err();
        assert!(matches!(err, CoreError::EmptyCart));
    }
}
