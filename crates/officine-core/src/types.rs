//! # Domain Types
//!
//! Core domain types used throughout Officine POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Sale       │   │    Customer     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id (UUID)      │   │  id             │       │
//! │  │  name           │   │  items          │   │  name, phone    │       │
//! │  │  price / cost   │   │  subtotal, tax  │   │  loyalty tier   │       │
//! │  │  stock, expiry  │   │  total, method  │   │  purchases      │       │
//! │  │  equivalents    │   └────────┬────────┘   └─────────────────┘       │
//! │  └─────────────────┘            │                                       │
//! │                        ┌────────▼────────┐   ┌─────────────────┐       │
//! │                        │    SaleItem     │   │ PaymentMethod   │       │
//! │                        │  (snapshots)    │   │ Cash/Card/Ins.  │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every type here is immutable data: catalog, customers and sales history
//! are session snapshots that derivations only ever read.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product the pharmacy sells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,

    /// Display name shown to the cashier.
    pub name: String,

    pub description: Option<String>,

    /// Unit sale price.
    pub price: Money,

    /// Unit purchase price from the supplier.
    pub cost_price: Money,

    /// Margin over the sale price, in percent.
    pub margin: i64,

    /// Units currently on the shelf.
    pub stock: i64,

    /// Therapeutic category label ("Antalgiques", "Hygiène", ...).
    pub category: String,

    /// EAN-13 barcode.
    pub barcode: Option<String>,

    /// Ids of substitutable products (generic/brand pairs).
    pub equivalents: Vec<String>,

    #[ts(as = "Option<String>")]
    pub expiry_date: Option<NaiveDate>,

    pub supplier: String,

    /// Popularity score; higher sells more often.
    pub popularity: u32,

    pub dosage: Option<String>,

    pub active_ingredient: Option<String>,

    /// Whether a prescription ("ordonnance") is required.
    pub prescription: bool,
}

impl Product {
    /// Checks if `quantity` units can be taken from the shelf.
    #[inline]
    pub fn has_stock_for(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }

    /// Whether `other` is listed as a substitute for this product.
    #[inline]
    pub fn is_equivalent_to(&self, other: &Product) -> bool {
        self.equivalents.iter().any(|id| *id == other.id)
    }

    /// Stock valued at sale price.
    #[inline]
    pub fn stock_value(&self) -> Money {
        self.price.multiply_quantity(self.stock)
    }
}

// =============================================================================
// Customer
// =============================================================================

/// Loyalty classification. Display only, never used for pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum LoyaltyTier {
    Bronze,
    Silver,
    Gold,
}

impl Default for LoyaltyTier {
    fn default() -> Self {
        LoyaltyTier::Bronze
    }
}

/// A registered pharmacy customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    #[ts(as = "Option<String>")]
    pub date_of_birth: Option<NaiveDate>,
    /// Known allergies ("Pénicilline", ...).
    pub allergies: Vec<String>,
    /// Chronic treatments on file.
    pub prescriptions: Vec<String>,
    #[ts(as = "Option<String>")]
    pub last_visit: Option<NaiveDate>,
    /// Lifetime purchases as recorded on the customer card.
    pub total_purchases: Money,
    pub loyalty: LoyaltyTier,
}

// =============================================================================
// Payment Method
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Card payment on an external terminal.
    Card,
    /// Covered by the customer's health insurance.
    Insurance,
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A line of a finalized sale.
/// Uses the snapshot pattern: product data is frozen at the time of sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub product_id: String,
    /// Product name at time of sale (frozen).
    pub name_snapshot: String,
    /// Product category at time of sale (frozen).
    pub category_snapshot: String,
    pub quantity: i64,
    /// Unit price at time of sale (frozen).
    pub unit_price: Money,
    /// unit_price × quantity
    pub total: Money,
}

/// A finalized sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: String,
    #[ts(as = "String")]
    pub date: NaiveDateTime,
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
    pub items: Vec<SaleItem>,
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
    pub payment_method: PaymentMethod,
    pub cashier_id: String,
}

impl Sale {
    /// Total units across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, equivalents: &[&str]) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Produit {}", id),
            description: None,
            price: Money::from_amount(1000),
            cost_price: Money::from_amount(600),
            margin: 40,
            stock: 12,
            category: "Antalgiques".to_string(),
            barcode: None,
            equivalents: equivalents.iter().map(|s| s.to_string()).collect(),
            expiry_date: None,
            supplier: "Sanofi".to_string(),
            popularity: 10,
            dosage: None,
            active_ingredient: None,
            prescription: false,
        }
    }

    #[test]
    fn test_product_helpers() {
        let a = product("1", &["2"]);
        let b = product("2", &[]);

        assert!(a.is_equivalent_to(&b));
        assert!(!b.is_equivalent_to(&a));
        assert!(a.has_stock_for(12));
        assert!(!a.has_stock_for(13));
        assert_eq!(a.stock_value().amount(), 12_000);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(LoyaltyTier::default(), LoyaltyTier::Bronze);
        assert_eq!(PaymentMethod::default(), PaymentMethod::Cash);
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(serde_json::to_string(&LoyaltyTier::Gold).unwrap(), "\"gold\"");
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Insurance).unwrap(),
            "\"insurance\""
        );
    }
}
