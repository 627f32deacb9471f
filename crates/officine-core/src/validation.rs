//! # Validation Module
//!
//! Input validation for Officine POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation surface                                          │
//! │  └── Keeps the raw form text as the cashier types it (ProductDraft)    │
//! │           │                                                             │
//! │           ▼  submit                                                     │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── Required fields, lengths                                          │
//! │  └── Numeric coercion (price, stock, cost)                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Product (typed, margin computed)                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation runs once, at submit time, never per keystroke.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Product;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required text field and returns it trimmed.
///
/// ## Example
/// ```rust
/// use officine_core::validation::validate_required;
///
/// assert_eq!(validate_required("name", "  Smecta ", 200).unwrap(), "Smecta");
/// assert!(validate_required("name", "   ", 200).is_err());
/// ```
pub fn validate_required(field: &str, value: &str, max: usize) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(value.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Parses a whole, non-negative number typed into a form field.
///
/// Surrounding spaces and space-grouped thousands (`"1 750"`) are accepted.
pub fn parse_amount(field: &str, raw: &str) -> ValidationResult<i64> {
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    if cleaned.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    let value: i64 = cleaned.parse().map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a whole number".to_string(),
    })?;

    if value < 0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(value)
}

/// Validates a sale price: must be strictly positive.
pub fn validate_price(field: &str, raw: &str) -> ValidationResult<Money> {
    let amount = parse_amount(field, raw)?;
    if amount == 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(Money::from_amount(amount))
}

// =============================================================================
// Product Draft
// =============================================================================

/// The "new product" form, as typed.
///
/// Numeric fields stay text until [`ProductDraft::submit`] so a half-typed
/// value never has to be representable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductDraft {
    pub name: String,
    pub price: String,
    pub stock: String,
    pub category: String,
    pub supplier: String,
    pub cost_price: String,
    pub description: String,
    pub prescription: bool,
}

impl ProductDraft {
    /// Validates every field and builds the product.
    ///
    /// The margin is derived from price and cost. The caller supplies the id.
    ///
    /// ## Example
    /// ```rust
    /// use officine_core::validation::ProductDraft;
    ///
    /// let draft = ProductDraft {
    ///     name: "Ibuprofène 400mg".into(),
    ///     price: "2 000".into(),
    ///     stock: "60".into(),
    ///     category: "Antalgiques".into(),
    ///     supplier: "Mylan".into(),
    ///     cost_price: "1200".into(),
    ///     ..Default::default()
    /// };
    /// let product = draft.submit("11").unwrap();
    /// assert_eq!(product.margin, 40);
    /// ```
    pub fn submit(&self, id: &str) -> ValidationResult<Product> {
        let name = validate_required("name", &self.name, MAX_NAME_LEN)?;
        let price = validate_price("price", &self.price)?;
        let stock = parse_amount("stock", &self.stock)?;
        let category = validate_required("category", &self.category, MAX_NAME_LEN)?;
        let supplier = validate_required("supplier", &self.supplier, MAX_NAME_LEN)?;
        let cost_price = Money::from_amount(parse_amount("costPrice", &self.cost_price)?);

        let description = self.description.trim();

        Ok(Product {
            id: id.to_string(),
            name,
            description: (!description.is_empty()).then(|| description.to_string()),
            price,
            cost_price,
            margin: price.margin_percent_over(cost_price),
            stock,
            category,
            barcode: None,
            equivalents: Vec::new(),
            expiry_date: None,
            supplier,
            popularity: 0,
            dosage: None,
            active_ingredient: None,
            prescription: self.prescription,
        })
    }
}
