//! # Error Types
//!
//! Domain-specific error types for officine-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  officine-core errors (this file)                                      │
//! │  ├── CoreError        - Business rule failures                         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  officine-counter errors (app crate)                                   │
//! │  ├── ConfigError      - Bad configuration values                       │
//! │  ├── ExportError      - Export collaborator failures                   │
//! │  └── ApiError         - What the presentation surface sees             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Presentation           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Unknown product ids on cart update/remove are NOT errors: those
//! operations are best-effort no-ops.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product id is not in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Customer id is not in the customer list.
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// Requested quantity exceeds stock under the `Reject` stock policy.
    ///
    /// ## User Workflow
    /// ```text
    /// Cart line: Ventoline x25 (stock 25)
    ///      │
    ///      ▼
    /// add_to_cart(Ventoline)
    ///      │
    ///      ▼
    /// InsufficientStock { name: "Ventoline", available: 25, requested: 26 }
    ///      │
    ///      ▼
    /// Cart unchanged, UI shows: "Only 25 Ventoline in stock"
    /// ```
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: String,
        name: String,
        available: i64,
        requested: i64,
    },

    /// The line total or the cart subtotal would not fit in an amount.
    #[error("Quantity {quantity} is too large for product {product_id}")]
    QuantityOverflow { product_id: String, quantity: i64 },

    /// Payment requested on a cart with no lines.
    #[error("Cannot process payment for an empty cart")]
    EmptyCart,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised when a typed draft is submitted, never per keystroke.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. a price that is not a number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
