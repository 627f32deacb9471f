//! # officine-core: Pure Business Logic for Officine POS
//!
//! This crate holds every calculation the pharmacy counter performs, as pure
//! functions over immutable snapshots. It never touches the file system, the
//! network or the clock.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Officine POS Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Presentation surface (external)                │   │
//! │  │   Caisse ──► Panier ──► Paiement      Inventaire   Clients      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               officine-counter (session commands)               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ officine-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   catalog ─► filter ─► cart ─► checkout                         │   │
//! │  │   inventory   customers   dashboard   validation   seed         │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • PURE FUNCTIONS                            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Customer, Sale, ...)
//! - [`money`] - Integer money in FCFA
//! - [`catalog`] - Read-only product catalog
//! - [`filter`] - Catalog search and the popular view
//! - [`cart`] - The cart engine
//! - [`checkout`] - Totals and payment simulation
//! - [`inventory`] - Stock/expiry status, inventory views and export rows
//! - [`customers`] - Customer search and analytics
//! - [`dashboard`] - Daily metrics derived from the sales history
//! - [`validation`] - Input validation and the product draft
//! - [`seed`] - Demo data set
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use officine_core::cart::Cart;
//! use officine_core::checkout::compute_totals;
//! use officine_core::seed;
//!
//! let catalog = seed::demo_catalog();
//! let paracetamol = catalog.get("1").unwrap();
//!
//! let mut cart = Cart::new();
//! cart.add(paracetamol).unwrap();
//! cart.add(paracetamol).unwrap();
//!
//! let totals = compute_totals(&cart);
//! assert_eq!(totals.subtotal.amount(), 3500);
//! assert_eq!(totals.total, totals.subtotal);
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod customers;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod inventory;
pub mod money;
pub mod seed;
pub mod types;
pub mod validation;

pub use cart::{Cart, CartLine, CartPhase, StockCheck, StockPolicy};
pub use catalog::Catalog;
pub use checkout::Totals;
pub use error::{CoreError, CoreResult, ValidationError};
pub use filter::CategoryFilter;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Number of products shown in the popular view.
pub const POPULAR_LIMIT: usize = 8;

/// Products strictly below this stock count are flagged as low stock in the
/// inventory view.
pub const LOW_STOCK_THRESHOLD: i64 = 50;

/// Dashboard alert threshold, stricter than the inventory one.
pub const DASHBOARD_LOW_STOCK_THRESHOLD: i64 = 10;

/// A product expiring within this many days is "expiring soon".
pub const EXPIRING_SOON_DAYS: i64 = 90;

/// A customer with a purchase in the last N days counts as active.
pub const ACTIVE_CUSTOMER_DAYS: i64 = 30;
