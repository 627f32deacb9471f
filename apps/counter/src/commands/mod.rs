//! # Commands Module
//!
//! Every operation the presentation surface can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (exports)
//! ├── product.rs    ◄─── Product search, popular view, categories
//! ├── cart.rs       ◄─── Cart manipulation
//! ├── sale.rs       ◄─── Totals and payment
//! ├── inventory.rs  ◄─── Inventory view, stats, export, new product
//! ├── customer.rs   ◄─── Customer search and analytics
//! └── dashboard.rs  ◄─── Daily metrics
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the snapshot
//! fn search_products(store: &StoreState, ...)
//!
//! // Only needs the cart
//! fn get_cart(cart: &CartState)
//!
//! // Needs both, and announces what happened
//! fn add_to_cart(store: &StoreState, cart: &CartState, notifier: &dyn Notifier, ...)
//! ```
//!
//! Commands log on entry with `debug!` and return `Result<T, ApiError>`
//! when they can fail.

pub mod cart;
pub mod customer;
pub mod dashboard;
pub mod inventory;
pub mod product;
pub mod sale;
