//! # Officine Counter Library
//!
//! The session/command layer of the pharmacy counter. A presentation
//! surface (the "Caisse", "Inventaire", "Clients" and "Tableau de bord"
//! screens) calls the commands; all business logic lives in
//! `officine-core`.
//!
//! ## Module Organization
//! ```text
//! officine_counter/
//! ├── lib.rs          ◄─── You are here (logging bootstrap)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── store.rs    ◄─── Catalog/customers/sales snapshot
//! │   ├── cart.rs     ◄─── Cart state and session registry
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── product.rs  ◄─── Search, popular view, categories, equivalents
//! │   ├── cart.rs     ◄─── Cart manipulation
//! │   ├── sale.rs     ◄─── Totals and payment
//! │   ├── inventory.rs◄─── Inventory view, stats, export, new product
//! │   ├── customer.rs ◄─── Customer search and analytics
//! │   └── dashboard.rs◄─── Daily metrics
//! ├── notify.rs       ◄─── Fire-and-forget notifications
//! ├── export.rs       ◄─── Inventory export collaborator
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod export;
pub mod notify;
pub mod state;

use chrono::{Local, NaiveDate, NaiveDateTime};
use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "info,officine=debug";

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=officine_counter=trace` - Trace the counter only
/// - Default: `info,officine=debug`
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}

/// Local wall-clock time, for commands that stamp sales.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Local calendar day, for expiry and dashboard computations.
pub fn today() -> NaiveDate {
    now().date()
}
