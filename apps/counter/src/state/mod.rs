//! # State Module
//!
//! Session state for the counter, split into focused types so each command
//! declares only the state it needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │          ┌──────────────────┬──────────────────┐                        │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │  StoreState  │  │  CartState   │  │   ConfigState    │              │
//! │  │              │  │              │  │                  │              │
//! │  │  catalog     │  │  Arc<Mutex<  │  │  store_name      │              │
//! │  │  customers   │  │    Cart      │  │  currency        │              │
//! │  │  sales       │  │  >>          │  │  stock_policy    │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                            ▲                                            │
//! │                    SessionRegistry                                      │
//! │                  (session id → CartState)                               │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • StoreState: Arc'd immutable snapshot                                │
//! │  • CartState: Protected by Arc<Mutex<T>> for exclusive access          │
//! │  • ConfigState: Read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;
mod store;

pub use cart::{CartState, SessionRegistry};
pub use config::{ConfigError, ConfigState};
pub use store::StoreState;
