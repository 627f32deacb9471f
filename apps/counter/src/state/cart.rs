//! # Cart State
//!
//! Holds the cart of each counter session.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>` because:
//! 1. Multiple commands may access/modify the cart
//! 2. Only one command should modify the cart at a time
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Counter Action           Command                 Cart State Change     │
//! │  ──────────────           ───────                 ─────────────────     │
//! │                                                                         │
//! │  Click Product ──────────► add_to_cart() ───────► line.qty += 1        │
//! │                                                                         │
//! │  Change Quantity ────────► update_cart_item() ──► line.qty = n         │
//! │                                                                         │
//! │  Click Remove ───────────► remove_from_cart() ──► lines.remove(i)      │
//! │                                                                         │
//! │  Click Clear ────────────► clear_cart() ────────► lines.clear()        │
//! │                                                                         │
//! │  Pay ────────────────────► process_payment() ───► lines.clear()        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Sessions
//! Every session id owns an independent [`CartState`]. Nothing is shared
//! across sessions.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use officine_core::{Cart, StockPolicy};
use tracing::info;

/// Cart state for one counter session.
///
/// ## Why Not RwLock?
/// Cart operations are quick, and most of them modify state.
#[derive(Debug)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    /// Creates a new empty cart state with the default (allow) policy.
    pub fn new() -> Self {
        CartState::with_policy(StockPolicy::default())
    }

    pub fn with_policy(policy: StockPolicy) -> Self {
        CartState {
            cart: Arc::new(Mutex::new(Cart::with_policy(policy))),
        }
    }

    /// Cart mutations check stock and overflow before writing anything, so a
    /// poisoned lock still guards a consistent cart.
    fn lock(&self) -> MutexGuard<'_, Cart> {
        self.cart.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let totals = cart_state.with_cart(compute_totals);
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.lock();
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// cart_state.with_cart_mut(|cart| cart.add(&product))?;
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.lock();
        f(&mut cart)
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps session ids to their carts.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<String, Arc<CartState>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<CartState>>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the session's cart, opening an empty one on first use.
    pub fn open(&self, session_id: &str, policy: StockPolicy) -> Arc<CartState> {
        let mut sessions = self.lock();
        sessions
            .entry(session_id.to_string())
            .or_insert_with(|| {
                info!(session_id = %session_id, ?policy, "Session opened");
                Arc::new(CartState::with_policy(policy))
            })
            .clone()
    }

    pub fn get(&self, session_id: &str) -> Option<Arc<CartState>> {
        self.lock().get(session_id).cloned()
    }

    /// Drops the session's cart. Returns false if there was none.
    pub fn close(&self, session_id: &str) -> bool {
        let closed = self.lock().remove(session_id).is_some();
        if closed {
            info!(session_id = %session_id, "Session closed");
        }
        closed
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
