//! # Cart Commands
//!
//! Commands for cart manipulation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐                         │
//! │  │  Empty   │────►│Populated │────►│   Sale   │                         │
//! │  │  Cart    │     │          │     │ (receipt)│                         │
//! │  └──────────┘     └──────────┘     └──────────┘                         │
//! │       ▲                │                 │                              │
//! │       │           add_to_cart      process_payment                     │
//! │       │           update_item        (sale.rs)                          │
//! │       │           remove_item            │                              │
//! │       │                │                 │                              │
//! │       └── clear_cart ◄─┴─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Updating or removing a product that is not in the cart is a silent
//! no-op. Only `add_to_cart` looks the product up, and fails on an unknown
//! id.

use serde::Serialize;
use tracing::{debug, info, warn};

use officine_core::checkout::{compute_totals, Totals};
use officine_core::{Cart, CartLine, CartPhase, Customer, Money, Product, StockCheck, StockPolicy};

use crate::error::ApiError;
use crate::notify::{Notification, Notifier};
use crate::state::{CartState, StoreState};

/// One cart line as displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineDto {
    pub product_id: String,
    pub name: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub total: Money,
    /// Shelf stock at the time the product was added.
    pub stock: i64,
}

impl From<&CartLine> for CartLineDto {
    fn from(line: &CartLine) -> Self {
        CartLineDto {
            product_id: line.product.id.clone(),
            name: line.product.name.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price,
            total: line.total,
            stock: line.product.stock,
        }
    }
}

/// Customer attached to the cart, as displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartCustomerDto {
    pub id: String,
    pub name: String,
    pub phone: Option<String>,
    pub allergies: Vec<String>,
}

impl From<&Customer> for CartCustomerDto {
    fn from(c: &Customer) -> Self {
        CartCustomerDto {
            id: c.id.clone(),
            name: c.name.clone(),
            phone: c.phone.clone(),
            allergies: c.allergies.clone(),
        }
    }
}

/// Cart response including lines, totals and the attached customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLineDto>,
    pub totals: Totals,
    pub phase: CartPhase,
    pub customer: Option<CartCustomerDto>,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            items: cart.lines().iter().map(CartLineDto::from).collect(),
            totals: compute_totals(cart),
            phase: cart.phase(),
            customer: cart.customer().map(CartCustomerDto::from),
        }
    }
}

/// Announces a stock shortfall when the cart runs under the `warn` policy.
fn report_stock(
    check: StockCheck,
    policy: StockPolicy,
    product: &Product,
    notifier: &dyn Notifier,
) {
    if let (StockPolicy::Warn, StockCheck::Exceeds { available, requested }) = (policy, check) {
        warn!(
            product_id = %product.id,
            available,
            requested,
            "Cart quantity exceeds stock"
        );
        notifier.notify(Notification::StockWarning {
            product_id: product.id.clone(),
            name: product.name.clone(),
            available,
            requested,
        });
    }
}

/// Gets the current cart contents.
pub fn get_cart(cart: &CartState) -> CartResponse {
    debug!("get_cart command");
    cart.with_cart(|c| CartResponse::from(c))
}

/// Adds one unit of a product to the cart.
///
/// ## Behavior
/// - Product already in cart: quantity + 1
/// - Product not in cart: new line with quantity 1, price frozen
///
/// ## Errors
/// - `NOT_FOUND` if the id is not in the catalog
/// - `INSUFFICIENT_STOCK` under the `reject` policy; the cart is unchanged
pub fn add_to_cart(
    store: &StoreState,
    cart: &CartState,
    notifier: &dyn Notifier,
    product_id: &str,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "add_to_cart command");

    let product = store.product(product_id)?;

    let (check, policy, response) = cart.with_cart_mut(|c| {
        let check = c.add(product)?;
        Ok::<_, ApiError>((check, c.policy(), CartResponse::from(&*c)))
    })?;

    info!(product_id = %product.id, items = response.totals.item_count, "Product added to cart");
    notifier.notify(Notification::ProductAdded {
        product_id: product.id.clone(),
        name: product.name.clone(),
    });
    report_stock(check, policy, product, notifier);

    Ok(response)
}

/// Sets the quantity of a cart line.
///
/// ## Behavior
/// - Quantity 0 or less: removes the line
/// - Product not in cart: no-op
pub fn update_cart_item(
    cart: &CartState,
    notifier: &dyn Notifier,
    product_id: &str,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, quantity = %quantity, "update_cart_item command");

    let (check, policy, product, response) = cart.with_cart_mut(|c| {
        let check = c.update_quantity(product_id, quantity)?;
        let product = c.line(product_id).map(|l| l.product.clone());
        Ok::<_, ApiError>((check, c.policy(), product, CartResponse::from(&*c)))
    })?;

    if let Some(product) = product {
        report_stock(check, policy, &product, notifier);
    }

    Ok(response)
}

/// Removes a line from the cart. Absent ids leave the cart unchanged.
pub fn remove_from_cart(cart: &CartState, product_id: &str) -> CartResponse {
    debug!(product_id = %product_id, "remove_from_cart command");
    cart.with_cart_mut(|c| {
        if c.remove(product_id) {
            info!(product_id = %product_id, "Product removed from cart");
        }
        CartResponse::from(&*c)
    })
}

/// Empties the cart and detaches the customer.
pub fn clear_cart(cart: &CartState) -> CartResponse {
    debug!("clear_cart command");
    cart.with_cart_mut(|c| {
        c.clear();
        info!("Cart cleared");
        CartResponse::from(&*c)
    })
}

/// Attaches a customer to the cart, or detaches with `None`.
pub fn select_customer(
    store: &StoreState,
    cart: &CartState,
    customer_id: Option<&str>,
) -> Result<CartResponse, ApiError> {
    debug!(customer_id = ?customer_id, "select_customer command");

    let customer = customer_id.map(|id| store.customer(id)).transpose()?;

    Ok(cart.with_cart_mut(|c| {
        match customer {
            Some(customer) => c.attach_customer(customer.clone()),
            None => {
                c.detach_customer();
            }
        }
        CartResponse::from(&*c)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::notify::NotificationQueue;

    #[test]
    fn test_add_twice_then_other() {
        let store = StoreState::demo();
        let cart = CartState::new();
        let queue = NotificationQueue::new();

        add_to_cart(&store, &cart, &queue, "1").unwrap();
        add_to_cart(&store, &cart, &queue, "1").unwrap();
        let response = add_to_cart(&store, &cart, &queue, "4").unwrap();

        let lines: Vec<(&str, i64, i64)> = response
            .items
            .iter()
            .map(|l| (l.product_id.as_str(), l.quantity, l.total.amount()))
            .collect();
        assert_eq!(lines, vec![("1", 2, 3500), ("4", 1, 4450)]);
        assert_eq!(response.totals.subtotal.amount(), 7950);
        assert_eq!(response.totals.total.amount(), 7950);
        assert_eq!(response.phase, CartPhase::Populated);
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn test_add_unknown_product() {
        let store = StoreState::demo();
        let cart = CartState::new();
        let err = add_to_cart(&store, &cart, &NotificationQueue::new(), "99").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(get_cart(&cart).items.is_empty());
    }

    #[test]
    fn test_update_and_remove() {
        let store = StoreState::demo();
        let cart = CartState::new();
        let queue = NotificationQueue::new();
        add_to_cart(&store, &cart, &queue, "7").unwrap();

        let response = update_cart_item(&cart, &queue, "7", 5).unwrap();
        assert_eq!(response.items[0].quantity, 5);
        assert_eq!(response.totals.total.amount(), 3750);

        // Not in cart: no-op
        let response = update_cart_item(&cart, &queue, "8", 3).unwrap();
        assert_eq!(response.items.len(), 1);
        let response = remove_from_cart(&cart, "8");
        assert_eq!(response.items.len(), 1);

        let response = update_cart_item(&cart, &queue, "7", 0).unwrap();
        assert!(response.items.is_empty());
        assert_eq!(response.phase, CartPhase::Empty);
    }

    #[test]
    fn test_warn_policy_notifies() {
        let store = StoreState::demo();
        let cart = CartState::with_policy(StockPolicy::Warn);
        let queue = NotificationQueue::new();
        add_to_cart(&store, &cart, &queue, "10").unwrap();
        queue.drain();

        // Ventoline has 25 in stock
        let response = update_cart_item(&cart, &queue, "10", 30).unwrap();
        assert_eq!(response.items[0].quantity, 30);
        assert_eq!(
            queue.drain(),
            vec![Notification::StockWarning {
                product_id: "10".to_string(),
                name: "Ventoline".to_string(),
                available: 25,
                requested: 30,
            }]
        );
    }

    #[test]
    fn test_allow_policy_is_silent() {
        let store = StoreState::demo();
        let cart = CartState::new();
        let queue = NotificationQueue::new();
        add_to_cart(&store, &cart, &queue, "10").unwrap();
        queue.drain();

        update_cart_item(&cart, &queue, "10", 30).unwrap();
        assert!(queue.is_empty());
    }

    #[test]
    fn test_reject_policy_refuses() {
        let store = StoreState::demo();
        let cart = CartState::with_policy(StockPolicy::Reject);
        let queue = NotificationQueue::new();
        add_to_cart(&store, &cart, &queue, "10").unwrap();

        let err = update_cart_item(&cart, &queue, "10", 26).unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert_eq!(get_cart(&cart).items[0].quantity, 1);
    }

    #[test]
    fn test_select_customer_and_clear() {
        let store = StoreState::demo();
        let cart = CartState::new();
        let queue = NotificationQueue::new();
        add_to_cart(&store, &cart, &queue, "2").unwrap();

        let response = select_customer(&store, &cart, Some("1")).unwrap();
        let customer = response.customer.unwrap();
        assert_eq!(customer.name, "Fatou Ouédraogo");
        assert_eq!(customer.allergies, vec!["Pénicilline".to_string()]);

        assert_eq!(
            select_customer(&store, &cart, Some("42")).unwrap_err().code,
            ErrorCode::NotFound
        );
        assert!(get_cart(&cart).customer.is_some());

        let response = clear_cart(&cart);
        assert!(response.items.is_empty());
        assert!(response.customer.is_none());
        assert_eq!(store.catalog().len(), 10);
    }

    #[test]
    fn test_oversized_quantity_keeps_cart_consistent() {
        let store = StoreState::demo();
        let cart = CartState::new();
        let queue = NotificationQueue::new();
        add_to_cart(&store, &cart, &queue, "1").unwrap();

        let err = update_cart_item(&cart, &queue, "1", i64::MAX / 1000).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let response = get_cart(&cart);
        assert_eq!(response.items[0].quantity, 1);
        assert_eq!(response.items[0].total.amount(), 1750);
        assert_eq!(response.totals.total.amount(), 1750);

        // The cart stays usable after the refusal
        let response = update_cart_item(&cart, &queue, "1", 2).unwrap();
        assert_eq!(response.totals.total.amount(), 3500);
    }

    #[test]
    fn test_detach_customer() {
        let store = StoreState::demo();
        let cart = CartState::new();
        select_customer(&store, &cart, Some("2")).unwrap();
        let response = select_customer(&store, &cart, None).unwrap();
        assert!(response.customer.is_none());
    }
}
