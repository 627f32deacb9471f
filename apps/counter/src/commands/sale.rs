//! # Sale Commands
//!
//! Totals display and the payment button.
//!
//! ## Payment Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cart (Populated)                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  process_payment("card")                                                │
//! │       │                                                                 │
//! │       ├── checkout::process_payment ──► Sale { id: UUID v4, ... }       │
//! │       │                                 cart cleared                    │
//! │       ├── notify "Vente finalisée" (7 950 FCFA)                         │
//! │       ▼                                                                 │
//! │  ReceiptResponse                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The sale is handed back and announced; nothing is recorded.

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{debug, info, warn};

use officine_core::checkout::{self, compute_totals, Totals};
use officine_core::{PaymentMethod, Sale};

use crate::error::ApiError;
use crate::notify::{Notification, Notifier};
use crate::state::{CartState, ConfigState};

/// What the receipt screen shows after payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptResponse {
    pub store_name: String,
    pub sale: Sale,
    /// e.g. "7 950 FCFA"
    pub formatted_total: String,
}

/// Maps the payment button label to a method.
///
/// Unknown labels fall back to card, the counter's external terminal,
/// and are logged.
pub fn parse_payment_method(method: &str) -> PaymentMethod {
    match method.trim().to_lowercase().as_str() {
        "cash" | "espèces" | "especes" => PaymentMethod::Cash,
        "insurance" | "assurance" => PaymentMethod::Insurance,
        "card" | "carte" | "credit" | "debit" => PaymentMethod::Card,
        other => {
            warn!(method = %other, "Unknown payment method, recording as card");
            PaymentMethod::Card
        }
    }
}

/// Current totals of the cart.
pub fn get_totals(cart: &CartState) -> Totals {
    debug!("get_totals command");
    cart.with_cart(compute_totals)
}

/// Finalizes the sale, announces it and clears the cart.
///
/// ## Arguments
/// * `method` - Payment button label ("cash", "card", "insurance")
/// * `now` - Sale timestamp
///
/// ## Errors
/// `VALIDATION_ERROR` if the cart is empty; nothing is announced.
pub fn process_payment(
    cart: &CartState,
    config: &ConfigState,
    notifier: &dyn Notifier,
    method: &str,
    now: NaiveDateTime,
) -> Result<ReceiptResponse, ApiError> {
    let method = parse_payment_method(method);
    debug!(method = ?method, "process_payment command");

    let sale = cart.with_cart_mut(|c| checkout::process_payment(c, method, &config.cashier_id, now))?;
    let formatted_total = config.format_money(sale.total);

    info!(
        sale_id = %sale.id,
        total = %formatted_total,
        items = sale.items.len(),
        "Sale finalized"
    );
    notifier.notify(Notification::SaleFinalized {
        sale_id: sale.id.clone(),
        total: formatted_total.clone(),
    });

    Ok(ReceiptResponse {
        store_name: config.store_name.clone(),
        sale,
        formatted_total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::{add_to_cart, get_cart, select_customer};
    use crate::error::ErrorCode;
    use crate::notify::NotificationQueue;
    use crate::state::StoreState;
    use chrono::NaiveDate;
    use std::sync::{Arc, Mutex};
    use tracing::field::{Field, Visit};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(11, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_payment_method() {
        assert_eq!(parse_payment_method("Cash"), PaymentMethod::Cash);
        assert_eq!(parse_payment_method("assurance"), PaymentMethod::Insurance);
        assert_eq!(parse_payment_method("debit"), PaymentMethod::Card);
        assert_eq!(parse_payment_method("mobile money"), PaymentMethod::Card);
    }

    /// Records the level and message of every event.
    #[derive(Clone, Default)]
    struct CapturedEvents(Arc<Mutex<Vec<(Level, String)>>>);

    struct MessageVisitor(String);

    impl Visit for MessageVisitor {
        fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
            if field.name() == "message" {
                self.0 = format!("{:?}", value);
            }
        }
    }

    impl<S: Subscriber> Layer<S> for CapturedEvents {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut visitor = MessageVisitor(String::new());
            event.record(&mut visitor);
            self.0
                .lock()
                .unwrap()
                .push((*event.metadata().level(), visitor.0));
        }
    }

    #[test]
    fn test_unknown_payment_label_is_logged() {
        let captured = CapturedEvents::default();
        let subscriber = tracing_subscriber::registry().with(captured.clone());

        tracing::subscriber::with_default(subscriber, || {
            assert_eq!(parse_payment_method("carte"), PaymentMethod::Card);
            assert_eq!(parse_payment_method("mobile money"), PaymentMethod::Card);
        });

        let events = captured.0.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0, Level::WARN);
        assert!(events[0].1.contains("Unknown payment method"));
    }

    #[test]
    fn test_payment_announces_and_clears() {
        let store = StoreState::demo();
        let cart = CartState::new();
        let config = ConfigState::default();
        let queue = NotificationQueue::new();

        add_to_cart(&store, &cart, &queue, "1").unwrap();
        add_to_cart(&store, &cart, &queue, "1").unwrap();
        add_to_cart(&store, &cart, &queue, "4").unwrap();
        select_customer(&store, &cart, Some("3")).unwrap();
        assert_eq!(get_totals(&cart).total.amount(), 7950);
        queue.drain();

        let receipt = process_payment(&cart, &config, &queue, "cash", now()).unwrap();

        assert_eq!(receipt.formatted_total, "7 950 FCFA");
        assert_eq!(receipt.sale.payment_method, PaymentMethod::Cash);
        assert_eq!(receipt.sale.customer_id.as_deref(), Some("3"));
        assert_eq!(receipt.sale.cashier_id, "cashier1");
        assert_eq!(receipt.sale.date, now());

        match queue.drain().as_slice() {
            [Notification::SaleFinalized { sale_id, total }] => {
                assert_eq!(sale_id, &receipt.sale.id);
                assert_eq!(total, "7 950 FCFA");
            }
            other => panic!("unexpected notifications: {:?}", other),
        }

        let after = get_cart(&cart);
        assert!(after.items.is_empty());
        assert!(after.customer.is_none());
        assert!(get_totals(&cart).total.is_zero());
    }

    #[test]
    fn test_empty_cart_payment() {
        let cart = CartState::new();
        let queue = NotificationQueue::new();
        let err =
            process_payment(&cart, &ConfigState::default(), &queue, "card", now()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(queue.is_empty());
    }
}
