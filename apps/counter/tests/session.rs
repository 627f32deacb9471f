//! A full counter session driven through the public command API.

use chrono::{NaiveDate, NaiveDateTime};

use officine_core::inventory::InventoryQuery;
use officine_core::validation::ProductDraft;
use officine_core::{CartPhase, PaymentMethod, StockPolicy};
use officine_counter::commands::{cart, customer, dashboard, inventory, product, sale};
use officine_counter::error::ErrorCode;
use officine_counter::export::JsonExporter;
use officine_counter::notify::{Notification, NotificationQueue};
use officine_counter::state::{ConfigState, SessionRegistry, StoreState};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

fn now() -> NaiveDateTime {
    today().and_hms_opt(10, 45, 0).unwrap()
}

fn titles(queue: &NotificationQueue) -> Vec<&'static str> {
    queue.drain().iter().map(Notification::title).collect()
}

#[test]
fn cashier_sells_and_exports() {
    let dir = tempfile::tempdir().unwrap();
    let config = ConfigState {
        export_dir: dir.path().to_path_buf(),
        ..ConfigState::default()
    };
    let store = StoreState::demo();
    let sessions = SessionRegistry::new();
    let queue = NotificationQueue::new();
    let cart_state = sessions.open("caisse-1", config.stock_policy);

    // Browse the Antalgiques shelf
    let shelf = product::search_products(&store, "", "Antalgiques");
    assert_eq!(shelf.len(), 4);

    // Two Paracétamol, one Amoxicilline
    cart::add_to_cart(&store, &cart_state, &queue, "1").unwrap();
    cart::add_to_cart(&store, &cart_state, &queue, "1").unwrap();
    let response = cart::add_to_cart(&store, &cart_state, &queue, "4").unwrap();
    assert_eq!(response.totals.subtotal.amount(), 7950);
    assert_eq!(response.phase, CartPhase::Populated);
    assert_eq!(
        titles(&queue),
        vec!["Ajouté au panier", "Ajouté au panier", "Ajouté au panier"]
    );

    cart::select_customer(&store, &cart_state, Some("1")).unwrap();

    let receipt = sale::process_payment(&cart_state, &config, &queue, "card", now()).unwrap();
    assert_eq!(receipt.formatted_total, "7 950 FCFA");
    assert_eq!(receipt.sale.payment_method, PaymentMethod::Card);
    assert_eq!(receipt.sale.customer_name.as_deref(), Some("Fatou Ouédraogo"));
    assert_eq!(titles(&queue), vec!["Vente finalisée"]);

    let after = cart::get_cart(&cart_state);
    assert_eq!(after.phase, CartPhase::Empty);
    assert!(after.customer.is_none());

    // Paying again on the now-empty cart is refused
    let err = sale::process_payment(&cart_state, &config, &queue, "card", now()).unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);

    // Back office
    let board = dashboard::get_dashboard(&store, today());
    assert_eq!(board.metrics.expiring_items, 4);
    assert_eq!(customer::search_customers(&store, "sawadogo").len(), 1);

    let export = inventory::export_inventory(
        &store,
        &JsonExporter::new(&config.export_dir),
        &queue,
        &InventoryQuery {
            expiring_only: true,
            ..Default::default()
        },
        today(),
    );
    assert!(export.success);
    assert_eq!(export.row_count, 4);
    assert_eq!(titles(&queue), vec!["Export réussi"]);

    let written = std::fs::read_to_string(dir.path().join("inventaire_2025-06-01.json")).unwrap();
    let rows: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(rows[0]["Nom du Produit"], "Amoxicilline 1g");
    assert_eq!(rows[0]["Statut Stock"], "Moyen");

    // Draft a new product
    let drafted = inventory::submit_product_draft(
        &queue,
        &ProductDraft {
            name: "Ibuprofène 400mg".to_string(),
            price: "2 000".to_string(),
            stock: "60".to_string(),
            category: "Antalgiques".to_string(),
            supplier: "Mylan".to_string(),
            cost_price: "1 200".to_string(),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(drafted.stock_status, "Bon");
    assert_eq!(titles(&queue), vec!["Produit ajouté"]);
    assert_eq!(store.catalog().len(), 10);

    assert!(sessions.close("caisse-1"));
}

#[test]
fn strict_counter_refuses_oversell() {
    let config = ConfigState {
        stock_policy: StockPolicy::Reject,
        ..ConfigState::default()
    };
    let store = StoreState::demo();
    let sessions = SessionRegistry::new();
    let queue = NotificationQueue::new();
    let cart_state = sessions.open("caisse-2", config.stock_policy);

    cart::add_to_cart(&store, &cart_state, &queue, "10").unwrap();
    cart::update_cart_item(&cart_state, &queue, "10", 25).unwrap();

    let err = cart::add_to_cart(&store, &cart_state, &queue, "10").unwrap_err();
    assert_eq!(err.code, ErrorCode::InsufficientStock);
    assert_eq!(cart::get_cart(&cart_state).items[0].quantity, 25);
}

#[test]
fn warning_counter_keeps_selling() {
    let config = ConfigState {
        stock_policy: StockPolicy::Warn,
        ..ConfigState::default()
    };
    let store = StoreState::demo();
    let sessions = SessionRegistry::new();
    let queue = NotificationQueue::new();
    let cart_state = sessions.open("caisse-3", config.stock_policy);

    cart::add_to_cart(&store, &cart_state, &queue, "10").unwrap();
    cart::update_cart_item(&cart_state, &queue, "10", 25).unwrap();
    queue.drain();

    let response = cart::add_to_cart(&store, &cart_state, &queue, "10").unwrap();
    assert_eq!(response.items[0].quantity, 26);
    assert_eq!(titles(&queue), vec!["Ajouté au panier", "Stock insuffisant"]);
}
