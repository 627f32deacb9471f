//! # Officine Counter Entry Point
//!
//! Runs one scripted counter session against the demo data, logging every
//! step. Useful to eyeball the command layer without a presentation surface.
//!
//! ## Session Script
//! 1. Initialize tracing (logging)
//! 2. Load configuration (defaults, `OFFICINE_CONFIG`, `OFFICINE_*`)
//! 3. Open a session on the demo snapshot
//! 4. Browse, fill the cart, attach a customer, pay
//! 5. Show the dashboard and export the inventory

use officine_core::inventory::InventoryQuery;
use tracing::info;

use officine_counter::commands::{cart, customer, dashboard, inventory, product, sale};
use officine_counter::export::JsonExporter;
use officine_counter::notify::LogNotifier;
use officine_counter::state::{ConfigState, SessionRegistry, StoreState};

const SESSION_ID: &str = "caisse-1";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    officine_counter::init_tracing();
    info!("Starting Officine counter demo session");

    let config = ConfigState::from_env()?;
    info!(
        store = %config.store_name,
        policy = ?config.stock_policy,
        export_dir = %config.export_dir.display(),
        "Configuration loaded"
    );

    let store = StoreState::demo();
    let sessions = SessionRegistry::new();
    let notifier = LogNotifier;
    let cart_state = sessions.open(SESSION_ID, config.stock_policy);

    // Browse
    for p in product::popular_products(&store, &config) {
        info!(name = %p.name, price = %config.format_money(p.price), "Popular");
    }
    let hits = product::search_products(&store, "para", "Tous");
    info!(count = hits.len(), "Search \"para\"");

    // Fill the cart
    cart::add_to_cart(&store, &cart_state, &notifier, "1")?;
    cart::add_to_cart(&store, &cart_state, &notifier, "1")?;
    cart::add_to_cart(&store, &cart_state, &notifier, "4")?;
    for equivalent in product::get_equivalents(&store, "4")? {
        info!(name = %equivalent.name, "Equivalent of Amoxicilline");
    }
    cart::select_customer(&store, &cart_state, Some("1"))?;

    let totals = sale::get_totals(&cart_state);
    info!(
        lines = totals.item_count,
        units = totals.total_quantity,
        total = %config.format_money(totals.total),
        "Cart ready"
    );

    // Pay
    let receipt = sale::process_payment(
        &cart_state,
        &config,
        &notifier,
        "card",
        officine_counter::now(),
    )?;
    info!(sale_id = %receipt.sale.id, total = %receipt.formatted_total, "Receipt");

    // Back office
    let today = officine_counter::today();
    let board = dashboard::get_dashboard(&store, today);
    info!(
        low_stock = board.metrics.low_stock_items,
        expiring = board.metrics.expiring_items,
        "Dashboard"
    );

    let analytics = customer::get_customer_analytics(&store, officine_counter::now());
    info!(
        customers = analytics.total_customers,
        average = %config.format_money(analytics.average_purchase),
        "Customer analytics"
    );

    let exporter = JsonExporter::new(&config.export_dir);
    let export = inventory::export_inventory(
        &store,
        &exporter,
        &notifier,
        &InventoryQuery::default(),
        today,
    );
    info!(success = export.success, rows = export.row_count, "Export");

    sessions.close(SESSION_ID);
    Ok(())
}
