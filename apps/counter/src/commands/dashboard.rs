//! # Dashboard Commands
//!
//! The "Tableau de bord" screen.
//!
//! ```text
//! ┌───────────────┬───────────────┬───────────────┬───────────────┐
//! │ Ventes du jour│ Clients       │ Stock faible  │ Expirations   │
//! │ Σ sale totals │ distinct ids  │ stock < 10    │ < 90 days     │
//! ├───────────────┴───────────────┼───────────────┴───────────────┤
//! │ Top ventes                    │ Ventes par catégorie          │
//! └───────────────────────────────┴───────────────────────────────┘
//! ```

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use officine_core::dashboard::{
    daily_metrics, sales_by_category, top_selling_products, CategorySales, DailyMetrics,
    TopSeller,
};

use crate::state::StoreState;

/// Number of best sellers listed.
pub const TOP_SELLERS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub metrics: DailyMetrics,
    pub top_selling: Vec<TopSeller>,
    pub sales_by_category: Vec<CategorySales>,
}

/// Everything the dashboard shows for `today`.
pub fn get_dashboard(store: &StoreState, today: NaiveDate) -> DashboardResponse {
    debug!(%today, "get_dashboard command");
    DashboardResponse {
        metrics: daily_metrics(store.catalog(), store.sales(), today),
        top_selling: top_selling_products(store.sales(), TOP_SELLERS),
        sales_by_category: sales_by_category(store.sales()),
    }
}
