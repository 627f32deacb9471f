//! # Inventory Commands
//!
//! The "Inventaire" screen: filtered stock list, statistics cards, the
//! export button and the new-product form.
//!
//! ## Export Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  export_inventory(query)                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  filter_inventory ──► export_rows ──► InventoryExporter                 │
//! │                                            │                            │
//! │                          ┌─────────────────┴─────────────────┐          │
//! │                          ▼                                   ▼          │
//! │                   Ok(path)                            Err(ExportError)  │
//! │                   notify "Export réussi"              error! log        │
//! │                                                       notify "Erreur    │
//! │                                                       d'export"         │
//! │                          │                                   │          │
//! │                          └───────────► ExportResponse ◄──────┘          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An export failure never fails the command.

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, error, info};
use uuid::Uuid;

use officine_core::inventory::{
    self, export_rows, filter_inventory, ExpiryStatus, InventoryQuery, InventoryStats,
};
use officine_core::validation::ProductDraft;
use officine_core::{Money, Product};

use crate::commands::product::ProductDto;
use crate::error::ApiError;
use crate::export::{export_file_name, InventoryExporter};
use crate::notify::{Notification, Notifier};
use crate::state::StoreState;

/// A row of the inventory table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItemDto {
    #[serde(flatten)]
    pub product: ProductDto,
    pub cost_price: Money,
    pub margin: i64,
    pub expiry_date: Option<NaiveDate>,
    pub days_to_expiry: Option<i64>,
    pub expiry_status: Option<ExpiryStatus>,
    /// "Expiré", "45j", or `None` for undated products.
    pub expiry_label: Option<String>,
}

impl InventoryItemDto {
    fn build(product: &Product, today: NaiveDate) -> Self {
        let expiry_status = ExpiryStatus::for_product(product, today);
        InventoryItemDto {
            product: ProductDto::from(product),
            cost_price: product.cost_price,
            margin: product.margin,
            expiry_date: product.expiry_date,
            days_to_expiry: inventory::days_to_expiry(product, today),
            expiry_label: expiry_status.map(|s| s.label()),
            expiry_status,
        }
    }
}

/// Result of the export button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResponse {
    pub success: bool,
    pub path: Option<PathBuf>,
    pub row_count: usize,
}

/// The filtered, sorted inventory table.
pub fn list_inventory(
    store: &StoreState,
    query: &InventoryQuery,
    today: NaiveDate,
) -> Vec<InventoryItemDto> {
    debug!(
        search = %query.search,
        category = %query.category,
        sort_by = ?query.sort_by,
        low_stock_only = query.low_stock_only,
        expiring_only = query.expiring_only,
        "list_inventory command"
    );

    filter_inventory(store.catalog(), query, today)
        .into_iter()
        .map(|p| InventoryItemDto::build(p, today))
        .collect()
}

/// Statistics cards of the inventory screen.
pub fn get_inventory_stats(store: &StoreState, today: NaiveDate) -> InventoryStats {
    debug!("get_inventory_stats command");
    inventory::inventory_stats(store.catalog(), today)
}

/// Writes the filtered inventory through `exporter`.
///
/// ## Errors
/// `EXPORT_ERROR` if the file cannot be written.
pub fn try_export_inventory(
    store: &StoreState,
    exporter: &dyn InventoryExporter,
    query: &InventoryQuery,
    today: NaiveDate,
) -> Result<(PathBuf, usize), ApiError> {
    let products = filter_inventory(store.catalog(), query, today);
    let rows = export_rows(&products, today);
    let path = exporter.export(&export_file_name(today), &rows)?;
    Ok((path, rows.len()))
}

/// Export button: writes the file and announces the outcome.
pub fn export_inventory(
    store: &StoreState,
    exporter: &dyn InventoryExporter,
    notifier: &dyn Notifier,
    query: &InventoryQuery,
    today: NaiveDate,
) -> ExportResponse {
    debug!("export_inventory command");

    match try_export_inventory(store, exporter, query, today) {
        Ok((path, row_count)) => {
            info!(path = %path.display(), rows = row_count, "Inventory exported");
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| export_file_name(today));
            notifier.notify(Notification::ExportCompleted {
                file_name,
                rows: row_count,
            });
            ExportResponse {
                success: true,
                path: Some(path),
                row_count,
            }
        }
        Err(err) => {
            error!(error = %err, "Inventory export failed");
            notifier.notify(Notification::ExportFailed {
                reason: err.message,
            });
            ExportResponse {
                success: false,
                path: None,
                row_count: 0,
            }
        }
    }
}

/// Submits the new-product form.
///
/// The product gets a fresh id and is announced; the catalog snapshot is
/// not modified.
///
/// ## Errors
/// `VALIDATION_ERROR` naming the first invalid field.
pub fn submit_product_draft(
    notifier: &dyn Notifier,
    draft: &ProductDraft,
) -> Result<ProductDto, ApiError> {
    debug!(name = %draft.name, "submit_product_draft command");

    let product = draft.submit(&Uuid::new_v4().to_string())?;

    info!(product_id = %product.id, name = %product.name, margin = product.margin, "Product drafted");
    notifier.notify(Notification::ProductDrafted {
        product_id: product.id.clone(),
        name: product.name.clone(),
    });

    Ok(ProductDto::from(&product))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::export::{ExportError, JsonExporter};
    use crate::notify::NotificationQueue;
    use officine_core::inventory::{ExportRow, InventorySort};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    struct BrokenExporter;

    impl InventoryExporter for BrokenExporter {
        fn export(&self, _: &str, _: &[ExportRow]) -> Result<PathBuf, ExportError> {
            Err(ExportError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }
    }

    #[test]
    fn test_list_inventory_low_stock_by_stock() {
        let query = InventoryQuery {
            low_stock_only: true,
            sort_by: InventorySort::Stock,
            ..Default::default()
        };
        let items = list_inventory(&StoreState::demo(), &query, today());
        let summary: Vec<(&str, &str)> = items
            .iter()
            .map(|i| (i.product.id.as_str(), i.product.stock_status.as_str()))
            .collect();
        // Ventoline 25, Clamoxyl 32, Amoxicilline 45
        assert_eq!(summary, vec![("10", "Faible"), ("5", "Moyen"), ("4", "Moyen")]);
    }

    #[test]
    fn test_expiry_labels() {
        let items = list_inventory(&StoreState::demo(), &InventoryQuery::default(), today());
        let ventoline = items.iter().find(|i| i.product.id == "10").unwrap();
        assert_eq!(ventoline.expiry_label.as_deref(), Some("Expiré"));
        assert_eq!(ventoline.expiry_status, Some(ExpiryStatus::Expired));

        let amoxicilline = items.iter().find(|i| i.product.id == "4").unwrap();
        assert_eq!(amoxicilline.days_to_expiry, Some(29));
        assert_eq!(amoxicilline.expiry_label.as_deref(), Some("29j"));
    }

    #[test]
    fn test_stats() {
        let stats = get_inventory_stats(&StoreState::demo(), today());
        assert_eq!(stats.total_products, 10);
        assert_eq!(stats.low_stock_count, 3);
    }

    #[test]
    fn test_export_success() {
        let dir = tempfile::tempdir().unwrap();
        let queue = NotificationQueue::new();
        let query = InventoryQuery {
            category: "Antibiotiques".to_string().into(),
            ..Default::default()
        };

        let response = export_inventory(
            &StoreState::demo(),
            &JsonExporter::new(dir.path()),
            &queue,
            &query,
            today(),
        );

        assert!(response.success);
        assert_eq!(response.row_count, 2);
        assert_eq!(
            response.path,
            Some(dir.path().join("inventaire_2025-06-01.json"))
        );
        assert_eq!(
            queue.drain(),
            vec![Notification::ExportCompleted {
                file_name: "inventaire_2025-06-01.json".to_string(),
                rows: 2
            }]
        );
    }

    #[test]
    fn test_export_failure_is_reported_not_raised() {
        let queue = NotificationQueue::new();
        let response = export_inventory(
            &StoreState::demo(),
            &BrokenExporter,
            &queue,
            &InventoryQuery::default(),
            today(),
        );

        assert!(!response.success);
        assert!(response.path.is_none());
        let notifications = queue.drain();
        assert_eq!(notifications.len(), 1);
        assert!(notifications[0].is_error());

        let err = try_export_inventory(
            &StoreState::demo(),
            &BrokenExporter,
            &InventoryQuery::default(),
            today(),
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ExportError);
    }

    #[test]
    fn test_submit_product_draft() {
        let queue = NotificationQueue::new();
        let draft = ProductDraft {
            name: "Ibuprofène 400mg".to_string(),
            price: "2000".to_string(),
            stock: "60".to_string(),
            category: "Antalgiques".to_string(),
            supplier: "Mylan".to_string(),
            cost_price: "1200".to_string(),
            ..Default::default()
        };

        let product = submit_product_draft(&queue, &draft).unwrap();
        assert_eq!(product.price.amount(), 2000);
        assert!(Uuid::parse_str(&product.id).is_ok());
        assert!(matches!(
            queue.drain().as_slice(),
            [Notification::ProductDrafted { .. }]
        ));

        let err = submit_product_draft(&queue, &ProductDraft::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(queue.is_empty());
    }
}
