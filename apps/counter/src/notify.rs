//! # Notifications
//!
//! Fire-and-forget messages for the presentation surface (toasts). A
//! command emits them through a [`Notifier`] and never waits on delivery.
//!
//! ```text
//! command ──► Notifier::notify(Notification)
//!                 │
//!                 ├── LogNotifier ───────► tracing (info!/warn!/error!)
//!                 └── NotificationQueue ─► drained by the surface
//! ```

use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use tracing::{error, info, warn};

/// Something the counter wants the cashier to see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Notification {
    /// A product went into the cart.
    ProductAdded { product_id: String, name: String },

    /// A cart quantity exceeds shelf stock under the `warn` policy.
    StockWarning {
        product_id: String,
        name: String,
        available: i64,
        requested: i64,
    },

    /// Payment went through. `total` is already formatted.
    SaleFinalized { sale_id: String, total: String },

    /// The new-product form was submitted successfully.
    ProductDrafted { product_id: String, name: String },

    ExportCompleted { file_name: String, rows: usize },

    ExportFailed { reason: String },
}

impl Notification {
    /// Short toast title.
    pub fn title(&self) -> &'static str {
        match self {
            Notification::ProductAdded { .. } => "Ajouté au panier",
            Notification::StockWarning { .. } => "Stock insuffisant",
            Notification::SaleFinalized { .. } => "Vente finalisée",
            Notification::ProductDrafted { .. } => "Produit ajouté",
            Notification::ExportCompleted { .. } => "Export réussi",
            Notification::ExportFailed { .. } => "Erreur d'export",
        }
    }

    /// Toast body.
    pub fn description(&self) -> String {
        match self {
            Notification::ProductAdded { name, .. } => format!("{} ajouté au panier.", name),
            Notification::StockWarning {
                name,
                available,
                requested,
                ..
            } => format!(
                "{} : {} demandé(s), {} en stock.",
                name, requested, available
            ),
            Notification::SaleFinalized { total, .. } => {
                format!("Vente de {} enregistrée avec succès.", total)
            }
            Notification::ProductDrafted { name, .. } => {
                format!("Le produit \"{}\" a été ajouté avec succès.", name)
            }
            Notification::ExportCompleted { file_name, .. } => {
                format!("Le fichier \"{}\" a été exporté avec succès.", file_name)
            }
            Notification::ExportFailed { .. } => {
                "Une erreur s'est produite lors de l'export de l'inventaire.".to_string()
            }
        }
    }

    /// Whether the toast should render as destructive.
    pub fn is_error(&self) -> bool {
        matches!(self, Notification::ExportFailed { .. })
    }
}

/// Delivery channel for notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Forwards every notification to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        let title = notification.title();
        let description = notification.description();
        match &notification {
            Notification::StockWarning { .. } => warn!(%title, %description, "notification"),
            Notification::ExportFailed { reason } => {
                error!(%title, %description, %reason, "notification")
            }
            _ => info!(%title, %description, "notification"),
        }
    }
}

/// Buffers notifications until the surface drains them.
#[derive(Debug, Default)]
pub struct NotificationQueue {
    pending: Mutex<Vec<Notification>>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes every pending notification, oldest first.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.pending.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn len(&self) -> usize {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for NotificationQueue {
    fn notify(&self, notification: Notification) {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sale_finalized_text() {
        let n = Notification::SaleFinalized {
            sale_id: "abc".to_string(),
            total: "7 950 FCFA".to_string(),
        };
        assert_eq!(n.title(), "Vente finalisée");
        assert_eq!(n.description(), "Vente de 7 950 FCFA enregistrée avec succès.");
        assert!(!n.is_error());
    }

    #[test]
    fn test_export_failed_is_error() {
        let n = Notification::ExportFailed {
            reason: "disk full".to_string(),
        };
        assert!(n.is_error());
        assert_eq!(n.title(), "Erreur d'export");
    }

    #[test]
    fn test_queue_drains_in_order() {
        let queue = NotificationQueue::new();
        queue.notify(Notification::ProductAdded {
            product_id: "1".to_string(),
            name: "Paracétamol 500mg".to_string(),
        });
        queue.notify(Notification::ExportFailed {
            reason: "boom".to_string(),
        });

        assert_eq!(queue.len(), 2);
        let drained = queue.drain();
        assert!(matches!(drained[0], Notification::ProductAdded { .. }));
        assert!(matches!(drained[1], Notification::ExportFailed { .. }));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(Notification::ExportCompleted {
            file_name: "inventaire_2025-06-01.json".to_string(),
            rows: 10,
        })
        .unwrap();
        assert_eq!(json["kind"], "exportCompleted");
        assert_eq!(json["fileName"], "inventaire_2025-06-01.json");
    }
}
