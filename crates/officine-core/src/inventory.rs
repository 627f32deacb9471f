//! # Inventory
//!
//! Stock and expiry classification, the inventory query, statistics and the
//! row shape handed to the export collaborator.
//!
//! ## Thresholds
//! ```text
//! Stock:   0 ──── 10 ──── 30 ──── 50 ──────────►
//!          Critique  Faible   Moyen     Bon
//!
//! Expiry (days from today):
//!         ≤0 ──── 30 ──── 90 ──────────►
//!      Expired  Urgent   Soon     Ok
//! ```

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};

use crate::catalog::Catalog;
use crate::filter::CategoryFilter;
use crate::money::Money;
use crate::types::Product;
use crate::{EXPIRING_SOON_DAYS, LOW_STOCK_THRESHOLD};

// =============================================================================
// Stock Status
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    Critical,
    Low,
    Medium,
    Good,
}

impl StockStatus {
    pub fn from_stock(stock: i64) -> Self {
        match stock {
            s if s <= 10 => StockStatus::Critical,
            s if s <= 30 => StockStatus::Low,
            s if s <= 50 => StockStatus::Medium,
            _ => StockStatus::Good,
        }
    }

    /// Label printed on shelves and in exports.
    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::Critical => "Critique",
            StockStatus::Low => "Faible",
            StockStatus::Medium => "Moyen",
            StockStatus::Good => "Bon",
        }
    }
}

// =============================================================================
// Expiry Status
// =============================================================================

/// Whole days from `today` until the product expires; negative once expired.
pub fn days_to_expiry(product: &Product, today: NaiveDate) -> Option<i64> {
    product
        .expiry_date
        .map(|expiry| expiry.signed_duration_since(today).num_days())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum ExpiryStatus {
    Expired,
    Urgent { days: i64 },
    Soon { days: i64 },
    Ok { days: i64 },
}

impl ExpiryStatus {
    pub fn from_days(days: i64) -> Self {
        match days {
            d if d <= 0 => ExpiryStatus::Expired,
            d if d <= 30 => ExpiryStatus::Urgent { days: d },
            d if d <= EXPIRING_SOON_DAYS => ExpiryStatus::Soon { days: d },
            d => ExpiryStatus::Ok { days: d },
        }
    }

    pub fn for_product(product: &Product, today: NaiveDate) -> Option<Self> {
        days_to_expiry(product, today).map(Self::from_days)
    }

    /// `"Expiré"` or `"<n>j"`.
    pub fn label(&self) -> String {
        match self {
            ExpiryStatus::Expired => "Expiré".to_string(),
            ExpiryStatus::Urgent { days }
            | ExpiryStatus::Soon { days }
            | ExpiryStatus::Ok { days } => format!("{}j", days),
        }
    }
}

// =============================================================================
// Inventory Query
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InventorySort {
    #[default]
    Name,
    Stock,
    Expiry,
    Price,
}

impl InventorySort {
    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            InventorySort::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            InventorySort::Stock => a.stock.cmp(&b.stock),
            InventorySort::Expiry => match (a.expiry_date, b.expiry_date) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            InventorySort::Price => a.price.cmp(&b.price),
        }
    }
}

/// The inventory screen's filter bar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InventoryQuery {
    /// Matched against name, supplier and category, case-insensitively.
    pub search: String,
    pub category: CategoryFilter,
    pub sort_by: InventorySort,
    /// Only products with stock under the low-stock threshold.
    pub low_stock_only: bool,
    /// Only dated products expiring within the "soon" window (expired included).
    pub expiring_only: bool,
}

impl InventoryQuery {
    pub fn matches(&self, product: &Product, today: NaiveDate) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = product.name.to_lowercase().contains(&needle)
            || product.supplier.to_lowercase().contains(&needle)
            || product.category.to_lowercase().contains(&needle);

        let matches_low_stock = !self.low_stock_only || product.stock < LOW_STOCK_THRESHOLD;

        let matches_expiring = !self.expiring_only
            || days_to_expiry(product, today).is_some_and(|d| d <= EXPIRING_SOON_DAYS);

        matches_search && self.category.matches(product) && matches_low_stock && matches_expiring
    }
}

/// Filters and sorts the catalog for the inventory screen. Stable sort.
pub fn filter_inventory<'a>(
    catalog: &'a Catalog,
    query: &InventoryQuery,
    today: NaiveDate,
) -> Vec<&'a Product> {
    let mut products: Vec<&Product> = catalog
        .products()
        .iter()
        .filter(|p| query.matches(p, today))
        .collect();
    products.sort_by(|a, b| query.sort_by.compare(a, b));
    products
}

// =============================================================================
// Inventory Statistics
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStats {
    pub total_products: usize,
    /// Σ price × stock
    pub total_value: Money,
    pub low_stock_count: usize,
    /// Products with 0 < days to expiry <= 90.
    pub expiring_count: usize,
}

pub fn inventory_stats(catalog: &Catalog, today: NaiveDate) -> InventoryStats {
    let products = catalog.products();
    InventoryStats {
        total_products: products.len(),
        total_value: products.iter().map(Product::stock_value).sum(),
        low_stock_count: products
            .iter()
            .filter(|p| p.stock < LOW_STOCK_THRESHOLD)
            .count(),
        expiring_count: products
            .iter()
            .filter(|p| {
                days_to_expiry(p, today).is_some_and(|d| d > 0 && d <= EXPIRING_SOON_DAYS)
            })
            .count(),
    }
}

// =============================================================================
// Export Rows
// =============================================================================

fn na_if_none<S: Serializer>(value: &Option<i64>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(days) => serializer.serialize_i64(*days),
        None => serializer.serialize_str("N/A"),
    }
}

/// One product as a row of the inventory export.
///
/// Field order is column order; the serialized names are the column headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    #[serde(rename = "Nom du Produit")]
    pub name: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Catégorie")]
    pub category: String,
    #[serde(rename = "Fournisseur")]
    pub supplier: String,
    #[serde(rename = "Code-barres")]
    pub barcode: String,
    #[serde(rename = "Prix de Vente (FCFA)")]
    pub sale_price: i64,
    #[serde(rename = "Prix d'Achat (FCFA)")]
    pub cost_price: i64,
    #[serde(rename = "Marge (%)")]
    pub margin: i64,
    #[serde(rename = "Stock Actuel")]
    pub stock: i64,
    #[serde(rename = "Statut Stock")]
    pub stock_status: String,
    #[serde(rename = "Date d'Expiration")]
    pub expiry_date: String,
    #[serde(rename = "Jours avant Expiration", serialize_with = "na_if_none")]
    pub days_to_expiry: Option<i64>,
    #[serde(rename = "Ordonnance Requise")]
    pub prescription: String,
}

impl ExportRow {
    pub fn from_product(product: &Product, today: NaiveDate) -> Self {
        ExportRow {
            name: product.name.clone(),
            description: product.description.clone().unwrap_or_default(),
            category: product.category.clone(),
            supplier: product.supplier.clone(),
            barcode: product.barcode.clone().unwrap_or_default(),
            sale_price: product.price.amount(),
            cost_price: product.cost_price.amount(),
            margin: product.margin,
            stock: product.stock,
            stock_status: StockStatus::from_stock(product.stock).label().to_string(),
            expiry_date: product
                .expiry_date
                .map(|d| d.format("%d/%m/%Y").to_string())
                .unwrap_or_else(|| "N/A".to_string()),
            days_to_expiry: days_to_expiry(product, today),
            prescription: if product.prescription { "Oui" } else { "Non" }.to_string(),
        }
    }
}

/// Export rows for the products of an inventory view, in view order.
pub fn export_rows(products: &[&Product], today: NaiveDate) -> Vec<ExportRow> {
    products
        .iter()
        .map(|p| ExportRow::from_product(p, today))
        .collect()
}
