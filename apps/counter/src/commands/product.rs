//! # Product Commands
//!
//! Commands for the product grid of the "Caisse" screen.
//!
//! ## Search Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Product Grid                                        │
//! │                                                                         │
//! │  Search box: "doli"          Category: [Tous ▼]                         │
//! │         │                           │                                   │
//! │         └─────────────┬─────────────┘                                   │
//! │                       ▼                                                 │
//! │  search_products("doli", "all")                                         │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  name ⊇ "doli" (any case) OR barcode ⊇ "doli" OR price ⊇ "doli"         │
//! │  AND category matches                                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  [Doliprane 1000mg]   (catalog order)                                   │
//! │                                                                         │
//! │  Empty search box ──► popular_products() shows the top 8 instead        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use officine_core::filter::{self, CategoryFilter};
use officine_core::inventory::StockStatus;
use officine_core::{Money, Product};

use crate::error::ApiError;
use crate::state::{ConfigState, StoreState};

/// Product DTO for the presentation surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Money,
    pub stock: i64,
    /// "Critique", "Faible", "Moyen" or "Bon".
    pub stock_status: String,
    pub category: String,
    pub barcode: Option<String>,
    pub equivalents: Vec<String>,
    pub supplier: String,
    pub popularity: u32,
    pub dosage: Option<String>,
    pub active_ingredient: Option<String>,
    pub prescription: bool,
}

impl From<&Product> for ProductDto {
    fn from(p: &Product) -> Self {
        ProductDto {
            id: p.id.clone(),
            name: p.name.clone(),
            description: p.description.clone(),
            price: p.price,
            stock: p.stock,
            stock_status: StockStatus::from_stock(p.stock).label().to_string(),
            category: p.category.clone(),
            barcode: p.barcode.clone(),
            equivalents: p.equivalents.clone(),
            supplier: p.supplier.clone(),
            popularity: p.popularity,
            dosage: p.dosage.clone(),
            active_ingredient: p.active_ingredient.clone(),
            prescription: p.prescription,
        }
    }
}

/// A category selector entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    /// `"all"` for the catch-all entry, otherwise the category label.
    pub value: String,
    pub count: usize,
}

/// Checks if a query looks like a barcode (8-13 numeric digits).
///
/// ## Barcode Formats Detected
/// - EAN-8: 8 digits
/// - UPC-A: 12 digits
/// - EAN-13: 13 digits
fn is_barcode_query(query: &str) -> bool {
    let len = query.len();
    (8..=13).contains(&len) && query.chars().all(|c| c.is_ascii_digit())
}

/// Filters the catalog by free text and category.
///
/// ## Arguments
/// * `query` - Search term (name, barcode or price digits), may be empty
/// * `category` - Category label, or `"all"` / `"Tous"` for every category
///
/// ## Returns
/// Matching products in catalog order. The query is matched as typed,
/// spaces included, and the search never fails.
pub fn search_products(store: &StoreState, query: &str, category: &str) -> Vec<ProductDto> {
    let category = CategoryFilter::from(category.to_string());
    debug!(query = %query, category = %category, "search_products command");

    let dtos: Vec<ProductDto> = filter::filter_products(store.catalog(), query, &category)
        .into_iter()
        .map(ProductDto::from)
        .collect();

    info!(count = dtos.len(), query = %query, "search_products complete");
    dtos
}

/// The popular view: most popular first, ties in catalog order.
pub fn popular_products(store: &StoreState, config: &ConfigState) -> Vec<ProductDto> {
    debug!(limit = config.popular_limit, "popular_products command");
    filter::popular_products(store.catalog(), config.popular_limit)
        .into_iter()
        .map(ProductDto::from)
        .collect()
}

/// Category selector entries: the catch-all first, then each category in
/// order of first appearance.
pub fn list_categories(store: &StoreState) -> Vec<CategoryDto> {
    debug!("list_categories command");
    let catalog = store.catalog();

    std::iter::once(CategoryDto {
        value: CategoryFilter::All.to_string(),
        count: catalog.len(),
    })
    .chain(
        catalog
            .category_counts()
            .into_iter()
            .map(|(label, count)| CategoryDto {
                value: label.to_string(),
                count,
            }),
    )
    .collect()
}

/// Substitutes listed for a product, in catalog order.
pub fn get_equivalents(store: &StoreState, product_id: &str) -> Result<Vec<ProductDto>, ApiError> {
    debug!(product_id = %product_id, "get_equivalents command");
    let product = store.product(product_id)?;
    Ok(store
        .catalog()
        .equivalents_of(product)
        .into_iter()
        .map(ProductDto::from)
        .collect())
}

/// Exact lookup for scanner input.
pub fn get_product_by_barcode(store: &StoreState, barcode: &str) -> Result<ProductDto, ApiError> {
    let barcode = barcode.trim();
    debug!(barcode = %barcode, "get_product_by_barcode command");

    if !is_barcode_query(barcode) {
        return Err(ApiError::validation(format!(
            "'{}' is not a barcode (8 to 13 digits)",
            barcode
        )));
    }

    store
        .catalog()
        .find_by_barcode(barcode)
        .map(ProductDto::from)
        .ok_or_else(|| ApiError::not_found("Barcode", barcode))
}
