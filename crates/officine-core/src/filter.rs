//! # Product Filter
//!
//! Derives views of the catalog for the counter screen.
//!
//! ## Search Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cashier types "1750" with category "all"                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌───────────────────────────────────────────┐                         │
//! │  │ 1. Category: keep all (sentinel)          │                         │
//! │  │ 2. Query: name (case-insensitive)         │                         │
//! │  │           OR barcode contains             │                         │
//! │  │           OR price digits contain         │──► [Paracétamol 500mg]   │
//! │  └───────────────────────────────────────────┘                         │
//! │                                                                         │
//! │  Result keeps catalog order. The catalog itself is never touched.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::types::Product;

// =============================================================================
// Category Selector
// =============================================================================

/// Category selector with an "all" sentinel.
///
/// Parsed from the labels the screens use: `"all"` on the counter and
/// `"Tous"` in the inventory (both case-insensitive). Anything else is a
/// category label.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    pub fn named(label: impl Into<String>) -> Self {
        CategoryFilter::Named(label.into())
    }

    /// Checks a product against the selector.
    #[inline]
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Named(label) => product.category == *label,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") || s.eq_ignore_ascii_case("tous") {
            Ok(CategoryFilter::All)
        } else {
            Ok(CategoryFilter::Named(s.to_string()))
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(filter) => filter,
            Err(never) => match never {},
        }
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        filter.to_string()
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Named(label) => f.write_str(label),
        }
    }
}

// =============================================================================
// Query Matching
// =============================================================================

/// Free-text match used by the counter search box.
///
/// An empty query matches everything. Otherwise the name is compared
/// case-insensitively, while barcode and price digits are plain substring
/// matches.
pub fn matches_query(product: &Product, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let needle = query.to_lowercase();
    product.name.to_lowercase().contains(&needle)
        || product
            .barcode
            .as_deref()
            .is_some_and(|barcode| barcode.contains(query))
        || product.price.amount().to_string().contains(query)
}

/// Filters the catalog by category selector and free-text query.
///
/// ## Example
/// ```rust
/// use officine_core::filter::{filter_products, CategoryFilter};
/// use officine_core::seed::demo_catalog;
///
/// let catalog = demo_catalog();
/// let analgesics = filter_products(&catalog, "", &CategoryFilter::named("Antalgiques"));
/// assert_eq!(analgesics.len(), 4);
/// ```
pub fn filter_products<'a>(
    catalog: &'a Catalog,
    query: &str,
    category: &CategoryFilter,
) -> Vec<&'a Product> {
    catalog
        .products()
        .iter()
        .filter(|p| category.matches(p))
        .filter(|p| matches_query(p, query))
        .collect()
}

/// The quick-access view: top `limit` products by descending popularity.
///
/// The sort is stable, so equal scores keep catalog order.
pub fn popular_products(catalog: &Catalog, limit: usize) -> Vec<&Product> {
    let mut ranked: Vec<&Product> = catalog.products().iter().collect();
    ranked.sort_by(|a, b| b.popularity.cmp(&a.popularity));
    ranked.truncate(limit);
    ranked
}
