//! # Catalog Store
//!
//! The read-only set of purchasable products available to a session.
//!
//! A `Catalog` is built once from a list of products and never mutated
//! afterwards. Views over it (filtered lists, the popular view, inventory
//! sorts) borrow from it and allocate their own ordering.

use std::collections::HashMap;

use crate::types::Product;

/// Immutable product catalog, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// All products, in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Looks up a product by id.
    pub fn get(&self, product_id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }

    /// Exact barcode lookup (scanner input).
    pub fn find_by_barcode(&self, barcode: &str) -> Option<&Product> {
        self.products
            .iter()
            .find(|p| p.barcode.as_deref() == Some(barcode))
    }

    /// Distinct category labels in order of first appearance.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for product in &self.products {
            if !seen.contains(&product.category.as_str()) {
                seen.push(product.category.as_str());
            }
        }
        seen
    }

    /// Number of products per category, paired with the label.
    pub fn category_counts(&self) -> Vec<(&str, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for product in &self.products {
            *counts.entry(product.category.as_str()).or_default() += 1;
        }
        self.categories()
            .into_iter()
            .map(|c| (c, counts.get(c).copied().unwrap_or(0)))
            .collect()
    }

    /// Substitutes listed for `product`, in catalog order.
    ///
    /// Ids in the equivalents list that are not in the catalog are skipped.
    pub fn equivalents_of(&self, product: &Product) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|candidate| product.is_equivalent_to(candidate))
            .collect()
    }
}

impl FromIterator<Product> for Catalog {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        Catalog::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::demo_catalog;

    #[test]
    fn test_lookup() {
        let catalog = demo_catalog();
        assert_eq!(catalog.len(), 10);
        assert_eq!(catalog.get("4").map(|p| p.name.as_str()), Some("Amoxicilline 1g"));
        assert!(catalog.get("99").is_none());
        assert_eq!(
            catalog.find_by_barcode("3401579887145").map(|p| p.id.as_str()),
            Some("1")
        );
    }

    #[test]
    fn test_categories_in_first_appearance_order() {
        let catalog = demo_catalog();
        assert_eq!(
            catalog.categories(),
            vec![
                "Antalgiques",
                "Antibiotiques",
                "Hygiène",
                "Gastro-entérologie",
                "Vitamines",
                "Pneumologie"
            ]
        );
        let counts = catalog.category_counts();
        assert_eq!(counts[0], ("Antalgiques", 4));
        assert_eq!(counts[1], ("Antibiotiques", 2));
    }

    #[test]
    fn test_equivalents() {
        let catalog = demo_catalog();
        let doliprane = catalog.get("2").unwrap();
        let ids: Vec<&str> = catalog
            .equivalents_of(doliprane)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "3"]);

        let aspirine = catalog.get("6").unwrap();
        assert!(catalog.equivalents_of(aspirine).is_empty());
    }
}
