//! # Store State
//!
//! The read-only data snapshot a session works against: catalog, customer
//! list and sales history. Commands borrow from it; nothing writes to it.

use std::sync::Arc;

use officine_core::customers::{build_profiles, CustomerProfile};
use officine_core::{seed, Catalog, CoreError, Customer, Product, Sale};

use crate::error::ApiError;

/// Shared snapshot, cheap to clone into every session.
#[derive(Debug, Clone)]
pub struct StoreState {
    catalog: Arc<Catalog>,
    customers: Arc<[Customer]>,
    sales: Arc<[Sale]>,
}

impl StoreState {
    pub fn new(catalog: Catalog, customers: Vec<Customer>, sales: Vec<Sale>) -> Self {
        StoreState {
            catalog: Arc::new(catalog),
            customers: customers.into(),
            sales: sales.into(),
        }
    }

    /// The demo data set: 10 products, 3 customers, 2 sales.
    pub fn demo() -> Self {
        StoreState::new(seed::demo_catalog(), seed::demo_customers(), seed::demo_sales())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    /// Looks a product up by id.
    pub fn product(&self, product_id: &str) -> Result<&Product, ApiError> {
        self.catalog
            .get(product_id)
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()).into())
    }

    /// Looks a customer up by id.
    pub fn customer(&self, customer_id: &str) -> Result<&Customer, ApiError> {
        self.customers
            .iter()
            .find(|c| c.id == customer_id)
            .ok_or_else(|| CoreError::CustomerNotFound(customer_id.to_string()).into())
    }

    /// Purchase profiles for every customer, in customer-list order.
    pub fn profiles(&self) -> Vec<CustomerProfile> {
        build_profiles(&self.customers, &self.sales)
    }
}

impl Default for StoreState {
    fn default() -> Self {
        Self::demo()
    }
}
