//! # Dashboard
//!
//! Daily metrics, top sellers and sales-by-category, all derived from the
//! catalog and sales-history snapshots for a given day.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::inventory::days_to_expiry;
use crate::money::Money;
use crate::types::Sale;
use crate::{DASHBOARD_LOW_STOCK_THRESHOLD, EXPIRING_SOON_DAYS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyMetrics {
    pub daily_sales: Money,
    /// Distinct customers served today; walk-in sales count as one.
    pub daily_customers: usize,
    pub low_stock_items: usize,
    /// Expiring in under 90 days, expired products included.
    pub expiring_items: usize,
}

pub fn daily_metrics(catalog: &Catalog, sales: &[Sale], today: NaiveDate) -> DailyMetrics {
    let todays: Vec<&Sale> = sales.iter().filter(|s| s.date.date() == today).collect();
    let customers: HashSet<Option<&str>> =
        todays.iter().map(|s| s.customer_id.as_deref()).collect();

    DailyMetrics {
        daily_sales: todays.iter().map(|s| s.total).sum(),
        daily_customers: customers.len(),
        low_stock_items: catalog
            .products()
            .iter()
            .filter(|p| p.stock < DASHBOARD_LOW_STOCK_THRESHOLD)
            .count(),
        expiring_items: catalog
            .products()
            .iter()
            .filter(|p| days_to_expiry(p, today).is_some_and(|d| d < EXPIRING_SOON_DAYS))
            .count(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopSeller {
    pub product_id: String,
    pub name: String,
    pub quantity: i64,
    pub revenue: Money,
}

/// Best sellers by units sold, first sale order on ties.
pub fn top_selling_products(sales: &[Sale], limit: usize) -> Vec<TopSeller> {
    let mut order: Vec<TopSeller> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for item in sales.iter().flat_map(|s| s.items.iter()) {
        match index.get(item.product_id.as_str()) {
            Some(&i) => {
                order[i].quantity += item.quantity;
                order[i].revenue += item.total;
            }
            None => {
                index.insert(item.product_id.as_str(), order.len());
                order.push(TopSeller {
                    product_id: item.product_id.clone(),
                    name: item.name_snapshot.clone(),
                    quantity: item.quantity,
                    revenue: item.total,
                });
            }
        }
    }

    order.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    order.truncate(limit);
    order
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySales {
    pub category: String,
    pub amount: Money,
    pub percentage: f64,
}

/// Revenue per category from the sale-item snapshots, largest first.
pub fn sales_by_category(sales: &[Sale]) -> Vec<CategorySales> {
    let mut totals: Vec<(String, Money)> = Vec::new();
    for item in sales.iter().flat_map(|s| s.items.iter()) {
        match totals.iter_mut().find(|(c, _)| *c == item.category_snapshot) {
            Some((_, amount)) => *amount += item.total,
            None => totals.push((item.category_snapshot.clone(), item.total)),
        }
    }

    let grand_total: Money = totals.iter().map(|(_, amount)| *amount).sum();
    totals.sort_by(|a, b| b.1.cmp(&a.1));
    totals
        .into_iter()
        .map(|(category, amount)| CategorySales {
            percentage: amount.percentage_of(grand_total),
            category,
            amount,
        })
        .collect()
}
