//! # Customers
//!
//! Customer search, purchase profiles and loyalty analytics, derived from
//! the customer list and the sales history. Inputs are never mutated: a
//! profile carries its own sorted copy of the customer's sales.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{Customer, LoyaltyTier, Sale};
use crate::ACTIVE_CUSTOMER_DAYS;

/// Case-insensitive name/email match, plain substring match on phone.
pub fn matches_customer(customer: &Customer, query: &str) -> bool {
    let needle = query.to_lowercase();
    customer.name.to_lowercase().contains(&needle)
        || customer
            .phone
            .as_deref()
            .is_some_and(|phone| phone.contains(query))
        || customer
            .email
            .as_deref()
            .is_some_and(|email| email.to_lowercase().contains(&needle))
}

/// A customer enriched with their purchase history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerProfile {
    pub customer: Customer,
    /// Most recent first.
    pub purchase_history: Vec<Sale>,
    /// Recomputed from the history, not the figure on the customer card.
    pub total_purchases: Money,
    pub last_purchase: Option<NaiveDateTime>,
    pub visit_count: usize,
}

impl CustomerProfile {
    pub fn build(customer: &Customer, sales: &[Sale]) -> Self {
        let mut history: Vec<Sale> = sales
            .iter()
            .filter(|s| s.customer_id.as_deref() == Some(customer.id.as_str()))
            .cloned()
            .collect();
        history.sort_by(|a, b| b.date.cmp(&a.date));

        CustomerProfile {
            customer: customer.clone(),
            total_purchases: history.iter().map(|s| s.total).sum(),
            last_purchase: history.first().map(|s| s.date),
            visit_count: history.len(),
            purchase_history: history,
        }
    }

    /// Whether the last purchase falls within `days` of `now`, counting
    /// partial days.
    pub fn is_active(&self, now: NaiveDateTime, days: i64) -> bool {
        self.last_purchase
            .is_some_and(|last| now.signed_duration_since(last) <= Duration::days(days))
    }
}

/// Profiles for every customer, in customer-list order.
pub fn build_profiles(customers: &[Customer], sales: &[Sale]) -> Vec<CustomerProfile> {
    customers
        .iter()
        .map(|c| CustomerProfile::build(c, sales))
        .collect()
}

/// Profiles matching the search box.
pub fn search_profiles<'a>(profiles: &'a [CustomerProfile], query: &str) -> Vec<&'a CustomerProfile> {
    profiles
        .iter()
        .filter(|p| matches_customer(&p.customer, query))
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoyaltyDistribution {
    pub gold: usize,
    pub silver: usize,
    pub bronze: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerAnalytics {
    pub total_customers: usize,
    pub active_customers: usize,
    /// Mean of the profiles' total purchases; zero with no customers.
    pub average_purchase: Money,
    pub loyalty_distribution: LoyaltyDistribution,
}

pub fn customer_analytics(profiles: &[CustomerProfile], now: NaiveDateTime) -> CustomerAnalytics {
    let total: Money = profiles.iter().map(|p| p.total_purchases).sum();
    let average_purchase = if profiles.is_empty() {
        Money::zero()
    } else {
        Money::from_amount(total.amount() / profiles.len() as i64)
    };

    let mut loyalty_distribution = LoyaltyDistribution::default();
    for profile in profiles {
        match profile.customer.loyalty {
            LoyaltyTier::Gold => loyalty_distribution.gold += 1,
            LoyaltyTier::Silver => loyalty_distribution.silver += 1,
            LoyaltyTier::Bronze => loyalty_distribution.bronze += 1,
        }
    }

    CustomerAnalytics {
        total_customers: profiles.len(),
        active_customers: profiles
            .iter()
            .filter(|p| p.is_active(now, ACTIVE_CUSTOMER_DAYS))
            .count(),
        average_purchase,
        loyalty_distribution,
    }
}
