//! # Customer Commands
//!
//! The "Clients" screen: searchable customer cards with purchase history,
//! and the analytics header.

use chrono::NaiveDateTime;
use tracing::debug;

use officine_core::customers::{
    customer_analytics, search_profiles, CustomerAnalytics, CustomerProfile,
};

use crate::error::ApiError;
use crate::state::StoreState;

/// Customer profiles matching the search box, in customer-list order.
///
/// ## Arguments
/// * `query` - Name or email (any case), or part of a phone number
pub fn search_customers(store: &StoreState, query: &str) -> Vec<CustomerProfile> {
    debug!(query = %query, "search_customers command");

    let profiles = store.profiles();
    search_profiles(&profiles, query)
        .into_iter()
        .cloned()
        .collect()
}

/// One customer with their purchase history, most recent sale first.
pub fn get_customer_profile(
    store: &StoreState,
    customer_id: &str,
) -> Result<CustomerProfile, ApiError> {
    debug!(customer_id = %customer_id, "get_customer_profile command");
    let customer = store.customer(customer_id)?;
    Ok(CustomerProfile::build(customer, store.sales()))
}

/// Totals, active customers, average purchase and loyalty split.
pub fn get_customer_analytics(store: &StoreState, now: NaiveDateTime) -> CustomerAnalytics {
    debug!("get_customer_analytics command");
    customer_analytics(&store.profiles(), now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use chrono::NaiveDate;

    #[test]
    fn test_search_customers() {
        let store = StoreState::demo();

        let hits = search_customers(&store, "fatou");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].visit_count, 1);
        assert_eq!(hits[0].total_purchases.amount(), 7950);

        assert_eq!(search_customers(&store, "").len(), 3);
        assert!(search_customers(&store, "inconnu").is_empty());
    }

    #[test]
    fn test_customer_profile() {
        let store = StoreState::demo();
        let profile = get_customer_profile(&store, "2").unwrap();
        assert_eq!(profile.purchase_history.len(), 1);
        assert_eq!(profile.purchase_history[0].id, "2");

        assert_eq!(
            get_customer_profile(&store, "7").unwrap_err().code,
            ErrorCode::NotFound
        );
    }

    #[test]
    fn test_customer_analytics() {
        let now = NaiveDate::from_ymd_opt(2024, 2, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let analytics = get_customer_analytics(&StoreState::demo(), now);
        assert_eq!(analytics.total_customers, 3);
        assert_eq!(analytics.active_customers, 2);
        assert_eq!(analytics.loyalty_distribution.gold, 1);
    }
}
