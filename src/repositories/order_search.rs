//! Order search criteria.

use serde::{Deserialize, Serialize};

use crate::models::OrderStatus;

/// Optional filters for order queries.
///
/// A `None` field means "no filter on that dimension"; a present field must
/// match exactly. Partial/LIKE matching on the member name is not supported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSearch {
    pub member_name: Option<String>,
    pub order_status: Option<OrderStatus>,
}

impl OrderSearch {
    pub fn new(member_name: Option<String>, order_status: Option<OrderStatus>) -> Self {
        Self {
            member_name,
            order_status,
        }
    }

    pub fn set_member_name(&mut self, member_name: Option<String>) {
        self.member_name = member_name;
    }

    pub fn set_order_status(&mut self, order_status: Option<OrderStatus>) {
        self.order_status = order_status;
    }

    /// True when no filter is set.
    pub fn is_unfiltered(&self) -> bool {
        self.member_name.is_none() && self.order_status.is_none()
    }

    /// Evaluates the criteria against one order row in memory.
    #[cfg(test)]
    pub fn matches(&self, status: OrderStatus, member_name: &str) -> bool {
        let status_ok = self.order_status.is_none_or(|wanted| wanted == status);
        let name_ok = self
            .member_name
            .as_deref()
            .is_none_or(|wanted| wanted == member_name);
        status_ok && name_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_everything() {
        let search = OrderSearch::default();
        assert!(search.is_unfiltered());
        assert!(search.matches(OrderStatus::Order, "Alice"));
        assert!(search.matches(OrderStatus::Cancel, "Bob"));
    }

    #[test]
    fn test_status_filter_is_exact() {
        let search = OrderSearch::new(None, Some(OrderStatus::Cancel));
        assert!(search.matches(OrderStatus::Cancel, "Alice"));
        assert!(!search.matches(OrderStatus::Order, "Alice"));
    }

    #[test]
    fn test_name_filter_is_exact_not_partial() {
        let search = OrderSearch::new(Some("Ali".to_string()), None);
        assert!(!search.matches(OrderStatus::Order, "Alice"));
        assert!(search.matches(OrderStatus::Order, "Ali"));
    }

    #[test]
    fn test_both_filters_are_conjunctive() {
        let mut search = OrderSearch::default();
        search.set_member_name(Some("Alice".to_string()));
        search.set_order_status(Some(OrderStatus::Order));
        assert!(!search.is_unfiltered());
        assert!(search.matches(OrderStatus::Order, "Alice"));
        assert!(!search.matches(OrderStatus::Cancel, "Alice"));
        assert!(!search.matches(OrderStatus::Order, "Bob"));
    }
}
