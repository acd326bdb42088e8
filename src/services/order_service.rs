//! Order lookup by search criteria.

use std::sync::Arc;

use crate::error::AppResult;
use crate::models::Order;
use crate::repositories::{OrderRepository, OrderSearch};

#[derive(Clone)]
pub struct OrderService {
    repo: Arc<dyn OrderRepository>,
}

impl OrderService {
    pub fn new(repo: Arc<dyn OrderRepository>) -> Self {
        Self { repo }
    }

    /// Orders matching `search`; absent criteria do not filter.
    pub async fn find_orders(&self, search: &OrderSearch) -> AppResult<Vec<Order>> {
        let orders = self.repo.find_all(search).await?;
        tracing::debug!(
            member_name = ?search.member_name,
            order_status = ?search.order_status,
            count = orders.len(),
            "Order search completed"
        );
        Ok(orders)
    }
}
