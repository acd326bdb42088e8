//! Order repository: criteria-driven order lookup.

use async_trait::async_trait;
use diesel::dsl;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::Order;
use crate::repositories::OrderSearch;
use crate::schema::{members, orders};

/// Upper bound on rows returned by a single search.
pub const MAX_SEARCH_RESULTS: i64 = 1000;

type SearchQuery = dsl::IntoBoxed<
    'static,
    dsl::Limit<
        dsl::OrderBy<
            dsl::Select<dsl::InnerJoin<orders::table, members::table>, dsl::AsSelect<Order, Pg>>,
            dsl::Asc<orders::id>,
        >,
    >,
    Pg,
>;

/// Orders joined to their member, filtered by whichever criteria are set.
fn search_query(search: &OrderSearch) -> SearchQuery {
    let mut query = orders::table
        .inner_join(members::table)
        .select(Order::as_select())
        .order(orders::id.asc())
        .limit(MAX_SEARCH_RESULTS)
        .into_boxed();

    if let Some(status) = search.order_status {
        query = query.filter(orders::status.eq(status));
    }
    if let Some(member_name) = search.member_name.clone() {
        query = query.filter(members::name.eq(member_name));
    }

    query
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Orders matching `search`, ordered by id, at most [`MAX_SEARCH_RESULTS`].
    async fn find_all(&self, search: &OrderSearch) -> AppResult<Vec<Order>>;
}

/// PostgreSQL-backed order repository.
#[derive(Clone)]
pub struct PgOrderRepository {
    pool: AsyncDbPool,
}

impl PgOrderRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn find_all(&self, search: &OrderSearch) -> AppResult<Vec<Order>> {
        let mut conn = self.pool.get().await?;
        search_query(search)
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
