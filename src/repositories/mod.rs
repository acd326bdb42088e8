//! Repository layer for data access operations.
//!
//! Repositories are exposed as traits so services can be built over either
//! the PostgreSQL implementations or in-memory ones in tests.

mod member_repo;
#[cfg(test)]
pub(crate) mod memory;
mod order_repo;
mod order_search;

pub use member_repo::{MemberRepository, PgMemberRepository};
pub use order_repo::{MAX_SEARCH_RESULTS, OrderRepository, PgOrderRepository};
pub use order_search::OrderSearch;

use std::sync::Arc;

use crate::db::AsyncDbPool;

/// Aggregates all repositories for convenient access.
///
/// Cloning only bumps reference counts.
#[derive(Clone)]
pub struct Repositories {
    pub members: Arc<dyn MemberRepository>,
    pub orders: Arc<dyn OrderRepository>,
}

impl Repositories {
    /// Creates PostgreSQL-backed repositories sharing one pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            members: Arc::new(PgMemberRepository::new(pool.clone())),
            orders: Arc::new(PgOrderRepository::new(pool)),
        }
    }

    /// Builds the aggregate from explicit implementations.
    pub fn from_parts(
        members: Arc<dyn MemberRepository>,
        orders: Arc<dyn OrderRepository>,
    ) -> Self {
        Self { members, orders }
    }
}
