//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between
//! repositories and handlers.

mod member_service;
mod order_service;

pub use member_service::MemberService;
pub use order_service::OrderService;

use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// Cloning is cheap since repositories are shared behind `Arc`.
#[derive(Clone)]
pub struct Services {
    pub members: MemberService,
    pub orders: OrderService,
}

impl Services {
    /// Creates a new Services instance from Repositories.
    pub fn new(repos: Repositories) -> Self {
        Self {
            members: MemberService::new(repos.members),
            orders: OrderService::new(repos.orders),
        }
    }
}
