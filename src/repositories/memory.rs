//! In-memory repositories used by unit tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{AppError, AppResult};
use crate::models::{Member, NewMember, Order};
use crate::repositories::{MAX_SEARCH_RESULTS, MemberRepository, OrderRepository, OrderSearch};

/// Mirrors the `members_name_key` unique index and BIGSERIAL ids.
#[derive(Default)]
pub struct InMemoryMemberRepository {
    members: Mutex<Vec<Member>>,
}

impl InMemoryMemberRepository {
    pub fn len(&self) -> usize {
        self.members.lock().unwrap().len()
    }

    fn duplicate(name: &str) -> AppError {
        AppError::Duplicate {
            entity: "members".to_string(),
            field: "name".to_string(),
            value: name.to_string(),
        }
    }
}

#[async_trait]
impl MemberRepository for InMemoryMemberRepository {
    async fn save(&self, new_member: NewMember) -> AppResult<Member> {
        let mut members = self.members.lock().unwrap();
        if members.iter().any(|m| m.name == new_member.name) {
            return Err(Self::duplicate(&new_member.name));
        }
        let member = Member {
            id: members.last().map(|m| m.id + 1).unwrap_or(1),
            name: new_member.name,
            address: new_member.address,
        };
        members.push(member.clone());
        Ok(member)
    }

    async fn find_one(&self, member_id: i64) -> AppResult<Option<Member>> {
        let members = self.members.lock().unwrap();
        Ok(members.iter().find(|m| m.id == member_id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Member>> {
        Ok(self.members.lock().unwrap().clone())
    }

    async fn find_by_name(&self, member_name: &str) -> AppResult<Vec<Member>> {
        let members = self.members.lock().unwrap();
        Ok(members
            .iter()
            .filter(|m| m.name == member_name)
            .cloned()
            .collect())
    }

    async fn update_name(&self, member_id: i64, new_name: &str) -> AppResult<usize> {
        let mut members = self.members.lock().unwrap();
        // An UPDATE matching no row affects nothing, so the index is never hit
        if !members.iter().any(|m| m.id == member_id) {
            return Ok(0);
        }
        if members
            .iter()
            .any(|m| m.id != member_id && m.name == new_name)
        {
            return Err(Self::duplicate(new_name));
        }
        match members.iter_mut().find(|m| m.id == member_id) {
            Some(member) => {
                member.name = new_name.to_string();
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

/// Order rows paired with the name of the ordering member.
#[derive(Default)]
pub struct InMemoryOrderRepository {
    rows: Vec<(Order, String)>,
}

impl InMemoryOrderRepository {
    pub fn new(rows: Vec<(Order, String)>) -> Self {
        Self { rows }
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn find_all(&self, search: &OrderSearch) -> AppResult<Vec<Order>> {
        let mut found: Vec<Order> = self
            .rows
            .iter()
            .filter(|(order, member_name)| search.matches(order.status, member_name))
            .map(|(order, _)| order.clone())
            .collect();
        found.sort_by_key(|o| o.id);
        found.truncate(MAX_SEARCH_RESULTS as usize);
        Ok(found)
    }
}
