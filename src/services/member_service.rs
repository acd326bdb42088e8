//! Member service for business logic operations.
//!
//! Wraps the member repository with the registration rule (names are unique)
//! and turns missing rows into `NotFound` errors.

use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::{Member, NewMember};
use crate::repositories::MemberRepository;

const ENTITY: &str = "member";

/// Member service for handling member-related business logic.
#[derive(Clone)]
pub struct MemberService {
    repo: Arc<dyn MemberRepository>,
}

impl MemberService {
    /// Creates a new MemberService with the given repository.
    pub fn new(repo: Arc<dyn MemberRepository>) -> Self {
        Self { repo }
    }

    /// Registers a member and returns its generated id.
    ///
    /// # Errors
    /// `Duplicate` when a member with the same name already exists.
    pub async fn join(&self, new_member: NewMember) -> AppResult<i64> {
        self.validate_duplicate_member(&new_member.name).await?;
        let member = self.repo.save(new_member).await?;
        tracing::info!(member_id = member.id, "Member registered");
        Ok(member.id)
    }

    async fn validate_duplicate_member(&self, name: &str) -> AppResult<()> {
        // The unique index still guards against concurrent registrations
        if !self.repo.find_by_name(name).await?.is_empty() {
            return Err(AppError::Duplicate {
                entity: ENTITY.to_string(),
                field: "name".to_string(),
                value: name.to_string(),
            });
        }
        Ok(())
    }

    /// Lists all members ordered by id.
    pub async fn find_members(&self) -> AppResult<Vec<Member>> {
        self.repo.find_all().await
    }

    /// Gets a member by id, or `NotFound`.
    pub async fn find_one(&self, id: i64) -> AppResult<Member> {
        self.repo
            .find_one(id)
            .await?
            .ok_or_else(|| AppError::not_found_by_id(ENTITY, id))
    }

    /// Renames a member.
    ///
    /// Returns nothing on purpose: callers re-read with [`find_one`](Self::find_one)
    /// to report committed state.
    pub async fn update(&self, id: i64, name: &str) -> AppResult<()> {
        let affected = self.repo.update_name(id, name).await?;
        if affected == 0 {
            return Err(AppError::not_found_by_id(ENTITY, id));
        }
        tracing::debug!(member_id = id, "Member renamed");
        Ok(())
    }
}
