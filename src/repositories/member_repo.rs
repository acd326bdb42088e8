//! Member repository for async database operations.
//!
//! Provides create/read/update operations for the members table using diesel_async.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult, DatabaseErrorConverter};
use crate::models::{Member, NewMember};

/// Persistence operations the member service relies on.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Inserts a member and returns it with its generated id.
    async fn save(&self, new_member: NewMember) -> AppResult<Member>;

    /// `Some(Member)` if found, `None` otherwise.
    async fn find_one(&self, member_id: i64) -> AppResult<Option<Member>>;

    /// All members ordered by id.
    async fn find_all(&self) -> AppResult<Vec<Member>>;

    /// Members whose name equals `member_name` exactly.
    async fn find_by_name(&self, member_name: &str) -> AppResult<Vec<Member>>;

    /// Renames a member. Returns the number of affected rows (0 or 1).
    async fn update_name(&self, member_id: i64, new_name: &str) -> AppResult<usize>;
}

/// PostgreSQL-backed member repository.
///
/// `AsyncDbPool` (bb8::Pool) is reference counted, so cloning is cheap.
#[derive(Clone)]
pub struct PgMemberRepository {
    pool: AsyncDbPool,
}

impl PgMemberRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    async fn save(&self, new_member: NewMember) -> AppResult<Member> {
        use crate::schema::members::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(members)
            .values(&new_member)
            .returning(Member::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "insert member"))
    }

    async fn find_one(&self, member_id: i64) -> AppResult<Option<Member>> {
        use crate::schema::members::dsl::*;
        let mut conn = self.pool.get().await?;

        members
            .filter(id.eq(member_id))
            .select(Member::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn find_all(&self) -> AppResult<Vec<Member>> {
        use crate::schema::members::dsl::*;
        let mut conn = self.pool.get().await?;

        members
            .select(Member::as_select())
            .order(id.asc())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn find_by_name(&self, member_name: &str) -> AppResult<Vec<Member>> {
        use crate::schema::members::dsl::*;
        let mut conn = self.pool.get().await?;

        members
            .filter(name.eq(member_name))
            .select(Member::as_select())
            .order(id.asc())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn update_name(&self, member_id: i64, new_name: &str) -> AppResult<usize> {
        use crate::schema::members::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(members.filter(id.eq(member_id)))
            .set(name.eq(new_name))
            .execute(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "update member name"))
    }
}
