//! Member request handlers (v1 contract).
//!
//! These endpoints bind the `Member`/`NewMember` entities directly to the wire,
//! so any schema change leaks into the API. They are mounted only when
//! `api.enable_legacy_v1` is set; new clients should use `/api/v2/members`.

use axum::{Json, extract::State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::LEGACY_MEMBER_TAG;
use crate::api::dto::{CreateMemberResponse, ErrorResponse};
use crate::error::AppResult;
use crate::models::{Member, NewMember};
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Creates legacy member routes, nested under `/api/v1`.
///
/// Routes:
/// - GET /members   - List members as entities
/// - POST /members  - Register a member from an entity body
pub fn legacy_member_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(list_members_v1, create_member_v1))
}

/// GET /api/v1/members - List members as raw entities
#[utoipa::path(
    get,
    path = "/members",
    tag = LEGACY_MEMBER_TAG,
    responses(
        (status = 200, description = "All members", body = Vec<Member>)
    )
)]
async fn list_members_v1(State(state): State<AppState>) -> AppResult<Json<Vec<Member>>> {
    let members = state.services.members.find_members().await?;
    Ok(Json(members))
}

/// POST /api/v1/members - Register a member from an entity body
#[utoipa::path(
    post,
    path = "/members",
    tag = LEGACY_MEMBER_TAG,
    request_body = NewMember,
    responses(
        (status = 200, description = "Member registered", body = CreateMemberResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "Name already taken", body = ErrorResponse)
    )
)]
async fn create_member_v1(
    State(state): State<AppState>,
    ValidatedJson(member): ValidatedJson<NewMember>,
) -> AppResult<Json<CreateMemberResponse>> {
    let id = state.services.members.join(member).await?;
    Ok(Json(CreateMemberResponse { id }))
}
