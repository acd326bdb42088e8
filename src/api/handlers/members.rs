//! Member request handlers (v2 contract).
//!
//! Request and response bodies are DTOs; entities never cross this boundary.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::MEMBER_TAG;
use crate::api::dto::{
    CreateMemberRequest, CreateMemberResponse, Envelope, ErrorResponse, MemberDto,
    UpdateMemberRequest, UpdateMemberResponse,
};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Creates member routes, nested under `/api/v2`.
///
/// Routes:
/// - GET /members       - List members
/// - POST /members      - Register a member
/// - PUT /members/:id   - Rename a member
pub fn member_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_members, create_member))
        .routes(routes!(update_member))
}

/// GET /api/v2/members - List members
///
/// Returns every member projected to `{name}`, wrapped in `{data: [...]}`.
#[utoipa::path(
    get,
    path = "/members",
    tag = MEMBER_TAG,
    responses(
        (status = 200, description = "All members in id order", body = Envelope<Vec<MemberDto>>)
    )
)]
async fn list_members(State(state): State<AppState>) -> AppResult<Json<Envelope<Vec<MemberDto>>>> {
    let members = state.services.members.find_members().await?;
    let dtos: Vec<MemberDto> = members.into_iter().map(MemberDto::from).collect();
    Ok(Json(Envelope::new(dtos)))
}

/// POST /api/v2/members - Register a member
#[utoipa::path(
    post,
    path = "/members",
    tag = MEMBER_TAG,
    request_body = CreateMemberRequest,
    responses(
        (status = 200, description = "Member registered", body = CreateMemberResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "Name already taken", body = ErrorResponse)
    )
)]
async fn create_member(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateMemberRequest>,
) -> AppResult<Json<CreateMemberResponse>> {
    let id = state.services.members.join(payload.into_new_member()).await?;
    Ok(Json(CreateMemberResponse { id }))
}

/// PUT /api/v2/members/:id - Rename a member
///
/// The response is read back after the update, so it reflects what was stored.
#[utoipa::path(
    put,
    path = "/members/{id}",
    tag = MEMBER_TAG,
    params(
        ("id" = i64, Path, description = "Member ID")
    ),
    request_body = UpdateMemberRequest,
    responses(
        (status = 200, description = "Member renamed", body = UpdateMemberResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Member not found", body = ErrorResponse)
    )
)]
async fn update_member(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    ValidatedJson(payload): ValidatedJson<UpdateMemberRequest>,
) -> AppResult<Json<UpdateMemberResponse>> {
    let Path(id) = path?;
    state.services.members.update(id, &payload.name).await?;
    let member = state.services.members.find_one(id).await?;
    Ok(Json(UpdateMemberResponse::from(member)))
}
