use utoipa::OpenApi;

pub const MEMBER_TAG: &str = "Members";
pub const LEGACY_MEMBER_TAG: &str = "Members (v1, legacy)";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shop",
        description = "Member registration and lookup API for the shop backend",
    ),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
            crate::models::OrderStatus,
        )
    ),
    tags(
        (name = MEMBER_TAG, description = "Member endpoints"),
        (
            name = LEGACY_MEMBER_TAG,
            description = "Entity-shaped member endpoints kept for old clients"
        ),
    )
)]
pub struct ApiDoc;
