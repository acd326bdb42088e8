//! Member-related DTOs for API requests and responses.
//!
//! These shapes are the v2 wire contract and are kept independent of the
//! Diesel models in `crate::models`.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{Member, NewMember};

// ============================================================================
// Request DTOs
// ============================================================================

/// Request body for registering a member.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateMemberRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1 to 255 characters"))]
    #[schema(min_length = 1, max_length = 255, example = "Alice")]
    pub name: String,
}

impl CreateMemberRequest {
    /// Converts the request DTO into a NewMember model for database insertion.
    pub fn into_new_member(self) -> NewMember {
        NewMember::named(self.name)
    }
}

/// Request body for renaming a member.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateMemberRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1 to 255 characters"))]
    #[schema(min_length = 1, max_length = 255, example = "Alicia")]
    pub name: String,
}

// ============================================================================
// Response DTOs
// ============================================================================

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateMemberResponse {
    pub id: i64,
}

/// Built from the stored member after the update, not from the request.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateMemberResponse {
    pub id: i64,
    pub name: String,
}

impl From<Member> for UpdateMemberResponse {
    fn from(member: Member) -> Self {
        Self {
            id: member.id,
            name: member.name,
        }
    }
}

/// List projection of a member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MemberDto {
    pub name: String,
}

impl From<Member> for MemberDto {
    fn from(member: Member) -> Self {
        Self { name: member.name }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Address;

    fn member() -> Member {
        Member {
            id: 7,
            name: "Alice".to_string(),
            address: Address {
                city: Some("Seoul".to_string()),
                street: None,
                zipcode: None,
            },
        }
    }

    #[test]
    fn test_member_dto_hides_entity_fields() {
        let json = serde_json::to_value(MemberDto::from(member())).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "Alice" }));
    }

    #[test]
    fn test_update_response_from_member() {
        let json = serde_json::to_value(UpdateMemberResponse::from(member())).unwrap();
        assert_eq!(json, serde_json::json!({ "id": 7, "name": "Alice" }));
    }

    #[test]
    fn test_create_request_ignores_unknown_fields() {
        let request: CreateMemberRequest =
            serde_json::from_str(r#"{"name":"Alice","address":{"city":"Seoul"}}"#).unwrap();
        let new_member = request.into_new_member();
        assert_eq!(new_member.name, "Alice");
        assert_eq!(new_member.address, Address::default());
    }

    #[test]
    fn test_empty_name_fails_validation() {
        let request = UpdateMemberRequest {
            name: String::new(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_name_longer_than_column_fails_validation() {
        let create = CreateMemberRequest {
            name: "a".repeat(256),
        };
        assert!(create.validate().is_err());

        let update = UpdateMemberRequest {
            name: "a".repeat(256),
        };
        assert!(update.validate().is_err());
        assert!(
            UpdateMemberRequest {
                name: "a".repeat(255)
            }
            .validate()
            .is_ok()
        );
    }
}
