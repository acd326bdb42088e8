use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Postal address embedded in the `members` row.
///
/// Length bounds mirror the column widths.
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Queryable,
    Selectable,
    Insertable,
    Serialize,
    Deserialize,
    Validate,
    ToSchema,
)]
#[diesel(table_name = crate::schema::members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Address {
    #[validate(length(max = 255, message = "City must be at most 255 characters"))]
    pub city: Option<String>,
    #[validate(length(max = 255, message = "Street must be at most 255 characters"))]
    pub street: Option<String>,
    #[validate(length(max = 32, message = "Zipcode must be at most 32 characters"))]
    pub zipcode: Option<String>,
}

/// Member model for reading from database
///
/// `Serialize` exists only for the legacy v1 listing, which returns entities
/// as-is. New endpoints must project into DTOs instead.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Serialize, ToSchema)]
#[diesel(table_name = crate::schema::members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Member {
    pub id: i64,
    pub name: String,
    #[diesel(embed)]
    pub address: Address,
}

/// NewMember model for inserting new records
///
/// Doubles as the legacy v1 registration body, hence `Deserialize` and
/// `Validate`.
#[derive(Debug, Clone, Insertable, Deserialize, Validate, ToSchema)]
#[diesel(table_name = crate::schema::members)]
pub struct NewMember {
    #[validate(length(min = 1, max = 255, message = "Name must be 1 to 255 characters"))]
    pub name: String,
    #[serde(default)]
    #[diesel(embed)]
    #[validate(nested)]
    pub address: Address,
}

impl NewMember {
    /// A member with only a name and an empty address.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: Address::default(),
        }
    }
}
