use diesel::prelude::*;
use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Order status; `ORDER` on the wire, `order` in Postgres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, DbEnum, ToSchema)]
#[db_enum(existing_type_path = "crate::schema::sql_types::OrderStatus")]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    Order,
    Cancel,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Order => write!(f, "ORDER"),
            OrderStatus::Cancel => write!(f, "CANCEL"),
        }
    }
}

/// Order model for reading from database
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = crate::schema::orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Order {
    pub id: i64,
    pub member_id: i64,
    #[diesel(deserialize_as = jiff_diesel::DateTime)]
    pub order_date: jiff::civil::DateTime,
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_wire_format() {
        assert_eq!(serde_json::to_string(&OrderStatus::Order).unwrap(), "\"ORDER\"");
        assert_eq!(serde_json::to_string(&OrderStatus::Cancel).unwrap(), "\"CANCEL\"");
        let parsed: OrderStatus = serde_json::from_str("\"CANCEL\"").unwrap();
        assert_eq!(parsed, OrderStatus::Cancel);
    }

    #[test]
    fn test_order_status_display() {
        assert_eq!(OrderStatus::Order.to_string(), "ORDER");
    }
}
