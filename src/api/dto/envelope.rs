//! Generic response envelope.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Wraps a payload in a `{"data": ...}` object.
///
/// List endpoints return an object rather than a bare array so sibling fields
/// can be added later without breaking clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Envelope<T> {
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

impl<T> From<T> for Envelope<T> {
    fn from(data: T) -> Self {
        Self::new(data)
    }
}
