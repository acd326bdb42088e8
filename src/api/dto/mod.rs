//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `member` - Member-related request/response DTOs
//! - `envelope` - The `{data}` wrapper for list responses
//! - `error` - Common error response DTOs

mod envelope;
mod error;
mod member;

pub use envelope::Envelope;
pub use error::ErrorResponse;
pub use member::{
    CreateMemberRequest, CreateMemberResponse, MemberDto, UpdateMemberRequest,
    UpdateMemberResponse,
};
