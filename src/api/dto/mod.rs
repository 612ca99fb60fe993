//! Data Transfer Objects for REST request/response serialization.
//!
//! Field names are camelCase on the wire.

pub mod attendee_dto;
pub mod certificate_dto;
pub mod common_dto;
pub mod event_dto;

pub use attendee_dto::*;
pub use certificate_dto::*;
pub use common_dto::*;
pub use event_dto::*;
