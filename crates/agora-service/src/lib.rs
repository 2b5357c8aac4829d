//! # agora-service
//!
//! Application layer: request/response DTOs, the service context, and the
//! domain services that implement every API operation.

pub mod dto;
pub mod services;

pub use dto::*;
pub use services::*;
