//! Entity <-> model mappers

mod comment;
mod group;
mod join_request;
mod member;
mod message;
mod post;
mod reaction;
mod shared_post;
mod user;

pub use join_request::{join_request_from_model, join_request_with_user};
pub use member::{member_from_model, member_with_user};
