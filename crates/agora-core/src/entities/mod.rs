//! Domain entities - core business objects

mod comment;
mod group;
mod join_request;
mod member;
mod message;
mod post;
mod reaction;
mod shared_post;
mod user;

pub use comment::Comment;
pub use group::Group;
pub use join_request::{JoinRequest, JoinRequestStatus, StatusParseError};
pub use member::GroupMember;
pub use message::Message;
pub use post::Post;
pub use reaction::Reaction;
pub use shared_post::SharedPost;
pub use user::{generate_token, User};
