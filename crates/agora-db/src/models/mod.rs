//! Database models with SQLx `FromRow` derives

mod comment;
mod group;
mod join_request;
mod member;
mod message;
mod post;
mod reaction;
mod shared_post;
mod user;

pub use comment::CommentModel;
pub use group::GroupModel;
pub use join_request::{JoinRequestModel, JoinRequestWithUserModel};
pub use member::{GroupMemberModel, MemberWithUserModel};
pub use message::MessageModel;
pub use post::PostModel;
pub use reaction::ReactionModel;
pub use shared_post::SharedPostModel;
pub use user::UserModel;
