//! PostgreSQL repository implementations

mod comment;
mod error;
mod group;
mod join_request;
mod member;
mod message;
mod post;
mod reaction;
mod shared_post;
mod token;
mod user;

pub use comment::PgCommentRepository;
pub use group::PgGroupRepository;
pub use join_request::PgJoinRequestRepository;
pub use member::PgMemberRepository;
pub use message::PgMessageRepository;
pub use post::PgPostRepository;
pub use reaction::PgReactionRepository;
pub use shared_post::PgSharedPostRepository;
pub use token::PgAuthTokenRepository;
pub use user::PgUserRepository;
