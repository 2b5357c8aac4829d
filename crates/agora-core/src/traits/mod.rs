//! Repository traits (ports) for the storage layer

mod repositories;

pub use repositories::{
    AuthTokenRepository, CommentRepository, GroupListQuery, GroupRepository,
    JoinRequestRepository, MemberListQuery, MemberRepository, MessageRepository, PageQuery,
    PostListQuery, PostRepository, ReactionRepository, RepoResult, SharedPostRepository,
    UserRepository,
};
