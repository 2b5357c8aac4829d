//! Mappers from domain entities to response DTOs

use agora_core::entities::{Group, GroupMember, JoinRequest, Message, Post, Reaction, User};
use agora_core::value_objects::GroupRole;

use super::responses::{
    CurrentUserResponse, GroupResponse, JoinRequestResponse, MemberResponse, MemberUserResponse,
    MessageResponse, PostResponse, ReactionResponse, UserResponse,
};

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            image: user.image.clone(),
        }
    }
}

impl From<&User> for MemberUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            image: user.image.clone(),
        }
    }
}

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            image: user.image.clone(),
            email_verified: user.email_verified,
            created_at: user.created_at,
        }
    }
}

/// Group with everything its response needs
#[derive(Debug)]
pub struct GroupWithMeta {
    pub group: Group,
    pub owner: User,
    pub member_count: i64,
    pub post_count: i64,
    pub viewer_role: Option<GroupRole>,
}

impl From<GroupWithMeta> for GroupResponse {
    fn from(meta: GroupWithMeta) -> Self {
        Self {
            id: meta.group.id.to_string(),
            name: meta.group.name,
            slug: meta.group.slug,
            description: meta.group.description,
            is_private: meta.group.is_private,
            owner: UserResponse::from(&meta.owner),
            member_count: meta.member_count,
            post_count: meta.post_count,
            is_member: meta.viewer_role.is_some(),
            role: meta.viewer_role,
            created_at: meta.group.created_at,
        }
    }
}

/// Member row paired with its user profile
#[derive(Debug)]
pub struct MemberWithUser {
    pub member: GroupMember,
    pub user: User,
}

impl From<MemberWithUser> for MemberResponse {
    fn from(pair: MemberWithUser) -> Self {
        Self {
            group_id: pair.member.group_id.to_string(),
            user: MemberUserResponse::from(&pair.user),
            role: pair.member.role,
            joined_at: pair.member.joined_at,
        }
    }
}

impl From<(JoinRequest, User)> for JoinRequestResponse {
    fn from((request, user): (JoinRequest, User)) -> Self {
        Self {
            group_id: request.group_id.to_string(),
            user: MemberUserResponse::from(&user),
            status: request.status,
            created_at: request.created_at,
        }
    }
}

/// Post with everything its response needs
#[derive(Debug)]
pub struct PostWithMeta {
    pub post: Post,
    pub author: User,
    pub comment_count: i64,
    pub reaction_count: i64,
}

impl From<PostWithMeta> for PostResponse {
    fn from(meta: PostWithMeta) -> Self {
        Self {
            id: meta.post.id.to_string(),
            title: meta.post.title,
            content: meta.post.content,
            author: UserResponse::from(&meta.author),
            group_id: meta.post.group_id.map(|id| id.to_string()),
            published: meta.post.published,
            comment_count: meta.comment_count,
            reaction_count: meta.reaction_count,
            created_at: meta.post.created_at,
            updated_at: meta.post.updated_at,
        }
    }
}

impl ReactionResponse {
    pub fn from_parts(reaction: &Reaction, user: &User) -> Self {
        Self {
            post_id: reaction.post_id.to_string(),
            user: UserResponse::from(user),
            kind: reaction.kind.clone(),
            created_at: reaction.created_at,
        }
    }
}

impl MessageResponse {
    pub fn from_parts(message: &Message, sender: &User, receiver: &User) -> Self {
        Self {
            id: message.id.to_string(),
            sender: UserResponse::from(sender),
            receiver: UserResponse::from(receiver),
            content: message.content.clone(),
            read: message.read,
            shared_post_id: message.shared_post_id.map(|id| id.to_string()),
            created_at: message.created_at,
        }
    }
}
