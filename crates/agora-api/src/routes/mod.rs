//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::handlers::{
    auth, comments, groups, health, joins, members, messages, posts, reactions, shares, users,
};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(group_routes())
        .merge(post_routes())
        .merge(message_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/forgot-password", post(auth::forgot_password))
        .route("/auth/verify-email", post(auth::verify_email))
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/@me", get(users::get_current_user))
        .route("/users/:user_id", get(users::get_user))
}

/// Group routes
fn group_routes() -> Router<AppState> {
    Router::new()
        // Group CRUD
        .route("/groups", get(groups::list_groups))
        .route("/groups", post(groups::create_group))
        .route("/groups/:group_id", get(groups::get_group))
        .route("/groups/:group_id", patch(groups::update_group))
        .route("/groups/:group_id", delete(groups::delete_group))
        // Join workflow
        .route("/groups/:group_id/join", post(joins::join_group))
        .route("/groups/:group_id/requests", get(joins::list_join_requests))
        .route(
            "/groups/:group_id/requests/:user_id",
            put(joins::review_join_request),
        )
        // Roster
        .route("/groups/:group_id/members", get(members::list_members))
        .route("/groups/:group_id/members", post(members::add_member))
        .route(
            "/groups/:group_id/members/:user_id",
            put(members::update_member_role),
        )
        .route(
            "/groups/:group_id/members/:user_id",
            delete(members::remove_member),
        )
        // Group posts
        .route("/groups/:group_id/posts", get(posts::list_group_posts))
        .route("/groups/:group_id/posts", post(posts::create_group_post))
}

/// Post routes
fn post_routes() -> Router<AppState> {
    Router::new()
        // Post CRUD
        .route("/posts", get(posts::list_posts))
        .route("/posts", post(posts::create_post))
        // Sharing (fixed segments before the :post_id routes)
        .route("/posts/share", post(shares::share_post))
        .route("/posts/shared/:shared_post_id", get(shares::get_shared_post))
        .route("/posts/:post_id", get(posts::get_post))
        .route("/posts/:post_id", patch(posts::update_post))
        .route("/posts/:post_id", delete(posts::delete_post))
        // Comments
        .route("/posts/:post_id/comments", get(comments::list_comments))
        .route("/posts/:post_id/comments", post(comments::create_comment))
        // Reactions
        .route("/posts/:post_id/reactions", get(reactions::list_reactions))
        .route("/posts/:post_id/reactions", post(reactions::add_reaction))
        .route(
            "/posts/:post_id/reactions",
            delete(reactions::remove_reaction),
        )
}

/// Message routes
fn message_routes() -> Router<AppState> {
    Router::new()
        .route("/messages", get(messages::get_messages))
        .route("/messages", post(messages::send_message))
        .route("/messages", patch(messages::mark_read))
}
