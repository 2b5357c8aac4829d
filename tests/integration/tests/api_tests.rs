//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance (schema.sql applied)
//! - Environment variables: DATABASE_URL, JWT_SECRET, API_PORT
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{assert_json, assert_status, check_test_env, fixtures::*, TestServer};
use reqwest::StatusCode;
use serde_json::json;

/// Register a fresh user and return (registration, auth)
async fn register_user(server: &TestServer) -> (RegisterRequest, AuthResponse) {
    let request = RegisterRequest::unique();
    let response = server
        .post("/api/v1/auth/register", &request)
        .await
        .expect("register request failed");
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    (request, auth)
}

/// Create a group owned by `token`'s user
async fn create_group(server: &TestServer, token: &str, request: &CreateGroupRequest) -> GroupResponse {
    let response = server
        .post_auth("/api/v1/groups", token, request)
        .await
        .expect("create group request failed");
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (request, auth) = register_user(&server).await;

    assert_eq!(auth.user.name, request.name);
    assert_eq!(auth.user.email, request.email);
    assert!(!auth.user.email_verified);
    assert!(!auth.access_token.is_empty());
    assert!(!auth.refresh_token.is_empty());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    server.post("/api/v1/auth/register", &request).await.unwrap();

    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_register_weak_password() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let mut request = RegisterRequest::unique();
    request.password = "alllowercase1".to_string();

    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_login() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (register_req, _) = register_user(&server).await;

    let login_req = LoginRequest::from_register(&register_req);
    let response = server.post("/api/v1/auth/login", &login_req).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(auth.user.email, register_req.email);
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let login_req = LoginRequest {
        email: "nonexistent@example.com".to_string(),
        password: "WrongPass123".to_string(),
    };

    let response = server.post("/api/v1/auth/login", &login_req).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_refresh_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_user(&server).await;

    let response = server
        .post(
            "/api/v1/auth/refresh",
            &json!({ "refresh_token": auth.refresh_token }),
        )
        .await
        .unwrap();
    let refreshed: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(refreshed.user.id, auth.user.id);
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_user(&server).await;

    let response = server
        .post(
            "/api/v1/auth/refresh",
            &json!({ "refresh_token": auth.access_token }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_unauthenticated_request_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/v1/users/@me").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_forgot_password_is_neutral() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (register_req, _) = register_user(&server).await;

    // Known email and unknown email answer with the same message
    let known = server
        .post(
            "/api/v1/auth/forgot-password",
            &json!({ "email": register_req.email }),
        )
        .await
        .unwrap();
    let known_body: serde_json::Value = assert_json(known, StatusCode::OK).await.unwrap();

    let unknown = server
        .post(
            "/api/v1/auth/forgot-password",
            &json!({ "email": "nobody@example.com" }),
        )
        .await
        .unwrap();
    let unknown_body: serde_json::Value = assert_json(unknown, StatusCode::OK).await.unwrap();

    assert_eq!(known_body, unknown_body);
}

#[tokio::test]
async fn test_verify_email_invalid_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .post("/api/v1/auth/verify-email", &json!({ "token": "bogus" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Group Tests
// ============================================================================

#[tokio::test]
async fn test_create_group_owner_is_admin() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_user(&server).await;

    let group = create_group(&server, &auth.access_token, &CreateGroupRequest::public()).await;

    assert_eq!(group.owner.id, auth.user.id);
    assert_eq!(group.member_count, 1);
    assert!(group.is_member);
    assert_eq!(group.role.as_deref(), Some("ADMIN"));

    // Exactly one ADMIN row, and it is the owner's
    let response = server
        .get_auth(
            &format!("/api/v1/groups/{}/members?role=ADMIN", group.id),
            &auth.access_token,
        )
        .await
        .unwrap();
    let members: Paginated<MemberResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(members.pagination.total_count, 1);
    assert_eq!(members.data[0].user.id, auth.user.id);
}

#[tokio::test]
async fn test_group_name_slug_collision() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_user(&server).await;

    let request = CreateGroupRequest::public();
    create_group(&server, &auth.access_token, &request).await;

    // Same name, different punctuation: same slug
    let colliding = CreateGroupRequest {
        name: format!("{}!", request.name),
        description: None,
        is_private: false,
    };
    let response = server
        .post_auth("/api/v1/groups", &auth.access_token, &colliding)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_rename_to_colliding_slug_leaves_group_unchanged() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_user(&server).await;

    let first = create_group(&server, &auth.access_token, &CreateGroupRequest::public()).await;
    let second = create_group(&server, &auth.access_token, &CreateGroupRequest::public()).await;

    let response = server
        .patch_auth(
            &format!("/api/v1/groups/{}", second.id),
            &auth.access_token,
            &json!({ "name": first.name }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    // Unchanged
    let response = server
        .get_auth(&format!("/api/v1/groups/{}", second.id), &auth.access_token)
        .await
        .unwrap();
    let reloaded: GroupResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(reloaded.name, second.name);
    assert_eq!(reloaded.slug, second.slug);
}

#[tokio::test]
async fn test_update_group_requires_admin() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, owner) = register_user(&server).await;
    let (_, stranger) = register_user(&server).await;

    let group = create_group(&server, &owner.access_token, &CreateGroupRequest::public()).await;

    let response = server
        .patch_auth(
            &format!("/api/v1/groups/{}", group.id),
            &stranger.access_token,
            &json!({ "description": "hijacked" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_delete_group_owner_only() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, owner) = register_user(&server).await;
    let (_, member) = register_user(&server).await;

    let group = create_group(&server, &owner.access_token, &CreateGroupRequest::public()).await;

    // Member joins, then tries to delete
    server
        .post_auth_empty(&format!("/api/v1/groups/{}/join", group.id), &member.access_token)
        .await
        .unwrap();

    let response = server
        .delete_auth(&format!("/api/v1/groups/{}", group.id), &member.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .delete_auth(&format!("/api/v1/groups/{}", group.id), &owner.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
}

// ============================================================================
// Membership & Join Workflow Tests
// ============================================================================

#[tokio::test]
async fn test_join_public_group() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, owner) = register_user(&server).await;
    let (_, joiner) = register_user(&server).await;

    let group = create_group(&server, &owner.access_token, &CreateGroupRequest::public()).await;

    let response = server
        .post_auth_empty(&format!("/api/v1/groups/{}/join", group.id), &joiner.access_token)
        .await
        .unwrap();
    let member: MemberResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(member.role, "MEMBER");

    // Joining twice conflicts
    let response = server
        .post_auth_empty(&format!("/api/v1/groups/{}/join", group.id), &joiner.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    // Roster now has owner ADMIN and joiner MEMBER
    let response = server
        .get_auth(&format!("/api/v1/groups/{}/members", group.id), &owner.access_token)
        .await
        .unwrap();
    let members: Paginated<MemberResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(members.pagination.total_count, 2);
    assert_eq!(members.data[0].role, "ADMIN");
    assert_eq!(members.data[0].user.id, owner.user.id);
    assert_eq!(members.data[1].role, "MEMBER");
    assert_eq!(members.data[1].user.id, joiner.user.id);
}

#[tokio::test]
async fn test_private_group_join_request_workflow() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, owner) = register_user(&server).await;
    let (_, requester) = register_user(&server).await;

    let group = create_group(&server, &owner.access_token, &CreateGroupRequest::private()).await;

    // Join creates a pending request, not a membership
    let response = server
        .post_auth_empty(
            &format!("/api/v1/groups/{}/join", group.id),
            &requester.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::ACCEPTED).await.unwrap();

    // A second attempt while pending conflicts
    let response = server
        .post_auth_empty(
            &format!("/api/v1/groups/{}/join", group.id),
            &requester.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    // The request is retrievable by the owner
    let response = server
        .get_auth(&format!("/api/v1/groups/{}/requests", group.id), &owner.access_token)
        .await
        .unwrap();
    let requests: Vec<JoinRequestResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].user.id, requester.user.id);
    assert_eq!(requests[0].status, "PENDING");

    // The requester is still not a member
    let response = server
        .get_auth(&format!("/api/v1/groups/{}/posts", group.id), &requester.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    // Approval creates the membership
    let response = server
        .put_auth(
            &format!("/api/v1/groups/{}/requests/{}", group.id, requester.user.id),
            &owner.access_token,
            &json!({ "action": "accept" }),
        )
        .await
        .unwrap();
    let member: MemberResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(member.role, "MEMBER");

    // The queue is now empty and the member can see the group
    let response = server
        .get_auth(&format!("/api/v1/groups/{}/requests", group.id), &owner.access_token)
        .await
        .unwrap();
    let requests: Vec<JoinRequestResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(requests.is_empty());

    let response = server
        .get_auth(&format!("/api/v1/groups/{}/posts", group.id), &requester.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_join_request_rejection() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, owner) = register_user(&server).await;
    let (_, requester) = register_user(&server).await;

    let group = create_group(&server, &owner.access_token, &CreateGroupRequest::private()).await;

    server
        .post_auth_empty(
            &format!("/api/v1/groups/{}/join", group.id),
            &requester.access_token,
        )
        .await
        .unwrap();

    let response = server
        .put_auth(
            &format!("/api/v1/groups/{}/requests/{}", group.id, requester.user.id),
            &owner.access_token,
            &json!({ "action": "reject" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // Still not a member; a rejected user may ask again
    let response = server
        .post_auth_empty(
            &format!("/api/v1/groups/{}/join", group.id),
            &requester.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::ACCEPTED).await.unwrap();
}

#[tokio::test]
async fn test_join_requests_hidden_from_plain_members() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, owner) = register_user(&server).await;
    let (_, outsider) = register_user(&server).await;

    let group = create_group(&server, &owner.access_token, &CreateGroupRequest::private()).await;

    let response = server
        .get_auth(&format!("/api/v1/groups/{}/requests", group.id), &outsider.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_owner_cannot_be_removed() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, owner) = register_user(&server).await;
    let (_, member) = register_user(&server).await;

    let group = create_group(&server, &owner.access_token, &CreateGroupRequest::public()).await;
    server
        .post_auth_empty(&format!("/api/v1/groups/{}/join", group.id), &member.access_token)
        .await
        .unwrap();

    // Not by a member, and not by the owner themselves
    for token in [&member.access_token, &owner.access_token] {
        let response = server
            .delete_auth(
                &format!("/api/v1/groups/{}/members/{}", group.id, owner.user.id),
                token,
            )
            .await
            .unwrap();
        assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
    }
}

#[tokio::test]
async fn test_member_can_leave() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, owner) = register_user(&server).await;
    let (_, member) = register_user(&server).await;

    let group = create_group(&server, &owner.access_token, &CreateGroupRequest::public()).await;
    server
        .post_auth_empty(&format!("/api/v1/groups/{}/join", group.id), &member.access_token)
        .await
        .unwrap();

    let response = server
        .delete_auth(
            &format!("/api/v1/groups/{}/members/{}", group.id, member.user.id),
            &member.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
}

#[tokio::test]
async fn test_plain_member_cannot_remove_others() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, owner) = register_user(&server).await;
    let (_, member_a) = register_user(&server).await;
    let (_, member_b) = register_user(&server).await;

    let group = create_group(&server, &owner.access_token, &CreateGroupRequest::public()).await;
    for token in [&member_a.access_token, &member_b.access_token] {
        server
            .post_auth_empty(&format!("/api/v1/groups/{}/join", group.id), token)
            .await
            .unwrap();
    }

    let response = server
        .delete_auth(
            &format!("/api/v1/groups/{}/members/{}", group.id, member_b.user.id),
            &member_a.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_only_owner_grants_admin() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, owner) = register_user(&server).await;
    let (_, moderator) = register_user(&server).await;
    let (_, target) = register_user(&server).await;

    let group = create_group(&server, &owner.access_token, &CreateGroupRequest::public()).await;

    // Owner adds a moderator directly
    let response = server
        .post_auth(
            &format!("/api/v1/groups/{}/members", group.id),
            &owner.access_token,
            &AddMemberRequest {
                user_id: moderator.user.id.clone(),
                role: Some("MODERATOR".to_string()),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    // The moderator may add plain members but not admins
    let response = server
        .post_auth(
            &format!("/api/v1/groups/{}/members", group.id),
            &moderator.access_token,
            &AddMemberRequest {
                user_id: target.user.id.clone(),
                role: Some("ADMIN".to_string()),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .post_auth(
            &format!("/api/v1/groups/{}/members", group.id),
            &moderator.access_token,
            &AddMemberRequest {
                user_id: target.user.id.clone(),
                role: None,
            },
        )
        .await
        .unwrap();
    let member: MemberResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(member.role, "MEMBER");

    // Role changes are owner-only
    let response = server
        .put_auth(
            &format!("/api/v1/groups/{}/members/{}", group.id, target.user.id),
            &moderator.access_token,
            &json!({ "role": "MODERATOR" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .put_auth(
            &format!("/api/v1/groups/{}/members/{}", group.id, target.user.id),
            &owner.access_token,
            &json!({ "role": "MODERATOR" }),
        )
        .await
        .unwrap();
    let member: MemberResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(member.role, "MODERATOR");
}

#[tokio::test]
async fn test_member_search_paginates_consistently() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, owner) = register_user(&server).await;

    let group = create_group(&server, &owner.access_token, &CreateGroupRequest::public()).await;

    let response = server
        .get_auth(
            &format!(
                "/api/v1/groups/{}/members?search={}",
                group.id, owner.user.email
            ),
            &owner.access_token,
        )
        .await
        .unwrap();
    let members: Paginated<MemberResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(members.pagination.total_count, 1);
    assert_eq!(members.data.len(), 1);

    let response = server
        .get_auth(
            &format!("/api/v1/groups/{}/members?search=no-such-member", group.id),
            &owner.access_token,
        )
        .await
        .unwrap();
    let members: Paginated<MemberResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(members.pagination.total_count, 0);
    assert!(members.data.is_empty());
}

// ============================================================================
// Post Visibility Tests
// ============================================================================

#[tokio::test]
async fn test_private_group_posts_require_membership() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, owner) = register_user(&server).await;
    let (_, outsider) = register_user(&server).await;

    let group = create_group(&server, &owner.access_token, &CreateGroupRequest::private()).await;

    let response = server
        .get_auth(&format!("/api/v1/groups/{}/posts", group.id), &outsider.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_private_group_posts_absent_from_global_feed() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, owner) = register_user(&server).await;
    let (_, outsider) = register_user(&server).await;

    let group = create_group(&server, &owner.access_token, &CreateGroupRequest::private()).await;

    let mut request = CreatePostRequest::unique();
    request.group_id = Some(group.id.clone());
    server
        .post_auth("/api/v1/posts", &owner.access_token, &request)
        .await
        .unwrap();

    // The outsider's author-filtered feed never surfaces the private post
    let response = server
        .get_auth(
            &format!("/api/v1/posts?author_id={}", owner.user.id),
            &outsider.access_token,
        )
        .await
        .unwrap();
    let posts: Paginated<PostResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(posts.data.iter().all(|post| post.title != request.title));

    // The owner sees it
    let response = server
        .get_auth(
            &format!("/api/v1/posts?author_id={}", owner.user.id),
            &owner.access_token,
        )
        .await
        .unwrap();
    let posts: Paginated<PostResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(posts.data.iter().any(|post| post.title == request.title));
}

#[tokio::test]
async fn test_posting_into_group_requires_membership() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, owner) = register_user(&server).await;
    let (_, outsider) = register_user(&server).await;

    let group = create_group(&server, &owner.access_token, &CreateGroupRequest::public()).await;

    let mut post = CreatePostRequest::unique();
    post.group_id = Some(group.id.clone());

    let response = server
        .post_auth("/api/v1/posts", &outsider.access_token, &post)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .post_auth("/api/v1/posts", &owner.access_token, &post)
        .await
        .unwrap();
    let created: PostResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(created.group_id.as_deref(), Some(group.id.as_str()));
}

#[tokio::test]
async fn test_post_crud() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, author) = register_user(&server).await;
    let (_, other) = register_user(&server).await;

    let request = CreatePostRequest::unique();
    let response = server
        .post_auth("/api/v1/posts", &author.access_token, &request)
        .await
        .unwrap();
    let post: PostResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert!(post.published);

    // Another user cannot edit an ungrouped post
    let response = server
        .patch_auth(
            &format!("/api/v1/posts/{}", post.id),
            &other.access_token,
            &json!({ "title": "Hijacked" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    // The author can
    let response = server
        .patch_auth(
            &format!("/api/v1/posts/{}", post.id),
            &author.access_token,
            &json!({ "title": "Edited title" }),
        )
        .await
        .unwrap();
    let updated: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.title, "Edited title");

    // Unpublished posts vanish for everyone else
    server
        .patch_auth(
            &format!("/api/v1/posts/{}", post.id),
            &author.access_token,
            &json!({ "published": false }),
        )
        .await
        .unwrap();

    let response = server
        .get_auth(&format!("/api/v1/posts/{}", post.id), &other.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .delete_auth(&format!("/api/v1/posts/{}", post.id), &author.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
}

#[tokio::test]
async fn test_group_moderator_can_moderate_posts() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, owner) = register_user(&server).await;
    let (_, author) = register_user(&server).await;

    let group = create_group(&server, &owner.access_token, &CreateGroupRequest::public()).await;
    server
        .post_auth_empty(&format!("/api/v1/groups/{}/join", group.id), &author.access_token)
        .await
        .unwrap();

    let mut request = CreatePostRequest::unique();
    request.group_id = Some(group.id.clone());
    let response = server
        .post_auth("/api/v1/posts", &author.access_token, &request)
        .await
        .unwrap();
    let post: PostResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // The owner (admin of the group) may delete another member's post
    let response = server
        .delete_auth(&format!("/api/v1/posts/{}", post.id), &owner.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
}

// ============================================================================
// Comment & Reaction Tests
// ============================================================================

#[tokio::test]
async fn test_comment_threading() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, author) = register_user(&server).await;

    let response = server
        .post_auth("/api/v1/posts", &author.access_token, &CreatePostRequest::unique())
        .await
        .unwrap();
    let post: PostResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth(
            &format!("/api/v1/posts/{}/comments", post.id),
            &author.access_token,
            &json!({ "content": "First!" }),
        )
        .await
        .unwrap();
    let top: CommentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert!(top.parent_id.is_none());

    let response = server
        .post_auth(
            &format!("/api/v1/posts/{}/comments", post.id),
            &author.access_token,
            &json!({ "content": "Replying", "parent_id": top.id }),
        )
        .await
        .unwrap();
    let reply: CommentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(reply.parent_id.as_deref(), Some(top.id.as_str()));

    let response = server
        .get_auth(&format!("/api/v1/posts/{}/comments", post.id), &author.access_token)
        .await
        .unwrap();
    let comments: Vec<CommentResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].replies.len(), 1);
    assert_eq!(comments[0].replies[0].content, "Replying");
}

#[tokio::test]
async fn test_comment_on_missing_parent() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, author) = register_user(&server).await;

    let response = server
        .post_auth("/api/v1/posts", &author.access_token, &CreatePostRequest::unique())
        .await
        .unwrap();
    let post: PostResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth(
            &format!("/api/v1/posts/{}/comments", post.id),
            &author.access_token,
            &json!({ "content": "Orphan", "parent_id": "999999999" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_reaction_uniqueness() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, author) = register_user(&server).await;

    let response = server
        .post_auth("/api/v1/posts", &author.access_token, &CreatePostRequest::unique())
        .await
        .unwrap();
    let post: PostResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth(
            &format!("/api/v1/posts/{}/reactions", post.id),
            &author.access_token,
            &json!({ "kind": "LIKE" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    // Same (post, user, kind) conflicts
    let response = server
        .post_auth(
            &format!("/api/v1/posts/{}/reactions", post.id),
            &author.access_token,
            &json!({ "kind": "LIKE" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    // A different kind is fine
    let response = server
        .post_auth(
            &format!("/api/v1/posts/{}/reactions", post.id),
            &author.access_token,
            &json!({ "kind": "HEART" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    // Remove one kind, list the rest
    let response = server
        .delete_auth(
            &format!("/api/v1/posts/{}/reactions?kind=LIKE", post.id),
            &author.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .get_auth(&format!("/api/v1/posts/{}/reactions", post.id), &author.access_token)
        .await
        .unwrap();
    let reactions: Vec<ReactionResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(reactions.len(), 1);
    assert_eq!(reactions[0].kind, "HEART");
}

// ============================================================================
// Messaging & Sharing Tests
// ============================================================================

#[tokio::test]
async fn test_conversations_and_unread_counts() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, alice) = register_user(&server).await;
    let (_, bob) = register_user(&server).await;

    for content in ["hi", "are you there?"] {
        server
            .post_auth(
                "/api/v1/messages",
                &alice.access_token,
                &json!({ "receiver_id": bob.user.id, "content": content }),
            )
            .await
            .unwrap();
    }

    // Bob sees one conversation with two unread messages
    let response = server.get_auth("/api/v1/messages", &bob.access_token).await.unwrap();
    let conversations: Vec<ConversationResponse> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(conversations.len(), 1);
    assert_eq!(conversations[0].user_id, alice.user.id);
    assert_eq!(conversations[0].unread_count, 2);
    assert_eq!(conversations[0].last_message, "are you there?");

    // The thread is chronological
    let response = server
        .get_auth(
            &format!("/api/v1/messages?user_id={}", alice.user.id),
            &bob.access_token,
        )
        .await
        .unwrap();
    let thread: Vec<MessageResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(thread.len(), 2);
    assert_eq!(thread[0].content, "hi");

    // Marking read clears the counter
    let response = server
        .patch_auth(
            "/api/v1/messages",
            &bob.access_token,
            &json!({ "sender_id": alice.user.id }),
        )
        .await
        .unwrap();
    let marked: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(marked["updated"], 2);

    let response = server.get_auth("/api/v1/messages", &bob.access_token).await.unwrap();
    let conversations: Vec<ConversationResponse> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(conversations[0].unread_count, 0);
}

#[tokio::test]
async fn test_share_post_default_message() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, sharer) = register_user(&server).await;
    let (_, receiver) = register_user(&server).await;

    let request = CreatePostRequest::unique();
    let response = server
        .post_auth("/api/v1/posts", &sharer.access_token, &request)
        .await
        .unwrap();
    let post: PostResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth(
            "/api/v1/posts/share",
            &sharer.access_token,
            &json!({ "post_id": post.id, "receiver_id": receiver.user.id }),
        )
        .await
        .unwrap();
    let share: ShareResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(
        share.message.content,
        format!("Shared a post: {}", post.title)
    );
    assert_eq!(
        share.message.shared_post_id.as_deref(),
        Some(share.shared_post.id.as_str())
    );

    // The receiver can load the shared record; a third party cannot
    let response = server
        .get_auth(
            &format!("/api/v1/posts/shared/{}", share.shared_post.id),
            &receiver.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let (_, stranger) = register_user(&server).await;
    let response = server
        .get_auth(
            &format!("/api/v1/posts/shared/{}", share.shared_post.id),
            &stranger.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_share_unpublished_post_not_found() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, sharer) = register_user(&server).await;
    let (_, receiver) = register_user(&server).await;

    let response = server
        .post_auth("/api/v1/posts", &sharer.access_token, &CreatePostRequest::unique())
        .await
        .unwrap();
    let post: PostResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    server
        .patch_auth(
            &format!("/api/v1/posts/{}", post.id),
            &sharer.access_token,
            &json!({ "published": false }),
        )
        .await
        .unwrap();

    let response = server
        .post_auth(
            "/api/v1/posts/share",
            &sharer.access_token,
            &json!({ "post_id": post.id, "receiver_id": receiver.user.id }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}
