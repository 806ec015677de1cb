//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Running Redis instance
//! - Environment variables: DATABASE_URL, REDIS_URL, JWT_SECRET, API_PORT, GATEWAY_PORT
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{assert_json, assert_status, check_test_env, fixtures::*, TestServer};
use reqwest::StatusCode;

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
// Auth boundary
// ============================================================================

#[tokio::test]
async fn test_reaction_requires_auth() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let response = server
        .post("/api/v1/reactions/123", &ReactionBody::new("like"))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Posts
// ============================================================================

#[tokio::test]
async fn test_create_and_fetch_post() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let identity = server.seed_identity().await.unwrap();

    let body = CreatePostBody::unique();
    let response = server
        .post_auth("/api/v1/posts", &identity.token, &body)
        .await
        .unwrap();
    let created: PostEnvelope = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(created.status, "success");
    assert_eq!(created.post.content, body.content);
    assert_eq!(created.post.likes_count, 0);
    assert_eq!(created.post.comments_count, 0);
    assert_eq!(created.post.reactions.total(), 0);

    let response = server
        .get_auth(&format!("/api/v1/posts/{}", created.post.id), &identity.token)
        .await
        .unwrap();
    let fetched: PostEnvelope = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.post.id, created.post.id);
    assert_eq!(fetched.post.author_id, identity.user_id.to_string());
}

// ============================================================================
// Reactions
// ============================================================================

/// Seed a user and a post, returning (identity, post_id)
async fn seed_post(server: &TestServer) -> (integration_tests::TestIdentity, String) {
    let identity = server.seed_identity().await.unwrap();
    let response = server
        .post_auth("/api/v1/posts", &identity.token, &CreatePostBody::unique())
        .await
        .unwrap();
    let created: PostEnvelope = assert_json(response, StatusCode::CREATED).await.unwrap();
    (identity, created.post.id)
}

#[tokio::test]
async fn test_reaction_toggle_lifecycle_over_http() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let (identity, post_id) = seed_post(&server).await;
    let path = format!("/api/v1/reactions/{post_id}");

    // First reaction: like
    let response = server
        .post_auth(&path, &identity.token, &ReactionBody::new("like"))
        .await
        .unwrap();
    let result: ReactionEnvelope = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(result.status, "success");
    assert_eq!(result.reactions.like, 1);
    assert_eq!(result.likes_count, 1);
    assert_eq!(result.my_reaction.as_deref(), Some("like"));

    // Switch kind: love moves the unit, total untouched
    let response = server
        .post_auth(&path, &identity.token, &ReactionBody::new("love"))
        .await
        .unwrap();
    let result: ReactionEnvelope = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(result.reactions.like, 0);
    assert_eq!(result.reactions.love, 1);
    assert_eq!(result.likes_count, 1);
    assert_eq!(result.my_reaction.as_deref(), Some("love"));

    // Same kind again: toggle-off
    let response = server
        .post_auth(&path, &identity.token, &ReactionBody::new("love"))
        .await
        .unwrap();
    let result: ReactionEnvelope = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(result.reactions.love, 0);
    assert_eq!(result.likes_count, 0);
    assert_eq!(result.my_reaction, None);
}

#[tokio::test]
async fn test_reaction_invalid_kind_is_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let (identity, post_id) = seed_post(&server).await;

    let response = server
        .post_auth(
            &format!("/api/v1/reactions/{post_id}"),
            &identity.token,
            &ReactionBody::new("dislike"),
        )
        .await
        .unwrap();
    let failure: FailureEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(failure.status, "failure");
    assert_eq!(failure.error.code, "INVALID_REACTION_KIND");
}

#[tokio::test]
async fn test_reaction_on_missing_post_is_not_found() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let identity = server.seed_identity().await.unwrap();

    let response = server
        .post_auth(
            "/api/v1/reactions/999999999999",
            &identity.token,
            &ReactionBody::new("like"),
        )
        .await
        .unwrap();
    let failure: FailureEnvelope = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(failure.status, "failure");
}

#[tokio::test]
async fn test_remove_reaction_is_noop_without_fact() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let (identity, post_id) = seed_post(&server).await;

    let response = server
        .delete_auth(&format!("/api/v1/reactions/{post_id}"), &identity.token)
        .await
        .unwrap();
    let result: ReactionEnvelope = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(result.status, "success");
    assert_eq!(result.likes_count, 0);
    assert_eq!(result.my_reaction, None);
}

#[tokio::test]
async fn test_reactions_from_two_users_accumulate() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let (author, post_id) = seed_post(&server).await;
    let other = server.seed_identity().await.unwrap();
    let path = format!("/api/v1/reactions/{post_id}");

    server
        .post_auth(&path, &author.token, &ReactionBody::new("like"))
        .await
        .unwrap();
    let response = server
        .post_auth(&path, &other.token, &ReactionBody::new("wow"))
        .await
        .unwrap();
    let result: ReactionEnvelope = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(result.reactions.like, 1);
    assert_eq!(result.reactions.wow, 1);
    assert_eq!(result.likes_count, 2);
}

// ============================================================================
// Comments
// ============================================================================

#[tokio::test]
async fn test_comment_create_list_delete_flow() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let (identity, post_id) = seed_post(&server).await;

    // Create
    let body = CreateCommentBody::unique();
    let response = server
        .post_auth(&format!("/api/v1/comments/{post_id}"), &identity.token, &body)
        .await
        .unwrap();
    let created: CommentCreatedEnvelope =
        assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(created.status, "success");
    assert_eq!(created.comments_count, 1);
    assert_eq!(created.comment.content, body.content);
    assert_eq!(created.comment.author.id, identity.user_id.to_string());
    assert_eq!(created.comment.author.username, identity.username);

    // List
    let response = server
        .get_auth(&format!("/api/v1/comments/{post_id}"), &identity.token)
        .await
        .unwrap();
    let listing: CommentListEnvelope = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(listing.comments.len(), 1);
    assert_eq!(listing.pagination.total_count, 1);
    assert!(!listing.pagination.has_next);

    // Delete
    let response = server
        .delete_auth(
            &format!("/api/v1/comments/{}", created.comment.id),
            &identity.token,
        )
        .await
        .unwrap();
    let deleted: CommentDeletedEnvelope = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(deleted.comments_count, 0);
    assert_eq!(deleted.post_id, post_id);
}

#[tokio::test]
async fn test_comment_delete_by_non_author_is_not_found() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let (author, post_id) = seed_post(&server).await;
    let intruder = server.seed_identity().await.unwrap();

    let response = server
        .post_auth(
            &format!("/api/v1/comments/{post_id}"),
            &author.token,
            &CreateCommentBody::unique(),
        )
        .await
        .unwrap();
    let created: CommentCreatedEnvelope =
        assert_json(response, StatusCode::CREATED).await.unwrap();

    // Non-author delete: definite 404, count untouched
    let response = server
        .delete_auth(
            &format!("/api/v1/comments/{}", created.comment.id),
            &intruder.token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .get_auth(&format!("/api/v1/comments/{post_id}"), &author.token)
        .await
        .unwrap();
    let listing: CommentListEnvelope = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(listing.pagination.total_count, 1);
}

#[tokio::test]
async fn test_comment_empty_content_is_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let (identity, post_id) = seed_post(&server).await;

    let body = serde_json::json!({"content": "   "});
    let response = server
        .post_auth(&format!("/api/v1/comments/{post_id}"), &identity.token, &body)
        .await
        .unwrap();
    let failure: FailureEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(failure.status, "failure");
}

#[tokio::test]
async fn test_threaded_reply_roundtrip() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let (identity, post_id) = seed_post(&server).await;

    let response = server
        .post_auth(
            &format!("/api/v1/comments/{post_id}"),
            &identity.token,
            &CreateCommentBody::unique(),
        )
        .await
        .unwrap();
    let parent: CommentCreatedEnvelope = assert_json(response, StatusCode::CREATED).await.unwrap();

    let reply = CreateCommentBody {
        parent_id: Some(parent.comment.id.clone()),
        ..CreateCommentBody::unique()
    };
    let response = server
        .post_auth(&format!("/api/v1/comments/{post_id}"), &identity.token, &reply)
        .await
        .unwrap();
    let created: CommentCreatedEnvelope =
        assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(created.comment.parent_id.as_deref(), Some(parent.comment.id.as_str()));
    assert_eq!(created.comments_count, 2);
}
