//! Gateway Integration Tests
//!
//! Exercise the WebSocket adapter end to end: identify, join a post room,
//! submit requests, and observe acknowledgements and room broadcasts.
//!
//! These tests require:
//! - Running PostgreSQL and Redis instances
//! - Environment variables: DATABASE_URL, REDIS_URL, JWT_SECRET, API_PORT, GATEWAY_PORT
//!
//! Run with: cargo test -p integration-tests --test gateway_tests

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use futures_util::{SinkExt, StreamExt};
use integration_tests::{check_test_env, test_config, TestIdentity};
use pulse_common::JwtService;
use pulse_core::traits::{PostRepository, UserRepository};
use pulse_core::{Post, SnowflakeGenerator, User};
use pulse_db::{PgPostRepository, PgUserRepository};
use pulse_gateway::server::{create_app, create_gateway_state};
use serde_json::{json, Value};
use sqlx::PgPool;
use tokio::net::TcpListener;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

type WsStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

/// Spawn a gateway server on an ephemeral port, returning its ws URL
async fn start_gateway() -> Result<String> {
    let config = test_config()?;

    let pool = PgPool::connect(&config.database.url).await?;
    sqlx::migrate!("../../crates/pulse-db/migrations")
        .run(&pool)
        .await?;

    let state = create_gateway_state(config).await.map_err(|e| anyhow::anyhow!("{e}"))?;
    let app = create_app(state);

    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    tokio::time::sleep(Duration::from_millis(100)).await;

    Ok(format!("ws://{addr}/gateway"))
}

/// Seed a user (with token) and a post of theirs straight into the store
async fn seed_user_and_post() -> Result<(TestIdentity, String)> {
    let config = test_config()?;
    let pool = PgPool::connect(&config.database.url).await?;

    let generator = SnowflakeGenerator::new((integration_tests::unique_suffix() % 1000) as u16);
    let users = PgUserRepository::new(pool.clone());
    let posts = PgPostRepository::new(pool);

    let user = User::new(
        generator.generate(),
        format!("gwuser{}", integration_tests::unique_suffix()),
    );
    users
        .create(&user)
        .await
        .map_err(|e| anyhow::anyhow!("seed user: {e}"))?;

    let post = Post::new(generator.generate(), user.id, "gateway test post".to_string());
    posts
        .create(&post)
        .await
        .map_err(|e| anyhow::anyhow!("seed post: {e}"))?;

    let jwt = JwtService::new(&config.jwt.secret, config.jwt.access_token_expiry);
    let token = jwt
        .issue_token(user.id)
        .map_err(|e| anyhow::anyhow!("mint token: {e}"))?;

    Ok((
        TestIdentity {
            user_id: user.id,
            username: user.username,
            token,
        },
        post.id.to_string(),
    ))
}

/// Read frames until one matches the predicate (bounded wait)
async fn read_until(ws: &mut WsStream, mut pred: impl FnMut(&Value) -> bool) -> Result<Value> {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    loop {
        let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
        let msg = tokio::time::timeout(remaining, ws.next())
            .await
            .map_err(|_| anyhow::anyhow!("timed out waiting for frame"))?
            .ok_or_else(|| anyhow::anyhow!("socket closed"))?;

        if let Message::Text(text) = msg? {
            let value: Value = serde_json::from_str(&text)?;
            if pred(&value) {
                return Ok(value);
            }
        }
    }
}

/// Connect, consume Hello, identify, and consume READY
async fn connect_identified(url: &str, token: &str) -> Result<WsStream> {
    let (mut ws, _) = connect_async(url).await?;

    let hello = read_until(&mut ws, |v| v["op"] == 10).await?;
    assert!(hello["d"]["heartbeat_interval"].as_u64().unwrap() > 0);

    ws.send(Message::Text(
        json!({"op": 2, "d": {"token": token}}).to_string(),
    ))
    .await?;

    let ready = read_until(&mut ws, |v| v["op"] == 0 && v["t"] == "READY").await?;
    assert_eq!(ready["d"]["v"], 1);

    Ok(ws)
}

/// Send a Request frame and wait for the Ack with the same nonce
async fn request(ws: &mut WsStream, name: &str, nonce: &str, data: Value) -> Result<Value> {
    ws.send(Message::Text(
        json!({"op": 3, "t": name, "n": nonce, "d": data}).to_string(),
    ))
    .await?;

    read_until(ws, |v| v["op"] == 4 && v["n"] == nonce).await
}

#[tokio::test]
async fn test_identify_and_react_over_socket() {
    if !check_test_env().await {
        return;
    }

    let url = start_gateway().await.unwrap();
    let (identity, post_id) = seed_user_and_post().await.unwrap();
    let mut ws = connect_identified(&url, &identity.token).await.unwrap();

    // Join the post room
    let ack = request(&mut ws, "post:join", "1", json!({"post_id": post_id}))
        .await
        .unwrap();
    assert_eq!(ack["d"]["ok"], true);

    // React: first-time like
    let ack = request(
        &mut ws,
        "reaction:upsert",
        "2",
        json!({"post_id": post_id, "type": "like"}),
    )
    .await
    .unwrap();
    assert_eq!(ack["d"]["ok"], true);
    assert_eq!(ack["d"]["likes_count"], 1);
    assert_eq!(ack["d"]["reactions"]["like"], 1);
    assert_eq!(ack["d"]["my_reaction"], "like");

    // Same kind again: toggle-off
    let ack = request(
        &mut ws,
        "reaction:upsert",
        "3",
        json!({"post_id": post_id, "type": "like"}),
    )
    .await
    .unwrap();
    assert_eq!(ack["d"]["ok"], true);
    assert_eq!(ack["d"]["likes_count"], 0);
    assert_eq!(ack["d"]["my_reaction"], Value::Null);
}

#[tokio::test]
async fn test_invalid_kind_acks_failure_without_closing() {
    if !check_test_env().await {
        return;
    }

    let url = start_gateway().await.unwrap();
    let (identity, post_id) = seed_user_and_post().await.unwrap();
    let mut ws = connect_identified(&url, &identity.token).await.unwrap();

    let ack = request(
        &mut ws,
        "reaction:upsert",
        "1",
        json!({"post_id": post_id, "type": "dislike"}),
    )
    .await
    .unwrap();
    assert_eq!(ack["d"]["ok"], false);
    assert_eq!(ack["d"]["code"], "INVALID_REACTION_KIND");

    // The socket is still usable afterwards
    let ack = request(
        &mut ws,
        "comment:list",
        "2",
        json!({"post_id": post_id}),
    )
    .await
    .unwrap();
    assert_eq!(ack["d"]["ok"], true);
    assert_eq!(ack["d"]["pagination"]["total_count"], 0);
}

#[tokio::test]
async fn test_room_broadcast_excludes_the_actor() {
    if !check_test_env().await {
        return;
    }

    let url = start_gateway().await.unwrap();
    let (actor, post_id) = seed_user_and_post().await.unwrap();
    let (viewer, _) = seed_user_and_post().await.unwrap();

    let mut actor_ws = connect_identified(&url, &actor.token).await.unwrap();
    let mut viewer_ws = connect_identified(&url, &viewer.token).await.unwrap();

    request(&mut actor_ws, "post:join", "1", json!({"post_id": post_id}))
        .await
        .unwrap();
    request(&mut viewer_ws, "post:join", "1", json!({"post_id": post_id}))
        .await
        .unwrap();

    // Actor reacts; the ack carries their result
    let ack = request(
        &mut actor_ws,
        "reaction:upsert",
        "2",
        json!({"post_id": post_id, "type": "love"}),
    )
    .await
    .unwrap();
    assert_eq!(ack["d"]["ok"], true);

    // The viewer hears about it on the room channel
    let update = read_until(&mut viewer_ws, |v| {
        v["op"] == 0 && v["t"] == "REACTION_UPDATE"
    })
    .await
    .unwrap();
    assert_eq!(update["d"]["post_id"], post_id);
    assert_eq!(update["d"]["likes_count"], 1);
    assert_eq!(update["d"]["reactions"]["love"], 1);

    // Comment create reaches the viewer too
    let ack = request(
        &mut actor_ws,
        "comment:create",
        "3",
        json!({"post_id": post_id, "content": "hello room"}),
    )
    .await
    .unwrap();
    assert_eq!(ack["d"]["ok"], true);
    assert_eq!(ack["d"]["comments_count"], 1);

    let created = read_until(&mut viewer_ws, |v| v["op"] == 0 && v["t"] == "COMMENT_CREATE")
        .await
        .unwrap();
    assert_eq!(created["d"]["comments_count"], 1);
    assert_eq!(created["d"]["comment"]["content"], "hello room");
}
