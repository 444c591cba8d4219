use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use roomgate::api::create_router;
use roomgate::{AppState, Config};

fn app() -> Router {
    create_router(AppState::in_memory(Config::default()))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn register(app: &Router, user: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/register",
        None,
        Some(json!({ "type": "m.login.password", "user": user, "password": "secret" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["user_id"], format!("@{user}:localhost"));
    body["access_token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_register_flows_and_login() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api/v1/register", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "flows": [{ "type": "m.login.password" }] }));

    register(&app, "alice").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/login",
        None,
        Some(json!({ "type": "m.login.password", "user": "alice", "password": "secret" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], "@alice:localhost");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/login",
        None,
        Some(json!({ "type": "m.login.password", "user": "@alice:localhost", "password": "nope" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_register_rejects_bad_input() {
    let app = app();
    register(&app, "alice").await;

    for body in [
        json!({ "type": "m.login.password", "user": "", "password": "secret" }),
        json!({ "type": "m.login.password", "user": "bob", "password": "" }),
        json!({ "type": "m.login.email.identity", "user": "bob", "password": "secret" }),
        json!({ "type": "m.login.password", "user": "bob" }),
        json!({ "type": "m.login.password", "user": "alice", "password": "secret" }),
    ] {
        let (status, _) = send(&app, Method::POST, "/api/v1/register", None, Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_missing_and_unknown_tokens_look_identical() {
    let app = app();

    let missing = send(&app, Method::GET, "/api/v1/me/rooms", None, None).await;
    let garbage = send(&app, Method::GET, "/api/v1/me/rooms", Some("garbage"), None).await;
    let bad_base64 = send(
        &app,
        Method::GET,
        "/api/v1/me/rooms",
        Some("not-base64!!..nonce"),
        None,
    )
    .await;

    assert_eq!(missing.0, StatusCode::UNAUTHORIZED);
    assert_eq!(missing, garbage);
    assert_eq!(missing, bad_base64);
}

#[tokio::test]
async fn test_token_in_query_string() {
    let app = app();
    let token = register(&app, "alice").await;

    let uri = format!("/api/v1/me/rooms?access_token={token}");
    let (status, body) = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "rooms": [] }));
}

#[tokio::test]
async fn test_room_membership_flow() {
    let app = app();
    let alice = register(&app, "alice").await;
    let bob = register(&app, "bob").await;

    let (status, body) = send(&app, Method::POST, "/api/v1/rooms", Some(alice.as_str()), None).await;
    assert_eq!(status, StatusCode::OK);
    let room = body["room_id"].as_str().unwrap().to_string();
    assert!(room.starts_with('!') && room.ends_with(":localhost"));

    // Bob cannot see members before joining.
    let members_uri = format!("/api/v1/rooms/{room}/members");
    let (status, _) = send(&app, Method::GET, &members_uri, Some(bob.as_str()), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let join_uri = format!("/api/v1/rooms/{room}/join");
    let (status, _) = send(&app, Method::POST, &join_uri, Some(bob.as_str()), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::POST, &join_uri, Some(bob.as_str()), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(&app, Method::GET, "/api/v1/me/peers", Some(alice.as_str()), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "peers": ["@alice:localhost", "@bob:localhost"] })
    );

    let (status, body) = send(&app, Method::GET, &members_uri, Some(bob.as_str()), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["members"].as_array().unwrap().len(), 2);

    let leave_uri = format!("/api/v1/rooms/{room}/leave");
    let (status, _) = send(&app, Method::POST, &leave_uri, Some(bob.as_str()), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::POST, &leave_uri, Some(bob.as_str()), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, body) = send(&app, Method::GET, "/api/v1/me/peers", Some(bob.as_str()), None).await;
    assert_eq!(body, json!({ "peers": [] }));
}

#[tokio::test]
async fn test_join_rejects_invalid_room_id() {
    let app = app();
    let alice = register(&app, "alice").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/rooms/not-a-room/join",
        Some(alice.as_str()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_profile_flow() {
    let app = app();
    let alice = register(&app, "alice").await;
    let bob = register(&app, "bob").await;

    let uri = "/api/v1/profile/@alice:localhost/displayname";
    let (status, body) = send(&app, Method::GET, uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "displayname": "alice" }));

    let (status, _) = send(
        &app,
        Method::PUT,
        uri,
        Some(alice.as_str()),
        Some(json!({ "displayname": "Alice" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        Method::PUT,
        uri,
        Some(bob.as_str()),
        Some(json!({ "displayname": "Mallory" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, Method::PUT, uri, Some(alice.as_str()), Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, Method::GET, uri, None, None).await;
    assert_eq!(body, json!({ "displayname": "Alice" }));

    let avatar = "/api/v1/profile/@alice:localhost/avatar_url";
    let (_, body) = send(&app, Method::GET, avatar, None, None).await;
    assert_eq!(body, json!({ "avatar_url": null }));

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/v1/profile/@ghost:localhost/displayname",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
