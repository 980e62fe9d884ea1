// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, Response};
use quotes_api::config::Config;
use quotes_api::db::MemoryDb;
use quotes_api::middleware::auth::create_jwt;
use quotes_api::models::{NewQuote, NewUser, Quote, User};
use quotes_api::routes::create_router;
use quotes_api::AppState;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

/// Create a test app with an empty in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState {
        config: Config::test_default(),
        db: MemoryDb::new(),
    });

    (create_router(state.clone()), state)
}

/// Create a session token for a user, signed with the test secret.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: Uuid, config: &Config) -> String {
    create_jwt(user_id, config).expect("Failed to sign test JWT")
}

#[allow(dead_code)]
pub fn seed_user(state: &AppState, email: &str) -> User {
    state
        .db
        .insert_user(NewUser {
            email: email.to_string(),
            password_hash: "$argon2id$v=19$test".to_string(),
            display_name: "Test User".to_string(),
            bio: Some("Here for the quotes".to_string()),
            location: None,
            favorite_categories: vec!["wisdom".to_string()],
        })
        .expect("Failed to seed user")
}

#[allow(dead_code)]
pub fn seed_quote(state: &AppState, text: &str, author: &str, tags: &[&str]) -> Quote {
    state
        .db
        .insert_quote(NewQuote {
            text: text.to_string(),
            author: author.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        })
        .expect("Failed to seed quote")
}

#[allow(dead_code)]
pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

#[allow(dead_code)]
pub fn send_json(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

#[allow(dead_code)]
pub fn send_empty(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}
