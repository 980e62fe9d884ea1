// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile, favorites, activity and stats API tests.

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use quotes_api::models::ActivityType;
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

mod common;

#[tokio::test]
async fn test_me_hides_sensitive_fields() {
    let (app, state) = common::create_test_app();
    let user = common::seed_user(&state, "me@example.com");
    let token = common::create_test_jwt(user.id, &state.config);

    let response = app
        .oneshot(common::get("/api/users/me", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["email"], "me@example.com");
    assert_eq!(body["displayName"], "Test User");
    assert!(body.get("password").is_none());
    assert!(body.get("__v").is_none());
}

#[tokio::test]
async fn test_update_profile() {
    let (app, state) = common::create_test_app();
    let user = common::seed_user(&state, "me@example.com");
    let token = common::create_test_jwt(user.id, &state.config);

    let response = app
        .clone()
        .oneshot(common::send_json(
            "PUT",
            "/api/users/me",
            Some(&token),
            json!({ "displayName": "New Name", "location": "Lisbon" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["displayName"], "New Name");
    assert_eq!(body["location"], "Lisbon");
    assert_eq!(body["bio"], "Here for the quotes");
    assert!(body.get("password").is_none());

    let response = app
        .oneshot(common::send_json(
            "PUT",
            "/api/users/me",
            Some(&token),
            json!({ "displayName": "" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(response).await;
    assert_eq!(body["message"], "Validation Error");
    assert_eq!(body["errors"][0]["field"], "displayName");
    assert_eq!(state.db.get_user(user.id).unwrap().display_name, "New Name");
}

#[tokio::test]
async fn test_blank_display_name_rejected() {
    let (app, state) = common::create_test_app();
    let user = common::seed_user(&state, "me@example.com");
    let token = common::create_test_jwt(user.id, &state.config);

    let response = app
        .oneshot(common::send_json(
            "PUT",
            "/api/users/me",
            Some(&token),
            json!({ "displayName": "   " }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(response).await;
    assert_eq!(body["errors"][0]["field"], "displayName");
    assert_eq!(state.db.get_user(user.id).unwrap().display_name, "Test User");
}

#[tokio::test]
async fn test_favorites_flow() {
    let (app, state) = common::create_test_app();
    let user = common::seed_user(&state, "fan@example.com");
    let token = common::create_test_jwt(user.id, &state.config);
    let first = common::seed_quote(&state, "First", "Anon", &[]);
    let second = common::seed_quote(&state, "Second", "Anon", &[]);

    let uri = format!("/api/users/favorites/{}", first.id);
    let response = app
        .clone()
        .oneshot(common::send_empty("POST", &uri, Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["isFavorite"], true);
    assert_eq!(body["changed"], true);
    assert_eq!(body["favoritesCount"], 1);

    // Adding again changes nothing
    let response = app
        .clone()
        .oneshot(common::send_empty("POST", &uri, Some(&token)))
        .await
        .unwrap();
    let body = common::body_json(response).await;
    assert_eq!(body["changed"], false);
    assert_eq!(body["favoritesCount"], 1);

    app.clone()
        .oneshot(common::send_empty(
            "POST",
            &format!("/api/users/favorites/{}", second.id),
            Some(&token),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(common::get("/api/users/favorites", Some(&token)))
        .await
        .unwrap();
    let body = common::body_json(response).await;
    assert_eq!(body["pagination"]["total"], 2);
    assert_eq!(body["items"][0]["text"], "Second");
    assert_eq!(body["items"][1]["text"], "First");

    // Only the two real additions were logged
    let activities = state.db.activities_for_user(user.id);
    assert_eq!(activities.len(), 2);
    assert!(activities.iter().all(|a| a.kind == ActivityType::Favorite));

    let response = app
        .oneshot(common::send_empty("DELETE", &uri, Some(&token)))
        .await
        .unwrap();
    let body = common::body_json(response).await;
    assert_eq!(body["isFavorite"], false);
    assert_eq!(body["changed"], true);
    assert_eq!(body["favoritesCount"], 1);
}

#[tokio::test]
async fn test_favorite_unknown_quote() {
    let (app, state) = common::create_test_app();
    let user = common::seed_user(&state, "fan@example.com");
    let token = common::create_test_jwt(user.id, &state.config);

    let response = app
        .oneshot(common::send_empty(
            "POST",
            &format!("/api/users/favorites/{}", Uuid::new_v4()),
            Some(&token),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleted_quote_leaves_favorites() {
    let (app, state) = common::create_test_app();
    let user = common::seed_user(&state, "fan@example.com");
    let token = common::create_test_jwt(user.id, &state.config);
    let quote = common::seed_quote(&state, "Short lived", "Anon", &[]);
    state.db.add_favorite(user.id, quote.id).unwrap();

    let response = app
        .clone()
        .oneshot(common::send_empty(
            "DELETE",
            &format!("/api/quotes/{}", quote.id),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(common::get("/api/users/favorites", Some(&token)))
        .await
        .unwrap();
    let body = common::body_json(response).await;
    assert_eq!(body["pagination"]["total"], 0);
}

#[tokio::test]
async fn test_record_activity_validation() {
    let (app, state) = common::create_test_app();
    let user = common::seed_user(&state, "reader@example.com");
    let token = common::create_test_jwt(user.id, &state.config);

    let response = app
        .oneshot(common::send_json(
            "POST",
            "/api/users/activity",
            Some(&token),
            json!({ "type": "like", "quoteId": "nope" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(response).await;
    assert_eq!(body["message"], "Validation Error");
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["type", "quoteId"]);
}

#[tokio::test]
async fn test_record_and_filter_activity() {
    let (app, state) = common::create_test_app();
    let user = common::seed_user(&state, "reader@example.com");
    let token = common::create_test_jwt(user.id, &state.config);
    let quote = common::seed_quote(&state, "Read me", "Anon", &[]);

    for kind in ["view", "share", "view"] {
        let response = app
            .clone()
            .oneshot(common::send_json(
                "POST",
                "/api/users/activity",
                Some(&token),
                json!({ "type": kind, "quoteId": quote.id }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .oneshot(common::get("/api/users/activity?type=view", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["pagination"]["total"], 2);
    assert!(body["items"]
        .as_array()
        .unwrap()
        .iter()
        .all(|a| a["type"] == "view" && a["quoteId"] == quote.id.to_string()));
}

#[tokio::test]
async fn test_stats_streak_over_three_days() {
    let (app, state) = common::create_test_app();
    let user = common::seed_user(&state, "streak@example.com");
    let token = common::create_test_jwt(user.id, &state.config);
    let quote = common::seed_quote(&state, "Daily", "Anon", &[]);

    let now = Utc::now();
    for days_ago in [0, 1, 2] {
        state
            .db
            .record_activity(
                user.id,
                ActivityType::View,
                quote.id,
                now - Duration::days(days_ago),
            )
            .unwrap();
    }

    let response = app
        .oneshot(common::get("/api/users/stats", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["totalActivities"], 3);
    assert_eq!(body["views"], 3);
    assert_eq!(body["activeDays"], 3);
    assert_eq!(body["streak"]["currentStreak"], 3);
    assert_eq!(body["streak"]["longestStreak"], 3);
    assert_eq!(
        body["streak"]["lastActiveDate"],
        now.date_naive().format("%Y-%m-%d").to_string()
    );
}

#[tokio::test]
async fn test_stats_same_day_counts_once() {
    let (app, state) = common::create_test_app();
    let user = common::seed_user(&state, "streak@example.com");
    let token = common::create_test_jwt(user.id, &state.config);
    let quote = common::seed_quote(&state, "Daily", "Anon", &[]);

    let now = Utc::now();
    for (kind, days_ago) in [
        (ActivityType::View, 0),
        (ActivityType::Share, 0),
        (ActivityType::View, 1),
    ] {
        state
            .db
            .record_activity(user.id, kind, quote.id, now - Duration::days(days_ago))
            .unwrap();
    }

    let response = app
        .oneshot(common::get("/api/users/stats", Some(&token)))
        .await
        .unwrap();

    let body = common::body_json(response).await;
    assert_eq!(body["totalActivities"], 3);
    assert_eq!(body["shares"], 1);
    assert_eq!(body["activeDays"], 2);
    assert_eq!(body["streak"]["currentStreak"], 2);
}

#[tokio::test]
async fn test_stats_without_activity() {
    let (app, state) = common::create_test_app();
    let user = common::seed_user(&state, "idle@example.com");
    let token = common::create_test_jwt(user.id, &state.config);

    let response = app
        .oneshot(common::get("/api/users/stats", Some(&token)))
        .await
        .unwrap();

    let body = common::body_json(response).await;
    assert_eq!(
        body["streak"],
        json!({ "currentStreak": 0, "longestStreak": 0, "lastActiveDate": null })
    );
    assert_eq!(body["favoritesCount"], 0);
}
