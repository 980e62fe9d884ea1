// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Routes for the authenticated user's profile, favorites and activity.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{
    Activity, ActivityType, Quote, RecordActivityInput, UpdateProfileInput, User, UserStats,
};
use crate::pagination::{paginate, Paginated};
use crate::routes::{parse_id, ListQuery};
use crate::sanitize::sanitize_user;
use crate::time_utils::utc_today;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::WithRejection;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use uuid::Uuid;
use validator::Validate;

/// User routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/users/me", get(get_me).put(update_me))
        .route("/api/users/favorites", get(list_favorites))
        .route(
            "/api/users/favorites/{quote_id}",
            post(add_favorite).delete(remove_favorite),
        )
        .route("/api/users/activity", get(list_activity).post(record_activity))
        .route("/api/users/stats", get(get_stats))
}

fn load_user(state: &AppState, user_id: Uuid) -> Result<User> {
    state
        .db
        .get_user(user_id)
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))
}

/// Client-safe view of a stored user.
fn public_profile(user: &User) -> Result<Json<Map<String, Value>>> {
    let record = user
        .to_record()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("User encoding failed: {}", e)))?;
    Ok(Json(sanitize_user(&record)))
}

// ─── Profile ─────────────────────────────────────────────────

async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Map<String, Value>>> {
    let profile = load_user(&state, user.user_id)?;
    public_profile(&profile)
}

async fn update_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Json(input), _): WithRejection<Json<UpdateProfileInput>, AppError>,
) -> Result<Json<Map<String, Value>>> {
    let input = input.normalized();
    input.validate()?;

    let updated = state.db.update_user(user.user_id, |u| input.apply(u))?;
    tracing::info!(user_id = %user.user_id, version = updated.version, "Profile updated");

    public_profile(&updated)
}

// ─── Favorites ───────────────────────────────────────────────

async fn list_favorites(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Paginated<Quote>>> {
    let ListQuery { page, .. } = ListQuery::from_params(params);
    let favorites = state.db.favorite_quotes(user.user_id)?;
    Ok(Json(paginate(favorites, page)))
}

/// Result of adding or removing a favorite.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FavoriteResponse {
    pub quote_id: Uuid,
    pub is_favorite: bool,
    /// Whether this request changed anything
    pub changed: bool,
    pub favorites_count: usize,
}

/// Add a quote to favorites. Repeating the call is a no-op.
async fn add_favorite(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(quote_id): Path<String>,
) -> Result<Json<FavoriteResponse>> {
    let quote_id = parse_id(&quote_id, "quote")?;
    let added = state.db.add_favorite(user.user_id, quote_id)?;

    if added {
        state.db.record_activity(
            user.user_id,
            ActivityType::Favorite,
            quote_id,
            chrono::Utc::now(),
        )?;
    }

    let favorites_count = load_user(&state, user.user_id)?.favorites.len();
    Ok(Json(FavoriteResponse {
        quote_id,
        is_favorite: true,
        changed: added,
        favorites_count,
    }))
}

async fn remove_favorite(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(quote_id): Path<String>,
) -> Result<Json<FavoriteResponse>> {
    let quote_id = parse_id(&quote_id, "quote")?;
    let removed = state.db.remove_favorite(user.user_id, quote_id)?;

    let favorites_count = load_user(&state, user.user_id)?.favorites.len();
    Ok(Json(FavoriteResponse {
        quote_id,
        is_favorite: false,
        changed: removed,
        favorites_count,
    }))
}

// ─── Activity ────────────────────────────────────────────────

/// The user's activity log, newest first, filtered by the query string.
async fn list_activity(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Paginated<Activity>>> {
    let ListQuery { page, filters } = ListQuery::from_params(params);

    let mut matched = Vec::new();
    for activity in state.db.activities_for_user(user.user_id) {
        let document = serde_json::to_value(&activity)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Activity encoding failed: {}", e)))?;
        if filters.matches(&document) {
            matched.push(activity);
        }
    }

    Ok(Json(paginate(matched, page)))
}

async fn record_activity(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Json(input), _): WithRejection<Json<RecordActivityInput>, AppError>,
) -> Result<(StatusCode, Json<Activity>)> {
    let (kind, quote_id) = input.parse()?;
    let activity = state
        .db
        .record_activity(user.user_id, kind, quote_id, chrono::Utc::now())?;
    Ok((StatusCode::CREATED, Json(activity)))
}

// ─── Stats ───────────────────────────────────────────────────

/// Activity counts and streaks for the current user.
async fn get_stats(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserStats>> {
    let profile = load_user(&state, user.user_id)?;
    let activities = state.db.activities_for_user(user.user_id);

    let stats = UserStats::from_activities(&activities, profile.favorites.len(), utc_today());
    tracing::debug!(
        user_id = %user.user_id,
        total = stats.total_activities,
        current_streak = stats.streak.current_streak,
        "Computed user stats"
    );

    Ok(Json(stats))
}
