// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Quote catalogue routes.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{NewQuote, Quote};
use crate::pagination::{paginate, Paginated};
use crate::routes::{parse_id, ListQuery};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Extension, Json, Router,
};
use axum_extra::extract::WithRejection;
use rand::seq::SliceRandom;
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Read-only routes, open to everyone.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/quotes", get(list_quotes))
        .route("/api/quotes/random", get(random_quote))
        .route("/api/quotes/{id}", get(get_quote))
}

/// Write routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/quotes", post(create_quote))
        .route("/api/quotes/{id}", put(update_quote).delete(delete_quote))
}

// ─── Reads ───────────────────────────────────────────────────

/// List quotes matching the query filters, newest first.
async fn list_quotes(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Paginated<Quote>>> {
    let ListQuery { page, filters } = ListQuery::from_params(params);

    tracing::debug!(
        filters = ?filters,
        page = page.page,
        limit = page.limit,
        "Listing quotes"
    );

    let quotes = state.db.find_quotes(&filters)?;
    Ok(Json(paginate(quotes, page)))
}

/// One random quote among those matching the query filters.
async fn random_quote(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Quote>> {
    let ListQuery { filters, .. } = ListQuery::from_params(params);
    let candidates = state.db.find_quotes(&filters)?;

    let quote = candidates
        .choose(&mut rand::thread_rng())
        .cloned()
        .ok_or_else(|| AppError::NotFound("No quotes match the given filters".to_string()))?;

    Ok(Json(quote))
}

async fn get_quote(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Quote>> {
    let id = parse_id(&id, "quote")?;
    let quote = state
        .db
        .get_quote(id)
        .ok_or_else(|| AppError::NotFound(format!("Quote {} not found", id)))?;
    Ok(Json(quote))
}

// ─── Writes ──────────────────────────────────────────────────

async fn create_quote(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Json(input), _): WithRejection<Json<NewQuote>, AppError>,
) -> Result<(StatusCode, Json<Quote>)> {
    let input = input.normalized();
    input.validate()?;

    let quote = state.db.insert_quote(input)?;
    tracing::info!(user_id = %user.user_id, quote_id = %quote.id, "Quote created");

    Ok((StatusCode::CREATED, Json(quote)))
}

async fn update_quote(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    WithRejection(Json(input), _): WithRejection<Json<NewQuote>, AppError>,
) -> Result<Json<Quote>> {
    let id = parse_id(&id, "quote")?;
    let input = input.normalized();
    input.validate()?;

    let quote = state.db.update_quote(id, input)?;
    tracing::info!(user_id = %user.user_id, quote_id = %id, "Quote updated");

    Ok(Json(quote))
}

/// Response for quote deletion.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DeleteQuoteResponse {
    pub success: bool,
    pub message: String,
}

/// Delete a quote; it also disappears from every user's favorites.
async fn delete_quote(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<DeleteQuoteResponse>> {
    let id = parse_id(&id, "quote")?;
    state.db.delete_quote(id)?;
    tracing::info!(user_id = %user.user_id, quote_id = %id, "Quote deleted");

    Ok(Json(DeleteQuoteResponse {
        success: true,
        message: "Quote deleted".to_string(),
    }))
}
