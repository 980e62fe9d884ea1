// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers.

pub mod quotes;
pub mod users;

use crate::error::{AppError, Result};
use crate::filters::{parse_filters, FilterSet};
use crate::middleware::auth::require_auth;
use crate::pagination::PageRequest;
use crate::AppState;
use axum::http::{header, Method};
use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use uuid::Uuid;

/// Largest page size a client may request.
pub const MAX_LIMIT: usize = 100;

/// Query keys that control paging rather than filtering.
const PAGING_PARAMS: [&str; 2] = ["page", "limit"];

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HealthResponse {
    pub status: String,
    pub build_id: String,
}

/// Health check response
async fn health_check() -> Json<HealthResponse> {
    let build_id = option_env!("BUILD_ID").unwrap_or("unknown").to_string();
    Json(HealthResponse {
        status: "ok".to_string(),
        build_id,
    })
}

/// Paging and filters split out of a list endpoint's query string.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub page: PageRequest,
    pub filters: FilterSet,
}

impl ListQuery {
    pub fn from_params(params: Vec<(String, String)>) -> Self {
        let lookup = |name: &str| {
            params
                .iter()
                .rev()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str())
        };
        let page = PageRequest::from_raw(lookup("page"), lookup("limit")).capped(MAX_LIMIT);

        let filters = parse_filters(
            params
                .iter()
                .filter(|(key, _)| !PAGING_PARAMS.contains(&key.as_str()))
                .map(|(key, value)| (key.as_str(), value.as_str())),
        );

        Self { page, filters }
    }
}

/// Parse a path ID, naming the resource in the error.
pub(crate) fn parse_id(raw: &str, resource: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| AppError::BadRequest(format!("Invalid {} ID: {}", resource, raw)))
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS layer - allow requests from frontend URL and localhost (for dev)
    let frontend_url = state.config.frontend_url.clone();
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::AllowOrigin::predicate(
            move |origin: &axum::http::HeaderValue, _request_parts: &axum::http::request::Parts| {
                let origin_str = origin.to_str().unwrap_or("");
                origin_str == frontend_url
                    || origin_str.starts_with("http://localhost")
                    || origin_str.starts_with("http://127.0.0.1")
            },
        ))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT]);

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .merge(quotes::routes());

    // Protected routes (auth required)
    let protected_routes = quotes::protected_routes()
        .merge(users::routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::FilterValue;

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_list_query_separates_paging_from_filters() {
        let query = ListQuery::from_params(params(&[
            ("page", "2"),
            ("limit", "5"),
            ("author", "Seneca"),
        ]));

        assert_eq!(query.page, PageRequest { page: 2, limit: 5 });
        assert_eq!(query.filters.len(), 1);
        assert_eq!(
            query.filters.get("author"),
            Some(&FilterValue::Text("Seneca".to_string()))
        );
    }

    #[test]
    fn test_list_query_caps_limit() {
        let query = ListQuery::from_params(params(&[("limit", "5000")]));
        assert_eq!(query.page.limit, MAX_LIMIT);
        assert_eq!(query.page.page, 1);
    }

    #[test]
    fn test_parse_id_rejects_garbage() {
        assert!(matches!(
            parse_id("123", "quote"),
            Err(AppError::BadRequest(_))
        ));
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string(), "quote").unwrap(), id);
    }
}
