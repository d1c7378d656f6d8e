//! RoboHub API Library
//!
//! Robots, the parts installed on them and their maintenance history, served
//! as a JSON API under `/ROBOHUB`.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod extract;
pub mod handlers;
pub mod health;
pub mod middleware_helpers;
pub mod migrator;
pub mod openapi;
pub mod services;
pub mod tracing;

use axum::{
    http::{HeaderName, HeaderValue},
    routing::get,
    Router,
};
use chrono::Utc;
use serde::Serialize;
use std::{sync::Arc, time::Duration};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
};
use utoipa::ToSchema;

use crate::{config::AppConfig, db::DbPool, handlers::AppServices};

/// Base path every route is mounted under
pub const API_BASE_PATH: &str = "/ROBOHUB";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DbPool>,
    pub config: AppConfig,
    pub services: AppServices,
}

impl AppState {
    pub fn new(db: Arc<DbPool>, config: AppConfig) -> Self {
        let services = AppServices::new(db.clone());
        Self {
            db,
            config,
            services,
        }
    }
}

// Common response wrappers
#[derive(Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub meta: ResponseMeta,
}

#[derive(Serialize, ToSchema)]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub timestamp: String,
}

impl ResponseMeta {
    fn capture() -> Self {
        Self {
            request_id: crate::tracing::current_request_id().map(|rid| rid.as_str().to_string()),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            meta: ResponseMeta::capture(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

#[cfg(test)]
mod response_tests {
    use super::*;
    use chrono::DateTime;

    #[tokio::test]
    async fn success_response_includes_request_metadata() {
        let response =
            crate::tracing::scope_request_id(crate::tracing::RequestId::new("meta-123"), async {
                ApiResponse::success("ok")
            })
            .await;

        assert_eq!(response.meta.request_id.as_deref(), Some("meta-123"));
        DateTime::parse_from_rfc3339(&response.meta.timestamp).expect("timestamp should parse");
    }

    #[test]
    fn message_is_omitted_unless_set() {
        let plain = serde_json::to_value(ApiResponse::success(1)).unwrap();
        assert!(plain.get("message").is_none());
        assert!(plain["meta"].get("request_id").is_none());

        let noted = serde_json::to_value(ApiResponse::success(1).with_message("done")).unwrap();
        assert_eq!(noted["message"], "done");
    }
}

/// Standard API result type for JSON responses
pub type ApiResult<T> = Result<axum::Json<ApiResponse<T>>, errors::ServiceError>;

/// Routes relative to [`API_BASE_PATH`]
pub fn api_routes() -> Router<AppState> {
    use handlers::{maintenance_logs, parts, robots};

    Router::new()
        .route("/health", get(health::health_check))
        .route(
            "/robots",
            get(robots::list_robots).post(robots::create_robot),
        )
        .route(
            "/robots/:robot_id",
            get(robots::get_robot)
                .patch(robots::update_robot)
                .delete(robots::delete_robot),
        )
        .route(
            "/robots/:robot_id/parts",
            get(parts::list_parts).post(parts::create_part),
        )
        .route(
            "/robots/:robot_id/parts/:id",
            get(parts::get_part)
                .patch(parts::update_part)
                .delete(parts::delete_part),
        )
        .route(
            "/robots/:robot_id/maintenance_logs",
            get(maintenance_logs::list_robot_logs).post(maintenance_logs::create_log),
        )
        .route("/maintenance_logs", get(maintenance_logs::list_logs))
        .route("/maintenance_logs/:id", get(maintenance_logs::get_log))
}

/// CORS policy built from the configured origins.
///
/// Methods and headers are mirrored from the preflight request because
/// wildcards are rejected by browsers when credentials are allowed.
pub fn cors_layer(cfg: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = cfg
        .cors_origins()
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                ::tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(cfg.cors_allow_credentials)
        .expose_headers([HeaderName::from_static(
            middleware_helpers::request_id::REQUEST_ID_HEADER,
        )])
}

/// The complete application: API routes, docs and the middleware stack.
pub fn app_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .nest(API_BASE_PATH, api_routes())
        .merge(openapi::swagger_ui())
        // HTTP tracing layer for consistent request/response telemetry
        .layer(crate::tracing::configure_http_tracing())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(cors)
        // Ensure every request carries a request id for traceability
        .layer(axum::middleware::from_fn(
            middleware_helpers::request_id::request_id_middleware,
        ))
        .with_state(state)
}
