#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{Method, Request, StatusCode},
    response::Response,
    Router,
};
use robohub_api::{app_router, config::AppConfig, db, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Helper harness for spinning up the application backed by an in-memory SQLite database.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let mut cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "127.0.0.1".to_string(),
            18_000,
            "test".to_string(),
        );
        // Each SQLite memory connection is a separate database
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let state = AppState::new(Arc::new(pool), cfg);
        let router = app_router(state.clone());

        Self { router, state }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
        self.request_with_headers(method, uri, body, &[]).await
    }

    pub async fn request_with_headers(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// Creates a robot and returns its id
    pub async fn create_robot(&self, name: &str, robot_type: &str) -> i64 {
        let response = self
            .request(
                Method::POST,
                "/ROBOHUB/robots",
                Some(json!({"name": name, "type": robot_type})),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        response_json(response).await["data"]["id"]
            .as_i64()
            .expect("robot id")
    }

    /// Creates a part under a robot and returns its per-robot id
    pub async fn create_part(&self, robot_id: i64, name: &str) -> i64 {
        let response = self
            .request(
                Method::POST,
                &format!("/ROBOHUB/robots/{robot_id}/parts"),
                Some(json!({"name": name})),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        response_json(response).await["data"]["part"]["id"]
            .as_i64()
            .expect("part id")
    }

    /// Records a maintenance log and returns its id
    pub async fn create_log(&self, robot_id: i64, parts_id: Option<i64>, description: &str) -> i64 {
        let response = self
            .request(
                Method::POST,
                &format!("/ROBOHUB/robots/{robot_id}/maintenance_logs"),
                Some(json!({
                    "parts_id": parts_id,
                    "description": description,
                    "done_by": "ann"
                })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        response_json(response).await["data"]["id"]
            .as_i64()
            .expect("log id")
    }
}

pub async fn response_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    serde_json::from_slice(&bytes).expect("json response")
}

pub fn today() -> String {
    chrono::Utc::now().date_naive().to_string()
}
