//! Shared harness for the API integration tests.
//!
//! Builds the real application router (same middleware stack as
//! production via `build_app_router`) on top of a `MemStore`, so the
//! suites run without a database. The store handle is returned alongside
//! the router for seeding and direct assertions.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use uuid::Uuid;

use crewline_api::auth::jwt::{generate_access_token, JwtConfig};
use crewline_api::config::ServerConfig;
use crewline_api::router::build_app_router;
use crewline_api::state::AppState;
use crewline_api::ws::WsManager;
use crewline_core::roles::{ROLE_ADMIN, ROLE_STAFF};
use crewline_core::store::Store;
use crewline_core::types::DbId;
use crewline_db::MemStore;

/// Build a test `ServerConfig` with a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// The application under test plus handles for seeding and token minting.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemStore>,
    pub config: ServerConfig,
}

impl TestApp {
    pub fn store(&self) -> Arc<dyn Store> {
        self.store.clone()
    }

    /// Mint a bearer token for a fresh admin user. Returns the user id and
    /// the token.
    pub fn admin(&self) -> (DbId, String) {
        self.user_with_role(ROLE_ADMIN)
    }

    /// Mint a bearer token for a fresh staff user.
    pub fn staff(&self) -> (DbId, String) {
        self.user_with_role(ROLE_STAFF)
    }

    fn user_with_role(&self, role: &str) -> (DbId, String) {
        let user_id = Uuid::new_v4();
        let token = generate_access_token(user_id, role, &self.config.jwt)
            .expect("token generation should succeed");
        (user_id, token)
    }

    /// Send a request and return the status plus the parsed JSON body
    /// (`Value::Null` for empty bodies).
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(value) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(value.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request should build");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("request should not fail at the transport level");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body should collect")
            .to_bytes();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("body should be JSON")
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, serde_json::Value) {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(
        &self,
        uri: &str,
        token: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        self.request(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn patch(
        &self,
        uri: &str,
        token: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        self.request(Method::PATCH, uri, Some(token), Some(body))
            .await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, serde_json::Value) {
        self.request(Method::DELETE, uri, Some(token), None).await
    }
}

/// Build the application router over a fresh `MemStore`.
pub fn build_test_app() -> TestApp {
    let config = test_config();
    let store = Arc::new(MemStore::new());
    let ws_manager = Arc::new(WsManager::new());

    let state = AppState::new(
        store.clone() as Arc<dyn Store>,
        Arc::new(config.clone()),
        ws_manager,
    );
    let router = build_app_router(state, &config);

    TestApp {
        router,
        store,
        config,
    }
}

/// Seed a published event owned by `admin_id`, bypassing the HTTP surface.
pub async fn seed_event(app: &TestApp, admin_id: DbId) -> DbId {
    use chrono::{Duration, Utc};
    use crewline_core::model::NewEvent;

    let event = app
        .store()
        .create_event(NewEvent {
            title: "Summer Gala".into(),
            venue: "Grand Hall".into(),
            venue_address: None,
            date: Utc::now() + Duration::days(3),
            start_time: "18:00".into(),
            end_time: "23:00".into(),
            description: None,
            uniform_requirements: None,
            special_instructions: None,
            status: "published".into(),
            required_staff: 2,
            created_by: admin_id,
        })
        .await
        .expect("event seed should succeed");
    event.id
}
