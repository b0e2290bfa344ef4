//! Test harness: the full router over an in-memory store

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use bistro_server::{Config, MemoryStore, ServerState, api, auth::hash_password};
use bistro_server::store::{SettingsStore, UserStore};
use serde_json::Value;
use shared::models::StaffRole;
use tower::ServiceExt;

pub struct TestApp {
    pub state: ServerState,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = ServerState::new(Config::default(), store.clone());
        Self { state, store }
    }

    pub async fn with_capacity(capacity: i64) -> Self {
        let app = Self::new();
        app.store
            .upsert_setting("max_capacity", &capacity.to_string())
            .await
            .unwrap();
        app
    }

    pub fn router(&self) -> Router {
        api::build_router(self.state.clone())
    }

    /// Create a staff account and return a bearer token for it
    pub async fn token(&self, role: StaffRole) -> String {
        let email = format!("{}@bistro.test", role.as_str());
        let user = match self.store.find_user_by_email(&email).await.unwrap() {
            Some(user) => user,
            None => {
                let hash = hash_password("s3cret-pass").unwrap();
                self.store.insert_user(&email, role, &hash).await.unwrap()
            }
        };
        self.state.get_jwt_service().generate_token(&user).unwrap()
    }

    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send("GET", uri, None, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send("POST", uri, Some(body), None).await
    }
}

pub fn reservation_form(date: &str, time: &str, guests: i32) -> Value {
    serde_json::json!({
        "name": "Amina Benali",
        "phone": "+212600000000",
        "email": "amina@example.com",
        "date": date,
        "time": time,
        "guests": guests,
        "notes": "window table"
    })
}
