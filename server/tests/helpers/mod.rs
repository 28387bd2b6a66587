//! Reusable test helpers for HTTP integration tests.
//!
//! Provides `TestApp` for sending requests through the full axum router with
//! an in-memory caller store, plus utilities for callers and access tokens.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{self, header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use uuid::Uuid;
use warden_server::api::{create_router, AppState};
use warden_server::auth::jwt;
use warden_server::config::Config;
use warden_server::db::MemoryCallerStore;
use warden_server::permissions::{Caller, Permission, Role, RoleTableHandle};

/// Router plus the state behind it.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: MemoryCallerStore,
}

impl TestApp {
    /// App with the built-in role table and test configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default_for_test())
    }

    pub fn with_config(config: Config) -> Self {
        let store = MemoryCallerStore::new();
        let state = AppState::new(Arc::new(store.clone()), RoleTableHandle::default(), config);
        Self {
            router: create_router(state.clone()),
            state,
            store,
        }
    }

    /// Register a caller with `role` and return it.
    pub fn add_caller(&self, role: Role) -> Caller {
        self.add_caller_with(role, None)
    }

    /// Register a caller carrying explicit grants.
    pub fn add_caller_with(&self, role: Role, explicit: Option<&[Permission]>) -> Caller {
        let id = Uuid::now_v7();
        let caller = Caller {
            id,
            email: format!("{}-{}@example.com", role, &id.to_string()[..8]),
            role,
            explicit_permissions: explicit.map(|perms| perms.iter().copied().collect()),
        };
        self.store.insert(caller.clone());
        caller
    }

    /// Build a request builder.
    pub fn request(method: Method, uri: &str) -> http::request::Builder {
        Request::builder().method(method).uri(uri)
    }

    /// Build a request carrying a bearer token for `user_id`.
    pub fn authed(method: Method, uri: &str, user_id: Uuid) -> Request<Body> {
        Self::request(method, uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", token_for(user_id)))
            .body(Body::empty())
            .unwrap()
    }

    /// Build a request with no credentials.
    pub fn anonymous(method: Method, uri: &str) -> Request<Body> {
        Self::request(method, uri).body(Body::empty()).unwrap()
    }

    /// Send a request through the router via `tower::ServiceExt::oneshot`.
    pub async fn oneshot(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("oneshot request failed")
    }
}

/// Mint a valid access token for `user_id` with the test key pair.
pub fn token_for(user_id: Uuid) -> String {
    jwt::generate_access_token(user_id, jwt::TEST_PRIVATE_KEY, 900)
        .expect("Failed to generate test token")
}

/// Collect a response body and parse it as JSON.
pub async fn body_to_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to collect response body")
        .to_bytes();
    serde_json::from_slice(&bytes).unwrap_or_else(|e| {
        let preview = String::from_utf8_lossy(&bytes);
        panic!("Failed to parse response as JSON: {e}\nBody: {preview}")
    })
}
