//! HTTP tests for the permission guards in front of resource routes.

mod helpers;

use axum::body::Body;
use axum::http::{header, Method, StatusCode};
use helpers::{body_to_json, TestApp};
use serde_json::json;
use uuid::Uuid;
use warden_server::auth::jwt;
use warden_server::config::{Config, Environment};
use warden_server::permissions::{Permission, Role, RolePermissionTable};

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new();
    let response = app
        .oneshot(TestApp::anonymous(Method::GET, "/health"))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_json(response).await, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_permission_catalog_listing() {
    let app = TestApp::new();
    let response = app
        .oneshot(TestApp::anonymous(Method::GET, "/api/permissions"))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_to_json(response).await;
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), Permission::all().len());
    assert!(entries.contains(&json!({
        "id": "create:products",
        "action": "create",
        "domain": "products"
    })));
}

#[tokio::test]
async fn test_anonymous_request_never_reaches_store() {
    let app = TestApp::new();
    let response = app
        .oneshot(TestApp::anonymous(Method::POST, "/api/products"))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_to_json(response).await;
    assert_eq!(body["error"], "UNAUTHENTICATED");
    assert_eq!(app.store.lookup_count(), 0);
}

#[tokio::test]
async fn test_unknown_caller_looks_like_anonymous() {
    let app = TestApp::new();

    let anonymous = app
        .oneshot(TestApp::anonymous(Method::GET, "/api/orders"))
        .await;
    let anonymous_status = anonymous.status();
    let anonymous_body = body_to_json(anonymous).await;

    let ghost = app
        .oneshot(TestApp::authed(Method::GET, "/api/orders", Uuid::now_v7()))
        .await;

    assert_eq!(ghost.status(), anonymous_status);
    assert_eq!(body_to_json(ghost).await, anonymous_body);
    assert_eq!(app.store.lookup_count(), 1);
}

#[tokio::test]
async fn test_bad_credentials_rejected_by_identity_layer() {
    let app = TestApp::new();
    let caller = app.add_caller(Role::Admin);

    let malformed = TestApp::request(Method::GET, "/api/orders")
        .header(header::AUTHORIZATION, "Token abc")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(malformed).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_to_json(response).await["error"], "INVALID_AUTH_HEADER");

    let garbage = TestApp::request(Method::GET, "/api/orders")
        .header(header::AUTHORIZATION, "Bearer not.a.token")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(garbage).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_to_json(response).await["error"], "INVALID_TOKEN");

    let expired = jwt::generate_access_token(caller.id, jwt::TEST_PRIVATE_KEY, -60).unwrap();
    let request = TestApp::request(Method::GET, "/api/orders")
        .header(header::AUTHORIZATION, format!("Bearer {expired}"))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_to_json(response).await["error"], "TOKEN_EXPIRED");

    assert_eq!(app.store.lookup_count(), 0);
}

#[tokio::test]
async fn test_user_cannot_create_products() {
    let app = TestApp::new();
    let user = app.add_caller(Role::User);

    let response = app
        .oneshot(TestApp::authed(Method::POST, "/api/products", user.id))
        .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_to_json(response).await;
    assert_eq!(body["error"], "PERMISSION_DENIED");
    assert_eq!(body["required"], json!(["create:products"]));
    assert_eq!(body["resource"], "products");
}

#[tokio::test]
async fn test_moderator_creates_products() {
    let app = TestApp::new();
    let moderator = app.add_caller(Role::Moderator);

    let response = app
        .oneshot(TestApp::authed(Method::POST, "/api/products", moderator.id))
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_to_json(response).await;
    assert_eq!(body["grant"]["user_id"], moderator.id.to_string());
    assert_eq!(body["grant"]["email"], moderator.email);
    assert_eq!(body["grant"]["role"], "moderator");
    assert_eq!(body["grant"]["permissions"], json!(["create:products"]));
    assert_eq!(body["grant"]["resource"], "products");
    assert_eq!(body["grant"]["basis"], "role_grant");
}

#[tokio::test]
async fn test_every_required_permission_must_be_held() {
    let app = TestApp::new();
    let moderator = app.add_caller(Role::Moderator);
    let manager = app.add_caller(Role::Manager);
    let uri = format!("/api/orders/{}", Uuid::now_v7());

    // Moderators read orders but cannot update them
    let response = app
        .oneshot(TestApp::authed(Method::PUT, &uri, moderator.id))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        body_to_json(response).await["required"],
        json!(["read:orders", "update:orders"])
    );

    let response = app
        .oneshot(TestApp::authed(Method::PUT, &uri, manager.id))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_explicit_grants_admit_caller() {
    let app = TestApp::new();
    let user = app.add_caller_with(Role::User, Some(&[Permission::ReadOrders]));

    let response = app
        .oneshot(TestApp::authed(Method::GET, "/api/orders", user.id))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_json(response).await["grant"]["basis"], "explicit_grant");
}

#[tokio::test]
async fn test_unknown_role_is_denied() {
    let app = TestApp::new();
    let stranger = app.add_caller(Role::Unknown);

    let response = app
        .oneshot(TestApp::authed(Method::GET, "/api/orders", stranger.id))
        .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_roles_pass_every_guard() {
    let app = TestApp::new();
    let order_uri = format!("/api/orders/{}", Uuid::now_v7());
    let user_uri = format!("/api/users/{}", Uuid::now_v7());

    for role in [Role::Admin, Role::Superadmin] {
        let admin = app.add_caller(role);
        for (method, uri) in [
            (Method::GET, "/api/orders"),
            (Method::PUT, order_uri.as_str()),
            (Method::POST, "/api/products"),
            (Method::PATCH, user_uri.as_str()),
        ] {
            let response = app.oneshot(TestApp::authed(method, uri, admin.id)).await;
            assert!(response.status().is_success(), "{role} denied {uri}");
            assert_eq!(body_to_json(response).await["grant"]["basis"], "admin_role");
        }
    }
}

#[tokio::test]
async fn test_store_failure_reports_detail_outside_production() {
    let app = TestApp::new();
    let manager = app.add_caller(Role::Manager);
    app.store.set_unavailable(true);

    let response = app
        .oneshot(TestApp::authed(Method::GET, "/api/orders", manager.id))
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_to_json(response).await;
    assert_eq!(body["error"], "INTERNAL_ERROR");
    assert!(body["detail"].as_str().unwrap().contains("unavailable"));
}

#[tokio::test]
async fn test_store_failure_hides_detail_in_production() {
    let mut config = Config::default_for_test();
    config.environment = Environment::Production;
    let app = TestApp::with_config(config);
    let manager = app.add_caller(Role::Manager);
    app.store.set_unavailable(true);

    let response = app
        .oneshot(TestApp::authed(Method::GET, "/api/orders", manager.id))
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_to_json(response).await;
    assert_eq!(body["error"], "INTERNAL_ERROR");
    assert!(body.get("detail").is_none());
}

#[tokio::test]
async fn test_replaced_role_table_applies_to_next_request() {
    let app = TestApp::new();
    let user = app.add_caller(Role::User);

    let response = app
        .oneshot(TestApp::authed(Method::POST, "/api/products", user.id))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    app.state
        .roles
        .replace(RolePermissionTable::from_json(r#"{ "user": ["create:products"] }"#).unwrap());

    let response = app
        .oneshot(TestApp::authed(Method::POST, "/api/products", user.id))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}
