//! Integration tests for sign-up, sign-in, sign-out and role gating.
//!
//! These tests require a running PostgreSQL database.
//! Run with: `cargo test -p server --features server --test auth_tests`

#![cfg(feature = "server")]

mod common;

use axum::http::{header, Request, StatusCode};
use common::{
    get, get_with_auth, post_json, sign_up, test_app_with_auth, token_for, unique_email, PASSWORD,
};
use shared_types::{AppError, AppErrorKind, AuthResponse, Profile, Role, Session};
use tower::ServiceExt;

#[tokio::test]
async fn sign_up_creates_profile_with_chosen_role() {
    let app = test_app_with_auth().await;
    let email = unique_email("alum");

    let (status, body) = sign_up(&app, &email, "alumni").await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let resp: AuthResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(resp.session.email, email);

    let (status, body) = get_with_auth(&app, "/api/v1/profile", &resp.access_token).await;
    assert_eq!(status, StatusCode::OK);
    let profile: Profile = serde_json::from_str(&body).unwrap();
    assert_eq!(profile.id, resp.session.user_id);
    assert_eq!(profile.role, Role::Alumni);
    assert_eq!(profile.full_name, "Test alumni");
}

#[tokio::test]
async fn admin_role_cannot_be_self_selected() {
    let app = test_app_with_auth().await;
    let (status, body) = sign_up(&app, &unique_email("sneaky"), "admin").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let err: AppError = serde_json::from_str(&body).unwrap();
    assert_eq!(err.kind, AppErrorKind::Forbidden);
}

#[tokio::test]
async fn duplicate_email_conflicts() {
    let app = test_app_with_auth().await;
    let email = unique_email("dup");
    let (first, _) = sign_up(&app, &email, "student").await;
    assert_eq!(first, StatusCode::CREATED);

    let (second, body) = sign_up(&app, &email.to_uppercase(), "student").await;
    assert_eq!(second, StatusCode::CONFLICT);
    let err: AppError = serde_json::from_str(&body).unwrap();
    assert_eq!(err.kind, AppErrorKind::Conflict);
}

#[tokio::test]
async fn short_password_fails_validation() {
    let app = test_app_with_auth().await;
    let json = serde_json::json!({
        "email": unique_email("short"),
        "password": "abc",
        "full_name": "Short Pw",
        "role": "student",
    });
    let (status, body) = post_json(&app, "/api/v1/auth/signup", &json.to_string()).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let err: AppError = serde_json::from_str(&body).unwrap();
    assert!(err.field_errors.contains_key("password"));
}

#[tokio::test]
async fn login_returns_session_and_cookies() {
    let app = test_app_with_auth().await;
    let email = unique_email("login");
    sign_up(&app, &email, "student").await;

    let json = serde_json::json!({ "email": email, "password": PASSWORD });
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/login")
                .header("content-type", "application/json")
                .body(axum::body::Body::from(json.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookies: Vec<String> = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    assert!(cookies.iter().any(|c| c.starts_with("cc_access=")));
    assert!(cookies.iter().any(|c| c.starts_with("cc_refresh=")));
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let app = test_app_with_auth().await;
    let email = unique_email("wrongpw");
    sign_up(&app, &email, "student").await;

    let json = serde_json::json!({ "email": email, "password": "not-the-password" });
    let (status, body) = post_json(&app, "/api/v1/auth/login", &json.to_string()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let err: AppError = serde_json::from_str(&body).unwrap();
    assert_eq!(err.message, "Invalid email or password");
}

#[tokio::test]
async fn login_without_profile_row_still_issues_session() {
    let app = test_app_with_auth().await;
    let email = unique_email("noprofile");
    let (status, body) = sign_up(&app, &email, "student").await;
    assert_eq!(status, StatusCode::CREATED, "sign-up failed: {body}");
    let created: AuthResponse = serde_json::from_str(&body).unwrap();

    sqlx::query("DELETE FROM profiles WHERE id = $1")
        .bind(created.session.user_id)
        .execute(&common::db().await)
        .await
        .unwrap();

    let json = serde_json::json!({ "email": email, "password": PASSWORD });
    let (status, body) = post_json(&app, "/api/v1/auth/login", &json.to_string()).await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    let resp: AuthResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(resp.session.user_id, created.session.user_id);

    // The session is valid; only the profile lookup reports the gap.
    let (status, _) = get_with_auth(&app, "/api/v1/auth/session", &resp.access_token).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = get_with_auth(&app, "/api/v1/profile", &resp.access_token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let err: AppError = serde_json::from_str(&body).unwrap();
    assert_eq!(err.kind, AppErrorKind::NotFound);
}

#[tokio::test]
async fn session_restore_reflects_token() {
    let app = test_app_with_auth().await;

    let (status, body) = get(&app, "/api/v1/auth/session").await;
    assert_eq!(status, StatusCode::OK);
    let anonymous: Option<Session> = serde_json::from_str(&body).unwrap();
    assert!(anonymous.is_none());

    let token = token_for(&app, "student").await;
    let (_, body) = get_with_auth(&app, "/api/v1/auth/session", &token).await;
    let restored: Option<Session> = serde_json::from_str(&body).unwrap();
    assert!(restored.is_some());
}

#[tokio::test]
async fn logout_clears_cookies() {
    let app = test_app_with_auth().await;
    let token = token_for(&app, "student").await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/logout")
                .header("authorization", format!("Bearer {token}"))
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cleared = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter(|v| v.to_str().unwrap().contains("Max-Age=0"))
        .count();
    assert_eq!(cleared, 2);
}

#[tokio::test]
async fn protected_endpoint_without_token_is_unauthorized() {
    let app = test_app_with_auth().await;
    let (status, _) = get(&app, "/api/v1/internships").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = get(&app, "/api/v1/dashboard/admin").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrong_role_is_forbidden() {
    let app = test_app_with_auth().await;
    let student = token_for(&app, "student").await;
    let alumni = token_for(&app, "alumni").await;

    let (status, _) = get_with_auth(&app, "/api/v1/posts/mine", &student).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = get_with_auth(&app, "/api/v1/bookmarks", &alumni).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = get_with_auth(&app, "/api/v1/dashboard/admin", &student).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = get_with_auth(&app, "/api/v1/dashboard/student", &student).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn unversioned_alias_serves_same_routes() {
    let app = test_app_with_auth().await;
    let (status, _) = get(&app, "/api/auth/session").await;
    assert_eq!(status, StatusCode::OK);
}
