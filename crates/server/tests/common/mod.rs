use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware, Router,
};
use server::db::AppState;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use tokio::sync::OnceCell;
use tower::ServiceExt;

/// Tables to truncate before each test run (child tables before parents).
const ALL_TABLES: &str = "feedback, notifications, alumni_posts, bookmarks, applications, \
    internships, profiles, refresh_tokens, accounts";

/// Account that `ADMIN_EMAIL` promotes in every test process.
pub const ADMIN_EMAIL: &str = "placement.cell@campus-test.edu";
pub const PASSWORD: &str = "CampusPass123!";

static INITIALIZED: OnceCell<()> = OnceCell::const_new();

/// Point `DATABASE_URL` at `<db>_test`, creating it if needed, and set the
/// auth env the server reads.
async fn ensure_test_db() {
    let _ = dotenvy::dotenv();
    let original_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let (base_url, db_name) = original_url
        .rsplit_once('/')
        .expect("DATABASE_URL must contain a database name");
    let test_db_name = format!("{db_name}_test");
    let test_url = format!("{base_url}/{test_db_name}");

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&format!("{base_url}/postgres"))
        .await
        .expect("Failed to connect to postgres admin database");

    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&test_db_name)
            .fetch_one(&admin_pool)
            .await
            .expect("Failed to check for test database");

    if !exists {
        sqlx::query(&format!("CREATE DATABASE \"{test_db_name}\""))
            .execute(&admin_pool)
            .await
            .expect("Failed to create test database");
    }
    admin_pool.close().await;

    std::env::set_var("DATABASE_URL", &test_url);
    std::env::set_var("ADMIN_EMAIL", ADMIN_EMAIL);
    if std::env::var("JWT_SECRET").map(|s| s.is_empty()).unwrap_or(true) {
        std::env::set_var("JWT_SECRET", "integration-test-secret");
    }
}

/// Pool on the test database. The first call, across all tests in the
/// binary, creates the database, migrates and truncates.
async fn test_pool() -> Pool<Postgres> {
    INITIALIZED
        .get_or_init(|| async {
            ensure_test_db().await;
            let pool = server::db::create_pool().expect("Failed to build test pool");
            server::db::run_migrations(&pool)
                .await
                .expect("Failed to run migrations");
            sqlx::query(&format!("TRUNCATE {ALL_TABLES} CASCADE"))
                .execute(&pool)
                .await
                .expect("Failed to truncate test tables");
        })
        .await;

    server::db::create_pool().expect("Failed to build test pool")
}

#[allow(dead_code)]
/// Pool for tests that need to shape rows the API never writes.
pub async fn db() -> Pool<Postgres> {
    test_pool().await
}

#[allow(dead_code)]
/// REST routes and `/health` without the auth middleware.
pub async fn test_app() -> Router {
    let state = AppState {
        pool: test_pool().await,
    };

    server::rest::rest_router()
        .route("/health", axum::routing::get(server::health::health_check))
        .with_state(state)
}

#[allow(dead_code)]
/// REST routes behind the auth middleware, as in production.
pub async fn test_app_with_auth() -> Router {
    let state = AppState {
        pool: test_pool().await,
    };

    server::rest::rest_router()
        .route("/health", axum::routing::get(server::health::health_check))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            server::auth::middleware::auth_middleware,
        ))
        .with_state(state)
}

#[allow(dead_code)]
/// Unique address per call so tests can share one database.
pub fn unique_email(prefix: &str) -> String {
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let id = COUNTER.fetch_add(1, Ordering::SeqCst);
    let ts = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_millis();
    format!("{prefix}_{ts}_{id}@campus-test.edu")
}

#[allow(dead_code)]
/// Sign up through the REST API and return (status, body).
pub async fn sign_up(app: &Router, email: &str, role: &str) -> (StatusCode, String) {
    let json = serde_json::json!({
        "email": email,
        "password": PASSWORD,
        "full_name": format!("Test {role}"),
        "role": role,
    });
    post_json(app, "/api/v1/auth/signup", &json.to_string()).await
}

#[allow(dead_code)]
/// Sign up a fresh user with `role` and return its access token.
pub async fn token_for(app: &Router, role: &str) -> String {
    let (status, body) = sign_up(app, &unique_email(role), role).await;
    assert_eq!(status, StatusCode::CREATED, "sign-up failed: {body}");
    access_token(&body)
}

#[allow(dead_code)]
/// Token for the `ADMIN_EMAIL` account, signing it up on first use.
pub async fn admin_token(app: &Router) -> String {
    let (status, body) = sign_up(app, ADMIN_EMAIL, "student").await;
    if status == StatusCode::CREATED {
        return access_token(&body);
    }
    let login = serde_json::json!({ "email": ADMIN_EMAIL, "password": PASSWORD });
    let (status, body) = post_json(app, "/api/v1/auth/login", &login.to_string()).await;
    assert_eq!(status, StatusCode::OK, "admin login failed: {body}");
    access_token(&body)
}

fn access_token(body: &str) -> String {
    let resp: shared_types::AuthResponse = serde_json::from_str(body).unwrap();
    resp.access_token
}

/// Send a request and return (status, body).
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    json: Option<&str>,
    token: Option<&str>,
) -> (StatusCode, String) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let body = match json {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[allow(dead_code)]
pub async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    send(app, "GET", uri, None, None).await
}

#[allow(dead_code)]
pub async fn get_with_auth(app: &Router, uri: &str, token: &str) -> (StatusCode, String) {
    send(app, "GET", uri, None, Some(token)).await
}

#[allow(dead_code)]
pub async fn post_json(app: &Router, uri: &str, json: &str) -> (StatusCode, String) {
    send(app, "POST", uri, Some(json), None).await
}

#[allow(dead_code)]
pub async fn post_json_with_auth(
    app: &Router,
    uri: &str,
    json: &str,
    token: &str,
) -> (StatusCode, String) {
    send(app, "POST", uri, Some(json), Some(token)).await
}

#[allow(dead_code)]
pub async fn put_json_with_auth(
    app: &Router,
    uri: &str,
    json: &str,
    token: &str,
) -> (StatusCode, String) {
    send(app, "PUT", uri, Some(json), Some(token)).await
}

#[allow(dead_code)]
pub async fn patch_json_with_auth(
    app: &Router,
    uri: &str,
    json: &str,
    token: &str,
) -> (StatusCode, String) {
    send(app, "PATCH", uri, Some(json), Some(token)).await
}

#[allow(dead_code)]
pub async fn delete_with_auth(app: &Router, uri: &str, token: &str) -> (StatusCode, String) {
    send(app, "DELETE", uri, None, Some(token)).await
}
