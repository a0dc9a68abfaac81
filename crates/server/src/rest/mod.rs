pub mod application;
pub mod auth;
pub mod bookmark;
pub mod config;
pub mod dashboard;
pub mod feedback;
pub mod internship;
pub mod notification;
pub mod post;

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::db::AppState;

/// All v1 API routes (paths are relative, no /api prefix).
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        // Auth & profile
        .route("/auth/signup", post(auth::sign_up))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/session", get(auth::get_session))
        .route("/profile", get(auth::get_profile).put(auth::update_profile))
        .route("/config", get(config::get_config))
        // Internships
        .route(
            "/internships",
            get(internship::list_open).post(internship::create_internship),
        )
        .route("/internships/all", get(internship::list_all))
        .route("/internships/{id}", get(internship::get_internship))
        .route("/internships/{id}/close", post(internship::close_internship))
        .route("/internships/{id}/applications", post(application::apply))
        .route("/internships/{id}/bookmark", post(bookmark::toggle))
        // Bookmarks
        .route("/bookmarks", get(bookmark::list))
        .route("/bookmarks/ids", get(bookmark::list_ids))
        // Applications
        .route("/applications", get(application::list_all))
        .route("/applications/mine", get(application::list_mine))
        .route("/applications/{id}/status", patch(application::update_status))
        // Alumni posts
        .route("/posts", post(post::create_post))
        .route("/posts/mine", get(post::list_mine))
        .route("/posts/pending", get(post::list_pending))
        .route("/posts/{id}", put(post::update_post).delete(post::delete_post))
        .route("/posts/{id}/approve", post(post::approve_post))
        // Notifications
        .route("/notifications", get(notification::list))
        .route("/notifications/unread-count", get(notification::unread_count))
        .route("/notifications/read-all", post(notification::mark_all_read))
        .route("/notifications/{id}/read", post(notification::mark_read))
        // Dashboards
        .route("/dashboard/student", get(dashboard::student))
        .route("/dashboard/alumni", get(dashboard::alumni))
        .route("/dashboard/admin", get(dashboard::admin))
        // Feedback
        .route("/feedback", get(feedback::list).post(feedback::submit))
}

/// REST API under `/api/v1`, plus the unversioned `/api` alias unless
/// `API_ENABLE_UNVERSIONED` turns it off.
pub fn rest_router() -> Router<AppState> {
    let router = Router::new().nest("/api/v1", api_v1_routes());
    if crate::config::unversioned_api_enabled() {
        router.nest("/api", api_v1_routes())
    } else {
        router
    }
}
