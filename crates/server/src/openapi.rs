use axum::Router;
use shared_types::{
    AdminDashboard, AlumniDashboard, AlumniPost, AppConfig, AppError, AppErrorKind, Application,
    ApplicationStatus, ApplicationSummary, ApplyRequest, AuthResponse, BookmarkToggle,
    CreateInternshipRequest, FeatureFlags, Feedback, FeedbackRequest, Internship,
    InternshipStatus, InterviewRound, LoginRequest, MessageResponse, Notification,
    NotificationType, PostCounts, PostRequest, Profile, Role, Session, SessionConfig,
    SignUpRequest, StudentDashboard, UnreadCount, UpdateApplicationStatusRequest,
    UpdateProfileRequest,
};
use sqlx::{Pool, Postgres};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::db::AppState;
use crate::health;
use crate::rest;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth & profile
        rest::auth::sign_up,
        rest::auth::login,
        rest::auth::logout,
        rest::auth::get_session,
        rest::auth::get_profile,
        rest::auth::update_profile,
        rest::config::get_config,
        // Internships
        rest::internship::list_open,
        rest::internship::list_all,
        rest::internship::get_internship,
        rest::internship::create_internship,
        rest::internship::close_internship,
        // Applications
        rest::application::apply,
        rest::application::list_mine,
        rest::application::list_all,
        rest::application::update_status,
        // Bookmarks
        rest::bookmark::toggle,
        rest::bookmark::list,
        rest::bookmark::list_ids,
        // Alumni posts
        rest::post::list_mine,
        rest::post::create_post,
        rest::post::update_post,
        rest::post::list_pending,
        rest::post::approve_post,
        rest::post::delete_post,
        // Notifications
        rest::notification::list,
        rest::notification::unread_count,
        rest::notification::mark_read,
        rest::notification::mark_all_read,
        // Dashboards
        rest::dashboard::student,
        rest::dashboard::alumni,
        rest::dashboard::admin,
        // Feedback
        rest::feedback::submit,
        rest::feedback::list,
        health::health_check,
    ),
    components(schemas(
        AppError, AppErrorKind, MessageResponse,
        Role, Session, Profile, LoginRequest, SignUpRequest, UpdateProfileRequest, AuthResponse,
        AppConfig, FeatureFlags, SessionConfig,
        Internship, InternshipStatus, CreateInternshipRequest,
        Application, ApplicationStatus, ApplicationSummary, ApplyRequest,
        UpdateApplicationStatusRequest,
        BookmarkToggle,
        AlumniPost, InterviewRound, PostRequest, PostCounts,
        Notification, NotificationType, UnreadCount,
        StudentDashboard, AlumniDashboard, AdminDashboard,
        Feedback, FeedbackRequest,
        health::HealthResponse,
    )),
    tags(
        (name = "auth", description = "Sign-up, sign-in, sign-out and session restore"),
        (name = "profiles", description = "The caller's campus profile"),
        (name = "config", description = "Client-visible configuration"),
        (name = "internships", description = "Internship listings"),
        (name = "applications", description = "Internship applications"),
        (name = "bookmarks", description = "Student bookmarks"),
        (name = "posts", description = "Alumni interview-experience posts"),
        (name = "notifications", description = "In-app notifications"),
        (name = "dashboard", description = "Per-role dashboard summaries"),
        (name = "feedback", description = "Site feedback"),
        (name = "health", description = "Health check endpoint")
    ),
    info(
        title = "Campus Catalyst API",
        description = "Internships, applications and alumni interview experiences for one campus",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

/// Axum router with the REST API under `/api/v1` (and `/api`), the health
/// check at `/health`, and the API reference at `/docs`.
pub fn api_router(pool: Pool<Postgres>) -> Router {
    let state = AppState { pool };

    rest::rest_router()
        .route("/health", axum::routing::get(health::health_check))
        .with_state(state)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
}
