//! Integration tests for the campus REST API.
//!
//! These tests require a running PostgreSQL database.
//! Run with: `cargo test -p server --features server --test api_tests`

#![cfg(feature = "server")]

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{
    admin_token, delete_with_auth, get, get_with_auth, patch_json_with_auth, post_json_with_auth,
    put_json_with_auth, test_app, test_app_with_auth, token_for,
};
use shared_types::{
    AdminDashboard, AlumniDashboard, AlumniPost, Application, ApplicationStatus,
    ApplicationSummary, BookmarkToggle, Feedback, Internship, InternshipStatus, Notification,
    NotificationType, StudentDashboard, UnreadCount,
};
use uuid::Uuid;

async fn create_internship(app: &axum::Router, admin: &str, title: &str) -> Internship {
    let json = serde_json::json!({
        "title": title,
        "company": "Acme Robotics",
        "description": "Build firmware for warehouse robots.",
        "location": "Pune",
        "mode": "hybrid",
        "internship_type": "summer",
        "stipend": "25000/month",
        "tags": ["rust", "embedded"],
        "deadline": Utc::now() + Duration::days(10),
    });
    let (status, body) =
        post_json_with_auth(app, "/api/v1/internships", &json.to_string(), admin).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    serde_json::from_str(&body).unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let app = test_app().await;
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn open_internship_is_listed_and_notifies_students() {
    let app = test_app_with_auth().await;
    let admin = admin_token(&app).await;
    let student = token_for(&app, "student").await;

    let title = format!("Firmware Intern {}", Uuid::new_v4());
    let created = create_internship(&app, &admin, &title).await;
    assert_eq!(created.status, InternshipStatus::Open);

    let (status, body) = get_with_auth(&app, "/api/v1/internships", &student).await;
    assert_eq!(status, StatusCode::OK);
    let listed: Vec<Internship> = serde_json::from_str(&body).unwrap();
    assert!(listed.iter().any(|i| i.id == created.id));
    assert!(listed.windows(2).all(|w| w[0].deadline <= w[1].deadline));

    let (_, body) = get_with_auth(&app, "/api/v1/notifications", &student).await;
    let notifications: Vec<Notification> = serde_json::from_str(&body).unwrap();
    let note = notifications
        .iter()
        .find(|n| n.message.contains(&title))
        .expect("student should be told about the new internship");
    assert_eq!(note.kind, NotificationType::NewInternship);
    assert_eq!(
        note.link.as_deref(),
        Some(format!("/student/internships/{}", created.id).as_str())
    );
}

#[tokio::test]
async fn closed_internship_disappears_and_rejects_applications() {
    let app = test_app_with_auth().await;
    let admin = admin_token(&app).await;
    let student = token_for(&app, "student").await;
    let created = create_internship(&app, &admin, "Closing Soon").await;

    let uri = format!("/api/v1/internships/{}/close", created.id);
    let (status, body) = post_json_with_auth(&app, &uri, "{}", &admin).await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let (_, body) = get_with_auth(&app, "/api/v1/internships", &student).await;
    let listed: Vec<Internship> = serde_json::from_str(&body).unwrap();
    assert!(listed.iter().all(|i| i.id != created.id));

    let uri = format!("/api/v1/internships/{}/applications", created.id);
    let (status, _) = post_json_with_auth(&app, &uri, "{}", &student).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn student_applies_once_and_admin_updates_status() {
    let app = test_app_with_auth().await;
    let admin = admin_token(&app).await;
    let student = token_for(&app, "student").await;
    let created = create_internship(&app, &admin, "Data Intern").await;

    let uri = format!("/api/v1/internships/{}/applications", created.id);
    let apply = serde_json::json!({
        "cover_letter": "I have shipped two Rust services.",
        "resume_url": "https://example.com/resume.pdf",
    });
    let (status, body) = post_json_with_auth(&app, &uri, &apply.to_string(), &student).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let application: Application = serde_json::from_str(&body).unwrap();
    assert_eq!(application.status, ApplicationStatus::Submitted);

    let (status, _) = post_json_with_auth(&app, &uri, &apply.to_string(), &student).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, body) = get_with_auth(&app, "/api/v1/applications/mine", &student).await;
    let mine: Vec<ApplicationSummary> = serde_json::from_str(&body).unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].internship_title, "Data Intern");

    let uri = format!("/api/v1/applications/{}/status", application.id);
    let (status, body) =
        patch_json_with_auth(&app, &uri, r#"{"status":"under_review"}"#, &admin).await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let (_, body) = get_with_auth(&app, "/api/v1/notifications", &student).await;
    let notifications: Vec<Notification> = serde_json::from_str(&body).unwrap();
    assert!(notifications
        .iter()
        .any(|n| n.kind == NotificationType::StatusUpdate));

    let (_, body) = get_with_auth(
        &app,
        "/api/v1/applications?status=under_review",
        &admin,
    )
    .await;
    let filtered: Vec<ApplicationSummary> = serde_json::from_str(&body).unwrap();
    assert!(filtered.iter().any(|a| a.id == application.id));
    assert!(filtered
        .iter()
        .all(|a| a.status == ApplicationStatus::UnderReview));

    let (status, _) = get_with_auth(&app, "/api/v1/applications?status=bogus", &admin).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn bookmark_toggles_on_and_off() {
    let app = test_app_with_auth().await;
    let admin = admin_token(&app).await;
    let student = token_for(&app, "student").await;
    let created = create_internship(&app, &admin, "Bookmark Me").await;

    let uri = format!("/api/v1/internships/{}/bookmark", created.id);
    let (_, body) = post_json_with_auth(&app, &uri, "{}", &student).await;
    let on: BookmarkToggle = serde_json::from_str(&body).unwrap();
    assert!(on.bookmarked);

    let (_, body) = get_with_auth(&app, "/api/v1/bookmarks/ids", &student).await;
    let ids: Vec<Uuid> = serde_json::from_str(&body).unwrap();
    assert_eq!(ids, vec![created.id]);

    let (_, body) = post_json_with_auth(&app, &uri, "{}", &student).await;
    let off: BookmarkToggle = serde_json::from_str(&body).unwrap();
    assert!(!off.bookmarked);

    let (_, body) = get_with_auth(&app, "/api/v1/bookmarks", &student).await;
    let remaining: Vec<Internship> = serde_json::from_str(&body).unwrap();
    assert!(remaining.is_empty());
}

#[tokio::test]
async fn alumni_post_goes_through_approval() {
    let app = test_app_with_auth().await;
    let admin = admin_token(&app).await;
    let alumni = token_for(&app, "alumni").await;

    let json = serde_json::json!({
        "company": "Globex",
        "job_role": "SDE Intern",
        "content": "Two coding rounds followed by a system design chat.",
        "difficulty_rating": 4,
        "rounds": [{ "name": "OA", "description": "Two DSA problems" }],
        "tips": ["Revise graphs"],
    });
    let (status, body) =
        post_json_with_auth(&app, "/api/v1/posts", &json.to_string(), &alumni).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let post: AlumniPost = serde_json::from_str(&body).unwrap();
    assert!(!post.approved);
    assert_eq!(post.rounds.len(), 1);

    let (_, body) = get_with_auth(&app, "/api/v1/posts/pending", &admin).await;
    let pending: Vec<AlumniPost> = serde_json::from_str(&body).unwrap();
    assert!(pending.iter().any(|p| p.id == post.id));

    let uri = format!("/api/v1/posts/{}/approve", post.id);
    let (status, body) = post_json_with_auth(&app, &uri, "{}", &admin).await;
    assert_eq!(status, StatusCode::OK);
    let approved: AlumniPost = serde_json::from_str(&body).unwrap();
    assert!(approved.approved);

    let (_, body) = get_with_auth(&app, "/api/v1/notifications", &alumni).await;
    let notifications: Vec<Notification> = serde_json::from_str(&body).unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationType::PostApproved);

    let (_, body) = get_with_auth(&app, "/api/v1/dashboard/alumni", &alumni).await;
    let dashboard: AlumniDashboard = serde_json::from_str(&body).unwrap();
    assert_eq!(dashboard.counts.total, 1);
    assert_eq!(dashboard.counts.approved, 1);
    assert_eq!(dashboard.counts.pending, 0);

    // editing sends it back to pending
    let uri = format!("/api/v1/posts/{}", post.id);
    let (status, body) = put_json_with_auth(&app, &uri, &json.to_string(), &alumni).await;
    assert_eq!(status, StatusCode::OK);
    let edited: AlumniPost = serde_json::from_str(&body).unwrap();
    assert!(!edited.approved);

    let (status, _) = delete_with_auth(&app, &uri, &admin).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = delete_with_auth(&app, &uri, &admin).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn another_alumnus_cannot_edit_post() {
    let app = test_app_with_auth().await;
    let author = token_for(&app, "alumni").await;
    let other = token_for(&app, "alumni").await;

    let json = serde_json::json!({
        "company": "Initech",
        "job_role": "Analyst",
        "content": "One aptitude test and one HR round, very friendly.",
    });
    let (_, body) = post_json_with_auth(&app, "/api/v1/posts", &json.to_string(), &author).await;
    let post: AlumniPost = serde_json::from_str(&body).unwrap();

    let uri = format!("/api/v1/posts/{}", post.id);
    let (status, _) = put_json_with_auth(&app, &uri, &json.to_string(), &other).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn notifications_mark_read() {
    let app = test_app_with_auth().await;
    let admin = admin_token(&app).await;
    let student = token_for(&app, "student").await;
    create_internship(&app, &admin, "Notify One").await;
    create_internship(&app, &admin, "Notify Two").await;

    let (_, body) = get_with_auth(&app, "/api/v1/notifications/unread-count", &student).await;
    let before: UnreadCount = serde_json::from_str(&body).unwrap();
    assert!(before.unread >= 2);

    let (_, body) = get_with_auth(&app, "/api/v1/notifications", &student).await;
    let notifications: Vec<Notification> = serde_json::from_str(&body).unwrap();
    let uri = format!("/api/v1/notifications/{}/read", notifications[0].id);
    let (status, _) = post_json_with_auth(&app, &uri, "{}", &student).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get_with_auth(&app, "/api/v1/notifications/unread-count", &student).await;
    let after_one: UnreadCount = serde_json::from_str(&body).unwrap();
    assert_eq!(after_one.unread, before.unread - 1);

    // another user's notification is not found
    let other = token_for(&app, "student").await;
    let (status, _) = post_json_with_auth(&app, &uri, "{}", &other).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) =
        post_json_with_auth(&app, "/api/v1/notifications/read-all", "{}", &student).await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = get_with_auth(&app, "/api/v1/notifications/unread-count", &student).await;
    let after_all: UnreadCount = serde_json::from_str(&body).unwrap();
    assert_eq!(after_all.unread, 0);
}

#[tokio::test]
async fn dashboards_report_counts() {
    let app = test_app_with_auth().await;
    let admin = admin_token(&app).await;
    let student = token_for(&app, "student").await;
    let created = create_internship(&app, &admin, "Dashboard Intern").await;

    let uri = format!("/api/v1/internships/{}/bookmark", created.id);
    post_json_with_auth(&app, &uri, "{}", &student).await;

    let (status, body) = get_with_auth(&app, "/api/v1/dashboard/student", &student).await;
    assert_eq!(status, StatusCode::OK);
    let dashboard: StudentDashboard = serde_json::from_str(&body).unwrap();
    assert_eq!(dashboard.applications, 0);
    assert_eq!(dashboard.bookmarks, 1);
    assert!(dashboard.upcoming_internships >= 1);
    assert!(dashboard.recent_internships.len() <= 3);

    let (_, body) = get_with_auth(&app, "/api/v1/dashboard/admin", &admin).await;
    let totals: AdminDashboard = serde_json::from_str(&body).unwrap();
    assert!(totals.internships >= 1);
    assert!(totals.users >= 2);
}

#[tokio::test]
async fn feedback_validates_rating() {
    let app = test_app_with_auth().await;
    let admin = admin_token(&app).await;
    let student = token_for(&app, "student").await;

    let (status, _) =
        post_json_with_auth(&app, "/api/v1/feedback", r#"{"rating":6}"#, &student).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = post_json_with_auth(
        &app,
        "/api/v1/feedback",
        r#"{"rating":4,"comment":"Loved the bookmarks page"}"#,
        &student,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let created: Feedback = serde_json::from_str(&body).unwrap();

    let (status, _) = get_with_auth(&app, "/api/v1/feedback", &student).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (_, body) = get_with_auth(&app, "/api/v1/feedback", &admin).await;
    let all: Vec<Feedback> = serde_json::from_str(&body).unwrap();
    assert!(all.iter().any(|f| f.id == created.id));
}
