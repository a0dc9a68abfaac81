use dioxus::prelude::*;
use shared_types::{Feedback, FeedbackRequest};

#[cfg(feature = "server")]
use crate::error_convert::{AppErrorExt, ValidateRequest};

/// Any signed-in user may leave feedback.
#[server]
pub async fn submit_feedback(body: FeedbackRequest) -> Result<Feedback, ServerFnError> {
    use crate::repo::feedback;

    body.validate_request().map_err(AppErrorExt::into_server_fn_error)?;
    let claims = super::auth::require_auth()?;
    let pool = super::auth::pool().await?;
    let created = feedback::create(pool, claims.sub, &body)
        .await
        .map_err(AppErrorExt::into_server_fn_error)?;
    tracing::info!(feedback_id = %created.id, rating = created.rating, "feedback received");
    Ok(created)
}

#[server]
pub async fn list_feedback() -> Result<Vec<Feedback>, ServerFnError> {
    use crate::repo::feedback;
    use shared_types::Role;

    super::auth::require_role(&[Role::Admin]).await?;
    let pool = super::auth::pool().await?;
    feedback::list_all(pool)
        .await
        .map_err(AppErrorExt::into_server_fn_error)
}
