pub mod cookies;
pub mod extractors;
pub mod jwt;
pub mod middleware;
pub mod password;

use shared_types::{AppError, Profile, Role, Session, SignUpRequest};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::repo::{account, profile};

/// Check if the given email matches `ADMIN_EMAIL` (case-insensitive).
/// Returns `false` if the variable is empty or unset.
pub fn is_admin_email(email: &str) -> bool {
    admin_email_matches(crate::config::admin_email().as_deref(), email)
}

fn admin_email_matches(configured: Option<&str>, email: &str) -> bool {
    configured.is_some_and(|admin| admin.eq_ignore_ascii_case(email.trim()))
}

/// Promote the profile to admin when its email matches `ADMIN_EMAIL`.
///
/// A failed update is logged and the profile is returned unchanged.
pub async fn maybe_promote_admin(pool: &Pool<Postgres>, current: Profile) -> Profile {
    if current.role == Role::Admin || !is_admin_email(&current.email) {
        return current;
    }

    match profile::set_role(pool, current.id, Role::Admin).await {
        Ok(promoted) => {
            tracing::info!(user_id = %promoted.id, email = %promoted.email, "promoted user to admin via ADMIN_EMAIL");
            promoted
        }
        Err(e) => {
            tracing::error!(user_id = %current.id, error = %e, "failed to promote admin");
            current
        }
    }
}

/// Create an account plus profile. Admin cannot be picked at sign-up.
pub async fn register(pool: &Pool<Postgres>, req: &SignUpRequest) -> Result<Profile, AppError> {
    if !req.role.self_selectable() {
        return Err(AppError::forbidden("This role cannot be chosen at sign-up"));
    }
    let hash = password::hash_password(&req.password)?;
    let created = account::create_with_profile(pool, req, &hash, req.role).await?;
    tracing::info!(user_id = %created.id, role = %created.role, "account created");
    Ok(maybe_promote_admin(pool, created).await)
}

/// Check credentials. Unknown email and wrong password share one message.
pub async fn authenticate(
    pool: &Pool<Postgres>,
    email: &str,
    password: &str,
) -> Result<account::AccountRow, AppError> {
    let invalid = || AppError::unauthorized("Invalid email or password");
    let row = account::find_by_email(pool, email).await?.ok_or_else(invalid)?;
    if !password::verify_password(password, &row.password_hash)? {
        tracing::info!(user_id = %row.id, "rejected sign-in with wrong password");
        return Err(invalid());
    }
    Ok(row)
}

/// Check credentials and return the session identity to issue tokens for.
///
/// A missing profile row does not block sign-in. The app keeps retrying the
/// profile and reports it unavailable if it never shows up.
pub async fn sign_in(
    pool: &Pool<Postgres>,
    email: &str,
    password: &str,
) -> Result<Session, AppError> {
    let row = authenticate(pool, email, password).await?;
    match profile::find_by_id(pool, row.id).await? {
        Some(found) => {
            let found = maybe_promote_admin(pool, found).await;
            tracing::info!(user_id = %found.id, role = %found.role, "signed in");
        }
        None => tracing::warn!(user_id = %row.id, "signed in without a profile row"),
    }
    Ok(Session {
        user_id: row.id,
        email: row.email,
    })
}

/// Sign a fresh access/refresh pair and persist the refresh token's hash.
pub async fn issue_tokens(
    pool: &Pool<Postgres>,
    user_id: Uuid,
    email: &str,
) -> Result<(String, String), AppError> {
    let access = jwt::create_access_token(user_id, email)
        .map_err(|e| AppError::internal(format!("Token creation failed: {e}")))?;
    let (refresh, expires_at) = jwt::create_refresh_token(user_id, email)
        .map_err(|e| AppError::internal(format!("Token creation failed: {e}")))?;
    account::store_refresh_token(pool, user_id, &jwt::hash_token(&refresh), expires_at).await?;
    Ok((access, refresh))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_email_match_ignores_case() {
        let configured = Some("Placement.Cell@Campus.edu");
        assert!(admin_email_matches(configured, "placement.cell@campus.edu"));
        assert!(admin_email_matches(configured, " PLACEMENT.CELL@CAMPUS.EDU "));
        assert!(!admin_email_matches(configured, "student@campus.edu"));
    }

    #[test]
    fn no_admin_configured_matches_nobody() {
        assert!(!admin_email_matches(None, "placement.cell@campus.edu"));
    }
}
