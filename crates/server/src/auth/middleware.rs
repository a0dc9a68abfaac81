use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use sqlx::{Pool, Postgres};

use super::cookies::{self, CookieSlot, PendingCookieAction};
use super::jwt::{hash_token, validate_access_token, validate_refresh_token};
use crate::repo::account;

/// Permissive auth middleware.
///
/// Puts valid `Claims` in the request extensions, refreshing transparently
/// from the refresh cookie when the access token is missing or expired. Also
/// inserts a [`CookieSlot`] and applies whatever a server function scheduled
/// in it. Unauthenticated requests pass through; handlers decide.
pub async fn auth_middleware(
    State(pool): State<Pool<Postgres>>,
    mut req: Request,
    next: Next,
) -> Response {
    let headers = req.headers().clone();
    let mut refreshed: Option<(String, String)> = None;

    let claims = cookies::extract_access_token(&headers)
        .and_then(|token| validate_access_token(&token).ok());

    match claims {
        Some(claims) => {
            req.extensions_mut().insert(claims);
        }
        None => {
            if let Some(refresh_token) = cookies::extract_refresh_token(&headers) {
                refreshed = try_transparent_refresh(&pool, &refresh_token, &mut req).await;
            }
        }
    }

    let cookie_slot = CookieSlot::default();
    req.extensions_mut().insert(cookie_slot.clone());

    let mut response = next.run(req).await;

    if let Some((access, refresh)) = refreshed {
        cookies::set_auth_cookies(response.headers_mut(), &access, &refresh);
    }

    // Scheduled actions run after the refresh so sign-out wins.
    match cookie_slot.take() {
        Some(PendingCookieAction::Set {
            access_token,
            refresh_token,
        }) => cookies::set_auth_cookies(response.headers_mut(), &access_token, &refresh_token),
        Some(PendingCookieAction::Clear) => cookies::clear_auth_cookies(response.headers_mut()),
        None => {}
    }

    response
}

/// Rotate the refresh token and insert the new access claims.
///
/// Returns the new pair for the response cookies, or `None` when the refresh
/// token is invalid, revoked, expired, or lost a rotation race.
async fn try_transparent_refresh(
    pool: &Pool<Postgres>,
    refresh_token: &str,
    req: &mut Request,
) -> Option<(String, String)> {
    let claims = validate_refresh_token(refresh_token).ok()?;

    let stored_id = account::find_live_refresh_token(pool, claims.sub, &hash_token(refresh_token))
        .await
        .ok()
        .flatten()?;

    if !account::revoke_refresh_token(pool, stored_id).await.ok()? {
        return None;
    }

    let (access, refresh) = match super::issue_tokens(pool, claims.sub, &claims.email).await {
        Ok(pair) => pair,
        Err(e) => {
            tracing::warn!(user_id = %claims.sub, error = %e, "transparent refresh failed");
            return None;
        }
    };

    let new_claims = validate_access_token(&access).ok()?;
    tracing::debug!(user_id = %new_claims.sub, "session refreshed");
    req.extensions_mut().insert(new_claims);

    Some((access, refresh))
}
