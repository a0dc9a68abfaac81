use axum::http::{header, HeaderMap, HeaderValue};
use cookie::Cookie;
use std::sync::{Arc, Mutex};

use super::jwt;

pub const ACCESS_COOKIE: &str = "cc_access";
pub const REFRESH_COOKIE: &str = "cc_refresh";

fn cookie_secure() -> bool {
    std::env::var("COOKIE_SECURE")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(false)
}

fn cookie_domain() -> Option<String> {
    std::env::var("COOKIE_DOMAIN").ok().filter(|d| !d.is_empty())
}

/// HTTP-only, SameSite=Lax cookie scoped to `/`. A zero `max_age_secs`
/// expires it immediately.
fn build_cookie(name: &'static str, value: &str, max_age_secs: i64) -> Option<HeaderValue> {
    let mut cookie = Cookie::build((name, value.to_string()))
        .http_only(true)
        .same_site(cookie::SameSite::Lax)
        .path("/")
        .max_age(cookie::time::Duration::seconds(max_age_secs))
        .secure(cookie_secure());
    if let Some(domain) = cookie_domain() {
        cookie = cookie.domain(domain);
    }
    HeaderValue::from_str(&cookie.build().to_string()).ok()
}

pub fn build_access_cookie(token: &str) -> Option<HeaderValue> {
    build_cookie(ACCESS_COOKIE, token, jwt::access_token_expiry_minutes() * 60)
}

pub fn build_refresh_cookie(token: &str) -> Option<HeaderValue> {
    build_cookie(REFRESH_COOKIE, token, jwt::refresh_token_expiry_days() * 86_400)
}

/// Access token from the cookie, or from `Authorization: Bearer` for REST clients.
pub fn extract_access_token(headers: &HeaderMap) -> Option<String> {
    extract_cookie(headers, ACCESS_COOKIE).or_else(|| {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::to_string)
    })
}

pub fn extract_refresh_token(headers: &HeaderMap) -> Option<String> {
    extract_cookie(headers, REFRESH_COOKIE)
}

fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|s| s.split(';'))
        .filter_map(|piece| Cookie::parse(piece.trim().to_string()).ok())
        .find(|c| c.name() == name)
        .map(|c| c.value().to_string())
}

/// Append Set-Cookie headers for a fresh token pair.
pub fn set_auth_cookies(headers: &mut HeaderMap, access_token: &str, refresh_token: &str) {
    for value in [
        build_access_cookie(access_token),
        build_refresh_cookie(refresh_token),
    ]
    .into_iter()
    .flatten()
    {
        headers.append(header::SET_COOKIE, value);
    }
}

/// Append Set-Cookie headers that expire both auth cookies.
pub fn clear_auth_cookies(headers: &mut HeaderMap) {
    for value in [
        build_cookie(ACCESS_COOKIE, "", 0),
        build_cookie(REFRESH_COOKIE, "", 0),
    ]
    .into_iter()
    .flatten()
    {
        headers.append(header::SET_COOKIE, value);
    }
}

/// Cookie change requested by a server function, applied by the middleware
/// on the way out.
#[derive(Clone, Debug, PartialEq)]
pub enum PendingCookieAction {
    Set {
        access_token: String,
        refresh_token: String,
    },
    Clear,
}

/// Per-request slot the middleware puts in the request extensions.
#[derive(Clone, Debug, Default)]
pub struct CookieSlot(pub Arc<Mutex<Option<PendingCookieAction>>>);

impl CookieSlot {
    pub fn put(&self, action: PendingCookieAction) {
        if let Ok(mut slot) = self.0.lock() {
            *slot = Some(action);
        }
    }

    pub fn take(&self) -> Option<PendingCookieAction> {
        self.0.lock().ok().and_then(|mut slot| slot.take())
    }
}

fn schedule(action: PendingCookieAction) {
    if let Some(ctx) = dioxus::fullstack::FullstackContext::current() {
        let parts = ctx.parts_mut();
        if let Some(slot) = parts.extensions.get::<CookieSlot>() {
            slot.put(action);
        }
    }
}

/// From a server function: set auth cookies on this response.
pub fn schedule_auth_cookies(access_token: &str, refresh_token: &str) {
    schedule(PendingCookieAction::Set {
        access_token: access_token.to_string(),
        refresh_token: refresh_token.to_string(),
    });
}

/// From a server function: clear auth cookies on this response.
pub fn schedule_clear_cookies() {
    schedule(PendingCookieAction::Clear);
}
