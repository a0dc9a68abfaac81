use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use shared_types::{AppError, Profile, Role};
use sqlx::{Pool, Postgres};

use super::jwt::Claims;
use crate::repo::profile;

/// Requires a signed-in caller. 401 otherwise.
pub struct AuthRequired(pub Claims);

impl<S: Send + Sync> FromRequestParts<S> for AuthRequired {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthRequired)
            .ok_or_else(|| AppError::unauthorized("Authentication required"))
    }
}

/// Optional auth claims. Never fails.
pub struct MaybeAuth(pub Option<Claims>);

impl<S: Send + Sync> FromRequestParts<S> for MaybeAuth {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuth(parts.extensions.get::<Claims>().cloned()))
    }
}

pub const STUDENT: u8 = 0;
pub const ALUMNI: u8 = 1;
pub const ADMIN: u8 = 2;

/// Maps the const parameter of [`RoleRequired`] to a campus role.
pub const fn role_for(code: u8) -> Role {
    match code {
        STUDENT => Role::Student,
        ALUMNI => Role::Alumni,
        _ => Role::Admin,
    }
}

/// Requires a signed-in caller whose stored profile has exactly `ROLE`.
///
/// 401 without a session, 403 when the profile is missing or has another
/// role. The role comes from `profiles`, not the token.
pub struct RoleRequired<const ROLE: u8>(pub Profile);

impl<const ROLE: u8, S> FromRequestParts<S> for RoleRequired<ROLE>
where
    S: Send + Sync,
    Pool<Postgres>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let claims = parts
            .extensions
            .get::<Claims>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized("Authentication required"))?;

        let pool = Pool::<Postgres>::from_ref(state);
        let required = role_for(ROLE);
        let profile = profile::find_by_id(&pool, claims.sub)
            .await?
            .ok_or_else(|| AppError::forbidden("Profile not found"))?;

        if profile.role != required {
            return Err(AppError::forbidden(format!("{} access required", required.label())));
        }
        Ok(RoleRequired(profile))
    }
}

pub type StudentOnly = RoleRequired<STUDENT>;
pub type AlumniOnly = RoleRequired<ALUMNI>;
pub type AdminOnly = RoleRequired<ADMIN>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_codes_map_to_roles() {
        assert_eq!(role_for(STUDENT), Role::Student);
        assert_eq!(role_for(ALUMNI), Role::Alumni);
        assert_eq!(role_for(ADMIN), Role::Admin);
    }
}
