use chrono::{DateTime, Utc};
use shared_types::{AppError, Profile, Role, SignUpRequest};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;

/// Login credentials row. Never leaves the server.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AccountRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
}

/// Create an account and its profile in one transaction.
pub async fn create_with_profile(
    pool: &Pool<Postgres>,
    req: &SignUpRequest,
    password_hash: &str,
    role: Role,
) -> Result<Profile, AppError> {
    let mut tx = pool.begin().await.map_err(SqlxErrorExt::into_app_error)?;

    let email = req.email.trim().to_lowercase();
    let account_id: Uuid = sqlx::query_scalar(
        "INSERT INTO accounts (email, password_hash) VALUES ($1, $2) RETURNING id",
    )
    .bind(&email)
    .bind(password_hash)
    .fetch_one(&mut *tx)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    let profile = sqlx::query_as::<_, Profile>(&format!(
        r#"
        INSERT INTO profiles (id, email, full_name, role, roll_no, branch, batch)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {}
        "#,
        super::profile::COLUMNS
    ))
    .bind(account_id)
    .bind(&email)
    .bind(req.full_name.trim())
    .bind(role.as_str())
    .bind(req.roll_no.as_deref())
    .bind(req.branch.as_deref())
    .bind(req.batch.as_deref())
    .fetch_one(&mut *tx)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    tx.commit().await.map_err(SqlxErrorExt::into_app_error)?;
    Ok(profile)
}

pub async fn find_by_email(
    pool: &Pool<Postgres>,
    email: &str,
) -> Result<Option<AccountRow>, AppError> {
    sqlx::query_as::<_, AccountRow>(
        "SELECT id, email, password_hash FROM accounts WHERE email = $1",
    )
    .bind(email.trim().to_lowercase())
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Persist the hash of a newly issued refresh token.
pub async fn store_refresh_token(
    pool: &Pool<Postgres>,
    account_id: Uuid,
    token_hash: &str,
    expires_at: DateTime<Utc>,
) -> Result<(), AppError> {
    sqlx::query(
        "INSERT INTO refresh_tokens (account_id, token_hash, expires_at) VALUES ($1, $2, $3)",
    )
    .bind(account_id)
    .bind(token_hash)
    .bind(expires_at)
    .execute(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;
    Ok(())
}

/// Id of a live (unrevoked, unexpired) refresh token.
pub async fn find_live_refresh_token(
    pool: &Pool<Postgres>,
    account_id: Uuid,
    token_hash: &str,
) -> Result<Option<Uuid>, AppError> {
    sqlx::query_scalar(
        r#"
        SELECT id FROM refresh_tokens
        WHERE token_hash = $1 AND account_id = $2 AND NOT revoked AND expires_at > now()
        "#,
    )
    .bind(token_hash)
    .bind(account_id)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Revoke one refresh token. Returns false if it was already revoked, so
/// two concurrent refreshes cannot both rotate the same token.
pub async fn revoke_refresh_token(pool: &Pool<Postgres>, id: Uuid) -> Result<bool, AppError> {
    let result = sqlx::query("UPDATE refresh_tokens SET revoked = TRUE WHERE id = $1 AND NOT revoked")
        .bind(id)
        .execute(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    Ok(result.rows_affected() == 1)
}

/// Revoke every refresh token for an account (sign-out).
pub async fn revoke_all_refresh_tokens(
    pool: &Pool<Postgres>,
    account_id: Uuid,
) -> Result<u64, AppError> {
    let result =
        sqlx::query("UPDATE refresh_tokens SET revoked = TRUE WHERE account_id = $1 AND NOT revoked")
            .bind(account_id)
            .execute(pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
    Ok(result.rows_affected())
}
