use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use shared_types::Session;
use uuid::Uuid;

const TOKEN_TYPE_ACCESS: &str = "access";
const TOKEN_TYPE_REFRESH: &str = "refresh";

/// Claims carried by access and refresh tokens.
///
/// Identity only. The campus role is read from `profiles` on each check so
/// that role changes take effect without re-issuing tokens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
    /// "access" or "refresh"; each validator rejects the other kind.
    pub typ: String,
}

impl Claims {
    pub fn session(&self) -> Session {
        Session {
            user_id: self.sub,
            email: self.email.clone(),
        }
    }
}

/// Hex SHA-256 of a raw token. Only this hash is stored for refresh tokens.
pub fn hash_token(raw_token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw_token.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn jwt_secret() -> Result<String, JwtError> {
    std::env::var("JWT_SECRET")
        .ok()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ErrorKind::InvalidKeyFormat.into())
}

pub fn access_token_expiry_minutes() -> i64 {
    std::env::var("JWT_ACCESS_TOKEN_EXPIRY_MINUTES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(15)
}

pub fn refresh_token_expiry_days() -> i64 {
    std::env::var("JWT_REFRESH_TOKEN_EXPIRY_DAYS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(7)
}

fn sign(user_id: Uuid, email: &str, typ: &str, ttl: Duration) -> Result<(String, DateTime<Utc>), JwtError> {
    let now = Utc::now();
    let expires_at = now + ttl;
    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        iat: now.timestamp(),
        exp: expires_at.timestamp(),
        jti: Uuid::new_v4().to_string(),
        typ: typ.to_string(),
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret()?.as_bytes()),
    )?;
    Ok((token, expires_at))
}

pub fn create_access_token(user_id: Uuid, email: &str) -> Result<String, JwtError> {
    sign(
        user_id,
        email,
        TOKEN_TYPE_ACCESS,
        Duration::minutes(access_token_expiry_minutes()),
    )
    .map(|(token, _)| token)
}

/// Returns the token and its expiry, which is stored next to its hash.
pub fn create_refresh_token(
    user_id: Uuid,
    email: &str,
) -> Result<(String, DateTime<Utc>), JwtError> {
    sign(
        user_id,
        email,
        TOKEN_TYPE_REFRESH,
        Duration::days(refresh_token_expiry_days()),
    )
}

fn validate(token: &str, expected_typ: &str) -> Result<Claims, JwtError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret()?.as_bytes()),
        &Validation::default(),
    )?;
    if data.claims.typ != expected_typ {
        return Err(ErrorKind::InvalidToken.into());
    }
    Ok(data.claims)
}

pub fn validate_access_token(token: &str) -> Result<Claims, JwtError> {
    validate(token, TOKEN_TYPE_ACCESS)
}

pub fn validate_refresh_token(token: &str) -> Result<Claims, JwtError> {
    validate(token, TOKEN_TYPE_REFRESH)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_test_secret() {
        std::env::set_var("JWT_SECRET", "test-secret-key-for-jwt-unit-tests");
    }

    #[test]
    fn access_token_round_trips_identity() {
        setup_test_secret();
        let id = Uuid::new_v4();
        let token = create_access_token(id, "student@campus.edu").unwrap();
        let claims = validate_access_token(&token).unwrap();
        assert_eq!(claims.sub, id);
        assert_eq!(claims.email, "student@campus.edu");
        assert_eq!(claims.typ, TOKEN_TYPE_ACCESS);
        assert_eq!(claims.session().user_id, id);
    }

    #[test]
    fn expired_token_rejected() {
        setup_test_secret();
        let (token, _) = sign(
            Uuid::new_v4(),
            "old@campus.edu",
            TOKEN_TYPE_ACCESS,
            Duration::hours(-1),
        )
        .unwrap();
        assert!(validate_access_token(&token).is_err());
    }

    #[test]
    fn garbage_rejected() {
        setup_test_secret();
        assert!(validate_access_token("not.a.jwt").is_err());
        assert!(validate_refresh_token("").is_err());
    }

    #[test]
    fn token_kinds_are_not_interchangeable() {
        setup_test_secret();
        let id = Uuid::new_v4();
        let access = create_access_token(id, "a@campus.edu").unwrap();
        let (refresh, expires_at) = create_refresh_token(id, "a@campus.edu").unwrap();
        assert!(validate_refresh_token(&access).is_err());
        assert!(validate_access_token(&refresh).is_err());
        let refresh_claims = validate_refresh_token(&refresh).unwrap();
        assert_eq!(refresh_claims.exp, expires_at.timestamp());
        assert!(refresh_claims.exp > validate_access_token(&access).unwrap().exp);
    }

    #[test]
    fn tokens_issued_together_differ() {
        setup_test_secret();
        let id = Uuid::new_v4();
        let (a, _) = create_refresh_token(id, "x@campus.edu").unwrap();
        let (b, _) = create_refresh_token(id, "x@campus.edu").unwrap();
        assert_ne!(hash_token(&a), hash_token(&b));
    }

    #[test]
    fn hash_is_hex_sha256() {
        let hash = hash_token("eyJhbGciOiJIUzI1NiJ9.payload.sig");
        assert_eq!(hash, hash_token("eyJhbGciOiJIUzI1NiJ9.payload.sig"));
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
