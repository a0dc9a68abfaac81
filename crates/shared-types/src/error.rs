use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Categorization of application errors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum AppErrorKind {
    NotFound,
    BadRequest,
    ValidationError,
    Conflict,
    DatabaseError,
    Unauthorized,
    Forbidden,
    RateLimited,
    InternalError,
}

impl AppErrorKind {
    fn name(self) -> &'static str {
        match self {
            AppErrorKind::NotFound => "NotFound",
            AppErrorKind::BadRequest => "BadRequest",
            AppErrorKind::ValidationError => "ValidationError",
            AppErrorKind::Conflict => "Conflict",
            AppErrorKind::DatabaseError => "DatabaseError",
            AppErrorKind::Unauthorized => "Unauthorized",
            AppErrorKind::Forbidden => "Forbidden",
            AppErrorKind::RateLimited => "RateLimited",
            AppErrorKind::InternalError => "InternalError",
        }
    }

    /// HTTP status for this kind.
    pub fn status_code(self) -> u16 {
        match self {
            AppErrorKind::NotFound => 404,
            AppErrorKind::BadRequest => 400,
            AppErrorKind::ValidationError => 422,
            AppErrorKind::Conflict => 409,
            AppErrorKind::Unauthorized => 401,
            AppErrorKind::Forbidden => 403,
            AppErrorKind::RateLimited => 429,
            AppErrorKind::DatabaseError | AppErrorKind::InternalError => 500,
        }
    }
}

impl fmt::Display for AppErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Structured application error shared by the server and the app.
///
/// Server functions ship it as a JSON payload inside `ServerFnError`; REST
/// handlers return it directly as the response body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AppError {
    pub kind: AppErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub field_errors: HashMap<String, String>,
}

impl AppError {
    fn new(kind: AppErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            field_errors: HashMap::new(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::NotFound, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::BadRequest, message)
    }

    pub fn validation(message: impl Into<String>, field_errors: HashMap<String, String>) -> Self {
        Self {
            field_errors,
            ..Self::new(AppErrorKind::ValidationError, message)
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::Conflict, message)
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::DatabaseError, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::Forbidden, message)
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::RateLimited, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::InternalError, message)
    }

    /// Recover an `AppError` from a `ServerFnError` string on the client.
    ///
    /// The server function error wraps the JSON payload, e.g.
    /// `error running server function: {"kind":"NotFound",...} (details: None)`.
    pub fn from_server_error(error_message: &str) -> Option<Self> {
        if let Ok(err) = serde_json::from_str::<Self>(error_message) {
            return Some(err);
        }
        let start = error_message.find('{')?;
        let end = error_message.rfind('}')?;
        if end > start {
            serde_json::from_str(&error_message[start..=end]).ok()
        } else {
            None
        }
    }

    /// Per-field validation messages, empty when the string carries none.
    pub fn parse_field_errors(error_string: &str) -> HashMap<String, String> {
        Self::from_server_error(error_string)
            .map(|e| e.field_errors)
            .unwrap_or_default()
    }

    /// Message suitable for a toast or inline form error.
    pub fn friendly_message(error_string: &str) -> String {
        match Self::from_server_error(error_string) {
            Some(app_error) => app_error.message,
            None => "Something went wrong. Please try again.".to_string(),
        }
    }

    /// True for errors that mean "you are not signed in", which the app
    /// treats as an anonymous session rather than a failure.
    pub fn is_unauthenticated(&self) -> bool {
        self.kind == AppErrorKind::Unauthorized
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for AppError {}

#[cfg(feature = "validation")]
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let field_errors = errors
            .field_errors()
            .into_iter()
            .filter_map(|(field, errs)| {
                errs.first().map(|first| {
                    let msg = first
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {}", field));
                    (field.to_string(), msg)
                })
            })
            .collect();
        AppError::validation("Validation failed", field_errors)
    }
}

#[cfg(feature = "server")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = axum::http::StatusCode::from_u16(self.kind.status_code())
            .unwrap_or(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        (status, axum::Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn from_server_error_parses_wrapped_payload() {
        let wrapped = r#"error running server function: {"kind":"Conflict","message":"Already applied"} (details: None)"#;
        let err = AppError::from_server_error(wrapped).unwrap();
        assert_eq!(err.kind, AppErrorKind::Conflict);
        assert_eq!(err.message, "Already applied");
    }

    #[test]
    fn from_server_error_parses_raw_json() {
        let err =
            AppError::from_server_error(r#"{"kind":"Unauthorized","message":"Not signed in"}"#)
                .unwrap();
        assert!(err.is_unauthenticated());
    }

    #[test]
    fn from_server_error_rejects_plain_text() {
        assert!(AppError::from_server_error("connection reset").is_none());
        assert!(AppError::from_server_error("}{").is_none());
    }

    #[test]
    fn friendly_message_falls_back_for_unparseable_input() {
        assert_eq!(
            AppError::friendly_message("socket closed"),
            "Something went wrong. Please try again."
        );
        assert_eq!(
            AppError::friendly_message(r#"{"kind":"NotFound","message":"Internship not found"}"#),
            "Internship not found"
        );
    }

    #[test]
    fn parse_field_errors_reads_map() {
        let payload = r#"x {"kind":"ValidationError","message":"Validation failed","field_errors":{"rating":"Rating must be between 1 and 5"}} y"#;
        let fields = AppError::parse_field_errors(payload);
        assert_eq!(
            fields.get("rating").map(String::as_str),
            Some("Rating must be between 1 and 5")
        );
    }

    #[test]
    fn status_codes_follow_kind() {
        assert_eq!(AppError::not_found("").kind.status_code(), 404);
        assert_eq!(AppError::bad_request("").kind.status_code(), 400);
        assert_eq!(
            AppError::validation("", HashMap::new()).kind.status_code(),
            422
        );
        assert_eq!(AppError::conflict("").kind.status_code(), 409);
        assert_eq!(AppError::database("").kind.status_code(), 500);
        assert_eq!(AppError::unauthorized("").kind.status_code(), 401);
        assert_eq!(AppError::forbidden("").kind.status_code(), 403);
        assert_eq!(AppError::rate_limited("").kind.status_code(), 429);
        assert_eq!(AppError::internal("").kind.status_code(), 500);
    }

    #[test]
    fn display_includes_kind_and_message() {
        assert_eq!(
            AppError::forbidden("Admins only").to_string(),
            "Forbidden: Admins only"
        );
    }

    #[test]
    fn empty_field_errors_are_not_serialized() {
        let json = serde_json::to_string(&AppError::not_found("gone")).unwrap();
        assert!(!json.contains("field_errors"));
    }
}
