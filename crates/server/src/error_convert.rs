use dioxus::prelude::ServerFnError;
use shared_types::AppError;

/// Map a sqlx error onto the shared error type.
///
/// Unique violations (SQLSTATE 23505) become `Conflict` with a message
/// picked from the violated constraint.
pub fn sqlx_to_app_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::RowNotFound => AppError::not_found("Resource not found"),
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
            let constraint = db_err.constraint().unwrap_or_default();
            let detail = db_err.message();
            let friendly = if constraint.contains("email") || detail.contains("email") {
                "An account with this email already exists"
            } else if constraint.starts_with("applications") {
                "You have already applied to this internship"
            } else if constraint.starts_with("bookmarks") {
                "Internship is already bookmarked"
            } else {
                "A record with this value already exists"
            };
            AppError::conflict(friendly)
        }
        // 23503: a referenced internship/profile does not exist
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23503") => {
            AppError::not_found("Referenced record does not exist")
        }
        // 23514: CHECK constraint, e.g. rating outside 1..=5
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23514") => {
            AppError::bad_request("Value is out of the allowed range")
        }
        _ => {
            tracing::error!(error = %err, "database error");
            AppError::database(err.to_string())
        }
    }
}

/// Wrap an `AppError` as a `ServerFnError` carrying its JSON form.
pub fn app_error_to_server_fn_error(err: AppError) -> ServerFnError {
    let json = serde_json::to_string(&err).unwrap_or_else(|_| err.message.clone());
    ServerFnError::new(json)
}

/// `.into_app_error()` on sqlx errors.
pub trait SqlxErrorExt {
    fn into_app_error(self) -> AppError;
}

impl SqlxErrorExt for sqlx::Error {
    fn into_app_error(self) -> AppError {
        sqlx_to_app_error(self)
    }
}

/// `.into_server_fn_error()` on shared errors.
pub trait AppErrorExt {
    fn into_server_fn_error(self) -> ServerFnError;
}

impl AppErrorExt for AppError {
    fn into_server_fn_error(self) -> ServerFnError {
        app_error_to_server_fn_error(self)
    }
}

/// Validate a request DTO, turning failures into a 422 `AppError`.
pub trait ValidateRequest {
    fn validate_request(&self) -> Result<(), AppError>;
}

impl<T: validator::Validate> ValidateRequest for T {
    fn validate_request(&self) -> Result<(), AppError> {
        self.validate().map_err(AppError::from)
    }
}
