use axum::Json;

use shared_types::AppConfig;

/// Feature flags and session timings, as the app reads them.
#[utoipa::path(
    get,
    path = "/api/v1/config",
    responses(
        (status = 200, description = "Client-visible configuration", body = AppConfig)
    ),
    tag = "config"
)]
pub async fn get_config() -> Json<AppConfig> {
    Json(crate::config::app_config())
}
