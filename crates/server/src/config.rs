use shared_types::{AppConfig, FeatureFlags, SessionConfig};
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Path to the config file, relative to the project root.
const CONFIG_PATH: &str = "config.toml";

fn parse_config(contents: &str) -> AppConfig {
    toml::from_str(contents).unwrap_or_else(|e| {
        tracing::warn!(path = CONFIG_PATH, error = %e, "config unparseable, using defaults");
        AppConfig::default()
    })
}

/// Read `config.toml` once and cache it. Later calls are no-ops.
///
/// A missing or invalid file falls back to [`AppConfig::default`].
pub fn load_config() -> &'static AppConfig {
    CONFIG.get_or_init(|| match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => {
            let config = parse_config(&contents);
            tracing::info!(features = ?config.features, session = ?config.session, "config loaded");
            config
        }
        Err(e) => {
            tracing::info!(path = CONFIG_PATH, error = %e, "no config file, using defaults");
            AppConfig::default()
        }
    })
}

/// Loaded config, or defaults if [`load_config`] has not run yet.
pub fn app_config() -> AppConfig {
    CONFIG.get().cloned().unwrap_or_default()
}

pub fn feature_flags() -> FeatureFlags {
    app_config().features
}

pub fn session_config() -> SessionConfig {
    app_config().session
}

/// `ADMIN_EMAIL` from the environment, lowercased.
pub fn admin_email() -> Option<String> {
    std::env::var("ADMIN_EMAIL")
        .ok()
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty())
}

/// Whether the `/api` alias for `/api/v1` is mounted. On unless set to a
/// false-like value.
pub fn unversioned_api_enabled() -> bool {
    std::env::var("API_ENABLE_UNVERSIONED")
        .map(|v| !matches!(v.trim().to_lowercase().as_str(), "0" | "false" | "no" | "off"))
        .unwrap_or(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_toml_falls_back_to_defaults() {
        assert_eq!(parse_config("[session\nbroken"), AppConfig::default());
    }

    #[test]
    fn valid_toml_is_parsed() {
        let config = parse_config("[session]\nnotification_poll_secs = 5\n");
        assert_eq!(config.session.notification_poll_secs, 5);
    }

    #[test]
    fn unloaded_config_returns_defaults() {
        // CONFIG is never initialised by unit tests.
        assert_eq!(session_config(), SessionConfig::default());
        assert!(!feature_flags().telemetry);
    }
}
