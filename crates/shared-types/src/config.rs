use serde::{Deserialize, Serialize};

/// Feature flags controlling optional integrations.
///
/// Loaded from `config.toml` at server startup and exposed to the app via a
/// server function. Every field defaults to `false`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FeatureFlags {
    /// Export traces and logs over OTLP.
    #[serde(default)]
    pub telemetry: bool,
}

/// Timings the app uses for the session provider and the navbar.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SessionConfig {
    /// How long the provider keeps retrying a missing profile before it
    /// reports the profile as unavailable.
    #[serde(default = "default_profile_deadline_secs")]
    pub profile_deadline_secs: u64,
    /// Delay between profile fetch attempts.
    #[serde(default = "default_profile_retry_ms")]
    pub profile_retry_ms: u64,
    /// Navbar unread-count poll interval.
    #[serde(default = "default_notification_poll_secs")]
    pub notification_poll_secs: u64,
}

fn default_profile_deadline_secs() -> u64 {
    10
}

fn default_profile_retry_ms() -> u64 {
    1_500
}

fn default_notification_poll_secs() -> u64 {
    30
}

const MIN_PROFILE_RETRY_MS: u64 = 100;
const MIN_NOTIFICATION_POLL_SECS: u64 = 1;

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            profile_deadline_secs: default_profile_deadline_secs(),
            profile_retry_ms: default_profile_retry_ms(),
            notification_poll_secs: default_notification_poll_secs(),
        }
    }
}

impl SessionConfig {
    /// Delay before a profile retry, never below 100ms.
    pub fn profile_retry_delay_ms(&self) -> u64 {
        self.profile_retry_ms.max(MIN_PROFILE_RETRY_MS)
    }

    /// Navbar poll interval in milliseconds, never below one second.
    pub fn notification_poll_ms(&self) -> u64 {
        self.notification_poll_secs
            .max(MIN_NOTIFICATION_POLL_SECS)
            .saturating_mul(1_000)
    }

    /// Number of profile fetch attempts that fit inside the deadline, at
    /// least one.
    pub fn max_profile_attempts(&self) -> u64 {
        let deadline_ms = self.profile_deadline_secs.saturating_mul(1_000);
        (deadline_ms / self.profile_retry_delay_ms()).max(1)
    }
}

/// Top-level config file structure matching `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AppConfig {
    #[serde(default)]
    pub features: FeatureFlags,
    #[serde(default)]
    pub session: SessionConfig,
}
