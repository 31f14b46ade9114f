//! # Console configuration: `streamline.toml`
//!
//! Settings that are fixed per deployment rather than per user: where the
//! backend lives, how long the debounce and notification timers run, which page
//! sizes the grids offer and how long a ticket's SLA lasts.
//!
//! ```toml
//! [api]
//! base_url = "https://streamline-backend.azurewebsites.net"
//! send_identity_headers = false
//!
//! [ui]
//! debounce_ms = 1000
//! notification_ms = 6000
//! page_sizes = [25, 50, 100]
//! default_page_size = 25
//!
//! [tickets]
//! sla_hours = 4
//!
//! [errors]
//! silent = ["dashboard"]
//! ```
//!
//! `errors.silent` lists the fetch sites whose failures are only logged. Every
//! other site shows an error notification.
//!
//! Every field has a default, so a missing or empty file is the default
//! configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::notification::ErrorPolicy;

/// Top-level configuration stored in `streamline.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub tickets: TicketConfig,
    #[serde(default)]
    pub errors: ErrorConfig,
}

/// Backend connection settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Also send `user_id`/`user_email`/`user_name` headers. Only for backends
    /// that still read them; authorization must come from the bearer token.
    #[serde(default)]
    pub send_identity_headers: bool,
}

fn default_base_url() -> String {
    "https://streamline-backend.azurewebsites.net".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            send_identity_headers: false,
        }
    }
}

/// Timers and grid defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_notification_ms")]
    pub notification_ms: u64,
    #[serde(default = "default_page_sizes")]
    pub page_sizes: Vec<u32>,
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
}

fn default_debounce_ms() -> u64 {
    1000
}

fn default_notification_ms() -> u64 {
    6000
}

fn default_page_sizes() -> Vec<u32> {
    vec![25, 50, 100]
}

fn default_page_size() -> u32 {
    25
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            notification_ms: default_notification_ms(),
            page_sizes: default_page_sizes(),
            default_page_size: default_page_size(),
        }
    }
}

/// Support ticket settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TicketConfig {
    #[serde(default = "default_sla_hours")]
    pub sla_hours: u32,
}

fn default_sla_hours() -> u32 {
    4
}

impl Default for TicketConfig {
    fn default() -> Self {
        Self {
            sla_hours: default_sla_hours(),
        }
    }
}

/// Per-site fetch error reporting.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorConfig {
    #[serde(default = "default_silent_sites")]
    pub silent: Vec<String>,
}

fn default_silent_sites() -> Vec<String> {
    vec!["dashboard".to_string()]
}

impl Default for ErrorConfig {
    fn default() -> Self {
        Self {
            silent: default_silent_sites(),
        }
    }
}

impl ConsoleConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "streamline.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, StoreError> {
        let mut config: Self = toml::from_str(s)?;
        config.ui.normalize();
        Ok(config)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.ui.debounce_ms)
    }

    pub fn notification_duration(&self) -> Duration {
        Duration::from_millis(self.ui.notification_ms)
    }

    pub fn sla_duration(&self) -> chrono::TimeDelta {
        chrono::TimeDelta::hours(i64::from(self.tickets.sla_hours))
    }

    /// How a failed fetch at `site` is reported.
    pub fn error_policy(&self, site: &str) -> ErrorPolicy {
        if self.errors.silent.iter().any(|s| s == site) {
            ErrorPolicy::Silent
        } else {
            ErrorPolicy::Notify
        }
    }
}

impl UiConfig {
    /// Drop zero page sizes and make sure the default is one of the offered sizes.
    fn normalize(&mut self) {
        self.page_sizes.retain(|size| *size > 0);
        if self.page_sizes.is_empty() {
            self.page_sizes = default_page_sizes();
        }
        self.page_sizes.sort_unstable();
        self.page_sizes.dedup();
        if !self.page_sizes.contains(&self.default_page_size) {
            self.default_page_size = self.page_sizes[0];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = ConsoleConfig::from_toml("").unwrap();
        assert_eq!(config, ConsoleConfig::default());
        assert_eq!(config.ui.debounce_ms, 1000);
        assert_eq!(config.tickets.sla_hours, 4);
        assert!(!config.api.send_identity_headers);
    }

    #[test]
    fn test_partial_override() {
        let config = ConsoleConfig::from_toml(
            r#"
            [api]
            base_url = "http://localhost:4000"

            [ui]
            debounce_ms = 250
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "http://localhost:4000");
        assert_eq!(config.debounce_delay(), Duration::from_millis(250));
        assert_eq!(config.ui.notification_ms, 6000);
    }

    #[test]
    fn test_default_page_size_must_be_offered() {
        let config = ConsoleConfig::from_toml(
            r#"
            [ui]
            page_sizes = [100, 0, 50, 50]
            default_page_size = 25
            "#,
        )
        .unwrap();
        assert_eq!(config.ui.page_sizes, vec![50, 100]);
        assert_eq!(config.ui.default_page_size, 50);
    }

    #[test]
    fn test_error_policy_per_site() {
        let config = ConsoleConfig::default();
        assert_eq!(config.error_policy("dashboard"), ErrorPolicy::Silent);
        assert_eq!(config.error_policy("customers"), ErrorPolicy::Notify);

        let loud = ConsoleConfig::from_toml("[errors]\nsilent = []").unwrap();
        assert_eq!(loud.error_policy("dashboard"), ErrorPolicy::Notify);
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let err = ConsoleConfig::from_toml("[ui]\ndebounce_ms = \"soon\"").unwrap_err();
        assert!(matches!(err, StoreError::Config(_)));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = ConsoleConfig::default();
        let text = config.to_toml().unwrap();
        assert_eq!(ConsoleConfig::from_toml(&text).unwrap(), config);
    }
}
