//! Framework configuration parsing and validation.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::errors::{Result, ServiceError};

fn default_suppress_alerts() -> bool {
    true
}

/// Configuration for automation sessions, parsed from TOML.
///
/// All fields have defaults; an empty file is a valid configuration.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct AutomationConfig {
    /// Whether launched applications show their window.
    #[serde(default)]
    pub visible: bool,
    /// Whether foreign UI alert prompts are suppressed during
    /// initialization. Leave enabled unless debugging interactively.
    #[serde(default = "default_suppress_alerts")]
    pub suppress_alerts: bool,
    /// Per-application programmatic identifier overrides, keyed by
    /// service name (`word`, `excel`, `slides`, `mail`).
    #[serde(default)]
    pub prog_ids: HashMap<String, String>,
}

impl Default for AutomationConfig {
    fn default() -> Self {
        Self {
            visible: false,
            suppress_alerts: true,
            prog_ids: HashMap::new(),
        }
    }
}

impl AutomationConfig {
    /// Load and validate configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidInput`] if the file cannot be read
    /// or contains invalid TOML.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|err| ServiceError::InvalidInput(format!("failed to read config: {err}")))?;
        Self::from_toml_str(&raw)
    }

    /// Parse and validate configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidInput`] if parsing or validation
    /// fails.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Programmatic identifier for a service, falling back to `default`
    /// when no override is configured.
    #[must_use]
    pub fn prog_id_for(&self, service: &str, default: &str) -> String {
        self.prog_ids
            .get(service)
            .cloned()
            .unwrap_or_else(|| default.to_owned())
    }

    fn validate(&self) -> Result<()> {
        for (service, prog_id) in &self.prog_ids {
            if prog_id.trim().is_empty() {
                return Err(ServiceError::InvalidInput(format!(
                    "prog_ids.{service} must not be empty"
                )));
            }
        }
        Ok(())
    }
}
