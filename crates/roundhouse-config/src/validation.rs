// SPDX-FileCopyrightText: 2026 Roundhouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as recognized backend names, known log levels, and
//! nonzero timing windows.

use crate::diagnostic::ConfigError;
use crate::model::RoundhouseConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const BUDGET_MODES: &[&str] = &["soft", "strict"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &RoundhouseConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.coordinator.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "coordinator.log_level `{}` is not one of: {}",
                config.coordinator.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.probe.ready_idle_ms == 0 {
        errors.push(ConfigError::Validation {
            message: "probe.ready_idle_ms must be nonzero".to_string(),
        });
    }

    if config.probe.inter_command_delay_ms == 0 {
        errors.push(ConfigError::Validation {
            message: "probe.inter_command_delay_ms must be nonzero".to_string(),
        });
    }

    if config.probe.flush_delay_ms == 0 {
        errors.push(ConfigError::Validation {
            message: "probe.flush_delay_ms must be nonzero".to_string(),
        });
    }

    if config.discovery.model_ttl_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "discovery.model_ttl_secs must be nonzero".to_string(),
        });
    }

    if config.discovery.quota_ttl_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "discovery.quota_ttl_secs must be nonzero".to_string(),
        });
    }

    if config.discovery.exec_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "discovery.exec_timeout_secs must be nonzero".to_string(),
        });
    }

    // Below this the capture can cut a model list mid-entry.
    if config.discovery.max_capture_bytes < 4096 {
        errors.push(ConfigError::Validation {
            message: format!(
                "discovery.max_capture_bytes must be at least 4096, got {}",
                config.discovery.max_capture_bytes
            ),
        });
    }

    if !BUDGET_MODES.contains(&config.assign.budget.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "assign.budget `{}` is not one of: {}",
                config.assign.budget,
                BUDGET_MODES.join(", ")
            ),
        });
    }

    for name in &config.assign.prefer {
        if roundhouse_registry::normalize(name).is_none() {
            errors.push(ConfigError::Validation {
                message: format!("assign.prefer contains unknown backend name `{name}`"),
            });
        }
    }

    if let Some(root) = &config.workspace.root
        && root.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "workspace.root must not be empty when set".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = RoundhouseConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn bad_log_level_fails_validation() {
        let mut config = RoundhouseConfig::default();
        config.coordinator.log_level = "verbose".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("log_level"))
        ));
    }

    #[test]
    fn zero_timing_windows_fail_validation() {
        let mut config = RoundhouseConfig::default();
        config.probe.ready_idle_ms = 0;
        config.discovery.model_ttl_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn unknown_prefer_entry_fails_validation() {
        let mut config = RoundhouseConfig::default();
        config.assign.prefer = vec!["claude".to_string(), "cursur".to_string()];
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("cursur"))
        ));
    }

    #[test]
    fn alias_prefer_entries_pass_validation() {
        let mut config = RoundhouseConfig::default();
        config.assign.prefer = vec!["claude-code".to_string(), "google-gemini".to_string()];
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn bad_budget_mode_fails_validation() {
        let mut config = RoundhouseConfig::default();
        config.assign.budget = "tight".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("budget"))
        ));
    }

    #[test]
    fn tiny_capture_ceiling_fails_validation() {
        let mut config = RoundhouseConfig::default();
        config.discovery.max_capture_bytes = 100;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
    }
}
