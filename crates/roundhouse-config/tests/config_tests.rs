// SPDX-FileCopyrightText: 2026 Roundhouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Roundhouse configuration system.

use roundhouse_config::diagnostic::{ConfigError, suggest_key};
use roundhouse_config::model::RoundhouseConfig;
use roundhouse_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_roundhouse_config() {
    let toml = r#"
[coordinator]
log_level = "debug"

[probe]
ready_idle_ms = 800
inter_command_delay_ms = 2500
flush_delay_ms = 1000

[discovery]
model_ttl_secs = 120
quota_ttl_secs = 60
file_staleness_secs = 900
exec_timeout_secs = 5
max_capture_bytes = 65536
claude_model_cache_path = "/home/user/.claude/models.json"

[assign]
prefer = ["claude", "codex-cli"]
budget = "strict"

[workspace]
root = "/srv/work"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.coordinator.log_level, "debug");
    assert_eq!(config.probe.ready_idle_ms, 800);
    assert_eq!(config.probe.inter_command_delay_ms, 2500);
    assert_eq!(config.probe.flush_delay_ms, 1000);
    assert_eq!(config.discovery.model_ttl_secs, 120);
    assert_eq!(config.discovery.quota_ttl_secs, 60);
    assert_eq!(config.discovery.file_staleness_secs, 900);
    assert_eq!(config.discovery.exec_timeout_secs, 5);
    assert_eq!(config.discovery.max_capture_bytes, 65536);
    assert_eq!(
        config.discovery.claude_model_cache_path.as_deref(),
        Some("/home/user/.claude/models.json")
    );
    assert_eq!(config.assign.prefer, vec!["claude", "codex-cli"]);
    assert_eq!(config.assign.budget, "strict");
    assert_eq!(config.workspace.root.as_deref(), Some("/srv/work"));
}

/// Unknown field in [probe] section produces an UnknownField error.
#[test]
fn unknown_field_in_probe_produces_error() {
    let toml = r#"
[probe]
ready_idel_ms = 500
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("ready_idel_ms"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.coordinator.log_level, "info");
    assert_eq!(config.probe.ready_idle_ms, 1200);
    assert_eq!(config.probe.inter_command_delay_ms, 3000);
    assert_eq!(config.probe.flush_delay_ms, 1500);
    assert_eq!(config.discovery.model_ttl_secs, 300);
    assert_eq!(config.discovery.quota_ttl_secs, 300);
    assert!(config.assign.prefer.is_empty());
    assert_eq!(config.assign.budget, "soft");
    assert!(config.workspace.root.is_none());
}

/// Dot-path overrides land on the probe section the way the env provider
/// maps ROUNDHOUSE_PROBE_READY_IDLE_MS.
#[test]
fn dotted_override_reaches_probe_timing() {
    use figment::{
        Figment,
        providers::{Format, Serialized, Toml},
    };

    let toml_content = r#"
[probe]
ready_idle_ms = 900
"#;

    let config: RoundhouseConfig = Figment::new()
        .merge(Serialized::defaults(RoundhouseConfig::default()))
        .merge(Toml::string(toml_content))
        .merge(("probe.ready_idle_ms", 650u64))
        .extract()
        .expect("should merge override");

    assert_eq!(config.probe.ready_idle_ms, 650);
}

/// Underscore-containing keys stay intact under the section mapping
/// (discovery.model_ttl_secs, not discovery.model.ttl.secs).
#[test]
fn dotted_override_keeps_underscored_key_names() {
    use figment::{Figment, providers::Serialized};

    let config: RoundhouseConfig = Figment::new()
        .merge(Serialized::defaults(RoundhouseConfig::default()))
        .merge(("discovery.model_ttl_secs", 42u64))
        .extract()
        .expect("should set nested key via dot notation");

    assert_eq!(config.discovery.model_ttl_secs, 42);
}

/// Top-level unknown sections are rejected.
#[test]
fn deny_unknown_fields_at_top_level() {
    let toml = r#"
[prob]
ready_idle_ms = 500
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown section");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("prob"),
        "error should mention the unknown section, got: {err_str}"
    );
}

/// Typo suggestions surface through the diagnostic bridge.
#[test]
fn diagnostic_suggests_correction_for_probe_typo() {
    let errors = load_and_validate_str(
        r#"
[probe]
ready_idel_ms = 500
"#,
    )
    .expect_err("typo should produce diagnostics");

    let found = errors.iter().any(|e| match e {
        ConfigError::UnknownKey {
            key, suggestion, ..
        } => key == "ready_idel_ms" && suggestion.as_deref() == Some("ready_idle_ms"),
        _ => false,
    });
    assert!(found, "expected UnknownKey with suggestion, got: {errors:?}");
}

/// Unknown-key diagnostics list the section's valid keys.
#[test]
fn diagnostic_error_includes_valid_keys() {
    let errors = load_and_validate_str(
        r#"
[assign]
prefered = ["claude"]
"#,
    )
    .expect_err("unknown key should produce diagnostics");

    let found = errors.iter().any(|e| match e {
        ConfigError::UnknownKey { valid_keys, .. } => {
            valid_keys.contains("prefer") && valid_keys.contains("budget")
        }
        _ => false,
    });
    assert!(found, "expected valid key listing, got: {errors:?}");
}

/// Type mismatches surface as InvalidValue with the dotted key path.
#[test]
fn diagnostic_invalid_value_names_the_key() {
    let errors = load_and_validate_str(
        r#"
[probe]
ready_idle_ms = "fast"
"#,
    )
    .expect_err("type mismatch should produce diagnostics");

    let found = errors.iter().any(|e| match e {
        ConfigError::InvalidValue { key, .. } => key.contains("ready_idle_ms"),
        _ => false,
    });
    assert!(found, "expected InvalidValue for ready_idle_ms, got: {errors:?}");
}

/// Semantic validation runs after deserialization and collects every error.
#[test]
fn validation_collects_all_semantic_errors() {
    let errors = load_and_validate_str(
        r#"
[coordinator]
log_level = "loud"

[assign]
budget = "tight"
prefer = ["cursur"]
"#,
    )
    .expect_err("semantic errors expected");

    assert_eq!(errors.len(), 3, "got: {errors:?}");
    assert!(errors.iter().all(|e| matches!(e, ConfigError::Validation { .. })));
}

/// Aliases in assign.prefer are accepted; resolution happens in the registry.
#[test]
fn alias_prefer_names_validate() {
    let config = load_and_validate_str(
        r#"
[assign]
prefer = ["claude-code", "openai", "google-gemini"]
"#,
    )
    .expect("aliases should validate");
    assert_eq!(config.assign.prefer.len(), 3);
}

/// suggest_key exposed for reuse behaves on representative inputs.
#[test]
fn suggest_key_handles_representative_typos() {
    assert_eq!(
        suggest_key("budgett", &["prefer", "budget"]),
        Some("budget".to_string())
    );
    assert_eq!(suggest_key("xyzzy", &["prefer", "budget"]), None);
}
