// SPDX-FileCopyrightText: 2026 Roundhouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./roundhouse.toml` > `~/.config/roundhouse/roundhouse.toml`
//! > `/etc/roundhouse/roundhouse.toml` with environment variable overrides via
//! the `ROUNDHOUSE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::RoundhouseConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/roundhouse/roundhouse.toml` (system-wide)
/// 3. `~/.config/roundhouse/roundhouse.toml` (user XDG config)
/// 4. `./roundhouse.toml` (local directory)
/// 5. `ROUNDHOUSE_*` environment variables
pub fn load_config() -> Result<RoundhouseConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (defaults + string, no files,
/// no env). Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<RoundhouseConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RoundhouseConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<RoundhouseConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RoundhouseConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for config loading (exposed for diagnostic use).
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(RoundhouseConfig::default()))
        .merge(Toml::file("/etc/roundhouse/roundhouse.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("roundhouse/roundhouse.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("roundhouse.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` so underscore-containing
/// key names stay intact: `ROUNDHOUSE_PROBE_READY_IDLE_MS` must map to
/// `probe.ready_idle_ms`, not `probe.ready.idle.ms`.
fn env_provider() -> Env {
    Env::prefixed("ROUNDHOUSE_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped, e.g.
        // ROUNDHOUSE_DISCOVERY_MODEL_TTL_SECS -> "discovery_model_ttl_secs".
        let mapped = key
            .as_str()
            .replacen("coordinator_", "coordinator.", 1)
            .replacen("probe_", "probe.", 1)
            .replacen("discovery_", "discovery.", 1)
            .replacen("assign_", "assign.", 1)
            .replacen("workspace_", "workspace.", 1);
        mapped.into()
    })
}
