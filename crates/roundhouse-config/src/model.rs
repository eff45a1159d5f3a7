// SPDX-FileCopyrightText: 2026 Roundhouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Roundhouse coordinator.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Roundhouse configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoundhouseConfig {
    /// Coordinator-wide settings.
    #[serde(default)]
    pub coordinator: CoordinatorConfig,

    /// Interactive probe session timing.
    #[serde(default)]
    pub probe: ProbeConfig,

    /// Model/quota discovery settings.
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// Agent-to-backend assignment settings.
    #[serde(default)]
    pub assign: AssignConfig,

    /// Workspace paths.
    #[serde(default)]
    pub workspace: WorkspaceConfig,
}

/// Coordinator-wide configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CoordinatorConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Probe session timing configuration.
///
/// The defaults are tuned against real backend CLIs: startup banners settle
/// within about a second, slash commands need a few seconds to render their
/// response, and a short flush window catches trailing output after stdin
/// closes.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProbeConfig {
    /// Quiet time on stdout before the session counts as ready. Any output
    /// while waiting restarts this window.
    #[serde(default = "default_ready_idle_ms")]
    pub ready_idle_ms: u64,

    /// Delay after sending each slash command before the next step.
    #[serde(default = "default_inter_command_delay_ms")]
    pub inter_command_delay_ms: u64,

    /// Final capture window after stdin closes.
    #[serde(default = "default_flush_delay_ms")]
    pub flush_delay_ms: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            ready_idle_ms: default_ready_idle_ms(),
            inter_command_delay_ms: default_inter_command_delay_ms(),
            flush_delay_ms: default_flush_delay_ms(),
        }
    }
}

fn default_ready_idle_ms() -> u64 {
    1200
}

fn default_inter_command_delay_ms() -> u64 {
    3000
}

fn default_flush_delay_ms() -> u64 {
    1500
}

/// Model/quota discovery configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DiscoveryConfig {
    /// How long a cached model catalog stays fresh.
    #[serde(default = "default_model_ttl_secs")]
    pub model_ttl_secs: u64,

    /// How long a cached quota snapshot stays fresh.
    #[serde(default = "default_quota_ttl_secs")]
    pub quota_ttl_secs: u64,

    /// Maximum age of a provider-written cache file before its contents are
    /// rejected as stale.
    #[serde(default = "default_file_staleness_secs")]
    pub file_staleness_secs: u64,

    /// Per-attempt timeout for direct CLI invocations.
    #[serde(default = "default_exec_timeout_secs")]
    pub exec_timeout_secs: u64,

    /// Output capture ceiling per direct CLI invocation.
    #[serde(default = "default_max_capture_bytes")]
    pub max_capture_bytes: usize,

    /// Path to the Claude CLI's local model cache file. `None` skips the
    /// file-read strategy.
    #[serde(default)]
    pub claude_model_cache_path: Option<String>,

    /// Path to the Gemini CLI's local usage file. `None` skips the
    /// file-read strategy.
    #[serde(default)]
    pub gemini_usage_path: Option<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            model_ttl_secs: default_model_ttl_secs(),
            quota_ttl_secs: default_quota_ttl_secs(),
            file_staleness_secs: default_file_staleness_secs(),
            exec_timeout_secs: default_exec_timeout_secs(),
            max_capture_bytes: default_max_capture_bytes(),
            claude_model_cache_path: None,
            gemini_usage_path: None,
        }
    }
}

fn default_model_ttl_secs() -> u64 {
    300
}

fn default_quota_ttl_secs() -> u64 {
    300
}

fn default_file_staleness_secs() -> u64 {
    1800
}

fn default_exec_timeout_secs() -> u64 {
    8
}

fn default_max_capture_bytes() -> usize {
    256 * 1024
}

/// Agent-to-backend assignment configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AssignConfig {
    /// Backend names to nudge the scorer toward. Accepts aliases; resolved
    /// through the registry at load time.
    #[serde(default)]
    pub prefer: Vec<String>,

    /// Budget mode: `soft` keeps exhausted backends scoreable, `strict`
    /// excludes them.
    #[serde(default = "default_budget")]
    pub budget: String,
}

impl Default for AssignConfig {
    fn default() -> Self {
        Self {
            prefer: Vec::new(),
            budget: default_budget(),
        }
    }
}

fn default_budget() -> String {
    "soft".to_string()
}

/// Workspace path configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WorkspaceConfig {
    /// Workspace root for probe logs and other artifacts. `None` means the
    /// current directory.
    #[serde(default)]
    pub root: Option<String>,
}
