// SPDX-FileCopyrightText: 2026 Roundhouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Direct (non-session) CLI probing.
//!
//! When the session path has nothing cached, the backend binary is invoked
//! with candidate argument lists, sequentially, first non-empty result wins.
//! Each attempt is bounded by a timeout and an output ceiling; the timeout
//! path drops the child, which kills it. JSON output is preferred, pattern
//! extraction over raw text is the fallback.

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::debug;

use roundhouse_core::{BackendKind, QuotaUsage};
use roundhouse_registry::profile;

use crate::extract::{model_ids_from_json, model_ids_from_text};
use crate::quota::parse_quota;

/// Bounds for one direct-exec attempt.
#[derive(Debug, Clone, Copy)]
pub struct ExecLimits {
    pub timeout: Duration,
    pub max_output: usize,
}

impl Default for ExecLimits {
    fn default() -> Self {
        ExecLimits {
            timeout: Duration::from_secs(8),
            max_output: 256 * 1024,
        }
    }
}

/// Candidate argument lists that ask a backend for its model catalog.
pub fn model_list_candidates(kind: BackendKind) -> &'static [&'static [&'static str]] {
    match kind {
        BackendKind::Opencode => &[&["models", "--json"], &["models"]],
        _ => &[&["models", "list", "--json"], &["--list-models"]],
    }
}

/// Candidate argument lists that ask for quota without a session. Kinds
/// whose CLI has no such surface get an empty slate and skip this path.
pub fn status_candidates(kind: BackendKind) -> &'static [&'static [&'static str]] {
    match kind {
        BackendKind::Claude => &[&["usage", "--plain"]],
        BackendKind::Codex => &[&["status"]],
        BackendKind::Gemini => &[&["stats"]],
        BackendKind::Opencode | BackendKind::Qwen => &[],
    }
}

/// Try the model-list candidates for one backend. Empty on total failure.
pub async fn exec_model_ids(kind: BackendKind, limits: ExecLimits) -> Vec<String> {
    let Some(program) = profile(kind).probe.command.first() else {
        return Vec::new();
    };
    for args in model_list_candidates(kind) {
        let Some(output) = run_capture(program, args, limits).await else {
            continue;
        };
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(&output) {
            let ids = model_ids_from_json(kind, &value);
            if !ids.is_empty() {
                debug!(backend = %kind, args = ?args, count = ids.len(), "models via json exec");
                return ids;
            }
        }
        let ids = model_ids_from_text(kind, &output);
        if !ids.is_empty() {
            debug!(backend = %kind, args = ?args, count = ids.len(), "models via text exec");
            return ids;
        }
    }
    Vec::new()
}

/// Try the status candidates for one backend and parse the first output
/// that yields a usable quota shape.
pub async fn exec_quota(kind: BackendKind, limits: ExecLimits) -> Option<QuotaUsage> {
    let program = profile(kind).probe.command.first()?;
    for args in status_candidates(kind) {
        let Some(output) = run_capture(program, args, limits).await else {
            continue;
        };
        if let Some(usage) = parse_quota(kind, &output) {
            debug!(backend = %kind, args = ?args, "quota via exec");
            return Some(usage);
        }
    }
    None
}

/// Run one bounded capture attempt. `None` covers spawn failure, timeout,
/// and wait errors alike; exit status is ignored since some CLIs print
/// usable output and still exit nonzero.
async fn run_capture(program: &str, args: &[&str], limits: ExecLimits) -> Option<String> {
    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .env("NO_COLOR", "1")
        .env("CLICOLOR", "0")
        .env("TERM", "dumb")
        .kill_on_drop(true)
        .spawn();
    let child = match child {
        Ok(child) => child,
        Err(err) => {
            debug!(program, error = %err, "direct exec spawn failed");
            return None;
        }
    };

    match tokio::time::timeout(limits.timeout, child.wait_with_output()).await {
        Ok(Ok(output)) => {
            let mut bytes = output.stdout;
            bytes.truncate(limits.max_output);
            Some(String::from_utf8_lossy(&bytes).into_owned())
        }
        Ok(Err(err)) => {
            debug!(program, error = %err, "direct exec wait failed");
            None
        }
        Err(_) => {
            debug!(program, timeout_secs = limits.timeout.as_secs(), "direct exec timed out");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_model_list_candidates() {
        for kind in BackendKind::ALL {
            assert!(!model_list_candidates(kind).is_empty());
        }
    }

    #[test]
    fn generic_kinds_skip_the_status_exec_path() {
        assert!(status_candidates(BackendKind::Opencode).is_empty());
        assert!(status_candidates(BackendKind::Qwen).is_empty());
        assert!(!status_candidates(BackendKind::Claude).is_empty());
    }

    #[tokio::test]
    async fn run_capture_returns_stdout() {
        let out = run_capture("echo", &["gemini-3-pro-preview"], ExecLimits::default())
            .await
            .unwrap();
        assert!(out.contains("gemini-3-pro-preview"));
    }

    #[tokio::test]
    async fn run_capture_missing_binary_is_none() {
        let out = run_capture("roundhouse-no-such-binary", &[], ExecLimits::default()).await;
        assert!(out.is_none());
    }

    #[tokio::test]
    async fn run_capture_times_out_and_kills() {
        let limits = ExecLimits {
            timeout: Duration::from_millis(100),
            max_output: 1024,
        };
        let started = std::time::Instant::now();
        let out = run_capture("sleep", &["5"], limits).await;
        assert!(out.is_none());
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn run_capture_truncates_output() {
        let limits = ExecLimits {
            timeout: Duration::from_secs(5),
            max_output: 8,
        };
        let out = run_capture("echo", &["0123456789abcdef"], limits).await.unwrap();
        assert_eq!(out.len(), 8);
    }
}
