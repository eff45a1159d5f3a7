// SPDX-FileCopyrightText: 2026 Roundhouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plain-text probe run logs under the workspace.
//!
//! One file per probe pass, named with the run's UTC timestamp, holding
//! per-backend status, duration, confirmed models and a truncated
//! transcript. Writing is best-effort: any failure is traced and swallowed,
//! a missing log never fails the probe run.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::debug;

use roundhouse_core::ProbeReport;

/// Workspace-relative directory the logs land in.
pub const LOG_SUBDIR: &str = ".roundhouse/probe-logs";

/// Transcript excerpt ceiling per backend, in characters.
const TRANSCRIPT_LIMIT: usize = 2000;

/// Write the probe log for one pass. Returns the path on success, `None`
/// when the workspace is unset or any filesystem step fails.
pub fn write_probe_log(workspace_root: Option<&Path>, reports: &[ProbeReport]) -> Option<PathBuf> {
    let root = workspace_root?;
    let dir = root.join(LOG_SUBDIR);
    if let Err(err) = std::fs::create_dir_all(&dir) {
        debug!(dir = %dir.display(), error = %err, "probe log dir creation failed");
        return None;
    }

    let stamp = Utc::now().format("%Y%m%dT%H%M%SZ");
    let path = dir.join(format!("probe-{stamp}.log"));
    let body = render(reports);
    match std::fs::write(&path, body) {
        Ok(()) => Some(path),
        Err(err) => {
            debug!(path = %path.display(), error = %err, "probe log write failed");
            None
        }
    }
}

fn render(reports: &[ProbeReport]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "roundhouse probe run {}", Utc::now().to_rfc3339());
    let _ = writeln!(out, "backends: {}", reports.len());

    for report in reports {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "== {} : {} in {} ms",
            report.backend, report.model_probe.status, report.duration_ms
        );
        if report.model_probe.confirmed_models.is_empty() {
            let _ = writeln!(out, "confirmed models: none");
        } else {
            let _ = writeln!(
                out,
                "confirmed models: {}",
                report.model_probe.confirmed_models.join(", ")
            );
        }
        let _ = writeln!(out, "--- transcript ---");
        let _ = writeln!(out, "{}", truncate_chars(&report.model_probe.transcript));
    }
    out
}

/// Cut at a char boundary so multi-byte output cannot split a code point.
fn truncate_chars(text: &str) -> String {
    match text.char_indices().nth(TRANSCRIPT_LIMIT) {
        Some((idx, _)) => format!("{}\n[transcript truncated]", &text[..idx]),
        None => text.to_string(),
    }
}
