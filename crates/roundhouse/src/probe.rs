// SPDX-FileCopyrightText: 2026 Roundhouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `roundhouse probe` command implementation.
//!
//! Runs one interactive probe session per backend, absorbs the results into
//! the discovery caches, writes the probe log, and prints a per-backend
//! summary. Full transcripts land in the log file, not on the terminal.

use std::io::IsTerminal;
use std::path::Path;

use roundhouse_config::model::RoundhouseConfig;
use roundhouse_core::{BackendKind, ProbeReport, ProbeStatus, RoundhouseError};
use roundhouse_discovery::{run_probe_pass, DiscoveryService};
use serde::Serialize;

use crate::args::resolve_backends;

/// Compact per-backend summary for `--json` mode.
#[derive(Debug, Serialize)]
struct ProbeSummary {
    backend: BackendKind,
    status: ProbeStatus,
    duration_ms: u64,
    confirmed_models: Vec<String>,
}

impl ProbeSummary {
    fn from_report(report: &ProbeReport) -> Self {
        ProbeSummary {
            backend: report.backend,
            status: report.model_probe.status,
            duration_ms: report.duration_ms,
            confirmed_models: report.model_probe.confirmed_models.clone(),
        }
    }
}

/// Run the `roundhouse probe` command.
pub async fn run_probe(
    config: &RoundhouseConfig,
    backends: &[String],
    json: bool,
    plain: bool,
) -> Result<(), RoundhouseError> {
    let kinds = if backends.is_empty() {
        BackendKind::ALL.to_vec()
    } else {
        resolve_backends(backends)?
    };

    let service = DiscoveryService::new(config.discovery.clone());
    let workspace = Path::new(config.workspace.root.as_deref().unwrap_or("."));
    let reports = run_probe_pass(&service, &config.probe, &kinds, Some(workspace)).await;

    if json {
        let summaries: Vec<ProbeSummary> =
            reports.iter().map(ProbeSummary::from_report).collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&summaries).unwrap_or_else(|_| "[]".to_string())
        );
        return Ok(());
    }

    let use_color = !plain && std::io::stdout().is_terminal();
    println!();
    println!("  roundhouse probe");
    println!("  {}", "-".repeat(50));

    for report in &reports {
        let glyph = status_glyph(report.model_probe.status, use_color);
        let models = if report.model_probe.confirmed_models.is_empty() {
            "no models confirmed".to_string()
        } else {
            report.model_probe.confirmed_models.join(", ")
        };
        println!(
            "    {glyph} {:<10} {:>6} ms  {models}",
            report.backend.to_string(),
            report.duration_ms
        );
    }

    println!();
    let confirmed = reports.iter().filter(|r| r.confirmed()).count();
    println!(
        "  {confirmed} of {} backends confirmed models.",
        reports.len()
    );
    println!();

    Ok(())
}

/// Status marker, colored when the terminal supports it.
fn status_glyph(status: ProbeStatus, use_color: bool) -> String {
    if use_color {
        use colored::Colorize;
        match status {
            ProbeStatus::Ok => "✓".green().to_string(),
            ProbeStatus::Timeout => "!".yellow().to_string(),
            ProbeStatus::Error => "✗".red().to_string(),
        }
    } else {
        match status {
            ProbeStatus::Ok => "[OK]     ".to_string(),
            ProbeStatus::Timeout => "[TIMEOUT]".to_string(),
            ProbeStatus::Error => "[FAIL]   ".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_glyphs_are_fixed_width() {
        let widths: Vec<usize> = [ProbeStatus::Ok, ProbeStatus::Timeout, ProbeStatus::Error]
            .iter()
            .map(|s| status_glyph(*s, false).len())
            .collect();
        assert!(widths.iter().all(|w| *w == widths[0]));
    }

    #[test]
    fn probe_summary_serializes_compactly() {
        let summary = ProbeSummary {
            backend: BackendKind::Claude,
            status: ProbeStatus::Ok,
            duration_ms: 1200,
            confirmed_models: vec!["claude-opus-4-6".to_string()],
        };
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"backend\":\"claude\""));
        assert!(json.contains("\"status\":\"ok\""));
        assert!(json.contains("claude-opus-4-6"));
        assert!(!json.contains("transcript"));
    }
}
