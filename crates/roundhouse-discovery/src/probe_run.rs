// SPDX-FileCopyrightText: 2026 Roundhouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One full probe pass: sessions for every requested backend, transcript
//! extraction, cache absorption, and the run log.

use std::path::Path;
use std::time::Duration;

use chrono::Utc;
use tracing::info;

use roundhouse_config::model::ProbeConfig;
use roundhouse_core::{BackendKind, ModelProbe, ProbeReport, StatusProbe};
use roundhouse_probe::{run_sessions, ProbeTiming, SessionSpec};
use roundhouse_registry::profile;

use crate::extract::model_ids_from_text;
use crate::log::write_probe_log;
use crate::service::DiscoveryService;

/// Build one session spec per backend from registry hints and configured
/// timing. The hard ceiling stays per-backend; gemini's is the long one.
pub fn session_specs(probe: &ProbeConfig, kinds: &[BackendKind]) -> Vec<SessionSpec> {
    kinds
        .iter()
        .map(|&kind| {
            let hints = &profile(kind).probe;
            SessionSpec {
                backend: kind,
                command: hints.command.iter().map(|s| s.to_string()).collect(),
                model_command: hints.model_command.to_string(),
                status_command: hints.status_command.to_string(),
                timing: ProbeTiming {
                    ready_idle: Duration::from_millis(probe.ready_idle_ms),
                    inter_command_delay: Duration::from_millis(probe.inter_command_delay_ms),
                    flush_delay: Duration::from_millis(probe.flush_delay_ms),
                    hard_timeout: Duration::from_secs(hints.hard_timeout_secs),
                },
            }
        })
        .collect()
}

/// Run the given session specs, absorb the results, write the log, and
/// return the reports. Split from [`run_probe_pass`] so tests can inject
/// fake-CLI specs.
pub async fn run_probe_pass_with(
    service: &DiscoveryService,
    specs: Vec<SessionSpec>,
    workspace_root: Option<&Path>,
) -> Vec<ProbeReport> {
    let outcomes = run_sessions(&specs).await;

    let reports: Vec<ProbeReport> = outcomes
        .into_iter()
        .map(|outcome| {
            let confirmed = model_ids_from_text(outcome.backend, &outcome.transcript);
            ProbeReport {
                backend: outcome.backend,
                model_probe: ModelProbe {
                    status: outcome.status,
                    transcript: outcome.transcript.clone(),
                    confirmed_models: confirmed,
                },
                // Both commands ran in the one session; the transcript is
                // shared between the two probe views.
                status_probe: StatusProbe {
                    status: outcome.status,
                    transcript: outcome.transcript,
                },
                duration_ms: outcome.duration.as_millis() as u64,
                timestamp: Utc::now(),
            }
        })
        .collect();

    service.absorb_reports(&reports);
    write_probe_log(workspace_root, &reports);

    let confirmed = reports.iter().filter(|r| r.confirmed()).count();
    info!(
        backends = reports.len(),
        confirmed, "probe pass complete"
    );
    reports
}

/// Probe every requested backend with its registry launch command.
pub async fn run_probe_pass(
    service: &DiscoveryService,
    probe: &ProbeConfig,
    kinds: &[BackendKind],
    workspace_root: Option<&Path>,
) -> Vec<ProbeReport> {
    run_probe_pass_with(service, session_specs(probe, kinds), workspace_root).await
}
