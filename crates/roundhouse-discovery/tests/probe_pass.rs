// SPDX-FileCopyrightText: 2026 Roundhouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end probe pass against generated fake CLIs: sessions, extraction,
//! cache absorption, and the run log.

use std::time::Duration;

use roundhouse_config::model::DiscoveryConfig;
use roundhouse_core::{BackendKind, CatalogSource, ProbeStatus, QuotaSource};
use roundhouse_discovery::{run_probe_pass_with, DiscoveryService};
use roundhouse_probe::{ProbeTiming, SessionSpec};
use roundhouse_test_utils::fixtures;
use roundhouse_test_utils::FakeCli;
use tempfile::TempDir;

fn fast_timing() -> ProbeTiming {
    ProbeTiming {
        ready_idle: Duration::from_millis(200),
        inter_command_delay: Duration::from_millis(300),
        flush_delay: Duration::from_millis(200),
        hard_timeout: Duration::from_secs(10),
    }
}

#[tokio::test]
async fn probe_pass_fills_caches_and_writes_the_log() {
    let claude_fake = FakeCli::new()
        .banner("claude starting...\n")
        .on_model(fixtures::CLAUDE_MODEL_PANEL)
        .on_status(fixtures::CLAUDE_USAGE_PANEL)
        .build()
        .expect("build fake cli");

    let specs = vec![SessionSpec {
        backend: BackendKind::Claude,
        command: claude_fake.command(),
        model_command: "/model".to_string(),
        status_command: "/usage".to_string(),
        timing: fast_timing(),
    }];

    let service = DiscoveryService::new(DiscoveryConfig::default());
    let workspace = TempDir::new().unwrap();
    let reports = run_probe_pass_with(&service, specs, Some(workspace.path())).await;

    assert_eq!(reports.len(), 1);
    let report = &reports[0];
    assert_eq!(report.model_probe.status, ProbeStatus::Ok);
    assert_eq!(
        report.model_probe.confirmed_models,
        vec!["claude-opus-4-6", "claude-sonnet-4-6", "claude-haiku-4-5"]
    );

    // Catalog absorbed as dynamic, enriched with static labels.
    let catalog = service.model_catalog(BackendKind::Claude).await;
    assert_eq!(catalog.source, CatalogSource::Dynamic);
    assert_eq!(catalog.models.len(), 3);
    assert_eq!(catalog.models[0].label.as_deref(), Some("Opus 4.6"));

    // Quota parsed out of the shared session transcript.
    let quota = service.quota(BackendKind::Claude).await.unwrap();
    assert_eq!(quota.source, QuotaSource::Probe);
    assert_eq!(quota.worst_used_pct(), Some(31));

    // Run log written under the workspace.
    let log_dir = workspace.path().join(".roundhouse/probe-logs");
    let entries: Vec<_> = std::fs::read_dir(&log_dir).unwrap().collect();
    assert_eq!(entries.len(), 1);
    let body = std::fs::read_to_string(entries[0].as_ref().unwrap().path()).unwrap();
    assert!(body.contains("claude-opus-4-6"));
}

#[tokio::test]
async fn unconfirmed_backend_leaves_caches_alone() {
    let mute_fake = FakeCli::new()
        .banner("no models to see here\n")
        .exit_after_banner()
        .build()
        .expect("build fake cli");

    let specs = vec![SessionSpec {
        backend: BackendKind::Codex,
        command: mute_fake.command(),
        model_command: "/model".to_string(),
        status_command: "/status".to_string(),
        timing: fast_timing(),
    }];

    let service = DiscoveryService::new(DiscoveryConfig::default());
    let reports = run_probe_pass_with(&service, specs, None).await;

    assert_eq!(reports.len(), 1);
    assert!(!reports[0].confirmed());
    assert!(service.cache().models(BackendKind::Codex).unwrap().is_none());
    assert!(service.cache().quota(BackendKind::Codex).unwrap().is_none());
}
