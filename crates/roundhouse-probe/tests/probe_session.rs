// SPDX-FileCopyrightText: 2026 Roundhouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Probe sessions driven against generated fake backend CLIs.

use std::time::Duration;

use roundhouse_core::{BackendKind, ProbeStatus};
use roundhouse_probe::{run_session, run_sessions, ProbeTiming, SessionSpec};
use roundhouse_test_utils::fixtures;
use roundhouse_test_utils::FakeCli;

fn fast_timing() -> ProbeTiming {
    ProbeTiming {
        ready_idle: Duration::from_millis(200),
        inter_command_delay: Duration::from_millis(300),
        flush_delay: Duration::from_millis(200),
        hard_timeout: Duration::from_secs(10),
    }
}

fn spec_for(command: Vec<String>, timing: ProbeTiming) -> SessionSpec {
    SessionSpec {
        backend: BackendKind::Claude,
        command,
        model_command: "/model".to_string(),
        status_command: "/usage".to_string(),
        timing,
    }
}

#[tokio::test]
async fn tty_rejecting_backend_resolves_error_quickly() {
    let fake = FakeCli::new()
        .reject_tty("Error: stdin is not a terminal")
        .build()
        .expect("build fake cli");

    let spec = spec_for(fake.command(), ProbeTiming::default());
    let outcome = run_session(&spec).await;

    assert_eq!(outcome.status, ProbeStatus::Error);
    assert!(outcome.stderr.contains("not a terminal"));
    assert!(
        outcome.duration < Duration::from_secs(2),
        "tty rejection should resolve early, took {:?}",
        outcome.duration
    );
}

#[tokio::test]
async fn scripted_backend_walks_the_full_dialogue() {
    let fake = FakeCli::new()
        .banner("claude ready\n")
        .on_model(fixtures::CLAUDE_MODEL_PANEL)
        .on_status(fixtures::CLAUDE_USAGE_PANEL)
        .build()
        .expect("build fake cli");

    let spec = spec_for(fake.command(), fast_timing());
    let outcome = run_session(&spec).await;

    assert_eq!(outcome.status, ProbeStatus::Ok);
    assert!(outcome.transcript.contains("claude ready"));
    assert!(outcome.transcript.contains("claude-opus-4-6"));
    assert!(outcome.transcript.contains("Current week (Sonnet)"));
}

#[tokio::test]
async fn backend_exit_resolves_ok_with_captured_output() {
    let fake = FakeCli::new()
        .banner("short-lived banner\n")
        .exit_after_banner()
        .build()
        .expect("build fake cli");

    let spec = spec_for(fake.command(), fast_timing());
    let outcome = run_session(&spec).await;

    assert_eq!(outcome.status, ProbeStatus::Ok);
    assert!(outcome.transcript.contains("short-lived banner"));
}

#[tokio::test]
async fn hanging_backend_hits_the_hard_ceiling() {
    let fake = FakeCli::new()
        .banner("warming up\n")
        .hang()
        .build()
        .expect("build fake cli");

    let timing = ProbeTiming {
        ready_idle: Duration::from_secs(30),
        inter_command_delay: Duration::from_secs(30),
        flush_delay: Duration::from_secs(30),
        hard_timeout: Duration::from_millis(800),
    };
    let spec = spec_for(fake.command(), timing);
    let outcome = run_session(&spec).await;

    assert_eq!(outcome.status, ProbeStatus::Timeout);
    assert!(outcome.duration >= Duration::from_millis(800));
}

#[tokio::test]
async fn sessions_run_concurrently() {
    let slow = FakeCli::new()
        .banner("slow\n")
        .hang()
        .build()
        .expect("build fake cli");
    let fast = FakeCli::new()
        .banner("fast\n")
        .exit_after_banner()
        .build()
        .expect("build fake cli");

    let ceiling = ProbeTiming {
        ready_idle: Duration::from_secs(30),
        inter_command_delay: Duration::from_secs(30),
        flush_delay: Duration::from_secs(30),
        hard_timeout: Duration::from_millis(900),
    };
    let specs = vec![
        spec_for(slow.command(), ceiling),
        spec_for(fast.command(), fast_timing()),
    ];

    let started = std::time::Instant::now();
    let outcomes = run_sessions(&specs).await;
    let elapsed = started.elapsed();

    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].status, ProbeStatus::Timeout);
    assert_eq!(outcomes[1].status, ProbeStatus::Ok);
    // Bounded by the slowest session, not the sum of both.
    assert!(elapsed < Duration::from_secs(5), "took {elapsed:?}");
}
