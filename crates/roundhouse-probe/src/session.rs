// SPDX-FileCopyrightText: 2026 Roundhouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Probe session driver: spawns a backend CLI and walks the scripted
//! dialogue from `machine.rs` against it.
//!
//! One task owns the whole session. Every way a session can end (deadline
//! chain completing, hard ceiling, tty rejection, process exit, spawn
//! failure) funnels through a single return path, so a session resolves
//! exactly once and the child is reaped via `kill_on_drop`.

use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::{ChildStdin, Command};
use tokio::time::Instant;
use tracing::{debug, warn};

use roundhouse_core::{BackendKind, ProbeStatus};

use crate::machine::{DeadlineAction, Phase, ProbeTiming};
use crate::scrub::{is_tty_rejection, scrub};

/// Runaway TUIs can repaint megabytes; capture stops growing past this.
const MAX_CAPTURE: usize = 512 * 1024;

/// Everything needed to run one probe session.
#[derive(Debug, Clone)]
pub struct SessionSpec {
    pub backend: BackendKind,
    /// Launch argv; the first element is the program. No shell interpretation.
    pub command: Vec<String>,
    /// Slash command that lists or switches models.
    pub model_command: String,
    /// Slash command that reports usage/quota.
    pub status_command: String,
    pub timing: ProbeTiming,
}

/// Raw result of one scripted session.
#[derive(Debug, Clone)]
pub struct SessionOutcome {
    pub backend: BackendKind,
    pub status: ProbeStatus,
    /// Scrubbed stdout capture.
    pub transcript: String,
    /// Scrubbed stderr capture.
    pub stderr: String,
    pub duration: Duration,
}

/// Run one probe session to completion. Never panics and never hangs past
/// the spec's hard ceiling.
pub async fn run_session(spec: &SessionSpec) -> SessionOutcome {
    let started = Instant::now();
    let (status, stdout_raw, stderr_raw) = drive(spec).await;
    let outcome = SessionOutcome {
        backend: spec.backend,
        status,
        transcript: scrub(&stdout_raw),
        stderr: scrub(&stderr_raw),
        duration: started.elapsed(),
    };
    debug!(
        backend = %outcome.backend,
        status = %outcome.status,
        duration_ms = outcome.duration.as_millis() as u64,
        transcript_bytes = outcome.transcript.len(),
        "probe session finished"
    );
    outcome
}

/// Run many probe sessions concurrently. Sessions share nothing; a slow
/// backend never delays the others.
pub async fn run_sessions(specs: &[SessionSpec]) -> Vec<SessionOutcome> {
    futures::future::join_all(specs.iter().map(run_session)).await
}

async fn drive(spec: &SessionSpec) -> (ProbeStatus, String, String) {
    let Some((program, args)) = spec.command.split_first() else {
        return (
            ProbeStatus::Error,
            String::new(),
            "empty probe command".to_string(),
        );
    };

    let mut child = match Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        // CLIs that honor these emit far less repaint noise.
        .env("NO_COLOR", "1")
        .env("CLICOLOR", "0")
        .env("TERM", "dumb")
        .kill_on_drop(true)
        .spawn()
    {
        Ok(child) => child,
        Err(err) => {
            warn!(backend = %spec.backend, error = %err, "probe spawn failed");
            return (
                ProbeStatus::Error,
                String::new(),
                format!("spawn failed: {err}"),
            );
        }
    };

    // The streams are detached from the child up front so the select loop
    // can poll them while also awaiting process exit.
    let mut stdin = child.stdin.take();
    let mut stdout = match child.stdout.take() {
        Some(s) => s,
        None => {
            return (
                ProbeStatus::Error,
                String::new(),
                "child stdout not captured".to_string(),
            );
        }
    };
    let mut stderr = match child.stderr.take() {
        Some(s) => s,
        None => {
            return (
                ProbeStatus::Error,
                String::new(),
                "child stderr not captured".to_string(),
            );
        }
    };

    let mut phase = Phase::START;
    let mut deadline = Instant::now() + spec.timing.window(phase);
    let hard_deadline = Instant::now() + spec.timing.hard_timeout;

    let mut out_acc: Vec<u8> = Vec::new();
    let mut err_acc: Vec<u8> = Vec::new();
    let mut out_buf = [0u8; 4096];
    let mut err_buf = [0u8; 4096];
    let mut stdout_open = true;
    let mut stderr_open = true;

    loop {
        tokio::select! {
            read = stdout.read(&mut out_buf), if stdout_open => match read {
                Ok(0) => stdout_open = false,
                Ok(n) => {
                    append_capped(&mut out_acc, &out_buf[..n]);
                    if phase.rearms_on_output() {
                        deadline = Instant::now() + spec.timing.window(phase);
                    }
                }
                Err(err) => {
                    debug!(backend = %spec.backend, error = %err, "stdout read failed");
                    stdout_open = false;
                }
            },
            read = stderr.read(&mut err_buf), if stderr_open => match read {
                Ok(0) => stderr_open = false,
                Ok(n) => {
                    append_capped(&mut err_acc, &err_buf[..n]);
                    if phase.screens_stderr()
                        && is_tty_rejection(&String::from_utf8_lossy(&err_acc))
                    {
                        warn!(backend = %spec.backend, "backend rejected non-tty stdin");
                        return (ProbeStatus::Error, lossy(out_acc), lossy(err_acc));
                    }
                }
                Err(err) => {
                    debug!(backend = %spec.backend, error = %err, "stderr read failed");
                    stderr_open = false;
                }
            },
            _ = tokio::time::sleep_until(deadline) => {
                let step = phase.on_deadline();
                match step.action {
                    DeadlineAction::SendModelCommand => {
                        send_line(&mut stdin, &spec.model_command, spec.backend).await;
                    }
                    DeadlineAction::SendStatusCommand => {
                        send_line(&mut stdin, &spec.status_command, spec.backend).await;
                    }
                    DeadlineAction::CloseStdin => {
                        // Dropping the handle sends EOF; interactive CLIs
                        // treat that as a session end.
                        stdin = None;
                    }
                    DeadlineAction::Resolve => {
                        return (ProbeStatus::Ok, lossy(out_acc), lossy(err_acc));
                    }
                }
                phase = step.next;
                deadline = Instant::now() + spec.timing.window(phase);
            },
            _ = tokio::time::sleep_until(hard_deadline) => {
                warn!(
                    backend = %spec.backend,
                    phase = %phase,
                    ceiling_secs = spec.timing.hard_timeout.as_secs(),
                    "probe session hit hard ceiling"
                );
                return (ProbeStatus::Timeout, lossy(out_acc), lossy(err_acc));
            },
            exit = child.wait() => {
                match exit {
                    Ok(status) => {
                        debug!(backend = %spec.backend, code = ?status.code(), "backend exited during probe")
                    }
                    Err(err) => debug!(backend = %spec.backend, error = %err, "wait failed"),
                }
                if stdout_open {
                    drain(&mut stdout, &mut out_acc).await;
                }
                if stderr_open {
                    drain(&mut stderr, &mut err_acc).await;
                }
                return (ProbeStatus::Ok, lossy(out_acc), lossy(err_acc));
            },
        }
    }
}

/// Write a newline-terminated command; failure means the child closed its
/// end, which the exit branch of the select loop will report shortly.
async fn send_line(stdin: &mut Option<ChildStdin>, command: &str, backend: BackendKind) {
    if let Some(handle) = stdin.as_mut() {
        let line = format!("{command}\n");
        if let Err(err) = handle.write_all(line.as_bytes()).await {
            debug!(backend = %backend, command, error = %err, "stdin write failed");
            return;
        }
        if let Err(err) = handle.flush().await {
            debug!(backend = %backend, command, error = %err, "stdin flush failed");
        }
    }
}

/// Pull whatever the pipe still holds after process exit. Bounded so a
/// misbehaving descendant holding the pipe open cannot stall resolution.
async fn drain(stream: &mut (impl AsyncReadExt + Unpin), acc: &mut Vec<u8>) {
    let mut buf = [0u8; 4096];
    for _ in 0..64 {
        match tokio::time::timeout(Duration::from_millis(100), stream.read(&mut buf)).await {
            Ok(Ok(0)) | Ok(Err(_)) | Err(_) => break,
            Ok(Ok(n)) => append_capped(acc, &buf[..n]),
        }
    }
}

fn append_capped(acc: &mut Vec<u8>, chunk: &[u8]) {
    let room = MAX_CAPTURE.saturating_sub(acc.len());
    let take = chunk.len().min(room);
    acc.extend_from_slice(&chunk[..take]);
}

fn lossy(bytes: Vec<u8>) -> String {
    String::from_utf8_lossy(&bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_capped_stops_at_the_ceiling() {
        let mut acc = vec![0u8; MAX_CAPTURE - 2];
        append_capped(&mut acc, b"abcdef");
        assert_eq!(acc.len(), MAX_CAPTURE);
        assert_eq!(&acc[MAX_CAPTURE - 2..], b"ab");
        append_capped(&mut acc, b"ghi");
        assert_eq!(acc.len(), MAX_CAPTURE);
    }

    #[tokio::test]
    async fn empty_command_resolves_error() {
        let spec = SessionSpec {
            backend: BackendKind::Opencode,
            command: vec![],
            model_command: "/model".to_string(),
            status_command: "/status".to_string(),
            timing: ProbeTiming::default(),
        };
        let outcome = run_session(&spec).await;
        assert_eq!(outcome.status, ProbeStatus::Error);
        assert!(outcome.stderr.contains("empty probe command"));
    }

    #[tokio::test]
    async fn missing_binary_resolves_error_not_panic() {
        let spec = SessionSpec {
            backend: BackendKind::Qwen,
            command: vec!["roundhouse-test-no-such-binary".to_string()],
            model_command: "/model".to_string(),
            status_command: "/status".to_string(),
            timing: ProbeTiming::default(),
        };
        let outcome = run_session(&spec).await;
        assert_eq!(outcome.status, ProbeStatus::Error);
        assert!(outcome.stderr.contains("spawn failed"));
    }
}
