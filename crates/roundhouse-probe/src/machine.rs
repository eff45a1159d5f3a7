// SPDX-FileCopyrightText: 2026 Roundhouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Probe session state machine.
//!
//! A probe session walks a fixed dialogue: wait for the CLI's startup output
//! to go quiet, send the model command, send the status command, close stdin,
//! capture trailing output, resolve. The transitions here are pure values so
//! the dialogue can be tested without spawning processes; the driver in
//! `session.rs` owns the clock and the child.

use std::time::Duration;

/// Timing knobs for one probe session.
#[derive(Debug, Clone, Copy)]
pub struct ProbeTiming {
    /// Quiet window on stdout before the CLI counts as ready. Output while
    /// waiting re-arms this window.
    pub ready_idle: Duration,
    /// Wait after sending each slash command before the next step.
    pub inter_command_delay: Duration,
    /// Final capture window after stdin closes.
    pub flush_delay: Duration,
    /// Absolute ceiling for the whole session.
    pub hard_timeout: Duration,
}

impl Default for ProbeTiming {
    fn default() -> Self {
        Self {
            ready_idle: Duration::from_millis(1200),
            inter_command_delay: Duration::from_millis(3000),
            flush_delay: Duration::from_millis(1500),
            hard_timeout: Duration::from_secs(30),
        }
    }
}

impl ProbeTiming {
    /// The window the driver waits out while in `phase`.
    pub fn window(&self, phase: Phase) -> Duration {
        match phase {
            Phase::WaitingReady => self.ready_idle,
            Phase::AfterModel | Phase::AfterStatus => self.inter_command_delay,
            Phase::Done => self.flush_delay,
        }
    }
}

/// Where a probe session is in its scripted dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Startup output settling; the idle window re-arms on every chunk.
    WaitingReady,
    /// Model command sent; waiting out its render window.
    AfterModel,
    /// Status command sent; waiting out its render window.
    AfterStatus,
    /// Stdin closed; trailing output drains until the flush window ends.
    Done,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::WaitingReady => write!(f, "waiting_ready"),
            Phase::AfterModel => write!(f, "after_model"),
            Phase::AfterStatus => write!(f, "after_status"),
            Phase::Done => write!(f, "done"),
        }
    }
}

/// What the driver must do when a phase window elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineAction {
    /// Write the model slash command to stdin.
    SendModelCommand,
    /// Write the status slash command to stdin.
    SendStatusCommand,
    /// Drop the child's stdin handle.
    CloseStdin,
    /// Resolve the session `Ok`.
    Resolve,
}

/// The phase and action produced by a deadline expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseStep {
    pub next: Phase,
    pub action: DeadlineAction,
}

impl Phase {
    pub const START: Phase = Phase::WaitingReady;

    /// Advance on deadline expiry. Total over all phases; `Done` resolves.
    pub fn on_deadline(self) -> PhaseStep {
        match self {
            Phase::WaitingReady => PhaseStep {
                next: Phase::AfterModel,
                action: DeadlineAction::SendModelCommand,
            },
            Phase::AfterModel => PhaseStep {
                next: Phase::AfterStatus,
                action: DeadlineAction::SendStatusCommand,
            },
            Phase::AfterStatus => PhaseStep {
                next: Phase::Done,
                action: DeadlineAction::CloseStdin,
            },
            Phase::Done => PhaseStep {
                next: Phase::Done,
                action: DeadlineAction::Resolve,
            },
        }
    }

    /// Stdout re-arms the deadline only while waiting for readiness. Later
    /// phases run on fixed windows regardless of output.
    pub fn rearms_on_output(self) -> bool {
        matches!(self, Phase::WaitingReady)
    }

    /// Stderr is screened for tty rejection only before the dialogue starts;
    /// once commands are flowing, stderr chatter is just captured.
    pub fn screens_stderr(self) -> bool {
        matches!(self, Phase::WaitingReady)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialogue_advances_in_fixed_order() {
        let step = Phase::WaitingReady.on_deadline();
        assert_eq!(step.next, Phase::AfterModel);
        assert_eq!(step.action, DeadlineAction::SendModelCommand);

        let step = Phase::AfterModel.on_deadline();
        assert_eq!(step.next, Phase::AfterStatus);
        assert_eq!(step.action, DeadlineAction::SendStatusCommand);

        let step = Phase::AfterStatus.on_deadline();
        assert_eq!(step.next, Phase::Done);
        assert_eq!(step.action, DeadlineAction::CloseStdin);

        let step = Phase::Done.on_deadline();
        assert_eq!(step.next, Phase::Done);
        assert_eq!(step.action, DeadlineAction::Resolve);
    }

    #[test]
    fn only_readiness_phase_rearms_on_output() {
        assert!(Phase::WaitingReady.rearms_on_output());
        assert!(!Phase::AfterModel.rearms_on_output());
        assert!(!Phase::AfterStatus.rearms_on_output());
        assert!(!Phase::Done.rearms_on_output());
    }

    #[test]
    fn stderr_screening_stops_once_commands_flow() {
        assert!(Phase::WaitingReady.screens_stderr());
        assert!(!Phase::AfterModel.screens_stderr());
        assert!(!Phase::Done.screens_stderr());
    }

    #[test]
    fn windows_follow_the_phase() {
        let timing = ProbeTiming::default();
        assert_eq!(
            timing.window(Phase::WaitingReady),
            Duration::from_millis(1200)
        );
        assert_eq!(
            timing.window(Phase::AfterModel),
            Duration::from_millis(3000)
        );
        assert_eq!(
            timing.window(Phase::AfterStatus),
            Duration::from_millis(3000)
        );
        assert_eq!(timing.window(Phase::Done), Duration::from_millis(1500));
    }

    #[test]
    fn default_ceiling_is_thirty_seconds() {
        assert_eq!(ProbeTiming::default().hard_timeout, Duration::from_secs(30));
    }

    #[test]
    fn phases_render_snake_case() {
        assert_eq!(Phase::WaitingReady.to_string(), "waiting_ready");
        assert_eq!(Phase::AfterStatus.to_string(), "after_status");
    }
}
