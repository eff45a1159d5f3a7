// SPDX-FileCopyrightText: 2026 Roundhouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Liveness probing for backend CLIs.
//!
//! A probe session launches a backend's interactive CLI with piped stdio,
//! waits for its banner to settle, then walks a fixed dialogue: the model
//! command, the status command, stdin close, resolve. The dialogue is a
//! pure phase machine (`machine`); the async driver (`session`) owns the
//! child process and the timers. Output is captured with ANSI escapes
//! stripped (`scrub`) so downstream parsers see plain text.

pub mod machine;
pub mod scrub;
pub mod session;

pub use machine::{DeadlineAction, Phase, PhaseStep, ProbeTiming};
pub use scrub::{is_tty_rejection, scrub};
pub use session::{run_session, run_sessions, SessionOutcome, SessionSpec};
