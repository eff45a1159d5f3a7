// SPDX-FileCopyrightText: 2026 Roundhouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Roundhouse integration tests.
//!
//! Provides fake backend CLI builders and shared output fixtures for fast,
//! deterministic, CI-runnable tests without any real assistant CLI
//! installed.
//!
//! # Components
//!
//! - [`FakeCli`] - generates interactive `sh` scripts that act like backend
//!   CLIs (banner, `/model` and `/status` responses, tty-rejection and hang
//!   variants)
//! - [`fixtures`] - canned CLI output shared by the parser test suites

pub mod fake_cli;
pub mod fixtures;

pub use fake_cli::{FakeCli, FakeCliHandle};
