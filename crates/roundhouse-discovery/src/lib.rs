// SPDX-FileCopyrightText: 2026 Roundhouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model and quota discovery for backend CLIs.
//!
//! The entry point is [`DiscoveryService`]: time-boxed caches over a fetch
//! chain of provider-side cache files, direct CLI invocation, and compiled-in
//! fallback lists, plus absorption of interactive probe results. A full
//! probe pass (sessions for every backend, extraction, absorption, run log)
//! lives in [`probe_run`].

pub mod cache;
pub mod exec;
pub mod extract;
pub mod files;
pub mod log;
pub mod probe_run;
pub mod quota;
pub mod service;

pub use cache::DiscoveryCache;
pub use exec::ExecLimits;
pub use probe_run::{run_probe_pass, run_probe_pass_with, session_specs};
pub use service::DiscoveryService;
