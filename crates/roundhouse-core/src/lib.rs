// SPDX-FileCopyrightText: 2026 Roundhouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Roundhouse backend coordinator.
//!
//! This crate provides the shared vocabulary types (backend kinds, model
//! catalogs, quota snapshots, probe reports) and the workspace error type.
//! Every other Roundhouse crate builds on these definitions.

pub mod backend;
pub mod catalog;
pub mod error;
pub mod probe;
pub mod quota;

// Re-export key items at crate root for ergonomic imports.
pub use backend::{BackendKind, ModelTier};
pub use catalog::{CatalogSource, ModelCatalog, ModelEntry};
pub use error::RoundhouseError;
pub use probe::{ModelProbe, ProbeReport, ProbeStatus, StatusProbe};
pub use quota::{QuotaSnapshot, QuotaSource, QuotaUsage, UsageWindow};
