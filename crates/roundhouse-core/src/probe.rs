// SPDX-FileCopyrightText: 2026 Roundhouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Probe results: what an interactive session against a backend CLI produced.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::backend::BackendKind;

/// Terminal status of a probe session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    /// Session ran to completion (or the process exited on its own).
    Ok,
    /// Hard ceiling elapsed before the session finished.
    Timeout,
    /// Spawn failure, tty rejection, or another fatal condition.
    Error,
}

impl ProbeStatus {
    pub fn is_ok(self) -> bool {
        matches!(self, ProbeStatus::Ok)
    }
}

/// Outcome of the model-listing part of a probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelProbe {
    pub status: ProbeStatus,
    /// ANSI-scrubbed session transcript.
    pub transcript: String,
    /// Model ids recognized in the transcript, first-seen order, deduped.
    pub confirmed_models: Vec<String>,
}

/// Outcome of the status/usage part of a probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusProbe {
    pub status: ProbeStatus,
    /// ANSI-scrubbed session transcript.
    pub transcript: String,
}

/// Everything one probe pass learned about one backend. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeReport {
    pub backend: BackendKind,
    pub model_probe: ModelProbe,
    pub status_probe: StatusProbe,
    pub duration_ms: u64,
    pub timestamp: DateTime<Utc>,
}

impl ProbeReport {
    /// The backend answered with at least one recognizable model id.
    pub fn confirmed(&self) -> bool {
        !self.model_probe.confirmed_models.is_empty()
    }

    /// The session reached a non-error terminal state.
    pub fn responsive(&self) -> bool {
        self.model_probe.status.is_ok() || self.status_probe.status.is_ok()
    }
}
