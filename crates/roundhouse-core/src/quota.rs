// SPDX-FileCopyrightText: 2026 Roundhouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Quota snapshots: how much of each rate-limit window a backend has used.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::backend::BackendKind;

/// One rate-limit window as the backend reports it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageWindow {
    /// Percent of the window consumed, always within 0..=100. Absent when the
    /// backend reported no usable number (bars-only output, parse failure).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_pct: Option<u8>,
    /// Reset phrase verbatim from backend output, e.g. `22h 21m` or
    /// `Oct 14, 3:00am`. Display-only; never interpreted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resets_at: Option<String>,
}

impl UsageWindow {
    pub fn used(pct: u8) -> Self {
        UsageWindow {
            used_pct: Some(pct.min(100)),
            resets_at: None,
        }
    }

    pub fn with_reset(mut self, resets_at: impl Into<String>) -> Self {
        self.resets_at = Some(resets_at.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.used_pct.is_none() && self.resets_at.is_none()
    }
}

/// Per-backend quota shape. Claude reports three named windows; every other
/// backend collapses to a generic session/week pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum QuotaUsage {
    Claude {
        session: UsageWindow,
        week_all: UsageWindow,
        week_sonnet: UsageWindow,
    },
    Generic {
        session: UsageWindow,
        week: UsageWindow,
    },
}

impl QuotaUsage {
    /// Named windows in report order.
    pub fn windows(&self) -> Vec<(&'static str, &UsageWindow)> {
        match self {
            QuotaUsage::Claude {
                session,
                week_all,
                week_sonnet,
            } => vec![
                ("session", session),
                ("week (all models)", week_all),
                ("week (sonnet)", week_sonnet),
            ],
            QuotaUsage::Generic { session, week } => {
                vec![("session", session), ("week", week)]
            }
        }
    }

    /// Highest used percentage across windows; `None` when no window
    /// reported a number.
    pub fn worst_used_pct(&self) -> Option<u8> {
        self.windows()
            .iter()
            .filter_map(|(_, w)| w.used_pct)
            .max()
    }
}

/// How a quota snapshot was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum QuotaSource {
    /// Parsed from an interactive probe transcript.
    Probe,
    /// Parsed from a direct CLI invocation.
    Cli,
    /// Pushed in by an external caller.
    External,
}

/// Quota state for one backend at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotaSnapshot {
    pub backend: BackendKind,
    pub usage: QuotaUsage,
    pub fetched_at: DateTime<Utc>,
    pub source: QuotaSource,
}

impl QuotaSnapshot {
    pub fn new(backend: BackendKind, usage: QuotaUsage, source: QuotaSource) -> Self {
        QuotaSnapshot {
            backend,
            usage,
            fetched_at: Utc::now(),
            source,
        }
    }

    pub fn worst_used_pct(&self) -> Option<u8> {
        self.usage.worst_used_pct()
    }

    /// Availability in [0, 1]: 1.0 untouched, 0.0 exhausted. A snapshot with
    /// no parsed percentages scores 1.0; unknown is not evidence of
    /// exhaustion.
    pub fn availability_score(&self) -> f32 {
        match self.worst_used_pct() {
            Some(pct) => 1.0 - f32::from(pct) / 100.0,
            None => 1.0,
        }
    }
}
