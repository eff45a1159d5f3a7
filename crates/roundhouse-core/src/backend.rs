// SPDX-FileCopyrightText: 2026 Roundhouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Backend identity and model-tier vocabulary.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Canonical identity of a supported coding-assistant CLI.
///
/// The set is closed: alias strings from config or user input resolve to one
/// of these kinds (or nothing) at the boundary, so downstream code never
/// carries unvalidated backend names.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Claude,
    Codex,
    Gemini,
    Opencode,
    Qwen,
}

impl BackendKind {
    /// Every supported kind, in display order.
    pub const ALL: [BackendKind; 5] = [
        BackendKind::Claude,
        BackendKind::Codex,
        BackendKind::Gemini,
        BackendKind::Opencode,
        BackendKind::Qwen,
    ];

    /// Kinds with curated model tables and rich quota reporting.
    pub const FIRST_CLASS: [BackendKind; 3] =
        [BackendKind::Claude, BackendKind::Codex, BackendKind::Gemini];

    pub fn is_first_class(self) -> bool {
        Self::FIRST_CLASS.contains(&self)
    }
}

/// Coarse capability tier of a model within one backend's lineup.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ModelTier {
    Fast,
    Standard,
    Advanced,
}
