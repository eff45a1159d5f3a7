// SPDX-FileCopyrightText: 2026 Roundhouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Profile types: the static, compiled-in description of one backend.

use roundhouse_core::ModelTier;

/// Relative strength of a backend per work area, each in [0, 1].
#[derive(Debug, Clone, Copy)]
pub struct Strengths {
    pub coding: f32,
    pub review: f32,
    pub testing: f32,
    pub research: f32,
    pub writing: f32,
    pub planning: f32,
    pub multimodal: f32,
    pub tool_use: f32,
    pub long_context: f32,
    pub cost_efficiency: f32,
}

/// A model in a backend's curated lineup.
#[derive(Debug, Clone, Copy)]
pub struct ProfileModel {
    pub id: &'static str,
    pub label: &'static str,
    pub tier: ModelTier,
    pub context_window: u32,
    /// USD per million input tokens.
    pub input_cost_per_mtok: f64,
    /// USD per million output tokens.
    pub output_cost_per_mtok: f64,
}

/// Interface capabilities of the backend CLI.
#[derive(Debug, Clone, Copy)]
pub struct Features {
    pub piped_prompts: bool,
    pub streaming: bool,
    pub tool_protocol: bool,
    pub image_input: bool,
    pub web_search: bool,
    pub code_execution: bool,
    pub session_resume: bool,
}

/// How to probe this backend interactively.
#[derive(Debug, Clone, Copy)]
pub struct ProbeHints {
    /// Launch argv (no shell interpretation).
    pub command: &'static [&'static str],
    /// Slash command that lists or switches models.
    pub model_command: &'static str,
    /// Slash command that reports usage/quota.
    pub status_command: &'static str,
    /// Absolute ceiling for one probe session.
    pub hard_timeout_secs: u64,
}

/// Everything Roundhouse knows statically about one backend.
#[derive(Debug, Clone, Copy)]
pub struct BackendProfile {
    pub display_name: &'static str,
    pub strengths: Strengths,
    pub models: &'static [ProfileModel],
    pub features: Features,
    pub limitations: &'static [&'static str],
    pub probe: ProbeHints,
    pub default_model: Option<&'static str>,
    pub background_model: Option<&'static str>,
}

impl BackendProfile {
    /// First model of the given tier, if the lineup has one.
    pub fn model_for_tier(&self, tier: ModelTier) -> Option<&'static ProfileModel> {
        self.models.iter().find(|m| m.tier == tier)
    }

    pub fn model_by_id(&self, id: &str) -> Option<&'static ProfileModel> {
        self.models.iter().find(|m| m.id == id)
    }
}
