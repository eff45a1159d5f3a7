// SPDX-FileCopyrightText: 2026 Roundhouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static backend profiles.
//!
//! Model pricing is USD per million tokens, checked against the vendor
//! pricing pages on 2026-08-01. Context windows are the documented model
//! limits, not CLI-imposed caps.

use roundhouse_core::{BackendKind, ModelTier};

use crate::profile::{BackendProfile, Features, ProbeHints, ProfileModel, Strengths};

static CLAUDE_MODELS: &[ProfileModel] = &[
    ProfileModel {
        id: "claude-opus-4-6",
        label: "Claude Opus 4.6",
        tier: ModelTier::Advanced,
        context_window: 200_000,
        input_cost_per_mtok: 5.0,
        output_cost_per_mtok: 25.0,
    },
    ProfileModel {
        id: "claude-sonnet-4-6",
        label: "Claude Sonnet 4.6",
        tier: ModelTier::Standard,
        context_window: 200_000,
        input_cost_per_mtok: 3.0,
        output_cost_per_mtok: 15.0,
    },
    ProfileModel {
        id: "claude-haiku-4-5",
        label: "Claude Haiku 4.5",
        tier: ModelTier::Fast,
        context_window: 200_000,
        input_cost_per_mtok: 1.0,
        output_cost_per_mtok: 5.0,
    },
];

static CODEX_MODELS: &[ProfileModel] = &[
    ProfileModel {
        id: "gpt-5.1-codex-max",
        label: "GPT-5.1 Codex Max",
        tier: ModelTier::Advanced,
        context_window: 400_000,
        input_cost_per_mtok: 1.25,
        output_cost_per_mtok: 10.0,
    },
    ProfileModel {
        id: "gpt-5.1-codex",
        label: "GPT-5.1 Codex",
        tier: ModelTier::Standard,
        context_window: 400_000,
        input_cost_per_mtok: 1.25,
        output_cost_per_mtok: 10.0,
    },
    ProfileModel {
        id: "gpt-5.1-codex-mini",
        label: "GPT-5.1 Codex Mini",
        tier: ModelTier::Fast,
        context_window: 400_000,
        input_cost_per_mtok: 0.25,
        output_cost_per_mtok: 2.0,
    },
];

static GEMINI_MODELS: &[ProfileModel] = &[
    ProfileModel {
        id: "gemini-3-pro-preview",
        label: "Gemini 3 Pro",
        tier: ModelTier::Advanced,
        context_window: 1_048_576,
        input_cost_per_mtok: 2.0,
        output_cost_per_mtok: 12.0,
    },
    ProfileModel {
        id: "gemini-3-flash-preview",
        label: "Gemini 3 Flash",
        tier: ModelTier::Standard,
        context_window: 1_048_576,
        input_cost_per_mtok: 0.50,
        output_cost_per_mtok: 3.0,
    },
    ProfileModel {
        id: "gemini-2.5-flash-lite",
        label: "Gemini 2.5 Flash Lite",
        tier: ModelTier::Fast,
        context_window: 1_048_576,
        input_cost_per_mtok: 0.075,
        output_cost_per_mtok: 0.30,
    },
];

// OpenCode brings whatever providers the user configured; there is no
// meaningful static lineup to fall back to.
static OPENCODE_MODELS: &[ProfileModel] = &[];

static QWEN_MODELS: &[ProfileModel] = &[
    ProfileModel {
        id: "qwen3-coder-plus",
        label: "Qwen3 Coder Plus",
        tier: ModelTier::Standard,
        context_window: 131_072,
        input_cost_per_mtok: 0.80,
        output_cost_per_mtok: 2.0,
    },
    ProfileModel {
        id: "qwen3-coder-flash",
        label: "Qwen3 Coder Flash",
        tier: ModelTier::Fast,
        context_window: 131_072,
        input_cost_per_mtok: 0.30,
        output_cost_per_mtok: 0.60,
    },
];

static CLAUDE_PROFILE: BackendProfile = BackendProfile {
    display_name: "Claude Code",
    strengths: Strengths {
        coding: 0.95,
        review: 0.92,
        testing: 0.85,
        research: 0.80,
        writing: 0.90,
        planning: 0.93,
        multimodal: 0.60,
        tool_use: 0.95,
        long_context: 0.85,
        cost_efficiency: 0.40,
    },
    models: CLAUDE_MODELS,
    features: Features {
        piped_prompts: true,
        streaming: true,
        tool_protocol: true,
        image_input: true,
        web_search: true,
        code_execution: true,
        session_resume: true,
    },
    limitations: &["weekly quota shared across all surfaces"],
    probe: ProbeHints {
        command: &["claude"],
        model_command: "/model",
        status_command: "/usage",
        hard_timeout_secs: 30,
    },
    default_model: Some("claude-sonnet-4-6"),
    background_model: Some("claude-haiku-4-5"),
};

static CODEX_PROFILE: BackendProfile = BackendProfile {
    display_name: "Codex CLI",
    strengths: Strengths {
        coding: 0.93,
        review: 0.85,
        testing: 0.90,
        research: 0.70,
        writing: 0.70,
        planning: 0.80,
        multimodal: 0.50,
        tool_use: 0.85,
        long_context: 0.80,
        cost_efficiency: 0.60,
    },
    models: CODEX_MODELS,
    features: Features {
        piped_prompts: true,
        streaming: true,
        tool_protocol: true,
        image_input: false,
        web_search: true,
        code_execution: true,
        session_resume: true,
    },
    limitations: &["usage windows reset on a rolling schedule"],
    probe: ProbeHints {
        command: &["codex"],
        model_command: "/model",
        status_command: "/status",
        hard_timeout_secs: 30,
    },
    default_model: Some("gpt-5.1-codex"),
    background_model: Some("gpt-5.1-codex-mini"),
};

static GEMINI_PROFILE: BackendProfile = BackendProfile {
    display_name: "Gemini CLI",
    strengths: Strengths {
        coding: 0.85,
        review: 0.78,
        testing: 0.75,
        research: 0.92,
        writing: 0.85,
        planning: 0.80,
        multimodal: 0.95,
        tool_use: 0.75,
        long_context: 0.95,
        cost_efficiency: 0.75,
    },
    models: GEMINI_MODELS,
    features: Features {
        piped_prompts: true,
        streaming: true,
        tool_protocol: true,
        image_input: true,
        web_search: true,
        code_execution: true,
        session_resume: false,
    },
    // Interactive startup regularly takes tens of seconds; the probe ceiling
    // below is raised accordingly.
    limitations: &["slow interactive startup", "free-tier daily caps"],
    probe: ProbeHints {
        command: &["gemini"],
        model_command: "/model",
        status_command: "/status",
        hard_timeout_secs: 45,
    },
    default_model: Some("gemini-3-pro-preview"),
    background_model: Some("gemini-2.5-flash-lite"),
};

static OPENCODE_PROFILE: BackendProfile = BackendProfile {
    display_name: "OpenCode",
    strengths: Strengths {
        coding: 0.75,
        review: 0.70,
        testing: 0.70,
        research: 0.60,
        writing: 0.60,
        planning: 0.65,
        multimodal: 0.30,
        tool_use: 0.70,
        long_context: 0.60,
        cost_efficiency: 0.90,
    },
    models: OPENCODE_MODELS,
    features: Features {
        piped_prompts: true,
        streaming: true,
        tool_protocol: true,
        image_input: false,
        web_search: false,
        code_execution: true,
        session_resume: true,
    },
    limitations: &["model availability depends on configured providers"],
    probe: ProbeHints {
        command: &["opencode"],
        model_command: "/model",
        status_command: "/status",
        hard_timeout_secs: 30,
    },
    default_model: None,
    background_model: None,
};

static QWEN_PROFILE: BackendProfile = BackendProfile {
    display_name: "Qwen Code",
    strengths: Strengths {
        coding: 0.80,
        review: 0.65,
        testing: 0.70,
        research: 0.55,
        writing: 0.55,
        planning: 0.60,
        multimodal: 0.35,
        tool_use: 0.65,
        long_context: 0.70,
        cost_efficiency: 0.95,
    },
    models: QWEN_MODELS,
    features: Features {
        piped_prompts: true,
        streaming: true,
        tool_protocol: false,
        image_input: false,
        web_search: false,
        code_execution: true,
        session_resume: false,
    },
    limitations: &["smaller context window than first-class backends"],
    probe: ProbeHints {
        command: &["qwen"],
        model_command: "/model",
        status_command: "/status",
        hard_timeout_secs: 30,
    },
    default_model: Some("qwen3-coder-plus"),
    background_model: Some("qwen3-coder-flash"),
};

/// Profile lookup. Total over the closed kind set.
pub fn profile(kind: BackendKind) -> &'static BackendProfile {
    match kind {
        BackendKind::Claude => &CLAUDE_PROFILE,
        BackendKind::Codex => &CODEX_PROFILE,
        BackendKind::Gemini => &GEMINI_PROFILE,
        BackendKind::Opencode => &OPENCODE_PROFILE,
        BackendKind::Qwen => &QWEN_PROFILE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_a_profile() {
        for kind in BackendKind::ALL {
            let p = profile(kind);
            assert!(!p.display_name.is_empty());
            assert!(!p.probe.command.is_empty());
            assert!(p.probe.model_command.starts_with('/'));
            assert!(p.probe.status_command.starts_with('/'));
        }
    }

    #[test]
    fn first_class_kinds_carry_three_tiers() {
        for kind in BackendKind::FIRST_CLASS {
            let p = profile(kind);
            assert!(p.model_for_tier(ModelTier::Fast).is_some(), "{kind} fast");
            assert!(
                p.model_for_tier(ModelTier::Standard).is_some(),
                "{kind} standard"
            );
            assert!(
                p.model_for_tier(ModelTier::Advanced).is_some(),
                "{kind} advanced"
            );
        }
    }

    #[test]
    fn claude_probes_usage_others_probe_status() {
        assert_eq!(profile(BackendKind::Claude).probe.status_command, "/usage");
        for kind in [
            BackendKind::Codex,
            BackendKind::Gemini,
            BackendKind::Opencode,
            BackendKind::Qwen,
        ] {
            assert_eq!(profile(kind).probe.status_command, "/status");
        }
    }

    #[test]
    fn gemini_gets_the_longest_probe_ceiling() {
        let gemini = profile(BackendKind::Gemini).probe.hard_timeout_secs;
        for kind in BackendKind::ALL {
            if kind != BackendKind::Gemini {
                assert!(profile(kind).probe.hard_timeout_secs < gemini);
            }
        }
    }

    #[test]
    fn strengths_stay_within_unit_range() {
        for kind in BackendKind::ALL {
            let s = profile(kind).strengths;
            for v in [
                s.coding,
                s.review,
                s.testing,
                s.research,
                s.writing,
                s.planning,
                s.multimodal,
                s.tool_use,
                s.long_context,
                s.cost_efficiency,
            ] {
                assert!((0.0..=1.0).contains(&v), "{kind}: {v}");
            }
        }
    }

    #[test]
    fn default_models_come_from_the_lineup() {
        for kind in BackendKind::ALL {
            let p = profile(kind);
            if let Some(id) = p.default_model {
                assert!(p.model_by_id(id).is_some(), "{kind} default {id}");
            }
            if let Some(id) = p.background_model {
                assert!(p.model_by_id(id).is_some(), "{kind} background {id}");
            }
        }
    }

    #[test]
    fn opencode_has_no_static_lineup() {
        assert!(profile(BackendKind::Opencode).models.is_empty());
        assert!(profile(BackendKind::Opencode).default_model.is_none());
    }
}
