// SPDX-FileCopyrightText: 2026 Roundhouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model resolution and fallback chains.
//!
//! Resolves the effective model id for a backend from layered preferences,
//! rejecting ids whose naming convention does not fit the backend family,
//! and supplies ordered fallback candidates when a primary model fails at
//! execution time. Retry itself belongs to the caller.

use serde::{Deserialize, Serialize};
use tracing::debug;

use roundhouse_core::BackendKind;
use roundhouse_registry::profile;

/// Last-resort model when neither the caller nor the backend profile names
/// one.
pub const GLOBAL_DEFAULT_MODEL: &str = "claude-sonnet-4-6";

/// Fallback order for the Gemini family. Extends past the curated lineup:
/// older ids stay requestable even after they rotate out of the profile.
const GEMINI_FALLBACK_ORDER: &[&str] = &[
    "gemini-3-pro-preview",
    "gemini-3-flash-preview",
    "gemini-2.5-flash-lite",
    "gemini-2.5-flash",
];

/// What kind of task the model is being resolved for. Heartbeat and cron
/// work routes to each backend's cheap background model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Interactive,
    Heartbeat,
    Cron,
}

impl TaskType {
    fn is_background(self) -> bool {
        matches!(self, TaskType::Heartbeat | TaskType::Cron)
    }
}

impl std::fmt::Display for TaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskType::Interactive => write!(f, "interactive"),
            TaskType::Heartbeat => write!(f, "heartbeat"),
            TaskType::Cron => write!(f, "cron"),
        }
    }
}

impl std::str::FromStr for TaskType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "interactive" => Ok(TaskType::Interactive),
            "heartbeat" => Ok(TaskType::Heartbeat),
            "cron" => Ok(TaskType::Cron),
            other => Err(format!(
                "unknown task type '{other}' (expected interactive, heartbeat, or cron)"
            )),
        }
    }
}

/// Naming-convention check per backend family. Families without a fixed
/// convention accept any id.
pub fn model_matches_backend(model: &str, backend: BackendKind) -> bool {
    match backend {
        BackendKind::Claude => model.starts_with("claude"),
        BackendKind::Codex => {
            model.starts_with("gpt-")
                || model.starts_with("codex-")
                || model.starts_with("o3")
                || model.starts_with("o4")
        }
        BackendKind::Gemini => model.starts_with("gemini"),
        // OpenCode fronts arbitrary providers and Qwen accepts dated
        // snapshot aliases; neither gets a prefix gate.
        BackendKind::Opencode | BackendKind::Qwen => true,
    }
}

/// Resolve the effective model id for `backend`.
///
/// Precedence: compatible per-agent preference, compatible runtime model,
/// background model for heartbeat/cron work, the profile default, then
/// [`GLOBAL_DEFAULT_MODEL`].
pub fn resolve_model(
    preferred: Option<&str>,
    runtime_model: Option<&str>,
    task_type: TaskType,
    backend: BackendKind,
) -> String {
    if let Some(model) = preferred
        && model_matches_backend(model, backend)
    {
        debug!(backend = %backend, model, "resolved from agent preference");
        return model.to_string();
    }
    if let Some(model) = runtime_model
        && model_matches_backend(model, backend)
    {
        debug!(backend = %backend, model, "resolved from runtime config");
        return model.to_string();
    }
    let p = profile(backend);
    if task_type.is_background()
        && let Some(model) = p.background_model
    {
        debug!(backend = %backend, model, task = %task_type, "resolved to background model");
        return model.to_string();
    }
    if let Some(model) = p.default_model {
        debug!(backend = %backend, model, "resolved to profile default");
        return model.to_string();
    }
    debug!(backend = %backend, model = GLOBAL_DEFAULT_MODEL, "resolved to global default");
    GLOBAL_DEFAULT_MODEL.to_string()
}

/// Ordered fallback candidates for `primary`, excluding the primary itself,
/// at most `max_fallbacks` long. Only the Gemini family carries a chain;
/// other families return nothing.
pub fn fallback_chain(primary: &str, max_fallbacks: usize) -> Vec<String> {
    if !primary.starts_with("gemini") {
        return Vec::new();
    }
    let mut chain: Vec<String> = Vec::new();
    for &candidate in GEMINI_FALLBACK_ORDER {
        if chain.len() >= max_fallbacks {
            break;
        }
        if candidate == primary || chain.iter().any(|c| c == candidate) {
            continue;
        }
        chain.push(candidate.to_string());
    }
    chain
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn naming_conventions_gate_first_class_families() {
        assert!(model_matches_backend("claude-opus-4-6", BackendKind::Claude));
        assert!(!model_matches_backend("gpt-5.1-codex", BackendKind::Claude));
        assert!(model_matches_backend("gpt-5.1-codex-max", BackendKind::Codex));
        assert!(model_matches_backend("o3-mini", BackendKind::Codex));
        assert!(!model_matches_backend("gemini-3-pro-preview", BackendKind::Codex));
        assert!(model_matches_backend("gemini-2.5-flash-lite", BackendKind::Gemini));
        assert!(!model_matches_backend("claude-haiku-4-5", BackendKind::Gemini));
    }

    #[test]
    fn open_families_accept_any_model() {
        assert!(model_matches_backend(
            "anthropic/claude-sonnet-4-6",
            BackendKind::Opencode
        ));
        assert!(model_matches_backend("whatever", BackendKind::Qwen));
    }

    #[test]
    fn compatible_preference_wins() {
        let model = resolve_model(
            Some("claude-opus-4-6"),
            Some("claude-haiku-4-5"),
            TaskType::Interactive,
            BackendKind::Claude,
        );
        assert_eq!(model, "claude-opus-4-6");
    }

    #[test]
    fn incompatible_preference_is_skipped() {
        let model = resolve_model(
            Some("gpt-5.1-codex"),
            Some("claude-haiku-4-5"),
            TaskType::Interactive,
            BackendKind::Claude,
        );
        assert_eq!(model, "claude-haiku-4-5");
    }

    #[test]
    fn background_tasks_get_the_cheap_model() {
        let model = resolve_model(None, None, TaskType::Cron, BackendKind::Codex);
        assert_eq!(model, "gpt-5.1-codex-mini");
        let model = resolve_model(None, None, TaskType::Heartbeat, BackendKind::Gemini);
        assert_eq!(model, "gemini-2.5-flash-lite");
    }

    #[test]
    fn compatible_runtime_model_outranks_the_background_override() {
        let model = resolve_model(
            None,
            Some("gemini-3-pro-preview"),
            TaskType::Heartbeat,
            BackendKind::Gemini,
        );
        assert_eq!(model, "gemini-3-pro-preview");
    }

    #[test]
    fn interactive_falls_to_the_profile_default() {
        let model = resolve_model(None, None, TaskType::Interactive, BackendKind::Claude);
        assert_eq!(model, "claude-sonnet-4-6");
    }

    #[test]
    fn backend_without_defaults_uses_the_global_default() {
        let model = resolve_model(None, None, TaskType::Interactive, BackendKind::Opencode);
        assert_eq!(model, GLOBAL_DEFAULT_MODEL);
    }

    #[test]
    fn gemini_chain_skips_the_primary_and_truncates() {
        let chain = fallback_chain("gemini-3-pro-preview", 2);
        assert_eq!(
            chain,
            vec!["gemini-3-flash-preview", "gemini-2.5-flash-lite"]
        );
    }

    #[test]
    fn chain_for_an_unlisted_gemini_model_starts_at_the_top() {
        let chain = fallback_chain("gemini-9-experimental", 10);
        assert_eq!(chain.len(), GEMINI_FALLBACK_ORDER.len());
        assert_eq!(chain[0], "gemini-3-pro-preview");
    }

    #[test]
    fn non_gemini_models_have_no_chain() {
        assert!(fallback_chain("claude-opus-4-6", 3).is_empty());
        assert!(fallback_chain("gpt-5.1-codex", 3).is_empty());
    }

    #[test]
    fn zero_max_yields_an_empty_chain() {
        assert!(fallback_chain("gemini-3-pro-preview", 0).is_empty());
    }

    #[test]
    fn task_type_round_trips_through_strings() {
        for task in [TaskType::Interactive, TaskType::Heartbeat, TaskType::Cron] {
            let rendered = task.to_string();
            assert_eq!(rendered.parse::<TaskType>().unwrap(), task);
        }
        assert!("sometimes".parse::<TaskType>().is_err());
    }
}
