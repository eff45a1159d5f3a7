// SPDX-FileCopyrightText: 2026 Roundhouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Backend assignment scoring.
//!
//! Scores every candidate backend for a role as a weighted blend of category
//! affinity, cached availability, and static cost efficiency, then picks a
//! model from the winner's lineup. Never fails: when no candidate qualifies
//! the first candidate is returned with a zero score.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use roundhouse_core::{BackendKind, ModelTier};
use roundhouse_registry::profile;

use crate::intent::{WorkCategory, WorkIntent};

const AFFINITY_WEIGHT: f32 = 0.40;
const AVAILABILITY_WEIGHT: f32 = 0.35;
const COST_WEIGHT: f32 = 0.25;
const PREFERRED_BOOST: f32 = 0.05;

/// Availability at or below this is treated as exhausted under strict budget.
const STRICT_FLOOR: f32 = 0.01;

/// How exhausted backends are treated during scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetConstraint {
    /// Exhausted backends stay scoreable; low availability drags the score.
    Soft,
    /// Backends at or below the floor are excluded from scoring entirely.
    Strict,
}

impl BudgetConstraint {
    /// Map a config string to a constraint. Anything but `strict` is soft;
    /// the config layer has already validated the value.
    pub fn from_config(value: &str) -> Self {
        if value.eq_ignore_ascii_case("strict") {
            BudgetConstraint::Strict
        } else {
            BudgetConstraint::Soft
        }
    }
}

impl std::fmt::Display for BudgetConstraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BudgetConstraint::Soft => write!(f, "soft"),
            BudgetConstraint::Strict => write!(f, "strict"),
        }
    }
}

/// Caller-supplied context for one assignment pass.
#[derive(Debug, Clone, Copy)]
pub struct AssignContext<'a> {
    /// Candidate backends. Empty means "no constraint": the first-class
    /// kinds are scored instead.
    pub available: &'a [BackendKind],
    /// Cached availability per backend, each in [0, 1]. Missing entries
    /// score as fully available.
    pub availability: &'a HashMap<BackendKind, f32>,
    /// Backends to boost by a fixed margin.
    pub preferred: &'a [BackendKind],
    pub budget: BudgetConstraint,
    /// Manual override: skip scoring and use this backend when possible.
    pub forced: Option<BackendKind>,
}

/// One scored backend-and-model decision.
#[derive(Debug, Clone, Serialize)]
pub struct Assignment {
    pub backend: BackendKind,
    /// Chosen model id, absent when the backend has no static lineup.
    pub model: Option<String>,
    pub score: f32,
    pub reason: String,
}

/// Stateless scorer. Profiles come from the registry, availability from the
/// caller, so the engine itself holds nothing.
#[derive(Debug, Default, Clone)]
pub struct AssignmentEngine;

impl AssignmentEngine {
    pub fn new() -> Self {
        Self
    }

    /// Assign a backend and model to one role.
    pub fn assign(&self, role: &str, intent: &WorkIntent, ctx: &AssignContext<'_>) -> Assignment {
        if let Some(forced) = ctx.forced {
            return self.assign_forced(role, forced, ctx.available);
        }

        let candidates: &[BackendKind] = if ctx.available.is_empty() {
            &BackendKind::FIRST_CLASS
        } else {
            ctx.available
        };

        let base_category = category_for_role(role).unwrap_or(intent.primary);
        let mut best: Option<(BackendKind, f32, String)> = None;

        for &kind in candidates {
            let availability = ctx
                .availability
                .get(&kind)
                .copied()
                .unwrap_or(1.0)
                .clamp(0.0, 1.0);
            if ctx.budget == BudgetConstraint::Strict && availability <= STRICT_FLOOR {
                debug!(backend = %kind, availability, "excluded by strict budget");
                continue;
            }

            let affinity = blended_affinity(kind, base_category, &intent.secondary);
            let cost = profile(kind).strengths.cost_efficiency;
            let preferred = ctx.preferred.contains(&kind);
            let score = weighted_score(affinity, availability, cost, preferred);

            let mut reason = format!(
                "affinity {affinity:.2}, availability {availability:.2}, cost {cost:.2} (score {score:.2})"
            );
            if preferred {
                reason.push_str(", preferred");
            }

            if best.as_ref().is_none_or(|(_, s, _)| score > *s) {
                best = Some((kind, score, reason));
            }
        }

        let assignment = match best {
            Some((backend, score, reason)) => Assignment {
                backend,
                model: model_for_role(backend, role),
                score,
                reason,
            },
            // Everything was excluded; still hand back something usable.
            None => {
                let backend = candidates[0];
                Assignment {
                    backend,
                    model: model_for_role(backend, role),
                    score: 0.0,
                    reason: "no candidate cleared the strict budget floor".to_string(),
                }
            }
        };
        info!(
            role,
            backend = %assignment.backend,
            model = assignment.model.as_deref().unwrap_or("-"),
            score = assignment.score,
            "assigned"
        );
        assignment
    }

    fn assign_forced(
        &self,
        role: &str,
        forced: BackendKind,
        available: &[BackendKind],
    ) -> Assignment {
        let (backend, reason) = if available.is_empty() || available.contains(&forced) {
            (forced, "pinned by explicit override".to_string())
        } else {
            let fallback = available[0];
            (
                fallback,
                format!("override {forced} unavailable, using {fallback}"),
            )
        };
        Assignment {
            backend,
            model: model_for_role(backend, role),
            score: 1.0,
            reason,
        }
    }
}

/// Roles with a fixed category; anything else follows the intent's primary.
fn category_for_role(role: &str) -> Option<WorkCategory> {
    match role {
        "reviewer" => Some(WorkCategory::Review),
        "tester" => Some(WorkCategory::Testing),
        "researcher" => Some(WorkCategory::Research),
        "writer" | "docs" => Some(WorkCategory::Docs),
        "devops" => Some(WorkCategory::Devops),
        "designer" => Some(WorkCategory::Design),
        "data-engineer" => Some(WorkCategory::DataPipeline),
        _ => None,
    }
}

/// Strength-table lookup for one category.
fn affinity_for(kind: BackendKind, category: WorkCategory) -> f32 {
    let s = profile(kind).strengths;
    match category {
        WorkCategory::Review => s.review,
        WorkCategory::Testing => s.testing,
        WorkCategory::Docs => s.writing,
        WorkCategory::Research => s.research,
        WorkCategory::Devops => s.tool_use,
        WorkCategory::Design => s.multimodal,
        WorkCategory::Mixed => s.planning,
        WorkCategory::Refactor
        | WorkCategory::BugFix
        | WorkCategory::DataPipeline
        | WorkCategory::NewFeature
        | WorkCategory::FullStack => s.coding,
    }
}

/// Base-category affinity nudged by up to two secondary categories.
fn blended_affinity(kind: BackendKind, base: WorkCategory, secondary: &[WorkCategory]) -> f32 {
    let mut affinity = affinity_for(kind, base);
    for &category in secondary.iter().take(2) {
        affinity += 0.08 * affinity_for(kind, category);
    }
    affinity.clamp(0.0, 1.0)
}

fn weighted_score(affinity: f32, availability: f32, cost: f32, preferred: bool) -> f32 {
    let boost = if preferred { PREFERRED_BOOST } else { 0.0 };
    AFFINITY_WEIGHT * affinity + AVAILABILITY_WEIGHT * availability + COST_WEIGHT * cost + boost
}

/// Per-backend, per-role tier preference. Lineups are small and fixed, so
/// this stays a match rather than data.
fn model_for_role(kind: BackendKind, role: &str) -> Option<String> {
    let p = profile(kind);
    if p.models.is_empty() {
        return None;
    }
    let tier = match kind {
        BackendKind::Claude => match role {
            "orchestrator" | "planner" | "reviewer" => ModelTier::Advanced,
            _ => ModelTier::Fast,
        },
        BackendKind::Codex => match role {
            "orchestrator" | "planner" => ModelTier::Advanced,
            "coder" | "reviewer" => ModelTier::Standard,
            _ => ModelTier::Fast,
        },
        BackendKind::Gemini => match role {
            "orchestrator" | "planner" | "researcher" => ModelTier::Advanced,
            "coder" | "reviewer" => ModelTier::Standard,
            _ => ModelTier::Fast,
        },
        BackendKind::Opencode | BackendKind::Qwen => {
            return p.models.first().map(|m| m.id.to_string());
        }
    };
    p.model_for_tier(tier)
        .or_else(|| p.models.first())
        .map(|m| m.id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::classify_intent;
    use proptest::prelude::*;

    fn ctx<'a>(
        available: &'a [BackendKind],
        availability: &'a HashMap<BackendKind, f32>,
        preferred: &'a [BackendKind],
        budget: BudgetConstraint,
    ) -> AssignContext<'a> {
        AssignContext {
            available,
            availability,
            preferred,
            budget,
            forced: None,
        }
    }

    #[test]
    fn forced_backend_skips_scoring() {
        let engine = AssignmentEngine::new();
        let intent = classify_intent("implement the export feature", 1, &[]);
        let availability = HashMap::new();
        let context = AssignContext {
            available: &[BackendKind::Claude, BackendKind::Qwen],
            availability: &availability,
            preferred: &[],
            budget: BudgetConstraint::Soft,
            forced: Some(BackendKind::Qwen),
        };
        let a = engine.assign("coder", &intent, &context);
        assert_eq!(a.backend, BackendKind::Qwen);
        assert_eq!(a.model.as_deref(), Some("qwen3-coder-plus"));
        assert!(a.reason.contains("pinned"));
    }

    #[test]
    fn unavailable_forced_backend_falls_to_first_available() {
        let engine = AssignmentEngine::new();
        let intent = classify_intent("implement the export feature", 1, &[]);
        let availability = HashMap::new();
        let context = AssignContext {
            available: &[BackendKind::Gemini, BackendKind::Claude],
            availability: &availability,
            preferred: &[],
            budget: BudgetConstraint::Soft,
            forced: Some(BackendKind::Codex),
        };
        let a = engine.assign("coder", &intent, &context);
        assert_eq!(a.backend, BackendKind::Gemini);
        assert!(a.reason.contains("unavailable"));
    }

    #[test]
    fn empty_available_set_scores_the_first_class_kinds() {
        let engine = AssignmentEngine::new();
        let intent = classify_intent("fix the failing parser", 1, &[]);
        let availability = HashMap::new();
        let a = engine.assign(
            "coder",
            &intent,
            &ctx(&[], &availability, &[], BudgetConstraint::Soft),
        );
        assert!(a.backend.is_first_class());
        assert!(a.score > 0.0);
    }

    #[test]
    fn low_availability_drags_a_strong_backend_down() {
        let engine = AssignmentEngine::new();
        let intent = classify_intent("implement the feature", 1, &[]);
        let mut availability = HashMap::new();
        availability.insert(BackendKind::Codex, 0.2f32);
        let a = engine.assign(
            "coder",
            &intent,
            &ctx(
                &[BackendKind::Codex, BackendKind::Gemini],
                &availability,
                &[],
                BudgetConstraint::Soft,
            ),
        );
        // Codex leads on coding affinity but an exhausted quota loses to a
        // fresh Gemini.
        assert_eq!(a.backend, BackendKind::Gemini);
    }

    #[test]
    fn availability_floor_splits_strict_and_soft() {
        let engine = AssignmentEngine::new();
        let intent = classify_intent("fix the failing parser", 1, &[]);
        let mut availability = HashMap::new();
        availability.insert(BackendKind::Claude, 0.01f32);

        let strict = engine.assign(
            "coder",
            &intent,
            &ctx(
                &[BackendKind::Claude],
                &availability,
                &[],
                BudgetConstraint::Strict,
            ),
        );
        assert_eq!(strict.backend, BackendKind::Claude);
        assert_eq!(strict.score, 0.0);
        assert!(strict.reason.contains("budget"));

        let soft = engine.assign(
            "coder",
            &intent,
            &ctx(
                &[BackendKind::Claude],
                &availability,
                &[],
                BudgetConstraint::Soft,
            ),
        );
        assert_eq!(soft.backend, BackendKind::Claude);
        assert!(soft.score > 0.0);
    }

    #[test]
    fn preference_boost_flips_a_close_call() {
        let engine = AssignmentEngine::new();
        let intent = classify_intent("please review the auth changes", 1, &[]);
        let availability = HashMap::new();
        let available = [BackendKind::Claude, BackendKind::Codex];

        // On raw scores Codex edges out Claude for review work on cost.
        let plain = engine.assign(
            "reviewer",
            &intent,
            &ctx(&available, &availability, &[], BudgetConstraint::Soft),
        );
        assert_eq!(plain.backend, BackendKind::Codex);

        let nudged = engine.assign(
            "reviewer",
            &intent,
            &ctx(
                &available,
                &availability,
                &[BackendKind::Claude],
                BudgetConstraint::Soft,
            ),
        );
        assert_eq!(nudged.backend, BackendKind::Claude);
        assert!(nudged.reason.contains("preferred"));
    }

    #[test]
    fn unmapped_role_follows_the_primary_category() {
        let engine = AssignmentEngine::new();
        let intent = classify_intent("research quantization approaches", 1, &[]);
        let availability = HashMap::new();
        let a = engine.assign(
            "wizard",
            &intent,
            &ctx(
                &[BackendKind::Gemini, BackendKind::Qwen],
                &availability,
                &[],
                BudgetConstraint::Soft,
            ),
        );
        assert_eq!(a.backend, BackendKind::Gemini);
    }

    #[test]
    fn model_tables_pick_tier_by_role() {
        assert_eq!(
            model_for_role(BackendKind::Claude, "orchestrator").as_deref(),
            Some("claude-opus-4-6")
        );
        assert_eq!(
            model_for_role(BackendKind::Claude, "coder").as_deref(),
            Some("claude-haiku-4-5")
        );
        assert_eq!(
            model_for_role(BackendKind::Codex, "coder").as_deref(),
            Some("gpt-5.1-codex")
        );
        assert_eq!(
            model_for_role(BackendKind::Gemini, "researcher").as_deref(),
            Some("gemini-3-pro-preview")
        );
        assert_eq!(model_for_role(BackendKind::Opencode, "coder"), None);
    }

    #[test]
    fn budget_constraint_parses_from_config_strings() {
        assert_eq!(
            BudgetConstraint::from_config("strict"),
            BudgetConstraint::Strict
        );
        assert_eq!(
            BudgetConstraint::from_config("Strict"),
            BudgetConstraint::Strict
        );
        assert_eq!(BudgetConstraint::from_config("soft"), BudgetConstraint::Soft);
        assert_eq!(
            BudgetConstraint::from_config("anything"),
            BudgetConstraint::Soft
        );
    }

    proptest! {
        #[test]
        fn prop_score_is_monotone_in_each_component(
            a in 0.0f32..=1.0,
            v in 0.0f32..=1.0,
            c in 0.0f32..=1.0,
            bump in 0.0f32..=0.5,
        ) {
            let base = weighted_score(a, v, c, false);
            prop_assert!(weighted_score((a + bump).min(1.0), v, c, false) >= base - 1e-6);
            prop_assert!(weighted_score(a, (v + bump).min(1.0), c, false) >= base - 1e-6);
            prop_assert!(weighted_score(a, v, (c + bump).min(1.0), false) >= base - 1e-6);
        }

        #[test]
        fn prop_preference_boost_is_exactly_five_points(
            a in 0.0f32..=1.0,
            v in 0.0f32..=1.0,
            c in 0.0f32..=1.0,
        ) {
            let plain = weighted_score(a, v, c, false);
            let boosted = weighted_score(a, v, c, true);
            prop_assert!((boosted - plain - PREFERRED_BOOST).abs() < 1e-6);
        }
    }
}
