// SPDX-FileCopyrightText: 2026 Roundhouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Heuristic work-intent classification.
//!
//! Scores free-text work descriptions against weighted keyword rules to
//! produce a category distribution, a complexity estimate, and a suggested
//! role roster. Zero-cost heuristics: no model call, no network, no latency.

use serde::{Deserialize, Serialize};

use roundhouse_core::BackendKind;

/// Work categories the classifier can recognize. `Mixed` is synthetic,
/// injected when three or more concrete categories score positively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkCategory {
    Review,
    Refactor,
    BugFix,
    Testing,
    Docs,
    Research,
    Devops,
    Design,
    DataPipeline,
    NewFeature,
    FullStack,
    Mixed,
}

impl std::fmt::Display for WorkCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            WorkCategory::Review => "review",
            WorkCategory::Refactor => "refactor",
            WorkCategory::BugFix => "bug_fix",
            WorkCategory::Testing => "testing",
            WorkCategory::Docs => "docs",
            WorkCategory::Research => "research",
            WorkCategory::Devops => "devops",
            WorkCategory::Design => "design",
            WorkCategory::DataPipeline => "data_pipeline",
            WorkCategory::NewFeature => "new_feature",
            WorkCategory::FullStack => "full_stack",
            WorkCategory::Mixed => "mixed",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Light,
    Medium,
    Heavy,
}

impl std::fmt::Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Complexity::Light => write!(f, "light"),
            Complexity::Medium => write!(f, "medium"),
            Complexity::Heavy => write!(f, "heavy"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationClass {
    Minutes,
    Hours,
    Days,
}

impl std::fmt::Display for DurationClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DurationClass::Minutes => write!(f, "minutes"),
            DurationClass::Hours => write!(f, "hours"),
            DurationClass::Days => write!(f, "days"),
        }
    }
}

/// One suggested agent for the roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleSuggestion {
    pub role: String,
    pub count: u32,
    pub reason: String,
    pub preferred_backend: BackendKind,
    pub backend_reason: String,
}

/// Result of classifying a work description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkIntent {
    pub primary: WorkCategory,
    /// Up to three runner-up categories, strongest first.
    pub secondary: Vec<WorkCategory>,
    /// Normalized category weights, strongest first, summing to 1.
    pub weights: Vec<(WorkCategory, f32)>,
    pub suggested_roles: Vec<RoleSuggestion>,
    pub complexity: Complexity,
    pub duration: DurationClass,
}

/// Ordered scoring rules: category, phrases, weight added per matched
/// phrase. Phrases are substring checks on the lowercased text, so `test`
/// also covers `tests` and `testing`.
const RULES: &[(WorkCategory, &[&str], f32)] = &[
    (
        WorkCategory::Review,
        &["review", "audit", "critique", "feedback on", "look over"],
        1.6,
    ),
    (
        WorkCategory::Refactor,
        &["refactor", "clean up", "cleanup", "restructure", "simplify", "rewrite"],
        1.5,
    ),
    (
        WorkCategory::BugFix,
        &["bug", "fix", "broken", "crash", "regression", "error", "doesn't work", "failing"],
        1.8,
    ),
    (
        WorkCategory::Testing,
        &["test", "coverage", "assertion", "unit test", "integration test", "e2e"],
        1.4,
    ),
    (
        WorkCategory::Docs,
        &["document", "docs", "readme", "changelog", "comment", "tutorial", "guide"],
        1.2,
    ),
    (
        WorkCategory::Research,
        &["research", "investigate", "explore", "compare", "evaluate", "benchmark", "feasibility"],
        1.3,
    ),
    (
        WorkCategory::Devops,
        &["deploy", "ci/cd", "continuous integration", "docker", "kubernetes", "infrastructure", "terraform", "release"],
        1.5,
    ),
    (
        WorkCategory::Design,
        &["design", "user interface", "layout", "mockup", "wireframe", "style", "theme"],
        1.3,
    ),
    (
        WorkCategory::DataPipeline,
        &["pipeline", "etl", "ingest", "data warehouse", "migration", "schema", "dataset"],
        1.6,
    ),
    (
        WorkCategory::NewFeature,
        &["feature", "implement", "add support", "build", "create", "new endpoint"],
        1.7,
    ),
    (
        WorkCategory::FullStack,
        &["full-stack", "full stack", "frontend and backend", "end-to-end app", "web app", "application"],
        2.0,
    ),
];

/// Complexity thresholds over the blended score.
const HEAVY_THRESHOLD: f32 = 6.2;
const MEDIUM_THRESHOLD: f32 = 3.5;

/// Classify a work description.
///
/// `existing_agents` is how many agents the caller already has; a fresh
/// request (zero) gets one extra coder in the roster. `available` limits
/// role backend preferences; an empty slice leaves template preferences
/// unchanged.
pub fn classify_intent(
    text: &str,
    existing_agents: usize,
    available: &[BackendKind],
) -> WorkIntent {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return default_intent(available);
    }

    let lower = trimmed.to_lowercase();
    let mut scores: Vec<(WorkCategory, f32)> = Vec::new();
    for (category, phrases, weight) in RULES {
        let matched = phrases.iter().filter(|p| lower.contains(*p)).count();
        if matched > 0 {
            scores.push((*category, matched as f32 * weight));
        }
    }

    // Three or more concrete categories means the work straddles areas;
    // inject a synthetic mixed score at the mean of the positives.
    if scores.len() >= 3 {
        let mean = scores.iter().map(|(_, s)| s).sum::<f32>() / scores.len() as f32;
        scores.push((WorkCategory::Mixed, mean));
    }

    if scores.is_empty() {
        scores.push((WorkCategory::FullStack, 1.0));
    }

    let raw_mass: f32 = scores.iter().map(|(_, s)| s).sum();
    let distinct = scores
        .iter()
        .filter(|(c, _)| *c != WorkCategory::Mixed)
        .count();

    scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    let total: f32 = scores.iter().map(|(_, s)| s).sum();
    let weights: Vec<(WorkCategory, f32)> = scores
        .iter()
        .map(|(c, s)| (*c, s / total))
        .collect();

    let primary = weights[0].0;
    let secondary: Vec<WorkCategory> = weights.iter().skip(1).take(3).map(|(c, _)| *c).collect();

    let complexity = estimate_complexity(trimmed.len(), distinct, raw_mass);
    let duration = duration_for(complexity);
    let suggested_roles = roster_for(primary, existing_agents, available);

    WorkIntent {
        primary,
        secondary,
        weights,
        suggested_roles,
        complexity,
        duration,
    }
}

/// Fixed analysis for empty input: a generalist full-stack roster at
/// medium complexity, identical on every call.
fn default_intent(available: &[BackendKind]) -> WorkIntent {
    let mut roles = vec![
        template_role("orchestrator", 1, "coordinate the overall effort"),
        template_role("coder", 2, "carry the implementation work"),
        template_role("tester", 1, "verify behavior as it lands"),
    ];
    substitute_unavailable(&mut roles, available);
    WorkIntent {
        primary: WorkCategory::FullStack,
        secondary: Vec::new(),
        weights: vec![(WorkCategory::FullStack, 1.0)],
        suggested_roles: roles,
        complexity: Complexity::Medium,
        duration: DurationClass::Hours,
    }
}

fn estimate_complexity(text_len: usize, distinct_categories: usize, raw_mass: f32) -> Complexity {
    let length_score = match text_len {
        0..=80 => 0.5,
        81..=240 => 1.5,
        241..=600 => 2.5,
        _ => 3.5,
    };
    let score = length_score + 0.75 * distinct_categories as f32 + 0.5 * raw_mass;
    if score >= HEAVY_THRESHOLD {
        Complexity::Heavy
    } else if score >= MEDIUM_THRESHOLD {
        Complexity::Medium
    } else {
        Complexity::Light
    }
}

fn duration_for(complexity: Complexity) -> DurationClass {
    match complexity {
        Complexity::Light => DurationClass::Minutes,
        Complexity::Medium => DurationClass::Hours,
        Complexity::Heavy => DurationClass::Days,
    }
}

/// Per-category backend preference for a role, with the rationale shown to
/// the user.
fn backend_preference(role: &str) -> (BackendKind, &'static str) {
    match role {
        "reviewer" => (BackendKind::Claude, "strongest review judgment"),
        "tester" => (BackendKind::Codex, "fast, thorough test generation"),
        "researcher" => (BackendKind::Gemini, "built for broad research and retrieval"),
        "writer" => (BackendKind::Claude, "best long-form writing"),
        "devops" => (BackendKind::Codex, "strong at tooling and pipelines"),
        "designer" => (BackendKind::Gemini, "multimodal eye for layout"),
        "data-engineer" => (BackendKind::Gemini, "long-context over large schemas"),
        "planner" | "orchestrator" => (BackendKind::Claude, "reliable multi-step planning"),
        _ => (BackendKind::Claude, "strong general coding"),
    }
}

fn template_role(role: &str, count: u32, reason: &str) -> RoleSuggestion {
    let (preferred_backend, backend_reason) = backend_preference(role);
    RoleSuggestion {
        role: role.to_string(),
        count,
        reason: reason.to_string(),
        preferred_backend,
        backend_reason: backend_reason.to_string(),
    }
}

/// Fixed roster template per primary category.
fn roster_for(
    primary: WorkCategory,
    existing_agents: usize,
    available: &[BackendKind],
) -> Vec<RoleSuggestion> {
    let mut roles = match primary {
        WorkCategory::Review => vec![template_role("reviewer", 1, "dedicated review pass")],
        WorkCategory::Refactor => vec![
            template_role("coder", 1, "drive the restructuring"),
            template_role("reviewer", 1, "guard behavior during the rewrite"),
        ],
        WorkCategory::BugFix => vec![
            template_role("coder", 1, "isolate and fix the defect"),
            template_role("tester", 1, "pin the regression down"),
        ],
        WorkCategory::Testing => vec![template_role("tester", 1, "build out the test surface")],
        WorkCategory::Docs => vec![template_role("writer", 1, "write and restructure the docs")],
        WorkCategory::Research => {
            vec![template_role("researcher", 1, "survey approaches and report back")]
        }
        WorkCategory::Devops => {
            vec![template_role("devops", 1, "own the pipeline and deployment")]
        }
        WorkCategory::Design => vec![template_role("designer", 1, "shape the interface")],
        WorkCategory::DataPipeline => vec![
            template_role("data-engineer", 1, "build the data flow"),
            template_role("tester", 1, "validate the transformations"),
        ],
        WorkCategory::NewFeature => vec![
            template_role("planner", 1, "break the feature down"),
            template_role("coder", 1, "implement the feature"),
            template_role("tester", 1, "cover the new behavior"),
        ],
        WorkCategory::FullStack | WorkCategory::Mixed => vec![
            template_role("orchestrator", 1, "coordinate the overall effort"),
            template_role("coder", 1, "carry the implementation work"),
            template_role("tester", 1, "verify behavior as it lands"),
        ],
    };

    // Fresh requests with no agents yet get one extra implementer.
    if existing_agents == 0
        && let Some(coder) = roles.iter_mut().find(|r| r.role == "coder")
    {
        coder.count += 1;
    }

    substitute_unavailable(&mut roles, available);
    roles
}

/// Replace preferred backends missing from the caller's available set,
/// favoring the first-class kinds, and note the fallback.
fn substitute_unavailable(roles: &mut [RoleSuggestion], available: &[BackendKind]) {
    if available.is_empty() {
        return;
    }
    for role in roles.iter_mut() {
        if available.contains(&role.preferred_backend) {
            continue;
        }
        let substitute = available
            .iter()
            .find(|k| k.is_first_class())
            .or_else(|| available.first());
        if let Some(&substitute) = substitute {
            role.backend_reason = format!(
                "{} ({} unavailable, fell back to {})",
                role.backend_reason, role.preferred_backend, substitute
            );
            role.preferred_backend = substitute;
        }
    }
}
