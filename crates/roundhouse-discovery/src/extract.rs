// SPDX-FileCopyrightText: 2026 Roundhouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model-id extraction from unstructured CLI output and JSON blobs.
//!
//! Transcripts are heuristic territory: every backend prints its model list
//! in a different panel layout, so extraction runs a per-backend id pattern
//! over the scrubbed text and keeps the first occurrence of each id. JSON
//! from `--json`-style invocations goes through one recursive walker with a
//! fixed list of candidate key names, so the duck typing stays in a single
//! auditable place.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use roundhouse_core::BackendKind;

/// Keys whose string values may carry a model id, in any JSON shape.
const CANDIDATE_KEYS: [&str; 5] = ["id", "model", "model_id", "name", "slug"];

static CLAUDE_IDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bclaude-[a-z0-9]+(?:[.-][a-z0-9]+)*").unwrap());

static CODEX_IDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:gpt-[a-z0-9]+(?:[.-][a-z0-9]+)*|codex-[a-z0-9]+(?:[.-][a-z0-9]+)*|o[34](?:-mini)?\b)")
        .unwrap()
});

static GEMINI_IDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bgemini-[a-z0-9]+(?:[.-][a-z0-9]+)*").unwrap());

/// provider/model slugs plus bare qwen-family ids.
static GENERIC_IDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:[a-z0-9]+(?:[.-][a-z0-9]+)*/[a-z0-9]+(?:[.-][a-z0-9]+)*|qwen[a-z0-9]*(?:[.-][a-z0-9]+)*)",
    )
    .unwrap()
});

fn pattern_for(kind: BackendKind) -> &'static Regex {
    match kind {
        BackendKind::Claude => &CLAUDE_IDS,
        BackendKind::Codex => &CODEX_IDS,
        BackendKind::Gemini => &GEMINI_IDS,
        BackendKind::Opencode | BackendKind::Qwen => &GENERIC_IDS,
    }
}

/// Real model ids carry a version digit somewhere; bare tool names
/// (`claude-code`, `gemini-cli`) do not, and this filter drops them.
fn looks_like_model_id(candidate: &str) -> bool {
    candidate.chars().any(|c| c.is_ascii_digit())
}

/// Extract model ids for one backend from scrubbed free text, preserving
/// first-seen order. Unmatchable text yields an empty list, never an error.
pub fn model_ids_from_text(kind: BackendKind, text: &str) -> Vec<String> {
    let mut ids = Vec::new();
    for found in pattern_for(kind).find_iter(text) {
        let candidate = found.as_str();
        if looks_like_model_id(candidate) && !ids.iter().any(|id| id == candidate) {
            ids.push(candidate.to_string());
        }
    }
    ids
}

/// Extract model ids from an arbitrary JSON value: recursive descent over
/// arrays and objects, collecting candidate-key string values that match the
/// backend's id pattern.
pub fn model_ids_from_json(kind: BackendKind, value: &Value) -> Vec<String> {
    let mut ids = Vec::new();
    walk(kind, value, &mut ids);
    ids
}

fn walk(kind: BackendKind, value: &Value, ids: &mut Vec<String>) {
    match value {
        Value::Array(items) => {
            for item in items {
                walk(kind, item, ids);
            }
        }
        Value::Object(map) => {
            for key in CANDIDATE_KEYS {
                if let Some(Value::String(text)) = map.get(key) {
                    for id in model_ids_from_text(kind, text) {
                        if !ids.iter().any(|seen| *seen == id) {
                            ids.push(id);
                        }
                    }
                }
            }
            for nested in map.values() {
                if matches!(nested, Value::Array(_) | Value::Object(_)) {
                    walk(kind, nested, ids);
                }
            }
        }
        _ => {}
    }
}
