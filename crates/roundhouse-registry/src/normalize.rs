// SPDX-FileCopyrightText: 2026 Roundhouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Alias resolution: free-form backend names to canonical kinds.

use roundhouse_core::BackendKind;

/// Resolve a user- or config-supplied backend name to its canonical kind.
///
/// Matching is trimmed and case-insensitive over a fixed alias table; the
/// canonical spellings resolve to themselves. Unknown names yield `None`,
/// never a guess.
pub fn normalize(raw: &str) -> Option<BackendKind> {
    let name = raw.trim().to_lowercase();
    let kind = match name.as_str() {
        "claude" | "claude-code" | "claudecode" | "anthropic" => BackendKind::Claude,
        "codex" | "codex-cli" | "openai" | "openai-codex" => BackendKind::Codex,
        "gemini" | "gemini-cli" | "google" | "google-gemini" => BackendKind::Gemini,
        "opencode" | "open-code" | "sst-opencode" => BackendKind::Opencode,
        "qwen" | "qwen-code" | "qwen-coder" | "qwen3-coder" => BackendKind::Qwen,
        _ => return None,
    };
    Some(kind)
}

/// Filter `(name, available)` pairs down to the distinct canonical kinds the
/// caller marked available, preserving first-seen order. Unknown names are
/// skipped.
pub fn list_available<S: AsRef<str>>(entries: &[(S, bool)]) -> Vec<BackendKind> {
    let mut seen = Vec::new();
    for (name, available) in entries {
        if !available {
            continue;
        }
        if let Some(kind) = normalize(name.as_ref()) {
            if !seen.contains(&kind) {
                seen.push(kind);
            }
        }
    }
    seen
}
