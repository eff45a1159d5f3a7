// SPDX-FileCopyrightText: 2026 Roundhouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canned backend CLI output used by parser tests across the workspace.
//!
//! These are scrubbed (escape-free) transcripts shaped like what the real
//! CLIs print, kept in one place so the discovery parsers and the probe
//! integration tests agree on what "realistic" output looks like.

/// Claude `/model` panel listing the three first-party models.
pub const CLAUDE_MODEL_PANEL: &str = "\
 Select model

 > 1. Default (recommended)   Opus 4.6 | claude-opus-4-6
   2. Sonnet                  claude-sonnet-4-6
   3. Haiku                   claude-haiku-4-5

 Enter to confirm
";

/// Claude `/usage` panel: three scopes, bar + percentage + reset line each.
pub const CLAUDE_USAGE_PANEL: &str = "\
 Usage

 Current session
 ****------------  31% used
 Resets 11:00pm (Europe/Berlin)

 Current week (all models)
 **--------------  14% used
 Resets Thu, Oct 16, 9:59am

 Current week (Sonnet)
 *---------------  6% used
 Resets Thu, Oct 16, 9:59am
";

/// Codex `/status` output: signed percentages where negative means
/// remaining, several limit windows.
pub const CODEX_STATUS_PANEL: &str = "\
 Status

 Usage limits
   5h limit:      -97.5% resets in 22h 21m
   Weekly limit:  -64.0% resets in 4d 2h
";

/// Single codex-style entry; 100 + (-97.5) rounds to 3.
pub const CODEX_SINGLE_ENTRY: &str = "-97.5% resets in 22h 21m";

/// Gemini `/stats` output with usage bars but no numeric percentage.
pub const GEMINI_STATS_PANEL: &str = "\
 Session Stats

 Model Usage             Reqs   Input Tokens   Output Tokens
 gemini-3-pro-preview       4         52,114           3,822

 Daily quota  ############--------
";

/// Gemini `/stats` variant that happens to include a numeric percentage.
pub const GEMINI_STATS_WITH_PCT: &str = "\
 Session Stats

 Daily quota  ############--------  62% used
 Resets in 9h 12m
";

/// Opencode model listing: provider/model slugs.
pub const OPENCODE_MODEL_PANEL: &str = "\
 opencode v0.6.3

 Models
   anthropic/claude-sonnet-4-6
   openai/gpt-5.1-codex
   google/gemini-3-flash-preview
";

/// A flat JSON model array as printed by `models list --json`.
pub const MODELS_JSON_ARRAY: &str =
    r#"[{"id":"gpt-5.1-codex","label":"GPT-5.1 Codex"},{"id":"gpt-5.1-codex-mini"}]"#;

/// Model ids buried in a nested JSON shape under mixed key names.
pub const MODELS_JSON_NESTED: &str =
    r#"{"data":{"models":[{"model_id":"qwen3-coder-plus"},{"slug":"qwen3-coder-flash"}]}}"#;

/// Gemini-side usage file: `modelUsage` keyed by model id.
pub const GEMINI_USAGE_JSON: &str = r#"{
  "modelUsage": {
    "gemini-3-pro-preview": {"requests": 12},
    "gemini-2.5-flash-lite": {"requests": 3}
  }
}"#;
