// SPDX-FileCopyrightText: 2026 Roundhouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Backend-specific quota parsers over scrubbed status output.
//!
//! Three dialects exist in the wild. Claude prints named scopes (session,
//! week across all models, week for sonnet) each with a percentage and a
//! reset line. Codex prints signed percentages where a negative value means
//! *remaining*, so used = 100 + value; the worst entry wins. Gemini and the
//! generic kinds print usage bars and only occasionally a number, which is
//! taken opportunistically. Parsers never fail: malformed input yields
//! `None` and the caller moves on.

use std::sync::LazyLock;

use regex::Regex;

use roundhouse_core::{BackendKind, QuotaUsage, UsageWindow};

static PCT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d{1,3})\s*%").unwrap());

static RESETS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bresets?\s+(?:in\s+)?(.+?)\s*$").unwrap());

/// Signed percentage followed by a reset interval, the codex shape.
static SIGNED_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([+-]?\d+(?:\.\d+)?)\s*%\s*resets\s+in\s+(.+?)\s*$").unwrap()
});

/// Round and clamp a raw percentage into 0..=100.
pub fn clamp_pct(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

/// Parse a status transcript with the parser matching the backend's dialect.
pub fn parse_quota(kind: BackendKind, text: &str) -> Option<QuotaUsage> {
    match kind {
        BackendKind::Claude => parse_claude_usage(text),
        BackendKind::Codex => parse_codex_status(text),
        BackendKind::Gemini | BackendKind::Opencode | BackendKind::Qwen => {
            parse_generic_status(text)
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Scope {
    Session,
    WeekAll,
    WeekSonnet,
}

/// Claude `/usage` panel: scope headers followed by `NN% used` and
/// `Resets …` lines. The first number and reset seen per scope win.
fn parse_claude_usage(text: &str) -> Option<QuotaUsage> {
    let mut session = UsageWindow::default();
    let mut week_all = UsageWindow::default();
    let mut week_sonnet = UsageWindow::default();
    let mut scope: Option<Scope> = None;

    for line in text.lines() {
        let lowered = line.to_lowercase();
        if lowered.contains("session") {
            scope = Some(Scope::Session);
        } else if lowered.contains("week") && lowered.contains("sonnet") {
            scope = Some(Scope::WeekSonnet);
        } else if lowered.contains("week") {
            scope = Some(Scope::WeekAll);
        }

        let Some(current) = scope else { continue };
        let window = match current {
            Scope::Session => &mut session,
            Scope::WeekAll => &mut week_all,
            Scope::WeekSonnet => &mut week_sonnet,
        };
        if window.used_pct.is_none()
            && let Some(cap) = PCT.captures(line)
            && let Ok(raw) = cap[1].parse::<f64>()
        {
            window.used_pct = Some(clamp_pct(raw));
        }
        if window.resets_at.is_none()
            && let Some(cap) = RESETS.captures(line)
        {
            window.resets_at = Some(cap[1].trim().to_string());
        }
    }

    if session.is_empty() && week_all.is_empty() && week_sonnet.is_empty() {
        return None;
    }
    Some(QuotaUsage::Claude {
        session,
        week_all,
        week_sonnet,
    })
}

/// Codex `/status`: `±NN.N% resets in <interval>` entries. Negative values
/// denote remaining quota, so used = 100 + value. The entry with the highest
/// used percentage fills the session window.
fn parse_codex_status(text: &str) -> Option<QuotaUsage> {
    let mut worst: Option<(u8, String)> = None;
    for line in text.lines() {
        let Some(cap) = SIGNED_ENTRY.captures(line) else {
            continue;
        };
        let Ok(value) = cap[1].parse::<f64>() else {
            continue;
        };
        let used = if value < 0.0 { 100.0 + value } else { value };
        let pct = clamp_pct(used);
        let resets = cap[2].trim().to_string();
        if worst.as_ref().is_none_or(|(best, _)| pct > *best) {
            worst = Some((pct, resets));
        }
    }

    let (pct, resets) = worst?;
    Some(QuotaUsage::Generic {
        session: UsageWindow::used(pct).with_reset(resets),
        week: UsageWindow::default(),
    })
}

/// Opportunistic parse for backends that mostly print bars: the first
/// percentage found anywhere goes to the session window, with a reset note
/// when one is present. Bars-only output parses to `None`.
fn parse_generic_status(text: &str) -> Option<QuotaUsage> {
    let mut session = UsageWindow::default();
    for line in text.lines() {
        if session.used_pct.is_none()
            && let Some(cap) = PCT.captures(line)
            && let Ok(raw) = cap[1].parse::<f64>()
        {
            session.used_pct = Some(clamp_pct(raw));
        }
        if session.resets_at.is_none()
            && let Some(cap) = RESETS.captures(line)
        {
            session.resets_at = Some(cap[1].trim().to_string());
        }
    }

    session.used_pct?;
    Some(QuotaUsage::Generic {
        session,
        week: UsageWindow::default(),
    })
}
