// SPDX-FileCopyrightText: 2026 Roundhouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Opportunistic readers for provider-side cache files on local disk.
//!
//! Both readers are strictly read-only and best-effort: a missing file,
//! malformed JSON, or a stale timestamp yields `None` and the caller falls
//! through to the next fetch strategy. This core never writes these files.

use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use roundhouse_core::ModelEntry;

/// Claude-side model cache: `fetched_at` plus a `models[]` array.
#[derive(Debug, Deserialize)]
struct CachedModelFile {
    fetched_at: Stamp,
    #[serde(default)]
    models: Vec<CachedModelRow>,
}

#[derive(Debug, Deserialize)]
struct CachedModelRow {
    slug: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    visibility: Option<String>,
}

/// The provider has shipped both RFC 3339 strings and epoch milliseconds.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Stamp {
    Iso(DateTime<Utc>),
    Millis(i64),
}

impl Stamp {
    fn as_utc(&self) -> Option<DateTime<Utc>> {
        match self {
            Stamp::Iso(at) => Some(*at),
            Stamp::Millis(ms) => DateTime::from_timestamp_millis(*ms),
        }
    }
}

/// Read a claude-style model cache file, rejecting it when `fetched_at` is
/// older than the staleness ceiling. Hidden entries are excluded.
pub fn read_claude_model_cache(path: &Path, staleness: Duration) -> Option<Vec<ModelEntry>> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            debug!(path = %path.display(), error = %err, "model cache file unreadable");
            return None;
        }
    };
    let parsed: CachedModelFile = match serde_json::from_str(&raw) {
        Ok(parsed) => parsed,
        Err(err) => {
            debug!(path = %path.display(), error = %err, "model cache file malformed");
            return None;
        }
    };

    let fetched_at = parsed.fetched_at.as_utc()?;
    let age = Utc::now().signed_duration_since(fetched_at);
    if age.num_seconds() < 0 || age.num_seconds() as u64 > staleness.as_secs() {
        debug!(path = %path.display(), age_secs = age.num_seconds(), "model cache file stale");
        return None;
    }

    let entries: Vec<ModelEntry> = parsed
        .models
        .into_iter()
        .filter(|row| {
            !row.visibility
                .as_deref()
                .is_some_and(|v| v.eq_ignore_ascii_case("hidden") || v.eq_ignore_ascii_case("hide"))
        })
        .map(|row| {
            let entry = ModelEntry::new(row.slug);
            match row.display_name {
                Some(label) => entry.with_label(label),
                None => entry,
            }
        })
        .collect();

    if entries.is_empty() {
        return None;
    }
    Some(entries)
}

/// Gemini-side usage file: a `modelUsage` map keyed by model id. Recovers
/// previously-used ids only; it says nothing about what else is available.
pub fn read_gemini_usage_ids(path: &Path) -> Option<Vec<String>> {
    let raw = std::fs::read_to_string(path).ok()?;
    let value: serde_json::Value = serde_json::from_str(&raw).ok()?;
    let usage = value.get("modelUsage")?.as_object()?;
    let ids: Vec<String> = usage.keys().cloned().collect();
    if ids.is_empty() {
        return None;
    }
    Some(ids)
}
