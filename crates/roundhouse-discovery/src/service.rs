// SPDX-FileCopyrightText: 2026 Roundhouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `DiscoveryService`: the fetch chains over cache, files, direct exec and
//! static fallback.
//!
//! The service owns the cache and the discovery config section. Catalog
//! fetches try the cheapest sources first; a dynamic result keeps exactly
//! its own models and is only label/tier-enriched from static data, never
//! padded with static entries the account might not be able to use. Cache
//! population is best-effort throughout: a poisoned lock degrades to a
//! fetch-through, it never fails the caller.

use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, info};

use roundhouse_config::model::DiscoveryConfig;
use roundhouse_core::{
    BackendKind, CatalogSource, ModelCatalog, ModelEntry, ProbeReport, QuotaSnapshot, QuotaSource,
};
use roundhouse_registry::profile;

use crate::cache::DiscoveryCache;
use crate::exec::{exec_model_ids, exec_quota, ExecLimits};
use crate::files::{read_claude_model_cache, read_gemini_usage_ids};
use crate::quota::parse_quota;

pub struct DiscoveryService {
    cache: DiscoveryCache,
    config: DiscoveryConfig,
}

impl DiscoveryService {
    pub fn new(config: DiscoveryConfig) -> Self {
        let cache = DiscoveryCache::new(
            Duration::from_secs(config.model_ttl_secs),
            Duration::from_secs(config.quota_ttl_secs),
        );
        DiscoveryService { cache, config }
    }

    pub fn cache(&self) -> &DiscoveryCache {
        &self.cache
    }

    fn exec_limits(&self) -> ExecLimits {
        ExecLimits {
            timeout: Duration::from_secs(self.config.exec_timeout_secs),
            max_output: self.config.max_capture_bytes,
        }
    }

    /// Model catalog for one backend: cache, then a provider-side cache
    /// file, then direct exec, then the static fallback list. The result is
    /// cached. Never empty for kinds that carry a static list.
    pub async fn model_catalog(&self, kind: BackendKind) -> ModelCatalog {
        match self.cache.models(kind) {
            Ok(Some(catalog)) => return catalog,
            Ok(None) => {}
            Err(err) => debug!(backend = %kind, error = %err, "model cache read failed"),
        }

        let catalog = self.fetch_catalog(kind).await;
        if let Err(err) = self.cache.set_models(catalog.clone()) {
            debug!(backend = %kind, error = %err, "model cache write failed");
        }
        catalog
    }

    async fn fetch_catalog(&self, kind: BackendKind) -> ModelCatalog {
        if let Some(entries) = self.read_catalog_file(kind) {
            info!(backend = %kind, count = entries.len(), "model catalog from local file");
            return enrich(ModelCatalog::dynamic(kind, entries));
        }

        let ids = exec_model_ids(kind, self.exec_limits()).await;
        if !ids.is_empty() {
            info!(backend = %kind, count = ids.len(), "model catalog from direct exec");
            let entries = ids.into_iter().map(ModelEntry::new).collect();
            return enrich(ModelCatalog::dynamic(kind, entries));
        }

        let entries = static_entries(kind);
        info!(backend = %kind, count = entries.len(), "model catalog from static fallback");
        ModelCatalog::fallback(kind, entries)
    }

    fn read_catalog_file(&self, kind: BackendKind) -> Option<Vec<ModelEntry>> {
        match kind {
            BackendKind::Claude => {
                let path = PathBuf::from(self.config.claude_model_cache_path.as_ref()?);
                read_claude_model_cache(
                    &path,
                    Duration::from_secs(self.config.file_staleness_secs),
                )
            }
            BackendKind::Gemini => {
                let path = PathBuf::from(self.config.gemini_usage_path.as_ref()?);
                let ids = read_gemini_usage_ids(&path)?;
                Some(ids.into_iter().map(ModelEntry::new).collect())
            }
            _ => None,
        }
    }

    /// Quota snapshot for one backend: cache, then direct exec of the
    /// status candidates when the kind has any. `None` when nothing knows.
    pub async fn quota(&self, kind: BackendKind) -> Option<QuotaSnapshot> {
        match self.cache.quota(kind) {
            Ok(Some(snapshot)) => return Some(snapshot),
            Ok(None) => {}
            Err(err) => debug!(backend = %kind, error = %err, "quota cache read failed"),
        }

        let usage = exec_quota(kind, self.exec_limits()).await?;
        let snapshot = QuotaSnapshot::new(kind, usage, QuotaSource::Cli);
        if let Err(err) = self.cache.set_quota(snapshot.clone()) {
            debug!(backend = %kind, error = %err, "quota cache write failed");
        }
        Some(snapshot)
    }

    /// Availability in [0,1] from the cached snapshot; unknown backends
    /// count as fully available.
    pub fn availability(&self, kind: BackendKind) -> f32 {
        match self.cache.quota(kind) {
            Ok(Some(snapshot)) => snapshot.availability_score(),
            _ => 1.0,
        }
    }

    /// Pre-populate both caches from a probe pass. Only backends whose
    /// probe confirmed at least one model are touched; everything else
    /// keeps its current entries (merge, not replace-all).
    pub fn absorb_reports(&self, reports: &[ProbeReport]) {
        for report in reports {
            if !report.confirmed() {
                debug!(backend = %report.backend, "probe confirmed nothing; cache untouched");
                continue;
            }

            let entries = report
                .model_probe
                .confirmed_models
                .iter()
                .cloned()
                .map(ModelEntry::new)
                .collect();
            let catalog = enrich(ModelCatalog::dynamic(report.backend, entries));
            if let Err(err) = self.cache.set_models(catalog) {
                debug!(backend = %report.backend, error = %err, "absorb models failed");
            }

            if let Some(usage) = parse_quota(report.backend, &report.status_probe.transcript) {
                let snapshot = QuotaSnapshot::new(report.backend, usage, QuotaSource::Probe);
                if let Err(err) = self.cache.set_quota(snapshot) {
                    debug!(backend = %report.backend, error = %err, "absorb quota failed");
                }
            }
            info!(
                backend = %report.backend,
                models = report.model_probe.confirmed_models.len(),
                "probe results absorbed"
            );
        }
    }

    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    pub fn invalidate_models(&self, kind: Option<BackendKind>) {
        self.cache.invalidate_models(kind);
    }

    pub fn invalidate_quota(&self, kind: Option<BackendKind>) {
        self.cache.invalidate_quota(kind);
    }
}

/// Static profile list rendered as catalog entries.
fn static_entries(kind: BackendKind) -> Vec<ModelEntry> {
    profile(kind)
        .models
        .iter()
        .map(|m| {
            ModelEntry::new(m.id)
                .with_label(m.label)
                .with_tier(m.tier)
        })
        .collect()
}

/// Backfill label and tier on dynamic entries from the static profile by id
/// match. The model set itself is preserved exactly.
fn enrich(mut catalog: ModelCatalog) -> ModelCatalog {
    debug_assert_eq!(catalog.source, CatalogSource::Dynamic);
    let profile = profile(catalog.backend);
    for entry in &mut catalog.models {
        let Some(known) = profile.model_by_id(&entry.id) else {
            continue;
        };
        if entry.label.is_none() {
            entry.label = Some(known.label.to_string());
        }
        if entry.tier.is_none() {
            entry.tier = Some(known.tier);
        }
    }
    catalog
}
