// SPDX-FileCopyrightText: 2026 Roundhouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model catalogs: the set of models a backend currently offers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::backend::{BackendKind, ModelTier};

/// A single model known to a backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelEntry {
    /// Model identifier as the backend spells it, e.g. `claude-sonnet-4-6`.
    pub id: String,
    /// Human-readable name, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Capability tier, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<ModelTier>,
}

impl ModelEntry {
    /// Entry with only an id; label and tier may be enriched later.
    pub fn new(id: impl Into<String>) -> Self {
        ModelEntry {
            id: id.into(),
            label: None,
            tier: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_tier(mut self, tier: ModelTier) -> Self {
        self.tier = Some(tier);
        self
    }
}

/// Where a catalog's model list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    /// Obtained from the live backend (probe transcript, CLI output, or a
    /// provider-written cache file).
    Dynamic,
    /// Compiled-in static model table.
    Fallback,
}

/// The model list for one backend at one point in time.
///
/// Catalogs are replaced wholesale on refetch, never merged in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelCatalog {
    pub backend: BackendKind,
    pub models: Vec<ModelEntry>,
    pub fetched_at: DateTime<Utc>,
    pub source: CatalogSource,
}

impl ModelCatalog {
    pub fn dynamic(backend: BackendKind, models: Vec<ModelEntry>) -> Self {
        ModelCatalog {
            backend,
            models,
            fetched_at: Utc::now(),
            source: CatalogSource::Dynamic,
        }
    }

    pub fn fallback(backend: BackendKind, models: Vec<ModelEntry>) -> Self {
        ModelCatalog {
            backend,
            models,
            fetched_at: Utc::now(),
            source: CatalogSource::Fallback,
        }
    }

    pub fn model_ids(&self) -> impl Iterator<Item = &str> {
        self.models.iter().map(|m| m.id.as_str())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.models.iter().any(|m| m.id == id)
    }
}
