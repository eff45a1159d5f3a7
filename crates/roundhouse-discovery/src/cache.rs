// SPDX-FileCopyrightText: 2026 Roundhouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Time-boxed in-memory stores for model catalogs and quota snapshots.
//!
//! `DiscoveryCache` is an owned service object: the host constructs one and
//! passes it by reference, so there is no module-level mutable state. The
//! two stores are independent, each with its own TTL and invalidation
//! entry points. A `set` always restamps the entry, which is how external
//! pre-population (a probe pass) extends an entry's validity window.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use roundhouse_core::{BackendKind, ModelCatalog, QuotaSnapshot, RoundhouseError};

struct Timestamped<T> {
    value: T,
    stored_at: Instant,
}

impl<T> Timestamped<T> {
    fn fresh(value: T) -> Self {
        Timestamped {
            value,
            stored_at: Instant::now(),
        }
    }

    fn expired(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() > ttl
    }
}

/// Independent model-catalog and quota stores keyed by backend kind.
pub struct DiscoveryCache {
    model_ttl: Duration,
    quota_ttl: Duration,
    models: Mutex<HashMap<BackendKind, Timestamped<ModelCatalog>>>,
    quota: Mutex<HashMap<BackendKind, Timestamped<QuotaSnapshot>>>,
}

impl DiscoveryCache {
    pub fn new(model_ttl: Duration, quota_ttl: Duration) -> Self {
        DiscoveryCache {
            model_ttl,
            quota_ttl,
            models: Mutex::new(HashMap::new()),
            quota: Mutex::new(HashMap::new()),
        }
    }

    /// Fresh catalog for the backend, or `None` on miss or expiry.
    pub fn models(&self, kind: BackendKind) -> Result<Option<ModelCatalog>, RoundhouseError> {
        let store = self
            .models
            .lock()
            .map_err(|e| RoundhouseError::Internal(format!("model cache lock poisoned: {e}")))?;
        Ok(store
            .get(&kind)
            .filter(|entry| !entry.expired(self.model_ttl))
            .map(|entry| entry.value.clone()))
    }

    /// Store a catalog, restamping its validity window.
    pub fn set_models(&self, catalog: ModelCatalog) -> Result<(), RoundhouseError> {
        let mut store = self
            .models
            .lock()
            .map_err(|e| RoundhouseError::Internal(format!("model cache lock poisoned: {e}")))?;
        store.insert(catalog.backend, Timestamped::fresh(catalog));
        Ok(())
    }

    /// Fresh quota snapshot for the backend, or `None` on miss or expiry.
    pub fn quota(&self, kind: BackendKind) -> Result<Option<QuotaSnapshot>, RoundhouseError> {
        let store = self
            .quota
            .lock()
            .map_err(|e| RoundhouseError::Internal(format!("quota cache lock poisoned: {e}")))?;
        Ok(store
            .get(&kind)
            .filter(|entry| !entry.expired(self.quota_ttl))
            .map(|entry| entry.value.clone()))
    }

    /// Store a quota snapshot, restamping its validity window.
    pub fn set_quota(&self, snapshot: QuotaSnapshot) -> Result<(), RoundhouseError> {
        let mut store = self
            .quota
            .lock()
            .map_err(|e| RoundhouseError::Internal(format!("quota cache lock poisoned: {e}")))?;
        store.insert(snapshot.backend, Timestamped::fresh(snapshot));
        Ok(())
    }

    /// Drop catalog entries: one backend's, or every backend's when `None`.
    pub fn invalidate_models(&self, kind: Option<BackendKind>) {
        if let Ok(mut store) = self.models.lock() {
            match kind {
                Some(kind) => {
                    store.remove(&kind);
                }
                None => store.clear(),
            }
        }
    }

    /// Drop quota entries: one backend's, or every backend's when `None`.
    pub fn invalidate_quota(&self, kind: Option<BackendKind>) {
        if let Ok(mut store) = self.quota.lock() {
            match kind {
                Some(kind) => {
                    store.remove(&kind);
                }
                None => store.clear(),
            }
        }
    }

    /// Drop everything in both stores.
    pub fn invalidate_all(&self) {
        self.invalidate_models(None);
        self.invalidate_quota(None);
    }
}
