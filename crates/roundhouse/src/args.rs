// SPDX-FileCopyrightText: 2026 Roundhouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared argument resolution: backend names and aliases from the command
//! line go through the registry's normalization exactly once, here.

use roundhouse_core::{BackendKind, RoundhouseError};
use roundhouse_registry::normalize;

/// Resolve one backend name or alias, erroring on anything unknown.
pub fn resolve_backend(raw: &str) -> Result<BackendKind, RoundhouseError> {
    normalize(raw).ok_or_else(|| RoundhouseError::UnknownBackend {
        name: raw.to_string(),
    })
}

/// Resolve a list of names, deduplicating while preserving first-seen order.
pub fn resolve_backends(raw: &[String]) -> Result<Vec<BackendKind>, RoundhouseError> {
    let mut kinds = Vec::new();
    for name in raw {
        let kind = resolve_backend(name)?;
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }
    Ok(kinds)
}
