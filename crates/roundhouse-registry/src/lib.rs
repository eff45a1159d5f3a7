// SPDX-FileCopyrightText: 2026 Roundhouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static backend registry for the Roundhouse coordinator.
//!
//! Holds the compiled-in profile for each supported backend CLI (strengths,
//! curated model lineup, interface features, probe hints) and the alias table
//! that maps free-form backend names onto the canonical [`BackendKind`] set.
//! Pure data and lookups; no I/O happens here.

pub mod backends;
pub mod normalize;
pub mod profile;

pub use backends::profile;
pub use normalize::{list_available, normalize};
pub use profile::{BackendProfile, Features, ProbeHints, ProfileModel, Strengths};

pub use roundhouse_core::BackendKind;
