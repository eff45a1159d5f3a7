// SPDX-FileCopyrightText: 2026 Roundhouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Work-intent classification, backend assignment, and model routing.
//!
//! Three pure layers over the static registry: [`intent`] turns free text
//! into a category distribution and role roster, [`assign`] scores candidate
//! backends for each role against cached availability, and [`routing`]
//! resolves the concrete model id and its fallback chain. Nothing here
//! spawns a process or awaits; discovery state arrives through arguments.

pub mod assign;
pub mod intent;
pub mod routing;

pub use assign::{AssignContext, Assignment, AssignmentEngine, BudgetConstraint};
pub use intent::{
    classify_intent, Complexity, DurationClass, RoleSuggestion, WorkCategory, WorkIntent,
};
pub use routing::{
    fallback_chain, model_matches_backend, resolve_model, TaskType, GLOBAL_DEFAULT_MODEL,
};
