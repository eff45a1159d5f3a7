// SPDX-FileCopyrightText: 2026 Roundhouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `roundhouse assign` command implementation.
//!
//! Classifies the work description, fetches live quota for every candidate
//! backend, and runs the assignment engine for the requested role.

use std::collections::HashMap;
use std::io::IsTerminal;

use roundhouse_config::model::RoundhouseConfig;
use roundhouse_core::{BackendKind, RoundhouseError};
use roundhouse_discovery::DiscoveryService;
use roundhouse_registry::normalize;
use roundhouse_router::{classify_intent, AssignContext, AssignmentEngine, BudgetConstraint};

use crate::args::{resolve_backend, resolve_backends};

/// Run the `roundhouse assign` command.
pub async fn run_assign(
    config: &RoundhouseConfig,
    role: &str,
    text: &[String],
    available: &[String],
    forced: Option<&str>,
    json: bool,
    plain: bool,
) -> Result<(), RoundhouseError> {
    let available_kinds = resolve_backends(available)?;
    let forced_kind = forced.map(resolve_backend).transpose()?;

    let joined = text.join(" ");
    let intent = classify_intent(&joined, 0, &available_kinds);

    // One-shot process: the in-memory caches start empty, so fetch quota for
    // every candidate instead of relying on cached availability.
    let service = DiscoveryService::new(config.discovery.clone());
    let candidates: &[BackendKind] = if available_kinds.is_empty() {
        &BackendKind::FIRST_CLASS
    } else {
        &available_kinds
    };
    let mut availability: HashMap<BackendKind, f32> = HashMap::new();
    for &kind in candidates {
        if let Some(snapshot) = service.quota(kind).await {
            availability.insert(kind, snapshot.availability_score());
        }
    }

    let preferred: Vec<BackendKind> = config
        .assign
        .prefer
        .iter()
        .filter_map(|name| normalize(name))
        .collect();
    let budget = BudgetConstraint::from_config(&config.assign.budget);

    let ctx = AssignContext {
        available: &available_kinds,
        availability: &availability,
        preferred: &preferred,
        budget,
        forced: forced_kind,
    };
    let assignment = AssignmentEngine::new().assign(role, &intent, &ctx);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&assignment).unwrap_or_else(|_| "{}".to_string())
        );
        return Ok(());
    }

    let use_color = !plain && std::io::stdout().is_terminal();
    println!();
    println!("  roundhouse assign");
    println!("  {}", "-".repeat(50));

    let backend = if use_color {
        use colored::Colorize;
        assignment.backend.to_string().green().to_string()
    } else {
        assignment.backend.to_string()
    };
    println!("    {:<10} {role}", "Role:");
    println!("    {:<10} {backend}", "Backend:");
    println!(
        "    {:<10} {}",
        "Model:",
        assignment.model.as_deref().unwrap_or("(none)")
    );
    println!("    {:<10} {:.2}", "Score:", assignment.score);
    println!("    {:<10} {}", "Reason:", assignment.reason);
    println!();

    Ok(())
}
