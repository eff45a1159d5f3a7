// SPDX-FileCopyrightText: 2026 Roundhouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `roundhouse models` command implementation.

use std::io::IsTerminal;

use roundhouse_config::model::RoundhouseConfig;
use roundhouse_core::{CatalogSource, RoundhouseError};
use roundhouse_discovery::DiscoveryService;

use crate::args::resolve_backend;

/// Run the `roundhouse models` command.
pub async fn run_models(
    config: &RoundhouseConfig,
    backend: &str,
    json: bool,
    plain: bool,
) -> Result<(), RoundhouseError> {
    let kind = resolve_backend(backend)?;
    let service = DiscoveryService::new(config.discovery.clone());
    let catalog = service.model_catalog(kind).await;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&catalog).unwrap_or_else(|_| "{}".to_string())
        );
        return Ok(());
    }

    let use_color = !plain && std::io::stdout().is_terminal();
    println!();
    println!("  roundhouse models ({kind})");
    println!("  {}", "-".repeat(50));

    let source = if use_color {
        use colored::Colorize;
        match catalog.source {
            CatalogSource::Dynamic => "dynamic".green().to_string(),
            CatalogSource::Fallback => "fallback".yellow().to_string(),
        }
    } else {
        catalog.source.to_string()
    };
    println!(
        "    Source: {source} (fetched {})",
        catalog.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!();

    if catalog.models.is_empty() {
        println!("    No models reported. Run `roundhouse probe` to refresh.");
    } else {
        for entry in &catalog.models {
            let label = entry.label.as_deref().unwrap_or("");
            let tier = entry
                .tier
                .map(|t| t.to_string())
                .unwrap_or_default();
            println!("    {:<28} {:<22} {tier}", entry.id, label);
        }
    }
    println!();

    Ok(())
}
