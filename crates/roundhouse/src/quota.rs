// SPDX-FileCopyrightText: 2026 Roundhouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `roundhouse quota` command implementation.

use std::io::IsTerminal;

use roundhouse_config::model::RoundhouseConfig;
use roundhouse_core::RoundhouseError;
use roundhouse_discovery::DiscoveryService;

use crate::args::resolve_backend;

/// Run the `roundhouse quota` command.
pub async fn run_quota(
    config: &RoundhouseConfig,
    backend: &str,
    json: bool,
    plain: bool,
) -> Result<(), RoundhouseError> {
    let kind = resolve_backend(backend)?;
    let service = DiscoveryService::new(config.discovery.clone());
    let snapshot = service.quota(kind).await;

    if json {
        let rendered = match &snapshot {
            Some(snap) => {
                serde_json::to_string_pretty(snap).unwrap_or_else(|_| "{}".to_string())
            }
            None => "null".to_string(),
        };
        println!("{rendered}");
        return Ok(());
    }

    let use_color = !plain && std::io::stdout().is_terminal();
    println!();
    println!("  roundhouse quota ({kind})");
    println!("  {}", "-".repeat(50));

    let Some(snapshot) = snapshot else {
        println!("    No quota information available.");
        println!("    Run `roundhouse probe` to refresh live data.");
        println!();
        return Ok(());
    };

    for (label, window) in snapshot.usage.windows() {
        let Some(pct) = window.used_pct else {
            continue;
        };
        let pct_text = format_pct(pct, use_color);
        let reset = window
            .resets_at
            .as_deref()
            .map(|r| format!(", resets {r}"))
            .unwrap_or_default();
        println!("    {label:<18} {pct_text} used{reset}");
    }
    println!();
    println!(
        "    Availability score: {:.2}",
        snapshot.availability_score()
    );
    println!();

    Ok(())
}

/// Usage percentage, colored by how close it is to the ceiling.
fn format_pct(pct: u8, use_color: bool) -> String {
    let text = format!("{pct}%");
    if !use_color {
        return text;
    }
    use colored::Colorize;
    if pct >= 90 {
        text.red().to_string()
    } else if pct >= 70 {
        text.yellow().to_string()
    } else {
        text.green().to_string()
    }
}
