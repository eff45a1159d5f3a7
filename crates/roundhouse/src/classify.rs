// SPDX-FileCopyrightText: 2026 Roundhouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `roundhouse classify` command implementation.
//!
//! Pure text-in, intent-out. No config and no backend I/O; the classifier
//! works entirely from its built-in pattern tables.

use std::io::IsTerminal;

use roundhouse_core::RoundhouseError;
use roundhouse_router::{classify_intent, Complexity};

/// Run the `roundhouse classify` command.
pub fn run_classify(
    text: &[String],
    existing_agents: usize,
    json: bool,
    plain: bool,
) -> Result<(), RoundhouseError> {
    let joined = text.join(" ");
    let intent = classify_intent(&joined, existing_agents, &[]);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&intent).unwrap_or_else(|_| "{}".to_string())
        );
        return Ok(());
    }

    let use_color = !plain && std::io::stdout().is_terminal();
    println!();
    println!("  roundhouse classify");
    println!("  {}", "-".repeat(50));

    let primary_pct = intent
        .weights
        .iter()
        .find(|(cat, _)| *cat == intent.primary)
        .map(|(_, w)| (w * 100.0).round() as u32)
        .unwrap_or(100);
    println!("    {:<14} {} ({primary_pct}%)", "Primary:", intent.primary);

    if !intent.secondary.is_empty() {
        let joined = intent
            .secondary
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        println!("    {:<14} {joined}", "Secondary:");
    }

    let complexity = format_complexity(intent.complexity, use_color);
    println!("    {:<14} {complexity}", "Complexity:");
    println!("    {:<14} {}", "Duration:", intent.duration);
    println!();

    println!("    Suggested roster:");
    for role in &intent.suggested_roles {
        println!(
            "      {}x {:<14} {:<10} {}",
            role.count, role.role, role.preferred_backend.to_string(), role.reason
        );
    }
    println!();

    Ok(())
}

/// Complexity label, colored by weight class.
fn format_complexity(complexity: Complexity, use_color: bool) -> String {
    let text = complexity.to_string();
    if !use_color {
        return text;
    }
    use colored::Colorize;
    match complexity {
        Complexity::Light => text.green().to_string(),
        Complexity::Medium => text.yellow().to_string(),
        Complexity::Heavy => text.red().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_complexity_labels_match_display() {
        assert_eq!(format_complexity(Complexity::Light, false), "light");
        assert_eq!(format_complexity(Complexity::Heavy, false), "heavy");
    }
}
