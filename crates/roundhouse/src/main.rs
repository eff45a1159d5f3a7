// SPDX-FileCopyrightText: 2026 Roundhouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Roundhouse - coordinator for AI coding-assistant CLIs.
//!
//! This is the binary entry point. Each subcommand lives in its own module
//! with a `run_*` function taking the loaded configuration and its flags.

mod args;
mod assign;
mod classify;
mod models;
mod probe;
mod quota;

use clap::{Parser, Subcommand};

/// Roundhouse - coordinator for AI coding-assistant CLIs.
#[derive(Parser, Debug)]
#[command(name = "roundhouse", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Probe backends interactively for live models and quota.
    Probe {
        /// Backends to probe, comma-separated (default: every known kind).
        #[arg(long, value_delimiter = ',')]
        backends: Vec<String>,
        /// Emit machine-readable JSON.
        #[arg(long)]
        json: bool,
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
    /// Show the model catalog for one backend.
    Models {
        /// Backend name or alias (claude, codex-cli, google, ...).
        backend: String,
        /// Emit machine-readable JSON.
        #[arg(long)]
        json: bool,
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
    /// Show quota usage for one backend.
    Quota {
        /// Backend name or alias.
        backend: String,
        /// Emit machine-readable JSON.
        #[arg(long)]
        json: bool,
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
    /// Classify a work description into categories and a role roster.
    Classify {
        /// Free-text description of the work.
        #[arg(trailing_var_arg = true)]
        text: Vec<String>,
        /// How many agents are already staffed on this work.
        #[arg(long, default_value_t = 0)]
        existing_agents: usize,
        /// Emit machine-readable JSON.
        #[arg(long)]
        json: bool,
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
    /// Assign a backend and model to one role.
    Assign {
        /// Role to staff (coder, reviewer, tester, ...).
        #[arg(long, default_value = "coder")]
        role: String,
        /// Free-text description of the work.
        #[arg(trailing_var_arg = true)]
        text: Vec<String>,
        /// Restrict candidates to these backends, comma-separated.
        #[arg(long, value_delimiter = ',')]
        available: Vec<String>,
        /// Force a specific backend, skipping scoring.
        #[arg(long)]
        backend: Option<String>,
        /// Emit machine-readable JSON.
        #[arg(long)]
        json: bool,
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match roundhouse_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            roundhouse_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.coordinator.log_level);

    let result = match cli.command {
        Some(Commands::Probe {
            backends,
            json,
            plain,
        }) => probe::run_probe(&config, &backends, json, plain).await,
        Some(Commands::Models {
            backend,
            json,
            plain,
        }) => models::run_models(&config, &backend, json, plain).await,
        Some(Commands::Quota {
            backend,
            json,
            plain,
        }) => quota::run_quota(&config, &backend, json, plain).await,
        Some(Commands::Classify {
            text,
            existing_agents,
            json,
            plain,
        }) => classify::run_classify(&text, existing_agents, json, plain),
        Some(Commands::Assign {
            role,
            text,
            available,
            backend,
            json,
            plain,
        }) => {
            assign::run_assign(
                &config,
                &role,
                &text,
                &available,
                backend.as_deref(),
                json,
                plain,
            )
            .await
        }
        None => {
            println!("roundhouse: use --help for available commands");
            Ok(())
        }
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber with the given log level. Logs go to
/// stderr so `--json` output on stdout stays parseable.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("roundhouse={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        super::Cli::command().debug_assert();
    }

    #[test]
    fn binary_loads_config_defaults() {
        // Verify config loads with defaults (no config file needed)
        let config =
            roundhouse_config::load_and_validate().expect("default config should be valid");
        assert_eq!(config.coordinator.log_level, "info");
    }
}
