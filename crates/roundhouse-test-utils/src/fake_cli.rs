// SPDX-FileCopyrightText: 2026 Roundhouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fake backend CLI generator for probe tests.
//!
//! `FakeCli` writes a small `sh` script into a temp directory that behaves
//! like an interactive coding-assistant CLI: it prints a banner, then answers
//! `/model` and `/status`-style lines read from stdin with canned responses.
//! Variants cover the failure modes the probe runner must survive: a CLI
//! that rejects non-tty stdin, one that hangs, and one that exits right
//! after its banner.

use std::fs;
use std::io;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

enum Behavior {
    /// Answer stdin commands with the canned responses.
    Interactive,
    /// Print the message to stderr and exit nonzero before any banner.
    RejectTty(String),
    /// Print the banner, then sleep without ever reading stdin.
    Hang,
    /// Print the banner, then exit 0 immediately.
    ExitAfterBanner,
}

/// Builder for a fake backend CLI script.
pub struct FakeCli {
    /// Banner chunks with a pre-print delay in milliseconds each.
    banner: Vec<(String, u64)>,
    model_response: String,
    status_response: String,
    behavior: Behavior,
}

impl FakeCli {
    pub fn new() -> Self {
        Self {
            banner: vec![("fake backend ready\n".to_string(), 0)],
            model_response: String::new(),
            status_response: String::new(),
            behavior: Behavior::Interactive,
        }
    }

    /// Replace the banner with a single chunk printed immediately.
    pub fn banner(mut self, text: &str) -> Self {
        self.banner = vec![(text.to_string(), 0)];
        self
    }

    /// Append a banner chunk printed after a delay, for exercising the
    /// idle-timer re-arm while the CLI is still starting up.
    pub fn banner_after_ms(mut self, text: &str, delay_ms: u64) -> Self {
        self.banner.push((text.to_string(), delay_ms));
        self
    }

    /// Response printed when a `/model`-prefixed line arrives on stdin.
    pub fn on_model(mut self, text: &str) -> Self {
        self.model_response = text.to_string();
        self
    }

    /// Response printed when a `/status`- or `/usage`-prefixed line arrives.
    pub fn on_status(mut self, text: &str) -> Self {
        self.status_response = text.to_string();
        self
    }

    /// Emit the given message on stderr and exit 1 before printing anything,
    /// like a CLI that insists on a real terminal.
    pub fn reject_tty(mut self, message: &str) -> Self {
        self.behavior = Behavior::RejectTty(message.to_string());
        self
    }

    /// Print the banner and then never respond to anything.
    pub fn hang(mut self) -> Self {
        self.behavior = Behavior::Hang;
        self
    }

    /// Print the banner and exit immediately.
    pub fn exit_after_banner(mut self) -> Self {
        self.behavior = Behavior::ExitAfterBanner;
        self
    }

    /// Write the script and its response files into a fresh temp directory.
    pub fn build(self) -> io::Result<FakeCliHandle> {
        let dir = TempDir::new()?;
        let model_path = dir.path().join("model.txt");
        let status_path = dir.path().join("status.txt");
        fs::write(&model_path, &self.model_response)?;
        fs::write(&status_path, &self.status_response)?;

        let mut script = String::from("#!/bin/sh\n");
        match &self.behavior {
            Behavior::RejectTty(message) => {
                script.push_str(&format!(
                    "printf '%s\\n' {} >&2\nexit 1\n",
                    sh_quote(message)
                ));
            }
            Behavior::Interactive | Behavior::Hang | Behavior::ExitAfterBanner => {
                for (chunk, delay_ms) in &self.banner {
                    if *delay_ms > 0 {
                        script.push_str(&format!("sleep {}\n", *delay_ms as f64 / 1000.0));
                    }
                    script.push_str(&format!("printf '%s' {}\n", sh_quote(chunk)));
                }
                match &self.behavior {
                    Behavior::Hang => script.push_str("exec sleep 600\n"),
                    Behavior::ExitAfterBanner => script.push_str("exit 0\n"),
                    _ => {
                        script.push_str(&format!(
                            "while IFS= read -r line; do\n  case \"$line\" in\n    \
                             /model*) cat {} ;;\n    \
                             /status*|/usage*) cat {} ;;\n  esac\ndone\n",
                            sh_quote(&model_path.display().to_string()),
                            sh_quote(&status_path.display().to_string()),
                        ));
                    }
                }
            }
        }

        let script_path = dir.path().join("fake-backend");
        fs::write(&script_path, script)?;
        fs::set_permissions(&script_path, fs::Permissions::from_mode(0o755))?;
        Ok(FakeCliHandle {
            _dir: dir,
            script: script_path,
        })
    }
}

impl Default for FakeCli {
    fn default() -> Self {
        Self::new()
    }
}

/// A built fake CLI. Keeps its temp directory alive; dropping the handle
/// removes the script.
pub struct FakeCliHandle {
    _dir: TempDir,
    script: PathBuf,
}

impl FakeCliHandle {
    pub fn path(&self) -> &Path {
        &self.script
    }

    /// Argv vector ready to hand to a probe session spec.
    pub fn command(&self) -> Vec<String> {
        vec![self.script.display().to_string()]
    }
}

/// Single-quote a string for POSIX sh, escaping embedded quotes.
fn sh_quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "'\\''"))
}
