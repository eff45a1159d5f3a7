// SPDX-FileCopyrightText: 2026 Roundhouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transcript scrubbing and tty-rejection detection.
//!
//! Backend CLIs paint spinners, progress bars, and colored banners even with
//! color env vars cleared. Transcripts are stripped down to plain text before
//! any parser sees them.

use std::sync::LazyLock;

use regex::Regex;

/// CSI sequences, OSC sequences (BEL or ST terminated), and stray two-byte
/// escapes.
static ANSI_ESCAPES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]|\x1b\][^\x07\x1b]*(?:\x07|\x1b\\)|\x1b[@-Z\\-_]")
        .unwrap()
});

/// Phrases CLIs print on stderr when launched without a pty.
static TTY_REJECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)not a (?:terminal|tty)|requires? (?:a )?(?:tty|terminal)|raw mode|must be run (?:from|in) a terminal|stdin is not interactive",
    )
    .unwrap()
});

/// Strip ANSI escape sequences and carriage returns, leaving plain text with
/// newlines intact.
pub fn scrub(input: &str) -> String {
    let stripped = ANSI_ESCAPES.replace_all(input, "");
    stripped.replace('\r', "")
}

/// True when the text contains a known "no tty" complaint.
pub fn is_tty_rejection(text: &str) -> bool {
    TTY_REJECTION.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_color_and_cursor_sequences() {
        let painted = "\x1b[1;32mready\x1b[0m\x1b[2K\x1b[1G> ";
        assert_eq!(scrub(painted), "ready> ");
    }

    #[test]
    fn strips_osc_title_sequences() {
        let titled = "\x1b]0;claude\x07claude-sonnet-4-6";
        assert_eq!(scrub(titled), "claude-sonnet-4-6");
    }

    #[test]
    fn drops_carriage_returns_from_spinner_redraws() {
        let spinner = "working.\rworking..\rworking...\ndone\n";
        assert_eq!(scrub(spinner), "working.working..working...\ndone\n");
    }

    #[test]
    fn plain_text_passes_through() {
        let plain = "Available models:\n  claude-opus-4-6\n";
        assert_eq!(scrub(plain), plain);
    }

    #[test]
    fn recognizes_tty_rejection_phrasings() {
        assert!(is_tty_rejection("Error: stdin is not a terminal"));
        assert!(is_tty_rejection("this command requires a TTY"));
        assert!(is_tty_rejection("failed to enter raw mode"));
        assert!(is_tty_rejection("gemini must be run from a terminal"));
        assert!(is_tty_rejection("stdin is not interactive"));
    }

    #[test]
    fn ordinary_stderr_is_not_a_rejection() {
        assert!(!is_tty_rejection("warning: config file not found"));
        assert!(!is_tty_rejection("downloading model manifest"));
        assert!(!is_tty_rejection(""));
    }
}
