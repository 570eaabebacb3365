//! Terminal output utilities: ANSI-formatted notes.

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";

/// Check if the terminal supports color output.
pub fn supports_color() -> bool {
    std::env::var("NO_COLOR").is_err()
        && (std::env::var("COLORTERM").is_ok()
            || std::env::var("TERM")
                .map(|t| t != "dumb")
                .unwrap_or(false))
}

fn note(color: &str, symbol: &str, plain: &str, msg: &str, colored: bool) -> String {
    if colored {
        format!("{color}{BOLD}{symbol}{RESET} {msg}")
    } else {
        format!("{plain}: {msg}")
    }
}

/// Print a formatted WARNING note.
pub fn note_warn(msg: &str) {
    println!("{}", note(YELLOW, "⚠", "WARN", msg, supports_color()));
}

/// Print a formatted ERROR note to stderr.
pub fn note_error(msg: &str) {
    eprintln!("{}", note(RED, "✗", "ERROR", msg, supports_color()));
}

/// Print a formatted SUCCESS note.
pub fn note_success(msg: &str) {
    println!("{}", note(GREEN, "✓", "OK", msg, supports_color()));
}
