//! Transient user notifications (message + severity).

use colored::Colorize;

/// Print a success notice.
pub fn success(message: &str) {
    println!("{} {message}", "✓".green());
}

/// Print an informational notice.
pub fn info(message: &str) {
    println!("{message}");
}

/// Print a warning notice to stderr.
pub fn warn(message: &str) {
    eprintln!("{} {message}", "warning:".yellow());
}
