//! Console output helpers

use colored::*;

/// Formatted output for CLI commands
pub struct CliConsole {
    color: bool,
}

impl CliConsole {
    pub fn new(color: bool) -> Self {
        if !color {
            colored::control::set_override(false);
        }
        Self { color }
    }

    /// Whether diff reports should be colorized
    pub fn color(&self) -> bool {
        self.color
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", "✓".green().bold(), message);
    }

    pub fn warn(&self, message: &str) {
        println!("{} {}", "⚠".yellow().bold(), message.yellow());
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red().bold(), message.red());
    }

    /// Print without decoration
    pub fn plain(&self, message: &str) {
        println!("{}", message);
    }
}
