//! Terminal output formatting and utilities.
//!
//! This module provides consistent output formatting across all commands.
//! Results go to stdout; status lines go to stderr so `grove json` stays pipeable.

pub mod errors;

use grove_core::utils::ColorSupport;

/// Output handler for consistent terminal formatting
pub struct OutputHandler {
    colors: ColorSupport,
}

impl OutputHandler {
    /// Create a new output handler
    pub fn new(colors: ColorSupport) -> Self {
        Self { colors }
    }

    /// Colour settings in use
    pub fn colors(&self) -> &ColorSupport {
        &self.colors
    }

    /// Print a line of command output
    pub fn line(&self, message: &str) {
        println!("{}", message);
    }

    /// Print a dimmed line of command output
    pub fn info(&self, message: &str) {
        println!("{}", self.colors.dim(message));
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", self.colors.green("✓"), message);
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", self.colors.yellow("⚠"), message);
    }
}

impl Default for OutputHandler {
    fn default() -> Self {
        Self::new(ColorSupport::detect())
    }
}
