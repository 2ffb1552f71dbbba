//! Error message formatting with actionable suggestions.
//!
//! Decode failures are printed with their full explanation; everything else
//! gets a one-line message, a suggestion when one exists and the cause chain.

use grove_config::{ConfigError, DecodeError};
use grove_core::utils::ColorSupport;
use grove_core::GroveError;
use std::error::Error;

/// Error formatter with suggestions
pub struct ErrorFormatter {
    colors: ColorSupport,
}

impl ErrorFormatter {
    /// Create a new error formatter
    pub fn new(colors: ColorSupport) -> Self {
        Self { colors }
    }

    /// Format a manifest loading error
    pub fn format_config_error(&self, error: &ConfigError) -> String {
        match error {
            ConfigError::Decode(DecodeError::Read(read)) => read.render(&self.colors),
            ConfigError::Decode(DecodeError::Type(type_error)) => {
                self.format_simple(&type_error.to_string())
            }
            ConfigError::Grove(grove) => self.format_grove_error(grove),
        }
    }

    /// Format an I/O side error with context and suggestions
    pub fn format_grove_error(&self, error: &GroveError) -> String {
        let mut output = self.format_simple(&error.to_string());

        if let Some(suggestion) = error.suggestion() {
            output.push('\n');
            output.push_str(&self.colors.dim("help"));
            output.push_str(": ");
            output.push_str(suggestion);
            output.push('\n');
        }

        let mut source = error.source();
        while let Some(err) = source {
            output.push_str(&self.colors.dim("caused by"));
            output.push_str(": ");
            output.push_str(&err.to_string());
            output.push('\n');
            source = err.source();
        }

        output
    }

    /// Format any other error with its context chain
    pub fn format_anyhow(&self, error: &anyhow::Error) -> String {
        let mut output = self.format_simple(&error.to_string());
        for cause in error.chain().skip(1) {
            output.push_str(&self.colors.dim("caused by"));
            output.push_str(": ");
            output.push_str(&cause.to_string());
            output.push('\n');
        }
        output
    }

    /// Format a simple error message
    pub fn format_simple(&self, message: &str) -> String {
        format!("{}: {}\n", self.colors.red("error"), message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grove_config::{ConfigReadError, TypeError};

    fn formatter() -> ErrorFormatter {
        ErrorFormatter::new(ColorSupport::disabled())
    }

    #[test]
    fn test_read_errors_use_full_explanation() {
        let err = ConfigError::from(ConfigReadError::KeyIsMissing {
            key: "name".to_string(),
        });
        let output = formatter().format_config_error(&err);
        assert!(output.starts_with("Error: Missing key in the configuration\n\nExplanation: "));
        assert!(output.ends_with("↳ name\n"));
    }

    #[test]
    fn test_type_errors_are_passed_through() {
        let err = ConfigError::Decode(DecodeError::Type(TypeError::NoneNeedsAnnotation));
        assert_eq!(
            formatter().format_config_error(&err),
            "error: An empty optional requires a type annotation\n"
        );
    }

    #[test]
    fn test_grove_errors_include_help_and_cause() {
        let err = ConfigError::Grove(GroveError::ManifestNotFound {
            searched: "/work".to_string(),
            candidates: "grove.dhall, grove.json".to_string(),
        });
        let output = formatter().format_config_error(&err);
        assert!(output.starts_with("error: No manifest found"));
        assert!(output.contains("help: Run grove from your project directory"));

        let io = GroveError::io(
            "Failed to read grove.json".to_string(),
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let output = formatter().format_grove_error(&io);
        assert!(output.ends_with("caused by: denied\n"));
    }

    #[test]
    fn test_anyhow_chain() {
        let err = anyhow::anyhow!("inner").context("outer");
        assert_eq!(formatter().format_anyhow(&err), "error: outer\ncaused by: inner\n");
    }
}
