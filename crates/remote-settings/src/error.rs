//! Schema validation errors.

use std::fmt;
use std::path::{Path, PathBuf};

/// A single field-level problem found while validating a settings file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Dot/index addressed field path, e.g. `hosts.0.default`.
    pub field: String,
    /// Human-readable description of the problem.
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All violations found in one settings file, reported together.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid value in configuration file {}:{}", .file.display(), render(.violations))]
pub struct SchemaValidationError {
    /// File the violations were found in.
    pub file: PathBuf,
    /// Violations in traversal order. Never empty.
    pub violations: Vec<Violation>,
}

impl SchemaValidationError {
    pub fn new(file: &Path, violations: Vec<Violation>) -> Self {
        Self {
            file: file.to_path_buf(),
            violations,
        }
    }
}

fn render(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| format!("\n  - {}", v))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_violation_report() {
        let err = SchemaValidationError::new(
            Path::new("/root/.remote.toml"),
            vec![Violation::new("general", "extra fields not permitted")],
        );

        assert_eq!(
            err.to_string(),
            "Invalid value in configuration file /root/.remote.toml:\n  - general: extra fields not permitted"
        );
    }

    #[test]
    fn test_multiple_violations_one_per_line() {
        let err = SchemaValidationError::new(
            Path::new("defaults.toml"),
            vec![
                Violation::new("hosts.0.default", "value could not be parsed to a boolean"),
                Violation::new("hosts.1.meow", "extra fields not permitted"),
            ],
        );

        let report = err.to_string();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "  - hosts.0.default: value could not be parsed to a boolean");
        assert_eq!(lines[2], "  - hosts.1.meow: extra fields not permitted");
    }
}
