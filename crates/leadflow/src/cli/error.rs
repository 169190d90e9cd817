//! Helpful error types for CLI commands
//!
//! Every error includes:
//! - What went wrong
//! - Context about the situation
//! - Suggestions for how to fix it

use std::fmt;
use std::path::Path;

/// An error with helpful context and suggestions
#[derive(Debug)]
pub struct HelpfulError {
    /// The main error message
    pub message: String,
    /// Additional context about what was happening
    pub context: Option<String>,
    /// Suggestions for how to fix the error
    pub suggestions: Vec<String>,
}

impl HelpfulError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestions(
        mut self,
        suggestions: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.suggestions
            .extend(suggestions.into_iter().map(|s| s.into()));
        self
    }

    // === Common error constructors ===

    /// Input directory missing or not a directory
    pub fn input_dir_missing(path: &Path) -> Self {
        Self::new(format!("Input directory not found: {}", path.display()))
            .with_context("The run command reads *.csv files from this directory")
            .with_suggestions([
                format!("TRY: Create it: mkdir -p {}", path.display()),
                "TRY: Point at another directory: leadflow run --input <DIR>".to_string(),
                "TRY: Set paths.input in leadflow.toml".to_string(),
            ])
    }

    /// File does not exist
    pub fn file_not_found(path: &Path) -> Self {
        Self::new(format!("File not found: {}", path.display()))
            .with_context("The specified file does not exist")
            .with_suggestions([
                format!("TRY: Check if the file exists: ls -la {}", path.display()),
                format!(
                    "TRY: Look for similar files: ls {}",
                    path.parent()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| ".".to_string())
                ),
            ])
    }

    /// Lead database could not be opened
    pub fn database_unavailable(url: &str, reason: &str) -> Self {
        Self::new("Failed to open lead database")
            .with_context(format!("Database: {} ({})", url, reason))
            .with_suggestions([
                "TRY: Check database.url in leadflow.toml (only sqlite: URLs are supported)"
                    .to_string(),
                "TRY: Check write permissions on the database directory".to_string(),
                "TRY: leadflow config   # Show the resolved configuration".to_string(),
            ])
    }

    /// Configuration could not be loaded
    pub fn invalid_config(reason: &str) -> Self {
        Self::new("Invalid configuration")
            .with_context(reason.to_string())
            .with_suggestions([
                "TRY: Check the file passed with --config or LEADFLOW_CONFIG".to_string(),
                "TRY: Remove keys you did not mean to set; every key has a default".to_string(),
            ])
    }
}

impl fmt::Display for HelpfulError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ERROR: {}", self.message)?;

        if let Some(ctx) = &self.context {
            writeln!(f, "CONTEXT: {}", ctx)?;
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            for suggestion in &self.suggestions {
                writeln!(f, "  {}", suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for HelpfulError {}

/// Print an error as a single JSON object on stdout.
pub fn print_json_error(err: &anyhow::Error) {
    let payload = match err.downcast_ref::<HelpfulError>() {
        Some(helpful) => serde_json::json!({
            "error": helpful.message,
            "context": helpful.context,
            "suggestions": helpful.suggestions,
        }),
        None => serde_json::json!({
            "error": err.to_string(),
            "causes": err.chain().skip(1).map(|c| c.to_string()).collect::<Vec<_>>(),
        }),
    };
    println!("{}", payload);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_helpful_error_display() {
        let err = HelpfulError::new("Something went wrong")
            .with_context("While processing data")
            .with_suggestions(["Try again"]);

        let display = format!("{}", err);
        assert!(display.contains("ERROR: Something went wrong"));
        assert!(display.contains("CONTEXT: While processing data"));
        assert!(display.contains("Try again"));
    }

    #[test]
    fn test_input_dir_missing() {
        let err = HelpfulError::input_dir_missing(&PathBuf::from("/nonexistent/input"));
        let display = format!("{}", err);
        assert!(display.contains("Input directory not found"));
        assert!(display.contains("mkdir -p /nonexistent/input"));
    }

    #[test]
    fn test_downcast_through_anyhow() {
        let err: anyhow::Error = HelpfulError::database_unavailable("sqlite:x", "locked").into();
        let helpful = err.downcast_ref::<HelpfulError>().unwrap();
        assert_eq!(helpful.message, "Failed to open lead database");
        assert_eq!(helpful.suggestions.len(), 3);
    }
}
