//! Error types for the CLI application.
//!
//! `CliError` is what every command handler returns; `run` maps it to an exit
//! code. `BatchValidationError` describes one bad item in a multi-item input
//! (for example a corrupt line in a score file).

use organpair_engine::errors::{GameError, PersistError};
use std::fmt;

/// Custom error type for CLI operations.
#[derive(Debug)]
pub enum CliError {
    /// I/O error (file operations, stdout/stderr writes, etc.)
    Io(std::io::Error),

    /// Invalid user input or command-line arguments
    InvalidInput(String),

    /// Configuration error
    Config(String),

    /// Engine-related error
    Engine(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(msg) => write!(f, "Engine error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<GameError> for CliError {
    fn from(error: GameError) -> Self {
        CliError::Engine(error.to_string())
    }
}

impl From<PersistError> for CliError {
    fn from(error: PersistError) -> Self {
        match error {
            PersistError::Io(e) => CliError::Io(e),
            other => CliError::Engine(other.to_string()),
        }
    }
}

/// One failed item of a batch input, with the context identifying it.
///
/// # Examples
///
/// ```rust
/// use organpair_cli::BatchValidationError;
///
/// let error = BatchValidationError {
///     item_context: 5,
///     message: "not a score record".to_string(),
/// };
/// assert_eq!(error.to_string(), "5: not a score record");
/// ```
#[derive(Debug)]
pub struct BatchValidationError<T> {
    /// Context identifying the item that failed validation
    pub item_context: T,
    /// Descriptive error message
    pub message: String,
}

impl<T: std::fmt::Display> std::fmt::Display for BatchValidationError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.item_context, self.message)
    }
}
