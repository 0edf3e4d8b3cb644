//! Error types for the CLI application.
//!
//! Every command handler returns `Result<(), CliError>` so failures propagate
//! with `?` up to [`crate::run`], which turns them into an exit code.

use std::fmt;

use cardlang_engine::errors::SequenceError;

/// Custom error type for CLI operations.
#[derive(Debug)]
pub enum CliError {
    /// I/O error (reading scenario files, writing output)
    Io(std::io::Error),

    /// Invalid user input: malformed sequence or scenario files, bad flags
    InvalidInput(String),

    /// Configuration error
    Config(String),

    /// A sequence run failed
    Engine(SequenceError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(e) => write!(f, "Engine error: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            CliError::Engine(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<SequenceError> for CliError {
    fn from(error: SequenceError) -> Self {
        CliError::Engine(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_errors_keep_their_message() {
        let e = CliError::from(SequenceError::UnsupportedDeckType {
            deck_type: "bogus".into(),
        });
        assert_eq!(e.to_string(), "Engine error: Unsupported deck type `bogus`");
        assert!(std::error::Error::source(&e).is_some());
    }
}
