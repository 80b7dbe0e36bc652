//! Error types for loading configuration and reading input.
//!
//! List functions never fail; these errors only come from the surfaces
//! around them.

use std::fmt;
use std::path::{Path, PathBuf};

/// Where in a file an error occurred.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Position {
    /// Line number (1-based).
    pub line: Option<usize>,
    /// Column number (1-based).
    pub column: Option<usize>,
}

impl Position {
    /// Create a position at a line and column.
    pub fn at(line: usize, column: usize) -> Self {
        Self {
            line: Some(line),
            column: Some(column),
        }
    }
}

/// An error with an optional file and position.
#[derive(Debug)]
pub struct Error {
    /// The error message.
    pub message: String,
    /// The file being read, if any.
    pub path: Option<PathBuf>,
    /// Position information for the error.
    pub position: Position,
}

impl Error {
    /// Create an error with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
            position: Position::default(),
        }
    }

    /// Create an error about a file.
    pub fn in_file(message: impl Into<String>, path: &Path) -> Self {
        Self {
            message: message.into(),
            path: Some(path.to_path_buf()),
            position: Position::default(),
        }
    }

    /// Add a line and column to an existing error.
    pub fn with_position(mut self, line: usize, column: usize) -> Self {
        self.position = Position::at(line, column);
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(path) = &self.path {
            write!(f, " in {}", path.display())?;
        }
        match (self.position.line, self.position.column) {
            (Some(line), Some(column)) => write!(f, " (at line {}, column {})", line, column),
            (Some(line), None) => write!(f, " (at line {})", line),
            _ => Ok(()),
        }
    }
}

impl std::error::Error for Error {}

/// Result type for configuration and input handling.
pub type Result<T> = std::result::Result<T, Error>;
