//! Library error types

use std::path::PathBuf;

use thiserror::Error;

/// Result alias for library operations
pub type LibraryResult<T> = std::result::Result<T, LibraryError>;

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("Invalid library file {}: {message}", path.display())]
    Format { path: PathBuf, message: String },

    #[error("Book title is required.")]
    EmptyTitle,

    #[error("This book already exists: '{0}'")]
    DuplicateTitle(String),

    #[error("No book titled '{0}' in the library.")]
    NotFound(String),

    #[error("Failed to {action} {}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LibraryError {
    pub(crate) fn format(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        LibraryError::Format {
            path: path.into(),
            message: message.into(),
        }
    }

    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LibraryError::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Returns true for validation outcomes the caller can act on by retrying
    /// with different input; false for storage failures.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            LibraryError::EmptyTitle | LibraryError::DuplicateTitle(_) | LibraryError::NotFound(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_distinct() {
        let messages = [
            LibraryError::format("books.csv", "bad header").to_string(),
            LibraryError::EmptyTitle.to_string(),
            LibraryError::DuplicateTitle("Dune".into()).to_string(),
            LibraryError::NotFound("Dune".into()).to_string(),
        ];

        assert_eq!(messages[0], "Invalid library file books.csv: bad header");
        assert_eq!(messages[1], "Book title is required.");
        assert!(messages[2].contains("already exists"));
        assert!(messages[3].contains("No book titled 'Dune'"));
    }

    #[test]
    fn recoverable_kinds() {
        assert!(LibraryError::EmptyTitle.is_recoverable());
        assert!(LibraryError::DuplicateTitle("x".into()).is_recoverable());
        assert!(LibraryError::NotFound("x".into()).is_recoverable());
        assert!(!LibraryError::format("x", "y").is_recoverable());

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(!LibraryError::io("write", "books.csv", io).is_recoverable());
    }
}
