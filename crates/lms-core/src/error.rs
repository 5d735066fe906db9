//! Error types for lms-core

use std::path::PathBuf;

/// Result type for lms-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in lms-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A matcher could not be built from its pattern
    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Malformed or contradictory configuration document
    #[error("Invalid configuration ({context}): {message}")]
    ConfigValidation { context: String, message: String },

    /// A course's config type cannot be compiled into rules
    #[error("Unsupported config type: {config_type}")]
    UnsupportedConfigType { config_type: String },

    /// The archive could not be opened or an entry could not be read
    #[error("Failed to read archive {path}: {message}")]
    ArchiveRead { path: PathBuf, message: String },

    /// Unrecoverable I/O fault while staging or installing files
    #[error("Filesystem error at {path}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The remote session collaborator failed
    #[error("Session error: {message}")]
    Session { message: String },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from lms-fs
    #[error(transparent)]
    Fs(#[from] lms_fs::Error),
}

impl Error {
    pub fn config(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            context: context.into(),
            message: message.into(),
        }
    }

    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }

    pub fn archive(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::ArchiveRead {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Lift an lms-fs error raised while writing destination files.
    pub fn from_fs_write(err: lms_fs::Error) -> Self {
        match err {
            lms_fs::Error::Io { path, source } => Self::Filesystem { path, source },
            other => Self::Fs(other),
        }
    }

    pub fn session(message: impl Into<String>) -> Self {
        Self::Session {
            message: message.into(),
        }
    }

    /// Whether this error aborts only the course being processed.
    ///
    /// Configuration errors are fatal for the whole document; everything
    /// that happens while compiling or synchronizing one course is not.
    pub fn is_course_scoped(&self) -> bool {
        !matches!(
            self,
            Self::ConfigValidation { .. } | Self::InvalidPattern { .. }
        )
    }
}
