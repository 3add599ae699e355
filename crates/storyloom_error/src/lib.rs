//! Error types for the Storyloom workspace.
//!
//! Every error records the source line and file where it was constructed.
//! Story operations return [`StoryError`]; the binary and configuration
//! layers fold everything into [`StoryloomError`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod io;
mod story;

pub use config::ConfigError;
pub use io::IoError;
pub use story::{FormatErrorKind, StoryError, StoryErrorKind, StoryResult};

/// Crate-level error variants.
#[derive(Debug, derive_more::From, derive_more::Display)]
pub enum StoryloomErrorKind {
    /// Story load, validation or mutation error
    #[display("{}", _0)]
    Story(StoryError),
    /// Configuration error
    #[display("{}", _0)]
    Config(ConfigError),
    /// File I/O error
    #[display("{}", _0)]
    Io(IoError),
}

/// Storyloom error with kind discrimination.
#[derive(Debug, derive_more::Display)]
#[display("Storyloom Error: {}", _0)]
pub struct StoryloomError(Box<StoryloomErrorKind>);

impl StoryloomError {
    /// Create a new error from a kind.
    pub fn new(kind: StoryloomErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StoryloomErrorKind {
        &self.0
    }
}

impl std::error::Error for StoryloomError {}

// Generic From implementation for any type that converts to StoryloomErrorKind
impl<T> From<T> for StoryloomError
where
    T: Into<StoryloomErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Storyloom operations.
pub type StoryloomResult<T> = std::result::Result<T, StoryloomError>;
