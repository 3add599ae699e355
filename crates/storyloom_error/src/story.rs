//! Story document error types.

/// Reasons a raw document is rejected at load time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum FormatErrorKind {
    /// The parsed document is not a keyed mapping
    #[display("not-an-object")]
    NotAnObject,
    /// The mapping holds no keys besides `config`
    #[display("no-scenes")]
    NoScenes,
    /// The raw text is not valid JSON
    #[display("invalid JSON: {}", _0)]
    Json(String),
}

/// Specific error conditions for story operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum StoryErrorKind {
    /// Malformed or empty input document
    #[display("Invalid story format: {}", _0)]
    Format(FormatErrorKind),
    /// Operation named a scene (or part of one) that cannot be used
    #[display("Invalid argument: {}", _0)]
    InvalidArgument(String),
    /// Choice or voting option index out of range
    #[display("Index {} out of range for {} (length {})", index, collection, len)]
    Index {
        /// What was being indexed, e.g. "choices of scene 'start'"
        collection: String,
        /// Requested position
        index: usize,
        /// Number of entries present
        len: usize,
    },
    /// Failed to serialize the document on export
    #[display("Failed to serialize story: {}", _0)]
    Serialize(String),
}

/// Error type for story operations.
///
/// Every variant is a pure validation failure raised before the story is
/// touched, so receiving one means the document is unchanged.
///
/// # Examples
///
/// ```
/// use storyloom_error::{FormatErrorKind, StoryError, StoryErrorKind};
///
/// let err = StoryError::new(StoryErrorKind::Format(FormatErrorKind::NoScenes));
/// assert!(err.is_format());
/// assert!(format!("{}", err).contains("no-scenes"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Story Error: {} at line {} in {}", kind, line, file)]
pub struct StoryError {
    /// The specific error condition
    pub kind: StoryErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl StoryError {
    /// Create a new StoryError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StoryErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for a format error.
    #[track_caller]
    pub fn format(kind: FormatErrorKind) -> Self {
        Self::new(StoryErrorKind::Format(kind))
    }

    /// Shorthand for an invalid argument error.
    #[track_caller]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(StoryErrorKind::InvalidArgument(message.into()))
    }

    /// Shorthand for an out-of-range index error.
    #[track_caller]
    pub fn index(collection: impl Into<String>, index: usize, len: usize) -> Self {
        Self::new(StoryErrorKind::Index {
            collection: collection.into(),
            index,
            len,
        })
    }

    /// True for `FormatError` conditions.
    pub fn is_format(&self) -> bool {
        matches!(self.kind, StoryErrorKind::Format(_))
    }

    /// True for `InvalidArgument` conditions.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self.kind, StoryErrorKind::InvalidArgument(_))
    }

    /// True for `IndexError` conditions.
    pub fn is_index(&self) -> bool {
        matches!(self.kind, StoryErrorKind::Index { .. })
    }
}

/// Result type for story operations.
pub type StoryResult<T> = Result<T, StoryError>;
