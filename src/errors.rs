use thiserror::Error;

/// The result type for the `farr_lexer` crate.
pub type Result<T> = std::result::Result<T, LexError>;

/// The error type for the `farr_lexer` crate.
///
/// Errors of this type signal a broken caller contract, e.g. a negative offset handed to the
/// scanner or a token constructed with an inverted range. Malformed input never produces a
/// `LexError`, the lexer reports it as [`crate::TokenKind::Error`] tokens instead.
#[derive(Error, Debug)]
pub struct LexError {
    /// The source of the error.
    pub source: Box<LexErrorKind>,
}

impl LexError {
    /// Create a new `LexError`.
    pub fn new(kind: LexErrorKind) -> Self {
        LexError {
            source: Box::new(kind),
        }
    }

    /// Returns the kind of the error.
    pub fn kind(&self) -> &LexErrorKind {
        &self.source
    }
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl From<LexErrorKind> for LexError {
    fn from(kind: LexErrorKind) -> Self {
        LexError::new(kind)
    }
}

/// The error kind type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// An offset points before the start of the text or is otherwise not allowed.
    #[error("Offset {offset} is out of range at index {index}")]
    OffsetOutOfRange {
        /// The offending offset.
        offset: isize,
        /// The committed index the offset is relative to.
        index: usize,
    },

    /// An offset lands inside a multi-byte character.
    #[error("Index {0} is not on a char boundary")]
    NotCharBoundary(usize),

    /// A token range whose end lies before its start.
    #[error("Invalid token range {start}..{end}")]
    InvalidRange {
        /// Start of the range.
        start: usize,
        /// End of the range.
        end: usize,
    },

    /// A token depth below 1.
    #[error("Invalid token depth {0}, depth must be at least 1")]
    InvalidDepth(usize),

    /// A numeric token kind that is not a member of [`crate::TokenKind`].
    #[error("Undefined token kind {0}")]
    UndefinedTokenKind(u16),
}
