#![forbid(missing_docs)]
//! # `farr_lexer`
//! The `farr_lexer` crate provides the lexer of a small line oriented rule language for find and
//! replace tools.
//!
//! A rule file consists of header lines and item lines:
//! - `@Name(...)` annotations with an optional argument list of `[Section]` references and
//!   `"string"` arguments,
//! - `[Section]` headers,
//! - item lines `LHS -> RHS` where each side is plain text, a `"string"`, a `/regex/` or a
//!   `[label]`, and
//! - indented item lines that form subsections. The indentation decides the nesting depth.
//!
//! Delimiters inside a literal are escaped by doubling them, e.g. `"say ""hi"""`.
//!
//! The lexer is built on top of a character [`Scanner`] that folds CR LF line breaks into a single
//! `'\n'` while keeping byte offsets into the original text. Tokens borrow their values from the
//! source text wherever possible.
//!
//! Malformed input is reported as [`TokenKind::Error`] tokens. The lexer never stops early and
//! always ends with an [`TokenKind::EndOfFile`] token.
//!
//! # Example
//! ```rust
//! use farr_lexer::{tokenize, LexerBuilder, TokenExtIterator, TokenKind};
//!
//! const RULES: &str = "@Case([Upper])\n[Colors]\nred -> rot\n  \"dark red\" -> /dunkel ?rot/\n";
//!
//! fn main() {
//!     let tokens = LexerBuilder::new().build(RULES).tokens().with_positions();
//!     for token in tokens {
//!         println!(
//!             "{}: {} {:?} depth {}",
//!             token.start_position(),
//!             token.token().kind(),
//!             token.token().value(),
//!             token.token().depth()
//!         );
//!     }
//!
//!     let kinds = tokenize(RULES).iter().map(|t| t.kind()).collect::<Vec<_>>();
//!     assert_eq!(
//!         kinds,
//!         vec![
//!             TokenKind::Annotation,
//!             TokenKind::AnnotationArgument,
//!             TokenKind::Section,
//!             TokenKind::Value,
//!             TokenKind::Operator,
//!             TokenKind::Value,
//!             TokenKind::String,
//!             TokenKind::Operator,
//!             TokenKind::Regex,
//!             TokenKind::EndOfFile,
//!         ]
//!     );
//! }
//! ```
//!
//! # Crate features
//! - `serde`: enabled by default. Derives `Serialize` and `Deserialize` for the public data types,
//!   e.g. to load [`LexerOptions`] from a configuration file or to store token streams.

/// Module with error definitions
mod errors;
pub use errors::{LexError, LexErrorKind, Result};

/// The module with internal implementation details.
mod internal;

/// The module with the lexer.
mod lexer;
pub use lexer::Lexer;

/// The module with the lexer builder and the lexer options.
mod lexer_builder;
pub use lexer_builder::{LexerBuilder, LexerOptions};

/// Module that provides the line mode type
mod line_mode;
pub use line_mode::LineMode;

/// Module that provides a position type
mod position;
pub use position::{Position, PositionProvider};

/// The module with the character scanner.
mod scanner;
pub use scanner::{Scanner, SliceEnding, EOF_CHAR};

/// Module that provides a Span type
mod span;
pub use span::Span;

/// Module that provides the token types
mod token;
pub use token::{Token, TokenKind};

/// Module that provides the token iterator
mod tokens;
pub use tokens::{tokenize, Tokens};

/// Module that provides a WithPositions type
mod with_positions;
pub use with_positions::{TokenExt, TokenExtIterator, WithPositions};
