use std::borrow::Cow;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{LexError, LexErrorKind, Result, Span};

/// The kind of a token.
///
/// A token carries two kinds: its primary `kind` and a secondary `context` that tells what an
/// [`TokenKind::AnnotationArgument`] or an item value actually holds.
/// The numeric codes are stable and can be obtained with [`TokenKind::code`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u16)]
pub enum TokenKind {
    /// No kind, used for tokens without a context.
    #[default]
    None = 0,

    /// A `[Name]` section header.
    Section = 100,
    /// An indented line.
    Subsection = 101,
    /// An un-indented content line.
    Item = 102,

    /// An `@Name` annotation.
    Annotation = 200,
    /// One argument of an annotation argument list.
    AnnotationArgument = 202,

    /// Plain item text.
    Value = 301,
    /// A bracket delimited literal.
    Label = 302,
    /// An identifier.
    Identifier = 303,

    /// The `->` operator.
    Operator = 400,
    /// The left hand side of an item.
    Lhs = 401,
    /// The right hand side of an item.
    Rhs = 402,

    /// A quote delimited literal.
    String = 501,
    /// A slash delimited literal.
    Regex = 503,

    /// The end of the text.
    EndOfFile = 601,
    /// A line break.
    NewLine = 602,
    /// The indentation of a line.
    Indent = 603,
    /// A tab character.
    Tab = 604,
    /// A space character.
    Space = 605,

    /// Malformed input.
    Error = 700,

    /// A standalone `@`.
    AtSign = 900,
    /// A standalone `(`.
    OpenParens = 901,
    /// A standalone `)`.
    CloseParens = 902,
    /// A standalone `,`.
    Comma = 903,
}

impl TokenKind {
    /// All token kinds.
    pub const ALL: [TokenKind; 24] = [
        TokenKind::None,
        TokenKind::Section,
        TokenKind::Subsection,
        TokenKind::Item,
        TokenKind::Annotation,
        TokenKind::AnnotationArgument,
        TokenKind::Value,
        TokenKind::Label,
        TokenKind::Identifier,
        TokenKind::Operator,
        TokenKind::Lhs,
        TokenKind::Rhs,
        TokenKind::String,
        TokenKind::Regex,
        TokenKind::EndOfFile,
        TokenKind::NewLine,
        TokenKind::Indent,
        TokenKind::Tab,
        TokenKind::Space,
        TokenKind::Error,
        TokenKind::AtSign,
        TokenKind::OpenParens,
        TokenKind::CloseParens,
        TokenKind::Comma,
    ];

    /// The numeric code of the kind.
    #[inline]
    pub fn code(self) -> u16 {
        self as u16
    }

    /// True for the kinds that only describe whitespace or the end of the text.
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::Space
                | TokenKind::Tab
                | TokenKind::NewLine
                | TokenKind::Indent
                | TokenKind::EndOfFile
        )
    }
}

impl TryFrom<u16> for TokenKind {
    type Error = LexError;

    fn try_from(code: u16) -> Result<Self> {
        TokenKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.code() == code)
            .ok_or_else(|| LexError::new(LexErrorKind::UndefinedTokenKind(code)))
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A token produced by the [`crate::Lexer`].
///
/// The value borrows from the source text unless escaped delimiters or a folded CR LF forced
/// a reconstructed value.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Token<'a> {
    span: Span,
    depth: usize,
    kind: TokenKind,
    context: TokenKind,
    #[cfg_attr(feature = "serde", serde(borrow))]
    value: Cow<'a, str>,
}

impl<'a> Token<'a> {
    /// Creates a new token.
    ///
    /// Fails if the span ends before it starts or if the depth is 0.
    pub fn new(
        span: Span,
        depth: usize,
        kind: TokenKind,
        context: TokenKind,
        value: impl Into<Cow<'a, str>>,
    ) -> Result<Self> {
        if span.end < span.start {
            return Err(LexError::new(LexErrorKind::InvalidRange {
                start: span.start,
                end: span.end,
            }));
        }
        if depth == 0 {
            return Err(LexError::new(LexErrorKind::InvalidDepth(depth)));
        }
        Ok(Self::new_unchecked(span, depth, kind, context, value))
    }

    // The lexer only builds tokens from committed scanner spans.
    pub(crate) fn new_unchecked(
        span: Span,
        depth: usize,
        kind: TokenKind,
        context: TokenKind,
        value: impl Into<Cow<'a, str>>,
    ) -> Self {
        debug_assert!(span.start <= span.end && depth > 0);
        Self {
            span,
            depth,
            kind,
            context,
            value: value.into(),
        }
    }

    /// The span of the token in the source text.
    #[inline]
    pub fn span(&self) -> Span {
        self.span
    }

    /// The span as range.
    #[inline]
    pub fn range(&self) -> std::ops::Range<usize> {
        self.span.range()
    }

    /// The start offset of the token.
    #[inline]
    pub fn start(&self) -> usize {
        self.span.start
    }

    /// The end offset of the token, exclusive.
    #[inline]
    pub fn end(&self) -> usize {
        self.span.end
    }

    /// The nesting depth of the line the token was found on.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The primary kind.
    #[inline]
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The secondary kind.
    #[inline]
    pub fn context(&self) -> TokenKind {
        self.context
    }

    /// The value of the token without delimiters.
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// True for error tokens.
    #[inline]
    pub fn is_error(&self) -> bool {
        self.kind == TokenKind::Error
    }

    /// Detaches the token from the source text.
    pub fn into_owned(self) -> Token<'static> {
        Token {
            span: self.span,
            depth: self.depth,
            kind: self.kind,
            context: self.context,
            value: Cow::Owned(self.value.into_owned()),
        }
    }
}

impl std::fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.kind.is_trivia() {
            Ok(())
        } else {
            write!(f, "{}", self.value)
        }
    }
}
