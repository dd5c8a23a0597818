use crate::{Position, PositionProvider, Span, Token};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A token with start and end positions.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TokenExt<'a> {
    /// The underlying token.
    #[cfg_attr(feature = "serde", serde(borrow))]
    token: Token<'a>,
    /// The position of the start of the token.
    start_position: Position,
    /// The position of the end of the token.
    /// The end position is exclusive.
    end_position: Position,
}

impl<'a> TokenExt<'a> {
    pub(crate) fn new(token: Token<'a>, start_position: Position, end_position: Position) -> Self {
        Self {
            token,
            start_position,
            end_position,
        }
    }

    /// Get the underlying token.
    #[inline]
    pub fn token(&self) -> &Token<'a> {
        &self.token
    }

    /// Get the span of the token.
    #[inline]
    pub fn span(&self) -> Span {
        self.token.span()
    }

    /// Get the start position of the token.
    #[inline]
    pub fn start_position(&self) -> Position {
        self.start_position
    }

    /// Get the end position of the token.
    #[inline]
    pub fn end_position(&self) -> Position {
        self.end_position
    }

    /// Gives up the positions.
    pub fn into_token(self) -> Token<'a> {
        self.token
    }
}

/// An iterator over tokens with positions.
#[derive(Debug)]
pub struct WithPositions<I> {
    iter: I,
}

impl<I> WithPositions<I> {
    /// Create a new `WithPositions` iterator.
    pub(crate) fn new(iter: I) -> Self {
        Self { iter }
    }
}

impl<'a, I> Iterator for WithPositions<I>
where
    I: Iterator<Item = Token<'a>> + PositionProvider,
{
    type Item = TokenExt<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|token| {
            let start_position = self.iter.position(token.start());
            let end_position = self.iter.position(token.end());
            TokenExt::new(token, start_position, end_position)
        })
    }
}

/// An extension trait for iterators over tokens.
pub trait TokenExtIterator<'a>: Iterator<Item = Token<'a>> + PositionProvider + Sized {
    /// An iterator that yields tokens with positions.
    fn with_positions(self) -> WithPositions<Self> {
        WithPositions::new(self)
    }
}

// Implement the trait for all types that implement the required traits.
impl<'a, I: Iterator<Item = Token<'a>> + PositionProvider + Sized> TokenExtIterator<'a> for I {}

impl<I> PositionProvider for WithPositions<I>
where
    I: PositionProvider,
{
    fn position(&self, offset: usize) -> Position {
        self.iter.position(offset)
    }
}
