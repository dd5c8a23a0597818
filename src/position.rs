//! Module with the position type and functions.
//! A position is a struct that contains a line and column number.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A position in the source text.
/// The line number is 1-based, the column number is 0-based and counts logical characters, i.e.
/// a CR LF pair is a single line break.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    /// The line number of the position.
    pub line: usize,
    /// The column number of the position.
    pub column: usize,
}

impl Position {
    /// Create a new position.
    pub fn new(line: usize, column: usize) -> Self {
        debug_assert!(line > 0, "line number must be greater than 0");
        Self { line, column }
    }

    /// Get the line number of the position.
    #[inline]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Get the column number of the position.
    #[inline]
    pub fn column(&self) -> usize {
        self.column
    }

    /// The position of the next character on the same line.
    #[inline]
    #[must_use]
    pub fn next_column(self) -> Self {
        Self {
            column: self.column + 1,
            ..self
        }
    }

    /// The position of the first character on the next line.
    #[inline]
    #[must_use]
    pub fn next_line(self) -> Self {
        Self {
            line: self.line + 1,
            column: 0,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self { line: 1, column: 0 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line: {}, column: {}", self.line, self.column)
    }
}

/// A trait for providing the line and column information of a given byte offset in the text.
pub trait PositionProvider {
    /// Returns the position of the given offset.
    fn position(&self, offset: usize) -> Position;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position() {
        let pos = Position::default();
        assert_eq!(pos.line(), 1);
        assert_eq!(pos.column(), 0);
        assert_eq!(format!("{}", pos), "line: 1, column: 0");
    }

    #[test]
    fn test_next_column_and_line() {
        let pos = Position::default().next_column().next_column();
        assert_eq!(pos, Position::new(1, 2));
        let pos = pos.next_line();
        assert_eq!(pos, Position::new(2, 0));
        assert_eq!(pos.next_column(), Position::new(2, 1));
    }
}
