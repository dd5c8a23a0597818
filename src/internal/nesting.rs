use log::debug;

/// The character a line is indented with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum IndentChar {
    Space,
    Tab,
}

impl IndentChar {
    pub(crate) fn of(ch: char) -> Option<Self> {
        match ch {
            ' ' => Some(IndentChar::Space),
            '\t' => Some(IndentChar::Tab),
            _ => None,
        }
    }
}

/// The measured indentation of one line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Indentation {
    /// Number of leading blank characters.
    pub(crate) column: usize,
    /// The first indent character.
    pub(crate) first: IndentChar,
    /// Both spaces and tabs were found.
    pub(crate) mixed: bool,
}

impl Indentation {
    /// Measures the leading blanks of the given text.
    /// Returns `None` if the text does not start with a blank.
    pub(crate) fn measure(text: &str) -> Option<Self> {
        let mut chars = text.chars().map_while(IndentChar::of);
        let first = chars.next()?;
        let mut indentation = Indentation {
            column: 1,
            first,
            mixed: false,
        };
        for ch in chars {
            indentation.column += 1;
            indentation.mixed |= ch != first;
        }
        Some(indentation)
    }
}

/// Tracks the nesting depth across indented lines.
#[derive(Clone, Debug)]
pub(crate) struct NestingTracker {
    last_column: usize,
    depth: usize,
    // The indent character of the indented lines since the last reset
    indent_char: Option<IndentChar>,
}

impl NestingTracker {
    pub(crate) fn new() -> Self {
        Self {
            last_column: 0,
            depth: 1,
            indent_char: None,
        }
    }

    #[inline]
    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    /// Back to the top level.
    pub(crate) fn reset(&mut self) {
        *self = Self::new();
    }

    /// Enters an indented line and returns its depth.
    ///
    /// The depth changes by at most one level per line and never drops below 1.
    pub(crate) fn enter(&mut self, column: usize) -> usize {
        if column > self.last_column {
            self.depth += 1;
        } else if column < self.last_column {
            self.depth = self.depth.saturating_sub(1).max(1);
        }
        debug!(
            "Indentation column {} -> {}, depth {}",
            self.last_column, column, self.depth
        );
        self.last_column = column;
        self.depth
    }

    /// Checks that the indentation is consistent with the previously indented lines.
    pub(crate) fn accepts(&mut self, indentation: &Indentation) -> bool {
        if indentation.mixed {
            return false;
        }
        match self.indent_char {
            Some(ch) => ch == indentation.first,
            None => {
                self.indent_char = Some(indentation.first);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure() {
        assert_eq!(Indentation::measure("x"), None);
        assert_eq!(
            Indentation::measure("  x"),
            Some(Indentation {
                column: 2,
                first: IndentChar::Space,
                mixed: false
            })
        );
        assert_eq!(
            Indentation::measure("\t x"),
            Some(Indentation {
                column: 2,
                first: IndentChar::Tab,
                mixed: true
            })
        );
    }

    #[test]
    fn test_depth_follows_columns() {
        let mut tracker = NestingTracker::new();
        assert_eq!(tracker.depth(), 1);
        assert_eq!(tracker.enter(1), 2);
        assert_eq!(tracker.enter(2), 3);
        assert_eq!(tracker.enter(2), 3);
        assert_eq!(tracker.enter(1), 2);
        // A dedent by several columns still leaves only one level
        assert_eq!(tracker.enter(4), 3);
        assert_eq!(tracker.enter(0), 2);
        tracker.reset();
        assert_eq!(tracker.depth(), 1);
    }

    #[test]
    fn test_depth_never_below_one() {
        let mut tracker = NestingTracker::new();
        tracker.enter(3);
        tracker.enter(2);
        assert_eq!(tracker.enter(1), 1);
        assert_eq!(tracker.enter(0), 1);
    }

    #[test]
    fn test_consistent_indent_char() {
        let mut tracker = NestingTracker::new();
        let spaces = Indentation::measure("  x").unwrap();
        let tabs = Indentation::measure("\tx").unwrap();
        let mixed = Indentation::measure(" \tx").unwrap();
        assert!(tracker.accepts(&spaces));
        assert!(!tracker.accepts(&tabs));
        assert!(!tracker.accepts(&mixed));
        tracker.reset();
        assert!(tracker.accepts(&tabs));
    }
}
