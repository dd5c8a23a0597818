#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Describes which constructs are legal on the current line.
///
/// The mode is decided each time the lexer passes a line break, by looking at the first
/// character of the following line.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LineMode {
    /// Annotations, sections and standalone punctuation are legal.
    #[default]
    Header,
    /// An indented item line.
    Subsection,
    /// An un-indented item line.
    Item,
    /// An empty or whitespace-only line.
    Blank,
}

impl std::fmt::Display for LineMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
