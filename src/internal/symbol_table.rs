//! The table of single character punctuation tokens.

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

use crate::TokenKind;

/// Maps each punctuation character to its token kind.
static SYMBOLS: LazyLock<FxHashMap<char, TokenKind>> = LazyLock::new(|| {
    [
        ('@', TokenKind::AtSign),
        ('(', TokenKind::OpenParens),
        (')', TokenKind::CloseParens),
        (',', TokenKind::Comma),
    ]
    .into_iter()
    .collect()
});

/// Returns the punctuation kind of the given character, if it has one.
#[inline]
pub(crate) fn punctuation(ch: char) -> Option<TokenKind> {
    SYMBOLS.get(&ch).copied()
}
