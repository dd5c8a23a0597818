//! Character classes the lexer dispatches on.

use crate::scanner::EOF_CHAR;

/// Space or tab.
#[inline]
pub(crate) fn is_blank(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}

/// A character that ends the current line. The EOF sentinel ends the line as well.
#[inline]
pub(crate) fn is_line_end(ch: char) -> bool {
    ch == '\n' || ch == EOF_CHAR
}

/// Characters allowed in an annotation identifier.
#[inline]
pub(crate) fn is_identifier_char(ch: char) -> bool {
    ch.is_alphabetic()
}

/// Characters allowed in the body of a label.
/// The `]` can only appear here in its escaped, doubled form.
#[inline]
pub(crate) fn is_label_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == ' ' || ch == ']'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_classes() {
        assert!(is_blank(' ') && is_blank('\t'));
        assert!(!is_blank('\n'));
        assert!(is_line_end('\n') && is_line_end(EOF_CHAR));
        assert!(!is_line_end('\r'));
        assert!(is_identifier_char('ä'));
        assert!(!is_identifier_char('1'));
        assert!(is_label_char('1') && is_label_char(' ') && is_label_char(']'));
        assert!(!is_label_char('-'));
    }
}
