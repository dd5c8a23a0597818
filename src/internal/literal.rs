//! Scanning of delimited literals with doubled-delimiter escapes.

use std::borrow::Cow;

use log::trace;

use crate::{internal::character_class::is_line_end, Scanner, SliceEnding, Span, TokenKind};

/// The delimiter pairs of the literal kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Delimiter {
    /// `[...]`
    Bracket,
    /// `"..."`
    Quote,
    /// `/.../`
    Slash,
}

impl Delimiter {
    /// The delimiter opened by the given character.
    pub(crate) fn of(ch: char) -> Option<Self> {
        match ch {
            '[' => Some(Delimiter::Bracket),
            '"' => Some(Delimiter::Quote),
            '/' => Some(Delimiter::Slash),
            _ => None,
        }
    }

    pub(crate) fn close(self) -> char {
        match self {
            Delimiter::Bracket => ']',
            Delimiter::Quote => '"',
            Delimiter::Slash => '/',
        }
    }

    /// The token kind of a literal in value position.
    pub(crate) fn kind(self) -> TokenKind {
        match self {
            Delimiter::Bracket => TokenKind::Label,
            Delimiter::Quote => TokenKind::String,
            Delimiter::Slash => TokenKind::Regex,
        }
    }
}

/// A closed literal.
#[derive(Debug)]
pub(crate) struct Literal<'a> {
    /// The span including both delimiters.
    pub(crate) span: Span,
    /// The body with escapes folded.
    pub(crate) value: Cow<'a, str>,
    /// At least one doubled delimiter was folded.
    pub(crate) escaped: bool,
}

/// The outcome of scanning a literal.
#[derive(Debug)]
pub(crate) enum LiteralScan<'a> {
    Closed(Literal<'a>),
    /// The line or the text ended before the closing delimiter.
    /// The span and value include the opening delimiter and the newline, if any.
    Unterminated {
        span: Span,
        value: Cow<'a, str>,
        newline: bool,
    },
}

/// Scans a literal whose opening delimiter is at the committed cursor.
///
/// A closing delimiter directly followed by another one is an escaped delimiter character.
/// The scanner is committed past the literal, or past the newline that ended an unterminated one.
pub(crate) fn scan_literal<'a>(scanner: &mut Scanner<'a>, delimiter: Delimiter) -> LiteralScan<'a> {
    let close = delimiter.close();
    let start = scanner.current_index();
    scanner.reset_ahead();
    scanner.advance_ahead();
    let mut segment_start = scanner.absolute_index();
    let mut buffer: Option<String> = None;
    loop {
        let at = scanner.absolute_index();
        let ch = scanner.lookahead();
        if is_line_end(ch) {
            let newline = ch == '\n';
            if newline {
                scanner.advance_ahead();
            }
            scanner.move_ahead();
            let span = Span::new(start, scanner.current_index());
            trace!("Unterminated {:?} literal at {}", delimiter, span);
            return LiteralScan::Unterminated {
                span,
                value: fold_line_ending(scanner, span),
                newline,
            };
        }
        scanner.advance_ahead();
        if ch != close {
            continue;
        }
        if scanner.lookahead() == close {
            let buffer = buffer.get_or_insert_with(String::new);
            buffer.push_str(scanner.slice(Span::new(segment_start, at)));
            buffer.push(close);
            scanner.advance_ahead();
            segment_start = scanner.absolute_index();
            continue;
        }
        let body = scanner.slice(Span::new(segment_start, at));
        let escaped = buffer.is_some();
        let value = match buffer {
            Some(mut buffer) => {
                buffer.push_str(body);
                Cow::Owned(buffer)
            }
            None => Cow::Borrowed(body),
        };
        scanner.move_ahead();
        return LiteralScan::Closed(Literal {
            span: Span::new(start, scanner.current_index()),
            value,
            escaped,
        });
    }
}

/// The text of the span with a trailing CR LF folded to a single LF.
pub(crate) fn fold_line_ending<'a>(scanner: &Scanner<'a>, span: Span) -> Cow<'a, str> {
    let raw = scanner.slice(span);
    match scanner.slice_ending(span) {
        SliceEnding::CrLf => Cow::Owned(format!("{}\n", &raw[..raw.len() - 2])),
        _ => Cow::Borrowed(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn closed(text: &str, delimiter: Delimiter) -> (String, bool, Span) {
        let mut scanner = Scanner::new(text);
        match scan_literal(&mut scanner, delimiter) {
            LiteralScan::Closed(literal) => {
                (literal.value.into_owned(), literal.escaped, literal.span)
            }
            other => panic!("Expected a closed literal, got {:?}", other),
        }
    }

    #[test]
    fn test_plain_literal_borrows() {
        let mut scanner = Scanner::new("\"abc\" rest");
        let LiteralScan::Closed(literal) = scan_literal(&mut scanner, Delimiter::Quote) else {
            panic!("Expected a closed literal");
        };
        assert!(matches!(literal.value, Cow::Borrowed("abc")));
        assert_eq!(literal.span, Span::new(0, 5));
        assert_eq!(scanner.current_index(), 5);
    }

    #[test]
    fn test_doubled_delimiters() {
        assert_eq!(
            closed("\"A\"\"\"", Delimiter::Quote),
            ("A\"".to_string(), true, Span::new(0, 5))
        );
        assert_eq!(
            closed("[A]]]", Delimiter::Bracket),
            ("A]".to_string(), true, Span::new(0, 5))
        );
        assert_eq!(
            closed("/a//b/", Delimiter::Slash),
            ("a/b".to_string(), true, Span::new(0, 6))
        );
        assert_eq!(
            closed("\"\"", Delimiter::Quote),
            (String::new(), false, Span::new(0, 2))
        );
    }

    #[test]
    fn test_unterminated_at_newline() {
        let mut scanner = Scanner::new("[A\r\n2]");
        match scan_literal(&mut scanner, Delimiter::Bracket) {
            LiteralScan::Unterminated {
                span,
                value,
                newline,
            } => {
                assert_eq!(span, Span::new(0, 4));
                assert_eq!(value, "[A\n");
                assert!(newline);
            }
            other => panic!("Expected an unterminated literal, got {:?}", other),
        }
        assert_eq!(scanner.read_char(), '2');
    }

    #[test]
    fn test_unterminated_at_end() {
        let mut scanner = Scanner::new("\"A\"\"");
        match scan_literal(&mut scanner, Delimiter::Quote) {
            LiteralScan::Unterminated {
                span,
                value,
                newline,
            } => {
                assert_eq!(span, Span::new(0, 4));
                assert_eq!(value, "\"A\"\"");
                assert!(!newline);
            }
            other => panic!("Expected an unterminated literal, got {:?}", other),
        }
        assert!(scanner.is_at_end());
    }
}
