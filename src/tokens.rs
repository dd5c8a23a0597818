use crate::{Lexer, Position, PositionProvider, Scanner, Token, TokenKind};

/// An iterator over the tokens of a text.
///
/// The iterator yields every token up to and including the `EndOfFile` token and is fused
/// afterwards.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    lexer: Lexer<'a>,
    finished: bool,
}

impl<'a> Tokens<'a> {
    pub(crate) fn new(lexer: Lexer<'a>) -> Self {
        Self {
            lexer,
            finished: false,
        }
    }

    /// The lexer that feeds the iterator.
    pub fn lexer(&self) -> &Lexer<'a> {
        &self.lexer
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if self.finished {
            return None;
        }
        let token = self.lexer.read_token();
        self.finished = token.kind() == TokenKind::EndOfFile;
        Some(token)
    }
}

impl std::iter::FusedIterator for Tokens<'_> {}

impl PositionProvider for Tokens<'_> {
    fn position(&self, offset: usize) -> Position {
        self.lexer.scanner().position(offset)
    }
}

/// Lexes the whole text with default options.
///
/// The returned tokens end with the `EndOfFile` token.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    Lexer::new(Scanner::new(text)).tokens().collect()
}
