#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Lexer, Scanner};

/// Options that control what the [`Lexer`] reports.
///
/// With the `serde` feature the options can be loaded from a configuration file. Missing fields
/// take their default values.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LexerOptions {
    /// Emit `NewLine` and `Indent` tokens.
    pub emit_trivia: bool,
}

/// A builder for creating a lexer.
#[derive(Debug, Clone, Default)]
pub struct LexerBuilder {
    options: LexerOptions,
}

impl LexerBuilder {
    /// Creates a new lexer builder with default options.
    pub fn new() -> Self {
        Self {
            options: LexerOptions::default(),
        }
    }

    /// Switches the emission of whitespace tokens on or off.
    pub fn emit_trivia(mut self, emit_trivia: bool) -> Self {
        self.options.emit_trivia = emit_trivia;
        self
    }

    /// Replaces all options at once.
    pub fn with_options(mut self, options: LexerOptions) -> Self {
        self.options = options;
        self
    }

    /// The options collected so far.
    pub fn options(&self) -> &LexerOptions {
        &self.options
    }

    /// Builds a lexer over the given text.
    pub fn build(self, text: &str) -> Lexer<'_> {
        Lexer::with_options(Scanner::new(text), self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TokenKind;

    #[test]
    fn test_lexer_builder() {
        let lexer = LexerBuilder::new().emit_trivia(true).build("a\nb");
        assert!(lexer.options().emit_trivia);
        let kinds = lexer.tokens().map(|t| t.kind()).collect::<Vec<_>>();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Value,
                TokenKind::NewLine,
                TokenKind::Value,
                TokenKind::EndOfFile
            ]
        );
    }

    #[test]
    fn test_default_options() {
        let builder = LexerBuilder::new().with_options(LexerOptions::default());
        assert!(!builder.options().emit_trivia);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_options_deserialization() {
        let options: LexerOptions = serde_json::from_str(r#"{ "emit_trivia": true }"#).unwrap();
        assert!(options.emit_trivia);
        let options: LexerOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, LexerOptions::default());
        let serialized = serde_json::to_string(&options).unwrap();
        assert_eq!(serialized, r#"{"emit_trivia":false}"#);
    }
}
