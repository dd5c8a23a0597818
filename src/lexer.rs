use std::{borrow::Cow, collections::VecDeque};

use log::{debug, trace};

use crate::{
    internal::{
        character_class::{is_blank, is_identifier_char, is_label_char, is_line_end},
        literal::{scan_literal, Delimiter, LiteralScan},
        nesting::{IndentChar, Indentation, NestingTracker},
        symbol_table::punctuation,
    },
    scanner::EOF_CHAR,
    LexerOptions, LineMode, Scanner, Span, Token, TokenKind, Tokens,
};

/// The lexer of the rule definition language.
///
/// The lexer pulls characters from a [`Scanner`] and hands out one [`Token`] per call to
/// [`Lexer::read_token`]. Some constructs, e.g. an annotation with an argument list or an item
/// line with an operator, yield several tokens at once. These are kept in a queue and delivered
/// by the following calls before any new input is scanned.
///
/// Malformed input never stops the lexer. It is reported as [`TokenKind::Error`] tokens that
/// carry the offending text, and lexing resumes behind it.
///
/// The lexer is pull based and bounded by the input length. Once the end of the text is
/// reached every call returns the same [`TokenKind::EndOfFile`] token.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    scanner: Scanner<'a>,
    options: LexerOptions,
    mode: LineMode,
    nesting: NestingTracker,
    // Tokens already lexed but not yet delivered
    pending: VecDeque<Token<'a>>,
    end_of_file: Option<Token<'a>>,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer with the default options.
    pub fn new(scanner: Scanner<'a>) -> Self {
        Self::with_options(scanner, LexerOptions::default())
    }

    /// Creates a lexer with the given options.
    pub fn with_options(scanner: Scanner<'a>, options: LexerOptions) -> Self {
        Self {
            scanner,
            options,
            mode: LineMode::Header,
            nesting: NestingTracker::new(),
            pending: VecDeque::new(),
            end_of_file: None,
        }
    }

    /// The mode of the line the lexer is currently on.
    #[inline]
    pub fn line_mode(&self) -> LineMode {
        self.mode
    }

    /// The nesting depth of the current line.
    #[inline]
    pub fn depth(&self) -> usize {
        self.nesting.depth()
    }

    /// The options the lexer was created with.
    #[inline]
    pub fn options(&self) -> &LexerOptions {
        &self.options
    }

    /// The underlying scanner.
    #[inline]
    pub fn scanner(&self) -> &Scanner<'a> {
        &self.scanner
    }

    /// Turns the lexer into an iterator over the remaining tokens.
    pub fn tokens(self) -> Tokens<'a> {
        Tokens::new(self)
    }

    /// Returns the next token.
    ///
    /// After the end of the text this returns the same `EndOfFile` token on every call.
    pub fn read_token(&mut self) -> Token<'a> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                trace!(
                    "Token {} {} {:?} depth {}",
                    token.kind(),
                    token.span(),
                    token.value(),
                    token.depth()
                );
                return token;
            }
            if let Some(token) = &self.end_of_file {
                return token.clone();
            }
            self.scan();
        }
    }

    // Scans the next construct. Each call either queues tokens, reaches the end of the text or
    // consumes at least one character.
    fn scan(&mut self) {
        self.skip_blanks();
        let start = self.scanner.current_index();
        let ch = self.scanner.read_char();
        if ch == EOF_CHAR {
            trace!("End of file at {}", start);
            self.end_of_file = Some(Token::new_unchecked(
                Span::empty(start),
                self.nesting.depth(),
                TokenKind::EndOfFile,
                TokenKind::None,
                "",
            ));
            return;
        }
        let header = self.mode == LineMode::Header;
        match ch {
            '\n' => self.lex_newline(),
            '@' if header => self.lex_annotation(),
            '[' if header => self.lex_header_bracket(),
            _ => match punctuation(ch) {
                Some(kind) if header => {
                    self.scanner.consume();
                    self.push_raw(self.span_from(start), kind, TokenKind::None);
                }
                _ => self.lex_item_line(),
            },
        }
    }

    fn lex_newline(&mut self) {
        let start = self.scanner.current_index();
        self.scanner.consume();
        if self.options.emit_trivia {
            self.push(
                self.span_from(start),
                TokenKind::NewLine,
                TokenKind::None,
                "\n",
            );
        }
        self.begin_line();
    }

    // Decides the mode of the line that starts at the committed cursor.
    fn begin_line(&mut self) {
        let ch = self.scanner.read_char();
        let mode = match ch {
            '@' | '[' => {
                self.nesting.reset();
                LineMode::Header
            }
            _ if is_line_end(ch) => LineMode::Blank,
            _ => {
                let rest = self
                    .scanner
                    .text()
                    .get(self.scanner.current_index()..)
                    .unwrap_or_default();
                match Indentation::measure(rest) {
                    Some(indentation) => self.begin_indented_line(&indentation),
                    None => {
                        self.nesting.reset();
                        LineMode::Item
                    }
                }
            }
        };
        if mode != self.mode {
            debug!(
                "Line mode {} -> {} at {}",
                self.mode,
                mode,
                self.scanner.current_position()
            );
        }
        self.mode = mode;
    }

    // Consumes the indentation and updates the nesting depth.
    // A line holding nothing but blanks counts as blank and leaves the depth alone.
    fn begin_indented_line(&mut self, indentation: &Indentation) -> LineMode {
        let start = self.scanner.current_index();
        self.scanner.reset_ahead();
        for _ in 0..indentation.column {
            self.scanner.advance_ahead();
        }
        let blank = is_line_end(self.scanner.lookahead());
        self.scanner.move_ahead();
        if blank {
            return LineMode::Blank;
        }
        let span = self.span_from(start);
        self.nesting.enter(indentation.column);
        if !self.nesting.accepts(indentation) {
            debug!("Inconsistent indentation at {}", span);
            self.push_raw(span, TokenKind::Error, TokenKind::Indent);
        } else if self.options.emit_trivia {
            let context = match indentation.first {
                IndentChar::Space => TokenKind::Space,
                IndentChar::Tab => TokenKind::Tab,
            };
            self.push_raw(span, TokenKind::Indent, context);
        }
        LineMode::Subsection
    }

    // `@Name`, optionally followed by an argument list.
    fn lex_annotation(&mut self) {
        let start = self.scanner.current_index();
        self.scanner.reset_ahead();
        self.scanner.advance_ahead();
        let name_start = self.scanner.absolute_index();
        while is_identifier_char(self.scanner.lookahead()) {
            self.scanner.advance_ahead();
        }
        let name_end = self.scanner.absolute_index();
        let terminator = self.scanner.lookahead();

        if terminator == '(' || is_blank(terminator) || is_line_end(terminator) {
            if name_start == name_end {
                self.scanner.step_to(name_start - start);
                self.push_raw(self.span_from(start), TokenKind::AtSign, TokenKind::None);
                return;
            }
            self.scanner.move_ahead();
            let name = self.scanner.slice(Span::new(name_start, name_end));
            self.push(
                Span::new(start, name_end),
                TokenKind::Annotation,
                TokenKind::None,
                name,
            );
            if terminator == '(' {
                self.lex_argument_list();
            }
            return;
        }

        // The offending character is part of the error.
        self.scanner.advance_ahead();
        self.scanner.move_ahead();
        let value = self
            .scanner
            .slice(Span::new(name_start, self.scanner.current_index()));
        debug!("Invalid annotation identifier {:?}", value);
        self.push(
            self.span_from(start),
            TokenKind::Error,
            TokenKind::Annotation,
            value,
        );
    }

    // `([Section], "String", ...)` directly behind an annotation name.
    // Violations are queued as error tokens in document order and scanning goes on up to the
    // closing parenthesis or the end of the line.
    fn lex_argument_list(&mut self) {
        let open = self.scanner.current_index();
        let first = self.pending.len();
        self.scanner.consume();
        let mut expect_argument = true;
        let mut closed = false;
        let mut line_ended = false;
        loop {
            self.skip_blanks();
            let at = self.scanner.current_index();
            let ch = self.scanner.read_char();
            if is_line_end(ch) {
                break;
            }
            match ch {
                ')' => {
                    self.scanner.consume();
                    closed = true;
                    break;
                }
                ',' => {
                    self.scanner.consume();
                    if expect_argument {
                        self.push_argument_error(at);
                    }
                    expect_argument = true;
                }
                '(' | ']' => {
                    self.scanner.consume();
                    self.push_argument_error(at);
                }
                '[' | '"' => {
                    let (delimiter, context) = if ch == '[' {
                        (Delimiter::Bracket, TokenKind::Section)
                    } else {
                        (Delimiter::Quote, TokenKind::String)
                    };
                    match scan_literal(&mut self.scanner, delimiter) {
                        LiteralScan::Closed(literal) if expect_argument => {
                            self.push(
                                literal.span,
                                TokenKind::AnnotationArgument,
                                context,
                                literal.value,
                            );
                        }
                        LiteralScan::Closed(literal) => {
                            debug!("Missing separator before argument at {}", literal.span);
                            self.push_raw(
                                literal.span,
                                TokenKind::Error,
                                TokenKind::AnnotationArgument,
                            );
                        }
                        LiteralScan::Unterminated {
                            span,
                            value,
                            newline,
                        } => {
                            self.push(span, TokenKind::Error, TokenKind::AnnotationArgument, value);
                            line_ended = newline;
                            break;
                        }
                    }
                    expect_argument = false;
                }
                _ => {
                    self.scanner.reset_ahead();
                    while !Self::ends_stray_run(self.scanner.lookahead()) {
                        self.scanner.advance_ahead();
                    }
                    self.scanner.move_ahead();
                    self.push_argument_error(at);
                    expect_argument = false;
                }
            }
        }
        if !closed {
            debug!("Unclosed argument list at {}", open);
            let token = Token::new_unchecked(
                Span::new(open, open + 1),
                self.nesting.depth(),
                TokenKind::Error,
                TokenKind::AnnotationArgument,
                "(",
            );
            self.pending.insert(first, token);
        }
        if line_ended {
            self.begin_line();
        }
    }

    fn ends_stray_run(ch: char) -> bool {
        is_blank(ch) || is_line_end(ch) || matches!(ch, '(' | ')' | ',' | '[' | ']' | '"')
    }

    fn push_argument_error(&mut self, start: usize) {
        self.push_raw(
            self.span_from(start),
            TokenKind::Error,
            TokenKind::AnnotationArgument,
        );
    }

    // `[Name]` at header position. A bracket literal that needed escapes is a label.
    fn lex_header_bracket(&mut self) {
        match scan_literal(&mut self.scanner, Delimiter::Bracket) {
            LiteralScan::Closed(literal) => {
                if !literal.escaped {
                    self.push(
                        literal.span,
                        TokenKind::Section,
                        TokenKind::None,
                        literal.value,
                    );
                } else if literal.value.chars().all(is_label_char) {
                    self.push(literal.span, TokenKind::Label, TokenKind::None, literal.value);
                } else {
                    self.push_raw(literal.span, TokenKind::Error, TokenKind::Label);
                }
                self.set_mode(LineMode::Item);
            }
            LiteralScan::Unterminated {
                span,
                value,
                newline,
            } => {
                self.push(span, TokenKind::Error, TokenKind::Section, value);
                if newline {
                    self.begin_line();
                }
            }
        }
    }

    // `LHS` or `LHS -> RHS`
    fn lex_item_line(&mut self) {
        if self.lex_value(TokenKind::Lhs) {
            return;
        }
        self.skip_blanks();
        if self.at_operator() {
            let start = self.scanner.current_index();
            self.scanner.step_to(2);
            self.push_raw(self.span_from(start), TokenKind::Operator, TokenKind::None);
            self.skip_blanks();
            self.lex_value(TokenKind::Rhs);
        }
    }

    // Lexes one side of an item. Returns true if nothing of the line is left to lex.
    fn lex_value(&mut self, context: TokenKind) -> bool {
        let start = self.scanner.current_index();
        let stop_at_operator = context == TokenKind::Lhs;
        let Some(delimiter) = Delimiter::of(self.scanner.read_char()) else {
            let end = self.scan_text(stop_at_operator);
            self.push_raw(Span::new(start, end), TokenKind::Value, context);
            return false;
        };
        match scan_literal(&mut self.scanner, delimiter) {
            LiteralScan::Closed(literal) => {
                if delimiter == Delimiter::Bracket && !literal.value.chars().all(is_label_char) {
                    self.push_raw(literal.span, TokenKind::Error, TokenKind::Label);
                } else {
                    self.push(literal.span, delimiter.kind(), context, literal.value);
                }
            }
            LiteralScan::Unterminated {
                span,
                value,
                newline,
            } => {
                self.push(span, TokenKind::Error, delimiter.kind(), value);
                if newline {
                    self.begin_line();
                }
                return true;
            }
        }
        self.skip_blanks();
        let junk_start = self.scanner.current_index();
        let junk_end = self.scan_text(stop_at_operator);
        if junk_end > junk_start {
            debug!("Unexpected text behind literal at {}", junk_start);
            self.push_raw(Span::new(junk_start, junk_end), TokenKind::Error, context);
        }
        false
    }

    // Consumes text up to the end of the line, or up to `->` if requested.
    // Returns the end of the text without trailing blanks.
    fn scan_text(&mut self, stop_at_operator: bool) -> usize {
        let start = self.scanner.current_index();
        self.scanner.reset_ahead();
        loop {
            let ch = self.scanner.lookahead();
            if is_line_end(ch) {
                break;
            }
            if stop_at_operator && ch == '-' {
                let next = self.scanner.offset() + 1;
                if matches!(self.scanner.peek(next as isize), Ok('>')) {
                    break;
                }
            }
            self.scanner.advance_ahead();
        }
        let scanned = self
            .scanner
            .slice(Span::new(start, self.scanner.absolute_index()));
        self.scanner.move_ahead();
        start + scanned.trim_end_matches(is_blank).len()
    }

    fn at_operator(&mut self) -> bool {
        if self.scanner.read_char() != '-' {
            return false;
        }
        let mut offset = 1;
        let found = matches!(self.scanner.peek_ahead(&mut offset), Ok('>'));
        self.scanner.reset_ahead();
        found
    }

    fn skip_blanks(&mut self) {
        while is_blank(self.scanner.read_char()) {
            self.scanner.consume();
        }
    }

    fn set_mode(&mut self, mode: LineMode) {
        if mode != self.mode {
            debug!("Line mode {} -> {}", self.mode, mode);
            self.mode = mode;
        }
    }

    #[inline]
    fn span_from(&self, start: usize) -> Span {
        Span::new(start, self.scanner.current_index())
    }

    fn push(
        &mut self,
        span: Span,
        kind: TokenKind,
        context: TokenKind,
        value: impl Into<Cow<'a, str>>,
    ) {
        self.pending.push_back(Token::new_unchecked(
            span,
            self.nesting.depth(),
            kind,
            context,
            value,
        ));
    }

    fn push_raw(&mut self, span: Span, kind: TokenKind, context: TokenKind) {
        let value = self.scanner.slice(span);
        self.push(span, kind, context, value);
    }
}
