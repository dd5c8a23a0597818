use log::trace;

use crate::{LexError, LexErrorKind, Position, PositionProvider, Result, Span};

/// The character returned for every read at or beyond the end of the text.
///
/// A NUL inside the text reads the same, use [`Scanner::is_at_end`] where the difference matters.
pub const EOF_CHAR: char = '\0';

/// Describes how a slice of the text ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceEnding {
    /// The slice ends with an ordinary character.
    None,
    /// The slice ends with a carriage return that is not part of a CR LF pair.
    Cr,
    /// The slice ends with a line feed.
    Lf,
    /// The slice ends with a CR LF pair.
    CrLf,
    /// The slice reaches the end of the text.
    Eof,
}

/// A character scanner over a source text.
///
/// The scanner has two cursors: the committed `current_index` and a speculative `offset`
/// relative to it. Lookahead reads only move the offset, [`Scanner::move_ahead`] commits it and
/// [`Scanner::reset_ahead`] rolls it back.
///
/// A CR immediately followed by LF is read as a single `'\n'` that is two bytes wide. A lone CR
/// is returned as is.
///
/// All indices and offsets are byte offsets into the text.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    text: &'a str,
    current_index: usize,
    offset: usize,
    // Position of the committed cursor
    position: Position,
    // Start offsets of all lines the committed cursor has reached
    line_starts: Vec<usize>,
}

impl<'a> Scanner<'a> {
    /// Creates a new scanner over the given text.
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            current_index: 0,
            offset: 0,
            position: Position::default(),
            line_starts: vec![0],
        }
    }

    /// The complete source text.
    #[inline]
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// The length of the source text in bytes.
    #[inline]
    pub fn text_len(&self) -> usize {
        self.text.len()
    }

    /// The committed cursor.
    #[inline]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The pending lookahead distance, 0 when no speculative read is outstanding.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The index the lookahead cursor points to.
    #[inline]
    pub fn absolute_index(&self) -> usize {
        self.current_index + self.offset
    }

    /// True if the committed cursor reached the end of the text.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.current_index >= self.text.len()
    }

    /// True if the lookahead cursor reached the end of the text.
    #[inline]
    pub fn is_ahead_at_end(&self) -> bool {
        self.absolute_index() >= self.text.len()
    }

    /// The position of the committed cursor.
    #[inline]
    pub fn current_position(&self) -> Position {
        self.position
    }

    /// Returns the character at `current_index + offset` without changing any state.
    ///
    /// Negative offsets look behind the committed cursor. An offset that points before the start
    /// of the text or into the middle of a multi-byte character is an error.
    pub fn peek(&self, offset: isize) -> Result<char> {
        let index = self
            .current_index
            .checked_add_signed(offset)
            .ok_or_else(|| {
                LexError::new(LexErrorKind::OffsetOutOfRange {
                    offset,
                    index: self.current_index,
                })
            })?;
        self.check_boundary(index)?;
        Ok(self.char_at(index).0)
    }

    /// Returns the character at the committed cursor.
    #[inline]
    pub fn read_char(&self) -> char {
        self.char_at(self.current_index).0
    }

    /// Returns the character at the committed cursor and advances past it.
    ///
    /// Any outstanding lookahead is discarded.
    pub fn consume(&mut self) -> char {
        let (ch, width) = self.char_at(self.current_index);
        self.commit(self.current_index + width);
        ch
    }

    /// Reads the character at `current_index + offset` and leaves the lookahead cursor on it.
    ///
    /// When the character is a folded CR LF the offset is placed on the LF, so that adding the
    /// width of the returned character always yields the offset of the following character.
    pub fn read_ahead(&mut self, offset: usize) -> Result<char> {
        let index = self.current_index + offset;
        self.check_boundary(index)?;
        let (ch, width) = self.char_at(index);
        self.offset = offset + Self::fold_width(ch, width);
        Ok(ch)
    }

    /// Like [`Scanner::read_ahead`], but updates the given offset when a CR LF pair is folded.
    ///
    /// The offset must be at least 1, an offset of 0 is the committed cursor itself.
    pub fn peek_ahead(&mut self, offset: &mut usize) -> Result<char> {
        if *offset == 0 {
            return Err(LexError::new(LexErrorKind::OffsetOutOfRange {
                offset: 0,
                index: self.current_index,
            }));
        }
        let ch = self.read_ahead(*offset)?;
        *offset = self.offset;
        Ok(ch)
    }

    /// Returns the character at the lookahead cursor.
    #[inline]
    pub fn lookahead(&self) -> char {
        self.char_at(self.absolute_index()).0
    }

    /// Returns the character at the lookahead cursor and moves the lookahead cursor past it.
    pub fn advance_ahead(&mut self) -> char {
        let (ch, width) = self.char_at(self.absolute_index());
        self.offset += width;
        ch
    }

    /// Commits the lookahead cursor.
    pub fn move_ahead(&mut self) {
        self.commit(self.current_index + self.offset);
    }

    /// Sets the lookahead distance and commits it.
    ///
    /// The offset must land on a character boundary.
    pub fn step_to(&mut self, offset: usize) {
        debug_assert!(
            self.text.is_char_boundary((self.current_index + offset).min(self.text.len())),
            "step_to must land on a char boundary"
        );
        self.offset = offset;
        self.move_ahead();
    }

    /// Discards the lookahead.
    #[inline]
    pub fn reset_ahead(&mut self) {
        self.offset = 0;
    }

    /// Returns the text of the given span without copying.
    ///
    /// A span outside the text or off a character boundary yields an empty string.
    #[inline]
    pub fn slice(&self, span: Span) -> &'a str {
        self.text.get(span.range()).unwrap_or_default()
    }

    /// Inspects how the given span ends.
    pub fn slice_ending(&self, span: Span) -> SliceEnding {
        let slice = self.slice(span);
        if slice.ends_with("\r\n") {
            SliceEnding::CrLf
        } else if slice.ends_with('\n') {
            SliceEnding::Lf
        } else if slice.ends_with('\r') {
            SliceEnding::Cr
        } else if span.end >= self.text.len() {
            SliceEnding::Eof
        } else {
            SliceEnding::None
        }
    }

    fn check_boundary(&self, index: usize) -> Result<()> {
        if index < self.text.len() && !self.text.is_char_boundary(index) {
            Err(LexError::new(LexErrorKind::NotCharBoundary(index)))
        } else {
            Ok(())
        }
    }

    // Extra bytes a folded CR LF occupies in front of the LF.
    #[inline]
    fn fold_width(ch: char, width: usize) -> usize {
        width - ch.len_utf8().min(width)
    }

    // The logical character at the given index and its width in bytes.
    fn char_at(&self, index: usize) -> (char, usize) {
        match self.text.get(index..).and_then(|rest| rest.chars().next()) {
            None => (EOF_CHAR, 0),
            Some('\r') if self.text.as_bytes().get(index + 1) == Some(&b'\n') => ('\n', 2),
            Some(ch) => (ch, ch.len_utf8()),
        }
    }

    // Moves the committed cursor forward to the target and updates the position.
    // Every index is visited only once because the committed cursor never moves back.
    fn commit(&mut self, target: usize) {
        let target = target.min(self.text.len());
        while self.current_index < target {
            let (ch, width) = self.char_at(self.current_index);
            if width == 0 {
                break;
            }
            if self.current_index + width > target {
                // Stop between CR and LF, the LF accounts for the line break.
                self.current_index = target;
                break;
            }
            self.current_index += width;
            if ch == '\n' {
                self.position = self.position.next_line();
                self.line_starts.push(self.current_index);
            } else {
                self.position = self.position.next_column();
            }
        }
        self.offset = 0;
        trace!("Committed to {} ({})", self.current_index, self.position);
    }
}

impl PositionProvider for Scanner<'_> {
    /// Returns the position of an offset the committed cursor has already passed.
    fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.text.len());
        let line_index = self
            .line_starts
            .partition_point(|start| *start <= offset)
            .saturating_sub(1);
        let line_start = self.line_starts[line_index];
        let column = self
            .text
            .get(line_start..offset)
            .map_or(0, |s| s.chars().count());
        Position::new(line_index + 1, column)
    }
}
