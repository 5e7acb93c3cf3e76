//! Lexical analyzer for the Curly text dialect.

use curly_core::consts::{BACK_SLASH, BEGIN_TAG, END_TAG, QUOTE, SHARP, VERTICAL_BAR};
use curly_core::{Error, ParseInfo, Result};
use tracing::trace;

use crate::{InputCursor, Lexeme};

/// The lexical analyzer.
///
/// Produces one [`Lexeme`] per call, skipping whitespace and both comment
/// styles in between. Holds no state across calls beyond the position of
/// the most recently started lexeme.
pub struct Lexer<'src> {
    cursor: InputCursor<'src>,
    /// Line where the current lexeme started.
    line: usize,
    /// Column where the current lexeme started.
    column: usize,
}

impl<'src> Lexer<'src> {
    /// Create a lexer over the given cursor.
    pub fn new(cursor: InputCursor<'src>) -> Self {
        let line = cursor.line_number();
        let column = cursor.column_number();
        Self {
            cursor,
            line,
            column,
        }
    }

    /// The underlying cursor.
    pub fn cursor(&self) -> &InputCursor<'src> {
        &self.cursor
    }

    /// Line where the most recent lexeme started, 1-based.
    pub fn line_number(&self) -> usize {
        self.line
    }

    /// Column where the most recent lexeme started, 1-based.
    pub fn column_number(&self) -> usize {
        self.column
    }

    /// Get the next lexeme.
    pub fn next_lexeme(&mut self) -> Result<Lexeme> {
        let mut result = String::new();
        let mut quoted = false;
        let mut first_symbol = true;
        let mut skip_comment = false;

        self.skip_spaces();

        self.line = self.cursor.line_number();
        self.column = self.cursor.column_number();

        if self.cursor.at_end() {
            return Ok(Lexeme::Eof);
        }

        loop {
            // at_end was checked on entry and at the bottom of the loop
            let ch = self.cursor.get().expect("cursor is not at end");

            if ch == QUOTE {
                if quoted {
                    break;
                } else if first_symbol {
                    quoted = true;
                } else {
                    self.cursor.put_back(ch);
                    break;
                }
            } else if ch == BACK_SLASH {
                if !quoted {
                    result.push(ch);
                } else {
                    result.push(self.process_back_slash()?);
                }
            } else if ch == BEGIN_TAG {
                if result.is_empty() {
                    trace!("lexeme StartBrace at {}:{}", self.line, self.column);
                    return Ok(Lexeme::StartBrace);
                } else if quoted {
                    result.push(ch);
                } else {
                    self.cursor.put_back(ch);
                    break;
                }
            } else if ch == END_TAG {
                if result.is_empty() {
                    trace!("lexeme EndBrace at {}:{}", self.line, self.column);
                    return Ok(Lexeme::EndBrace);
                } else if quoted {
                    result.push(ch);
                } else {
                    self.cursor.put_back(ch);
                    break;
                }
            } else if ch == ' ' || ch == '\t' {
                if quoted {
                    result.push(ch);
                } else {
                    break;
                }
            } else if ch == '\n' || ch == '\r' {
                if quoted {
                    return Err(Error::UnfinishedQuoteNewLine { info: self.info() });
                } else {
                    break;
                }
            } else if ch == VERTICAL_BAR {
                if quoted {
                    result.push(ch);
                } else {
                    match self.cursor.get() {
                        Some(VERTICAL_BAR) => {
                            skip_comment = true;
                            self.skip_one_line_comment();
                            if first_symbol {
                                self.skip_spaces();
                            } else {
                                break;
                            }
                        }
                        Some(SHARP) => {
                            skip_comment = true;
                            self.skip_multi_line_comment();
                            if first_symbol {
                                self.skip_spaces();
                            } else {
                                break;
                            }
                        }
                        Some(next) => {
                            result.push(ch);
                            self.cursor.put_back(next);
                        }
                        None => result.push(ch),
                    }
                }
            } else {
                result.push(ch);
            }

            if self.cursor.at_end() {
                if quoted {
                    return Err(Error::UnfinishedQuoteEof { info: self.info() });
                } else if result.is_empty() {
                    return Ok(Lexeme::Eof);
                } else {
                    break;
                }
            }

            if !skip_comment {
                first_symbol = false;
            } else {
                skip_comment = false;
            }
        }

        trace!("lexeme Text({:?}) at {}:{}", result, self.line, self.column);
        Ok(Lexeme::Text(result))
    }

    fn info(&self) -> ParseInfo {
        ParseInfo::new(self.cursor.file_name(), self.line, self.column)
    }

    /// Decode the character after a back-slash inside a quoted lexeme.
    fn process_back_slash(&mut self) -> Result<char> {
        let Some(ch) = self.cursor.get() else {
            return Err(Error::UnfinishedBackSlash {
                info: ParseInfo::new(
                    self.cursor.file_name(),
                    self.cursor.line_number(),
                    self.cursor.column_number(),
                ),
            });
        };

        match ch {
            'n' => Ok('\n'),
            't' => Ok('\t'),
            'r' => Ok('\r'),
            '"' => Ok('"'),
            '\\' => Ok('\\'),
            seq => Err(Error::UnrecognizedBackSlash {
                seq,
                info: self.info(),
            }),
        }
    }

    fn is_space(ch: char) -> bool {
        matches!(ch, ' ' | '\t' | '\n' | '\r')
    }

    /// Consume whitespace, leaving the cursor at the first non-space
    /// character.
    fn skip_spaces(&mut self) {
        while let Some(ch) = self.cursor.get() {
            if !Self::is_space(ch) {
                self.cursor.put_back(ch);
                break;
            }
        }
    }

    /// Consume a `||` comment up to and including the end of the line.
    fn skip_one_line_comment(&mut self) {
        while let Some(ch) = self.cursor.get() {
            if ch == '\n' || ch == '\r' {
                break;
            }
        }
    }

    /// Consume a `|#` comment up to and including the closing `#|`.
    /// An unterminated block comment runs to the end of input.
    fn skip_multi_line_comment(&mut self) {
        let Some(mut ch) = self.cursor.get() else {
            return;
        };
        let Some(mut next) = self.cursor.get() else {
            return;
        };
        if ch == SHARP && next == VERTICAL_BAR {
            return;
        }
        while !self.cursor.at_end() {
            ch = next;
            next = self.cursor.get().expect("cursor is not at end");
            if ch == SHARP && next == VERTICAL_BAR {
                break;
            }
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Lexeme>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_lexeme() {
            Ok(Lexeme::Eof) => None,
            other => Some(other),
        }
    }
}
