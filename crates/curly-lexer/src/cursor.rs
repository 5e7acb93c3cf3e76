//! Character cursor over the source text.

/// A cursor over source text with 1-based line/column tracking and
/// character pushback.
///
/// `put_back` restores the position as well as the character: every `get`
/// records the position it was called at on a history stack, and `put_back`
/// pops it. Nested pushbacks are allowed, which gives the lexer the two
/// characters of lookahead it occasionally needs.
///
/// Line endings are normalized: a CR/LF or LF/CR pair is consumed as a
/// single `'\n'`, and a lone CR surfaces as `'\n'` too, so callers only
/// ever see one newline character per logical newline.
pub struct InputCursor<'src> {
    /// The remaining source text (suffix of the original input).
    remaining: &'src str,
    /// File name used in diagnostics.
    file_name: String,
    /// Line of the next character, 1-based.
    line: usize,
    /// Column of the next character, 1-based.
    column: usize,
    /// Characters put back, most recent last.
    pending: Vec<char>,
    /// Positions at which each outstanding `get` happened.
    history: Vec<(usize, usize)>,
}

impl<'src> InputCursor<'src> {
    /// Create a cursor over the given source text.
    pub fn new(source: &'src str, file_name: impl Into<String>) -> Self {
        Self {
            remaining: source,
            file_name: file_name.into(),
            line: 1,
            column: 1,
            pending: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Name of the file being read, for diagnostics.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Line of the next character to be returned, 1-based.
    pub fn line_number(&self) -> usize {
        self.line
    }

    /// Column of the next character to be returned, 1-based.
    pub fn column_number(&self) -> usize {
        self.column
    }

    /// Whether the input is exhausted. Does not consume anything.
    pub fn at_end(&self) -> bool {
        self.pending.is_empty() && self.remaining.is_empty()
    }

    /// Get the next character, or `None` at the end of input.
    pub fn get(&mut self) -> Option<char> {
        let ch = match self.pending.pop() {
            Some(ch) => ch,
            None => self.next_source_char()?,
        };

        self.history.push((self.line, self.column));
        if ch == '\n' || ch == '\r' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    /// Un-read one character, restoring the position the matching `get`
    /// was issued at. Ignored when nothing has been read.
    pub fn put_back(&mut self, ch: char) {
        if let Some((line, column)) = self.history.pop() {
            self.line = line;
            self.column = column;
            self.pending.push(ch);
        }
    }

    /// Pull the next character out of the source text, collapsing CR/LF
    /// and LF/CR pairs into a single `'\n'`.
    fn next_source_char(&mut self) -> Option<char> {
        let mut iter = self.remaining.chars();
        let ch = iter.next()?;
        let ch = match ch {
            '\n' | '\r' => {
                let mut ahead = iter.clone();
                if let Some(next) = ahead.next() {
                    if (ch == '\n' && next == '\r') || (ch == '\r' && next == '\n') {
                        iter = ahead;
                    }
                }
                '\n'
            }
            ch => ch,
        };
        self.remaining = iter.as_str();
        Some(ch)
    }
}
