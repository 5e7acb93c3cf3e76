//! Reserved characters and comment markers of the Curly text dialect.

/// Opens a tag.
pub const BEGIN_TAG: char = '{';
/// Closes a tag.
pub const END_TAG: char = '}';
/// Delimits quoted lexemes.
pub const QUOTE: char = '"';
/// Introduces an escape sequence inside a quoted lexeme.
pub const BACK_SLASH: char = '\\';
/// First character of both comment markers.
pub const VERTICAL_BAR: char = '|';
/// Second character of the block comment markers.
pub const SHARP: char = '#';

/// Starts a comment that runs to the end of the line.
pub const ONE_LINE_COMMENT: &str = "||";
/// Starts a block comment.
pub const START_MULTI_LINE_COMMENT: &str = "|#";
/// Ends a block comment.
pub const FINISH_MULTI_LINE_COMMENT: &str = "#|";
