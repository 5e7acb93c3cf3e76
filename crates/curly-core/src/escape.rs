//! Escaping between application strings and their on-disk form.
//!
//! A value is written bare when nothing in it collides with the syntax;
//! otherwise it is quote-wrapped with back-slash escapes. The two functions
//! here are exact inverses for every string, which is what makes the
//! formatter's output re-parseable.

use crate::consts::{
    BACK_SLASH, BEGIN_TAG, END_TAG, FINISH_MULTI_LINE_COMMENT, ONE_LINE_COMMENT, QUOTE,
    START_MULTI_LINE_COMMENT,
};
use crate::{Error, Result};

/// Encode a string for output.
///
/// The empty string encodes as `""`. A string free of reserved characters
/// and comment markers is emitted bare; anything else is quote-wrapped with
/// `\"`, `\n`, `\r`, `\t` and `\\` escapes.
pub fn to_serialized_form(what: &str) -> String {
    if what.is_empty() {
        return String::from("\"\"");
    }

    let reserved = what.chars().any(|c| {
        matches!(c, BEGIN_TAG | END_TAG | QUOTE | BACK_SLASH | '\n' | '\r' | '\t' | ' ')
    }) || what.contains(ONE_LINE_COMMENT)
        || what.contains(START_MULTI_LINE_COMMENT)
        || what.contains(FINISH_MULTI_LINE_COMMENT);

    if !reserved {
        return what.to_string();
    }

    let mut result = String::with_capacity(what.len() + 2);
    result.push(QUOTE);
    for c in what.chars() {
        match c {
            QUOTE => result.push_str("\\\""),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            BACK_SLASH => result.push_str("\\\\"),
            c => result.push(c),
        }
    }
    result.push(QUOTE);
    result
}

/// Decode a string from its on-disk form.
///
/// Only text bounded by a literal quote character at both ends is
/// processed; anything else is returned unchanged. One quote layer is
/// stripped and the escapes of [`to_serialized_form`] are reversed.
pub fn from_serialized_form(what: &str) -> Result<String> {
    let quoted = what.len() >= 2 && what.starts_with(QUOTE) && what.ends_with(QUOTE);
    if !quoted {
        return Ok(what.to_string());
    }

    let inner = &what[1..what.len() - 1];
    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c != BACK_SLASH {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => result.push(QUOTE),
            Some('n') => result.push('\n'),
            Some('r') => result.push('\r'),
            Some('t') => result.push('\t'),
            Some('\\') => result.push(BACK_SLASH),
            Some(seq) => return Err(Error::UnrecognizedEscape { seq }),
            None => return Err(Error::UnfinishedEscape),
        }
    }

    Ok(result)
}
