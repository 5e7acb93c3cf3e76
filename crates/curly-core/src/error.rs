//! The error type shared by every layer of the library.
//!
//! A parse aborts on the first failure; the caller always sees exactly one
//! error. The `Display` output of each variant is a stable, single-sentence
//! message bundling the cause, the offending text where there is one, and
//! the file name and line number where they are known. Tooling matches on
//! these sentences, so they must not change shape.

use std::fmt;

use crate::ParseInfo;

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while reading or writing a configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    // Lexical errors.
    /// Input ended in the middle of a back-slash sequence.
    UnfinishedBackSlash {
        /// Where the sequence started.
        info: ParseInfo,
    },
    /// A back-slash was followed by a character that is not an escape.
    UnrecognizedBackSlash {
        /// The character after the back-slash.
        seq: char,
        /// Where it happened.
        info: ParseInfo,
    },
    /// A newline appeared inside a quoted lexeme.
    UnfinishedQuoteNewLine {
        /// Where the lexeme started.
        info: ParseInfo,
    },
    /// Input ended inside a quoted lexeme.
    UnfinishedQuoteEof {
        /// Where the lexeme started.
        info: ParseInfo,
    },

    // Structural errors.
    /// The document did not start with `{`.
    ExpectedStartBrace {
        /// What was found instead.
        got: String,
        /// Where it was found.
        info: ParseInfo,
    },
    /// A `{` appeared where a tag name was expected.
    UnexpectedStartBrace {
        /// Where it appeared.
        info: ParseInfo,
    },
    /// A `}` appeared where a tag name was expected.
    UnexpectedFinishBrace {
        /// Where it appeared.
        info: ParseInfo,
    },
    /// Input ended where a tag name was expected.
    UnexpectedEof {
        /// Where input ended.
        info: ParseInfo,
    },
    /// The root tag name did not match the schema.
    UnexpectedRootTag {
        /// The name the schema expects.
        expected: String,
        /// The name found in the input.
        got: String,
        /// Where it was found.
        info: ParseInfo,
    },
    /// A child tag name matched none of the parent's children.
    UnexpectedChildTag {
        /// Name of the enclosing tag.
        parent: String,
        /// The name found in the input.
        got: String,
        /// Where it was found.
        info: ParseInfo,
    },
    /// Content followed the closed root tag.
    UnexpectedContent {
        /// The trailing lexeme text.
        got: String,
        /// Where it was found.
        info: ParseInfo,
    },
    /// Input ended before a mandatory root tag appeared.
    UndefinedMandatoryRootEof {
        /// Name of the mandatory root tag.
        name: String,
        /// Where input ended.
        info: ParseInfo,
    },
    /// Input ended while a tag was still open.
    UnfinishedTag {
        /// Name of the tag left on the stack.
        name: String,
    },
    /// The post-parse sweep found an undefined mandatory tag.
    UndefinedMandatoryTag {
        /// Name of the undefined tag.
        name: String,
    },

    // Schema errors.
    /// A tag finished while one of its mandatory children was undefined.
    UndefinedChildMandatoryTag {
        /// Name of the undefined child.
        child: String,
        /// Name of the finishing parent.
        parent: String,
        /// Where the parent finished.
        info: ParseInfo,
    },
    /// A scalar tag closed without receiving a value.
    UndefinedValue {
        /// Name of the tag.
        name: String,
        /// Where the tag closed.
        info: ParseInfo,
    },
    /// A second value arrived for an already-defined scalar tag.
    ValueAlreadyDefined {
        /// Name of the tag.
        name: String,
        /// Where the extra value appeared.
        info: ParseInfo,
    },
    /// A value arrived for a tag that stores none.
    NoValueAllowed {
        /// Name of the tag.
        name: String,
        /// The offending value text.
        value: String,
        /// Where it appeared.
        info: ParseInfo,
    },
    /// A value arrived after a child tag had already been defined.
    ValueAfterChildTag {
        /// Name of the tag.
        name: String,
        /// The offending value text.
        value: String,
        /// Where it appeared.
        info: ParseInfo,
    },
    /// A value could not be decoded as the tag's type.
    InvalidValue {
        /// The offending value text.
        value: String,
        /// Where it appeared.
        info: ParseInfo,
    },
    /// A value failed the tag's constraint. `info` is absent when the
    /// value was set programmatically rather than parsed.
    ConstraintViolation {
        /// The offending value text.
        value: String,
        /// Name of the constrained tag.
        tag: String,
        /// Where it appeared, if it came from input.
        info: Option<ParseInfo>,
    },
    /// A child with the same name was registered twice under one parent.
    DuplicateChildTag {
        /// Name of the duplicate child.
        child: String,
        /// Name of the parent.
        parent: String,
    },

    // Escape errors raised by `from_serialized_form` outside a parse.
    /// Unknown escape in serialized text.
    UnrecognizedEscape {
        /// The character after the back-slash.
        seq: char,
    },
    /// Serialized text ended with a dangling back-slash.
    UnfinishedEscape,

    // XML dialect errors.
    /// The input was not well-formed XML.
    XmlParse {
        /// Name of the file being parsed.
        file_name: String,
        /// What the reader objected to.
        message: String,
        /// Line of the failure, 1-based.
        line: usize,
        /// Column of the failure, 1-based.
        column: usize,
    },

    // I/O errors, surfaced through the same channel.
    /// A file could not be opened.
    FileOpen {
        /// Name of the file.
        file_name: String,
    },
    /// A file could not be read.
    FileRead {
        /// Name of the file.
        file_name: String,
    },
    /// A file could not be written.
    FileWrite {
        /// Name of the file.
        file_name: String,
    },
}

impl Error {
    /// The location this error points at, when it has one.
    pub fn location(&self) -> Option<(&str, usize, usize)> {
        use Error::*;

        match self {
            UnfinishedBackSlash { info }
            | UnrecognizedBackSlash { info, .. }
            | UnfinishedQuoteNewLine { info }
            | UnfinishedQuoteEof { info }
            | ExpectedStartBrace { info, .. }
            | UnexpectedStartBrace { info }
            | UnexpectedFinishBrace { info }
            | UnexpectedEof { info }
            | UnexpectedRootTag { info, .. }
            | UnexpectedChildTag { info, .. }
            | UnexpectedContent { info, .. }
            | UndefinedMandatoryRootEof { info, .. }
            | UndefinedChildMandatoryTag { info, .. }
            | UndefinedValue { info, .. }
            | ValueAlreadyDefined { info, .. }
            | NoValueAllowed { info, .. }
            | ValueAfterChildTag { info, .. }
            | InvalidValue { info, .. } => {
                Some((info.file_name(), info.line_number(), info.column_number()))
            }
            ConstraintViolation { info: Some(info), .. } => {
                Some((info.file_name(), info.line_number(), info.column_number()))
            }
            XmlParse {
                file_name,
                line,
                column,
                ..
            } => Some((file_name, *line, *column)),
            _ => None,
        }
    }
}

/// The common message tail: `In file "F" on line N.`
struct Tail<'a>(&'a ParseInfo);

impl fmt::Display for Tail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "In file \"{}\" on line {}.",
            self.0.file_name(),
            self.0.line_number()
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Error::*;

        match self {
            UnfinishedBackSlash { info } => write!(
                f,
                "Unexpected end of file. Unfinished back slash sequence. {}",
                Tail(info)
            ),
            UnrecognizedBackSlash { seq, info } => write!(
                f,
                "Unrecognized back-slash sequence: \"\\{}\". {}",
                seq,
                Tail(info)
            ),
            UnfinishedQuoteNewLine { info } => write!(
                f,
                "Unfinished quoted lexeme. New line detected. {}",
                Tail(info)
            ),
            UnfinishedQuoteEof { info } => write!(
                f,
                "Unfinished quoted lexeme. End of file reached. {}",
                Tail(info)
            ),
            ExpectedStartBrace { got, info } => write!(
                f,
                "Expected start curl brace, but we've got \"{}\". {}",
                got,
                Tail(info)
            ),
            UnexpectedStartBrace { info } => write!(
                f,
                "Unexpected start curl brace. We expected tag name, \
                 but we've got start curl brace. {}",
                Tail(info)
            ),
            UnexpectedFinishBrace { info } => write!(
                f,
                "Unexpected finish curl brace. We expected tag name, \
                 but we've got finish curl brace. {}",
                Tail(info)
            ),
            UnexpectedEof { info } => {
                write!(f, "Unexpected end of file. {}", Tail(info))
            }
            UnexpectedRootTag {
                expected,
                got,
                info,
            } => write!(
                f,
                "Unexpected tag name. We expected \"{}\", but we've got \"{}\". {}",
                expected,
                got,
                Tail(info)
            ),
            UnexpectedChildTag { parent, got, info } => write!(
                f,
                "Unexpected tag name. We expected one child tag of tag \"{}\", \
                 but we've got \"{}\". {}",
                parent,
                got,
                Tail(info)
            ),
            UnexpectedContent { got, info } => write!(
                f,
                "Unexpected content. We've finished parsing, \
                 but we've got this: \"{}\". {}",
                got,
                Tail(info)
            ),
            UndefinedMandatoryRootEof { name, info } => write!(
                f,
                "Unexpected end of file. Undefined mandatory tag \"{}\". {}",
                name,
                Tail(info)
            ),
            UnfinishedTag { name } => write!(
                f,
                "Unexpected end of file. Still unfinished tag \"{}\".",
                name
            ),
            UndefinedMandatoryTag { name } => {
                write!(f, "Undefined mandatory tag: \"{}\".", name)
            }
            UndefinedChildMandatoryTag {
                child,
                parent,
                info,
            } => write!(
                f,
                "Undefined child mandatory tag: \"{}\". Where parent is: \"{}\". {}",
                child,
                parent,
                Tail(info)
            ),
            UndefinedValue { name, info } => write!(
                f,
                "Undefined value of tag: \"{}\". {}",
                name,
                Tail(info)
            ),
            ValueAlreadyDefined { name, info } => write!(
                f,
                "Value for the tag \"{}\" already defined. {}",
                name,
                Tail(info)
            ),
            NoValueAllowed { name, value, info } => write!(
                f,
                "Tag \"{}\" doesn't allow any values. But we've got this: \"{}\". {}",
                name,
                value,
                Tail(info)
            ),
            ValueAfterChildTag { name, value, info } => write!(
                f,
                "Value \"{}\" for tag \"{}\" must be defined before any child tag. {}",
                value,
                name,
                Tail(info)
            ),
            InvalidValue { value, info } => {
                write!(f, "Invalid value: \"{}\". {}", value, Tail(info))
            }
            ConstraintViolation { value, tag, info } => {
                write!(
                    f,
                    "Invalid value: \"{}\". Value must match to the constraint \
                     in tag \"{}\".",
                    value, tag
                )?;
                if let Some(info) = info {
                    write!(f, " {}", Tail(info))?;
                }
                Ok(())
            }
            DuplicateChildTag { child, parent } => write!(
                f,
                "Duplicate child tag \"{}\" in tag \"{}\".",
                child, parent
            ),
            UnrecognizedEscape { seq } => {
                write!(f, "Unrecognized backslash sequence \"\\{}\".", seq)
            }
            UnfinishedEscape => write!(f, "Unfinished backslash sequence \"\\\"."),
            XmlParse {
                file_name,
                message,
                line,
                column,
            } => write!(
                f,
                "Unable to parse XML from file: \"{}\". \"{}\" On line {}, column {}.",
                file_name, message, line, column
            ),
            FileOpen { file_name } => {
                write!(f, "Couldn't open file: \"{}\"", file_name)
            }
            FileRead { file_name } => {
                write!(f, "Couldn't read file: \"{}\"", file_name)
            }
            FileWrite { file_name } => {
                write!(f, "Couldn't write file: \"{}\"", file_name)
            }
        }
    }
}

impl std::error::Error for Error {}
