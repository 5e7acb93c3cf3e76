#![doc = include_str!("../README.md")]

use std::fs::File;
use std::io;
use std::path::Path;

pub use curly_core::{Error, ParseInfo, Result, from_serialized_form, to_serialized_form};
pub use curly_lexer::{InputCursor, Lexeme, Lexer};
pub use curly_parse::{DomParser, Parser};
pub use curly_tree::{
    Constraint, Subordinate, Tag, TagBase, TagNoValue, TagRef, TagScalar, TagScalarString,
    TagScalarVector, TagVectorOfTags, ValueFormat, shared, tag_ref,
};
pub use curly_xml::{XmlElement, XmlNode, XmlText, parse_document, write_document};

/// On-disk format of a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// The brace dialect.
    Curly,
    /// The XML dialect.
    Xml,
}

/// Decide which dialect some input is in: a document whose first
/// non-whitespace character is `<` is XML, anything else is the brace
/// dialect.
pub fn detect_format(source: &str) -> FileFormat {
    match source.chars().find(|c| !c.is_whitespace()) {
        Some('<') => FileFormat::Xml,
        _ => FileFormat::Curly,
    }
}

/// Parse `source` into the tag tree, auto-detecting the dialect.
/// `file_name` only appears in diagnostics.
pub fn read_str(tag: &TagRef, source: &str, file_name: &str) -> Result<()> {
    match detect_format(source) {
        FileFormat::Curly => {
            let cursor = InputCursor::new(source, file_name);
            Parser::new(tag.clone(), Lexer::new(cursor)).parse()
        }
        FileFormat::Xml => {
            let document = parse_document(source, file_name)?;
            DomParser::new(tag.clone(), document, file_name).parse()
        }
    }
}

/// Read a configuration from any reader into the tag tree.
pub fn read(tag: &TagRef, mut reader: impl io::Read, file_name: &str) -> Result<()> {
    let mut source = String::new();
    reader
        .read_to_string(&mut source)
        .map_err(|_| Error::FileRead {
            file_name: file_name.to_string(),
        })?;
    read_str(tag, &source, file_name)
}

/// Read a configuration file into the tag tree.
pub fn read_file(tag: &TagRef, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file_name = path.display().to_string();
    let file = File::open(path).map_err(|_| Error::FileOpen {
        file_name: file_name.clone(),
    })?;
    read(tag, file, &file_name)
}

/// Serialize the tag tree in the requested format. An undefined tree
/// yields an empty string.
pub fn write_str(tag: &TagRef, format: FileFormat) -> String {
    match format {
        FileFormat::Curly => tag.borrow().print(0),
        FileFormat::Xml => {
            let mut nodes = Vec::new();
            tag.borrow().print_xml(&mut nodes);
            match nodes.into_iter().next() {
                Some(XmlNode::Element(root)) => write_document(&root),
                _ => String::new(),
            }
        }
    }
}

/// Serialize the tag tree to any writer. `file_name` only appears in
/// diagnostics.
pub fn write(
    tag: &TagRef,
    mut writer: impl io::Write,
    file_name: &str,
    format: FileFormat,
) -> Result<()> {
    let text = write_str(tag, format);
    writer
        .write_all(text.as_bytes())
        .map_err(|_| Error::FileWrite {
            file_name: file_name.to_string(),
        })
}

/// Serialize the tag tree to a file.
pub fn write_file(tag: &TagRef, path: impl AsRef<Path>, format: FileFormat) -> Result<()> {
    let path = path.as_ref();
    let file_name = path.display().to_string();
    let file = File::create(path).map_err(|_| Error::FileOpen {
        file_name: file_name.clone(),
    })?;
    write(tag, file, &file_name, format)
}
