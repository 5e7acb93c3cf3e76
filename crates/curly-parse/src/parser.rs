//! Stack-based parser for the brace dialect.

use curly_core::{Error, ParseInfo, Result};
use curly_lexer::{Lexeme, Lexer};
use curly_tree::TagRef;
use tracing::trace;

use crate::sweep::check_mandatory_tree;

/// Parser of the brace dialect.
///
/// Pulls lexemes from the lexer and drives the tag tree through its hooks.
/// A stack of currently-open tags models nesting depth: an empty stack
/// with no input left is success, a non-empty one is an unfinished tag.
pub struct Parser<'src> {
    root: TagRef,
    lexer: Lexer<'src>,
    stack: Vec<TagRef>,
}

impl<'src> Parser<'src> {
    /// Create a parser for the given schema tree and lexer.
    pub fn new(root: TagRef, lexer: Lexer<'src>) -> Self {
        Self {
            root,
            lexer,
            stack: Vec::new(),
        }
    }

    /// Run the parse to completion, mutating the tag tree in place.
    pub fn parse(&mut self) -> Result<()> {
        if !self.start_first_tag_parsing()? {
            // Optional root, empty input: trivial success.
            return Ok(());
        }

        loop {
            let lexeme = self.lexer.next_lexeme()?;
            if lexeme.is_eof() {
                break;
            }

            let Some(top) = self.stack.last().cloned() else {
                return Err(Error::UnexpectedContent {
                    got: lexeme.value().to_string(),
                    info: self.stream_info(),
                });
            };

            match lexeme {
                Lexeme::StartBrace => self.start_child_parsing(&top)?,
                Lexeme::Text(text) => {
                    let info = self.lexeme_info();
                    top.borrow_mut().on_string(&info, &text)?;
                }
                Lexeme::EndBrace => {
                    let info = self.lexeme_info();
                    top.borrow_mut().on_finish(&info)?;
                    trace!("closed tag {:?}", top.borrow().name());
                    self.stack.pop();
                }
                Lexeme::Eof => break,
            }
        }

        self.check_state_after_parsing()
    }

    /// Handle the document's first tag. Returns `false` for the trivial
    /// success of an optional root and empty input.
    fn start_first_tag_parsing(&mut self) -> Result<bool> {
        let lexeme = self.lexer.next_lexeme()?;
        let root = self.root.clone();
        let (root_name, root_mandatory) = {
            let root = root.borrow();
            (root.name().to_string(), root.is_mandatory())
        };

        match lexeme {
            Lexeme::Eof if root_mandatory => Err(Error::UndefinedMandatoryRootEof {
                name: root_name,
                info: self.stream_info(),
            }),
            Lexeme::Eof => Ok(false),
            Lexeme::StartBrace => {
                let name_lexeme = self.lexer.next_lexeme()?;
                if !self.start_tag_parsing(&name_lexeme, &root)? {
                    return Err(Error::UnexpectedRootTag {
                        expected: root_name,
                        got: name_lexeme.value().to_string(),
                        info: self.stream_info(),
                    });
                }
                Ok(true)
            }
            other => Err(Error::ExpectedStartBrace {
                got: other.value().to_string(),
                info: self.stream_info(),
            }),
        }
    }

    /// Try to open `tag` against a name lexeme. Returns `false` on a name
    /// mismatch; anything other than a name is fatal.
    fn start_tag_parsing(&mut self, lexeme: &Lexeme, tag: &TagRef) -> Result<bool> {
        match lexeme {
            Lexeme::StartBrace => Err(Error::UnexpectedStartBrace {
                info: self.stream_info(),
            }),
            Lexeme::EndBrace => Err(Error::UnexpectedFinishBrace {
                info: self.stream_info(),
            }),
            Lexeme::Eof => Err(Error::UnexpectedEof {
                info: self.stream_info(),
            }),
            Lexeme::Text(text) => {
                if tag.borrow().name() != text {
                    return Ok(false);
                }
                self.stack.push(tag.clone());
                let info = self.lexeme_info();
                tag.borrow_mut().on_start(&info)?;
                trace!("opened tag {:?}", text);
                Ok(true)
            }
        }
    }

    /// Open one of `parent`'s children; first declaration-order name match
    /// wins.
    fn start_child_parsing(&mut self, parent: &TagRef) -> Result<()> {
        let lexeme = self.lexer.next_lexeme()?;
        let children: Vec<TagRef> = parent.borrow().children().to_vec();

        for child in &children {
            if self.start_tag_parsing(&lexeme, child)? {
                return Ok(());
            }
        }

        Err(Error::UnexpectedChildTag {
            parent: parent.borrow().name().to_string(),
            got: lexeme.value().to_string(),
            info: self.stream_info(),
        })
    }

    fn check_state_after_parsing(&mut self) -> Result<()> {
        if let Some(top) = self.stack.last() {
            return Err(Error::UnfinishedTag {
                name: top.borrow().name().to_string(),
            });
        }
        check_mandatory_tree(&self.root)
    }

    /// Location of the most recently started lexeme, for tag hooks.
    fn lexeme_info(&self) -> ParseInfo {
        ParseInfo::new(
            self.lexer.cursor().file_name(),
            self.lexer.line_number(),
            self.lexer.column_number(),
        )
    }

    /// Current cursor location, for structural error messages.
    fn stream_info(&self) -> ParseInfo {
        let cursor = self.lexer.cursor();
        ParseInfo::new(
            cursor.file_name(),
            cursor.line_number(),
            cursor.column_number(),
        )
    }
}

#[cfg(test)]
mod tests;
