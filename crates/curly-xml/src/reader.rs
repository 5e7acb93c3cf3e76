//! Reader producing an [`XmlElement`] tree from source text.

use curly_core::{Error, Result};
use curly_lexer::InputCursor;

use crate::{XmlElement, XmlNode, XmlText};

/// Parse an XML document into its root element.
///
/// Accepts an optional prolog, comments and a doctype before the document
/// element. Anything other than whitespace or comments after it is an
/// error.
pub fn parse_document(source: &str, file_name: &str) -> Result<XmlElement> {
    let mut reader = Reader {
        cursor: InputCursor::new(source, file_name),
    };
    reader.parse()
}

struct Reader<'src> {
    cursor: InputCursor<'src>,
}

impl Reader<'_> {
    fn parse(&mut self) -> Result<XmlElement> {
        self.skip_misc()?;
        if self.cursor.at_end() {
            return Err(self.error("Expected a document element."));
        }
        let root = self.parse_element()?;
        self.skip_misc()?;
        if !self.cursor.at_end() {
            return Err(self.error("Trailing content after the document element."));
        }
        Ok(root)
    }

    fn error(&self, message: impl Into<String>) -> Error {
        Error::XmlParse {
            file_name: self.cursor.file_name().to_string(),
            message: message.into(),
            line: self.cursor.line_number(),
            column: self.cursor.column_number(),
        }
    }

    fn expect_char(&mut self, want: char) -> Result<()> {
        match self.cursor.get() {
            Some(ch) if ch == want => Ok(()),
            Some(_) => Err(self.error(format!("Expected '{}'.", want))),
            None => Err(self.error("Unexpected end of file.")),
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.cursor.get() {
            if !ch.is_whitespace() {
                self.cursor.put_back(ch);
                break;
            }
        }
    }

    /// Skip whitespace, the prolog, comments and a doctype.
    fn skip_misc(&mut self) -> Result<()> {
        loop {
            self.skip_whitespace();
            let Some(lt) = self.cursor.get() else {
                return Ok(());
            };
            if lt != '<' {
                self.cursor.put_back(lt);
                return Ok(());
            }
            let Some(next) = self.cursor.get() else {
                self.cursor.put_back(lt);
                return Ok(());
            };
            match next {
                '?' => self.skip_until("?>")?,
                '!' => self.skip_comment_or_doctype()?,
                _ => {
                    self.cursor.put_back(next);
                    self.cursor.put_back(lt);
                    return Ok(());
                }
            }
        }
    }

    /// The cursor is just past `<!`.
    fn skip_comment_or_doctype(&mut self) -> Result<()> {
        match self.cursor.get() {
            Some('-') => match self.cursor.get() {
                Some('-') => self.skip_until("-->"),
                _ => Err(self.error("Malformed comment.")),
            },
            Some(_) => self.skip_until(">"),
            None => Err(self.error("Unexpected end of file.")),
        }
    }

    fn skip_until(&mut self, pattern: &str) -> Result<()> {
        let pattern: Vec<char> = pattern.chars().collect();
        let mut window: Vec<char> = Vec::new();
        while let Some(ch) = self.cursor.get() {
            window.push(ch);
            if window.len() > pattern.len() {
                window.remove(0);
            }
            if window == pattern {
                return Ok(());
            }
        }
        Err(self.error("Unexpected end of file."))
    }

    fn parse_name(&mut self) -> Result<String> {
        let mut name = String::new();
        while let Some(ch) = self.cursor.get() {
            if ch.is_alphanumeric() || matches!(ch, '_' | '-' | ':' | '.') {
                name.push(ch);
            } else {
                self.cursor.put_back(ch);
                break;
            }
        }
        if name.is_empty() {
            return Err(self.error("Expected a name."));
        }
        Ok(name)
    }

    /// The cursor is at the opening `<` of an element.
    fn parse_element(&mut self) -> Result<XmlElement> {
        let line = self.cursor.line_number();
        let column = self.cursor.column_number();
        self.expect_char('<')?;
        let name = self.parse_name()?;

        let mut element = XmlElement::new(name);
        element.line = line;
        element.column = column;

        // Attributes up to `>` or `/>`.
        loop {
            self.skip_whitespace();
            match self.cursor.get() {
                None => return Err(self.error("Unexpected end of file.")),
                Some('/') => {
                    self.expect_char('>')?;
                    return Ok(element);
                }
                Some('>') => break,
                Some(ch) => {
                    self.cursor.put_back(ch);
                    let attr_name = self.parse_name()?;
                    self.skip_whitespace();
                    self.expect_char('=')?;
                    self.skip_whitespace();
                    let value = self.parse_attribute_value()?;
                    element.attributes.push((attr_name, value));
                }
            }
        }

        // Content up to the matching closing tag.
        loop {
            let text_line = self.cursor.line_number();
            let text_column = self.cursor.column_number();
            let text = self.parse_text()?;
            if !text.is_empty() {
                element.children.push(XmlNode::Text(XmlText {
                    text,
                    line: text_line,
                    column: text_column,
                }));
            }

            if self.cursor.at_end() {
                return Err(self.error("Unexpected end of file."));
            }
            let lt = self.cursor.get().expect("cursor is not at end");
            let Some(next) = self.cursor.get() else {
                return Err(self.error("Unexpected end of file."));
            };
            match next {
                '/' => {
                    let closing = self.parse_name()?;
                    self.skip_whitespace();
                    self.expect_char('>')?;
                    if closing != element.name {
                        return Err(self.error(format!(
                            "Mismatched closing tag \"{}\", expected \"{}\".",
                            closing, element.name
                        )));
                    }
                    return Ok(element);
                }
                '!' => self.skip_comment_or_doctype()?,
                _ => {
                    self.cursor.put_back(next);
                    self.cursor.put_back(lt);
                    let child = self.parse_element()?;
                    element.children.push(XmlNode::Element(child));
                }
            }
        }
    }

    fn parse_attribute_value(&mut self) -> Result<String> {
        let delimiter = match self.cursor.get() {
            Some(ch @ ('"' | '\'')) => ch,
            Some(_) => return Err(self.error("Expected a quoted attribute value.")),
            None => return Err(self.error("Unexpected end of file.")),
        };
        let mut value = String::new();
        loop {
            match self.cursor.get() {
                None => return Err(self.error("Unexpected end of file.")),
                Some(ch) if ch == delimiter => return Ok(value),
                Some('&') => value.push(self.parse_entity()?),
                Some(ch) => value.push(ch),
            }
        }
    }

    /// Character data up to the next `<` (which is put back) or the end
    /// of input.
    fn parse_text(&mut self) -> Result<String> {
        let mut text = String::new();
        while let Some(ch) = self.cursor.get() {
            match ch {
                '<' => {
                    self.cursor.put_back(ch);
                    break;
                }
                '&' => text.push(self.parse_entity()?),
                ch => text.push(ch),
            }
        }
        Ok(text)
    }

    /// The cursor is just past `&`.
    fn parse_entity(&mut self) -> Result<char> {
        let mut name = String::new();
        loop {
            match self.cursor.get() {
                None => return Err(self.error("Unexpected end of file.")),
                Some(';') => break,
                Some(ch) if name.len() < 8 => name.push(ch),
                Some(_) => return Err(self.error("Invalid entity reference.")),
            }
        }
        let decoded = match name.as_str() {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ => {
                if let Some(hex) = name.strip_prefix("#x") {
                    u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
                } else if let Some(dec) = name.strip_prefix('#') {
                    dec.parse::<u32>().ok().and_then(char::from_u32)
                } else {
                    None
                }
            }
        };
        decoded.ok_or_else(|| self.error(format!("Invalid entity reference \"&{};\".", name)))
    }
}
