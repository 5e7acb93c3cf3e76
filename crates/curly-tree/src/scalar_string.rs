//! Tag holding one string value, with line-wrapped output.

use curly_core::{Error, ParseInfo, Result, to_serialized_form};
use curly_xml::{XmlElement, XmlNode, XmlText};

use crate::tag::{print_block, print_children_xml};
use crate::vector_of_tags::Subordinate;
use crate::{Constraint, Tag, TagBase};

/// Column budget for a string value on one physical line. Longer values
/// are split into sections; the lexer's concatenation of adjacent string
/// lexemes puts them back together on the next read.
const MAX_STRING_LENGTH: usize = 80;

/// A tag with a single string value.
///
/// Unlike the other scalar tags, successive string lexemes are
/// concatenated rather than rejected; that is what makes the wrapped
/// output of [`print`](Tag::print) re-parse to the original value.
#[derive(Debug)]
pub struct TagScalarString {
    base: TagBase,
    value: String,
    constraint: Option<Constraint<String>>,
}

impl TagScalarString {
    /// Create the tag.
    pub fn new(name: impl Into<String>, mandatory: bool) -> Self {
        Self {
            base: TagBase::new(name, mandatory),
            value: String::new(),
            constraint: None,
        }
    }

    /// Attach a constraint, checked against the complete value when the
    /// tag closes.
    pub fn with_constraint(mut self, constraint: Constraint<String>) -> Self {
        self.constraint = Some(constraint);
        self
    }

    /// The tag's value, if defined.
    pub fn value(&self) -> Option<&str> {
        if self.base.defined_flag() {
            Some(&self.value)
        } else {
            None
        }
    }

    /// Set the value before writing a configuration out.
    pub fn set_value(&mut self, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        if let Some(constraint) = &self.constraint {
            if !constraint.check(&value) {
                return Err(Error::ConstraintViolation {
                    value,
                    tag: self.name().to_string(),
                    info: None,
                });
            }
        }
        self.value = value;
        self.base.set_defined(true);
        Ok(())
    }
}

impl Tag for TagScalarString {
    fn base(&self) -> &TagBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut TagBase {
        &mut self.base
    }

    fn on_string(&mut self, info: &ParseInfo, text: &str) -> Result<()> {
        if self.is_any_child_defined() {
            return Err(Error::ValueAfterChildTag {
                name: self.name().to_string(),
                value: text.to_string(),
                info: info.clone(),
            });
        }
        self.value.push_str(text);
        self.base.set_defined(true);
        Ok(())
    }

    fn on_finish(&mut self, info: &ParseInfo) -> Result<()> {
        if let Some(constraint) = &self.constraint {
            if !constraint.check(&self.value) {
                return Err(Error::ConstraintViolation {
                    value: self.value.clone(),
                    tag: self.name().to_string(),
                    info: Some(info.clone()),
                });
            }
        }
        if !self.is_defined() {
            return Err(Error::UndefinedValue {
                name: self.name().to_string(),
                info: info.clone(),
            });
        }
        Ok(())
    }

    fn print(&self, indent: usize) -> String {
        if !self.is_defined() {
            return String::new();
        }

        let mut values = String::from(" ");
        let chars: Vec<char> = self.value.chars().collect();
        if chars.is_empty() {
            values.push_str("\"\"");
        } else {
            // Continuation lines are aligned under the value start column.
            let continuation = format!(
                "\n{}{}",
                "\t".repeat(indent),
                " ".repeat(self.name().len() + 2)
            );
            for (i, chunk) in chars.chunks(MAX_STRING_LENGTH).enumerate() {
                if i > 0 {
                    values.push_str(&continuation);
                }
                let section: String = chunk.iter().collect();
                values.push_str(&to_serialized_form(&section));
            }
        }
        print_block(self, indent, &values)
    }

    fn print_xml(&self, nodes: &mut Vec<XmlNode>) {
        if !self.is_defined() {
            return;
        }
        let mut element = XmlElement::new(self.name());
        element.children.push(XmlNode::Text(XmlText {
            text: to_serialized_form(&self.value),
            line: 0,
            column: 0,
        }));
        print_children_xml(self, &mut element.children);
        nodes.push(XmlNode::Element(element));
    }
}

impl Subordinate for TagScalarString {
    fn create(name: &str, mandatory: bool) -> Self {
        TagScalarString::new(name, mandatory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info() -> ParseInfo {
        ParseInfo::new("test.curly", 1, 1)
    }

    #[test]
    fn successive_strings_concatenate() {
        let mut tag = TagScalarString::new("text", true);
        tag.on_string(&info(), "hello ").unwrap();
        tag.on_string(&info(), "world").unwrap();
        tag.on_finish(&info()).unwrap();
        assert_eq!(tag.value(), Some("hello world"));
    }

    #[test]
    fn empty_value_prints_as_empty_quotes() {
        let mut tag = TagScalarString::new("text", true);
        tag.set_value("").unwrap();
        assert_eq!(tag.print(0), "{text \"\"}\n");
    }

    #[test]
    fn short_value_prints_on_one_line() {
        let mut tag = TagScalarString::new("text", true);
        tag.set_value("hello world").unwrap();
        assert_eq!(tag.print(0), "{text \"hello world\"}\n");
    }

    #[test]
    fn long_value_wraps_at_the_column_budget() {
        let mut tag = TagScalarString::new("text", true);
        tag.set_value("a".repeat(200)).unwrap();
        let printed = tag.print(1);

        let lines: Vec<&str> = printed.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("\t{text "));
        // Continuations are aligned under the value start column.
        let continuation_prefix = format!("\t{}", " ".repeat("text".len() + 2));
        assert!(lines[1].starts_with(&continuation_prefix));
        assert!(lines[2].ends_with("}"));

        // Sections are 80, 80 and 40 characters of payload.
        let payload: String = printed
            .chars()
            .filter(|c| *c == 'a')
            .collect();
        assert_eq!(payload.len(), 200);
    }

    #[test]
    fn constraint_applies_to_the_accumulated_value() {
        let mut tag = TagScalarString::new("env", true)
            .with_constraint(Constraint::one_of(["dev".to_string(), "prod".to_string()]));
        tag.on_string(&info(), "de").unwrap();
        tag.on_string(&info(), "v").unwrap();
        tag.on_finish(&info()).unwrap();
        assert_eq!(tag.value(), Some("dev"));

        let mut bad = TagScalarString::new("env", true)
            .with_constraint(Constraint::one_of(["dev".to_string()]));
        bad.on_string(&info(), "staging").unwrap();
        let err = bad.on_finish(&info()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value: \"staging\". Value must match to the constraint \
             in tag \"env\". In file \"test.curly\" on line 1."
        );
    }
}
