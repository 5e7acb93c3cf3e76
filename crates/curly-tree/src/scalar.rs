//! Tag holding exactly one typed value.

use curly_core::{Error, ParseInfo, Result, to_serialized_form};
use curly_xml::{XmlElement, XmlNode, XmlText};

use crate::tag::{print_block, print_children_xml};
use crate::vector_of_tags::Subordinate;
use crate::{Constraint, Tag, TagBase, ValueFormat};

/// A tag with a single typed value.
///
/// The value must arrive before any child tag; a second value for an
/// already-defined tag is an error. String values want [`TagScalarString`]
/// instead, which knows how to reassemble line-wrapped output.
///
/// [`TagScalarString`]: crate::TagScalarString
#[derive(Debug)]
pub struct TagScalar<T: ValueFormat> {
    base: TagBase,
    value: Option<T>,
    constraint: Option<Constraint<T>>,
}

impl<T: ValueFormat> TagScalar<T> {
    /// Create the tag.
    pub fn new(name: impl Into<String>, mandatory: bool) -> Self {
        Self {
            base: TagBase::new(name, mandatory),
            value: None,
            constraint: None,
        }
    }

    /// Attach a constraint. Values are checked at the moment they are
    /// assigned, whether parsed or set programmatically.
    pub fn with_constraint(mut self, constraint: Constraint<T>) -> Self {
        self.constraint = Some(constraint);
        self
    }

    /// The tag's value, if defined.
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Set the value before writing a configuration out.
    pub fn set_value(&mut self, value: T) -> Result<()> {
        if let Some(constraint) = &self.constraint {
            if !constraint.check(&value) {
                return Err(Error::ConstraintViolation {
                    value: value.to_text(),
                    tag: self.name().to_string(),
                    info: None,
                });
            }
        }
        self.value = Some(value);
        self.base.set_defined(true);
        Ok(())
    }
}

impl<T: ValueFormat> Tag for TagScalar<T> {
    fn base(&self) -> &TagBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut TagBase {
        &mut self.base
    }

    fn on_string(&mut self, info: &ParseInfo, text: &str) -> Result<()> {
        if self.is_defined() {
            return Err(Error::ValueAlreadyDefined {
                name: self.name().to_string(),
                info: info.clone(),
            });
        }
        if self.is_any_child_defined() {
            return Err(Error::ValueAfterChildTag {
                name: self.name().to_string(),
                value: text.to_string(),
                info: info.clone(),
            });
        }

        let value = T::from_text(info, text)?;
        if let Some(constraint) = &self.constraint {
            if !constraint.check(&value) {
                return Err(Error::ConstraintViolation {
                    value: text.to_string(),
                    tag: self.name().to_string(),
                    info: Some(info.clone()),
                });
            }
        }
        self.value = Some(value);
        self.base.set_defined(true);
        Ok(())
    }

    fn on_finish(&mut self, info: &ParseInfo) -> Result<()> {
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
        let Some(value) = &self.value else {
            return String::new();
        };
        let values = format!(" {}", to_serialized_form(&value.to_text()));
        print_block(self, indent, &values)
    }

    fn print_xml(&self, nodes: &mut Vec<XmlNode>) {
        if !self.is_defined() {
            return;
        }
        let Some(value) = &self.value else {
            return;
        };
        let mut element = XmlElement::new(self.name());
        element.children.push(XmlNode::Text(XmlText {
            text: to_serialized_form(&value.to_text()),
            line: 0,
            column: 0,
        }));
        print_children_xml(self, &mut element.children);
        nodes.push(XmlNode::Element(element));
    }
}

impl<T: ValueFormat> Subordinate for TagScalar<T> {
    fn create(name: &str, mandatory: bool) -> Self {
        TagScalar::new(name, mandatory)
    }
}
