//! Tag accumulating an ordered sequence of typed values.

use curly_core::{Error, ParseInfo, Result, to_serialized_form};
use curly_xml::{XmlElement, XmlNode};

use crate::tag::{check_mandatory_children, print_block, print_children_xml};
use crate::vector_of_tags::Subordinate;
use crate::{Constraint, Tag, TagBase, ValueFormat};

/// A tag with zero or more typed values.
///
/// Every value is constraint-checked as it arrives, and all values must
/// appear before any child tag. A vector that received no values stays
/// undefined.
#[derive(Debug)]
pub struct TagScalarVector<T: ValueFormat> {
    base: TagBase,
    values: Vec<T>,
    constraint: Option<Constraint<T>>,
}

impl<T: ValueFormat> TagScalarVector<T> {
    /// Create the tag.
    pub fn new(name: impl Into<String>, mandatory: bool) -> Self {
        Self {
            base: TagBase::new(name, mandatory),
            values: Vec::new(),
            constraint: None,
        }
    }

    /// Attach a constraint, checked against each value individually.
    pub fn with_constraint(mut self, constraint: Constraint<T>) -> Self {
        self.constraint = Some(constraint);
        self
    }

    /// The accumulated values, in delivery order.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Append one value before writing a configuration out.
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
        self.values.push(value);
        self.base.set_defined(true);
        Ok(())
    }

    /// Replace all values before writing a configuration out.
    pub fn set_values(&mut self, values: Vec<T>) {
        self.values = values;
        self.base.set_defined(true);
    }
}

impl<T: ValueFormat> Tag for TagScalarVector<T> {
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
        self.values.push(value);
        self.base.set_defined(true);
        Ok(())
    }

    fn on_finish(&mut self, info: &ParseInfo) -> Result<()> {
        check_mandatory_children(self, info)
    }

    fn print(&self, indent: usize) -> String {
        if !self.is_defined() {
            return String::new();
        }
        let mut values = String::new();
        for value in &self.values {
            values.push(' ');
            values.push_str(&to_serialized_form(&value.to_text()));
        }
        print_block(self, indent, &values)
    }

    fn print_xml(&self, nodes: &mut Vec<XmlNode>) {
        if !self.is_defined() {
            return;
        }
        let mut element = XmlElement::new(self.name());
        for (i, value) in self.values.iter().enumerate() {
            let mut text = to_serialized_form(&value.to_text());
            // Attribute values carry the escaped payload without the
            // surrounding quotes; the reader puts them back.
            if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
                text = text[1..text.len() - 1].to_string();
            }
            element.set_attribute(format!("a{}", i + 1), text);
        }
        print_children_xml(self, &mut element.children);
        nodes.push(XmlNode::Element(element));
    }
}

impl<T: ValueFormat> Subordinate for TagScalarVector<T> {
    fn create(name: &str, mandatory: bool) -> Self {
        TagScalarVector::new(name, mandatory)
    }
}
