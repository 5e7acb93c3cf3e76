//! Tag holding no scalar value.

use curly_core::{Error, ParseInfo, Result};
use curly_xml::{XmlElement, XmlNode};

use crate::tag::{check_mandatory_children, print_block, print_children_xml};
use crate::vector_of_tags::Subordinate;
use crate::{Tag, TagBase};

/// A tag that carries only presence and children.
///
/// Any value delivered to it is an error; closing it marks it defined.
#[derive(Debug)]
pub struct TagNoValue {
    base: TagBase,
}

impl TagNoValue {
    /// Create the tag.
    pub fn new(name: impl Into<String>, mandatory: bool) -> Self {
        Self {
            base: TagBase::new(name, mandatory),
        }
    }
}

impl Tag for TagNoValue {
    fn base(&self) -> &TagBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut TagBase {
        &mut self.base
    }

    fn on_string(&mut self, info: &ParseInfo, text: &str) -> Result<()> {
        Err(Error::NoValueAllowed {
            name: self.name().to_string(),
            value: text.to_string(),
            info: info.clone(),
        })
    }

    fn on_finish(&mut self, info: &ParseInfo) -> Result<()> {
        check_mandatory_children(self, info)?;
        self.base.set_defined(true);
        Ok(())
    }

    fn print(&self, indent: usize) -> String {
        if !self.is_defined() {
            return String::new();
        }
        print_block(self, indent, "")
    }

    fn print_xml(&self, nodes: &mut Vec<XmlNode>) {
        if !self.is_defined() {
            return;
        }
        let mut element = XmlElement::new(self.name());
        print_children_xml(self, &mut element.children);
        nodes.push(XmlNode::Element(element));
    }
}

impl Subordinate for TagNoValue {
    fn create(name: &str, mandatory: bool) -> Self {
        TagNoValue::new(name, mandatory)
    }
}
