//! Parser for the XML dialect, walking a pre-parsed element tree.
//!
//! Structurally equivalent to the brace parser: child elements stand in
//! for brace pairs, `a1`/`a2`/… attributes for scalar-vector values, and
//! text nodes for scalar values. The same hooks fire and the same
//! mandatory sweep runs afterwards.

use curly_core::{Error, ParseInfo, Result, from_serialized_form};
use curly_tree::TagRef;
use curly_xml::{XmlElement, XmlNode};
use tracing::trace;

use crate::sweep::check_mandatory_tree;

/// Parser of the XML dialect.
pub struct DomParser {
    root: TagRef,
    document: XmlElement,
    file_name: String,
}

impl DomParser {
    /// Create a parser for the given schema tree and document element.
    pub fn new(root: TagRef, document: XmlElement, file_name: impl Into<String>) -> Self {
        Self {
            root,
            document,
            file_name: file_name.into(),
        }
    }

    /// Run the parse to completion, mutating the tag tree in place.
    pub fn parse(&mut self) -> Result<()> {
        let document = self.document.clone();
        let root = self.root.clone();
        let root_name = root.borrow().name().to_string();

        if document.name != root_name {
            return Err(Error::UnexpectedRootTag {
                expected: root_name,
                got: document.name.clone(),
                info: self.info(document.line, document.column),
            });
        }

        let info = self.info(document.line, document.column);
        root.borrow_mut().on_start(&info)?;
        self.deliver_attributes(&root, &document)?;
        self.walk(&root, &document)?;
        root.borrow_mut().on_finish(&info)?;

        check_mandatory_tree(&self.root)
    }

    fn info(&self, line: usize, column: usize) -> ParseInfo {
        ParseInfo::new(&self.file_name, line, column)
    }

    /// Visit one element's children in document order.
    fn walk(&mut self, tag: &TagRef, element: &XmlElement) -> Result<()> {
        for node in &element.children {
            match node {
                XmlNode::Element(child_element) => {
                    let child_tag = {
                        let tag = tag.borrow();
                        tag.children()
                            .iter()
                            .find(|c| c.borrow().name() == child_element.name)
                            .cloned()
                    };
                    let Some(child_tag) = child_tag else {
                        return Err(Error::UnexpectedChildTag {
                            parent: tag.borrow().name().to_string(),
                            got: child_element.name.clone(),
                            info: self.info(child_element.line, child_element.column),
                        });
                    };

                    trace!("opened element {:?}", child_element.name);
                    let info = self.info(child_element.line, child_element.column);
                    child_tag.borrow_mut().on_start(&info)?;
                    self.deliver_attributes(&child_tag, child_element)?;
                    self.walk(&child_tag, child_element)?;
                    child_tag.borrow_mut().on_finish(&info)?;
                }
                XmlNode::Text(text) => {
                    // Indentation around child elements is a serialization
                    // artifact, not content.
                    let trimmed = text.text.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    let value = from_serialized_form(trimmed)?;
                    let info = self.info(text.line, text.column);
                    tag.borrow_mut().on_string(&info, &value)?;
                }
            }
        }
        Ok(())
    }

    /// Deliver `a1`, `a2`, … attribute values in ascending index order.
    /// Lookup is by generated name; the order attributes appear in the
    /// document is irrelevant.
    fn deliver_attributes(&mut self, tag: &TagRef, element: &XmlElement) -> Result<()> {
        for i in 1..=element.attributes.len() {
            let Some(value) = element.attribute(&format!("a{}", i)) else {
                continue;
            };
            // Attribute values are stored without their surrounding
            // quotes; restore them before unescaping.
            let value = from_serialized_form(&format!("\"{}\"", value))?;
            let info = self.info(element.line, element.column);
            tag.borrow_mut().on_string(&info, &value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curly_tree::{Tag, TagNoValue, TagScalar, TagScalarString, TagScalarVector, shared, tag_ref};
    use curly_xml::parse_document;

    fn parse_xml(root: &TagRef, source: &str) -> Result<()> {
        let document = parse_document(source, "test.xml")?;
        DomParser::new(root.clone(), document, "test.xml").parse()
    }

    #[test]
    fn elements_map_to_tags() {
        let root = shared(TagNoValue::new("cfg", true));
        let host = shared(TagScalarString::new("host", true));
        let port = shared(TagScalar::<i32>::new("port", true));
        root.borrow_mut().add_child(tag_ref(&host)).unwrap();
        root.borrow_mut().add_child(tag_ref(&port)).unwrap();

        parse_xml(
            &tag_ref(&root),
            "<cfg>\n  <host>localhost</host>\n  <port>8080</port>\n</cfg>",
        )
        .unwrap();

        assert_eq!(host.borrow().value(), Some("localhost"));
        assert_eq!(port.borrow().value(), Some(&8080));
    }

    #[test]
    fn attributes_map_to_scalar_vector_values() {
        let root = shared(TagNoValue::new("cfg", true));
        let values = shared(TagScalarVector::<i32>::new("intValues", true));
        root.borrow_mut().add_child(tag_ref(&values)).unwrap();

        parse_xml(
            &tag_ref(&root),
            "<cfg><intValues a1=\"100\" a2=\"200\" a3=\"300\"/></cfg>",
        )
        .unwrap();
        assert_eq!(values.borrow().values(), &[100, 200, 300]);
    }

    #[test]
    fn attribute_document_order_is_irrelevant() {
        let root = shared(TagNoValue::new("cfg", true));
        let values = shared(TagScalarVector::<i32>::new("intValues", true));
        root.borrow_mut().add_child(tag_ref(&values)).unwrap();

        // a3 first, a1 last: delivery still follows the generated names.
        parse_xml(
            &tag_ref(&root),
            "<cfg><intValues a3=\"300\" a2=\"200\" a1=\"100\"/></cfg>",
        )
        .unwrap();
        assert_eq!(values.borrow().values(), &[100, 200, 300]);
    }

    #[test]
    fn quoted_text_values_are_unescaped() {
        let root = shared(TagNoValue::new("cfg", true));
        let text = shared(TagScalarString::new("text", true));
        root.borrow_mut().add_child(tag_ref(&text)).unwrap();

        parse_xml(
            &tag_ref(&root),
            "<cfg><text>\"two words\\nand a newline\"</text></cfg>",
        )
        .unwrap();
        assert_eq!(text.borrow().value(), Some("two words\nand a newline"));
    }

    #[test]
    fn root_name_mismatch_is_fatal() {
        let root = shared(TagNoValue::new("cfg", true));
        let err = parse_xml(&tag_ref(&root), "<config/>").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unexpected tag name. We expected \"cfg\", but we've got \"config\". \
             In file \"test.xml\" on line 1."
        );
    }

    #[test]
    fn unknown_child_element_is_fatal() {
        let root = shared(TagNoValue::new("cfg", true));
        let err = parse_xml(&tag_ref(&root), "<cfg><mystery/></cfg>").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unexpected tag name. We expected one child tag of tag \"cfg\", \
             but we've got \"mystery\". In file \"test.xml\" on line 1."
        );
    }

    #[test]
    fn undefined_mandatory_child_is_fatal_in_xml_too() {
        let root = shared(TagNoValue::new("cfg", false));
        let port = shared(TagScalar::<i32>::new("port", true));
        root.borrow_mut().add_child(tag_ref(&port)).unwrap();

        let err = parse_xml(&tag_ref(&root), "<cfg/>").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Undefined child mandatory tag: \"port\". Where parent is: \"cfg\". \
             In file \"test.xml\" on line 1."
        );
    }

    #[test]
    fn malformed_xml_is_reported_with_position() {
        let root = shared(TagNoValue::new("cfg", true));
        let err = parse_xml(&tag_ref(&root), "<cfg><broken</cfg>").unwrap_err();
        assert!(
            err.to_string()
                .starts_with("Unable to parse XML from file: \"test.xml\".")
        );
    }
}
