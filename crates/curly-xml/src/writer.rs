//! Writer serializing an [`XmlElement`] tree.

use crate::{XmlElement, XmlNode};

const INDENT: &str = "    ";

/// Serialize a document with an XML declaration and 4-space indentation.
pub fn write_document(root: &XmlElement) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    write_element(root, 0, &mut out);
    out
}

fn write_element(element: &XmlElement, depth: usize, out: &mut String) {
    let pad = INDENT.repeat(depth);
    out.push_str(&pad);
    out.push('<');
    out.push_str(&element.name);
    for (name, value) in &element.attributes {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_attribute(value));
        out.push('"');
    }

    if element.children.is_empty() {
        out.push_str("/>\n");
        return;
    }

    // A single text child stays on one line so values read naturally.
    if let [XmlNode::Text(text)] = element.children.as_slice() {
        out.push('>');
        out.push_str(&escape_text(&text.text));
        out.push_str("</");
        out.push_str(&element.name);
        out.push_str(">\n");
        return;
    }

    out.push_str(">\n");
    for child in &element.children {
        match child {
            XmlNode::Element(e) => write_element(e, depth + 1, out),
            XmlNode::Text(text) => {
                out.push_str(&INDENT.repeat(depth + 1));
                out.push_str(&escape_text(&text.text));
                out.push('\n');
            }
        }
    }
    out.push_str(&pad);
    out.push_str("</");
    out.push_str(&element.name);
    out.push_str(">\n");
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            ch => out.push(ch),
        }
    }
    out
}

fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\n' => out.push_str("&#10;"),
            '\t' => out.push_str("&#9;"),
            '\r' => out.push_str("&#13;"),
            ch => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_document;

    #[test]
    fn writes_and_reparses() {
        let mut root = XmlElement::new("cfg");
        let mut host = XmlElement::new("host");
        host.children.push(XmlNode::Text(crate::XmlText {
            text: "localhost".into(),
            line: 0,
            column: 0,
        }));
        let mut ports = XmlElement::new("ports");
        ports.set_attribute("a1", "80");
        ports.set_attribute("a2", "443");
        root.children.push(XmlNode::Element(host));
        root.children.push(XmlNode::Element(ports));

        let text = write_document(&root);
        assert!(text.starts_with("<?xml"));

        let reparsed = parse_document(&text, "test.xml").unwrap();
        assert_eq!(reparsed.name, "cfg");
        let elements: Vec<_> = reparsed
            .children
            .iter()
            .filter_map(|n| match n {
                XmlNode::Element(e) => Some(e),
                XmlNode::Text(_) => None,
            })
            .collect();
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[1].attribute("a2"), Some("443"));
    }

    #[test]
    fn escapes_reserved_characters() {
        let mut root = XmlElement::new("t");
        root.set_attribute("a1", "a<b>&\"c");
        root.children.push(XmlNode::Element(XmlElement::new("e")));
        root.children.push(XmlNode::Text(crate::XmlText {
            text: "x & <y>".into(),
            line: 0,
            column: 0,
        }));

        let text = write_document(&root);
        let reparsed = parse_document(&text, "test.xml").unwrap();
        assert_eq!(reparsed.attribute("a1"), Some("a<b>&\"c"));
        let texts: Vec<_> = reparsed
            .children
            .iter()
            .filter_map(|n| match n {
                XmlNode::Text(t) => Some(t.text.trim().to_string()),
                XmlNode::Element(_) => None,
            })
            .filter(|t| !t.is_empty())
            .collect();
        assert_eq!(texts, vec!["x & <y>"]);
    }
}
