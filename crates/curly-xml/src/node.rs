//! The XML document model.

/// An XML element: name, ordered attributes, ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    /// Element name.
    pub name: String,
    /// Attributes in document order.
    pub attributes: Vec<(String, String)>,
    /// Child nodes in document order.
    pub children: Vec<XmlNode>,
    /// Line of the opening `<`, 1-based.
    pub line: usize,
    /// Column of the opening `<`, 1-based.
    pub column: usize,
}

/// A node inside an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    /// A child element.
    Element(XmlElement),
    /// A run of character data.
    Text(XmlText),
}

/// A run of character data with its source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlText {
    /// The decoded text.
    pub text: String,
    /// Line where the run starts, 1-based.
    pub line: usize,
    /// Column where the run starts, 1-based.
    pub column: usize,
}

impl XmlElement {
    /// Create an element with no attributes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            line: 0,
            column: 0,
        }
    }

    /// Look up an attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Append an attribute.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.push((name.into(), value.into()));
    }
}
