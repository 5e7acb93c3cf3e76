#![doc = include_str!("../README.md")]

mod node;
pub use node::{XmlElement, XmlNode, XmlText};

mod reader;
pub use reader::parse_document;

mod writer;
pub use writer::write_document;
