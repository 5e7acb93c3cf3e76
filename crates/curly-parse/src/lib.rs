#![doc = include_str!("../README.md")]

mod parser;
pub use parser::Parser;

mod dom;
pub use dom::DomParser;

mod sweep;
