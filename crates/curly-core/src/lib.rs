#![doc = include_str!("../README.md")]

pub mod consts;

mod info;
pub use info::ParseInfo;

mod error;
pub use error::{Error, Result};

mod diagnostic;

mod escape;
pub use escape::{from_serialized_form, to_serialized_form};
