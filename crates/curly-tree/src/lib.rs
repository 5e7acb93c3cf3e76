#![doc = include_str!("../README.md")]

mod tag;
pub use tag::{Tag, TagBase, TagRef, shared, tag_ref};

mod value;
pub use value::ValueFormat;

mod constraint;
pub use constraint::Constraint;

mod no_value;
pub use no_value::TagNoValue;

mod scalar;
pub use scalar::TagScalar;

mod scalar_string;
pub use scalar_string::TagScalarString;

mod scalar_vector;
pub use scalar_vector::TagScalarVector;

mod vector_of_tags;
pub use vector_of_tags::{Subordinate, TagVectorOfTags};
