//! Core types for the brickyard scaffolding engine.
//!
//! This crate provides the case transformer, the transform table handed to
//! renderers, and the variable bindings shared by every other crate in the
//! workspace.

pub mod case;
mod transform;
mod variables;

// Case conversion
pub use case::{
    split_words, to_camel_case, to_constant_case, to_dot_case, to_header_case, to_kebab_case,
    to_lower_case, to_pascal_case, to_path_case, to_sentence_case, to_snake_case, to_title_case,
    to_upper_case,
};
// Transform registry
pub use transform::{Transform, TransformFn, TransformTable, UnknownTransform};
// Variable bindings
pub use variables::{Variables, validate_identifier};
