//! Core operations.
//!
//! This module contains the business logic for brick commands,
//! separated from CLI argument parsing and output rendering.

mod analyze;
pub mod check;
pub mod info;
pub mod make;

pub use check::{CheckVariables, check};
pub use info::info;
pub use make::{MakeOptions, make};
