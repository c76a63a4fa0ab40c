//! Token parsing and rendering for brickyard templates.
//!
//! Templates embed `{{identifier}}` or `{{identifier.transform()...}}`
//! tokens. Rendering substitutes each token with the bound variable after
//! applying its transforms left to right.
//!
//! # Module Organization
//!
//! - [`token`] - Tokenizer producing literal and token segments
//! - [`RenderContext`] - Variables and transforms for one pass
//! - [`Template`] - Parsed template and the render entry points
//! - [`RenderError`] - Diagnostics for undefined variables, unknown
//!   transforms and malformed tokens

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod context;
mod error;
mod render;
pub mod token;

pub use context::{RenderContext, ResolveError};
pub use error::RenderError;
pub use render::{Template, render, render_named};
pub use token::{Segment, Token};
