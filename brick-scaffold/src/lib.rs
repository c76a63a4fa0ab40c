//! Project generation from brickyard template trees.
//!
//! A scaffold invocation walks a template directory, renders every path and
//! file into an in-memory [`OutputTree`], and only then writes the tree to
//! disk. A render error leaves the output root untouched; a write error
//! rolls back whatever the invocation already wrote.
//!
//! # Module Organization
//!
//! - [`walk`] / [`render_path`] - Deterministic template walking and path rendering
//! - [`OutputTree`] - Rendered entries waiting to be written
//! - [`WriteTransaction`] - Tracked writes with rollback
//! - [`Scaffold`] - The engine tying the phases together

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod cancel;
mod engine;
mod error;
mod tree;
mod walker;
mod write;

pub use cancel::CancelToken;
pub use engine::{Observer, Scaffold, ScaffoldReport, ScaffoldState, generate};
pub use error::ScaffoldError;
pub use tree::{OutputEntry, OutputFile, OutputTree};
pub use walker::{Content, TemplateEntry, TemplateFile, Walk, display_name, render_path, walk};
pub use write::{ConflictPolicy, WriteOutcome, WriteTransaction};
