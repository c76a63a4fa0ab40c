//! Bricks on disk: the `brick.toml` manifest, variables files and variable
//! resolution.
//!
//! A brick is a directory holding a `brick.toml` and a `__brick__` template
//! tree:
//!
//! ```toml
//! [brick]
//! name = "flutter_app"
//! description = "Flutter app with flavors"
//! version = "0.1.0"
//!
//! [vars.project_name]
//! description = "Application name"
//! default = "my_app"
//!
//! [vars.organization]
//! prompt = "Organization (e.g. com.example)"
//! ```

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod brick;
mod error;
mod manifest;
mod resolve;
mod validate;
mod vars_file;
mod version;

pub use brick::{Brick, MANIFEST_FILE, TEMPLATE_DIR};
pub use error::{Error, Result, SourceContext};
pub use manifest::{BrickConfig, Manifest, VarSpec};
pub use resolve::{NoPrompt, Prompt, ValueSource, VariableSources, resolve_variables};
pub use vars_file::{parse_vars_file, parse_vars_str};
pub use version::Version;
