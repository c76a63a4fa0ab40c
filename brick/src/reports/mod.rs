//! Report data structures for commands.
//!
//! Commands build reports, then render them to an [`Output`] target or
//! serialize them as JSON.

mod check;
mod info;
mod make;
mod output;

pub use check::{CheckReport, RenderCheck};
pub use info::{InfoReport, Stats, VariableInfo};
pub use make::{MakeReport, MakeResult, PreviewFile, PreviewResult, WrittenResult};
pub use output::emit;
