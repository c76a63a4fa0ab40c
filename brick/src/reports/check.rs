//! Check command report data structures.

use std::path::PathBuf;

use serde::Serialize;

use super::output::{Output, Report};

/// Report data from brick validation.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    /// Brick name.
    pub brick: String,
    /// Template directory that was checked.
    pub template_root: PathBuf,
    /// Number of template files parsed.
    pub templates: usize,
    /// Problems that make the brick unusable.
    pub errors: Vec<String>,
    /// Problems worth fixing.
    pub warnings: Vec<String>,
    /// Render-phase outcome.
    pub render: RenderCheck,
}

/// Whether the render phase was run.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RenderCheck {
    /// Every template rendered; these files would be produced.
    Rendered { outputs: Vec<PathBuf> },
    /// Not run, with the reason.
    Skipped { reason: String },
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.error(error);
        }
        for warning in &self.warnings {
            out.warning(warning);
        }
        if !self.errors.is_empty() || !self.warnings.is_empty() {
            out.newline();
        }

        match &self.render {
            RenderCheck::Rendered { outputs } => {
                out.section(&format!("Output files ({})", outputs.len()));
                for path in outputs {
                    out.list_item(&path.display().to_string());
                }
                out.newline();
            }
            RenderCheck::Skipped { reason } => {
                out.preformatted(&format!("render skipped: {}", reason));
                out.newline();
            }
        }

        if self.is_valid() {
            out.preformatted(&format!(
                "✓ {} is valid ({} template{})",
                self.brick,
                self.templates,
                if self.templates == 1 { "" } else { "s" }
            ));
        }
    }
}
