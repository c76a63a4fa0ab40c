//! Make command report data structures.

use std::path::PathBuf;

use serde::Serialize;

use super::output::{Output, Report};

/// Report data from project generation.
#[derive(Debug, Serialize)]
pub struct MakeReport {
    /// Brick name.
    pub brick: String,
    /// Output directory.
    pub output_dir: PathBuf,
    /// Files written, or the preview of a dry run.
    pub result: MakeResult,
}

/// Result of project generation.
#[derive(Debug, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum MakeResult {
    /// Files were written to disk.
    Written(WrittenResult),
    /// Dry-run preview.
    Preview(PreviewResult),
}

/// Result when files were written to disk.
#[derive(Debug, Default, Serialize)]
pub struct WrittenResult {
    pub created: Vec<PathBuf>,
    pub overwritten: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub directories: Vec<PathBuf>,
}

/// Result of a dry-run preview.
#[derive(Debug, Serialize)]
pub struct PreviewResult {
    /// Files that would be written, in write order.
    pub files: Vec<PreviewFile>,
    /// Rendered files that already exist in the output directory.
    pub existing: Vec<PathBuf>,
}

/// A file in preview mode.
#[derive(Debug, Serialize)]
pub struct PreviewFile {
    pub path: PathBuf,
    /// Rendered text, or `None` for binary files.
    pub content: Option<String>,
    pub bytes: usize,
}

impl Report for MakeReport {
    fn render(&self, out: &mut dyn Output) {
        match &self.result {
            MakeResult::Written(written) => self.render_written(out, written),
            MakeResult::Preview(preview) => self.render_preview(out, preview),
        }
    }
}

impl MakeReport {
    fn render_written(&self, out: &mut dyn Output, written: &WrittenResult) {
        for path in &written.created {
            out.added_item(&path.display().to_string());
        }
        for path in &written.overwritten {
            out.changed_item(&path.display().to_string());
        }
        for path in &written.skipped {
            out.skipped_item(&format!("{} (exists)", path.display()));
        }
        out.newline();

        let written_count = written.created.len() + written.overwritten.len();
        let mut summary = format!(
            "✓ {} → {}: {} file{} written",
            self.brick,
            self.output_dir.display(),
            written_count,
            plural(written_count)
        );
        if !written.skipped.is_empty() {
            summary.push_str(&format!(", {} skipped", written.skipped.len()));
        }
        if !written.directories.is_empty() {
            summary.push_str(&format!(
                ", {} director{} created",
                written.directories.len(),
                if written.directories.len() == 1 { "y" } else { "ies" }
            ));
        }
        out.preformatted(&summary);
    }

    fn render_preview(&self, out: &mut dyn Output, preview: &PreviewResult) {
        for file in &preview.files {
            out.divider(&file.path.display().to_string());
            match &file.content {
                Some(content) => out.preformatted(content),
                None => out.preformatted(&format!("<binary, {} bytes>", file.bytes)),
            }
        }

        out.divider("Summary");
        out.preformatted(&format!(
            "{} file{} would be generated in {}",
            preview.files.len(),
            plural(preview.files.len()),
            self.output_dir.display()
        ));
        for path in &preview.existing {
            out.warning(&format!("{} already exists", path.display()));
        }
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}
