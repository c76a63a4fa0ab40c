//! Make operation: render a brick into an output directory.

use std::path::Path;

use brickyard_core::Variables;
use brickyard_manifest::Brick;
use brickyard_scaffold::{ConflictPolicy, Content, OutputTree, Scaffold, ScaffoldError};

use crate::reports::{MakeReport, MakeResult, PreviewFile, PreviewResult, WrittenResult};

/// Options for the make operation.
pub struct MakeOptions<'a> {
    pub output_dir: &'a Path,
    pub on_conflict: ConflictPolicy,
    /// Render on the rayon thread pool.
    pub parallel: bool,
    /// Render only and preview the result.
    pub dry_run: bool,
}

/// Execute the make operation.
pub fn make(
    brick: &Brick,
    variables: &Variables,
    opts: MakeOptions<'_>,
) -> Result<MakeReport, ScaffoldError> {
    let scaffold = Scaffold::new()
        .on_conflict(opts.on_conflict)
        .parallel(opts.parallel);

    let result = if opts.dry_run {
        let tree = scaffold.plan(brick.template_root(), variables)?;
        MakeResult::Preview(preview(&tree, opts.output_dir))
    } else {
        let report = scaffold.generate(brick.template_root(), opts.output_dir, variables)?;
        MakeResult::Written(WrittenResult {
            created: report.created,
            overwritten: report.overwritten,
            skipped: report.skipped,
            directories: report.directories,
        })
    };

    Ok(MakeReport {
        brick: brick.name(),
        output_dir: opts.output_dir.to_path_buf(),
        result,
    })
}

fn preview(tree: &OutputTree, output_dir: &Path) -> PreviewResult {
    let files = tree
        .files()
        .map(|file| PreviewFile {
            path: file.path.clone(),
            content: match &file.content {
                Content::Text(text) => Some(text.clone()),
                Content::Binary(_) => None,
            },
            bytes: file.content.as_bytes().len(),
        })
        .collect();

    let existing = tree
        .files()
        .filter(|file| output_dir.join(&file.path).exists())
        .map(|file| file.path.clone())
        .collect();

    PreviewResult { files, existing }
}
