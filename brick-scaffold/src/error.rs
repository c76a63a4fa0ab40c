use std::{io, path::PathBuf};

use brickyard_template::RenderError;
use miette::Diagnostic;
use thiserror::Error;

use crate::ScaffoldState;

/// Errors raised by a scaffold invocation.
///
/// Render-phase errors (`Render`, `InvalidOutputPath`, `DuplicateOutput`,
/// walk and read failures) abort before anything is written. Write-phase
/// errors (`Conflict`, `Write`) roll back the files this invocation created;
/// `leftovers` lists anything rollback could not undo. `Cancelled` records
/// the state it interrupted.
#[derive(Debug, Error, Diagnostic)]
pub enum ScaffoldError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Render(#[from] RenderError),

    #[error("template directory '{path}' does not exist or is not a directory")]
    #[diagnostic(code(brick::template_root))]
    TemplateRootMissing { path: PathBuf },

    #[error("failed to walk template tree at '{path}'")]
    #[diagnostic(code(brick::walk))]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to read template '{path}'")]
    #[diagnostic(code(brick::read))]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid output path for template '{template}': {reason} (rendered as '{rendered}')")]
    #[diagnostic(
        code(brick::invalid_output_path),
        help("every path component must render to a non-empty name other than '.' or '..'")
    )]
    InvalidOutputPath {
        template: PathBuf,
        rendered: String,
        reason: &'static str,
    },

    #[error("templates '{first}' and '{second}' both render to '{path}'")]
    #[diagnostic(code(brick::duplicate_output))]
    DuplicateOutput {
        path: PathBuf,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("{} output path(s) already exist in '{root}': {}", .paths.len(), list(.paths))]
    #[diagnostic(
        code(brick::conflict),
        help("use `--on-conflict overwrite` or `--on-conflict skip` to write over an existing tree")
    )]
    Conflict { root: PathBuf, paths: Vec<PathBuf> },

    #[error("failed to write '{path}'{}", leftover_note(.leftovers))]
    #[diagnostic(code(brick::write_failed))]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
        leftovers: Vec<PathBuf>,
    },

    #[error("scaffold cancelled while {}{}", .phase.as_str(), leftover_note(.leftovers))]
    #[diagnostic(code(brick::cancelled))]
    Cancelled {
        /// `Collecting` or `Writing`.
        phase: ScaffoldState,
        leftovers: Vec<PathBuf>,
    },
}

impl ScaffoldError {
    /// Check whether the error happened before any file was written.
    pub fn is_render_phase(&self) -> bool {
        match self {
            ScaffoldError::Conflict { .. } | ScaffoldError::Write { .. } => false,
            ScaffoldError::Cancelled { phase, .. } => *phase == ScaffoldState::Collecting,
            _ => true,
        }
    }

    /// Paths rollback could not remove or restore.
    pub fn leftovers(&self) -> &[PathBuf] {
        match self {
            ScaffoldError::Write { leftovers, .. }
            | ScaffoldError::Cancelled { leftovers, .. } => leftovers,
            _ => &[],
        }
    }

    pub(crate) fn with_leftovers(mut self, paths: Vec<PathBuf>) -> Self {
        match &mut self {
            ScaffoldError::Write { leftovers, .. }
            | ScaffoldError::Cancelled { leftovers, .. } => *leftovers = paths,
            _ => {}
        }
        self
    }
}

fn list(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn leftover_note(leftovers: &[PathBuf]) -> String {
    if leftovers.is_empty() {
        String::new()
    } else {
        format!(
            "; rollback could not remove {} path(s): {}",
            leftovers.len(),
            list(leftovers)
        )
    }
}
