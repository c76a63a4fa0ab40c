//! Scaffold engine: render a whole template tree, then write it.
//!
//! An invocation moves through [`ScaffoldState`]s:
//!
//! ```text
//! Collecting -> Validated -> Writing -> Complete
//!     |                         |
//!     +-> Failed                +-> Failed (rolled back)
//! ```
//!
//! Every template is rendered into an [`OutputTree`] before the first write.
//! A render error therefore leaves the filesystem untouched. A write error
//! (or cancellation) during `Writing` rolls back every file and directory the
//! invocation created and restores files it overwrote.
//!
//! Rollback is best effort. The filesystem offers no transactions, so
//! another process can observe a partial tree before rollback removes it,
//! and a failing rollback reports the paths it left behind. Concurrent
//! invocations targeting the same output root must be serialized by the
//! caller.

use std::path::{Path, PathBuf};

use brickyard_core::{TransformTable, Variables};
use brickyard_template::{RenderContext, render_named};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::{
    CancelToken, ScaffoldError,
    tree::{OutputEntry, OutputFile, OutputTree},
    walker::{Content, TemplateEntry, display_name, render_path, walk},
    write::{ConflictPolicy, WriteOutcome, WriteTransaction},
};

/// Lifecycle state of one scaffold invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScaffoldState {
    /// Walking and rendering templates in memory.
    Collecting,
    /// Every template rendered; nothing written yet.
    Validated,
    /// Writing the output tree.
    Writing,
    /// Every entry written.
    Complete,
    /// Aborted; any writes were rolled back.
    Failed,
}

impl ScaffoldState {
    /// Check whether moving from `self` to `next` is allowed.
    pub fn can_transition_to(self, next: ScaffoldState) -> bool {
        use ScaffoldState::*;
        matches!(
            (self, next),
            (Collecting, Validated)
                | (Collecting, Failed)
                | (Validated, Writing)
                | (Writing, Complete)
                | (Writing, Failed)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScaffoldState::Collecting => "collecting",
            ScaffoldState::Validated => "validated",
            ScaffoldState::Writing => "writing",
            ScaffoldState::Complete => "complete",
            ScaffoldState::Failed => "failed",
        }
    }
}

/// Hooks called as an invocation progresses.
///
/// All methods default to no-ops. Observers run on the thread doing the
/// work; `on_rendered` may be called from several threads at once.
pub trait Observer: Send + Sync {
    /// Called on every state transition.
    fn on_transition(&self, _from: ScaffoldState, _to: ScaffoldState) {}

    /// Called after a template has been rendered.
    fn on_rendered(&self, _template: &Path) {}

    /// Called after an output file has been handled.
    fn on_written(&self, _path: &Path, _outcome: WriteOutcome) {}
}

/// Paths touched by a successful invocation, relative to the output root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldReport {
    /// Files that did not exist before.
    pub created: Vec<PathBuf>,
    /// Existing files that were replaced.
    pub overwritten: Vec<PathBuf>,
    /// Existing files left untouched.
    pub skipped: Vec<PathBuf>,
    /// Directories that did not exist before.
    pub directories: Vec<PathBuf>,
}

impl ScaffoldReport {
    /// Number of files whose content was written.
    pub fn written(&self) -> usize {
        self.created.len() + self.overwritten.len()
    }
}

/// Options for a scaffold invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScaffoldOptions {
    /// What to do with output paths that already exist.
    on_conflict: ConflictPolicy,
    /// Render templates on the rayon thread pool.
    parallel: bool,
}

impl Default for ScaffoldOptions {
    fn default() -> Self {
        Self {
            on_conflict: ConflictPolicy::default(),
            parallel: true,
        }
    }
}

/// The scaffold engine.
///
/// # Example
///
/// ```ignore
/// let vars = Variables::new()
///     .with("project_name", "My Cool App")
///     .with("organization", "com.example");
///
/// let report = Scaffold::new()
///     .on_conflict(ConflictPolicy::SkipExisting)
///     .generate(Path::new("bricks/app/__brick__"), Path::new("out"), &vars)?;
/// println!("{} files written", report.written());
/// ```
pub struct Scaffold {
    transforms: TransformTable,
    options: ScaffoldOptions,
    cancel: CancelToken,
    observers: Vec<Box<dyn Observer>>,
}

impl Scaffold {
    /// Create an engine with the built-in transforms and default options.
    pub fn new() -> Self {
        Self {
            transforms: TransformTable::builtin(),
            options: ScaffoldOptions::default(),
            cancel: CancelToken::new(),
            observers: Vec::new(),
        }
    }

    /// Use a different transform table.
    pub fn transforms(mut self, transforms: TransformTable) -> Self {
        self.transforms = transforms;
        self
    }

    pub fn on_conflict(mut self, policy: ConflictPolicy) -> Self {
        self.options.on_conflict = policy;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.options.parallel = parallel;
        self
    }

    /// Observe cancellation requests through `token`.
    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Add an observer.
    pub fn observer(mut self, observer: impl Observer + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Run the render phase only.
    ///
    /// Walks `template_root`, renders every path and text file, and returns
    /// the resulting tree. Nothing is written.
    pub fn plan(
        &self,
        template_root: &Path,
        variables: &Variables,
    ) -> Result<OutputTree, ScaffoldError> {
        let mut state = Tracker::new(&self.observers);
        let result = self.collect(template_root, variables);
        match &result {
            Ok(_) => state.advance(ScaffoldState::Validated),
            Err(_) => state.advance(ScaffoldState::Failed),
        }
        result
    }

    /// Render `template_root` and write the result under `output_root`.
    ///
    /// Either the whole tree is written or, on failure, everything this call
    /// wrote is rolled back.
    pub fn generate(
        &self,
        template_root: &Path,
        output_root: &Path,
        variables: &Variables,
    ) -> Result<ScaffoldReport, ScaffoldError> {
        let mut state = Tracker::new(&self.observers);

        let tree = match self.collect(template_root, variables) {
            Ok(tree) => tree,
            Err(e) => {
                state.advance(ScaffoldState::Failed);
                return Err(e);
            }
        };
        state.advance(ScaffoldState::Validated);

        state.advance(ScaffoldState::Writing);
        match self.write(&tree, output_root) {
            Ok(report) => {
                state.advance(ScaffoldState::Complete);
                info!(
                    created = report.created.len(),
                    overwritten = report.overwritten.len(),
                    skipped = report.skipped.len(),
                    output = %output_root.display(),
                    "scaffold complete"
                );
                Ok(report)
            }
            Err(e) => {
                state.advance(ScaffoldState::Failed);
                Err(e)
            }
        }
    }

    /// Write an already rendered tree under `output_root`.
    ///
    /// Under [`ConflictPolicy::Fail`] every target is checked before the
    /// first write, so a conflict aborts with nothing written.
    pub fn write(
        &self,
        tree: &OutputTree,
        output_root: &Path,
    ) -> Result<ScaffoldReport, ScaffoldError> {
        if self.options.on_conflict == ConflictPolicy::Fail {
            let conflicts = tree.conflicts(output_root);
            if !conflicts.is_empty() {
                return Err(ScaffoldError::Conflict {
                    root: output_root.to_path_buf(),
                    paths: conflicts,
                });
            }
        }

        let mut tx = WriteTransaction::new(output_root);
        let mut report = ScaffoldReport::default();

        match self.write_entries(tree, output_root, &mut tx, &mut report) {
            Ok(()) => {
                report.directories = tx
                    .created_dirs()
                    .iter()
                    .filter_map(|dir| dir.strip_prefix(output_root).ok())
                    .filter(|dir| !dir.as_os_str().is_empty())
                    .map(Path::to_path_buf)
                    .collect();
                tx.commit();
                Ok(report)
            }
            Err(e) => {
                warn!(error = %e, "write phase failed, rolling back");
                let leftovers = tx.rollback();
                Err(e.with_leftovers(leftovers))
            }
        }
    }

    fn collect(
        &self,
        template_root: &Path,
        variables: &Variables,
    ) -> Result<OutputTree, ScaffoldError> {
        info!(
            template = %template_root.display(),
            variables = variables.len(),
            "rendering templates"
        );

        let entries = walk(template_root)?.collect::<Result<Vec<_>, _>>()?;
        let ctx = RenderContext::new(variables, &self.transforms);

        // Collected in walk order: the error returned is the first failing
        // template.
        let rendered: Vec<Result<OutputEntry, ScaffoldError>> = if self.options.parallel {
            entries
                .into_par_iter()
                .map(|entry| self.render_entry(entry, &ctx))
                .collect()
        } else {
            entries
                .into_iter()
                .map(|entry| self.render_entry(entry, &ctx))
                .collect()
        };

        let mut tree = OutputTree::new();
        for entry in rendered {
            tree.insert(entry?)?;
        }
        Ok(tree)
    }

    fn render_entry(
        &self,
        entry: TemplateEntry,
        ctx: &RenderContext<'_>,
    ) -> Result<OutputEntry, ScaffoldError> {
        if self.cancel.is_cancelled() {
            return Err(ScaffoldError::Cancelled {
                phase: ScaffoldState::Collecting,
                leftovers: Vec::new(),
            });
        }

        let rendered = match entry {
            TemplateEntry::Dir(template) => OutputEntry::Dir {
                path: render_path(&template, ctx)?,
                template,
            },
            TemplateEntry::File(file) => {
                let path = render_path(&file.path, ctx)?;
                let content = match file.content {
                    Content::Text(text) => {
                        Content::Text(render_named(&display_name(&file.path), &text, ctx)?)
                    }
                    binary @ Content::Binary(_) => binary,
                };
                debug!(
                    template = %file.path.display(),
                    output = %path.display(),
                    "rendered"
                );
                OutputEntry::File(OutputFile {
                    path,
                    template: file.path,
                    content,
                })
            }
        };

        for observer in &self.observers {
            observer.on_rendered(match &rendered {
                OutputEntry::Dir { template, .. } => template,
                OutputEntry::File(file) => &file.template,
            });
        }
        Ok(rendered)
    }

    fn write_entries(
        &self,
        tree: &OutputTree,
        output_root: &Path,
        tx: &mut WriteTransaction,
        report: &mut ScaffoldReport,
    ) -> Result<(), ScaffoldError> {
        let policy = self.options.on_conflict;
        let write_error = |path: &Path, source| ScaffoldError::Write {
            path: path.to_path_buf(),
            source,
            leftovers: Vec::new(),
        };

        tx.create_dir_all(output_root)
            .map_err(|e| write_error(output_root, e))?;

        for entry in tree.entries() {
            if self.cancel.is_cancelled() {
                return Err(ScaffoldError::Cancelled {
                    phase: ScaffoldState::Writing,
                    leftovers: Vec::new(),
                });
            }

            match entry {
                OutputEntry::Dir { path, .. } => {
                    let target = output_root.join(path);
                    tx.create_dir_all(&target)
                        .map_err(|e| write_error(&target, e))?;
                }
                OutputEntry::File(file) => {
                    let target = output_root.join(&file.path);
                    let outcome = tx
                        .write_file(&target, file.content.as_bytes(), policy)
                        .map_err(|e| write_error(&target, e))?;
                    debug!(path = %file.path.display(), ?outcome, "wrote");

                    match outcome {
                        WriteOutcome::Created => report.created.push(file.path.clone()),
                        WriteOutcome::Overwritten => report.overwritten.push(file.path.clone()),
                        WriteOutcome::Skipped => report.skipped.push(file.path.clone()),
                    }
                    for observer in &self.observers {
                        observer.on_written(&file.path, outcome);
                    }
                }
            }
        }

        Ok(())
    }
}

impl Default for Scaffold {
    fn default() -> Self {
        Self::new()
    }
}

/// Render `template_root` into `output_root` with default options.
pub fn generate(
    template_root: &Path,
    output_root: &Path,
    variables: &Variables,
) -> Result<ScaffoldReport, ScaffoldError> {
    Scaffold::new().generate(template_root, output_root, variables)
}

/// Current state of one invocation, reporting transitions to observers.
struct Tracker<'a> {
    state: ScaffoldState,
    observers: &'a [Box<dyn Observer>],
}

impl<'a> Tracker<'a> {
    fn new(observers: &'a [Box<dyn Observer>]) -> Self {
        Self {
            state: ScaffoldState::Collecting,
            observers,
        }
    }

    fn advance(&mut self, next: ScaffoldState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid transition {:?} -> {:?}",
            self.state,
            next
        );
        debug!(from = self.state.as_str(), to = next.as_str(), "state");
        for observer in self.observers {
            observer.on_transition(self.state, next);
        }
        self.state = next;
    }
}
