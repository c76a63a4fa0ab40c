//! Filesystem writes with rollback.

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
    str::FromStr,
};

/// How to handle output paths that already exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ConflictPolicy {
    /// Replace existing files.
    Overwrite,
    /// Abort the invocation before writing anything.
    #[default]
    Fail,
    /// Leave existing files untouched and write the rest.
    SkipExisting,
}

impl ConflictPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictPolicy::Overwrite => "overwrite",
            ConflictPolicy::Fail => "fail",
            ConflictPolicy::SkipExisting => "skip",
        }
    }
}

impl fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConflictPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "overwrite" => Ok(ConflictPolicy::Overwrite),
            "fail" => Ok(ConflictPolicy::Fail),
            "skip" | "skip-existing" => Ok(ConflictPolicy::SkipExisting),
            _ => Err(format!(
                "invalid conflict policy '{}', expected 'overwrite', 'fail' or 'skip'",
                s
            )),
        }
    }
}

/// Result of a single file write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// A new file was created.
    Created,
    /// An existing file was replaced.
    Overwritten,
    /// The file already existed and was left alone.
    Skipped,
}

/// Tracks everything written during one invocation so it can be undone.
///
/// Created files are deleted, overwritten files get their original bytes
/// back, and created directories are removed deepest first. Paths that
/// existed before the transaction and were not overwritten are never
/// touched.
///
/// Writes are confined to `root`: a symbolic link below the root is never
/// followed, so nothing outside the root is created or modified. The root
/// itself may be a link.
#[derive(Debug)]
pub struct WriteTransaction {
    root: PathBuf,
    created_files: Vec<PathBuf>,
    overwritten: Vec<(PathBuf, Vec<u8>)>,
    created_dirs: Vec<PathBuf>,
}

impl WriteTransaction {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            created_files: Vec::new(),
            overwritten: Vec::new(),
            created_dirs: Vec::new(),
        }
    }

    /// Directories created so far, outermost first.
    pub fn created_dirs(&self) -> &[PathBuf] {
        &self.created_dirs
    }

    /// Create `path` and any missing ancestors, recording each one created.
    pub fn create_dir_all(&mut self, path: &Path) -> io::Result<()> {
        self.refuse_links(path)?;

        let mut missing = Vec::new();
        let mut current = Some(path);

        while let Some(dir) = current {
            if dir.as_os_str().is_empty() {
                break;
            }
            match fs::symlink_metadata(dir) {
                Ok(meta) if meta.is_dir() => break,
                // Only the root or one of its ancestors can be a link here.
                Ok(_) if fs::metadata(dir).is_ok_and(|m| m.is_dir()) => break,
                Ok(_) => {
                    return Err(io::Error::new(
                        io::ErrorKind::AlreadyExists,
                        format!("'{}' exists and is not a directory", dir.display()),
                    ));
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => missing.push(dir),
                Err(e) => return Err(e),
            }
            current = dir.parent();
        }

        for dir in missing.into_iter().rev() {
            fs::create_dir(dir)?;
            self.created_dirs.push(dir.to_path_buf());
        }
        Ok(())
    }

    /// Write `content` to `path` according to `policy`.
    ///
    /// The path is recorded before the write starts, so a file left
    /// half-written by a failed write is still rolled back.
    pub fn write_file(
        &mut self,
        path: &Path,
        content: &[u8],
        policy: ConflictPolicy,
    ) -> io::Result<WriteOutcome> {
        if let Some(parent) = path.parent() {
            self.refuse_links(parent)?;
        }

        let existing = match fs::symlink_metadata(path) {
            Ok(meta) => Some(meta),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => return Err(e),
        };

        match existing {
            Some(meta) if meta.is_dir() => Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("'{}' is a directory", path.display()),
            )),
            Some(meta) => match policy {
                ConflictPolicy::SkipExisting => Ok(WriteOutcome::Skipped),
                ConflictPolicy::Overwrite if meta.file_type().is_symlink() => {
                    Err(symlink_error(path))
                }
                ConflictPolicy::Fail => Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("'{}' already exists", path.display()),
                )),
                ConflictPolicy::Overwrite => {
                    let original = fs::read(path)?;
                    self.overwritten.push((path.to_path_buf(), original));
                    fs::write(path, content)?;
                    Ok(WriteOutcome::Overwritten)
                }
            },
            None => {
                if let Some(parent) = path.parent() {
                    self.create_dir_all(parent)?;
                }
                self.created_files.push(path.to_path_buf());
                fs::write(path, content)?;
                Ok(WriteOutcome::Created)
            }
        }
    }

    /// Fail if `path` or any of its ancestors below the root is a symbolic
    /// link.
    fn refuse_links(&self, path: &Path) -> io::Result<()> {
        for ancestor in path.ancestors() {
            if ancestor == self.root || !ancestor.starts_with(&self.root) {
                break;
            }
            match fs::symlink_metadata(ancestor) {
                Ok(meta) if meta.file_type().is_symlink() => return Err(symlink_error(ancestor)),
                Ok(_) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// Keep everything written so far.
    pub fn commit(self) {
        tracing::debug!(
            files = self.created_files.len(),
            overwritten = self.overwritten.len(),
            dirs = self.created_dirs.len(),
            "committed writes"
        );
    }

    /// Undo everything written so far.
    ///
    /// Returns the paths that could not be removed or restored. Rollback is
    /// best effort: without filesystem transactions another process may
    /// observe the partial tree before it is removed.
    pub fn rollback(self) -> Vec<PathBuf> {
        let mut leftovers = Vec::new();

        for path in self.created_files.iter().rev() {
            match fs::remove_file(path) {
                Ok(()) => tracing::debug!(path = %path.display(), "removed"),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "failed to remove file");
                    leftovers.push(path.clone());
                }
            }
        }

        for (path, original) in self.overwritten.iter().rev() {
            if let Err(e) = fs::write(path, original) {
                tracing::warn!(path = %path.display(), error = %e, "failed to restore file");
                leftovers.push(path.clone());
            }
        }

        for dir in self.created_dirs.iter().rev() {
            match fs::remove_dir(dir) {
                Ok(()) => tracing::debug!(path = %dir.display(), "removed directory"),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::warn!(path = %dir.display(), error = %e, "failed to remove directory");
                    leftovers.push(dir.clone());
                }
            }
        }

        leftovers
    }
}

fn symlink_error(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("'{}' is a symbolic link; refusing to write through it", path.display()),
    )
}
