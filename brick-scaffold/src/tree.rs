//! In-memory output tree built by the render phase.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::{ScaffoldError, walker::Content};

/// A rendered file waiting to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    /// Path relative to the output root.
    pub path: PathBuf,
    /// The template it was rendered from.
    pub template: PathBuf,
    pub content: Content,
}

/// One rendered entry, in walk order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputEntry {
    Dir { path: PathBuf, template: PathBuf },
    File(OutputFile),
}

impl OutputEntry {
    /// Path relative to the output root.
    pub fn path(&self) -> &Path {
        match self {
            OutputEntry::Dir { path, .. } => path,
            OutputEntry::File(file) => &file.path,
        }
    }

    fn template(&self) -> &Path {
        match self {
            OutputEntry::Dir { template, .. } => template,
            OutputEntry::File(file) => &file.template,
        }
    }

    fn is_dir(&self) -> bool {
        matches!(self, OutputEntry::Dir { .. })
    }
}

/// Every rendered `(path, content)` pair of a pass.
///
/// Nothing touches the filesystem until the whole tree has been built.
/// Output paths are unique: two templates rendering to the same file path
/// (or to a file and a directory at the same path) are rejected. Two
/// directories rendering to the same path merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputTree {
    entries: IndexMap<PathBuf, OutputEntry>,
}

impl OutputTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rendered entry.
    pub fn insert(&mut self, entry: OutputEntry) -> Result<(), ScaffoldError> {
        if let Some(existing) = self.entries.get(entry.path()) {
            if existing.is_dir() && entry.is_dir() {
                return Ok(());
            }
            return Err(ScaffoldError::DuplicateOutput {
                path: entry.path().to_path_buf(),
                first: existing.template().to_path_buf(),
                second: entry.template().to_path_buf(),
            });
        }

        self.entries.insert(entry.path().to_path_buf(), entry);
        Ok(())
    }

    /// Entries in walk order.
    pub fn entries(&self) -> impl Iterator<Item = &OutputEntry> {
        self.entries.values()
    }

    pub fn files(&self) -> impl Iterator<Item = &OutputFile> {
        self.entries.values().filter_map(|e| match e {
            OutputEntry::File(file) => Some(file),
            OutputEntry::Dir { .. } => None,
        })
    }

    pub fn dirs(&self) -> impl Iterator<Item = &Path> {
        self.entries
            .values()
            .filter(|e| e.is_dir())
            .map(OutputEntry::path)
    }

    pub fn get(&self, path: &Path) -> Option<&OutputEntry> {
        self.entries.get(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Paths under `root` that already exist and would be replaced.
    ///
    /// An existing file target conflicts; an existing directory target only
    /// conflicts when something other than a directory is in its place.
    pub fn conflicts(&self, root: &Path) -> Vec<PathBuf> {
        self.entries
            .values()
            .filter(|entry| {
                let target = root.join(entry.path());
                match std::fs::symlink_metadata(&target) {
                    Ok(meta) => !(entry.is_dir() && meta.is_dir()),
                    Err(_) => false,
                }
            })
            .map(|entry| entry.path().to_path_buf())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn file(path: &str, template: &str) -> OutputEntry {
        OutputEntry::File(OutputFile {
            path: PathBuf::from(path),
            template: PathBuf::from(template),
            content: Content::Text(String::new()),
        })
    }

    fn dir(path: &str, template: &str) -> OutputEntry {
        OutputEntry::Dir {
            path: PathBuf::from(path),
            template: PathBuf::from(template),
        }
    }

    #[test]
    fn test_insert_keeps_walk_order() {
        let mut tree = OutputTree::new();
        tree.insert(dir("app", "{{name}}")).unwrap();
        tree.insert(file("app/main.dart", "{{name}}/main.dart")).unwrap();
        tree.insert(file("README.md", "README.md")).unwrap();

        let paths: Vec<_> = tree.entries().map(|e| e.path().to_path_buf()).collect();
        assert_eq!(
            paths,
            [
                PathBuf::from("app"),
                PathBuf::from("app/main.dart"),
                PathBuf::from("README.md")
            ]
        );
        assert_eq!(tree.files().count(), 2);
        assert_eq!(tree.dirs().collect::<Vec<_>>(), [Path::new("app")]);
    }

    #[test]
    fn test_duplicate_file_is_rejected() {
        let mut tree = OutputTree::new();
        tree.insert(file("out.txt", "{{a}}.txt")).unwrap();
        let err = tree.insert(file("out.txt", "{{b}}.txt")).unwrap_err();

        match err {
            ScaffoldError::DuplicateOutput { first, second, .. } => {
                assert_eq!(first, PathBuf::from("{{a}}.txt"));
                assert_eq!(second, PathBuf::from("{{b}}.txt"));
            }
            other => panic!("expected DuplicateOutput, got {other:?}"),
        }
    }

    #[test]
    fn test_file_and_dir_collision_is_rejected() {
        let mut tree = OutputTree::new();
        tree.insert(dir("x", "{{a}}")).unwrap();
        assert!(tree.insert(file("x", "{{b}}")).is_err());
    }

    #[test]
    fn test_duplicate_dirs_merge() {
        let mut tree = OutputTree::new();
        tree.insert(dir("x", "{{a}}")).unwrap();
        tree.insert(dir("x", "{{b}}")).unwrap();
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_conflicts() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("existing_dir")).unwrap();
        std::fs::write(temp.path().join("existing.txt"), "x").unwrap();
        std::fs::write(temp.path().join("file_not_dir"), "x").unwrap();

        let mut tree = OutputTree::new();
        tree.insert(dir("existing_dir", "d")).unwrap();
        tree.insert(file("existing.txt", "e")).unwrap();
        tree.insert(dir("file_not_dir", "f")).unwrap();
        tree.insert(file("new.txt", "n")).unwrap();

        assert_eq!(
            tree.conflicts(temp.path()),
            [PathBuf::from("existing.txt"), PathBuf::from("file_not_dir")]
        );
    }
}
