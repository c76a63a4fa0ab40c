//! Locating a brick on disk.

use std::path::{Path, PathBuf};

use crate::{Error, Manifest, Result};

/// Manifest file name.
pub const MANIFEST_FILE: &str = "brick.toml";
/// Template directory name, next to the manifest.
pub const TEMPLATE_DIR: &str = "__brick__";

/// A template tree, optionally described by a `brick.toml`.
#[derive(Debug, Clone)]
pub struct Brick {
    root: PathBuf,
    template_root: PathBuf,
    manifest: Option<Manifest>,
}

impl Brick {
    /// Open the brick in `path`.
    ///
    /// `path` is either the brick directory or its `brick.toml`. The
    /// directory must contain both the manifest and a `__brick__` directory.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let root = if path.file_name().is_some_and(|n| n == MANIFEST_FILE) && path.is_file() {
            path.parent().unwrap_or(Path::new(".")).to_path_buf()
        } else {
            path.to_path_buf()
        };

        let manifest_path = root.join(MANIFEST_FILE);
        if !manifest_path.is_file() {
            return Err(Box::new(Error::ManifestNotFound { path: root }));
        }
        let manifest = Manifest::from_file(&manifest_path)?;

        let template_root = root.join(TEMPLATE_DIR);
        if !template_root.is_dir() {
            return Err(Box::new(Error::MissingTemplateDir { path: root }));
        }

        tracing::debug!(
            brick = %manifest.brick.name,
            path = %root.display(),
            "opened brick"
        );
        Ok(Self {
            root,
            template_root,
            manifest: Some(manifest),
        })
    }

    /// Use `dir` itself as the template root, without a manifest.
    pub fn from_template_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(Box::new(Error::MissingTemplateDir {
                path: dir.to_path_buf(),
            }));
        }
        Ok(Self {
            root: dir.to_path_buf(),
            template_root: dir.to_path_buf(),
            manifest: None,
        })
    }

    /// The brick directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory walked by the scaffold engine.
    pub fn template_root(&self) -> &Path {
        &self.template_root
    }

    pub fn manifest(&self) -> Option<&Manifest> {
        self.manifest.as_ref()
    }

    /// Manifest name, or the directory name for a bare template directory.
    pub fn name(&self) -> String {
        match &self.manifest {
            Some(manifest) => manifest.brick.name.clone(),
            None => self
                .root
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| self.root.display().to_string()),
        }
    }
}
