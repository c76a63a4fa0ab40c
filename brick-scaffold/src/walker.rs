//! Template tree walking and path rendering.

use std::{
    fs,
    path::{Component, Path, PathBuf},
};

use brickyard_template::{RenderContext, render_named};
use walkdir::WalkDir;

use crate::ScaffoldError;

/// Raw content of a template file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// UTF-8 text, rendered before writing.
    Text(String),
    /// Anything else, copied verbatim.
    Binary(Vec<u8>),
}

impl Content {
    fn from_bytes(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(text) => Content::Text(text),
            Err(e) => Content::Binary(e.into_bytes()),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Content::Text(text) => text.as_bytes(),
            Content::Binary(bytes) => bytes,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => Some(text),
            Content::Binary(_) => None,
        }
    }
}

/// A template file: its path relative to the template root and its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    pub path: PathBuf,
    pub content: Content,
}

/// An entry yielded by [`walk`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateEntry {
    Dir(PathBuf),
    File(TemplateFile),
}

impl TemplateEntry {
    /// Path relative to the template root.
    pub fn path(&self) -> &Path {
        match self {
            TemplateEntry::Dir(path) => path,
            TemplateEntry::File(file) => &file.path,
        }
    }
}

/// Lazy, depth-first iterator over a template tree.
///
/// Entries at each level come in lexicographic file-name order, so walking
/// the same unchanged tree twice yields the same sequence. Symlinks are not
/// followed.
pub struct Walk {
    root: PathBuf,
    inner: walkdir::IntoIter,
}

/// Walk the template tree under `root`.
pub fn walk(root: &Path) -> Result<Walk, ScaffoldError> {
    if !root.is_dir() {
        return Err(ScaffoldError::TemplateRootMissing {
            path: root.to_path_buf(),
        });
    }

    let inner = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();

    Ok(Walk {
        root: root.to_path_buf(),
        inner,
    })
}

impl Iterator for Walk {
    type Item = Result<TemplateEntry, ScaffoldError>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = match self.inner.next()? {
            Ok(entry) => entry,
            Err(source) => {
                let path = source
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.root.clone());
                return Some(Err(ScaffoldError::Walk { path, source }));
            }
        };

        let relative = entry
            .path()
            .strip_prefix(&self.root)
            .unwrap_or(entry.path())
            .to_path_buf();

        if entry.file_type().is_dir() {
            return Some(Ok(TemplateEntry::Dir(relative)));
        }

        Some(
            fs::read(entry.path())
                .map(|bytes| {
                    TemplateEntry::File(TemplateFile {
                        path: relative,
                        content: Content::from_bytes(bytes),
                    })
                })
                .map_err(|source| ScaffoldError::Read {
                    path: entry.path().to_path_buf(),
                    source,
                }),
        )
    }
}

/// Template-relative path with `/` separators, used to name templates in
/// diagnostics.
pub fn display_name(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Render a template-relative path into an output-relative path.
///
/// The path is rendered as a `/`-joined string, so a component may render to
/// several components (e.g., `{{org.pathCase()}}` -> `com/example`). Every
/// resulting component must be a non-empty name other than `.` or `..`.
pub fn render_path(path: &Path, ctx: &RenderContext<'_>) -> Result<PathBuf, ScaffoldError> {
    let mut parts = Vec::new();
    for component in path.components() {
        let Component::Normal(part) = component else {
            return Err(invalid(path, display_name(path), "path must be relative"));
        };
        let Some(part) = part.to_str() else {
            return Err(invalid(path, display_name(path), "path is not valid UTF-8"));
        };
        parts.push(part);
    }

    let name = parts.join("/");
    let rendered = render_named(&name, &name, ctx)?;

    let mut out = PathBuf::new();
    for piece in rendered.split(['/', '\\']) {
        if piece.trim().is_empty() {
            return Err(invalid(path, rendered, "a path component renders to an empty name"));
        }
        if piece == "." || piece == ".." {
            return Err(invalid(path, rendered, "a path component renders to '.' or '..'"));
        }
        out.push(piece);
    }

    Ok(out)
}

fn invalid(template: &Path, rendered: String, reason: &'static str) -> ScaffoldError {
    ScaffoldError::InvalidOutputPath {
        template: template.to_path_buf(),
        rendered,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use brickyard_core::{TransformTable, Variables};
    use tempfile::TempDir;

    use super::*;

    fn tree(files: &[(&str, &str)]) -> TempDir {
        let temp = TempDir::new().unwrap();
        for (path, content) in files {
            let path = temp.path().join(path);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        temp
    }

    fn paths(root: &Path) -> Vec<String> {
        walk(root)
            .unwrap()
            .map(|e| display_name(e.unwrap().path()))
            .collect()
    }

    #[test]
    fn test_walk_is_sorted_and_depth_first() {
        let temp = tree(&[
            ("b.txt", "b"),
            ("a/z.txt", "z"),
            ("a/c/d.txt", "d"),
            ("README", "r"),
        ]);

        assert_eq!(
            paths(temp.path()),
            ["README", "a", "a/c", "a/c/d.txt", "a/z.txt", "b.txt"]
        );
    }

    #[test]
    fn test_walk_is_restartable() {
        let temp = tree(&[("x/1", "1"), ("x/2", "2"), ("y", "3")]);
        assert_eq!(paths(temp.path()), paths(temp.path()));
    }

    #[test]
    fn test_walk_reads_text_and_binary() {
        let temp = tree(&[("text.txt", "hello {{name}}")]);
        fs::write(temp.path().join("icon.png"), [0x89, 0x50, 0xff, 0x00]).unwrap();

        let entries: Vec<_> = walk(temp.path()).unwrap().map(Result::unwrap).collect();
        let TemplateEntry::File(icon) = &entries[0] else {
            panic!("expected file");
        };
        assert_eq!(icon.content, Content::Binary(vec![0x89, 0x50, 0xff, 0x00]));
        let TemplateEntry::File(text) = &entries[1] else {
            panic!("expected file");
        };
        assert_eq!(text.content.as_text(), Some("hello {{name}}"));
    }

    #[test]
    fn test_walk_missing_root() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        assert!(matches!(
            walk(&missing),
            Err(ScaffoldError::TemplateRootMissing { .. })
        ));
    }

    fn render(path: &str, vars: &Variables) -> Result<PathBuf, ScaffoldError> {
        let table = TransformTable::builtin();
        render_path(Path::new(path), &RenderContext::new(vars, &table))
    }

    #[test]
    fn test_render_path_components() {
        let vars = Variables::new()
            .with("project_name", "My Cool App")
            .with("organization", "com.example");

        assert_eq!(
            render("{{project_name.snakeCase()}}/android/app", &vars).unwrap(),
            Path::new("my_cool_app").join("android").join("app")
        );
        assert_eq!(
            render("kotlin/{{organization.pathCase()}}/Main.kt", &vars).unwrap(),
            Path::new("kotlin").join("com").join("example").join("Main.kt")
        );
    }

    #[test]
    fn test_render_path_rejects_empty_component() {
        let vars = Variables::new().with("empty", "").with("blank", "  ");

        for template in ["{{empty}}/file.txt", "dir/{{blank}}", "{{empty}}"] {
            assert!(
                matches!(
                    render(template, &vars),
                    Err(ScaffoldError::InvalidOutputPath { .. })
                ),
                "template: {template}"
            );
        }
    }

    #[test]
    fn test_render_path_rejects_dot_components() {
        let vars = Variables::new().with("up", "..");
        assert!(matches!(
            render("{{up}}/escape.txt", &vars),
            Err(ScaffoldError::InvalidOutputPath { .. })
        ));
    }

    #[test]
    fn test_render_path_propagates_render_errors() {
        let vars = Variables::new();
        let err = render("{{missing}}/a.txt", &vars).unwrap_err();
        assert!(matches!(err, ScaffoldError::Render(_)));
        assert!(err.is_render_phase());
    }
}
