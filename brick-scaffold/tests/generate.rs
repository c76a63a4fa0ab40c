//! End-to-end tests for scaffold generation.
//!
//! The `flutter_app` fixture is a small Flutter brick whose paths and
//! contents use the token syntax. Run `cargo insta review` to update
//! snapshots when making intentional changes.

use std::{
    fs,
    path::{Path, PathBuf},
};

use brickyard_core::Variables;
use brickyard_scaffold::{ConflictPolicy, Scaffold, ScaffoldError};
use tempfile::TempDir;
use walkdir::WalkDir;

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/flutter_app/__brick__")
}

fn vars() -> Variables {
    Variables::new()
        .with("project_name", "My Cool App")
        .with("organization", "com.example")
}

fn template_tree(files: &[(&str, &str)]) -> TempDir {
    let temp = TempDir::new().unwrap();
    for (path, content) in files {
        let path = temp.path().join(path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
    temp
}

/// Every file under `root` as a `/`-separated relative path, sorted.
fn files_under(root: &Path) -> Vec<String> {
    if !root.exists() {
        return Vec::new();
    }
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .map(Result::unwrap)
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            e.path()
                .strip_prefix(root)
                .unwrap()
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/")
        })
        .collect()
}

#[test]
fn test_flutter_app_tree() {
    let out = TempDir::new().unwrap();

    let report = Scaffold::new()
        .generate(&fixture(), out.path(), &vars())
        .unwrap();

    assert_eq!(
        files_under(out.path()),
        [
            "my_cool_app/android/app/build.gradle.kts",
            "my_cool_app/android/app/src/main/kotlin/com/example/my_cool_app/MainActivity.kt",
            "my_cool_app/assets/icon.png",
            "my_cool_app/lib/main.dart",
            "my_cool_app/pubspec.yaml",
        ]
    );
    assert_eq!(report.created.len(), 5);
    assert!(report.overwritten.is_empty());
    assert!(report.skipped.is_empty());
    assert!(report.directories.contains(&PathBuf::from("my_cool_app")));
}

#[test]
fn test_build_gradle_snapshot() {
    let out = TempDir::new().unwrap();
    Scaffold::new()
        .generate(&fixture(), out.path(), &vars())
        .unwrap();

    let gradle =
        fs::read_to_string(out.path().join("my_cool_app/android/app/build.gradle.kts")).unwrap();
    insta::assert_snapshot!("build_gradle_kts", gradle);
}

#[test]
fn test_rendered_sources() {
    let out = TempDir::new().unwrap();
    Scaffold::new()
        .generate(&fixture(), out.path(), &vars())
        .unwrap();
    let app = out.path().join("my_cool_app");

    let pubspec = fs::read_to_string(app.join("pubspec.yaml")).unwrap();
    assert!(pubspec.starts_with("name: my_cool_app\ndescription: My cool app\n"));

    let main = fs::read_to_string(app.join("lib/main.dart")).unwrap();
    assert!(main.contains("runApp(const MyCoolAppApp())"));
    assert!(main.contains("title: 'My Cool App'"));

    let activity = fs::read_to_string(
        app.join("android/app/src/main/kotlin/com/example/my_cool_app/MainActivity.kt"),
    )
    .unwrap();
    assert!(activity.starts_with("package com.example.my_cool_app\n"));
}

#[test]
fn test_binary_files_are_copied_verbatim() {
    let out = TempDir::new().unwrap();
    Scaffold::new()
        .generate(&fixture(), out.path(), &vars())
        .unwrap();

    let icon = fixture().join("{{project_name.snakeCase()}}/assets/icon.png");
    let original = fs::read(icon).unwrap();
    let copied = fs::read(out.path().join("my_cool_app/assets/icon.png")).unwrap();
    assert_eq!(original, copied);
}

#[test]
fn test_one_render_error_writes_nothing() {
    let mut files: Vec<(String, String)> = (0..9)
        .map(|i| (format!("src/file{i}.txt"), "{{project_name}}".to_string()))
        .collect();
    files.push(("src/file9.txt".to_string(), "{{missing_key}}".to_string()));
    let refs: Vec<(&str, &str)> = files.iter().map(|(p, c)| (p.as_str(), c.as_str())).collect();
    let templates = template_tree(&refs);
    let out = TempDir::new().unwrap();
    let target = out.path().join("project");

    let err = Scaffold::new()
        .generate(templates.path(), &target, &vars())
        .unwrap_err();

    assert!(err.is_render_phase());
    assert!(!target.exists());
}

#[test]
fn test_undefined_variable_in_path_writes_nothing() {
    let templates = template_tree(&[("a.txt", "a"), ("{{nope}}/b.txt", "b")]);
    let out = TempDir::new().unwrap();

    let err = Scaffold::new()
        .generate(templates.path(), out.path(), &vars())
        .unwrap_err();

    assert!(matches!(err, ScaffoldError::Render(_)));
    assert!(files_under(out.path()).is_empty());
}

#[test]
fn test_write_failure_rolls_back() {
    // `blocker` is a file in the output root, so creating the `blocker`
    // directory fails after `a.txt` and `b.txt` have been written.
    let templates = template_tree(&[("a.txt", "a"), ("b.txt", "b"), ("blocker/c.txt", "c")]);
    let out = TempDir::new().unwrap();
    fs::write(out.path().join("blocker"), "keep me").unwrap();

    let err = Scaffold::new()
        .on_conflict(ConflictPolicy::Overwrite)
        .generate(templates.path(), out.path(), &vars())
        .unwrap_err();

    match &err {
        ScaffoldError::Write { path, leftovers, .. } => {
            assert_eq!(path, &out.path().join("blocker"));
            assert!(leftovers.is_empty());
        }
        other => panic!("expected Write error, got {other:?}"),
    }
    assert_eq!(files_under(out.path()), ["blocker"]);
    assert_eq!(fs::read_to_string(out.path().join("blocker")).unwrap(), "keep me");
}

#[test]
fn test_write_failure_restores_overwritten_files() {
    let templates = template_tree(&[("a.txt", "new a"), ("b.txt", "b"), ("blocker/c.txt", "c")]);
    let out = TempDir::new().unwrap();
    fs::write(out.path().join("a.txt"), "old a").unwrap();
    fs::write(out.path().join("blocker"), "x").unwrap();

    Scaffold::new()
        .on_conflict(ConflictPolicy::Overwrite)
        .generate(templates.path(), out.path(), &vars())
        .unwrap_err();

    assert_eq!(fs::read_to_string(out.path().join("a.txt")).unwrap(), "old a");
    assert!(!out.path().join("b.txt").exists());
}

#[test]
fn test_overwrite_is_idempotent() {
    let out = TempDir::new().unwrap();
    let scaffold = Scaffold::new().on_conflict(ConflictPolicy::Overwrite);

    let first = scaffold.generate(&fixture(), out.path(), &vars()).unwrap();
    let snapshot: Vec<(String, Vec<u8>)> = files_under(out.path())
        .into_iter()
        .map(|p| {
            let bytes = fs::read(out.path().join(&p)).unwrap();
            (p, bytes)
        })
        .collect();

    let second = scaffold.generate(&fixture(), out.path(), &vars()).unwrap();
    let again: Vec<(String, Vec<u8>)> = files_under(out.path())
        .into_iter()
        .map(|p| {
            let bytes = fs::read(out.path().join(&p)).unwrap();
            (p, bytes)
        })
        .collect();

    assert_eq!(snapshot, again);
    assert_eq!(first.created, second.overwritten);
    assert!(second.created.is_empty());
    assert!(second.directories.is_empty());
}

#[test]
fn test_fail_policy_aborts_before_writing() {
    let out = TempDir::new().unwrap();
    let pubspec = out.path().join("my_cool_app/pubspec.yaml");
    fs::create_dir_all(pubspec.parent().unwrap()).unwrap();
    fs::write(&pubspec, "mine").unwrap();

    let err = Scaffold::new()
        .generate(&fixture(), out.path(), &vars())
        .unwrap_err();

    match &err {
        ScaffoldError::Conflict { paths, .. } => {
            assert_eq!(paths, &[Path::new("my_cool_app").join("pubspec.yaml")]);
        }
        other => panic!("expected Conflict, got {other:?}"),
    }
    assert_eq!(files_under(out.path()), ["my_cool_app/pubspec.yaml"]);
    assert_eq!(fs::read_to_string(&pubspec).unwrap(), "mine");
}

#[test]
fn test_skip_existing_keeps_user_files() {
    let out = TempDir::new().unwrap();
    let pubspec = out.path().join("my_cool_app/pubspec.yaml");
    fs::create_dir_all(pubspec.parent().unwrap()).unwrap();
    fs::write(&pubspec, "mine").unwrap();

    let report = Scaffold::new()
        .on_conflict(ConflictPolicy::SkipExisting)
        .generate(&fixture(), out.path(), &vars())
        .unwrap();

    assert_eq!(report.skipped, [Path::new("my_cool_app").join("pubspec.yaml")]);
    assert_eq!(report.created.len(), 4);
    assert_eq!(fs::read_to_string(&pubspec).unwrap(), "mine");
}

#[cfg(unix)]
#[test]
fn test_overwrite_never_writes_through_symlinks() {
    use std::os::unix::fs::symlink;

    let templates = template_tree(&[("a.txt", "a"), ("config.txt", "generated")]);
    let elsewhere = TempDir::new().unwrap();
    let precious = elsewhere.path().join("precious.txt");
    fs::write(&precious, "user data").unwrap();
    let out = TempDir::new().unwrap();
    symlink(&precious, out.path().join("config.txt")).unwrap();

    let err = Scaffold::new()
        .on_conflict(ConflictPolicy::Overwrite)
        .generate(templates.path(), out.path(), &vars())
        .unwrap_err();

    match &err {
        ScaffoldError::Write { path, .. } => assert_eq!(path, &out.path().join("config.txt")),
        other => panic!("expected Write error, got {other:?}"),
    }
    assert_eq!(fs::read_to_string(&precious).unwrap(), "user data");
    assert!(!out.path().join("a.txt").exists());
    assert!(
        fs::symlink_metadata(out.path().join("config.txt"))
            .unwrap()
            .file_type()
            .is_symlink()
    );
}

#[cfg(unix)]
#[test]
fn test_symlinked_directory_is_not_followed() {
    use std::os::unix::fs::symlink;

    let templates = template_tree(&[("lib/main.dart", "void main() {}")]);
    let elsewhere = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    symlink(elsewhere.path(), out.path().join("lib")).unwrap();

    for policy in [ConflictPolicy::Overwrite, ConflictPolicy::SkipExisting] {
        let err = Scaffold::new()
            .on_conflict(policy)
            .generate(templates.path(), out.path(), &vars())
            .unwrap_err();

        assert!(matches!(err, ScaffoldError::Write { .. }), "{policy}: {err:?}");
        assert!(fs::read_dir(elsewhere.path()).unwrap().next().is_none());
    }
}

#[cfg(unix)]
#[test]
fn test_symlinked_output_root_is_allowed() {
    use std::os::unix::fs::symlink;

    let templates = template_tree(&[("lib/main.dart", "void main() {}")]);
    let real = TempDir::new().unwrap();
    let links = TempDir::new().unwrap();
    let root = links.path().join("project");
    symlink(real.path(), &root).unwrap();

    Scaffold::new()
        .generate(templates.path(), &root, &vars())
        .unwrap();

    assert_eq!(files_under(real.path()), ["lib/main.dart"]);
}
