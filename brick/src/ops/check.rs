//! Check operation: validate a brick without writing anything.

use brickyard_core::{TransformTable, Variables};
use brickyard_manifest::Brick;
use brickyard_scaffold::{Scaffold, ScaffoldError};

use super::analyze::analyze;
use crate::reports::{CheckReport, RenderCheck};

/// Variables available to the check.
pub enum CheckVariables<'a> {
    /// Every declared variable has a value.
    Resolved(&'a Variables),
    /// These declared variables have no value.
    Missing(Vec<String>),
}

/// Execute the check operation.
///
/// Parses every template, then runs the render phase when every referenced
/// variable has a value.
pub fn check(brick: &Brick, variables: CheckVariables<'_>) -> Result<CheckReport, ScaffoldError> {
    let analysis = analyze(brick.template_root())?;
    let table = TransformTable::builtin();

    let mut errors = analysis.problems.clone();
    let mut warnings = Vec::new();

    for name in analysis.transforms.iter().filter(|n| !table.contains(n)) {
        errors.push(format!(
            "unknown transform '{}' (available: {})",
            name,
            table.names().collect::<Vec<_>>().join(", ")
        ));
    }

    if let Some(manifest) = brick.manifest() {
        for name in analysis.variables.iter().filter(|n| !manifest.declares(n)) {
            warnings.push(format!(
                "variable '{}' is used by templates but not declared in brick.toml",
                name
            ));
        }
        for name in manifest.vars.keys().filter(|n| !analysis.variables.contains(*n)) {
            warnings.push(format!("variable '{}' is declared but never used", name));
        }
    }

    let render = if !errors.is_empty() {
        RenderCheck::Skipped {
            reason: "templates have errors".to_string(),
        }
    } else {
        match variables {
            CheckVariables::Missing(names) => skipped(&names),
            CheckVariables::Resolved(vars) => {
                let missing: Vec<String> = analysis
                    .variables
                    .iter()
                    .filter(|name| !vars.contains(name))
                    .cloned()
                    .collect();
                if missing.is_empty() {
                    let tree = Scaffold::new().plan(brick.template_root(), vars)?;
                    RenderCheck::Rendered {
                        outputs: tree.files().map(|f| f.path.clone()).collect(),
                    }
                } else {
                    skipped(&missing)
                }
            }
        }
    };

    Ok(CheckReport {
        brick: brick.name(),
        template_root: brick.template_root().to_path_buf(),
        templates: analysis.files,
        errors,
        warnings,
        render,
    })
}

fn skipped(missing: &[String]) -> RenderCheck {
    RenderCheck::Skipped {
        reason: format!(
            "no value for {}; pass `--var name=value` or `--vars-file`",
            missing.join(", ")
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf};

    use tempfile::TempDir;

    use super::*;

    fn brick(manifest: &str, files: &[(&str, &str)]) -> (TempDir, Brick) {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("brick.toml"), manifest).unwrap();
        for (path, content) in files {
            let path = temp.path().join("__brick__").join(path);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        let brick = Brick::open(temp.path()).unwrap();
        (temp, brick)
    }

    #[test]
    fn test_check_renders_outputs() {
        let (_dir, brick) = brick(
            "[brick]\nname = \"app\"\n[vars.name]\ndefault = \"demo\"\n",
            &[("{{name}}/a.txt", "{{name.upperCase()}}")],
        );
        let vars = Variables::new().with("name", "demo");

        let report = check(&brick, CheckVariables::Resolved(&vars)).unwrap();

        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
        match report.render {
            RenderCheck::Rendered { outputs } => {
                assert_eq!(outputs, [PathBuf::from("demo/a.txt")]);
            }
            other => panic!("expected rendered outputs, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_transform_is_an_error() {
        let (_dir, brick) = brick(
            "[brick]\nname = \"app\"\n[vars.name]\n",
            &[("a.txt", "{{name.screamingSnake()}}")],
        );
        let vars = Variables::new().with("name", "demo");

        let report = check(&brick, CheckVariables::Resolved(&vars)).unwrap();

        assert!(!report.is_valid());
        assert!(report.errors[0].starts_with("unknown transform 'screamingSnake'"));
        assert!(matches!(report.render, RenderCheck::Skipped { .. }));
    }

    #[test]
    fn test_malformed_template_is_located() {
        let (_dir, brick) = brick(
            "[brick]\nname = \"app\"\n[vars.name]\n",
            &[("a.txt", "ok {{name}}\n{{name.snakeCase}}\n")],
        );
        let vars = Variables::new().with("name", "demo");

        let report = check(&brick, CheckVariables::Resolved(&vars)).unwrap();

        assert!(!report.is_valid());
        assert!(report.errors[0].starts_with("a.txt:2:1: malformed token"), "{:?}", report.errors);
        assert!(matches!(report.render, RenderCheck::Skipped { .. }));
    }

    #[test]
    fn test_declaration_warnings() {
        let (_dir, brick) = brick(
            "[brick]\nname = \"app\"\n[vars.unused]\n",
            &[("a.txt", "{{organization}}")],
        );

        let report = check(&brick, CheckVariables::Missing(vec!["unused".into()])).unwrap();

        assert!(report.is_valid());
        assert_eq!(
            report.warnings,
            [
                "variable 'organization' is used by templates but not declared in brick.toml",
                "variable 'unused' is declared but never used",
            ]
        );
        match report.render {
            RenderCheck::Skipped { reason } => assert!(reason.starts_with("no value for unused")),
            other => panic!("expected skipped render, got {other:?}"),
        }
    }
}
