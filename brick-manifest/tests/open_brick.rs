use std::path::{Path, PathBuf};

use brickyard_core::Variables;
use brickyard_manifest::{Brick, Error, NoPrompt, VariableSources, Version, resolve_variables};

fn flutter_app() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../brick-scaffold/tests/fixtures/flutter_app")
}

#[test]
fn test_open_fixture_brick() {
    let brick = Brick::open(flutter_app()).unwrap();
    let manifest = brick.manifest().unwrap();

    assert_eq!(brick.name(), "flutter_app");
    assert_eq!(manifest.brick.version, Version::new(0, 1, 0));
    assert_eq!(
        manifest.vars.keys().collect::<Vec<_>>(),
        ["project_name", "organization"]
    );
    assert!(brick.template_root().ends_with("__brick__"));
}

#[test]
fn test_resolve_fixture_variables() {
    let brick = Brick::open(flutter_app()).unwrap();
    let sources = VariableSources {
        cli: Variables::new().with("organization", "com.example"),
        ..Default::default()
    };

    let vars = resolve_variables(brick.manifest(), &sources, &NoPrompt).unwrap();
    assert_eq!(
        vars.iter().collect::<Vec<_>>(),
        [("project_name", "my_app"), ("organization", "com.example")]
    );

    let err = resolve_variables(brick.manifest(), &VariableSources::default(), &NoPrompt)
        .unwrap_err();
    assert!(matches!(*err, Error::MissingVariables { .. }));
}
