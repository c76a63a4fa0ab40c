//! Info operation: brick metadata and template statistics.

use brickyard_manifest::Brick;
use brickyard_scaffold::ScaffoldError;

use super::analyze::analyze;
use crate::reports::{InfoReport, Stats, VariableInfo};

/// Execute the info operation.
pub fn info(brick: &Brick) -> Result<InfoReport, ScaffoldError> {
    let analysis = analyze(brick.template_root())?;
    let manifest = brick.manifest();

    let variables = manifest
        .into_iter()
        .flat_map(|m| &m.vars)
        .map(|(name, spec)| VariableInfo {
            name: name.clone(),
            description: spec.description.clone(),
            default: spec.default.clone(),
            used: analysis.variables.contains(name),
        })
        .collect();

    let undeclared = match manifest {
        Some(manifest) => analysis
            .variables
            .iter()
            .filter(|name| !manifest.declares(name))
            .cloned()
            .collect(),
        None => analysis.variables.iter().cloned().collect(),
    };

    Ok(InfoReport {
        name: brick.name(),
        description: manifest.and_then(|m| m.brick.description.clone()),
        version: manifest.map(|m| m.brick.version.to_string()),
        path: std::fs::canonicalize(brick.root()).unwrap_or_else(|_| brick.root().to_path_buf()),
        template_root: brick.template_root().to_path_buf(),
        variables,
        undeclared,
        problems: analysis.problems,
        stats: Stats {
            files: analysis.files,
            directories: analysis.directories,
            binary: analysis.binary,
            tokens: analysis.tokens,
            transforms: analysis.transforms.into_iter().collect(),
        },
    })
}
