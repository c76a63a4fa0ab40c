//! Variable resolution.
//!
//! Each declared variable takes its value from the first source that has
//! one: command-line values, then the variables file, then an interactive
//! prompt, then the manifest default. Values for undeclared names are passed
//! through so templates can use them too.

use std::io;

use brickyard_core::Variables;
use tracing::debug;

use crate::{Error, Manifest, Result, VarSpec};

/// Asks the user for a variable value.
pub trait Prompt {
    /// Ask for `name`; `Ok(None)` means no answer.
    fn prompt(&self, name: &str, spec: &VarSpec) -> io::Result<Option<String>>;
}

/// Never asks; used for non-interactive runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPrompt;

impl Prompt for NoPrompt {
    fn prompt(&self, _name: &str, _spec: &VarSpec) -> io::Result<Option<String>> {
        Ok(None)
    }
}

/// Values supplied before resolution starts.
#[derive(Debug, Clone, Default)]
pub struct VariableSources {
    /// `--var key=value` pairs.
    pub cli: Variables,
    /// Values from `--vars-file`.
    pub file: Variables,
}

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    Cli,
    File,
    Prompt,
    Default,
}

impl ValueSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueSource::Cli => "command line",
            ValueSource::File => "variables file",
            ValueSource::Prompt => "prompt",
            ValueSource::Default => "default",
        }
    }
}

/// Resolve the variables for one invocation.
///
/// Declared variables come first, in declaration order, followed by any
/// undeclared values. A declared variable without a value from any source
/// is an error listing every such name.
pub fn resolve_variables(
    manifest: Option<&Manifest>,
    sources: &VariableSources,
    prompt: &dyn Prompt,
) -> Result<Variables> {
    let mut resolved = Variables::new();
    let mut missing = Vec::new();

    for (name, spec) in manifest.into_iter().flat_map(|m| &m.vars) {
        match resolve_one(name, spec, sources, prompt)? {
            Some((value, source)) => {
                debug!(name = %name, source = source.as_str(), "resolved variable");
                resolved.insert(name.as_str(), value);
            }
            None => missing.push(name.clone()),
        }
    }

    if !missing.is_empty() {
        return Err(Box::new(Error::MissingVariables { names: missing }));
    }

    let declared = |name: &str| manifest.is_some_and(|m| m.declares(name));
    for (name, value) in sources.file.iter().chain(sources.cli.iter()) {
        if !declared(name) {
            resolved.insert(name, value);
        }
    }

    Ok(resolved)
}

fn resolve_one(
    name: &str,
    spec: &VarSpec,
    sources: &VariableSources,
    prompt: &dyn Prompt,
) -> Result<Option<(String, ValueSource)>> {
    if let Some(value) = sources.cli.get(name) {
        return Ok(Some((value.to_string(), ValueSource::Cli)));
    }
    if let Some(value) = sources.file.get(name) {
        return Ok(Some((value.to_string(), ValueSource::File)));
    }

    let answer = prompt.prompt(name, spec).map_err(|source| {
        Box::new(Error::Prompt {
            name: name.to_string(),
            source,
        })
    })?;
    if let Some(value) = answer {
        return Ok(Some((value, ValueSource::Prompt)));
    }

    Ok(spec
        .default
        .clone()
        .map(|value| (value, ValueSource::Default)))
}
