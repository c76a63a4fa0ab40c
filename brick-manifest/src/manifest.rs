//! `brick.toml` manifest types and parsing.

use std::{path::Path, str::FromStr};

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, de::Error as _};

use crate::{
    Error, Result, Version,
    error::SourceContext,
    validate::{check_variable_name, find_key_span},
    vars_file::scalar_to_string,
};

/// Root manifest for brick.toml
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Brick metadata
    pub brick: BrickConfig,

    /// Declared variables, in declaration order
    #[serde(default)]
    pub vars: IndexMap<String, VarSpec>,
}

/// The `[brick]` table.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BrickConfig {
    pub name: String,

    pub description: Option<String>,

    #[serde(default = "default_version")]
    pub version: Version,
}

fn default_version() -> Version {
    Version::new(0, 1, 0)
}

/// A `[vars.<name>]` table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VarSpec {
    /// Shown next to the prompt and by `brick info`.
    pub description: Option<String>,

    /// Used when no other source provides a value.
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub default: Option<String>,

    /// Prompt text; the variable name is used when absent.
    pub prompt: Option<String>,
}

impl VarSpec {
    /// Text to show when asking for `name` interactively.
    pub fn prompt_text<'a>(&'a self, name: &'a str) -> &'a str {
        self.prompt
            .as_deref()
            .or(self.description.as_deref())
            .unwrap_or(name)
    }
}

fn deserialize_scalar<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(value) = Option::<toml::Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    scalar_to_string(&value).map(Some).ok_or_else(|| {
        D::Error::custom(format!(
            "expected a string, number or boolean, found {}",
            value.type_str()
        ))
    })
}

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "brick.toml")
    }
}

impl Manifest {
    /// Parse a brick.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source,
            })
        })?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Check whether `name` is declared under `[vars]`.
    pub fn declares(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }
}

fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let ctx = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| ctx.parse_error(e))?;
    validate_manifest(&manifest, &ctx)?;
    Ok(manifest)
}

fn validate_manifest(manifest: &Manifest, ctx: &SourceContext) -> Result<()> {
    if manifest.brick.name.trim().is_empty() {
        return Err(ctx.validation_error(
            "brick name cannot be empty",
            find_key_span(ctx.src(), "name"),
        ));
    }

    for name in manifest.vars.keys() {
        check_variable_name(ctx, name)?;
    }
    Ok(())
}
