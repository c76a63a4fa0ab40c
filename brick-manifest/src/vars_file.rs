//! Variables files: flat TOML tables of variable values.
//!
//! ```toml
//! project_name = "My Cool App"
//! organization = "com.example"
//! build_number = 7
//! ```

use std::path::Path;

use brickyard_core::Variables;
use indexmap::IndexMap;

use crate::{
    Error, Result,
    error::SourceContext,
    validate::{check_variable_name, find_key_span},
};

/// Read a variables file.
pub fn parse_vars_file(path: impl AsRef<Path>) -> Result<Variables> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| {
        Box::new(Error::Io {
            path: path.to_path_buf(),
            source,
        })
    })?;
    parse_vars_str(&content, &path.display().to_string())
}

/// Parse variables from TOML text, keeping their order.
///
/// Numbers and booleans are converted to their string form; arrays,
/// tables and datetimes are rejected.
pub fn parse_vars_str(content: &str, filename: &str) -> Result<Variables> {
    let ctx = SourceContext::new(content, filename);
    let table: IndexMap<String, toml::Value> =
        toml::from_str(content).map_err(|e| ctx.parse_error(e))?;

    let mut vars = Variables::new();
    for (name, value) in table {
        check_variable_name(&ctx, &name)?;
        let Some(value) = scalar_to_string(&value) else {
            let span = find_key_span(content, &name);
            return Err(ctx.unsupported_value_error(name, value.type_str(), span));
        };
        vars.insert(name, value);
    }
    Ok(vars)
}

/// String form of a scalar TOML value, or `None` for anything else.
pub(crate) fn scalar_to_string(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        toml::Value::Datetime(_) | toml::Value::Array(_) | toml::Value::Table(_) => None,
    }
}
