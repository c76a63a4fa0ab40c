//! Identifier checks and span lookup for TOML sources.

use brickyard_core::validate_identifier;
use miette::SourceSpan;

use crate::{Result, error::SourceContext};

/// Check that `name` is a valid variable name, pointing at it in the source
/// if it is not.
pub(crate) fn check_variable_name(ctx: &SourceContext, name: &str) -> Result<()> {
    match validate_identifier(name) {
        None => Ok(()),
        Some(reason) => Err(ctx.invalid_identifier_error(
            name,
            reason,
            find_key_span(ctx.src(), name),
        )),
    }
}

/// Find where `key` is defined in a TOML document.
///
/// Looks for a `[vars.key]` header first, then a `key = ...` (or
/// `"key" = ...`) line, then falls back to the first occurrence of `key`.
pub(crate) fn find_key_span(src: &str, key: &str) -> Option<SourceSpan> {
    let header = format!("[vars.{key}]");
    if let Some(pos) = src.find(&header) {
        return Some(SourceSpan::from((pos + "[vars.".len(), key.len())));
    }

    let quoted = format!("\"{key}\"");
    let mut offset = 0;
    for line in src.split_inclusive('\n') {
        let trimmed = line.trim_start();
        let start = offset + (line.len() - trimmed.len());
        for (candidate, skip) in [(key, 0), (quoted.as_str(), 1)] {
            let assigned = trimmed
                .strip_prefix(candidate)
                .is_some_and(|rest| rest.trim_start().starts_with('='));
            if assigned {
                return Some(SourceSpan::from((start + skip, key.len())));
            }
        }
        offset += line.len();
    }

    src.find(key).map(|pos| SourceSpan::from((pos, key.len())))
}
