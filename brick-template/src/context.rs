//! Render context: the bindings and transforms for one rendering pass.

use brickyard_core::{TransformTable, Variables};

use crate::token::Token;

/// Immutable view of the variables and transforms used by one pass.
///
/// The context only borrows its inputs, so a single context can be shared
/// across threads while templates render in parallel.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    variables: &'a Variables,
    transforms: &'a TransformTable,
}

/// Why a token could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    UndefinedVariable(String),
    UnknownTransform(String),
}

impl<'a> RenderContext<'a> {
    pub fn new(variables: &'a Variables, transforms: &'a TransformTable) -> Self {
        Self {
            variables,
            transforms,
        }
    }

    pub fn variables(&self) -> &'a Variables {
        self.variables
    }

    pub fn transforms(&self) -> &'a TransformTable {
        self.transforms
    }

    /// Resolve a token to its final string.
    ///
    /// Looks up the variable, then applies each transform left to right.
    pub fn resolve(&self, token: &Token) -> Result<String, ResolveError> {
        let mut value = self
            .variables
            .get(&token.variable)
            .ok_or_else(|| ResolveError::UndefinedVariable(token.variable.clone()))?
            .to_string();

        for name in &token.transforms {
            value = self
                .transforms
                .apply(name, &value)
                .map_err(|e| ResolveError::UnknownTransform(e.name))?;
        }

        Ok(value)
    }
}
