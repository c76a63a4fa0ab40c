//! Named transforms and the table a renderer resolves them from.

use std::{fmt, str::FromStr};

use indexmap::IndexMap;
use thiserror::Error;

use crate::case;

/// Signature shared by every transform function.
pub type TransformFn = fn(&str) -> String;

/// Built-in transforms, addressed in templates by their camelCase name
/// (e.g., `{{name.snakeCase()}}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transform {
    SnakeCase,
    TitleCase,
    CamelCase,
    PascalCase,
    KebabCase,
    ConstantCase,
    DotCase,
    PathCase,
    SentenceCase,
    HeaderCase,
    ParamCase,
    UpperCase,
    LowerCase,
}

impl Transform {
    /// All built-in transforms, in registration order.
    pub const ALL: [Transform; 13] = [
        Transform::SnakeCase,
        Transform::TitleCase,
        Transform::CamelCase,
        Transform::PascalCase,
        Transform::KebabCase,
        Transform::ConstantCase,
        Transform::DotCase,
        Transform::PathCase,
        Transform::SentenceCase,
        Transform::HeaderCase,
        Transform::ParamCase,
        Transform::UpperCase,
        Transform::LowerCase,
    ];

    /// The name used in template tokens.
    pub fn name(&self) -> &'static str {
        match self {
            Transform::SnakeCase => "snakeCase",
            Transform::TitleCase => "titleCase",
            Transform::CamelCase => "camelCase",
            Transform::PascalCase => "pascalCase",
            Transform::KebabCase => "kebabCase",
            Transform::ConstantCase => "constantCase",
            Transform::DotCase => "dotCase",
            Transform::PathCase => "pathCase",
            Transform::SentenceCase => "sentenceCase",
            Transform::HeaderCase => "headerCase",
            Transform::ParamCase => "paramCase",
            Transform::UpperCase => "upperCase",
            Transform::LowerCase => "lowerCase",
        }
    }

    /// The function implementing this transform.
    pub fn function(&self) -> TransformFn {
        match self {
            Transform::SnakeCase => case::to_snake_case,
            Transform::TitleCase => case::to_title_case,
            Transform::CamelCase => case::to_camel_case,
            Transform::PascalCase => case::to_pascal_case,
            Transform::KebabCase | Transform::ParamCase => case::to_kebab_case,
            Transform::ConstantCase => case::to_constant_case,
            Transform::DotCase => case::to_dot_case,
            Transform::PathCase => case::to_path_case,
            Transform::SentenceCase => case::to_sentence_case,
            Transform::HeaderCase => case::to_header_case,
            Transform::UpperCase => case::to_upper_case,
            Transform::LowerCase => case::to_lower_case,
        }
    }

    /// Apply this transform to `input`.
    pub fn apply(&self, input: &str) -> String {
        (self.function())(input)
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Transform {
    type Err = UnknownTransform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Transform::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| UnknownTransform::new(s))
    }
}

/// A transform name that is not registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown transform '{name}'")]
pub struct UnknownTransform {
    pub name: String,
}

impl UnknownTransform {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Immutable registry of the transforms a renderer may call.
///
/// The table is passed to the renderer explicitly, so renderers with
/// different transform sets can coexist. [`TransformTable::builtin`] holds
/// every [`Transform`]; custom functions can be added with
/// [`TransformTable::register`] before rendering starts.
///
/// # Example
///
/// ```
/// use brickyard_core::TransformTable;
///
/// let table = TransformTable::builtin();
/// assert_eq!(table.apply("snakeCase", "My Cool App").unwrap(), "my_cool_app");
/// assert!(table.apply("screamingSnake", "x").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct TransformTable {
    entries: IndexMap<String, TransformFn>,
}

impl TransformTable {
    /// A table with no transforms.
    pub fn empty() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// A table with every built-in transform.
    pub fn builtin() -> Self {
        Self::from_transforms(Transform::ALL)
    }

    /// A table restricted to the given built-in transforms.
    pub fn from_transforms(transforms: impl IntoIterator<Item = Transform>) -> Self {
        let mut table = Self::empty();
        for t in transforms {
            table = table.register(t.name(), t.function());
        }
        table
    }

    /// Register a transform under `name`, replacing any previous entry.
    pub fn register(mut self, name: impl Into<String>, f: TransformFn) -> Self {
        self.entries.insert(name.into(), f);
        self
    }

    /// Look up a transform function by name.
    pub fn get(&self, name: &str) -> Option<TransformFn> {
        self.entries.get(name).copied()
    }

    /// Check if a transform is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Apply the transform called `name` to `input`.
    pub fn apply(&self, name: &str, input: &str) -> Result<String, UnknownTransform> {
        self.get(name)
            .map(|f| f(input))
            .ok_or_else(|| UnknownTransform::new(name))
    }
}

impl Default for TransformTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_roundtrips_names() {
        for t in Transform::ALL {
            assert_eq!(t.name().parse::<Transform>().unwrap(), t);
        }
    }

    #[test]
    fn test_from_str_unknown() {
        let err = "screamingSnake".parse::<Transform>().unwrap_err();
        assert_eq!(err.name, "screamingSnake");
        assert_eq!(err.to_string(), "unknown transform 'screamingSnake'");
    }

    #[test]
    fn test_builtin_table_applies_required_kinds() {
        let table = TransformTable::builtin();
        let input = "My Cool App";

        assert_eq!(table.apply("snakeCase", input).unwrap(), "my_cool_app");
        assert_eq!(table.apply("titleCase", input).unwrap(), "My Cool App");
        assert_eq!(table.apply("camelCase", input).unwrap(), "myCoolApp");
        assert_eq!(table.apply("pascalCase", input).unwrap(), "MyCoolApp");
        assert_eq!(table.apply("kebabCase", input).unwrap(), "my-cool-app");
    }

    #[test]
    fn test_apply_is_deterministic() {
        let table = TransformTable::builtin();
        for name in table.names() {
            for input in ["My Cool App", "HTTPServer", "", "already_snake"] {
                assert_eq!(
                    table.apply(name, input).unwrap(),
                    table.apply(name, input).unwrap()
                );
            }
        }
    }

    #[test]
    fn test_restricted_table() {
        let table = TransformTable::from_transforms([Transform::SnakeCase]);
        assert!(table.contains("snakeCase"));
        assert!(!table.contains("titleCase"));
        assert_eq!(
            table.apply("titleCase", "x"),
            Err(UnknownTransform::new("titleCase"))
        );
    }

    #[test]
    fn test_register_custom_transform() {
        fn reverse(s: &str) -> String {
            s.chars().rev().collect()
        }

        let table = TransformTable::empty().register("reverse", reverse);
        assert_eq!(table.apply("reverse", "abc").unwrap(), "cba");
        assert_eq!(table.names().collect::<Vec<_>>(), ["reverse"]);
    }

    #[test]
    fn test_param_case_is_kebab() {
        assert_eq!(Transform::ParamCase.apply("MyApp"), "my-app");
    }
}
