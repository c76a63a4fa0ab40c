use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for manifest operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source text and filename of a TOML document, for building diagnostics.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
            filename: self.filename.clone(),
        })
    }

    pub fn validation_error(
        &self,
        message: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span,
            message: message.into(),
        })
    }

    pub fn invalid_identifier_error(
        &self,
        name: impl Into<String>,
        reason: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidIdentifier {
            src: self.named_source(),
            span,
            name: name.into(),
            reason: reason.into(),
        })
    }

    pub fn unsupported_value_error(
        &self,
        name: impl Into<String>,
        kind: &'static str,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::UnsupportedValue {
            src: self.named_source(),
            span,
            name: name.into(),
            kind,
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(code(brick::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no brick.toml found in '{path}'")]
    #[diagnostic(
        code(brick::manifest_not_found),
        help("pass `--template <dir>` to use a template directory without a manifest")
    )]
    ManifestNotFound { path: PathBuf },

    #[error("brick at '{path}' has no template directory")]
    #[diagnostic(
        code(brick::missing_template_dir),
        help("create a `__brick__` directory next to brick.toml")
    )]
    MissingTemplateDir { path: PathBuf },

    #[error("failed to parse {filename}")]
    #[diagnostic(code(brick::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
        filename: String,
    },

    #[error("{message}")]
    #[diagnostic(code(brick::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("invalid variable name '{name}'")]
    #[diagnostic(
        code(brick::invalid_identifier),
        help("variable names {reason}; templates reference them as `{{{{name}}}}`")
    )]
    InvalidIdentifier {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid identifier")]
        span: Option<SourceSpan>,
        name: String,
        reason: String,
    },

    #[error("variable '{name}' has an unsupported {kind} value")]
    #[diagnostic(
        code(brick::unsupported_value),
        help("variable values must be strings, numbers or booleans")
    )]
    UnsupportedValue {
        #[source_code]
        src: NamedSource<String>,
        #[label("expected a string, number or boolean")]
        span: Option<SourceSpan>,
        name: String,
        kind: &'static str,
    },

    #[error("missing value for {}: {}", plural(.names.len()), .names.join(", "))]
    #[diagnostic(
        code(brick::missing_variables),
        help("pass values with `--var name=value` or `--vars-file <file>`")
    )]
    MissingVariables { names: Vec<String> },

    #[error("failed to prompt for '{name}'")]
    #[diagnostic(code(brick::prompt))]
    Prompt {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "variable" } else { "variables" }
}
