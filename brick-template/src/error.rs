use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// An error raised while rendering a template.
///
/// Every variant carries the template name, the offending token text and its
/// byte offset, plus the source for labelled diagnostics.
#[derive(Debug, Error, Diagnostic)]
pub enum RenderError {
    #[error("undefined variable '{name}' in {template}")]
    #[diagnostic(
        code(brick::undefined_variable),
        help("pass a value with `--var {name}=<value>` or declare a default in brick.toml")
    )]
    UndefinedVariable {
        name: String,
        template: String,
        token: String,
        offset: usize,
        #[source_code]
        src: NamedSource<String>,
        #[label("'{name}' is not defined")]
        span: SourceSpan,
    },

    #[error("unknown transform '{name}' in {template}")]
    #[diagnostic(code(brick::unknown_transform), help("available transforms: {available}"))]
    UnknownTransform {
        name: String,
        template: String,
        token: String,
        offset: usize,
        available: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("unknown transform")]
        span: SourceSpan,
    },

    #[error("malformed token in {template}: {reason}")]
    #[diagnostic(
        code(brick::malformed_token),
        help("tokens look like `{{{{name}}}}` or `{{{{name.snakeCase()}}}}`")
    )]
    MalformedToken {
        reason: String,
        template: String,
        token: String,
        offset: usize,
        #[source_code]
        src: NamedSource<String>,
        #[label("{reason}")]
        span: SourceSpan,
    },
}

impl RenderError {
    /// Name of the template the error was found in.
    pub fn template(&self) -> &str {
        match self {
            RenderError::UndefinedVariable { template, .. }
            | RenderError::UnknownTransform { template, .. }
            | RenderError::MalformedToken { template, .. } => template,
        }
    }

    /// The offending token text.
    pub fn token(&self) -> &str {
        match self {
            RenderError::UndefinedVariable { token, .. }
            | RenderError::UnknownTransform { token, .. }
            | RenderError::MalformedToken { token, .. } => token,
        }
    }

    /// Byte offset of the offending token in the template.
    pub fn offset(&self) -> usize {
        match self {
            RenderError::UndefinedVariable { offset, .. }
            | RenderError::UnknownTransform { offset, .. }
            | RenderError::MalformedToken { offset, .. } => *offset,
        }
    }

    /// 1-based line and column of the offending token.
    pub fn line_col(&self, src: &str) -> (usize, usize) {
        let before = &src[..self.offset().min(src.len())];
        let line = before.matches('\n').count() + 1;
        let col = before
            .rfind('\n')
            .map_or(before.chars().count(), |nl| before[nl + 1..].chars().count())
            + 1;
        (line, col)
    }
}
