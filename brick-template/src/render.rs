//! Template rendering.

use indexmap::IndexSet;
use miette::{NamedSource, SourceSpan};

use crate::{
    context::{RenderContext, ResolveError},
    error::RenderError,
    token::{Segment, SyntaxError, tokenize},
};

/// A parsed template, ready to render against any context.
///
/// # Example
///
/// ```
/// use brickyard_core::{TransformTable, Variables};
/// use brickyard_template::{RenderContext, Template};
///
/// let vars = Variables::new().with("project_name", "My Cool App");
/// let table = TransformTable::builtin();
/// let ctx = RenderContext::new(&vars, &table);
///
/// let template = Template::parse("build.gradle.kts", "{{project_name.snakeCase()}}").unwrap();
/// assert_eq!(template.render(&ctx).unwrap(), "my_cool_app");
/// ```
#[derive(Debug, Clone)]
pub struct Template<'a> {
    name: String,
    src: &'a str,
    segments: Vec<Segment<'a>>,
}

impl<'a> Template<'a> {
    /// Parse `src`, reporting syntax errors against `name`.
    pub fn parse(name: impl Into<String>, src: &'a str) -> Result<Self, RenderError> {
        let name = name.into();
        let segments = tokenize(src).map_err(|e| malformed(&name, src, e))?;
        Ok(Self {
            name,
            src,
            segments,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn segments(&self) -> &[Segment<'a>] {
        &self.segments
    }

    /// Variables referenced by the template, in first-use order.
    pub fn referenced_variables(&self) -> Vec<&str> {
        let names: IndexSet<&str> = self
            .segments
            .iter()
            .filter_map(|s| match s {
                Segment::Token(t) => Some(t.variable.as_str()),
                Segment::Literal(_) => None,
            })
            .collect();
        names.into_iter().collect()
    }

    /// Render the template in a single left-to-right pass.
    ///
    /// Substituted values are never re-scanned for tokens.
    pub fn render(&self, ctx: &RenderContext<'_>) -> Result<String, RenderError> {
        let mut out = String::with_capacity(self.src.len());

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Token(token) => {
                    let value = ctx.resolve(token).map_err(|e| {
                        let text = token.text(self.src).to_string();
                        let src = NamedSource::new(&self.name, self.src.to_string());
                        match e {
                            ResolveError::UndefinedVariable(name) => {
                                RenderError::UndefinedVariable {
                                    name,
                                    template: self.name.clone(),
                                    token: text,
                                    offset: token.offset(),
                                    src,
                                    span: token.span(),
                                }
                            }
                            ResolveError::UnknownTransform(name) => RenderError::UnknownTransform {
                                name,
                                template: self.name.clone(),
                                token: text,
                                offset: token.offset(),
                                available: ctx.transforms().names().collect::<Vec<_>>().join(", "),
                                src,
                                span: token.span(),
                            },
                        }
                    })?;
                    out.push_str(&value);
                }
            }
        }

        Ok(out)
    }
}

fn malformed(name: &str, src: &str, e: SyntaxError) -> RenderError {
    RenderError::MalformedToken {
        reason: e.reason,
        template: name.to_string(),
        token: src[e.range.clone()].to_string(),
        offset: e.range.start,
        src: NamedSource::new(name, src.to_string()),
        span: SourceSpan::from(e.range),
    }
}

/// Render `text` against `ctx`, naming the template `<template>` in errors.
pub fn render(text: &str, ctx: &RenderContext<'_>) -> Result<String, RenderError> {
    render_named("<template>", text, ctx)
}

/// Render `text` against `ctx`, naming the template `name` in errors.
pub fn render_named(
    name: &str,
    text: &str,
    ctx: &RenderContext<'_>,
) -> Result<String, RenderError> {
    Template::parse(name, text)?.render(ctx)
}
