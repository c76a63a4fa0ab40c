//! Template tokenizer.
//!
//! Splits template text into literal runs and `{{ ... }}` tokens. A token
//! interior is `identifier(.transform())*`; anything else is a syntax error.

use std::ops::Range;

use brickyard_core::validate_identifier;
use miette::SourceSpan;

/// Opening token delimiter.
pub const OPEN: &str = "{{";
/// Closing token delimiter.
pub const CLOSE: &str = "}}";

/// A parsed `{{identifier.transform()...}}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The variable the token references.
    pub variable: String,
    /// Transform names, applied left to right.
    pub transforms: Vec<String>,
    /// Byte range of the whole token (delimiters included) in the source.
    pub range: Range<usize>,
}

impl Token {
    /// Byte offset of the token's opening delimiter.
    pub fn offset(&self) -> usize {
        self.range.start
    }

    /// Span of the token for diagnostics.
    pub fn span(&self) -> SourceSpan {
        SourceSpan::from(self.range.clone())
    }

    /// The raw token text as it appears in `src`.
    pub fn text<'a>(&self, src: &'a str) -> &'a str {
        &src[self.range.clone()]
    }
}

/// One piece of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text copied to the output unchanged.
    Literal(&'a str),
    /// A placeholder to resolve.
    Token(Token),
}

/// A syntax error found while tokenizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub reason: String,
    /// Byte range of the offending text.
    pub range: Range<usize>,
}

impl SyntaxError {
    fn new(reason: impl Into<String>, range: Range<usize>) -> Self {
        Self {
            reason: reason.into(),
            range,
        }
    }
}

/// Split `src` into literal and token segments.
///
/// Scanning is a single left-to-right pass. Tokens do not nest, and a lone
/// `}}` outside a token is literal text.
pub fn tokenize(src: &str) -> Result<Vec<Segment<'_>>, SyntaxError> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    while let Some(rel) = src[cursor..].find(OPEN) {
        let open = cursor + rel;
        let inner_start = open + OPEN.len();

        let Some(close_rel) = src[inner_start..].find(CLOSE) else {
            return Err(SyntaxError::new(
                "unterminated token, expected '}}'",
                open..src.len(),
            ));
        };
        let inner_end = inner_start + close_rel;
        let end = inner_end + CLOSE.len();
        let inner = &src[inner_start..inner_end];

        if let Some(nested) = inner.find(OPEN) {
            let at = inner_start + nested;
            return Err(SyntaxError::new(
                "tokens cannot be nested",
                at..at + OPEN.len(),
            ));
        }

        if open > cursor {
            segments.push(Segment::Literal(&src[cursor..open]));
        }
        segments.push(Segment::Token(parse_expr(inner, open..end)?));
        cursor = end;
    }

    if cursor < src.len() {
        segments.push(Segment::Literal(&src[cursor..]));
    }

    Ok(segments)
}

/// Parse a token interior such as `project_name.snakeCase()`.
fn parse_expr(inner: &str, range: Range<usize>) -> Result<Token, SyntaxError> {
    let expr = inner.trim();
    if expr.is_empty() {
        return Err(SyntaxError::new("empty token", range));
    }

    let mut parts = expr.split('.');
    let variable = parts.next().unwrap_or_default();
    if variable.trim().is_empty() {
        return Err(SyntaxError::new("missing variable name", range));
    }
    if let Some(reason) = validate_identifier(variable) {
        return Err(SyntaxError::new(
            format!("invalid variable name '{variable}': {reason}"),
            range,
        ));
    }

    let mut transforms = Vec::new();
    for call in parts {
        let Some(name) = call.strip_suffix("()") else {
            return Err(SyntaxError::new(
                format!("expected '()' after transform '{call}'"),
                range,
            ));
        };
        if name.is_empty() {
            return Err(SyntaxError::new("missing transform name", range));
        }
        if let Some(reason) = validate_identifier(name) {
            return Err(SyntaxError::new(
                format!("invalid transform name '{name}': {reason}"),
                range,
            ));
        }
        transforms.push(name.to_string());
    }

    Ok(Token {
        variable: variable.to_string(),
        transforms,
        range,
    })
}
