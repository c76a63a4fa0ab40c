//! Template analysis without variables.

use std::{collections::BTreeSet, path::Path};

use brickyard_scaffold::{Content, ScaffoldError, TemplateEntry, display_name, walk};
use brickyard_template::{RenderError, Segment, Template};

/// What a template tree references.
#[derive(Debug, Default)]
pub struct TemplateAnalysis {
    pub files: usize,
    pub directories: usize,
    pub binary: usize,
    pub tokens: usize,
    pub variables: BTreeSet<String>,
    pub transforms: BTreeSet<String>,
    /// Templates that failed to parse, as `template:line:col: reason`.
    pub problems: Vec<String>,
}

/// Parse every path and text file under `template_root`.
///
/// Malformed templates are collected in [`TemplateAnalysis::problems`];
/// only walk and read failures are errors.
pub fn analyze(template_root: &Path) -> Result<TemplateAnalysis, ScaffoldError> {
    let mut analysis = TemplateAnalysis::default();

    for entry in walk(template_root)? {
        let entry = entry?;
        let name = display_name(entry.path());
        analysis.parse(&name, &name);

        match entry {
            TemplateEntry::Dir(_) => analysis.directories += 1,
            TemplateEntry::File(file) => {
                analysis.files += 1;
                match &file.content {
                    Content::Text(text) => analysis.parse(&name, text),
                    Content::Binary(_) => analysis.binary += 1,
                }
            }
        }
    }

    Ok(analysis)
}

impl TemplateAnalysis {
    fn parse(&mut self, name: &str, src: &str) {
        let template = match Template::parse(name, src) {
            Ok(template) => template,
            Err(e) => {
                self.problems.push(problem(&e, src));
                return;
            }
        };

        self.variables.extend(
            template
                .referenced_variables()
                .into_iter()
                .map(str::to_string),
        );
        for segment in template.segments() {
            if let Segment::Token(token) = segment {
                self.tokens += 1;
                self.transforms.extend(token.transforms.iter().cloned());
            }
        }
    }
}

fn problem(err: &RenderError, src: &str) -> String {
    let (line, col) = err.line_col(src);
    let reason = match err {
        RenderError::MalformedToken { reason, .. } => reason.clone(),
        other => other.to_string(),
    };
    format!(
        "{}:{}:{}: malformed token `{}`: {}",
        err.template(),
        line,
        col,
        err.token(),
        reason
    )
}
