//! Info command report data structures.

use std::path::PathBuf;

use serde::Serialize;

use super::output::{Output, Report};

/// Report data from brick info.
#[derive(Debug, Serialize)]
pub struct InfoReport {
    pub name: String,
    pub description: Option<String>,
    pub version: Option<String>,
    /// Brick directory.
    pub path: PathBuf,
    /// Template directory.
    pub template_root: PathBuf,
    /// Declared variables, in declaration order.
    pub variables: Vec<VariableInfo>,
    /// Variables referenced by templates but not declared.
    pub undeclared: Vec<String>,
    /// Templates that failed to parse.
    pub problems: Vec<String>,
    pub stats: Stats,
}

/// A declared variable.
#[derive(Debug, Serialize)]
pub struct VariableInfo {
    pub name: String,
    pub description: Option<String>,
    pub default: Option<String>,
    /// Whether any template references it.
    pub used: bool,
}

/// Template tree statistics.
#[derive(Debug, Default, Serialize)]
pub struct Stats {
    pub files: usize,
    pub directories: usize,
    /// Files copied without rendering.
    pub binary: usize,
    pub tokens: usize,
    /// Transforms used by templates.
    pub transforms: Vec<String>,
}

impl Report for InfoReport {
    fn render(&self, out: &mut dyn Output) {
        out.title(&self.name);
        if let Some(desc) = &self.description {
            out.preformatted(desc);
        }
        out.newline();

        if let Some(version) = &self.version {
            out.key_value("Version", version);
        }
        out.key_value("Path", &self.path.display().to_string());
        out.key_value("Templates", &self.template_root.display().to_string());
        out.newline();

        out.section("Statistics");
        out.key_value("Files", &format!("{} ({} binary)", self.stats.files, self.stats.binary));
        out.key_value("Directories", &self.stats.directories.to_string());
        out.key_value("Tokens", &self.stats.tokens.to_string());
        if !self.stats.transforms.is_empty() {
            out.key_value("Transforms", &self.stats.transforms.join(", "));
        }
        out.newline();

        if !self.variables.is_empty() {
            out.section("Variables");
            for var in &self.variables {
                let mut line = var.name.clone();
                if let Some(default) = &var.default {
                    line.push_str(&format!(" = {:?}", default));
                }
                if let Some(desc) = &var.description {
                    line.push_str(&format!("  ({})", desc));
                }
                if !var.used {
                    line.push_str("  [unused]");
                }
                out.list_item(&line);
            }
            out.newline();
        }

        if !self.undeclared.is_empty() {
            out.section("Undeclared variables");
            for name in &self.undeclared {
                out.list_item(name);
            }
            out.newline();
        }

        for problem in &self.problems {
            out.warning(problem);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::BufferOutput;

    #[test]
    fn test_variables_section() {
        let report = InfoReport {
            name: "flutter_app".into(),
            description: None,
            version: Some("0.1.0".into()),
            path: PathBuf::from("bricks/flutter_app"),
            template_root: PathBuf::from("bricks/flutter_app/__brick__"),
            variables: vec![
                VariableInfo {
                    name: "project_name".into(),
                    description: Some("Application name".into()),
                    default: Some("my_app".into()),
                    used: true,
                },
                VariableInfo {
                    name: "flavor".into(),
                    description: None,
                    default: None,
                    used: false,
                },
            ],
            undeclared: vec!["organization".into()],
            problems: vec!["a.txt:1:1: malformed token `{{x.y}}`: bad".into()],
            stats: Stats::default(),
        };

        let mut out = BufferOutput::default();
        report.render(&mut out);
        let text = out.text();

        assert!(text.contains("- project_name = \"my_app\"  (Application name)"));
        assert!(text.contains("- flavor  [unused]"));
        assert!(text.contains("Undeclared variables:\n- organization"));
        assert!(text.contains("warning: a.txt:1:1: malformed token `{{x.y}}`: bad"));
    }
}
