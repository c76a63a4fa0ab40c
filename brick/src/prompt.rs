//! Interactive variable prompts.

use std::io;

use brickyard_manifest::{Prompt, VarSpec};
use dialoguer::{Input, theme::ColorfulTheme};

/// Asks for missing variables on the terminal.
pub struct TerminalPrompt {
    theme: ColorfulTheme,
}

impl TerminalPrompt {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Prompt for TerminalPrompt {
    fn prompt(&self, name: &str, spec: &VarSpec) -> io::Result<Option<String>> {
        let mut input =
            Input::<String>::with_theme(&self.theme).with_prompt(spec.prompt_text(name));
        if let Some(default) = &spec.default {
            input = input.default(default.clone());
        }

        let answer = input.interact_text().map_err(io::Error::other)?;
        Ok(Some(answer).filter(|a| !a.is_empty()))
    }
}
