mod check;
mod completions;
mod info;
mod make;

use std::{io::IsTerminal, path::PathBuf};

use brickyard_core::{Variables, validate_identifier};
use brickyard_manifest::{
    Brick, Manifest, NoPrompt, Prompt, VariableSources, parse_vars_file, resolve_variables,
};
use brickyard_scaffold::ScaffoldError;
use check::CheckCommand;
use clap::{Args, Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use info::InfoCommand;
use make::MakeCommand;

use crate::prompt::TerminalPrompt;

/// Extension trait for exiting on library errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for brickyard_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => exit_with(miette::Report::new(*e)),
        }
    }
}

impl<T> UnwrapOrExit<T> for std::result::Result<T, ScaffoldError> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                let note = write_outcome(&e);
                eprintln!("{:?}", miette::Report::new(e));
                eprintln!("note: {}", note);
                std::process::exit(1);
            }
        }
    }
}

/// What a failed invocation left on disk.
fn write_outcome(err: &ScaffoldError) -> &'static str {
    match err {
        ScaffoldError::Conflict { .. } => "nothing was written",
        _ if err.is_render_phase() => "nothing was written",
        _ if err.leftovers().is_empty() => "files written by this run were rolled back",
        _ => "rollback was incomplete; the paths listed above were left behind",
    }
}

pub(crate) fn exit_with(report: miette::Report) -> ! {
    eprintln!("{:?}", report);
    std::process::exit(1);
}

#[derive(Parser)]
#[command(name = "brick")]
#[command(version)]
#[command(about = "Generate projects from brick templates")]
pub(crate) struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Make(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Info(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a project from a brick
    Make(MakeCommand),

    /// Validate a brick without writing anything
    Check(CheckCommand),

    /// Show brick information
    Info(InfoCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Which brick to use.
#[derive(Args)]
pub(crate) struct BrickArgs {
    /// Brick directory or its brick.toml (defaults to the current directory)
    #[arg(default_value = ".", conflicts_with = "template")]
    pub brick: PathBuf,

    /// Use a template directory directly, without a brick.toml
    #[arg(short, long, value_name = "DIR")]
    pub template: Option<PathBuf>,
}

impl BrickArgs {
    pub fn open(&self) -> brickyard_manifest::Result<Brick> {
        match &self.template {
            Some(dir) => Brick::from_template_dir(dir),
            None => Brick::open(&self.brick),
        }
    }
}

/// Where variable values come from.
#[derive(Args)]
pub(crate) struct VarArgs {
    /// Set a variable (repeatable)
    #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_var)]
    pub vars: Vec<(String, String)>,

    /// Read variables from a TOML file
    #[arg(long, value_name = "FILE")]
    pub vars_file: Option<PathBuf>,
}

impl VarArgs {
    pub fn sources(&self) -> brickyard_manifest::Result<VariableSources> {
        let file = match &self.vars_file {
            Some(path) => parse_vars_file(path)?,
            None => Variables::new(),
        };
        let cli = self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        Ok(VariableSources { cli, file })
    }

    /// Resolve variables, prompting on a terminal unless `interactive` is false.
    pub fn resolve(
        &self,
        manifest: Option<&Manifest>,
        interactive: bool,
    ) -> brickyard_manifest::Result<Variables> {
        let sources = self.sources()?;
        let prompt: Box<dyn Prompt> = if interactive && std::io::stdin().is_terminal() {
            Box::new(TerminalPrompt::new())
        } else {
            Box::new(NoPrompt)
        };
        resolve_variables(manifest, &sources, prompt.as_ref())
    }
}

/// Parse a `NAME=VALUE` pair.
fn parse_var(s: &str) -> std::result::Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", s))?;
    let name = name.trim();
    if let Some(reason) = validate_identifier(name) {
        return Err(format!("invalid variable name '{}': {}", name, reason));
    }
    Ok((name.to_string(), value.to_string()))
}
