use std::path::PathBuf;

use brickyard_scaffold::ConflictPolicy;
use clap::Args;
use eyre::Result;

use super::{BrickArgs, UnwrapOrExit, VarArgs};
use crate::{
    ops::{self, MakeOptions},
    reports,
};

#[derive(Args)]
pub struct MakeCommand {
    #[command(flatten)]
    pub brick: BrickArgs,

    /// Output directory (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    #[command(flatten)]
    pub vars: VarArgs,

    /// What to do when an output file already exists: overwrite, fail or skip
    #[arg(long, value_name = "POLICY", default_value = "fail")]
    pub on_conflict: ConflictPolicy,

    /// Render and preview the output without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Never prompt for missing variables
    #[arg(long)]
    pub no_prompt: bool,

    /// Render templates on a single thread
    #[arg(long)]
    pub sequential: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl MakeCommand {
    /// Run the make command
    pub fn run(&self) -> Result<()> {
        let brick = self.brick.open().unwrap_or_exit();
        let variables = self
            .vars
            .resolve(brick.manifest(), !self.no_prompt && !self.json)
            .unwrap_or_exit();

        let report = ops::make(
            &brick,
            &variables,
            MakeOptions {
                output_dir: &self.output,
                on_conflict: self.on_conflict,
                parallel: !self.sequential,
                dry_run: self.dry_run,
            },
        )
        .unwrap_or_exit();

        reports::emit(&report, self.json)
    }
}
