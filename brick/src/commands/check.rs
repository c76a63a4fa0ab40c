use brickyard_manifest::Error;
use clap::Args;
use eyre::Result;

use super::{BrickArgs, UnwrapOrExit, VarArgs, exit_with};
use crate::{
    ops::{self, CheckVariables},
    reports,
};

#[derive(Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub brick: BrickArgs,

    #[command(flatten)]
    pub vars: VarArgs,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let brick = self.brick.open().unwrap_or_exit();

        let resolved = match self.vars.resolve(brick.manifest(), false) {
            Ok(vars) => Ok(vars),
            Err(e) => match *e {
                Error::MissingVariables { names } => Err(names),
                other => exit_with(miette::Report::new(other)),
            },
        };
        let variables = match &resolved {
            Ok(vars) => CheckVariables::Resolved(vars),
            Err(names) => CheckVariables::Missing(names.clone()),
        };

        let report = ops::check(&brick, variables).unwrap_or_exit();
        reports::emit(&report, self.json)?;

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
