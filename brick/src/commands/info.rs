use clap::Args;
use eyre::Result;

use super::{BrickArgs, UnwrapOrExit};
use crate::{ops, reports};

#[derive(Args)]
pub struct InfoCommand {
    #[command(flatten)]
    pub brick: BrickArgs,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl InfoCommand {
    pub fn run(&self) -> Result<()> {
        let brick = self.brick.open().unwrap_or_exit();

        let report = ops::info(&brick).unwrap_or_exit();
        reports::emit(&report, self.json)
    }
}
