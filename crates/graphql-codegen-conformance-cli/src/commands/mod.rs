mod cases;
mod config;
mod run;

use crate::Cli;
use crate::CommandResult;
use cases::CasesCmd;
use config::ConfigCmd;
use run::RunCmd;

#[derive(Debug, clap::Parser)]
#[command(name = "graphql-codegen-conformance")]
pub(crate) enum CommandEnum {
    /// List the conformance cases found in a corpus directory.
    Cases(Box<CasesCmd>),

    /// Print the codegen configuration a case is run with, as JSON.
    Config(Box<ConfigCmd>),

    /// Run code generators over a corpus and check their output against the
    /// golden files.
    Run(Box<RunCmd>),
}
impl CommandEnum {
    pub(crate) async fn run(self, cli: Cli) -> CommandResult {
        match self {
            Self::Cases(cmd) => cmd.run(cli).await,
            Self::Config(cmd) => cmd.run(cli).await,
            Self::Run(cmd) => cmd.run(cli).await,
        }
    }
}
