use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use crate::output_utils;
use graphql_codegen_conformance::CaseCatalog;
use graphql_codegen_conformance::CatalogOptions;
use graphql_codegen_conformance::DEFAULT_IR_FILE_NAME;
use graphql_codegen_conformance::case_configuration;
use std::path::PathBuf;

#[derive(Debug, clap::Args)]
pub(crate) struct CasesCmd {
    #[arg(
        default_value=DEFAULT_IR_FILE_NAME,
        help="Name of the IR file inside each case directory.",
        long,
    )]
    ir_file_name: String,

    #[arg(
        help="Directory containing one subdirectory per conformance case.",
        name="CORPUS_DIR",
    )]
    corpus_dir: PathBuf,
}

#[inherent::inherent]
impl RunnableCommand for CasesCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        let options = CatalogOptions {
            ir_file_name: self.ir_file_name,
        };
        let catalog = match CaseCatalog::discover(&self.corpus_dir, &options) {
            Ok(catalog) => catalog,
            Err(err) => return CommandResult::stderr(format_args!(
                "{} {err}",
                output_utils::RED_X,
            )),
        };

        let lines = catalog.cases()
            .iter()
            .map(|case| {
                let ir_marker = if case.ir_file_path.is_file() { "" } else { " (missing IR file)" };
                let override_marker =
                    if case_configuration::case_override(&case.name).is_some() {
                        " [custom configuration]"
                    } else {
                        ""
                    };
                format!(
                    "  * {}: {}{ir_marker}{override_marker}",
                    case.name,
                    case.ir_file_path.display(),
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        CommandResult::stdout(format_args!(
            "{} Found {} conformance cases under {}:\n{lines}",
            output_utils::GREEN_CHECK,
            catalog.len(),
            catalog.corpus_root().display(),
        ))
    }
}
