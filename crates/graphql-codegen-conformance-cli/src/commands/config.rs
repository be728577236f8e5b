use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use graphql_codegen_conformance::conformance_runner::DEFAULT_ROOT_NAMESPACE;
use graphql_codegen_conformance::case_configuration;

#[derive(Debug, clap::Args)]
pub(crate) struct ConfigCmd {
    #[arg(
        default_value=DEFAULT_ROOT_NAMESPACE,
        help="Namespace generated packages are nested under.",
        long,
    )]
    root_namespace: String,

    #[arg(
        help="Name of the conformance case (its directory name in the corpus).",
        name="CASE_NAME",
    )]
    case_name: String,
}

#[inherent::inherent]
impl RunnableCommand for ConfigCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        let configuration = case_configuration::configuration(&self.case_name);
        if case_configuration::case_override(&self.case_name).is_none() {
            log::debug!("`{}` has no configuration overrides; using defaults.", self.case_name);
        }

        let package_name = configuration.package_name(&self.root_namespace, &self.case_name);
        let rendered = serde_json::to_value(&configuration)
            .and_then(|configuration| serde_json::to_string_pretty(&serde_json::json!({
                "caseName": self.case_name,
                "packageName": package_name,
                "configuration": configuration,
            })));
        match rendered {
            Ok(json) => CommandResult::stdout(format_args!("{json}")),
            Err(err) => CommandResult::from(anyhow::Error::new(err)),
        }
    }
}
