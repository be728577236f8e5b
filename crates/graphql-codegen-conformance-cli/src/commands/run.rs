use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use crate::output_utils;
use anyhow::Context;
use graphql_codegen_conformance::CatalogOptions;
use graphql_codegen_conformance::DEFAULT_IR_FILE_NAME;
use graphql_codegen_conformance::TargetLanguage;
use graphql_codegen_conformance::backend::CommandBackend;
use graphql_codegen_conformance::compile_verifier::JavaSyntaxChecker;
use graphql_codegen_conformance::compile_verifier::JavacCompiler;
use graphql_codegen_conformance::compile_verifier::SourceCompiler;
use graphql_codegen_conformance::conformance_runner::BackendTarget;
use graphql_codegen_conformance::conformance_runner::ConformanceHarness;
use graphql_codegen_conformance::conformance_runner::ConformanceResults;
use graphql_codegen_conformance::conformance_runner::DEFAULT_ROOT_NAMESPACE;
use graphql_codegen_conformance::conformance_runner::HarnessOptions;
use std::path::PathBuf;
use std::sync::Arc;

/// How generated Java sources are compile-verified.
#[derive(Clone, Copy, Debug, Eq, PartialEq, clap::ValueEnum)]
pub(crate) enum CompilerKind {
    /// The built-in structural checker. Needs no JDK.
    Syntax,

    /// An external `javac` (see `--javac`/`--javac-arg`).
    Javac,

    /// Skip compile verification.
    None,
}

#[derive(Debug, clap::Args)]
pub(crate) struct RunCmd {
    #[arg(
        help="Only run these cases (comma-separated directory names).",
        long="case",
        value_delimiter=',',
    )]
    cases: Vec<String>,

    #[arg(
        default_value="syntax",
        help="How to compile-verify the Java backend's output.",
        long,
        value_enum,
    )]
    compiler: CompilerKind,

    #[arg(
        help="Extra argument passed to every generator ahead of the per-case \
             arguments. May be repeated.",
        long="generator-arg",
        allow_hyphen_values=true,
    )]
    generator_args: Vec<String>,

    #[arg(
        default_value=DEFAULT_IR_FILE_NAME,
        help="Name of the IR file inside each case directory.",
        long,
    )]
    ir_file_name: String,

    #[arg(
        help="Java generator executable. It is run as `<CMD> [--generator-arg..] \
             --ir-file <PATH> --output-dir <DIR> --package-name <PKG>` with the \
             case configuration as JSON on stdin.",
        long,
        value_name="CMD",
    )]
    java_generator: Option<PathBuf>,

    #[arg(
        default_value="javac",
        help="The `javac` executable used with `--compiler javac`.",
        long,
    )]
    javac: PathBuf,

    #[arg(
        help="Extra argument passed to `javac` (e.g. a classpath). May be \
             repeated.",
        long="javac-arg",
        allow_hyphen_values=true,
    )]
    javac_args: Vec<String>,

    #[arg(
        help="Kotlin generator executable, invoked like `--java-generator`.",
        long,
        value_name="CMD",
    )]
    kotlin_generator: Option<PathBuf>,

    #[arg(
        default_value=DEFAULT_ROOT_NAMESPACE,
        help="Namespace generated packages are nested under.",
        long,
    )]
    root_namespace: String,

    #[arg(
        help="Scratch directory for generated output. Must not be inside the \
             corpus. Defaults to a fresh temporary directory removed after the \
             run.",
        long,
    )]
    work_dir: Option<PathBuf>,

    #[arg(
        help="Directory containing one subdirectory per conformance case.",
        name="CORPUS_DIR",
    )]
    corpus_dir: PathBuf,
}
impl RunCmd {
    fn harness_options(&self) -> HarnessOptions {
        let mut options = HarnessOptions::default().with_root_namespace(&self.root_namespace);
        if let Some(work_dir) = &self.work_dir {
            options = options.with_work_dir(work_dir);
        }
        options.catalog = CatalogOptions {
            ir_file_name: self.ir_file_name.to_owned(),
        };
        options
    }

    fn java_compiler(&self) -> Option<Arc<dyn SourceCompiler>> {
        match self.compiler {
            CompilerKind::Syntax => Some(Arc::new(JavaSyntaxChecker::new())),
            CompilerKind::Javac => Some(Arc::new(
                JavacCompiler::new()
                    .with_program(&self.javac)
                    .with_args(self.javac_args.iter().cloned()),
            )),
            CompilerKind::None => None,
        }
    }

    fn build_harness(&self) -> anyhow::Result<ConformanceHarness> {
        let mut harness = ConformanceHarness::new(self.harness_options());

        if let Some(program) = &self.java_generator {
            let backend = CommandBackend::new("java", TargetLanguage::Java, program)
                .with_args(self.generator_args.iter().cloned());
            let mut target = BackendTarget::new(Arc::new(backend));
            if let Some(compiler) = self.java_compiler() {
                target = target.with_compiler(compiler);
            }
            harness = harness.with_target(target);
        }

        if let Some(program) = &self.kotlin_generator {
            let backend = CommandBackend::new("kotlin", TargetLanguage::Kotlin, program)
                .with_args(self.generator_args.iter().cloned());
            harness = harness.with_target(BackendTarget::new(Arc::new(backend)));
        }

        if harness.targets().is_empty() {
            anyhow::bail!(
                "No generators to check; pass `--java-generator` and/or \
                `--kotlin-generator`."
            );
        }
        Ok(harness)
    }

    async fn run_harness(&self) -> anyhow::Result<ConformanceResults> {
        let harness = self.build_harness()?;
        let mut catalog = harness
            .discover(&self.corpus_dir)
            .with_context(|| format!("Failed to load the corpus at {:?}", self.corpus_dir))?;
        if !self.cases.is_empty() {
            catalog = catalog.filter(&self.cases)?;
        }
        log::info!(
            "Checking {} conformance cases against {} generators...",
            catalog.len(),
            harness.targets().len(),
        );

        let results = tokio::task::spawn_blocking(move || {
            harness.run_cases(catalog.cases())
        }).await??;
        Ok(results)
    }
}

#[inherent::inherent]
impl RunnableCommand for RunCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        let results = match self.run_harness().await {
            Ok(results) => results,
            Err(err) => return err.into(),
        };

        if results.all_passed() {
            CommandResult::stdout(format_args!(
                "{}\n{} Every golden file matched.",
                results.summary(),
                output_utils::GREEN_CHECK,
            ))
        } else {
            CommandResult::failed_with_stdout(format_args!(
                "{}\n\n{}",
                results.failure_report(),
                results.summary(),
            ))
        }
    }
}
