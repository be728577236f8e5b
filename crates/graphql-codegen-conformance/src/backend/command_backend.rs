use crate::TargetLanguage;
use crate::backend::BackendError;
use crate::backend::CodegenBackend;
use crate::backend::GenerationRequest;
use std::io::Write;
use std::path::PathBuf;
use std::process::Child;
use std::process::Command;
use std::process::Stdio;

/// A [`CodegenBackend`] implemented by an external generator process.
///
/// The generator is run as:
///
/// ```text
/// <program> <args..> --ir-file <path> --output-dir <path> --package-name <pkg>
/// ```
///
/// with the case's [`CodegenConfiguration`](crate::CodegenConfiguration)
/// written to its stdin as JSON. A non-zero exit status fails the invocation
/// and carries whatever the generator printed to stderr.
#[derive(Clone, Debug)]
pub struct CommandBackend {
    name: String,
    target: TargetLanguage,
    program: PathBuf,
    args: Vec<String>,
}
impl CommandBackend {
    pub fn new(
        name: impl Into<String>,
        target: TargetLanguage,
        program: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            target,
            program: program.into(),
            args: vec![],
        }
    }

    /// Adds arguments passed to the generator ahead of the per-case ones.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &PathBuf {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        self.args.as_slice()
    }
}

#[inherent::inherent]
impl CodegenBackend for CommandBackend {
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn target(&self) -> TargetLanguage {
        self.target
    }

    pub fn generate(&self, request: &GenerationRequest<'_>) -> Result<(), BackendError> {
        let configuration_json = serde_json::to_vec(request.configuration)?;
        let spawn_error = |err| BackendError::SpawnError {
            program: self.program.clone(),
            err,
        };

        log::trace!("Spawning generator {:#?} with args {:?}.", self.program, self.args);
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg("--ir-file")
            .arg(request.ir_file_path)
            .arg("--output-dir")
            .arg(request.output_root)
            .arg("--package-name")
            .arg(request.package_name)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_error)?;

        if let Some(mut stdin) = child.stdin.take() {
            // A generator that ignores its configuration may exit before
            // reading stdin; that surfaces through the exit status below.
            if let Err(err) = stdin.write_all(&configuration_json)
                && err.kind() != std::io::ErrorKind::BrokenPipe {
                drop(stdin);
                kill_and_reap(&mut child);
                return Err(spawn_error(err));
            }
        }

        let output = child.wait_with_output().map_err(spawn_error)?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            log::trace!("Generator {:#?} stdout:\n{stdout}", self.program);
        }
        if !output.status.success() {
            return Err(BackendError::ExitStatus {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(())
    }
}

/// Kills `child` if it is still running and waits for it, so an abandoned
/// generator never lingers as a running or zombie process.
pub(crate) fn kill_and_reap(child: &mut Child) {
    if let Err(err) = child.kill() {
        log::trace!("Failed to kill generator process {}: {err}", child.id());
    }
    if let Err(err) = child.wait() {
        log::trace!("Failed to reap generator process {}: {err}", child.id());
    }
}
