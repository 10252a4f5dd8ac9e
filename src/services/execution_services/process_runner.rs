use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::models::{
    error_models::ValidatorError,
    execution_models::{InputMode, ToolCommand, ToolOutput},
};

/// Runs an external checker over a snippet.
#[async_trait]
pub trait ToolRunner: Send + Sync {
    async fn run(
        &self,
        command: &ToolCommand,
        code: &str,
        timeout: Duration,
    ) -> Result<ToolOutput, ValidatorError>;
}

/// Spawns a real child process per call.
///
/// Each run gets its own scratch directory as working directory, so tools
/// that drop artifacts (`rustc --emit=metadata`) or need a source file
/// (`tsc`, `go vet`) never touch the service's cwd. The child is spawned with
/// `kill_on_drop`, so dropping the wait on timeout or on request cancellation
/// kills it; the directory goes away when the `TempDir` guard drops.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

#[async_trait]
impl ToolRunner for ProcessRunner {
    async fn run(
        &self,
        command: &ToolCommand,
        code: &str,
        timeout: Duration,
    ) -> Result<ToolOutput, ValidatorError> {
        let workspace = tempfile::tempdir().map_err(ValidatorError::Workspace)?;

        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args)
            .current_dir(workspace.path())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        match &command.input {
            InputMode::Stdin => {
                cmd.stdin(Stdio::piped());
            }
            InputMode::File(file_name) => {
                tokio::fs::write(workspace.path().join(file_name), code)
                    .await
                    .map_err(ValidatorError::Workspace)?;
                cmd.arg(file_name).stdin(Stdio::null());
            }
        }

        debug!(program = %command.program, args = ?command.args, "spawning tool");
        let mut child = cmd.spawn().map_err(|source| ValidatorError::Spawn {
            program: command.program.clone(),
            source,
        })?;

        let stdin = child.stdin.take();
        let feed = async move {
            if let Some(mut stdin) = stdin {
                // A tool may exit before reading everything; its verdict still counts.
                if let Err(e) = stdin.write_all(code.as_bytes()).await {
                    debug!("stdin closed early: {}", e);
                }
            }
        };
        let exchange = async move {
            let (_, output) = tokio::join!(feed, child.wait_with_output());
            output
        };

        match tokio::time::timeout(timeout, exchange).await {
            Ok(Ok(output)) => Ok(ToolOutput {
                status: output.status.code().unwrap_or(-1),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                timed_out: false,
            }),
            Ok(Err(source)) => Err(ValidatorError::Wait {
                program: command.program.clone(),
                source,
            }),
            Err(_) => {
                warn!(program = %command.program, ?timeout, "tool timed out, killed");
                Ok(ToolOutput::timed_out())
            }
        }
    }
}
