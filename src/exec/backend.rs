// src/exec/backend.rs

//! Pluggable executor abstraction.
//!
//! The frame renderer talks to an `Executor` instead of spawning processes
//! itself, so tests can swap in a fake that returns scripted output.

use std::future::Future;
use std::io::{self, Read};
use std::pin::Pin;
use std::process::{ExitStatus, Stdio};

use tokio::process::Command;
use tracing::{debug, warn};

use crate::types::CommandSpec;

/// Combined output of one command execution.
///
/// `error` is `None` when the command ran and exited successfully.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExecOutput {
    pub output: Vec<u8>,
    pub error: Option<String>,
}

impl ExecOutput {
    pub fn success(output: impl Into<Vec<u8>>) -> Self {
        Self {
            output: output.into(),
            error: None,
        }
    }

    pub fn failure(output: impl Into<Vec<u8>>, error: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            error: Some(error.into()),
        }
    }

    pub fn failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Trait abstracting how the watched command is run.
///
/// Production code uses [`ProcessExecutor`]; tests provide their own
/// implementation that doesn't spawn real processes.
pub trait Executor: Send {
    /// Run `spec` to completion and return its combined output.
    ///
    /// Command failures are reported through [`ExecOutput::error`], never as
    /// a panic or a dropped future.
    fn execute<'a>(
        &'a mut self,
        spec: &'a CommandSpec,
    ) -> Pin<Box<dyn Future<Output = ExecOutput> + Send + 'a>>;
}

/// Real executor used in production: one child process per call.
#[derive(Debug, Clone, Default)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl Executor for ProcessExecutor {
    fn execute<'a>(
        &'a mut self,
        spec: &'a CommandSpec,
    ) -> Pin<Box<dyn Future<Output = ExecOutput> + Send + 'a>> {
        Box::pin(run_process(spec))
    }
}

async fn run_process(spec: &CommandSpec) -> ExecOutput {
    debug!(
        executable = %spec.executable,
        arguments = ?spec.arguments,
        "starting command process"
    );

    match run_combined(spec).await {
        Ok((status, combined)) => {
            debug!(
                executable = %spec.executable,
                exit_code = ?status.code(),
                bytes = combined.len(),
                "command process exited"
            );
            match status_error(status) {
                None => ExecOutput::success(combined),
                Some(error) => ExecOutput::failure(combined, error),
            }
        }
        Err(e) => {
            warn!(
                executable = %spec.executable,
                error = %e,
                "failed to run command"
            );
            ExecOutput::failure(Vec::new(), e.to_string())
        }
    }
}

/// Run `spec` with stdout and stderr attached to the same pipe, so the
/// captured bytes keep the order in which the child wrote them.
async fn run_combined(spec: &CommandSpec) -> io::Result<(ExitStatus, Vec<u8>)> {
    let (mut reader, writer) = io::pipe()?;

    let mut child = {
        let mut cmd = Command::new(&spec.executable);
        cmd.args(&spec.arguments)
            .stdin(Stdio::null())
            .stdout(writer.try_clone()?)
            .stderr(writer)
            .kill_on_drop(true);
        cmd.spawn()?
        // `cmd` drops here, closing the parent's copies of the write end.
    };

    let drain = tokio::task::spawn_blocking(move || {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).map(|_| buf)
    });

    let status = child.wait().await?;
    let combined = drain.await.map_err(io::Error::other)??;

    Ok((status, combined))
}

/// Describe a non-successful exit status, or `None` on success.
fn status_error(status: ExitStatus) -> Option<String> {
    if status.success() {
        return None;
    }
    Some(match status.code() {
        Some(code) => format!("exit status {code}"),
        None => "terminated by signal".to_string(),
    })
}
