// src/exec/shell.rs

//! Lookup of the user's command processor for `--exec` mode.
//!
//! The processor is the executable of the process that started `pwatch`.
//! `SHELL` / `COMSPEC` is only consulted when that cannot be determined.

use std::path::Path;

use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};
use tracing::debug;

use crate::errors::{PwatchError, Result};

/// Environment variable naming the user's command processor.
#[cfg(windows)]
pub const SHELL_ENV_VAR: &str = "COMSPEC";
#[cfg(not(windows))]
pub const SHELL_ENV_VAR: &str = "SHELL";

/// Where the command processor is looked up. The fields are plain function
/// pointers so tests can substitute fixed answers.
#[derive(Clone, Copy)]
pub struct ProcessorLookup {
    /// Executable path of the parent process.
    pub parent_executable: fn() -> Option<String>,
    /// Environment variable lookup, used as a fallback.
    pub env_var: fn(&str) -> Option<String>,
}

impl ProcessorLookup {
    /// Look at the real parent process and the real environment.
    pub fn system() -> Self {
        Self {
            parent_executable,
            env_var: |name| std::env::var(name).ok(),
        }
    }
}

impl std::fmt::Debug for ProcessorLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessorLookup").finish_non_exhaustive()
    }
}

/// Executable path of the process that spawned us, if the OS will tell.
pub fn parent_executable() -> Option<String> {
    let pid = sysinfo::get_current_pid().ok()?;
    let mut system = System::new();

    let parent = refreshed(&mut system, pid)?.parent()?;
    let exe = refreshed(&mut system, parent)?.exe()?;

    let exe = exe.to_string_lossy().into_owned();
    (!exe.trim().is_empty()).then_some(exe)
}

fn refreshed(system: &mut System, pid: Pid) -> Option<&sysinfo::Process> {
    system.refresh_processes_specifics(
        ProcessesToUpdate::Some(&[pid]),
        true,
        ProcessRefreshKind::everything(),
    );
    system.process(pid)
}

/// Find the command processor: the parent process first, then
/// [`SHELL_ENV_VAR`].
pub fn resolve_command_processor(lookup: &ProcessorLookup) -> Result<String> {
    if let Some(exe) = (lookup.parent_executable)() {
        debug!(processor = %exe, "using parent process as command processor");
        return Ok(exe);
    }

    match (lookup.env_var)(SHELL_ENV_VAR) {
        Some(shell) if !shell.trim().is_empty() => {
            debug!(
                processor = %shell,
                variable = SHELL_ENV_VAR,
                "parent process unknown, using environment"
            );
            Ok(shell)
        }
        _ => Err(PwatchError::CommandProcessor(format!(
            "parent process executable unknown and {SHELL_ENV_VAR} is not set"
        ))),
    }
}

/// Flag that makes `shell` run a command string: `/C` for `cmd`, `-c` for
/// everything else.
pub fn command_flag(shell: &str) -> &'static str {
    let stem = Path::new(shell)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(shell);

    // `Path` does not split on `\` off Windows.
    let stem = stem.rsplit('\\').next().unwrap_or(stem);

    if stem.eq_ignore_ascii_case("cmd") {
        "/C"
    } else {
        "-c"
    }
}
