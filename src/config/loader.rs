// src/config/loader.rs

use tracing::debug;

use crate::cli::CliArgs;
use crate::config::model::WatchConfig;
use crate::errors::{PwatchError, Result};
use crate::exec::shell::{ProcessorLookup, command_flag, resolve_command_processor};
use crate::types::CommandSpec;

/// Validate the CLI arguments and resolve the command to run.
///
/// This is the recommended entry point for the rest of the application.
/// Checks run in this order:
///
/// - a command was given at all,
/// - the interval is a positive, finite number of seconds,
/// - in `--exec` mode, the command processor can be found via `lookup`.
pub fn load_and_validate(
    args: &CliArgs,
    lookup: &ProcessorLookup,
) -> Result<(WatchConfig, CommandSpec)> {
    if args.command.is_empty() {
        return Err(PwatchError::NoCommand);
    }

    let config = WatchConfig::try_from(args.raw_config())?;
    let command = resolve_command(&args.command, args.run_with_shell, lookup)?;

    debug!(
        executable = %command.executable,
        arguments = ?command.arguments,
        interval_ms = config.interval().as_millis() as u64,
        precise = config.precise(),
        "configuration loaded"
    );

    Ok((config, command))
}

/// Turn the trailing command-line words into a [`CommandSpec`].
///
/// Without `run_with_shell` the first word is executed directly. With it,
/// the whole command line is handed to the user's command processor as a
/// single string.
pub fn resolve_command(
    words: &[String],
    run_with_shell: bool,
    lookup: &ProcessorLookup,
) -> Result<CommandSpec> {
    let (first, rest) = words.split_first().ok_or(PwatchError::NoCommand)?;

    if !run_with_shell {
        return Ok(CommandSpec::new(first.clone(), rest.to_vec()));
    }

    let shell = resolve_command_processor(lookup)?;
    let flag = command_flag(&shell);
    Ok(CommandSpec::new(
        shell,
        vec![flag.to_string(), words.join(" ")],
    ))
}
