// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

use crate::types::exit_codes;

#[derive(Error, Debug)]
pub enum PwatchError {
    #[error("must include a command to run")]
    NoCommand,

    #[error("use the native watch command instead of this (platform: {0})")]
    UnsupportedPlatform(String),

    #[error("error getting parent command processor: {0}")]
    CommandProcessor(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PwatchError {
    /// Process exit code reported for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            PwatchError::NoCommand => exit_codes::NO_COMMAND,
            PwatchError::UnsupportedPlatform(_) => exit_codes::UNSUPPORTED_PLATFORM,
            PwatchError::CommandProcessor(_) => exit_codes::COMMAND_PROCESSOR,
            PwatchError::ConfigError(_) => exit_codes::INVALID_ARGUMENTS,
            PwatchError::IoError(_) | PwatchError::Other(_) => exit_codes::INTERNAL,
        }
    }
}

pub type Result<T> = std::result::Result<T, PwatchError>;
