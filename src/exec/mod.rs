// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`backend`] provides the `Executor` trait and the production
//!   `ProcessExecutor`, which tests replace with a scripted fake.
//! - [`shell`] finds the user's command processor for `--exec` mode.

pub mod backend;
pub mod shell;

pub use backend::{ExecOutput, Executor, ProcessExecutor};
