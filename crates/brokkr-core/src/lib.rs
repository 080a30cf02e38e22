//! # brokkr-core
//!
//! Shared plumbing for the Brokkr CLI:
//! - The [`CommandRunner`](process::CommandRunner) trait and its
//!   [`SystemRunner`](process::SystemRunner) implementation
//! - Common error types
//! - Filesystem helpers (bounded waiting, path absolutization)
//!
//! Every external process the tool spawns goes through [`process::CommandRunner`],
//! so the crates built on top of this one can be exercised with a recording
//! runner instead of real subprocesses.

pub mod error;
pub mod process;
pub mod utils;

pub use error::{Error, Result};
pub use process::{CommandOutput, CommandRunner, SystemRunner};
