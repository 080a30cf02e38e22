//! # brokkr-venv
//!
//! Python virtual environment provisioning for the Brokkr CLI:
//! - Create a directory-scoped virtualenv
//! - Install packages into it with its own pip
//! - Resolve and run executables located inside the environment
//!
//! Every external command goes through the
//! [`CommandRunner`](brokkr_core::CommandRunner) seam from brokkr-core; a
//! non-zero exit from any of them aborts the whole run.

pub mod error;
pub mod provisioner;

pub use error::{Error, Result};
pub use provisioner::{find_python, Provisioner};
