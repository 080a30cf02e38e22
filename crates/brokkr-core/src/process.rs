//! External command execution
//!
//! All subprocess spawning in Brokkr goes through the [`CommandRunner`]
//! trait. Production code uses [`SystemRunner`]; tests substitute a
//! recording implementation so scaffolding and provisioning logic can be
//! verified without touching real interpreters.

use crate::error::{Error, Result};
use async_trait::async_trait;
use camino::Utf8Path;
use tokio::process::Command;
use tracing::debug;

/// Captured output of a completed command
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

/// Trait for running external commands
///
/// Commands block until completion from the caller's perspective; a
/// non-zero exit becomes an error carrying the command's stderr. There is
/// no retry at this layer.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args`, optionally in `cwd`.
    ///
    /// # Returns
    /// The captured stdout/stderr on success.
    ///
    /// # Errors
    /// Returns an error if the program cannot be spawned or exits
    /// unsuccessfully.
    async fn run(
        &self,
        program: &str,
        args: &[&str],
        cwd: Option<&Utf8Path>,
    ) -> Result<CommandOutput>;
}

/// Runner backed by real subprocesses via `tokio::process`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    /// Create a new system runner
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(
        &self,
        program: &str,
        args: &[&str],
        cwd: Option<&Utf8Path>,
    ) -> Result<CommandOutput> {
        let rendered = render_command(program, args);
        debug!("Running: {} (cwd: {:?})", rendered, cwd);

        let mut cmd = Command::new(program);
        cmd.args(args);
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }

        let output = cmd
            .output()
            .await
            .map_err(|e| Error::spawn(rendered.clone(), e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(Error::command_failed(
                rendered,
                output.status.to_string(),
                stderr,
            ));
        }

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

fn render_command(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    #[tokio::test]
    #[cfg(unix)]
    async fn test_run_captures_stdout() {
        let runner = SystemRunner::new();
        let output = runner.run("echo", &["hello"], None).await.unwrap();
        assert_eq!(output.stdout.trim(), "hello");
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn test_run_honors_cwd() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::write(temp.path().join("marker.txt"), "x").unwrap();
        let cwd = Utf8PathBuf::try_from(temp.path().to_path_buf()).unwrap();

        let runner = SystemRunner::new();
        let output = runner.run("ls", &[], Some(&cwd)).await.unwrap();
        assert!(output.stdout.contains("marker.txt"));
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn test_nonzero_exit_is_fatal() {
        let runner = SystemRunner::new();
        let err = runner.run("false", &[], None).await.unwrap_err();
        assert!(matches!(err, Error::CommandFailed { .. }));
    }

    #[tokio::test]
    async fn test_missing_binary_is_spawn_error() {
        let runner = SystemRunner::new();
        let err = runner
            .run("brokkr-test-no-such-binary-1234", &[], None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Spawn { .. }));
    }

    #[test]
    fn test_render_command() {
        assert_eq!(render_command("git", &[]), "git");
        assert_eq!(render_command("git", &["init", "."]), "git init .");
    }
}
