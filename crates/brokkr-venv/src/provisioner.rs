//! Virtual environment creation and command execution
//!
//! A [`Provisioner`] owns one project-scoped virtualenv: it creates the
//! environment, installs packages into it, and runs executables resolved
//! from inside it (`bin/` on unix, `Scripts/` with an `.exe` suffix on
//! windows).

use crate::error::{Error, Result};
use brokkr_core::{CommandOutput, CommandRunner};
use camino::{Utf8Path, Utf8PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Interpreter names probed on PATH, in order of preference
const PYTHON_CANDIDATES: &[&str] = &["python3", "python"];

/// Locate a Python interpreter on PATH.
///
/// # Errors
/// Returns [`Error::PythonNotFound`] if no candidate interpreter resolves.
pub fn find_python() -> Result<Utf8PathBuf> {
    for candidate in PYTHON_CANDIDATES {
        if let Ok(path) = which::which(candidate) {
            debug!("Found Python interpreter: {}", path.display());
            return Utf8PathBuf::from_path_buf(path.clone())
                .map_err(|_| Error::non_utf8_interpreter(path.to_string_lossy().into_owned()));
        }
    }
    Err(Error::PythonNotFound)
}

/// Manages a single project-scoped Python virtual environment
pub struct Provisioner {
    /// Project directory the environment lives under
    project_dir: Utf8PathBuf,
    /// Full path to the virtualenv directory
    venv_dir: Utf8PathBuf,
    /// Command execution seam
    runner: Arc<dyn CommandRunner>,
}

impl Provisioner {
    /// Create a provisioner for `<project_dir>/<venv_name>`.
    ///
    /// Nothing touches disk until [`create`](Self::create) runs. The
    /// project directory should be absolute so commands launched with a
    /// different working directory still resolve the environment.
    pub fn new(
        project_dir: impl Into<Utf8PathBuf>,
        venv_name: &str,
        runner: Arc<dyn CommandRunner>,
    ) -> Self {
        let project_dir = project_dir.into();
        let venv_dir = project_dir.join(venv_name);
        Self {
            project_dir,
            venv_dir,
            runner,
        }
    }

    /// Path to the virtualenv directory
    pub fn venv_dir(&self) -> &Utf8Path {
        &self.venv_dir
    }

    /// Directory holding the environment's executables
    fn scripts_dir(&self) -> Utf8PathBuf {
        if cfg!(windows) {
            self.venv_dir.join("Scripts")
        } else {
            self.venv_dir.join("bin")
        }
    }

    /// Full path to an executable inside the environment
    pub fn script(&self, name: &str) -> Utf8PathBuf {
        if cfg!(windows) {
            self.scripts_dir().join(format!("{name}.exe"))
        } else {
            self.scripts_dir().join(name)
        }
    }

    /// Path to the environment's Python interpreter
    pub fn python(&self) -> Utf8PathBuf {
        self.script("python")
    }

    /// Path to the environment's pip
    pub fn pip(&self) -> Utf8PathBuf {
        self.script("pip")
    }

    /// Create the virtual environment.
    ///
    /// Creates the project directory if needed, then runs
    /// `python -m venv <venv_dir>` with an interpreter discovered on PATH.
    ///
    /// # Errors
    /// Returns an error if no interpreter is found, the project directory
    /// cannot be created, or venv creation exits non-zero.
    pub async fn create(&self) -> Result<()> {
        let python = find_python()?;
        self.create_with_interpreter(&python).await
    }

    /// Create the virtual environment with an explicit interpreter.
    pub async fn create_with_interpreter(&self, python: &Utf8Path) -> Result<()> {
        std::fs::create_dir_all(&self.project_dir)?;

        info!("Creating virtual environment at {}", self.venv_dir);
        self.runner
            .run(python.as_str(), &["-m", "venv", self.venv_dir.as_str()], None)
            .await?;

        Ok(())
    }

    /// Install a package into the environment with its pip.
    ///
    /// # Errors
    /// Returns an error if pip exits non-zero.
    pub async fn install(&self, package: &str) -> Result<()> {
        info!("Installing {} into {}", package, self.venv_dir);
        self.runner
            .run(self.pip().as_str(), &["install", package], None)
            .await?;
        Ok(())
    }

    /// Run an executable located inside the environment.
    ///
    /// The program name is resolved to its full path inside the
    /// environment; arguments are forwarded as-is.
    ///
    /// # Errors
    /// Returns an error if the command cannot be spawned or exits
    /// non-zero. Failure propagates to the caller; there is no retry.
    pub async fn run(
        &self,
        program: &str,
        args: &[&str],
        cwd: Option<&Utf8Path>,
    ) -> Result<CommandOutput> {
        let exe = self.script(program);
        Ok(self.runner.run(exe.as_str(), args, cwd).await?)
    }

    /// Run the environment's Python interpreter with the given arguments.
    pub async fn run_python(&self, args: &[&str], cwd: Option<&Utf8Path>) -> Result<CommandOutput> {
        Ok(self
            .runner
            .run(self.python().as_str(), args, cwd)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use brokkr_core::Error as CoreError;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    struct RecordedCall {
        program: String,
        args: Vec<String>,
        cwd: Option<Utf8PathBuf>,
    }

    /// Runner that records every invocation and always succeeds
    #[derive(Default)]
    struct RecordingRunner {
        calls: Mutex<Vec<RecordedCall>>,
    }

    impl RecordingRunner {
        fn calls(&self) -> Vec<RecordedCall> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CommandRunner for RecordingRunner {
        async fn run(
            &self,
            program: &str,
            args: &[&str],
            cwd: Option<&Utf8Path>,
        ) -> brokkr_core::Result<CommandOutput> {
            self.calls.lock().unwrap().push(RecordedCall {
                program: program.to_string(),
                args: args.iter().map(|s| s.to_string()).collect(),
                cwd: cwd.map(Utf8Path::to_path_buf),
            });
            Ok(CommandOutput::default())
        }
    }

    /// Runner whose every command fails
    struct FailingRunner;

    #[async_trait]
    impl CommandRunner for FailingRunner {
        async fn run(
            &self,
            program: &str,
            _args: &[&str],
            _cwd: Option<&Utf8Path>,
        ) -> brokkr_core::Result<CommandOutput> {
            Err(CoreError::command_failed(program, "exit status: 1", "boom"))
        }
    }

    fn temp_provisioner(runner: Arc<dyn CommandRunner>) -> (tempfile::TempDir, Provisioner) {
        let temp = tempfile::TempDir::new().unwrap();
        let root = Utf8PathBuf::try_from(temp.path().join("mysite")).unwrap();
        let provisioner = Provisioner::new(root, "venv", runner);
        (temp, provisioner)
    }

    #[test]
    #[cfg(unix)]
    fn test_script_paths_use_bin_dir() {
        let (_temp, venv) = temp_provisioner(Arc::new(RecordingRunner::default()));

        assert!(venv.python().as_str().ends_with("mysite/venv/bin/python"));
        assert!(venv.pip().as_str().ends_with("mysite/venv/bin/pip"));
        assert!(venv
            .script("django-admin")
            .as_str()
            .ends_with("mysite/venv/bin/django-admin"));
    }

    #[tokio::test]
    async fn test_create_runs_venv_module() {
        let runner = Arc::new(RecordingRunner::default());
        let (_temp, venv) = temp_provisioner(runner.clone());

        venv.create_with_interpreter(Utf8Path::new("/usr/bin/python3"))
            .await
            .unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, "/usr/bin/python3");
        assert_eq!(
            calls[0].args,
            vec!["-m", "venv", venv.venv_dir().as_str()]
        );
        // Project directory is created before the interpreter runs
        assert!(venv.venv_dir().parent().unwrap().is_dir());
    }

    #[tokio::test]
    async fn test_install_uses_environment_pip() {
        let runner = Arc::new(RecordingRunner::default());
        let (_temp, venv) = temp_provisioner(runner.clone());

        venv.install("django").await.unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, venv.pip().as_str());
        assert_eq!(calls[0].args, vec!["install", "django"]);
    }

    #[tokio::test]
    async fn test_run_resolves_program_and_forwards_cwd() {
        let runner = Arc::new(RecordingRunner::default());
        let (_temp, venv) = temp_provisioner(runner.clone());
        let cwd = venv.venv_dir().parent().unwrap().to_path_buf();

        venv.run(
            "django-admin",
            &["startproject", "mysite", "."],
            Some(cwd.as_path()),
        )
            .await
            .unwrap();

        let calls = runner.calls();
        assert_eq!(calls[0].program, venv.script("django-admin").as_str());
        assert_eq!(calls[0].args, vec!["startproject", "mysite", "."]);
        assert_eq!(calls[0].cwd.as_deref(), Some(cwd.as_path()));
    }

    #[tokio::test]
    async fn test_command_failure_propagates() {
        let (_temp, venv) = temp_provisioner(Arc::new(FailingRunner));

        let err = venv.install("django").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Core(CoreError::CommandFailed { .. })
        ));
    }
}
