//! `brokkr doctor` command handler
//!
//! Checks the external tooling the bootstrapper depends on: a Python
//! interpreter and a working `venv` module.

use anyhow::{anyhow, Result};
use serde::Serialize;
use std::sync::Arc;

use brokkr_core::{CommandRunner, SystemRunner};
use brokkr_venv::find_python;

use crate::cli::DoctorArgs;
use crate::output;

/// Diagnostic report for the required tooling
#[derive(Debug, Serialize)]
struct DoctorReport {
    /// Resolved interpreter path, if any
    python: Option<String>,
    /// Reported interpreter version
    version: Option<String>,
    /// Whether the venv module responds
    venv_module: bool,
}

impl DoctorReport {
    fn healthy(&self) -> bool {
        self.python.is_some() && self.venv_module
    }
}

/// Check that required tooling is available
pub async fn run(args: DoctorArgs) -> Result<()> {
    let runner = Arc::new(SystemRunner::new());
    let report = collect_report(runner).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        output::header("Brokkr Doctor");
        match (&report.python, &report.version) {
            (Some(path), Some(version)) => {
                output::success(&format!("{version} ({path})"));
            }
            (Some(path), None) => {
                output::warning(&format!("Python found at {path} but --version failed"));
            }
            _ => output::warning("No Python interpreter found on PATH"),
        }

        if report.venv_module {
            output::success("venv module available");
        } else {
            output::warning("venv module unavailable");
        }
    }

    if report.healthy() {
        Ok(())
    } else {
        Err(anyhow!("Required Python tooling is missing"))
    }
}

async fn collect_report(runner: Arc<dyn CommandRunner>) -> DoctorReport {
    let Ok(python) = find_python() else {
        return DoctorReport {
            python: None,
            version: None,
            venv_module: false,
        };
    };

    let version = runner
        .run(python.as_str(), &["--version"], None)
        .await
        .ok()
        .map(|out| {
            let line = if out.stdout.trim().is_empty() {
                out.stderr
            } else {
                out.stdout
            };
            line.trim().to_string()
        });

    let venv_module = runner
        .run(python.as_str(), &["-m", "venv", "--help"], None)
        .await
        .is_ok();

    DoctorReport {
        python: Some(python.into_string()),
        version,
        venv_module,
    }
}
