//! Driving Django's generators
//!
//! This module invokes `django-admin` and `manage.py` inside the
//! provisioned virtualenv and fills in the pieces Django's generators do
//! not produce: the per-app `urls.py` stub and the global template/static
//! directories. Generation is fully sequential; the first failing command
//! aborts the run.

use crate::error::Result;
use crate::types::ProjectLayout;
use brokkr_core::utils::{wait_for_dir, DEFAULT_WAIT_ATTEMPTS, DEFAULT_WAIT_INTERVAL};
use brokkr_venv::Provisioner;
use camino::Utf8Path;
use tracing::{debug, info};

/// Stub routing file written into freshly generated apps
const APP_URLS_STUB: &str = "from django.urls import path\n\nurlpatterns = []\n";

/// Starter page for the global templates directory
const INDEX_HTML: &str = "<h1>Welcome to your Django project!</h1>\n";

/// Runs Django's project and app generators for one project
pub struct Scaffolder {
    layout: ProjectLayout,
    venv: Provisioner,
}

impl Scaffolder {
    /// Create a scaffolder for `layout`, running commands through `venv`
    pub fn new(layout: ProjectLayout, venv: Provisioner) -> Self {
        Self { layout, venv }
    }

    /// The project layout being scaffolded
    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// Generate the project skeleton.
    ///
    /// Runs `django-admin startproject <name> .` inside the project root,
    /// creating the root first.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or the
    /// generator exits non-zero.
    pub async fn start_project(&self) -> Result<()> {
        info!("Creating Django project: {}", self.layout.name);
        std::fs::create_dir_all(&self.layout.root)?;

        self.venv
            .run(
                "django-admin",
                &["startproject", &self.layout.name, "."],
                Some(self.layout.root()),
            )
            .await?;

        Ok(())
    }

    /// Generate an app and its routing stub.
    ///
    /// Runs `manage.py startapp <app>`, waits (bounded) for the app
    /// directory to appear, then writes the app's `urls.py` if the
    /// generator did not.
    ///
    /// # Errors
    /// Returns an error if the generator fails or the app directory never
    /// appears within the bounded wait.
    pub async fn start_app(&self, app: &str) -> Result<()> {
        info!("Creating app: {}", app);
        self.venv
            .run_python(&["manage.py", "startapp", app], Some(self.layout.root()))
            .await?;

        let app_dir = self.layout.app_dir(app);
        wait_for_dir(&app_dir, DEFAULT_WAIT_ATTEMPTS, DEFAULT_WAIT_INTERVAL).await?;

        self.write_app_urls(&app_dir)?;
        Ok(())
    }

    fn write_app_urls(&self, app_dir: &Utf8Path) -> Result<()> {
        let urls_path = app_dir.join("urls.py");
        if urls_path.exists() {
            debug!("App urls already present: {}", urls_path);
            return Ok(());
        }
        std::fs::write(&urls_path, APP_URLS_STUB)?;
        Ok(())
    }

    /// Create the global `templates/` and `static/` directories plus a
    /// starter index page (written only when absent).
    pub fn create_asset_dirs(&self) -> Result<()> {
        std::fs::create_dir_all(self.layout.static_dir())?;
        std::fs::create_dir_all(self.layout.templates_dir())?;

        let index = self.layout.templates_dir().join("index.html");
        if !index.exists() {
            std::fs::write(&index, INDEX_HTML)?;
        }
        Ok(())
    }

    /// Run `makemigrations` followed by `migrate`.
    ///
    /// # Errors
    /// Returns an error as soon as either command exits non-zero.
    pub async fn run_migrations(&self) -> Result<()> {
        info!("Running migrations for {}", self.layout.name);
        self.venv
            .run_python(&["manage.py", "makemigrations"], Some(self.layout.root()))
            .await?;
        self.venv
            .run_python(&["manage.py", "migrate"], Some(self.layout.root()))
            .await?;
        Ok(())
    }
}
