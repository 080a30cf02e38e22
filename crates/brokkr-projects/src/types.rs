//! Core types for project scaffolding

use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};

/// Layout of a generated Django project on disk.
///
/// `django-admin startproject <name> .` produces a package directory named
/// after the project inside the project root; the settings and routing
/// files live there.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    /// Project name (also the inner package name)
    pub name: String,
    /// Absolute project root directory
    pub root: Utf8PathBuf,
}

impl ProjectLayout {
    /// Create a layout for a project rooted at `root`
    pub fn new(name: impl Into<String>, root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
        }
    }

    /// The inner package directory holding settings and urls
    pub fn package_dir(&self) -> Utf8PathBuf {
        self.root.join(&self.name)
    }

    /// Path to the generated settings file
    pub fn settings_path(&self) -> Utf8PathBuf {
        self.package_dir().join("settings.py")
    }

    /// Path to the generated project routing file
    pub fn urls_path(&self) -> Utf8PathBuf {
        self.package_dir().join("urls.py")
    }

    /// Path to `manage.py`
    pub fn manage_path(&self) -> Utf8PathBuf {
        self.root.join("manage.py")
    }

    /// Directory of a generated app
    pub fn app_dir(&self, app: &str) -> Utf8PathBuf {
        self.root.join(app)
    }

    /// Global templates directory
    pub fn templates_dir(&self) -> Utf8PathBuf {
        self.root.join("templates")
    }

    /// Global static directory
    pub fn static_dir(&self) -> Utf8PathBuf {
        self.root.join("static")
    }

    /// Borrow the project root
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}

/// Validate a project or app name.
///
/// Django requires names to be importable Python identifiers: ASCII
/// letters, digits and underscores, not starting with a digit.
///
/// # Errors
/// Returns [`Error::InvalidName`] when the name does not qualify.
pub fn validate_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(Error::invalid_name(name))
    }
}
