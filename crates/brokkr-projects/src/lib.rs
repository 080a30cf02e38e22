//! # brokkr-projects
//!
//! Django project scaffolding for the Brokkr CLI:
//! - Drive Django's own generators (`django-admin startproject`,
//!   `manage.py startapp`) inside a provisioned virtualenv
//! - Idempotently patch the generated `settings.py` and `urls.py`
//! - Run schema migrations
//!
//! The patching engine treats the generated files as opaque text with
//! known markers; every patch is safe to apply any number of times and
//! never reformats unrelated content.
//!
//! # Examples
//!
//! ## Register an app in a settings file
//!
//! ```no_run
//! use brokkr_projects::patch::{settings, SourceFile};
//!
//! # fn example() -> brokkr_projects::Result<()> {
//! let mut file = SourceFile::load("mysite/mysite/settings.py")?;
//! settings::ensure_base_path(&mut file);
//! settings::register_app(&mut file, "blog");
//! file.save()?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod patch;
pub mod scaffold;
pub mod types;

pub use error::{Error, Result};
pub use scaffold::Scaffolder;
pub use types::{validate_name, ProjectLayout};
