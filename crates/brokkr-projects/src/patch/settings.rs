//! Patches for the generated `settings.py`
//!
//! Semantics mirror what a maintainer would do by hand: make sure the
//! `os`/`BASE_DIR` prerequisites exist, register the app as the first
//! installed app, and wire the template/static directory settings. All of
//! it is guarded, so every function here can run any number of times.

use super::SourceFile;
use crate::error::Result;
use regex::Regex;

const OS_IMPORT: &str = "import os";
const BASE_DIR_DECL: &str =
    "BASE_DIR = os.path.dirname(os.path.dirname(os.path.abspath(__file__)))";
const INSTALLED_APPS_HEADER: &str = "INSTALLED_APPS = [";
const TEMPLATE_DIRS_EXPR: &str = "os.path.join(BASE_DIR, 'templates')";

/// Ensure `import os` and the derived `BASE_DIR` constant exist.
///
/// The import is prepended when absent; `BASE_DIR` is inserted right
/// after it so the declaration always follows its prerequisite.
pub fn ensure_base_path(settings: &mut SourceFile) {
    settings.ensure_import(OS_IMPORT);
    settings.ensure_after(OS_IMPORT, BASE_DIR_DECL, "BASE_DIR = ");
}

/// Register `app` in `INSTALLED_APPS`.
///
/// The entry becomes the list's first element. Registration is skipped
/// when the app name appears anywhere in the file already; if the list is
/// entirely absent a fresh one holding only the app is appended.
pub fn register_app(settings: &mut SourceFile, app: &str) {
    if settings.contains(app) {
        return;
    }

    if settings.contains(INSTALLED_APPS_HEADER) {
        settings.ensure_list_entry(INSTALLED_APPS_HEADER, &format!("'{app}',"), app);
    } else {
        settings.ensure_trailing(
            "INSTALLED_APPS",
            &format!("INSTALLED_APPS = [\n    '{app}',\n]"),
        );
    }
}

/// Wire template and static file settings.
///
/// Rewrites the first `'DIRS': [...]` entry of `TEMPLATES` to point at
/// the project-level templates directory and appends the static file
/// settings that are missing.
///
/// # Errors
/// Returns an error only if the directories pattern fails to compile.
pub fn configure_assets(settings: &mut SourceFile) -> Result<()> {
    let dirs_pattern = Regex::new(r"(?s)'DIRS'\s*:\s*\[(.*?)\]")?;
    settings.ensure_block_rewrite(
        &dirs_pattern,
        &format!("'DIRS': [{TEMPLATE_DIRS_EXPR}]"),
        TEMPLATE_DIRS_EXPR,
    );

    settings.ensure_trailing(
        "STATICFILES_DIRS",
        "STATICFILES_DIRS = [os.path.join(BASE_DIR, 'static')]",
    );
    settings.ensure_trailing("STATIC_URL", "STATIC_URL = '/static/'");
    settings.ensure_trailing(
        "STATIC_ROOT",
        "STATIC_ROOT = os.path.join(BASE_DIR, 'staticfiles')",
    );

    Ok(())
}
