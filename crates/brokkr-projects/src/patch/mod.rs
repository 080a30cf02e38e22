//! Idempotent text patching of generated source files
//!
//! Django's generated files are treated as opaque text with known marker
//! substrings. Every operation here is guarded so applying it twice
//! yields byte-identical output to applying it once, and none of them
//! reformat or reorder unrelated content.
//!
//! [`SourceFile`] is a whole-file read-modify-write wrapper: the file is
//! read once, patched in memory, and rewritten in a single overwrite only
//! when something actually changed.

pub mod settings;
pub mod urls;

use crate::error::Result;
use camino::{Utf8Path, Utf8PathBuf};
use regex::Regex;
use tracing::debug;

/// A text file loaded for in-memory patching
#[derive(Debug)]
pub struct SourceFile {
    path: Utf8PathBuf,
    content: String,
    dirty: bool,
}

impl SourceFile {
    /// Load a file from disk.
    ///
    /// # Errors
    /// Returns an IO error if the file cannot be read; missing files and
    /// permission failures are fatal to the run.
    pub fn load(path: impl Into<Utf8PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)?;
        Ok(Self {
            path,
            content,
            dirty: false,
        })
    }

    /// Build a source file from in-memory content, without touching disk.
    ///
    /// Saving will create the file at `path`.
    pub fn from_content(path: impl Into<Utf8PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            dirty: false,
        }
    }

    /// The path this file was loaded from
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Current (possibly patched) content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Whether the content contains `needle` anywhere
    pub fn contains(&self, needle: &str) -> bool {
        self.content.contains(needle)
    }

    /// Write the content back if any patch changed it.
    ///
    /// A single overwrite of the whole file; there is no temp-file/rename
    /// discipline and no partial-write recovery.
    ///
    /// # Returns
    /// `true` if the file was rewritten, `false` if nothing had changed.
    pub fn save(&mut self) -> Result<bool> {
        if !self.dirty {
            return Ok(false);
        }
        std::fs::write(&self.path, &self.content)?;
        self.dirty = false;
        debug!("Patched {}", self.path);
        Ok(true)
    }

    fn set(&mut self, next: String) {
        if next != self.content {
            self.content = next;
            self.dirty = true;
        }
    }

    /// Prepend `statement` (an import line) if it is absent.
    pub fn ensure_import(&mut self, statement: &str) {
        if self.contains(statement) {
            return;
        }
        self.set(format!("{statement}\n{}", self.content));
    }

    /// Insert `line` immediately after the first occurrence of `anchor`,
    /// unless `guard` is already present.
    ///
    /// If the anchor is missing the line is appended at the end instead,
    /// so the declaration still ends up in the file.
    pub fn ensure_after(&mut self, anchor: &str, line: &str, guard: &str) {
        if self.contains(guard) {
            return;
        }
        if self.contains(anchor) {
            let next = self.content.replacen(anchor, &format!("{anchor}\n{line}"), 1);
            self.set(next);
        } else {
            self.set(format!("{}\n{line}\n", self.content));
        }
    }

    /// Insert `entry` as the new first element of the list opened by
    /// `header` (for example `INSTALLED_APPS = [`), unless `guard` is
    /// already present anywhere in the file.
    ///
    /// Does nothing when the header itself is absent; callers fall back to
    /// [`ensure_trailing`](Self::ensure_trailing) for that case.
    pub fn ensure_list_entry(&mut self, header: &str, entry: &str, guard: &str) {
        if self.contains(guard) {
            return;
        }
        if self.contains(header) {
            let next = self
                .content
                .replacen(header, &format!("{header}\n    {entry}"), 1);
            self.set(next);
        }
    }

    /// Rewrite the first match of `pattern` to `replacement`, unless the
    /// matched block already contains `guard`.
    ///
    /// Used for structural markers such as an empty directories list
    /// inside a larger block.
    pub fn ensure_block_rewrite(&mut self, pattern: &Regex, replacement: &str, guard: &str) {
        let Some(found) = pattern.find(&self.content) else {
            return;
        };
        if self.content[found.range()].contains(guard) {
            return;
        }
        let next = pattern.replacen(&self.content, 1, replacement).into_owned();
        self.set(next);
    }

    /// Append `declaration` at end of file if `guard` (typically the
    /// setting's name) is entirely absent.
    pub fn ensure_trailing(&mut self, guard: &str, declaration: &str) {
        if self.contains(guard) {
            return;
        }
        self.set(format!("{}\n{declaration}\n", self.content));
    }

    /// Append a multi-line `block` once, keyed on the absence of `guard`.
    pub fn ensure_append_once(&mut self, guard: &str, block: &str) {
        if self.contains(guard) {
            return;
        }
        self.set(format!("{}{block}", self.content));
    }

    /// Replace the first occurrence of `from` with `to`.
    pub fn replace_first(&mut self, from: &str, to: &str) {
        if !self.contains(from) {
            return;
        }
        let next = self.content.replacen(from, to, 1);
        self.set(next);
    }

    /// Rewrite every match of `pattern` with `replacement`.
    pub fn rewrite(&mut self, pattern: &Regex, replacement: &str) {
        let next = pattern.replace_all(&self.content, replacement).into_owned();
        self.set(next);
    }
}
