//! Resource bundle lookup.
//!
//! A bundle is a directory of read-only files shipped with the application.
//! Lookups take a logical `base.ext` file name and never leave the bundle root.

use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Directory holding the packaged resources.
#[derive(Debug, Clone)]
pub struct ResourceBundle {
    root: PathBuf,
}

/// A resolved, readable location inside a [`ResourceBundle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLocation {
    path: PathBuf,
}

impl ResourceLocation {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for ResourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Split a file name into base name and extension at the first `.`.
///
/// `"InstaCats.json"` gives `("InstaCats", "json")` and `"a.b.json"` gives
/// `("a", "b.json")`. Returns `None` when there is no `.` or either side is
/// empty.
pub fn split_file_name(file_name: &str) -> Option<(&str, &str)> {
    let (base, extension) = file_name.split_once('.')?;
    if base.is_empty() || extension.is_empty() {
        return None;
    }
    Some((base, extension))
}

impl ResourceBundle {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `file_name` to a location inside the bundle.
    ///
    /// Returns `None` rather than an error for every failure: unsplittable
    /// names, names with path components, and names that do not refer to a
    /// regular file in the bundle.
    pub fn locate(&self, file_name: &str) -> Option<ResourceLocation> {
        let (base, extension) = split_file_name(file_name)?;

        // SEC: a logical resource name is a single path component
        let candidate = Path::new(file_name);
        let mut components = candidate.components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => {}
            _ => {
                tracing::debug!(file_name, "Resource name is not a plain file name");
                return None;
            }
        }

        let path = self.root.join(format!("{}.{}", base, extension));
        match std::fs::metadata(&path) {
            Ok(meta) if meta.is_file() => {
                tracing::debug!(path = %path.display(), "Located resource");
                Some(ResourceLocation { path })
            }
            Ok(_) => {
                tracing::debug!(path = %path.display(), "Resource is not a regular file");
                None
            }
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Resource not found");
                None
            }
        }
    }

    /// List the `(base, extension)` pairs of every file in the bundle, sorted.
    ///
    /// Entries whose names are not valid UTF-8 or cannot be split are left out.
    /// An unreadable bundle root yields an empty index.
    pub fn index(&self) -> Vec<(String, String)> {
        let entries = match std::fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(root = %self.root.display(), error = %e, "Failed to read resource bundle");
                return Vec::new();
            }
        };

        let mut index: Vec<(String, String)> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .filter_map(|entry| {
                let name = entry.file_name().into_string().ok()?;
                let (base, extension) = split_file_name(&name)?;
                Some((base.to_string(), extension.to_string()))
            })
            .collect();
        index.sort();
        index
    }
}
