//! Document discovery
//!
//! # C4 Architecture Annotations
//! @c4-component DocumentWalker
//! @c4-container Validation Core
//! @c4-description Resolves the validation target to an ordered list of document files
//! @c4-technology Rust (walkdir, glob)

use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::validation::{Diagnostic, DiagnosticCategory, ValidationResult};

/// Finds document files under a project root
#[derive(Debug, Clone)]
pub struct DocumentWalker {
    root: PathBuf,
    extension: String,
    ignore: Vec<Pattern>,
}

impl DocumentWalker {
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self { root: root.into(), extension: extension.into(), ignore: Vec::new() }
    }

    pub fn with_ignore(mut self, ignore: Vec<Pattern>) -> Self {
        self.ignore = ignore;
        self
    }

    fn has_extension(&self, path: &Path) -> bool {
        path.extension().map_or(false, |ext| ext == self.extension.as_str())
    }

    fn is_ignored(&self, path: &Path) -> bool {
        if self.ignore.is_empty() {
            return false;
        }
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        self.ignore.iter().any(|pattern| pattern.matches_path(relative))
    }

    /// Resolve the optional target, relative to the root, to document paths
    ///
    /// A target that is neither a document file nor a directory is recorded
    /// as `file_not_found` and yields no documents.
    pub fn resolve(&self, target: Option<&Path>, result: &mut ValidationResult) -> Vec<PathBuf> {
        let Some(target) = target else {
            return self.discover(&self.root, result);
        };

        let path = self.root.join(target);
        if path.is_file() && self.has_extension(&path) {
            vec![path]
        } else if path.is_dir() {
            self.discover(&path, result)
        } else {
            result.push(
                Diagnostic::error(
                    DiagnosticCategory::FileNotFound,
                    format!("Target not found: {}", target.display()),
                )
                .with_file(path.display().to_string()),
            );
            vec![]
        }
    }

    /// All documents below `start`, sorted by file name at every level
    pub fn discover(&self, start: &Path, result: &mut ValidationResult) -> Vec<PathBuf> {
        let mut documents = Vec::new();
        let walker = WalkDir::new(start)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry: &DirEntry| entry.depth() == 0 || !self.is_ignored(entry.path()));

        for entry in walker {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_file() && self.has_extension(entry.path()) {
                        documents.push(entry.into_path());
                    }
                }
                Err(error) => {
                    let file = error
                        .path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| start.display().to_string());
                    result.push(
                        Diagnostic::error(
                            DiagnosticCategory::FileError,
                            format!("Error reading directory: {error}"),
                        )
                        .with_file(file),
                    );
                }
            }
        }
        documents
    }
}
