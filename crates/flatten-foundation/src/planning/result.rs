//! Run report produced by the rewrite loop.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Outcome for a single processed file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    pub path: PathBuf,
    pub changed: bool,
    /// Number of barrel import declarations split in this file
    pub rewritten_imports: usize,
}

/// A file that could not be processed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Accumulated result of a whole run
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RewriteReport {
    pub dry_run: bool,
    pub touched_files: usize,
    pub files: Vec<FileReport>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<FileFailure>,
}

impl RewriteReport {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    pub fn record(&mut self, file: FileReport) {
        if file.changed {
            self.touched_files += 1;
        }
        self.files.push(file);
    }

    pub fn record_failure(&mut self, failure: FileFailure) {
        self.failures.push(failure);
    }

    /// Files that were (or, in a dry run, would be) rewritten
    pub fn changed_files(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|f| f.changed)
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}
