//! Sequential rewrite loop over a set of files
//!
//! Each file is read, parsed, rewritten and (unless dry-running) written back
//! on its own. A failure is recorded in the report and the loop moves on to
//! the next file.

use crate::classifier::BarrelClassifier;
use crate::engine::{rewrite_source, SourceRewrite};
use flatten_config::FlattenConfig;
use flatten_foundation::planning::{FileFailure, FileReport, RewriteReport};
use flatten_foundation::{FlattenResult, ImportSyntax};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Loading and persistence of source files
pub trait SourceStore {
    fn read(&self, path: &Path) -> FlattenResult<String>;
    fn write(&self, path: &Path, content: &str) -> FlattenResult<()>;
}

/// Drives the rewrite of many files with one configuration
pub struct Rewriter<'a> {
    classifier: BarrelClassifier,
    syntax: &'a dyn ImportSyntax,
    dry_run: bool,
}

impl<'a> Rewriter<'a> {
    pub fn new(config: &FlattenConfig, syntax: &'a dyn ImportSyntax) -> Self {
        Self {
            classifier: BarrelClassifier::new(config),
            syntax,
            dry_run: config.dry_run,
        }
    }

    /// Rewrite `content` in memory without any I/O
    pub fn rewrite(&self, path: &Path, content: String) -> FlattenResult<SourceRewrite> {
        let source = self.syntax.parse_source(path, content)?;
        rewrite_source(&source, &self.classifier, self.syntax)
    }

    /// Process one file: read, rewrite and persist unless dry-running
    pub fn process_file(&self, path: &Path, store: &dyn SourceStore) -> FlattenResult<FileReport> {
        let content = store.read(path)?;
        let rewrite = self.rewrite(path, content)?;

        let Some(new_content) = &rewrite.content else {
            debug!("No barrel imports");
            return Ok(FileReport {
                path: path.to_path_buf(),
                changed: false,
                rewritten_imports: 0,
            });
        };

        for split in &rewrite.plan.splits {
            debug!(
                specifier = %split.specifier,
                direct_imports = split.direct_imports.len(),
                "Split barrel import"
            );
        }

        if self.dry_run {
            info!(splits = rewrite.plan.splits.len(), "Would rewrite (dry run)");
        } else {
            store.write(path, new_content)?;
            info!(splits = rewrite.plan.splits.len(), "Rewrote barrel imports");
        }

        Ok(FileReport {
            path: path.to_path_buf(),
            changed: true,
            rewritten_imports: rewrite.plan.splits.len(),
        })
    }

    /// Process every path in order and accumulate the report
    pub fn run<I>(&self, paths: I, store: &dyn SourceStore) -> RewriteReport
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut report = RewriteReport::new(self.dry_run);

        for path in paths {
            let span = flatten_config::logging::file_span(&path);
            let _enter = span.enter();

            if !self.syntax.handles(&path) {
                debug!("Skipping file with unsupported extension");
                continue;
            }

            match self.process_file(&path, store) {
                Ok(file) => report.record(file),
                Err(e) => {
                    warn!(error = %e, "Failed to process file");
                    report.record_failure(FileFailure {
                        path,
                        error: e.to_string(),
                    });
                }
            }
        }

        info!(
            touched_files = report.touched_files,
            failures = report.failures.len(),
            dry_run = report.dry_run,
            "Rewrite finished"
        );
        report
    }
}
