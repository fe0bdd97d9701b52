//! Source file discovery below the project root

use flatten_config::FlattenConfig;
use flatten_foundation::{FlattenError, FlattenResult};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Directories never worth descending into
const SKIPPED_DIRS: &[&str] = &["node_modules", ".git"];

/// Finds the files a run should process
#[derive(Debug)]
pub struct SourceDiscovery {
    root: PathBuf,
    include: GlobSet,
    exclude: Option<GlobSet>,
}

impl SourceDiscovery {
    /// Compile the include/exclude patterns of `config`
    pub fn new(config: &FlattenConfig) -> FlattenResult<Self> {
        let include = compile_globset(&config.include)?
            .ok_or_else(|| FlattenError::config("No include patterns configured"))?;
        let exclude = compile_globset(&config.exclude)?;

        Ok(Self {
            root: config.root.clone(),
            include,
            exclude,
        })
    }

    /// Whether a root-relative path is selected by the patterns
    pub fn is_selected(&self, relative: &Path) -> bool {
        self.include.is_match(relative)
            && !self
                .exclude
                .as_ref()
                .is_some_and(|exclude| exclude.is_match(relative))
    }

    /// All selected files, sorted
    pub fn discover(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| {
                !(e.file_type().is_dir()
                    && e.depth() > 0
                    && e.file_name()
                        .to_str()
                        .is_some_and(|name| SKIPPED_DIRS.contains(&name)))
            })
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable path");
                    None
                }
            })
            .filter(|e| e.file_type().is_file())
            .filter(|e| {
                e.path()
                    .strip_prefix(&self.root)
                    .is_ok_and(|relative| self.is_selected(relative))
            })
            .map(|e| e.into_path())
            .collect();

        files.sort();
        debug!(root = %self.root.display(), count = files.len(), "Discovered source files");
        files
    }
}

fn compile_globset(patterns: &[String]) -> FlattenResult<Option<GlobSet>> {
    let mut builder = GlobSetBuilder::new();
    let mut added = false;

    for pattern in patterns {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            continue;
        }

        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|err| FlattenError::config(format!("Invalid glob pattern '{pattern}': {err}")))?;
        builder.add(glob);
        added = true;
    }

    if added {
        builder
            .build()
            .map(Some)
            .map_err(|err| FlattenError::config(format!("Failed to build glob set: {err}")))
    } else {
        Ok(None)
    }
}
