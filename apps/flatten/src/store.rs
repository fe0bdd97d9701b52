//! Filesystem-backed source store

use flatten_foundation::{FlattenError, FlattenResult};
use flatten_rewrite::SourceStore;
use std::path::Path;

/// Reads and overwrites files in place
#[derive(Debug, Default, Clone, Copy)]
pub struct FsSourceStore;

impl SourceStore for FsSourceStore {
    fn read(&self, path: &Path) -> FlattenResult<String> {
        std::fs::read_to_string(path).map_err(|e| FlattenError::io(path, e))
    }

    fn write(&self, path: &Path, content: &str) -> FlattenResult<()> {
        std::fs::write(path, content).map_err(|e| FlattenError::io(path, e))
    }
}
