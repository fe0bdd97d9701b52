//! Contains all edit plan types.

use crate::error::{FlattenError, FlattenResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Half-open byte range `[start, end)` into a file's text
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Empty range at `offset`, used for insertions
    pub fn at(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Types of edits that can be performed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EditType {
    /// Remove a barrel import declaration
    RemoveImport,
    /// Replace a declaration with a reduced one
    ReplaceImport,
    /// Insert the generated direct imports
    AddImports,
}

/// Individual text edit operation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TextEdit {
    pub edit_type: EditType,
    /// Range to replace; empty for pure insertions
    pub range: TextRange,
    /// Text written in place of `range`
    pub new_text: String,
    /// Description of what this edit does
    pub description: String,
}

impl TextEdit {
    pub fn remove(range: TextRange, description: impl Into<String>) -> Self {
        Self {
            edit_type: EditType::RemoveImport,
            range,
            new_text: String::new(),
            description: description.into(),
        }
    }

    pub fn replace(
        range: TextRange,
        new_text: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            edit_type: EditType::ReplaceImport,
            range,
            new_text: new_text.into(),
            description: description.into(),
        }
    }

    pub fn insert(offset: usize, new_text: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            edit_type: EditType::AddImports,
            range: TextRange::at(offset),
            new_text: new_text.into(),
            description: description.into(),
        }
    }
}

/// Immutable set of edits computed for one file
///
/// Planning never touches the text; [`EditPlan::apply`] produces the new
/// content in a single pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EditPlan {
    /// Source file being edited
    pub source_file: PathBuf,
    /// List of individual edits to apply
    pub edits: Vec<TextEdit>,
}

impl EditPlan {
    pub fn new(source_file: impl Into<PathBuf>) -> Self {
        Self {
            source_file: source_file.into(),
            edits: Vec::new(),
        }
    }

    pub fn push(&mut self, edit: TextEdit) {
        self.edits.push(edit);
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Apply every edit to `content` and return the new text
    ///
    /// Ranges must lie on char boundaries and must not overlap. An insertion
    /// may share its offset with the start of a removal; the removal is
    /// applied first so the inserted text lands where the removed text was.
    pub fn apply(&self, content: &str) -> FlattenResult<String> {
        let mut ordered: Vec<&TextEdit> = self.edits.iter().collect();
        // Back to front so earlier offsets stay valid.
        ordered.sort_by(|a, b| {
            b.range
                .start
                .cmp(&a.range.start)
                .then_with(|| a.range.is_empty().cmp(&b.range.is_empty()))
        });

        let mut limit = content.len();
        for edit in &ordered {
            let TextRange { start, end } = edit.range;
            if start > end || end > content.len() {
                return Err(FlattenError::edit(format!(
                    "range {}..{} out of bounds for {} (len {})",
                    start,
                    end,
                    self.source_file.display(),
                    content.len()
                )));
            }
            if !content.is_char_boundary(start) || !content.is_char_boundary(end) {
                return Err(FlattenError::edit(format!(
                    "range {}..{} splits a character in {}",
                    start,
                    end,
                    self.source_file.display()
                )));
            }
            if end > limit {
                return Err(FlattenError::edit(format!(
                    "overlapping edits at {}..{} in {}",
                    start,
                    end,
                    self.source_file.display()
                )));
            }
            limit = start;
        }

        let mut result = content.to_string();
        for edit in ordered {
            result.replace_range(edit.range.start..edit.range.end, &edit.new_text);
        }
        Ok(result)
    }
}
