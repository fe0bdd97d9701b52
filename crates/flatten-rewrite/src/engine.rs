//! Rewrite engine
//!
//! Planning is pure: [`plan_file`] turns a parsed file into an [`EditPlan`]
//! without touching the text, and [`rewrite_source`] applies that plan in one
//! pass. Every named binding of a barrel import becomes one default import of
//! `<specifier>/<imported name>`; the generated declarations start on the
//! line after the last import that survives the rewrite.

use crate::classifier::BarrelClassifier;
use flatten_foundation::planning::{EditPlan, EditType, TextEdit, TextRange};
use flatten_foundation::{DirectImport, FlattenResult, ImportStatement, ImportSyntax, ParsedSource};
use tracing::debug;

/// A barrel import and what it was split into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitImport {
    /// Specifier of the original barrel import
    pub specifier: String,
    /// One entry per named binding, in source order
    pub direct_imports: Vec<DirectImport>,
}

/// Edits computed for one file plus a description of each split
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePlan {
    pub plan: EditPlan,
    pub splits: Vec<SplitImport>,
}

impl FilePlan {
    pub fn is_empty(&self) -> bool {
        self.plan.is_empty()
    }
}

/// Result of rewriting one file in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRewrite {
    pub plan: FilePlan,
    /// New content, `None` when the file is unchanged
    pub content: Option<String>,
}

impl SourceRewrite {
    pub fn changed(&self) -> bool {
        self.content.is_some()
    }
}

/// Compute the edits that flatten every barrel import in `source`
pub fn plan_file(
    source: &ParsedSource,
    classifier: &BarrelClassifier,
    syntax: &dyn ImportSyntax,
) -> FilePlan {
    let mut plan = EditPlan::new(&source.path);
    let mut splits = Vec::new();
    let mut generated = Vec::new();
    let mut last_surviving_end = None;
    let mut first_removed_start = None;
    let mut last_removed_end = 0;

    for import in &source.imports {
        let keep = if !classifier.is_barrel_import(&import.specifier) {
            true
        } else if let Some(namespace) = &import.namespace_binding {
            debug!(specifier = %import.specifier, namespace = %namespace, "Leaving namespace import of barrel as is");
            true
        } else if import.has_attributes {
            debug!(specifier = %import.specifier, "Leaving barrel import with attributes as is");
            true
        } else {
            !import.has_named_bindings()
        };
        if keep {
            last_surviving_end = Some(import.range.end);
            continue;
        }

        let direct_imports = direct_imports(import);
        for (binding, direct) in import.named_bindings.iter().zip(&direct_imports) {
            if binding.is_aliased() {
                debug!(
                    imported = %binding.imported,
                    local = %binding.local,
                    specifier = %direct.specifier,
                    "Keeping local alias as default binding"
                );
            }
        }

        match &import.default_binding {
            Some(default) => {
                let reduced = syntax.render_import(&DirectImport {
                    binding: default.clone(),
                    specifier: import.specifier.clone(),
                    quote: import.quote,
                    type_only: import.type_only,
                    semicolon: import.has_semicolon,
                });
                plan.push(TextEdit::replace(
                    import.range,
                    reduced,
                    format!("Keep default import of {}", import.specifier),
                ));
                last_surviving_end = Some(import.range.end);
            }
            None => {
                let mut range = removal_range(&source.content, import.range);
                // Neighbours on a shared line may both claim the blanks between them
                range.start = range.start.max(last_removed_end);
                last_removed_end = range.end;
                first_removed_start.get_or_insert(range.start);
                plan.push(TextEdit::remove(
                    range,
                    format!("Remove barrel import of {}", import.specifier),
                ));
            }
        }

        generated.extend(direct_imports.iter().map(|d| syntax.render_import(d)));
        splits.push(SplitImport {
            specifier: import.specifier.clone(),
            direct_imports,
        });
    }

    if generated.is_empty() {
        return FilePlan { plan, splits };
    }

    let (offset, leading_eol) = match (last_surviving_end, first_removed_start) {
        (Some(end), _) => {
            let anchor = line_anchor(&source.content, &plan, end);
            match next_line_start(&source.content, anchor) {
                Some(offset) => (offset, false),
                None => (anchor, true),
            }
        }
        (None, Some(start)) => (start, false),
        // Generated imports always come with a surviving or removed declaration
        (None, None) => return FilePlan { plan, splits },
    };

    let eol = source.line_ending();
    let trailing_eol = !leading_eol
        && (source.content.ends_with('\n') || !removes_through_end(&plan, offset, source.content.len()));
    let mut text = generated.join(eol);
    if leading_eol {
        text.insert_str(0, eol);
    }
    if trailing_eol {
        text.push_str(eol);
    }
    plan.push(TextEdit::insert(
        offset,
        text,
        format!("Add {} direct import(s)", generated.len()),
    ));

    FilePlan { plan, splits }
}

/// Plan and apply the rewrite for one parsed file
pub fn rewrite_source(
    source: &ParsedSource,
    classifier: &BarrelClassifier,
    syntax: &dyn ImportSyntax,
) -> FlattenResult<SourceRewrite> {
    let plan = plan_file(source, classifier, syntax);
    if plan.is_empty() {
        return Ok(SourceRewrite {
            plan,
            content: None,
        });
    }

    let content = plan.plan.apply(&source.content)?;
    Ok(SourceRewrite {
        plan,
        content: Some(content),
    })
}

/// One default import per named binding: `import Local from "S/Imported"`
fn direct_imports(import: &ImportStatement) -> Vec<DirectImport> {
    import
        .named_bindings
        .iter()
        .map(|binding| DirectImport {
            binding: binding.local.clone(),
            specifier: format!("{}/{}", import.specifier, binding.imported),
            quote: import.quote,
            type_only: import.type_only || binding.type_only,
            semicolon: import.has_semicolon,
        })
        .collect()
}

/// End of the last edit that begins on the line of `end`, at or after it
fn line_anchor(content: &str, plan: &EditPlan, end: usize) -> usize {
    let line_end = content[end..].find('\n').map_or(content.len(), |i| end + i);
    plan.edits
        .iter()
        .filter(|edit| edit.range.start >= end && edit.range.start <= line_end)
        .map(|edit| edit.range.end)
        .fold(end, usize::max)
}

/// Whether removals cover everything from `offset` to the end of the file
fn removes_through_end(plan: &EditPlan, offset: usize, len: usize) -> bool {
    let mut removed: Vec<TextRange> = plan
        .edits
        .iter()
        .filter(|edit| edit.edit_type == EditType::RemoveImport)
        .map(|edit| edit.range)
        .collect();
    removed.sort();

    let mut covered = offset;
    for range in removed {
        if range.start <= covered && range.end > covered {
            covered = range.end;
        }
    }
    offset < len && covered == len
}

/// Start of the line after the one containing `offset`
///
/// `None` when `offset` is on the last line, or when the rest of its line
/// opens a block comment that continues on the next one.
fn next_line_start(content: &str, offset: usize) -> Option<usize> {
    let newline = offset + content[offset..].find('\n')?;
    let rest_of_line = &content[offset..newline];
    if let Some(open) = rest_of_line.rfind("/*") {
        if !rest_of_line[open..].contains("*/") {
            return None;
        }
    }
    Some(newline + 1)
}

/// Range to delete for a removed declaration
///
/// A declaration alone on its line takes the whole line with it. Otherwise the
/// blanks between it and the neighbouring code go too, so no stray space is
/// left at the start or end of the shared line.
fn removal_range(content: &str, range: TextRange) -> TextRange {
    let line_start = content[..range.start].rfind('\n').map_or(0, |i| i + 1);
    let before = &content[line_start..range.start];
    let rest = &content[range.end..];
    let after_ws = range.end + (rest.len() - rest.trim_start_matches([' ', '\t']).len());
    let tail = &content[after_ws..];
    let at_line_end = tail.is_empty() || tail.starts_with('\n') || tail.starts_with("\r\n");

    let alone = before.chars().all(|c| c == ' ' || c == '\t');
    if alone && at_line_end {
        let end = if tail.starts_with("\r\n") {
            after_ws + 2
        } else {
            after_ws + tail.len().min(1)
        };
        return TextRange::new(line_start, end);
    }

    if at_line_end {
        let trimmed = before.trim_end_matches([' ', '\t']);
        TextRange::new(line_start + trimmed.len(), after_ws)
    } else {
        TextRange::new(range.start, after_ws)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removal_range_takes_whole_line() {
        let content = "a();\n  import { X } from 'y';\nb();\n";
        let start = content.find("import").unwrap();
        let end = content.find(";\nb").unwrap() + 1;
        let range = removal_range(content, TextRange::new(start, end));
        assert_eq!(&content[range.start..range.end], "  import { X } from 'y';\n");
    }

    #[test]
    fn removal_range_handles_crlf_and_trailing_spaces() {
        let content = "import { X } from 'y';  \r\nb();";
        let range = removal_range(content, TextRange::new(0, 22));
        assert_eq!(&content[range.start..range.end], "import { X } from 'y';  \r\n");
    }

    #[test]
    fn removal_range_at_end_of_file() {
        let content = "a();\nimport { X } from 'y';";
        let range = removal_range(content, TextRange::new(5, content.len()));
        assert_eq!(range, TextRange::new(5, content.len()));
    }

    #[test]
    fn removal_range_on_shared_line_takes_preceding_blanks() {
        let content = "import a from 'a'; import { X } from 'y';\n";
        let start = content.find("import {").unwrap();
        let range = removal_range(content, TextRange::new(start, content.len() - 1));
        assert_eq!(&content[range.start..range.end], " import { X } from 'y';");
    }

    #[test]
    fn removal_range_on_shared_line_takes_following_blanks() {
        let content = "import { X } from 'y'; import d from 'd';\n";
        let range = removal_range(content, TextRange::new(0, 22));
        assert_eq!(&content[range.start..range.end], "import { X } from 'y'; ");
    }

    #[test]
    fn next_line_start_skips_trailing_comment() {
        let content = "import a from 'a'; // keep\nx();\n";
        assert_eq!(next_line_start(content, 18), Some(27));
        assert_eq!(&content[27..], "x();\n");
    }

    #[test]
    fn next_line_start_on_last_line_or_open_block_comment() {
        assert_eq!(next_line_start("import a from 'a';", 18), None);
        assert_eq!(next_line_start("import a from 'a'; /* note\n */\n", 18), None);
        assert_eq!(next_line_start("import a from 'a'; /* note */\n", 18), Some(30));
    }
}
