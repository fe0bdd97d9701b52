//! Parsed import model shared between language plugins and the rewrite engine

use crate::error::FlattenResult;
use crate::planning::TextRange;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Quote character used around a module specifier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyle {
    #[default]
    Double,
    Single,
}

impl QuoteStyle {
    /// Detect the quote style from a raw, still-quoted specifier literal
    pub fn from_literal(raw: &str) -> Self {
        if raw.starts_with('\'') {
            Self::Single
        } else {
            Self::Double
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Double => '"',
            Self::Single => '\'',
        }
    }
}

/// A symbol imported by name, e.g. `Button` in `import { Button } from "..."`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NamedBinding {
    /// Name exported by the source module
    pub imported: String,
    /// Name bound in the importing file (equals `imported` without `as`)
    pub local: String,
    /// `import { type Foo }`
    pub type_only: bool,
}

impl NamedBinding {
    /// Binding without a rename
    pub fn plain(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            imported: name.clone(),
            local: name,
            type_only: false,
        }
    }

    pub fn is_aliased(&self) -> bool {
        self.imported != self.local
    }
}

/// A single top-level `import ... from "..."` declaration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImportStatement {
    /// Byte range of the whole declaration, semicolon included
    pub range: TextRange,
    /// Module specifier without quotes
    pub specifier: String,
    pub quote: QuoteStyle,
    pub default_binding: Option<String>,
    /// `* as ns`
    pub namespace_binding: Option<String>,
    pub named_bindings: Vec<NamedBinding>,
    /// `import type { ... }`
    pub type_only: bool,
    /// Carries `with { ... }` import attributes
    pub has_attributes: bool,
    /// Whether the declaration was terminated with `;`
    pub has_semicolon: bool,
}

impl ImportStatement {
    pub fn has_named_bindings(&self) -> bool {
        !self.named_bindings.is_empty()
    }
}

/// A source file together with its parsed import declarations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSource {
    pub path: PathBuf,
    pub content: String,
    /// Import declarations in source order
    pub imports: Vec<ImportStatement>,
}

impl ParsedSource {
    /// Line ending used by the file, `\r\n` if any line uses it
    pub fn line_ending(&self) -> &'static str {
        if self.content.contains("\r\n") {
            "\r\n"
        } else {
            "\n"
        }
    }
}

/// A single-binding import that the rewrite engine asks a plugin to render
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DirectImport {
    /// Name of the default-style binding
    pub binding: String,
    pub specifier: String,
    pub quote: QuoteStyle,
    pub type_only: bool,
    pub semicolon: bool,
}

/// Language seam: parses import declarations and renders new ones
///
/// Implemented by language plugins so the rewrite engine stays independent
/// of any particular parser.
pub trait ImportSyntax: Send + Sync {
    /// File extensions (without dot) this syntax understands
    fn extensions(&self) -> &[&'static str];

    /// Parse the top-level import declarations of `content`
    fn parse_imports(&self, path: &Path, content: &str) -> FlattenResult<Vec<ImportStatement>>;

    /// Render a default import declaration, without a trailing newline
    fn render_import(&self, import: &DirectImport) -> String;

    /// Whether `path` has an extension handled by this syntax
    fn handles(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions().contains(&ext))
    }

    /// Parse `content` into a [`ParsedSource`]
    fn parse_source(&self, path: &Path, content: String) -> FlattenResult<ParsedSource> {
        let imports = self.parse_imports(path, &content)?;
        Ok(ParsedSource {
            path: path.to_path_buf(),
            content,
            imports,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_style_from_literal() {
        assert_eq!(QuoteStyle::from_literal("'@/components'"), QuoteStyle::Single);
        assert_eq!(QuoteStyle::from_literal("\"@/components\""), QuoteStyle::Double);
    }

    #[test]
    fn line_ending_detection() {
        let source = ParsedSource {
            path: PathBuf::from("a.ts"),
            content: "import a from 'a';\r\nfoo();\r\n".to_string(),
            imports: vec![],
        };
        assert_eq!(source.line_ending(), "\r\n");
    }

    #[test]
    fn aliased_binding() {
        let binding = NamedBinding {
            imported: "Button".to_string(),
            local: "Btn".to_string(),
            type_only: false,
        };
        assert!(binding.is_aliased());
        assert!(!NamedBinding::plain("Card").is_aliased());
    }
}
