//! TypeScript/JavaScript import syntax for flatten-imports
pub mod parser;

use flatten_foundation::{DirectImport, FlattenResult, ImportStatement, ImportSyntax};
use std::path::Path;

/// TypeScript/JavaScript import parsing and rendering
#[derive(Debug, Default, Clone, Copy)]
pub struct TypeScriptImportSyntax;

impl TypeScriptImportSyntax {
    /// Extensions handled by this syntax
    pub const EXTENSIONS: &'static [&'static str] = &["ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs"];

    pub fn new() -> Self {
        Self
    }
}

impl ImportSyntax for TypeScriptImportSyntax {
    fn extensions(&self) -> &[&'static str] {
        Self::EXTENSIONS
    }

    fn parse_imports(&self, path: &Path, content: &str) -> FlattenResult<Vec<ImportStatement>> {
        parser::parse_imports(path, content)
    }

    fn render_import(&self, import: &DirectImport) -> String {
        let quote = import.quote.as_char();
        format!(
            "import {}{} from {quote}{}{quote}{}",
            if import.type_only { "type " } else { "" },
            import.binding,
            import.specifier,
            if import.semicolon { ";" } else { "" },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flatten_foundation::QuoteStyle;

    fn direct(binding: &str, specifier: &str) -> DirectImport {
        DirectImport {
            binding: binding.to_string(),
            specifier: specifier.to_string(),
            quote: QuoteStyle::Double,
            type_only: false,
            semicolon: true,
        }
    }

    #[test]
    fn render_default_import() {
        let syntax = TypeScriptImportSyntax::new();
        assert_eq!(
            syntax.render_import(&direct("Button", "@/components/Button")),
            "import Button from \"@/components/Button\";"
        );
    }

    #[test]
    fn render_preserves_quote_and_semicolon_choice() {
        let syntax = TypeScriptImportSyntax::new();
        let import = DirectImport {
            quote: QuoteStyle::Single,
            semicolon: false,
            type_only: true,
            ..direct("Props", "../types/Props")
        };
        assert_eq!(syntax.render_import(&import), "import type Props from '../types/Props'");
    }

    #[test]
    fn handles_script_extensions_only() {
        let syntax = TypeScriptImportSyntax::new();
        assert!(syntax.handles(Path::new("src/App.tsx")));
        assert!(syntax.handles(Path::new("src/index.mjs")));
        assert!(!syntax.handles(Path::new("src/styles.css")));
        assert!(!syntax.handles(Path::new("README")));
    }
}
