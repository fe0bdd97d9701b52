//! swc-based extraction of top-level import declarations

use flatten_foundation::planning::TextRange;
use flatten_foundation::{FlattenError, FlattenResult, ImportStatement, NamedBinding, QuoteStyle};
use std::path::Path;
use swc_common::{sync::Lrc, BytePos, FileName, FilePathMapping, SourceMap, Span, Spanned};
use swc_ecma_ast::{ImportDecl, ImportSpecifier, ModuleDecl, ModuleExportName, ModuleItem};
use swc_ecma_parser::{lexer::Lexer, EsSyntax, Parser, StringInput, Syntax, TsSyntax};
use tracing::debug;

/// Pick the parser syntax from the file extension
pub fn syntax_for_path(path: &Path) -> Syntax {
    let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("tsx") => Syntax::Typescript(TsSyntax {
            tsx: true,
            decorators: true,
            ..Default::default()
        }),
        Some("ts") | Some("mts") | Some("cts") => Syntax::Typescript(TsSyntax {
            decorators: true,
            dts: file_name.ends_with(".d.ts"),
            ..Default::default()
        }),
        _ => Syntax::Es(EsSyntax {
            jsx: true,
            ..Default::default()
        }),
    }
}

/// Byte offsets into the original text for spans of one parsed file
struct Offsets<'a> {
    content: &'a str,
    base: BytePos,
    /// swc drops a leading BOM before assigning positions
    bom: usize,
}

impl<'a> Offsets<'a> {
    fn offset(&self, pos: BytePos) -> usize {
        (pos.0 - self.base.0) as usize + self.bom
    }

    fn range(&self, span: Span) -> TextRange {
        TextRange::new(self.offset(span.lo), self.offset(span.hi))
    }

    fn text(&self, span: Span) -> &'a str {
        let range = self.range(span);
        self.content.get(range.start..range.end).unwrap_or_default()
    }
}

/// Parse `content` and return its import declarations in source order
pub fn parse_imports(path: &Path, content: &str) -> FlattenResult<Vec<ImportStatement>> {
    let cm = Lrc::new(SourceMap::new(FilePathMapping::empty()));
    let file_name = Lrc::new(FileName::Real(path.to_path_buf()));
    let source_file = cm.new_source_file(file_name, content.to_string());

    let lexer = Lexer::new(
        syntax_for_path(path),
        Default::default(),
        StringInput::from(&*source_file),
        None,
    );
    let mut parser = Parser::new_from(lexer);

    let module = parser
        .parse_module()
        .map_err(|e| FlattenError::parse(format!("{:?}", e), Some(path)))?;

    // A file the parser only partly understood is not rewritten.
    let recovered = parser.take_errors();
    if let Some(first) = recovered.first() {
        debug!(
            file_path = %path.display(),
            errors = recovered.len(),
            "Parser recovered from errors"
        );
        return Err(FlattenError::parse(format!("{:?}", first), Some(path)));
    }

    let offsets = Offsets {
        content,
        base: source_file.start_pos,
        bom: if content.starts_with('\u{feff}') { '\u{feff}'.len_utf8() } else { 0 },
    };

    Ok(module
        .body
        .iter()
        .filter_map(|item| match item {
            ModuleItem::ModuleDecl(ModuleDecl::Import(decl)) => Some(convert(decl, &offsets)),
            _ => None,
        })
        .collect())
}

fn convert(decl: &ImportDecl, offsets: &Offsets<'_>) -> ImportStatement {
    let raw_src = offsets.text(decl.src.span);
    let range = include_semicolon(offsets.content, offsets.range(decl.span));
    let has_semicolon = offsets
        .content
        .get(range.start..range.end)
        .is_some_and(|text| text.trim_end().ends_with(';'));

    let mut default_binding = None;
    let mut namespace_binding = None;
    let mut named_bindings = Vec::new();

    for specifier in &decl.specifiers {
        match specifier {
            ImportSpecifier::Default(default) => {
                default_binding = Some(default.local.sym.to_string());
            }
            ImportSpecifier::Namespace(ns) => {
                namespace_binding = Some(ns.local.sym.to_string());
            }
            ImportSpecifier::Named(named) => {
                let local = named.local.sym.to_string();
                let imported = match &named.imported {
                    None => local.clone(),
                    Some(ModuleExportName::Ident(ident)) => ident.sym.to_string(),
                    Some(other) => unquote(offsets.text(other.span())).to_string(),
                };
                named_bindings.push(NamedBinding {
                    imported,
                    local,
                    type_only: named.is_type_only,
                });
            }
        }
    }

    ImportStatement {
        range,
        specifier: unquote(raw_src).to_string(),
        quote: QuoteStyle::from_literal(raw_src),
        default_binding,
        namespace_binding,
        named_bindings,
        type_only: decl.type_only,
        has_attributes: decl.with.is_some(),
        has_semicolon,
    }
}

/// Extend `range` over a `;` that directly follows it on the same line
fn include_semicolon(content: &str, range: TextRange) -> TextRange {
    let Some(rest) = content.get(range.end..) else {
        return range;
    };
    let trimmed = rest.trim_start_matches([' ', '\t']);
    if trimmed.starts_with(';') {
        TextRange::new(range.start, range.end + (rest.len() - trimmed.len()) + 1)
    } else {
        range
    }
}

/// Strip the surrounding quotes of a string literal
fn unquote(raw: &str) -> &str {
    let inner = raw
        .strip_prefix(['"', '\''])
        .and_then(|s| s.strip_suffix(['"', '\'']));
    inner.unwrap_or(raw)
}
