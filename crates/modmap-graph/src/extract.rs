//! Declaration extraction.
//!
//! Walks the top-level statements of a parsed program and turns every import
//! and export declaration into flat binding records, in source order. Nothing
//! below the top level is inspected.

use oxc_allocator::Allocator;
use oxc_ast::ast::{
    BindingPatternKind, Declaration, ExportNamedDeclaration, ImportDeclaration,
    ImportDeclarationSpecifier, ModuleDeclaration, ModuleExportName, Program,
};
use oxc_parser::Parser;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::source::ModuleFile;

/// Symbol used for default bindings.
pub const DEFAULT_SYMBOL: &str = "default";

/// Symbol used for namespace imports and re-export-all declarations.
pub const ALL_SYMBOL: &str = "all";

/// Errors from parsing a single file.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },
}

/// Shape of one bound name in an import declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ImportBinding {
    /// `import foo from 'mod'`
    Default,
    /// `import { foo } from 'mod'` or `import { foo as bar } from 'mod'`; holds
    /// the imported name, never the local alias.
    Named { name: String },
    /// `import * as ns from 'mod'`
    Namespace,
}

impl ImportBinding {
    /// Symbol slot this binding occupies in the imported module's entry.
    pub fn symbol(&self) -> &str {
        match self {
            Self::Default => DEFAULT_SYMBOL,
            Self::Named { name } => name,
            Self::Namespace => ALL_SYMBOL,
        }
    }
}

/// One imported binding together with the specifier it came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImportRecord {
    pub binding: ImportBinding,
    /// Raw specifier as written in source.
    pub specifier: String,
}

/// One exported binding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ExportRecord {
    /// A named export; `source` is set for `export { x } from './mod'`.
    Named {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        source: Option<String>,
    },
    /// `export default ...`
    Default,
    /// `export * from './mod'` (also `export * as ns from './mod'`)
    ReexportAll { source: String },
}

impl ExportRecord {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named {
            name: name.into(),
            source: None,
        }
    }

    /// Exported name, or the default/all sentinel.
    pub fn name(&self) -> &str {
        match self {
            Self::Named { name, .. } => name,
            Self::Default => DEFAULT_SYMBOL,
            Self::ReexportAll { .. } => ALL_SYMBOL,
        }
    }

    /// Source specifier for re-exports.
    pub fn source(&self) -> Option<&str> {
        match self {
            Self::Named { source, .. } => source.as_deref(),
            Self::Default => None,
            Self::ReexportAll { source } => Some(source),
        }
    }
}

/// Imports and exports of one file, each in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declarations {
    pub imports: Vec<ImportRecord>,
    pub exports: Vec<ExportRecord>,
}

/// Extraction switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractOptions {
    /// Keep `import type`/`export type` declarations and `declare` exports,
    /// which disappear once TypeScript is compiled.
    pub include_type_imports: bool,
}

/// Parse a module file and extract its declarations.
///
/// # Errors
///
/// Returns `ExtractError::Parse` with the first parser diagnostic when the
/// text is not valid for the file's dialect.
pub fn parse_and_extract(
    file: &ModuleFile,
    options: &ExtractOptions,
) -> Result<Declarations, ExtractError> {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, &file.text, file.kind.source_type()).parse();

    if ret.panicked || !ret.errors.is_empty() {
        let message = ret
            .errors
            .first()
            .map(|e| e.to_string())
            .unwrap_or_else(|| "parser aborted".to_string());
        return Err(ExtractError::Parse {
            path: file.descriptor.relative_path.clone(),
            message,
        });
    }

    Ok(extract_declarations(&ret.program, options))
}

/// Collect the import and export records of a program's top-level statements.
pub fn extract_declarations(program: &Program<'_>, options: &ExtractOptions) -> Declarations {
    let mut declarations = Declarations::default();

    for stmt in program.body.iter() {
        let Some(module_decl) = stmt.as_module_declaration() else {
            continue;
        };

        match module_decl {
            ModuleDeclaration::ImportDeclaration(import) => {
                collect_imports(import, options, &mut declarations.imports);
            }
            ModuleDeclaration::ExportAllDeclaration(all) => {
                if all.export_kind.is_type() && !options.include_type_imports {
                    continue;
                }
                declarations.exports.push(ExportRecord::ReexportAll {
                    source: all.source.value.to_string(),
                });
            }
            ModuleDeclaration::ExportNamedDeclaration(named) => {
                collect_named_exports(named, options, &mut declarations.exports);
            }
            ModuleDeclaration::ExportDefaultDeclaration(_) => {
                declarations.exports.push(ExportRecord::Default);
            }
            _ => {}
        }
    }

    declarations
}

fn collect_imports(
    import: &ImportDeclaration<'_>,
    options: &ExtractOptions,
    out: &mut Vec<ImportRecord>,
) {
    if import.import_kind.is_type() && !options.include_type_imports {
        return;
    }

    // `import './polyfill'` binds nothing.
    let Some(specifiers) = &import.specifiers else {
        return;
    };

    let specifier = import.source.value.to_string();

    for spec in specifiers {
        let binding = match spec {
            ImportDeclarationSpecifier::ImportDefaultSpecifier(_) => ImportBinding::Default,
            ImportDeclarationSpecifier::ImportNamespaceSpecifier(_) => ImportBinding::Namespace,
            ImportDeclarationSpecifier::ImportSpecifier(named) => {
                if named.import_kind.is_type() && !options.include_type_imports {
                    continue;
                }
                ImportBinding::Named {
                    name: module_export_name(&named.imported),
                }
            }
        };

        out.push(ImportRecord {
            binding,
            specifier: specifier.clone(),
        });
    }
}

fn collect_named_exports(
    named: &ExportNamedDeclaration<'_>,
    options: &ExtractOptions,
    out: &mut Vec<ExportRecord>,
) {
    if named.export_kind.is_type() && !options.include_type_imports {
        return;
    }

    let source = named.source.as_ref().map(|s| s.value.to_string());

    if !named.specifiers.is_empty() {
        for spec in &named.specifiers {
            if spec.export_kind.is_type() && !options.include_type_imports {
                continue;
            }
            out.push(ExportRecord::Named {
                name: module_export_name(&spec.exported),
                source: source.clone(),
            });
        }
        return;
    }

    let Some(decl) = &named.declaration else {
        return;
    };

    match decl {
        Declaration::FunctionDeclaration(func) => {
            if func.declare && !options.include_type_imports {
                return;
            }
            if let Some(id) = &func.id {
                out.push(ExportRecord::named(id.name.as_str()));
            }
        }
        Declaration::VariableDeclaration(var) => {
            if var.declare && !options.include_type_imports {
                return;
            }
            // Destructuring patterns are not expanded.
            for declarator in &var.declarations {
                if let BindingPatternKind::BindingIdentifier(ident) = &declarator.id.kind {
                    out.push(ExportRecord::named(ident.name.as_str()));
                }
            }
        }
        _ => {}
    }
}

fn module_export_name(name: &ModuleExportName<'_>) -> String {
    match name {
        ModuleExportName::IdentifierName(ident) => ident.name.to_string(),
        ModuleExportName::IdentifierReference(ident) => ident.name.to_string(),
        ModuleExportName::StringLiteral(lit) => lit.value.to_string(),
    }
}
