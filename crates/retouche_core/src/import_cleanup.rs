//! Removal of import bindings that are no longer referenced.

use oxc_allocator::Allocator;
use oxc_ast::ast::{
    IdentifierReference, ImportDeclaration, ImportDeclarationSpecifier, Statement,
};
use oxc_ast::Visit;
use oxc_parser::Parser;
use oxc_span::{GetSpan, SourceType, Span};

use crate::document::ScriptDocument;

/// Remove the import of `local_binding` when nothing references it anymore.
///
/// The specifier alone is removed when its declaration imports other
/// bindings; otherwise the whole declaration goes, with its line. Returns
/// `None` when the source is left unchanged.
pub fn remove_extraneous_import(
    source: &str,
    source_type: SourceType,
    local_binding: &str,
) -> Option<String> {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source, source_type).parse();
    if !ret.errors.is_empty() {
        tracing::debug!(binding = local_binding, "import cleanup skipped: source does not parse");
        return None;
    }

    let (decl, index) = ret.program.body.iter().find_map(|stmt| {
        let Statement::ImportDeclaration(decl) = stmt else {
            return None;
        };
        let index = decl
            .specifiers
            .as_ref()?
            .iter()
            .position(|spec| local_name(spec) == local_binding)?;
        Some((&**decl, index))
    })?;

    let mut finder = ReferenceFinder {
        name: local_binding,
        found: false,
    };
    finder.visit_program(&ret.program);
    if finder.found {
        return None;
    }

    let mut doc = ScriptDocument::new(source);
    doc.remove(removal_range(source, decl, index));
    tracing::debug!(binding = local_binding, "removed unused import");
    Some(doc.render())
}

fn local_name<'s>(spec: &'s ImportDeclarationSpecifier<'_>) -> &'s str {
    match spec {
        ImportDeclarationSpecifier::ImportSpecifier(s) => s.local.name.as_str(),
        ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => s.local.name.as_str(),
        ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => s.local.name.as_str(),
    }
}

/// Range to delete so that the declaration stays well formed.
fn removal_range(source: &str, decl: &ImportDeclaration<'_>, index: usize) -> Span {
    let Some(specifiers) = decl.specifiers.as_ref().filter(|s| s.len() > 1) else {
        return declaration_line(source, decl.span);
    };
    let spec = &specifiers[index];
    let named = specifiers
        .iter()
        .filter(|s| matches!(s, ImportDeclarationSpecifier::ImportSpecifier(_)))
        .count();

    match spec {
        // `import a, { b } from 'x'` -> `import { b } from 'x'`
        ImportDeclarationSpecifier::ImportDefaultSpecifier(_) => {
            let after = spec.span().end;
            let comma = source[after as usize..].find(',').map_or(0, |i| i + 1);
            let rest = &source[after as usize + comma..];
            let whitespace = rest.len() - rest.trim_start().len();
            Span::new(spec.span().start, after + (comma + whitespace) as u32)
        }
        // `import a, { b } from 'x'` -> `import a from 'x'`
        ImportDeclarationSpecifier::ImportSpecifier(_) if named == 1 => {
            let from = specifiers[0].span().end;
            let close = source[spec.span().end as usize..]
                .find('}')
                .map_or(0, |i| i + 1);
            Span::new(from, spec.span().end + close as u32)
        }
        _ if index + 1 < specifiers.len() => {
            Span::new(spec.span().start, specifiers[index + 1].span().start)
        }
        _ => Span::new(specifiers[index - 1].span().end, spec.span().end),
    }
}

/// The declaration plus its line break, and the blank line after it when the
/// declaration opens the script.
fn declaration_line(source: &str, span: Span) -> Span {
    let mut end = span.end as usize;
    end += line_break_len(&source[end..]);
    if source[..span.start as usize].trim().is_empty() {
        let rest = &source[end..];
        let indent = rest.len() - rest.trim_start_matches([' ', '\t']).len();
        let line_break = line_break_len(&rest[indent..]);
        if line_break > 0 {
            end += indent + line_break;
        }
    }
    Span::new(span.start, end as u32)
}

fn line_break_len(text: &str) -> usize {
    if text.starts_with("\r\n") {
        2
    } else if text.starts_with('\n') {
        1
    } else {
        0
    }
}

struct ReferenceFinder<'n> {
    name: &'n str,
    found: bool,
}

impl<'a> Visit<'a> for ReferenceFinder<'_> {
    fn visit_identifier_reference(&mut self, ident: &IdentifierReference<'a>) {
        if ident.name.as_str() == self.name {
            self.found = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleanup(source: &str, binding: &str) -> Option<String> {
        remove_extraneous_import(source, SourceType::ts(), binding)
    }

    #[test]
    fn test_only_specifier_removes_declaration() {
        let source = "import { defineComponent } from 'vue'\n\nconst a = 1\n";
        assert_eq!(cleanup(source, "defineComponent").unwrap(), "const a = 1\n");
    }

    #[test]
    fn test_declaration_after_other_code_keeps_blank_line() {
        let source = "import a from 'a'\nimport { defineComponent } from 'vue'\n\nconst b = a\n";
        assert_eq!(
            cleanup(source, "defineComponent").unwrap(),
            "import a from 'a'\n\nconst b = a\n"
        );
    }

    #[test]
    fn test_first_specifier_removed() {
        let source = "import { defineComponent, ref } from 'vue'\nconst a = ref(0)\n";
        assert_eq!(
            cleanup(source, "defineComponent").unwrap(),
            "import { ref } from 'vue'\nconst a = ref(0)\n"
        );
    }

    #[test]
    fn test_last_specifier_removed() {
        let source = "import { ref, defineComponent } from 'vue'\nconst a = ref(0)\n";
        assert_eq!(
            cleanup(source, "defineComponent").unwrap(),
            "import { ref } from 'vue'\nconst a = ref(0)\n"
        );
    }

    #[test]
    fn test_named_collapses_to_default() {
        let source = "import Vue, { defineComponent } from 'vue'\nVue.use(x)\n";
        assert_eq!(
            cleanup(source, "defineComponent").unwrap(),
            "import Vue from 'vue'\nVue.use(x)\n"
        );
    }

    #[test]
    fn test_default_removed_before_named() {
        let source = "import Vue, { ref } from 'vue'\nref(0)\n";
        assert_eq!(
            cleanup(source, "Vue").unwrap(),
            "import { ref } from 'vue'\nref(0)\n"
        );
    }

    #[test]
    fn test_referenced_binding_is_kept() {
        assert_eq!(
            cleanup("import { defineComponent } from 'vue'\ndefineComponent({})\n", "defineComponent"),
            None
        );
        // Type positions count as references
        assert_eq!(
            cleanup("import { PropType } from 'vue'\ntype A = PropType<string>\n", "PropType"),
            None
        );
    }

    #[test]
    fn test_binding_not_imported() {
        assert_eq!(cleanup("const a = 1\n", "defineComponent"), None);
    }
}
