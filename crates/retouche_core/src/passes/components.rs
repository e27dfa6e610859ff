//! Sub-component hoisting.

use oxc_ast::ast::{Expression, ObjectPropertyKind, Program, Statement};
use oxc_span::GetSpan;

use crate::component::{property_key_name, ComponentDescriptor};
use crate::document::ScriptDocument;
use crate::options::TransformOptions;
use crate::synthesize::{component_binding, is_valid_identifier};

/// Hoist every `components` entry whose value is not a plain identifier to
/// a top-level binding after the last import (or before the wrapper when
/// the script has no imports). Identifier entries stay as they are.
pub fn hoist_components(
    program: &Program<'_>,
    doc: &mut ScriptDocument<'_>,
    _options: &TransformOptions,
) -> bool {
    let Some(descriptor) = ComponentDescriptor::locate(program) else {
        return false;
    };
    let Some(Expression::ObjectExpression(components)) =
        descriptor.property("components").map(|p| &p.value)
    else {
        return false;
    };

    let last_import = program.body.iter().rev().find_map(|stmt| match stmt {
        Statement::ImportDeclaration(decl) => Some(decl.span),
        _ => None,
    });

    let mut hoisted = 0;
    for kind in &components.properties {
        let ObjectPropertyKind::ObjectProperty(entry) = kind else {
            continue;
        };
        if entry.computed || matches!(entry.value, Expression::Identifier(_)) {
            continue;
        }
        let Some(key) = property_key_name(&entry.key).filter(|k| is_valid_identifier(k)) else {
            tracing::debug!("component entry skipped: key is not a binding name");
            continue;
        };

        let binding = component_binding(key, &doc.slice(entry.value.span()));
        match last_import {
            Some(import) => doc.insert_after(import, format!("\n{binding}")),
            None => doc.insert_before(descriptor.wrapper, format!("{binding}\n")),
        }
        hoisted += 1;
    }

    tracing::debug!(hoisted, "components pass");
    hoisted > 0
}
