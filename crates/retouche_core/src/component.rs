//! Locating the component descriptor inside a parsed script.
//!
//! The descriptor is the object literal passed to the marker call in the
//! default export: `export default defineComponent({ ... })`. Every pass
//! re-locates it through [`ComponentDescriptor::locate`] instead of holding
//! on to it, so a pass is a no-op once the marker is gone.

use compact_str::CompactString;
use oxc_ast::ast::{
    BindingPatternKind, CallExpression, Expression, FormalParameters, FunctionBody,
    ObjectExpression, ObjectProperty, ObjectPropertyKind, Program, PropertyKey, Statement,
};
use oxc_span::{GetSpan, Span};
use phf::phf_set;

/// The marker call whose presence makes a script eligible.
pub const DEFINE_COMPONENT: &str = "defineComponent";

/// Option keys the passes consume.
pub static HANDLED_OPTIONS: phf::Set<&'static str> = phf_set! {
    "props",
    "emits",
    "components",
    "setup",
};

/// The options object of a `defineComponent` call in the default export.
#[derive(Debug, Clone, Copy)]
pub struct ComponentDescriptor<'p, 'a> {
    /// Span of the whole `export default ...` statement
    pub wrapper: Span,
    pub object: &'p ObjectExpression<'a>,
}

impl<'p, 'a> ComponentDescriptor<'p, 'a> {
    /// Find the descriptor, or `None` when the script has no default export
    /// wrapping a marker call with an object literal argument.
    pub fn locate(program: &'p Program<'a>) -> Option<Self> {
        program.body.iter().find_map(|stmt| {
            let Statement::ExportDefaultDeclaration(export) = stmt else {
                return None;
            };
            let call = unwrap_call(export.declaration.as_expression()?)?;
            if !is_call_of(call, DEFINE_COMPONENT) {
                return None;
            }
            match call.arguments.first()?.as_expression()? {
                Expression::ObjectExpression(object) => Some(Self {
                    wrapper: export.span,
                    object,
                }),
                _ => None,
            }
        })
    }

    /// A direct (non-computed) property of the descriptor.
    pub fn property(&self, name: &str) -> Option<&'p ObjectProperty<'a>> {
        find_property(self.object, name)
    }

    /// Keys of the descriptor that no pass handles, in source order.
    pub fn unhandled_options(&self) -> Vec<CompactString> {
        self.object
            .properties
            .iter()
            .filter_map(|kind| match kind {
                ObjectPropertyKind::ObjectProperty(p) => property_key_name(&p.key),
                ObjectPropertyKind::SpreadProperty(_) => Some("..."),
            })
            .filter(|name| !HANDLED_OPTIONS.contains(*name))
            .map(CompactString::new)
            .collect()
    }

    /// The `setup` option, when it is a function with a block body.
    pub fn setup(&self) -> Option<SetupFunction<'p, 'a>> {
        let property = self.property("setup")?;
        let (params, body) = match &property.value {
            Expression::FunctionExpression(func) => (&*func.params, func.body.as_deref()?),
            Expression::ArrowFunctionExpression(arrow) if !arrow.expression => {
                (&*arrow.params, &*arrow.body)
            }
            _ => return None,
        };
        Some(SetupFunction { params, body })
    }
}

/// The `setup` function of a descriptor.
#[derive(Debug, Clone, Copy)]
pub struct SetupFunction<'p, 'a> {
    pub params: &'p FormalParameters<'a>,
    pub body: &'p FunctionBody<'a>,
}

impl<'p, 'a> SetupFunction<'p, 'a> {
    /// Name bound to the parameter at `index`, when it is a plain identifier.
    pub fn param_name(&self, index: usize) -> Option<&'p str> {
        match &self.params.items.get(index)?.pattern.kind {
            BindingPatternKind::BindingIdentifier(id) => Some(id.name.as_str()),
            _ => None,
        }
    }

    /// Span of the body block, braces included.
    pub fn body_span(&self) -> Span {
        self.body.span
    }
}

/// Find a direct, non-computed property of an object literal by key.
pub fn find_property<'p, 'a>(
    object: &'p ObjectExpression<'a>,
    name: &str,
) -> Option<&'p ObjectProperty<'a>> {
    object.properties.iter().find_map(|kind| match kind {
        ObjectPropertyKind::ObjectProperty(p)
            if !p.computed && property_key_name(&p.key) == Some(name) =>
        {
            Some(&**p)
        }
        _ => None,
    })
}

/// Static name of a property key (`foo` or `'foo'`).
pub fn property_key_name<'p>(key: &'p PropertyKey<'_>) -> Option<&'p str> {
    match key {
        PropertyKey::StaticIdentifier(id) => Some(id.name.as_str()),
        PropertyKey::StringLiteral(s) => Some(s.value.as_str()),
        _ => None,
    }
}

/// Whether a call's callee is the plain identifier `name`.
pub fn is_call_of(call: &CallExpression<'_>, name: &str) -> bool {
    matches!(&call.callee, Expression::Identifier(id) if id.name.as_str() == name)
}

/// Unwrap parentheses and type assertions down to a call expression.
fn unwrap_call<'p, 'a>(expr: &'p Expression<'a>) -> Option<&'p CallExpression<'a>> {
    match expr {
        Expression::CallExpression(call) => Some(call),
        Expression::TSAsExpression(ts_as) => unwrap_call(&ts_as.expression),
        Expression::TSSatisfiesExpression(ts_satisfies) => unwrap_call(&ts_satisfies.expression),
        Expression::ParenthesizedExpression(paren) => unwrap_call(&paren.expression),
        _ => None,
    }
}

/// Source text of a node.
pub fn span_text<'s>(source: &'s str, node: &impl GetSpan) -> &'s str {
    let span = node.span();
    &source[span.start as usize..span.end as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxc_allocator::Allocator;
    use oxc_parser::Parser;
    use oxc_span::SourceType;

    fn with_descriptor(source: &str, check: impl FnOnce(Option<ComponentDescriptor<'_, '_>>)) {
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, source, SourceType::ts()).parse();
        assert!(ret.errors.is_empty());
        check(ComponentDescriptor::locate(&ret.program));
    }

    #[test]
    fn test_locate_define_component() {
        let source = "import { defineComponent } from 'vue'\nexport default defineComponent({ props: {} })\n";
        with_descriptor(source, |descriptor| {
            let descriptor = descriptor.unwrap();
            assert_eq!(
                &source[descriptor.wrapper.start as usize..descriptor.wrapper.end as usize],
                "export default defineComponent({ props: {} })"
            );
            assert!(descriptor.property("props").is_some());
            assert!(descriptor.property("emits").is_none());
        });
    }

    #[test]
    fn test_plain_object_export_is_not_a_descriptor() {
        with_descriptor("export default { props: {} }\n", |descriptor| {
            assert!(descriptor.is_none());
        });
    }

    #[test]
    fn test_other_call_is_not_a_descriptor() {
        with_descriptor("export default defineNuxtPlugin({})\n", |descriptor| {
            assert!(descriptor.is_none());
        });
    }

    #[test]
    fn test_unhandled_options() {
        let source = "export default defineComponent({ name: 'A', props: {}, data() { return {} }, setup() {} })";
        with_descriptor(source, |descriptor| {
            let names = descriptor.unwrap().unhandled_options();
            assert_eq!(names, vec!["name", "data"]);
        });
    }

    #[test]
    fn test_setup_forms() {
        for source in [
            "export default defineComponent({ setup(props, ctx) { const a = 1 } })",
            "export default defineComponent({ setup: function (props, ctx) { const a = 1 } })",
            "export default defineComponent({ setup: (props, ctx) => { const a = 1 } })",
        ] {
            with_descriptor(source, |descriptor| {
                let setup = descriptor.unwrap().setup().unwrap();
                assert_eq!(setup.param_name(0), Some("props"));
                assert_eq!(setup.param_name(1), Some("ctx"));
                assert_eq!(setup.body.statements.len(), 1);
            });
        }
    }

    #[test]
    fn test_destructured_setup_context_has_no_name() {
        let source = "export default defineComponent({ setup(props, { emit }) {} })";
        with_descriptor(source, |descriptor| {
            let setup = descriptor.unwrap().setup().unwrap();
            assert_eq!(setup.param_name(1), None);
        });
    }
}
