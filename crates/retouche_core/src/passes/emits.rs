//! Emits declaration.

use oxc_ast::ast::{CallExpression, Expression, Program};
use oxc_ast::visit::walk;
use oxc_ast::Visit;
use oxc_span::{GetSpan, Span};

use crate::component::ComponentDescriptor;
use crate::document::ScriptDocument;
use crate::options::TransformOptions;
use crate::synthesize::{emits_binding, EMIT_BINDING};

/// Move a list or object `emits` option into an `emit` accessor before the
/// wrapper, and point `<ctx>.emit(...)` calls in `setup` at it.
pub fn declare_emits(
    program: &Program<'_>,
    doc: &mut ScriptDocument<'_>,
    _options: &TransformOptions,
) -> bool {
    let Some(descriptor) = ComponentDescriptor::locate(program) else {
        return false;
    };
    let Some(emits) = descriptor.property("emits") else {
        return false;
    };
    if !matches!(
        emits.value,
        Expression::ArrayExpression(_) | Expression::ObjectExpression(_)
    ) {
        tracing::debug!("emits pass: unsupported emits value");
        return false;
    }

    let declaration = emits_binding(&doc.slice(emits.value.span()));
    doc.insert_before(descriptor.wrapper, declaration);

    let Some(setup) = descriptor.setup() else {
        return true;
    };
    let Some(context) = setup.param_name(1) else {
        return true;
    };
    let mut collector = ContextEmitCollector {
        context,
        callees: Vec::new(),
    };
    collector.visit_function_body(setup.body);
    tracing::debug!(rewritten = collector.callees.len(), "emits pass");
    for callee in collector.callees {
        doc.overwrite(callee, EMIT_BINDING);
    }
    true
}

/// Collects the callee spans of `<context>.emit(...)` calls.
struct ContextEmitCollector<'n> {
    context: &'n str,
    callees: Vec<Span>,
}

impl<'a> Visit<'a> for ContextEmitCollector<'_> {
    fn visit_call_expression(&mut self, call: &CallExpression<'a>) {
        if let Expression::StaticMemberExpression(member) = &call.callee {
            let on_context = matches!(
                &member.object,
                Expression::Identifier(id) if id.name.as_str() == self.context
            );
            if on_context && member.property.name.as_str() == "emit" {
                self.callees.push(member.span);
            }
        }
        walk::walk_call_expression(self, call);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::passes::test_utils::run_pass;

    #[test]
    fn test_array_emits_and_context_calls() {
        let source = "\
export default defineComponent({
  emits: ['change', 'update'],
  setup(props, context) {
    const onInput = () => context.emit('change', 1)
    watch(value, (v) => { context.emit('update', v) })
  },
})
";
        let (produced, code) = run_pass(declare_emits, source, &TransformOptions::default());
        assert!(produced);
        insta::assert_snapshot!(code, @r"
        const emit = defineEmits(['change', 'update'])
        export default defineComponent({
          emits: ['change', 'update'],
          setup(props, context) {
            const onInput = () => emit('change', 1)
            watch(value, (v) => { emit('update', v) })
          },
        })
        ");
    }

    #[test]
    fn test_object_emits_pass_through() {
        let source = "export default defineComponent({ emits: { change: (v: number) => v > 0 } })\n";
        let (produced, code) = run_pass(declare_emits, source, &TransformOptions::default());
        assert!(produced);
        assert!(code.starts_with("const emit = defineEmits({ change: (v: number) => v > 0 })\n"));
    }

    #[test]
    fn test_only_setup_context_is_rewritten() {
        let source = "export default defineComponent({ emits: ['a'], setup(p, ctx) { other.emit('a'); ctx.emit('a') } })\n";
        let (_, code) = run_pass(declare_emits, source, &TransformOptions::default());
        assert!(code.contains("other.emit('a'); emit('a')"));
    }

    #[test]
    fn test_unsupported_emits_value_is_noop() {
        let source = "export default defineComponent({ emits: EMITS })\n";
        let (produced, code) = run_pass(declare_emits, source, &TransformOptions::default());
        assert!(!produced);
        assert_eq!(code, source);
    }
}
