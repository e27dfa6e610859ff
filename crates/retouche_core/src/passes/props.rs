//! Props declaration.

use oxc_ast::ast::{Expression, Program};
use oxc_span::GetSpan;

use crate::component::ComponentDescriptor;
use crate::document::ScriptDocument;
use crate::options::{PropsStyle, TransformOptions};
use crate::prop_table::build_prop_table;
use crate::synthesize::{
    props_type_alias, runtime_props_binding, typed_props_binding, PROPS_BINDING,
};

/// Declare the component's props before the wrapper.
///
/// An object literal yields a `Props` type alias plus a typed accessor; an
/// empty prop table yields nothing. Any other `props` value, or the runtime
/// style, is moved as-is into a runtime accessor.
pub fn declare_props(
    program: &Program<'_>,
    doc: &mut ScriptDocument<'_>,
    options: &TransformOptions,
) -> bool {
    let Some(descriptor) = ComponentDescriptor::locate(program) else {
        return false;
    };
    let Some(props) = descriptor.property("props") else {
        return false;
    };
    let binding = descriptor
        .setup()
        .and_then(|setup| setup.param_name(0))
        .unwrap_or(PROPS_BINDING);

    let declaration = match (&props.value, options.props_style) {
        (Expression::ObjectExpression(_), PropsStyle::Typed) => {
            let records = build_prop_table(&descriptor, doc.source());
            if records.is_empty() {
                tracing::debug!("props pass: empty prop table");
                return false;
            }
            let mut declaration = props_type_alias(&records);
            declaration.push_str(&typed_props_binding(binding, &records, options.with_defaults));
            declaration
        }
        (value, _) => runtime_props_binding(binding, &doc.slice(value.span())),
    };

    doc.insert_before(descriptor.wrapper, declaration);
    true
}

/// Whether [`declare_props`] emits TypeScript-only syntax for this program.
pub(crate) fn emits_typed_props(program: &Program<'_>, options: &TransformOptions) -> bool {
    options.props_style == PropsStyle::Typed
        && ComponentDescriptor::locate(program)
            .and_then(|descriptor| descriptor.property("props"))
            .is_some_and(|props| matches!(props.value, Expression::ObjectExpression(_)))
}
