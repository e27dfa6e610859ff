//! Prop table construction.
//!
//! Turns the runtime `props` object of a component descriptor into an
//! ordered table of prop records. Each value is classified by shape:
//!
//! - `foo: String` - a single constructor reference
//! - `foo: [Number, String]` - a list of constructor references
//! - `foo: { type, default?, required? }` - a descriptor object
//!
//! Anything else is unrecognized and produces no record.

use compact_str::CompactString;
use oxc_ast::ast::{
    ArrayExpression, ArrayExpressionElement, Expression, ObjectExpression, ObjectPropertyKind,
    TSType, TSTypeName, UnaryOperator,
};
use rustc_hash::FxHashSet;

use crate::component::{find_property, property_key_name, span_text, ComponentDescriptor};
use crate::resolve::{resolve, TypeDescriptor, TypeHint};

/// The generic-prop-type wrapper (`Object as PropType<T>`).
pub const PROP_TYPE: &str = "PropType";

/// Default value of a prop, as source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropDefault {
    /// A literal value (`'a'`, `1`, `true`, `null`, ...)
    Literal(CompactString),
    /// A zero-argument factory (`() => []`), kept unevaluated
    Factory(CompactString),
}

impl PropDefault {
    pub fn as_str(&self) -> &str {
        match self {
            PropDefault::Literal(text) | PropDefault::Factory(text) => text,
        }
    }
}

/// One normalized prop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropRecord {
    pub key: CompactString,
    pub ty: TypeDescriptor,
    /// `Some` only when `required` was a boolean literal
    pub required: Option<bool>,
    pub default: Option<PropDefault>,
}

impl PropRecord {
    /// A prop is required only when explicitly marked `required: true`.
    pub fn optional(&self) -> bool {
        self.required != Some(true)
    }
}

/// Shape of a value in the `props` object.
#[derive(Debug)]
enum PropShape<'p, 'a> {
    /// `foo: String`
    Reference(&'p str),
    /// `foo: [Number, String]`, reference elements only
    List(Vec<&'p str>),
    /// `foo: { type: ..., default: ..., required: ... }`
    Object(&'p ObjectExpression<'a>),
    Unrecognized,
}

/// Shape of the `type` field of a descriptor object.
#[derive(Debug)]
enum TypeField<'p> {
    Reference(&'p str),
    List(Vec<&'p str>),
    /// `X as T` or `X as PropType<T>`
    Cast {
        operand: Option<&'p str>,
        target: Option<TypeHint>,
    },
    Unrecognized,
}

/// Build the prop table of a descriptor. Empty when there is no `props`
/// object literal.
pub fn build_prop_table(descriptor: &ComponentDescriptor<'_, '_>, source: &str) -> Vec<PropRecord> {
    let Some(Expression::ObjectExpression(props)) =
        descriptor.property("props").map(|p| &p.value)
    else {
        return Vec::new();
    };

    let mut records = Vec::new();
    for key in prop_keys(props) {
        // Values are looked up again per key, never carried over from key collection
        let Some(prop) = find_property(props, key) else {
            continue;
        };
        match build_record(key, classify(&prop.value), source) {
            Some(record) => records.push(record),
            None => tracing::debug!(prop = key, "prop skipped: unrecognized shape"),
        }
    }
    records
}

/// Ordered, de-duplicated static keys of the `props` object.
fn prop_keys<'p>(props: &'p ObjectExpression<'_>) -> Vec<&'p str> {
    let mut seen = FxHashSet::default();
    props
        .properties
        .iter()
        .filter_map(|kind| match kind {
            ObjectPropertyKind::ObjectProperty(p) if !p.computed => property_key_name(&p.key),
            _ => None,
        })
        .filter(|key| seen.insert(*key))
        .collect()
}

fn classify<'p, 'a>(value: &'p Expression<'a>) -> PropShape<'p, 'a> {
    match value {
        Expression::Identifier(id) => PropShape::Reference(id.name.as_str()),
        Expression::ArrayExpression(array) => PropShape::List(reference_elements(array)),
        Expression::ObjectExpression(object) => PropShape::Object(object),
        _ => PropShape::Unrecognized,
    }
}

/// Identifier elements of a list; validators and other elements are dropped.
fn reference_elements<'p>(array: &'p ArrayExpression<'_>) -> Vec<&'p str> {
    array
        .elements
        .iter()
        .filter_map(|element| match element {
            ArrayExpressionElement::Identifier(id) => Some(id.name.as_str()),
            _ => None,
        })
        .collect()
}

fn build_record(key: &str, shape: PropShape<'_, '_>, source: &str) -> Option<PropRecord> {
    let key = CompactString::new(key);
    match shape {
        PropShape::Reference(name) => Some(PropRecord {
            key,
            ty: resolve(TypeHint::Name(CompactString::new(name))),
            required: None,
            default: None,
        }),
        PropShape::List(names) => Some(PropRecord {
            key,
            ty: resolve(TypeHint::Names(
                names.into_iter().map(CompactString::new).collect(),
            )),
            required: Some(false),
            default: None,
        }),
        PropShape::Object(object) => {
            let type_value = &find_property(object, "type")?.value;
            let ty = resolve(type_hint(classify_type_field(type_value, source)));
            Some(PropRecord {
                key,
                ty,
                required: required_flag(object),
                default: default_value(object, source),
            })
        }
        PropShape::Unrecognized => None,
    }
}

fn classify_type_field<'p>(value: &'p Expression<'_>, source: &str) -> TypeField<'p> {
    match value {
        Expression::Identifier(id) => TypeField::Reference(id.name.as_str()),
        Expression::ArrayExpression(array) => TypeField::List(reference_elements(array)),
        Expression::TSAsExpression(ts_as) => {
            let operand = match &ts_as.expression {
                Expression::Identifier(id) => Some(id.name.as_str()),
                _ => None,
            };
            TypeField::Cast {
                operand,
                target: cast_target(&ts_as.type_annotation, source),
            }
        }
        _ => TypeField::Unrecognized,
    }
}

/// The usable type after `as`: the parameter of `PropType<T>`, or the name
/// of any other referenced type.
fn cast_target(ty: &TSType<'_>, source: &str) -> Option<TypeHint> {
    let TSType::TSTypeReference(reference) = ty else {
        return None;
    };
    let is_prop_type =
        matches!(&reference.type_name, TSTypeName::IdentifierReference(id) if id.name.as_str() == PROP_TYPE);
    if is_prop_type {
        let param = reference.type_parameters.as_ref()?.params.first()?;
        Some(TypeHint::Node(CompactString::new(span_text(source, param))))
    } else {
        Some(TypeHint::Identifier(CompactString::new(span_text(
            source,
            &reference.type_name,
        ))))
    }
}

fn type_hint(field: TypeField<'_>) -> TypeHint {
    match field {
        TypeField::Reference(name) => TypeHint::Name(CompactString::new(name)),
        TypeField::List(names) => {
            TypeHint::Names(names.into_iter().map(CompactString::new).collect())
        }
        TypeField::Cast { operand, target } => target
            .or_else(|| operand.map(|name| TypeHint::Name(CompactString::new(name))))
            .unwrap_or(TypeHint::Absent),
        TypeField::Unrecognized => TypeHint::Absent,
    }
}

/// `required` is honoured only as a boolean literal.
fn required_flag(object: &ObjectExpression<'_>) -> Option<bool> {
    match &find_property(object, "required")?.value {
        Expression::BooleanLiteral(b) => Some(b.value),
        _ => None,
    }
}

fn default_value(object: &ObjectExpression<'_>, source: &str) -> Option<PropDefault> {
    let value = &find_property(object, "default")?.value;
    let text = || CompactString::new(span_text(source, value));
    match value {
        Expression::ArrowFunctionExpression(arrow) if takes_no_arguments(&arrow.params) => {
            Some(PropDefault::Factory(text()))
        }
        Expression::FunctionExpression(func) if takes_no_arguments(&func.params) => {
            Some(PropDefault::Factory(text()))
        }
        Expression::StringLiteral(_)
        | Expression::NumericLiteral(_)
        | Expression::BooleanLiteral(_)
        | Expression::NullLiteral(_)
        | Expression::BigIntLiteral(_)
        | Expression::RegExpLiteral(_) => Some(PropDefault::Literal(text())),
        Expression::TemplateLiteral(template) if template.expressions.is_empty() => {
            Some(PropDefault::Literal(text()))
        }
        Expression::UnaryExpression(unary)
            if unary.operator == UnaryOperator::UnaryNegation
                && matches!(unary.argument, Expression::NumericLiteral(_)) =>
        {
            Some(PropDefault::Literal(text()))
        }
        _ => None,
    }
}

fn takes_no_arguments(params: &oxc_ast::ast::FormalParameters<'_>) -> bool {
    params.items.is_empty() && params.rest.is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxc_allocator::Allocator;
    use oxc_parser::Parser;
    use oxc_span::SourceType;

    fn table(props: &str) -> Vec<PropRecord> {
        let source = format!("export default defineComponent({{\n  props: {props},\n}})\n");
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, &source, SourceType::ts()).parse();
        assert!(ret.errors.is_empty(), "{:?}", ret.errors);
        let descriptor = ComponentDescriptor::locate(&ret.program).unwrap();
        build_prop_table(&descriptor, &source)
    }

    fn members(records: &[PropRecord]) -> Vec<String> {
        records
            .iter()
            .map(|r| {
                let marker = if r.optional() { "?" } else { "" };
                format!("{}{}: {}", r.key, marker, r.ty)
            })
            .collect()
    }

    #[test]
    fn test_shorthand() {
        let records = table("{ foo: String }");
        assert_eq!(members(&records), ["foo?: string"]);
        assert_eq!(records[0].required, None);
        assert_eq!(records[0].default, None);
    }

    #[test]
    fn test_union_shorthand_is_optional() {
        let records = table("{ bar: [Number, String] }");
        assert_eq!(members(&records), ["bar?: number | string"]);
        assert_eq!(records[0].required, Some(false));
    }

    #[test]
    fn test_union_shorthand_drops_non_reference_elements() {
        let records = table("{ bar: [Number, (v) => v > 0, String] }");
        assert_eq!(members(&records), ["bar?: number | string"]);
    }

    #[test]
    fn test_prop_type_cast_required() {
        let records = table("{ baz: { type: Object as PropType<Foo>, required: true } }");
        assert_eq!(members(&records), ["baz: Foo"]);
    }

    #[test]
    fn test_prop_type_cast_keeps_full_type_text() {
        let records = table("{ items: { type: Array as PropType<Array<{ id: number }>> } }");
        assert_eq!(members(&records), ["items?: Array<{ id: number }>"]);
    }

    #[test]
    fn test_plain_cast_uses_target_name() {
        let records = table("{ user: { type: Object as User } }");
        assert_eq!(members(&records), ["user?: User"]);
    }

    #[test]
    fn test_cast_without_usable_target_falls_back_to_operand() {
        let records = table("{ a: { type: String as any }, b: { type: Object as PropType } }");
        assert_eq!(members(&records), ["a?: string", "b?: object"]);
    }

    #[test]
    fn test_descriptor_type_forms() {
        let records = table("{ a: { type: Number }, b: { type: [String, Boolean] }, c: { type: null } }");
        assert_eq!(
            members(&records),
            ["a?: number", "b?: string | boolean", "c?: unknown"]
        );
    }

    #[test]
    fn test_key_order_is_declaration_order() {
        let records = table("{ zeta: String, alpha: Number, mid: Boolean }");
        let keys: Vec<&str> = records.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_duplicate_keys_appear_once() {
        let records = table("{ a: String, b: Number, a: Boolean }");
        assert_eq!(members(&records), ["a?: string", "b?: number"]);
    }

    #[test]
    fn test_string_keys() {
        let records = table("{ 'aria-label': String }");
        assert_eq!(records[0].key, "aria-label");
    }

    #[test]
    fn test_default_implies_optional() {
        let records = table("{ size: { type: Number, default: 10 }, list: { type: Array, default: () => [] } }");
        assert!(records.iter().all(PropRecord::optional));
        assert_eq!(records[0].default, Some(PropDefault::Literal("10".into())));
        assert_eq!(records[1].default, Some(PropDefault::Factory("() => []".into())));
    }

    #[test]
    fn test_non_literal_default_is_absent() {
        let records = table("{ a: { type: Number, default: SOME_CONST }, b: { type: Array, default: (props) => [] } }");
        assert_eq!(records[0].default, None);
        assert_eq!(records[1].default, None);
    }

    #[test]
    fn test_negative_number_default_is_literal() {
        let records = table("{ a: { type: Number, default: -1 } }");
        assert_eq!(records[0].default, Some(PropDefault::Literal("-1".into())));
    }

    #[test]
    fn test_required_must_be_boolean_literal() {
        let records = table("{ a: { type: String, required: isRequired }, b: { type: String, required: false } }");
        assert_eq!(records[0].required, None);
        assert_eq!(records[1].required, Some(false));
        assert!(records[0].optional());
        assert!(records[1].optional());
    }

    #[test]
    fn test_descriptor_without_type_is_skipped() {
        // Known partial coverage: the key is declared but produces no member
        let records = table("{ a: { required: true }, b: String }");
        assert_eq!(members(&records), ["b?: string"]);
    }

    #[test]
    fn test_unrecognized_value_is_skipped() {
        let records = table("{ a: makeProp(), b: String }");
        assert_eq!(members(&records), ["b?: string"]);
    }

    #[test]
    fn test_nested_props_key_is_ignored() {
        let source = "export default defineComponent({\n  setup() { const x = { props: { a: String } } },\n})\n";
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, source, SourceType::ts()).parse();
        let descriptor = ComponentDescriptor::locate(&ret.program).unwrap();
        assert!(build_prop_table(&descriptor, source).is_empty());
    }

    #[test]
    fn test_non_object_props_has_no_table() {
        assert!(table("['a', 'b']").is_empty());
    }
}
