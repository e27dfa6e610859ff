//! Declaration synthesis.
//!
//! Every declaration produced by the passes is built here as TypeScript
//! text, one line-terminated declaration per call.

use std::fmt::Write;

use crate::prop_table::PropRecord;

pub const DEFINE_PROPS: &str = "defineProps";
pub const DEFINE_EMITS: &str = "defineEmits";
pub const WITH_DEFAULTS: &str = "withDefaults";

/// Public name of the generated props type alias.
pub const PROPS_TYPE_ALIAS: &str = "Props";

/// Name of the generated emit accessor binding.
pub const EMIT_BINDING: &str = "emit";

/// Default name of the props accessor binding.
pub const PROPS_BINDING: &str = "props";

/// `type Props = { ... }`, one member per record in order.
pub fn props_type_alias(records: &[PropRecord]) -> String {
    let mut out = format!("type {PROPS_TYPE_ALIAS} = {{\n");
    for record in records {
        let marker = if record.optional() { "?" } else { "" };
        let _ = writeln!(out, "  {}{}: {}", quote_key(&record.key), marker, record.ty);
    }
    out.push_str("}\n");
    out
}

/// `const props = defineProps<Props>()`, wrapped in `withDefaults` when
/// requested and at least one record carries a default.
pub fn typed_props_binding(binding: &str, records: &[PropRecord], with_defaults: bool) -> String {
    let call = format!("{DEFINE_PROPS}<{PROPS_TYPE_ALIAS}>()");
    let defaults: Vec<_> = records
        .iter()
        .filter_map(|r| r.default.as_ref().map(|d| (r.key.as_str(), d.as_str())))
        .collect();

    if !with_defaults || defaults.is_empty() {
        return format!("const {binding} = {call}\n");
    }

    let mut out = format!("const {binding} = {WITH_DEFAULTS}({call}, {{\n");
    for (key, value) in defaults {
        let _ = writeln!(out, "  {}: {},", quote_key(key), value);
    }
    out.push_str("})\n");
    out
}

/// `const props = defineProps(<expr>)`
pub fn runtime_props_binding(binding: &str, expr: &str) -> String {
    format!("const {binding} = {DEFINE_PROPS}({expr})\n")
}

/// `const emit = defineEmits(<expr>)`
pub fn emits_binding(expr: &str) -> String {
    format!("const {EMIT_BINDING} = {DEFINE_EMITS}({expr})\n")
}

/// `const Key = <expr>`, without line terminator.
pub fn component_binding(key: &str, expr: &str) -> String {
    format!("const {key} = {expr}")
}

/// Strip up to `indent` columns of leading whitespace from every line of a
/// statement after the first. Lines listed in `verbatim_lines` (by index)
/// continue a multi-line literal and are kept as they are.
pub fn hoist_statement(text: &str, indent: usize, verbatim_lines: &[usize]) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, line) in text.split('\n').enumerate() {
        if i == 0 {
            out.push_str(line);
            continue;
        }
        out.push('\n');
        if verbatim_lines.contains(&i) {
            out.push_str(line);
            continue;
        }
        let strip = line
            .bytes()
            .take(indent)
            .take_while(|b| *b == b' ' || *b == b'\t')
            .count();
        out.push_str(&line[strip..]);
    }
    out
}

/// Property key as written in a type literal; quoted unless it is a plain
/// identifier.
fn quote_key(key: &str) -> String {
    if is_valid_identifier(key) {
        key.to_string()
    } else {
        format!("'{}'", key.replace('\\', "\\\\").replace('\'', "\\'"))
    }
}

/// Whether `s` can be used as a binding name.
pub fn is_valid_identifier(s: &str) -> bool {
    let bytes = s.as_bytes();
    let Some(&first) = bytes.first() else {
        return false;
    };
    if !first.is_ascii_alphabetic() && first != b'_' && first != b'$' {
        return false;
    }
    bytes[1..]
        .iter()
        .all(|&b| b.is_ascii_alphanumeric() || b == b'_' || b == b'$')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prop_table::PropDefault;
    use crate::resolve::{Keyword, TypeDescriptor};
    use compact_str::CompactString;

    fn record(key: &str, ty: TypeDescriptor, required: Option<bool>) -> PropRecord {
        PropRecord {
            key: CompactString::new(key),
            ty,
            required,
            default: None,
        }
    }

    #[test]
    fn test_props_type_alias() {
        let records = vec![
            record("foo", TypeDescriptor::Keyword(Keyword::String), None),
            record(
                "baz",
                TypeDescriptor::Reference(CompactString::new("Foo")),
                Some(true),
            ),
            record("aria-label", TypeDescriptor::Keyword(Keyword::String), None),
        ];
        insta::assert_snapshot!(props_type_alias(&records), @r"
        type Props = {
          foo?: string
          baz: Foo
          'aria-label'?: string
        }
        ");
    }

    #[test]
    fn test_typed_props_binding() {
        let records = vec![record("foo", TypeDescriptor::unknown(), None)];
        assert_eq!(
            typed_props_binding("props", &records, false),
            "const props = defineProps<Props>()\n"
        );
        // Nothing to default: no wrapper even when enabled
        assert_eq!(
            typed_props_binding("p", &records, true),
            "const p = defineProps<Props>()\n"
        );
    }

    #[test]
    fn test_typed_props_binding_with_defaults() {
        let mut size = record("size", TypeDescriptor::Keyword(Keyword::Number), None);
        size.default = Some(PropDefault::Literal(CompactString::new("10")));
        let mut items = record("items", TypeDescriptor::Keyword(Keyword::AnyArray), None);
        items.default = Some(PropDefault::Factory(CompactString::new("() => []")));
        let records = vec![size, record("label", TypeDescriptor::unknown(), None), items];

        insta::assert_snapshot!(typed_props_binding("props", &records, true), @r"
        const props = withDefaults(defineProps<Props>(), {
          size: 10,
          items: () => [],
        })
        ");
        assert_eq!(
            typed_props_binding("props", &records, false),
            "const props = defineProps<Props>()\n"
        );
    }

    #[test]
    fn test_accessor_bindings() {
        assert_eq!(
            runtime_props_binding("props", "['a', 'b']"),
            "const props = defineProps(['a', 'b'])\n"
        );
        assert_eq!(
            emits_binding("['change', 'update']"),
            "const emit = defineEmits(['change', 'update'])\n"
        );
        assert_eq!(
            component_binding("Foo", "defineAsyncComponent(() => import('./Foo.vue'))"),
            "const Foo = defineAsyncComponent(() => import('./Foo.vue'))"
        );
    }

    #[test]
    fn test_hoist_statement_dedents_continuation_lines() {
        let text = "watch(a, () => {\n      run()\n    })";
        assert_eq!(hoist_statement(text, 4, &[]), "watch(a, () => {\n  run()\n})");
    }

    #[test]
    fn test_hoist_statement_keeps_literal_lines() {
        let text = "const tpl = `x\n        y\n    `\n    use(tpl)";
        assert_eq!(
            hoist_statement(text, 4, &[1, 2]),
            "const tpl = `x\n        y\n    `\nuse(tpl)"
        );
    }

    #[test]
    fn test_quote_key() {
        assert_eq!(quote_key("$attrs_1"), "$attrs_1");
        assert_eq!(quote_key("1st"), "'1st'");
        assert_eq!(quote_key("it's"), "'it\\'s'");
    }
}
