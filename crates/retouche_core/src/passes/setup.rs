//! Setup body inlining.

use oxc_ast::ast::{Program, Statement};
use oxc_span::{GetSpan, Span};

use crate::component::ComponentDescriptor;
use crate::document::ScriptDocument;
use crate::literals::MultilineLiterals;
use crate::options::TransformOptions;
use crate::synthesize::hoist_statement;

/// Hoist the statements of `setup` before the wrapper, in order, dropping
/// return statements.
///
/// A statement carries its leading comments and the comments that follow it
/// on its last line. A blank line between two hoisted statements is kept.
pub fn inline_setup(
    program: &Program<'_>,
    doc: &mut ScriptDocument<'_>,
    _options: &TransformOptions,
) -> bool {
    let Some(descriptor) = ComponentDescriptor::locate(program) else {
        return false;
    };
    let Some(setup) = descriptor.setup() else {
        return false;
    };

    let source = doc.source();
    let body = setup.body_span();
    let body_end = body.end.saturating_sub(1);
    let body_start = setup
        .body
        .directives
        .last()
        .map_or(body.start + 1, |directive| directive.span.end);

    let literals = MultilineLiterals::collect(program, source);
    let mut cursor = body_start;
    let mut hoisted = String::new();
    let mut count = 0usize;

    for stmt in &setup.body.statements {
        let span = stmt.span();
        if matches!(stmt, Statement::ReturnStatement(_)) {
            cursor = span.end;
            continue;
        }

        // Whatever follows the previous statement on its own line belongs to it
        let gap = &source[cursor as usize..span.start as usize];
        let leading_at = if cursor == body_start {
            0
        } else {
            gap.find('\n').map_or(0, |i| i + 1)
        };
        let leading = &gap[leading_at..];
        let whitespace = leading.len() - leading.trim_start().len();
        let blank_before = count > 0 && leading[..whitespace].contains('\n');
        let start = cursor + (leading_at + whitespace) as u32;

        let rest = &source[span.end as usize..body_end.max(span.end) as usize];
        let end = span.end + trailing_comments(rest) as u32;
        cursor = end;

        if blank_before {
            hoisted.push('\n');
        }
        let text = doc.slice(Span::new(start, end));
        let verbatim = literal_lines(source, Span::new(start, end), &literals);
        hoisted.push_str(&hoist_statement(&text, column(source, span.start), &verbatim));
        hoisted.push('\n');
        count += 1;
    }

    tracing::debug!(hoisted = count, "setup pass");
    if count == 0 {
        return false;
    }
    doc.insert_before(descriptor.wrapper, hoisted);
    true
}

/// Length of the comments following a statement on its last line. A block
/// comment opened there is carried up to its close.
fn trailing_comments(rest: &str) -> usize {
    let trimmed = rest.trim_start_matches([' ', '\t']);
    let offset = rest.len() - trimmed.len();
    if trimmed.starts_with("//") {
        let line = trimmed.split('\n').next().unwrap_or_default();
        offset + line.trim_end().len()
    } else if let Some(close) = trimmed.strip_prefix("/*").and_then(|body| body.find("*/")) {
        let end = offset + close + 4;
        end + trailing_comments(&rest[end..])
    } else {
        0
    }
}

/// Indices of the lines of `span` that start inside a multi-line literal.
fn literal_lines(source: &str, span: Span, literals: &MultilineLiterals) -> Vec<usize> {
    source[span.start as usize..span.end as usize]
        .match_indices('\n')
        .enumerate()
        .filter(|(_, (at, _))| literals.covers(span.start + *at as u32 + 1))
        .map(|(i, _)| i + 1)
        .collect()
}

/// Byte column of `offset` within its line.
fn column(source: &str, offset: u32) -> usize {
    let offset = offset as usize;
    offset - source[..offset].rfind('\n').map_or(0, |i| i + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::passes::test_utils::run_pass;

    #[test]
    fn test_statements_hoisted_and_return_dropped() {
        let source = "\
export default defineComponent({
  setup() {
    const x = 1
    return { x }
  },
})
";
        let (produced, code) = run_pass(inline_setup, source, &TransformOptions::default());
        assert!(produced);
        assert!(code.starts_with("const x = 1\nexport default defineComponent({"));
    }

    #[test]
    fn test_comments_blank_lines_and_indentation() {
        let source = "\
export default defineComponent({
  setup(props) {
    // counter state
    const count = ref(0) // starts at zero

    watch(count, (value) => {
      console.log(value)
    })
    return { count }
  },
})
";
        let (_, code) = run_pass(inline_setup, source, &TransformOptions::default());
        let hoisted = &code[..code.find("export default").unwrap()];
        insta::assert_snapshot!(hoisted, @r"
        // counter state
        const count = ref(0) // starts at zero

        watch(count, (value) => {
          console.log(value)
        })
        ");
    }

    #[test]
    fn test_template_literal_lines_are_kept() {
        let source = "\
export default defineComponent({
  setup() {
    const tpl = `x
        y
    `
    if (ok) {
      run(`a
  b`)
    }
  },
})
";
        let (_, code) = run_pass(inline_setup, source, &TransformOptions::default());
        let hoisted = &code[..code.find("export default").unwrap()];
        assert_eq!(
            hoisted,
            "const tpl = `x\n        y\n    `\nif (ok) {\n  run(`a\n  b`)\n}\n"
        );
    }

    #[test]
    fn test_trailing_block_comment_is_kept() {
        let source = "\
export default defineComponent({
  setup() {
    const a = 1 /* first */
    const b = 2 /* second */ // and more
    const c = 3 /* spans
      lines */
    const d = 4
  },
})
";
        let (_, code) = run_pass(inline_setup, source, &TransformOptions::default());
        let hoisted = &code[..code.find("export default").unwrap()];
        insta::assert_snapshot!(hoisted, @r"
        const a = 1 /* first */
        const b = 2 /* second */ // and more
        const c = 3 /* spans
          lines */
        const d = 4
        ");
    }

    #[test]
    fn test_arrow_setup() {
        let source = "export default defineComponent({ setup: () => { onMounted(load); return {} } })\n";
        let (produced, code) = run_pass(inline_setup, source, &TransformOptions::default());
        assert!(produced);
        assert!(code.starts_with("onMounted(load);\nexport default"));
    }

    #[test]
    fn test_return_only_setup_is_noop() {
        let source = "export default defineComponent({ setup() { return {} } })\n";
        let (produced, code) = run_pass(inline_setup, source, &TransformOptions::default());
        assert!(!produced);
        assert_eq!(code, source);
    }

    #[test]
    fn test_expression_arrow_setup_is_ignored() {
        let source = "export default defineComponent({ setup: () => ({}) })\n";
        let (produced, _) = run_pass(inline_setup, source, &TransformOptions::default());
        assert!(!produced);
    }
}
