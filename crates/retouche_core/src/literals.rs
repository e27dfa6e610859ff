//! Multi-line string and template literals.
//!
//! Lines that start inside one of these belong to the literal's value and
//! are copied verbatim by everything that reindents or tidies code.

use oxc_ast::ast::{Program, StringLiteral, TemplateLiteral};
use oxc_ast::Visit;
use oxc_span::Span;

/// Spans of the literals in a program that contain a line break.
#[derive(Debug, Default)]
pub struct MultilineLiterals {
    spans: Vec<Span>,
}

impl MultilineLiterals {
    pub fn collect(program: &Program<'_>, source: &str) -> Self {
        let mut collector = LiteralCollector {
            source,
            spans: Vec::new(),
        };
        collector.visit_program(program);
        Self {
            spans: collector.spans,
        }
    }

    /// Whether `offset` lies strictly inside a literal.
    pub fn covers(&self, offset: u32) -> bool {
        self.spans
            .iter()
            .any(|span| span.start < offset && offset < span.end)
    }
}

struct LiteralCollector<'s> {
    source: &'s str,
    spans: Vec<Span>,
}

impl LiteralCollector<'_> {
    fn push(&mut self, span: Span) {
        if self.source[span.start as usize..span.end as usize].contains('\n') {
            self.spans.push(span);
        }
    }
}

impl<'a> Visit<'a> for LiteralCollector<'_> {
    // Nested templates sit inside the outer span already.
    fn visit_template_literal(&mut self, lit: &TemplateLiteral<'a>) {
        self.push(lit.span);
    }

    fn visit_string_literal(&mut self, lit: &StringLiteral<'a>) {
        self.push(lit.span);
    }
}
