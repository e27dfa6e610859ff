//! Pass orchestration.
//!
//! A transformation runs its passes in a fixed order against one parse of
//! the script and one edit document:
//!
//! ```text
//! Guarded -> ComponentsPass -> PropsPass -> EmitsPass -> SetupPass
//!         -> WrapperRemoved -> ImportCleanup -> Done
//! ```
//!
//! Components go first so hoisted factories land right after the imports,
//! ahead of anything the later passes insert before the wrapper.

use std::fmt;
use std::str::FromStr;

use compact_str::CompactString;
use oxc_allocator::Allocator;
use oxc_parser::Parser;
use oxc_span::{SourceType, Span};

use crate::component::ComponentDescriptor;
use crate::document::ScriptDocument;
use crate::error::TransformError;
use crate::import_cleanup::remove_extraneous_import;
use crate::literals::MultilineLiterals;
use crate::options::TransformOptions;
use crate::passes::{self, Pass};

/// Orchestrator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Guarded,
    ComponentsPass,
    PropsPass,
    EmitsPass,
    SetupPass,
    WrapperRemoved,
    ImportCleanup,
    Done,
}

const SCRIPT_SETUP_PASSES: &[(Stage, Pass)] = &[
    (Stage::ComponentsPass, passes::hoist_components),
    (Stage::PropsPass, passes::declare_props),
    (Stage::EmitsPass, passes::declare_emits),
    (Stage::SetupPass, passes::inline_setup),
];

const DEFINE_PROPS_PASSES: &[(Stage, Pass)] = &[(Stage::PropsPass, passes::declare_props)];

/// A registered transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transformation {
    /// Options component to `<script setup>`
    ScriptSetup,
    /// Props only; the component definition stays in place
    DefineProps,
}

impl Transformation {
    pub const ALL: [Transformation; 2] = [Transformation::ScriptSetup, Transformation::DefineProps];

    pub fn name(self) -> &'static str {
        match self {
            Transformation::ScriptSetup => "script-setup",
            Transformation::DefineProps => "define-props",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Transformation::ScriptSetup => {
                "Rewrite a defineComponent options object into <script setup>"
            }
            Transformation::DefineProps => {
                "Declare runtime props as a Props type and defineProps<Props>()"
            }
        }
    }

    fn passes(self) -> &'static [(Stage, Pass)] {
        match self {
            Transformation::ScriptSetup => SCRIPT_SETUP_PASSES,
            Transformation::DefineProps => DEFINE_PROPS_PASSES,
        }
    }

    /// Whether the component definition is removed after the passes.
    fn removes_wrapper(self) -> bool {
        matches!(self, Transformation::ScriptSetup)
    }
}

impl fmt::Display for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Transformation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Transformation::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| format!("unknown transformation `{s}`"))
    }
}

/// Result of running a transformation over a script.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptOutcome {
    pub code: String,
    pub changed: bool,
    /// The output contains TypeScript-only syntax
    pub uses_typescript: bool,
    /// Component options discarded with the wrapper
    pub dropped_options: Vec<CompactString>,
}

impl ScriptOutcome {
    fn unchanged(script: &str) -> Self {
        Self {
            code: script.to_string(),
            ..Default::default()
        }
    }
}

/// Run `transformation` over a script.
///
/// A script without a component definition comes back unchanged. Only a
/// script that fails to parse is an error.
pub fn run(
    transformation: Transformation,
    script: &str,
    source_type: SourceType,
    options: &TransformOptions,
) -> Result<ScriptOutcome, TransformError> {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, script, source_type).parse();
    if let Some(error) = ret.errors.first() {
        return Err(TransformError::ScriptParse {
            message: error.to_string(),
        });
    }
    let program = &ret.program;

    let mut stage = Stage::Guarded;
    let Some(descriptor) = ComponentDescriptor::locate(program) else {
        tracing::trace!(?stage, "no component definition");
        return Ok(ScriptOutcome::unchanged(script));
    };

    let mut doc = ScriptDocument::new(script);
    let mut uses_typescript = false;
    for &(next, pass) in transformation.passes() {
        advance(&mut stage, next);
        let produced = pass(program, &mut doc, options);
        if produced && next == Stage::PropsPass {
            uses_typescript = passes::emits_typed_props(program, options);
        }
        tracing::debug!(?stage, produced, "pass finished");
    }

    let mut dropped_options = Vec::new();
    if transformation.removes_wrapper() {
        advance(&mut stage, Stage::WrapperRemoved);
        dropped_options = descriptor.unhandled_options();
        if !dropped_options.is_empty() {
            tracing::warn!(options = ?dropped_options, "component options dropped with the definition");
        }
        doc.remove(wrapper_line(script, descriptor.wrapper));
    }

    if !doc.is_modified() {
        advance(&mut stage, Stage::Done);
        return Ok(ScriptOutcome::unchanged(script));
    }

    // Typed declarations may now sit in a script that was plain JavaScript
    let output_type = if uses_typescript {
        source_type.with_typescript(true)
    } else {
        source_type
    };
    let mut code = doc.render();
    if transformation.removes_wrapper() {
        advance(&mut stage, Stage::ImportCleanup);
        for binding in &options.cleanup_bindings {
            if let Some(cleaned) = remove_extraneous_import(&code, output_type, binding) {
                code = cleaned;
            }
        }
    }

    advance(&mut stage, Stage::Done);
    Ok(ScriptOutcome {
        code: tidy(&code, output_type, line_ending(script)),
        changed: true,
        uses_typescript,
        dropped_options,
    })
}

fn advance(stage: &mut Stage, next: Stage) {
    tracing::trace!(from = ?*stage, to = ?next, "stage");
    *stage = next;
}

/// The wrapper statement plus the line break right after it.
fn wrapper_line(script: &str, wrapper: Span) -> Span {
    let rest = &script[wrapper.end as usize..];
    let line_break = if rest.starts_with("\r\n") {
        2
    } else if rest.starts_with('\n') {
        1
    } else {
        0
    };
    Span::new(wrapper.start, wrapper.end + line_break)
}

fn line_ending(script: &str) -> &'static str {
    if script.contains("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}

/// Collapse runs of blank lines and end with a single line break.
///
/// Lines are re-terminated with `line_ending`, except inside multi-line
/// literals, which are copied as they are. Code that does not parse is
/// returned untouched.
fn tidy(code: &str, source_type: SourceType, line_ending: &str) -> String {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, code, source_type).parse();
    if !ret.errors.is_empty() {
        tracing::debug!("tidy skipped: output does not parse");
        return code.to_string();
    }
    let literals = MultilineLiterals::collect(&ret.program, code);

    let mut out = String::with_capacity(code.len() + line_ending.len());
    let mut previous_blank = false;
    let mut offset = 0u32;
    for line in code.split_inclusive('\n') {
        let start = offset;
        offset += line.len() as u32;
        let content = line.trim_end_matches(['\r', '\n']);

        // The line starts or ends inside a literal
        if literals.covers(start) || (line.ends_with('\n') && literals.covers(offset - 1)) {
            out.push_str(line);
            previous_blank = false;
            continue;
        }

        let blank = content.trim().is_empty();
        if blank && previous_blank {
            continue;
        }
        if !blank {
            out.push_str(content);
        }
        out.push_str(line_ending);
        previous_blank = blank;
    }

    let doubled = line_ending.repeat(2);
    while out.ends_with(&doubled) {
        out.truncate(out.len() - line_ending.len());
    }
    if out.is_empty() {
        out.push_str(line_ending);
    }
    out
}
