//! Per-file entry point.
//!
//! Decides whether a file is eligible, runs the transformation over its
//! `<script>` block and splices the result back into the component.

use std::path::Path;

use compact_str::CompactString;
use oxc_span::{SourceType, Span};
use retouche_sfc::{parse_sfc, SfcParseOptions};

use crate::document::ScriptDocument;
use crate::error::TransformError;
use crate::options::TransformOptions;
use crate::orchestrator::{self, Transformation};

/// Result of transforming one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformOutcome {
    pub code: String,
    pub changed: bool,
    pub dropped_options: Vec<CompactString>,
}

impl TransformOutcome {
    fn unchanged(source: &str) -> Self {
        Self {
            code: source.to_string(),
            ..Default::default()
        }
    }
}

/// Transform a single file.
///
/// Files that are not `.vue` components, that have no inline `<script>`,
/// or that already use `<script setup>` are returned unchanged.
pub fn transform_file(
    filename: &str,
    source: &str,
    transformation: Transformation,
    options: &TransformOptions,
) -> Result<TransformOutcome, TransformError> {
    if Path::new(filename).extension().and_then(|ext| ext.to_str()) != Some("vue") {
        return Ok(TransformOutcome::unchanged(source));
    }

    let sfc = parse_sfc(
        source,
        SfcParseOptions {
            filename: filename.to_string(),
        },
    )?;
    if sfc.script_setup.is_some() {
        tracing::debug!(filename, "skipped: already uses <script setup>");
        return Ok(TransformOutcome::unchanged(source));
    }
    let Some(script) = sfc.script.as_ref().filter(|script| script.src.is_none()) else {
        tracing::debug!(filename, "skipped: no inline <script>");
        return Ok(TransformOutcome::unchanged(source));
    };

    let lang = script.lang.as_deref();
    let outcome = orchestrator::run(transformation, &script.content, source_type(lang), options)?;
    if !outcome.changed {
        return Ok(TransformOutcome::unchanged(source));
    }

    let mut doc = ScriptDocument::new(source);
    doc.overwrite(
        Span::new(script.loc.start as u32, script.loc.end as u32),
        outcome.code,
    );
    let mut attrs = String::new();
    if transformation == Transformation::ScriptSetup && options.add_setup_attribute {
        attrs.push_str(" setup");
    }
    if outcome.uses_typescript && lang.is_none() {
        attrs.push_str(" lang=\"ts\"");
    }
    if !attrs.is_empty() {
        doc.insert(script.attr_insert_offset() as u32, attrs);
    }

    Ok(TransformOutcome {
        code: doc.render(),
        changed: true,
        dropped_options: outcome.dropped_options,
    })
}

/// Source type for a `<script lang>` value.
fn source_type(lang: Option<&str>) -> SourceType {
    match lang {
        Some("ts") => SourceType::ts(),
        Some("tsx") => SourceType::tsx(),
        Some("jsx") => SourceType::jsx(),
        _ => SourceType::mjs(),
    }
}
