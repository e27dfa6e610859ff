//! # retouche_core
//!
//! Rewrites Vue components written with `defineComponent({ ... })` into
//! `<script setup>` form.
//!
//! ## Pipeline
//!
//! - [`transform_file`] checks that a file is an eligible `.vue` component
//!   and hands its `<script>` block to the orchestrator.
//! - [`orchestrator::run`] parses the script once with oxc and runs the
//!   passes in order: sub-component hoisting, props, emits, setup inlining.
//!   It then removes the component definition and drops imports that are
//!   no longer used.
//! - Passes never mutate the AST. They record span edits on a
//!   [`ScriptDocument`], which is rendered once at the end.
//!
//! Unrecognized shapes are skipped, so a file may come out partially
//! transformed but never fails because of them.
//!
//! ## Example
//!
//! ```ignore
//! use retouche_core::{transform_file, Transformation, TransformOptions};
//!
//! let source = r#"
//! <script lang="ts">
//! import { defineComponent } from 'vue'
//! export default defineComponent({
//!   props: { msg: String },
//! })
//! </script>
//! "#;
//!
//! let outcome = transform_file(
//!     "Hello.vue",
//!     source,
//!     Transformation::ScriptSetup,
//!     &TransformOptions::default(),
//! )?;
//! println!("{}", outcome.code);
//! ```

pub mod component;
pub mod document;
mod entry;
mod error;
pub mod import_cleanup;
mod literals;
mod options;
pub mod orchestrator;
pub mod passes;
pub mod prop_table;
mod report;
pub mod resolve;
pub mod synthesize;

pub use document::ScriptDocument;
pub use entry::*;
pub use error::*;
pub use options::*;
pub use orchestrator::{Stage, Transformation};
pub use report::*;
