//! Rewrite passes.
//!
//! Each pass re-locates the component descriptor on entry and returns
//! `false` without touching the document when its input shape is missing,
//! so any pass can run on its own or after the others.

mod components;
mod emits;
mod props;
mod setup;

use oxc_ast::ast::Program;

use crate::document::ScriptDocument;
use crate::options::TransformOptions;

pub use components::hoist_components;
pub use emits::declare_emits;
pub use props::declare_props;
pub(crate) use props::emits_typed_props;
pub use setup::inline_setup;

/// A rewrite pass. Returns whether it produced output.
pub type Pass = fn(&Program<'_>, &mut ScriptDocument<'_>, &TransformOptions) -> bool;
