//! # retouche_sfc
//!
//! Splits a Vue Single File Component into its top-level blocks.
//!
//! Only the block boundaries are of interest here: the codemod rewrites the
//! contents of the `<script>` block and touches its open tag, so every block
//! records both its content range and the offset of its `<` character.
//! Contents are borrowed from the source wherever possible.

mod parse;
mod types;

pub use parse::parse_sfc;
pub use types::*;
