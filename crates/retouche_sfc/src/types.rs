//! SFC type definitions.

use rustc_hash::FxHashMap;
use std::borrow::Cow;
use thiserror::Error;

/// Attribute map of a block's open tag. Boolean attributes map to `""`.
pub type BlockAttrs<'a> = FxHashMap<Cow<'a, str>, Cow<'a, str>>;

/// SFC Descriptor - the top-level blocks of a .vue file
#[derive(Debug, Clone, Default)]
pub struct SfcDescriptor<'a> {
    /// Filename
    pub filename: Cow<'a, str>,

    /// Source code
    pub source: Cow<'a, str>,

    /// Template block
    pub template: Option<SfcBlock<'a>>,

    /// Script block (options API or <script> without setup)
    pub script: Option<SfcScriptBlock<'a>>,

    /// Script setup block
    pub script_setup: Option<SfcScriptBlock<'a>>,

    /// Style blocks
    pub styles: Vec<SfcBlock<'a>>,

    /// Custom blocks
    pub custom_blocks: Vec<SfcBlock<'a>>,
}

/// A template, style or custom block.
#[derive(Debug, Clone)]
pub struct SfcBlock<'a> {
    /// Tag name (`template`, `style`, `i18n`, ...)
    pub block_type: Cow<'a, str>,

    /// Block content
    pub content: Cow<'a, str>,

    /// Block location in source
    pub loc: BlockLocation,

    /// Open tag attributes
    pub attrs: BlockAttrs<'a>,
}

/// Script block
#[derive(Debug, Clone)]
pub struct SfcScriptBlock<'a> {
    /// Block content
    pub content: Cow<'a, str>,

    /// Block location in source
    pub loc: BlockLocation,

    /// Script language (js/ts/tsx/jsx)
    pub lang: Option<Cow<'a, str>>,

    /// Source attribute for external script
    pub src: Option<Cow<'a, str>>,

    /// Whether this is script setup
    pub setup: bool,

    /// Open tag attributes
    pub attrs: BlockAttrs<'a>,
}

impl SfcScriptBlock<'_> {
    /// Offset just past the `<script` tag name, where new attributes can be inserted.
    pub fn attr_insert_offset(&self) -> usize {
        self.loc.tag_start + "<script".len()
    }
}

/// Location information for a block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockLocation {
    /// Offset of the `<` opening the block's start tag
    pub tag_start: usize,

    /// Content start offset in source
    pub start: usize,

    /// Content end offset in source
    pub end: usize,

    /// Start line (1-based)
    pub start_line: usize,

    /// Start column (1-based)
    pub start_column: usize,

    /// End line (1-based)
    pub end_line: usize,

    /// End column (1-based)
    pub end_column: usize,
}

/// Parse options for SFC
#[derive(Debug, Clone, Default)]
pub struct SfcParseOptions {
    /// Filename
    pub filename: String,
}

/// SFC parse error
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct SfcError {
    /// Error message
    pub message: String,

    /// Machine readable code
    pub code: Option<String>,

    /// Location of the offending block
    pub loc: Option<BlockLocation>,
}
