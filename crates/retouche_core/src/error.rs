//! Error types for retouche_core.

use thiserror::Error;

/// Errors that stop a file from being transformed.
///
/// Unrecognized component shapes are not errors: they leave the file, or
/// the affected part of it, untouched.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The single file component could not be split into blocks
    #[error("Failed to parse SFC: {0}")]
    Sfc(#[from] retouche_sfc::SfcError),

    /// The script block is not valid JavaScript/TypeScript
    #[error("Failed to parse script: {message}")]
    ScriptParse { message: String },
}
