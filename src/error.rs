use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort a patch run before anything is written.
#[derive(Debug, Error)]
pub enum PatchError {
    #[error("target file not found: {0:?}")]
    MissingFile(PathBuf),

    #[error("no structured region found ({0})")]
    RegionNotFound(String),

    #[error("unbalanced structured region: {open} opening vs {close} closing delimiters")]
    Unbalanced { open: usize, close: usize },

    #[error("structured region could not be parsed: {0}")]
    Malformed(String),

    #[error("structured region could not be parsed")]
    Json(#[from] serde_json::Error),

    #[error("element records lost during {pass}: {missing}")]
    KeysLost { pass: String, missing: String },

    #[error("reference blob is invalid: {0}")]
    Blob(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PatchError {
    /// Errors the console reports and returns from without a failure status.
    pub fn is_input_problem(&self) -> bool {
        matches!(
            self,
            PatchError::MissingFile(_)
                | PatchError::RegionNotFound(_)
                | PatchError::Unbalanced { .. }
                | PatchError::Malformed(_)
                | PatchError::Json(_)
        )
    }
}
