// Array column error types
use thiserror::Error;

/// Errors raised while materialising a text-array column value.
///
/// The codec itself never fails; this only surfaces when the caller hands
/// over a value whose kind cannot carry array-literal text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArrayError {
    #[error("Unsupported input kind for text array column: {kind}")]
    UnsupportedInputKind { kind: &'static str },
}

impl ArrayError {
    pub fn unsupported(kind: &'static str) -> Self {
        ArrayError::UnsupportedInputKind { kind }
    }

    /// Stable error code, mirroring the codes the API layer reports.
    pub fn error_code(&self) -> &'static str {
        match self {
            ArrayError::UnsupportedInputKind { .. } => "UNSUPPORTED_INPUT_KIND",
        }
    }
}
