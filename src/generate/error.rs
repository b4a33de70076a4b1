use std::io;

use thiserror::Error;

/// Coarse classification of a failed generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A transient request/response file could not be created, written or read.
    Io,
    /// The generation tool could not be started or exited abnormally.
    Tool,
    /// The caller tried to build a prompt with no content.
    EmptyPrompt,
}

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("cannot create request")]
    CreateRequest(#[source] io::Error),

    #[error("cannot create response")]
    CreateResponse(#[source] io::Error),

    #[error("cannot read response")]
    ReadResponse(#[source] io::Error),

    #[error("{program} failed ({detail}).\nMake sure it's installed: {hint}")]
    Tool {
        program: String,
        detail: String,
        hint: String,
    },

    #[error("Please enter a prompt!")]
    EmptyPrompt,
}

impl GenerateError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerateError::CreateRequest(_)
            | GenerateError::CreateResponse(_)
            | GenerateError::ReadResponse(_) => ErrorKind::Io,
            GenerateError::Tool { .. } => ErrorKind::Tool,
            GenerateError::EmptyPrompt => ErrorKind::EmptyPrompt,
        }
    }
}

pub type Result<T> = std::result::Result<T, GenerateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_message_carries_remediation_hint() {
        let err = GenerateError::Tool {
            program: "ollama".into(),
            detail: "exit status: 1".into(),
            hint: "https://ollama.com/download".into(),
        };
        assert_eq!(err.kind(), ErrorKind::Tool);
        assert_eq!(
            err.to_string(),
            "ollama failed (exit status: 1).\nMake sure it's installed: https://ollama.com/download"
        );
    }

    #[test]
    fn io_variants_share_a_kind() {
        let e = || io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(GenerateError::CreateRequest(e()).kind(), ErrorKind::Io);
        assert_eq!(GenerateError::CreateResponse(e()).kind(), ErrorKind::Io);
        assert_eq!(GenerateError::ReadResponse(e()).kind(), ErrorKind::Io);
        assert_eq!(GenerateError::ReadResponse(e()).to_string(), "cannot read response");
    }
}
