use thiserror::Error;

use crate::sources::SourceKind;

/// A source that could not be constructed. Informational unless every source fails.
#[derive(Debug, Error)]
#[error("{kind}: {error}")]
pub struct SourceError {
    pub kind: SourceKind,
    #[source]
    pub error: azure_core::Error,
}

impl SourceError {
    pub fn new(kind: SourceKind, error: azure_core::Error) -> Self {
        Self { kind, error }
    }
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("no credential successfully created:\n{}", join_source_errors(.errors))]
    NoCredential { errors: Vec<SourceError> },
    #[error("failed to assemble credential chain: {source}")]
    Chain {
        source: azure_core::Error,
        errors: Vec<SourceError>,
    },
}

impl BuildError {
    /// The construction error log, returned even though the build failed.
    pub fn source_errors(&self) -> &[SourceError] {
        match self {
            BuildError::NoCredential { errors } => errors,
            BuildError::Chain { errors, .. } => errors,
        }
    }

    pub fn into_source_errors(self) -> Vec<SourceError> {
        match self {
            BuildError::NoCredential { errors } => errors,
            BuildError::Chain { errors, .. } => errors,
        }
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("token request cancelled")]
    Cancelled,
    #[error("token request deadline exceeded")]
    DeadlineExceeded,
    #[error(transparent)]
    Credential(#[from] azure_core::Error),
}

impl FetchError {
    pub fn is_cancellation(&self) -> bool {
        matches!(self, FetchError::Cancelled | FetchError::DeadlineExceeded)
    }
}

pub(crate) fn join_source_errors(errors: &[SourceError]) -> String {
    errors
        .iter()
        .map(|e| format!("\t{e}"))
        .collect::<Vec<String>>()
        .join("\n")
}

/// Shorthand for a credential-kind `azure_core::Error`.
pub(crate) fn credential_error(message: impl Into<String>) -> azure_core::Error {
    let message = message.into();
    azure_core::Error::with_message_fn(azure_core::error::ErrorKind::Credential, || message)
}
