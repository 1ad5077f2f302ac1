use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while collecting system information.
#[derive(Debug, Error)]
pub enum InfoError {
    /// A lock or package manifest does not exist.
    #[error("Manifest not found: {}", path.display())]
    ManifestNotFound { path: PathBuf },

    /// A manifest exists but could not be parsed.
    #[error("Manifest {} is invalid: {reason}", path.display())]
    ManifestInvalid { path: PathBuf, reason: String },

    /// A package declares a stability outside dev, alpha, beta, RC and stable.
    #[error("Unknown stability level '{value}' declared by {package}")]
    UnknownStabilityLevel { package: String, value: String },

    /// No collector is registered under the requested identifier.
    #[error("No system info collector registered for identifier: {identifier}")]
    ServiceLookupFailure { identifier: String },

    #[error("Failed to read {}: {reason}", path.display())]
    Io { path: PathBuf, reason: String },
}

impl InfoError {
    /// Whether the error only means manifest data is unavailable.
    ///
    /// Callers that can live without manifest data fall back to defaults for these.
    pub fn is_manifest_unavailable(&self) -> bool {
        matches!(
            self,
            InfoError::ManifestNotFound { .. } | InfoError::ManifestInvalid { .. }
        )
    }
}
