/// Convenience result type used across advblend.
pub type AdvBlendResult<T> = Result<T, AdvBlendError>;

/// Recoverable errors raised at the crate boundary (names, raw codes, files, capabilities).
///
/// Misuse of the numeric core itself is not represented here: passing an operation the
/// core cannot evaluate is a caller bug and panics.
#[derive(thiserror::Error, Debug)]
pub enum AdvBlendError {
    /// Invalid user-provided configuration or input data.
    #[error("validation error: {0}")]
    Validation(String),

    /// The case needs a device capability that was not reported.
    #[error("not supported: {0}")]
    Unsupported(String),

    /// Errors while building reference images or comparing results.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AdvBlendError {
    /// Build a [`AdvBlendError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`AdvBlendError::Unsupported`] value.
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }

    /// Build a [`AdvBlendError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`AdvBlendError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` when the error reports a missing capability rather than a failure.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported(_))
    }
}

impl From<serde_json::Error> for AdvBlendError {
    fn from(e: serde_json::Error) -> Self {
        Self::serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
