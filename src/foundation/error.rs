/// Convenience result type used across strokesynth.
pub type SynthResult<T> = Result<T, SynthError>;

/// Top-level error taxonomy used by generator APIs.
#[derive(thiserror::Error, Debug)]
pub enum SynthError {
    /// Invalid user-provided configuration or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// The stroke library could not be loaded or is unusable.
    #[error("stroke library error: {0}")]
    Library(String),

    /// Errors while building or rasterizing a vector document.
    #[error("render error: {0}")]
    Render(String),

    /// Rejection sampling ran out of attempts before reaching the target stroke count.
    #[error(
        "could not assemble sample: accepted {accepted} of {target} strokes after {attempts} attempts"
    )]
    Assembly {
        /// Strokes accepted before giving up.
        accepted: usize,
        /// Requested stroke count.
        target: usize,
        /// Candidate draws spent.
        attempts: usize,
    },

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SynthError {
    /// Build a [`SynthError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SynthError::Library`] value.
    pub fn library(msg: impl Into<String>) -> Self {
        Self::Library(msg.into())
    }

    /// Build a [`SynthError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`SynthError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
