/// Result alias used across collaborator boundaries.
pub type SceneResult<T> = Result<T, SceneError>;

/// Failure kinds raised by collaborators and descriptor parsing.
///
/// None of these abort a build: the scene builder turns every error into an omitted feature.
#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    /// A URL could not be resolved, mapped, or opened.
    #[error("missing resource: {0}")]
    MissingResource(String),

    /// A field had the wrong type or format.
    #[error("malformed value: {0}")]
    MalformedValue(String),

    /// A named prototype or path was not found.
    #[error("unresolved reference: {0}")]
    UnresolvedReference(String),

    /// Structural validation failed (e.g. a root descriptor that is not a record).
    #[error("validation error: {0}")]
    Validation(String),

    /// JSON decoding failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other collaborator failure.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SceneError {
    /// Build a [`SceneError::MissingResource`].
    pub fn missing_resource(msg: impl Into<String>) -> Self {
        Self::MissingResource(msg.into())
    }

    /// Build a [`SceneError::MalformedValue`].
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedValue(msg.into())
    }

    /// Build a [`SceneError::UnresolvedReference`].
    pub fn unresolved(msg: impl Into<String>) -> Self {
        Self::UnresolvedReference(msg.into())
    }

    /// Build a [`SceneError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SceneError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
