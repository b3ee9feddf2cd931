/// Result alias used throughout the crate.
pub type HitsterResult<T> = Result<T, HitsterError>;

/// Error taxonomy of the card rendering pipeline.
///
/// Only [`HitsterError::Configuration`] and [`HitsterError::Setup`] are fatal for a run. The
/// remaining classes are caught at the asset or per-song boundary and turned into degraded
/// output or an entry in the run's failure list.
#[derive(thiserror::Error, Debug)]
pub enum HitsterError {
    /// Unknown theme identifier or otherwise unusable configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Source artwork missing or unreadable.
    #[error("asset unavailable: {0}")]
    AssetUnavailable(String),

    /// Vector parse or rasterize failure.
    #[error("processing failure: {0}")]
    Processing(String),

    /// A single code image could not be produced.
    #[error("render failure: {0}")]
    Render(String),

    /// Output directory could not be prepared.
    #[error("setup failure: {0}")]
    Setup(String),

    /// Anything else, with its context chain.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HitsterError {
    /// Build a [`HitsterError::Configuration`].
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`HitsterError::AssetUnavailable`].
    pub fn asset_unavailable(msg: impl Into<String>) -> Self {
        Self::AssetUnavailable(msg.into())
    }

    /// Build a [`HitsterError::Processing`].
    pub fn processing(msg: impl Into<String>) -> Self {
        Self::Processing(msg.into())
    }

    /// Build a [`HitsterError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`HitsterError::Setup`].
    pub fn setup(msg: impl Into<String>) -> Self {
        Self::Setup(msg.into())
    }

    /// Whether this error must abort the whole run.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::Setup(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
