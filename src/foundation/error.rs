/// Crate-wide result alias.
pub type MicrocosmResult<T> = Result<T, MicrocosmError>;

/// Error type for scene preparation, rendering, and frame export.
#[derive(thiserror::Error, Debug)]
pub enum MicrocosmError {
    /// Invalid configuration or API misuse (bad timeline, oversized batch).
    #[error("validation error: {0}")]
    Validation(String),

    /// Backend setup failure. Fatal: no frames are produced.
    #[error("setup error: {0}")]
    Setup(String),

    /// Failure while executing or reading back a frame.
    #[error("render error: {0}")]
    Render(String),

    /// Failure while writing frames to their destination.
    #[error("export error: {0}")]
    Export(String),

    /// Anything escalated from an underlying library.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MicrocosmError {
    /// Build a [`MicrocosmError::Validation`] from any message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MicrocosmError::Setup`] from any message.
    pub fn setup(msg: impl Into<String>) -> Self {
        Self::Setup(msg.into())
    }

    /// Build a [`MicrocosmError::Render`] from any message.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`MicrocosmError::Export`] from any message.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }
}
