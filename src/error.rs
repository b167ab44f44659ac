pub type ImprintResult<T> = Result<T, ImprintError>;

/// Error taxonomy for the placement and compositing pipeline.
///
/// Every failure a caller can act on has its own variant; incidental IO and
/// encoding failures flow through `Other`.
#[derive(thiserror::Error, Debug)]
pub enum ImprintError {
    #[error("invalid region: {0}")]
    InvalidRegion(String),

    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("svg rasterization failed: {0}")]
    RasterizeFailed(String),

    #[error("design generation failed: {0}")]
    GenerationFailed(String),

    #[error("no candidate region staged for commit")]
    NoCandidateRegion,

    #[error("not found: {0}")]
    NotFound(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ImprintError {
    pub fn invalid_region(msg: impl Into<String>) -> Self {
        Self::InvalidRegion(msg.into())
    }

    pub fn unsupported_format(msg: impl Into<String>) -> Self {
        Self::UnsupportedFormat(msg.into())
    }

    pub fn rasterize_failed(msg: impl Into<String>) -> Self {
        Self::RasterizeFailed(msg.into())
    }

    pub fn generation_failed(msg: impl Into<String>) -> Self {
        Self::GenerationFailed(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
