use crate::error::ImprintResult;

/// External text-to-design collaborator.
///
/// Implementations wrap whatever remote endpoint turns a prompt into a
/// graphic. The returned payload may be an encoded raster or an SVG
/// document; decode it with `DesignAsset::from_payload`, which sniffs the
/// difference.
///
/// Transport and provider failures map to
/// [`ImprintError::GenerationFailed`](crate::ImprintError::GenerationFailed).
/// The engine never retries; retry policy belongs to the calling
/// application. Generation is a blocking call with no cancellation, so
/// implementations talking to a network service should enforce their own
/// request timeout.
pub trait DesignGenerator {
    /// Produce an encoded graphic for `prompt`.
    fn generate(&mut self, prompt: &str) -> ImprintResult<Vec<u8>>;
}
