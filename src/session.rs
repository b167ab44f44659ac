use image::RgbaImage;

use crate::assets::DesignAsset;
use crate::assets::generate::DesignGenerator;
use crate::composite::{BaseCanvas, Placement, composite};
use crate::core::{FitMode, Region};
use crate::error::{ImprintError, ImprintResult};

/// In-memory state for one design attempt: the staged candidate region plus
/// the ordered list of committed placements.
///
/// A session is a plain value owned by its caller; create one per
/// interaction flow and drop it when the flow ends. Nothing is shared or
/// persisted, and rendering never mutates the session.
#[derive(Clone, Debug, Default)]
pub struct DesignSession {
    candidate: Option<Region>,
    placements: Vec<Placement>,
}

impl DesignSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage `region` as the pending placement target, replacing any
    /// previously staged candidate.
    pub fn set_candidate(&mut self, region: Region) {
        self.candidate = Some(region);
    }

    /// The currently staged candidate region, if any.
    pub fn candidate(&self) -> Option<Region> {
        self.candidate
    }

    /// Committed placements in commit order; later entries win on overlap.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn is_empty(&self) -> bool {
        self.candidate.is_none() && self.placements.is_empty()
    }

    /// Bind `asset` to the staged candidate region and append the pair to
    /// the committed placements.
    ///
    /// The candidate is consumed; a new region must be staged before the
    /// next commit. Without a staged candidate this fails with
    /// [`ImprintError::NoCandidateRegion`].
    pub fn commit(&mut self, asset: DesignAsset, fit: FitMode) -> ImprintResult<()> {
        let region = self.candidate.take().ok_or(ImprintError::NoCandidateRegion)?;
        self.placements.push(Placement { region, asset, fit });
        Ok(())
    }

    /// Generate a design for `prompt` and commit it in one step.
    ///
    /// The candidate is only consumed once the payload has been generated
    /// and decoded, so a failed generation leaves the session exactly as it
    /// was: the candidate stays staged and prior placements still render.
    pub fn commit_generated(
        &mut self,
        generator: &mut dyn DesignGenerator,
        prompt: &str,
        raster_width: Option<u32>,
        fit: FitMode,
    ) -> ImprintResult<()> {
        if self.candidate.is_none() {
            return Err(ImprintError::NoCandidateRegion);
        }
        let payload = generator.generate(prompt)?;
        let asset = DesignAsset::from_payload(&payload, raster_width)?;
        self.commit(asset, fit)
    }

    /// Drop every committed placement and the staged candidate.
    pub fn remove_all(&mut self) {
        self.candidate = None;
        self.placements.clear();
    }

    /// Compose the committed placements onto a fresh copy of `base`.
    ///
    /// Callable in any state; with no placements the result is a
    /// byte-identical copy of the base.
    pub fn render(&self, base: &BaseCanvas) -> RgbaImage {
        composite(base, &self.placements)
    }
}
