//! Resolution of raw pointer input into concrete placement regions.
//!
//! All three input styles funnel through [`resolve_region`], which owns the
//! rounding, corner normalization and clamping rules so callers never
//! hand-roll them.

use crate::core::{CanvasSize, Point, Rect, Region, RegionInput};
use crate::error::{ImprintError, ImprintResult};

/// Parameters for resolving pointer input into a placement region.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ResolveOpts {
    /// Reference edge length the fixed box is derived from, typically the
    /// generator's output resolution.
    pub reference_dim: u32,
    /// Fraction of `reference_dim` used as the fixed box edge.
    pub box_ratio: f64,
}

impl Default for ResolveOpts {
    fn default() -> Self {
        Self {
            reference_dim: 1024,
            box_ratio: 0.25,
        }
    }
}

impl ResolveOpts {
    /// Check that the options can produce a non-degenerate box.
    pub fn validate(&self) -> ImprintResult<()> {
        if self.reference_dim == 0 {
            return Err(ImprintError::validation("reference_dim must be > 0"));
        }
        if !self.box_ratio.is_finite() || self.box_ratio <= 0.0 {
            return Err(ImprintError::validation(
                "box_ratio must be finite and > 0",
            ));
        }
        Ok(())
    }

    /// Fixed box edge in pixels: `round(reference_dim * box_ratio)`, at
    /// least 1.
    pub fn box_edge(&self) -> u32 {
        (f64::from(self.reference_dim) * self.box_ratio)
            .round()
            .max(1.0) as u32
    }
}

/// Resolve `input` into a placement region on a base of size `base`.
///
/// Point input yields a fixed-size box centered on the click, shifted (never
/// shrunk) back inside the canvas; a box larger than the canvas pins to the
/// top-left corner and keeps its size. Drag and explicit input are corner
/// normalized and clipped to the canvas. Degenerate or fully off-canvas
/// input fails with [`ImprintError::InvalidRegion`].
pub fn resolve_region(
    input: RegionInput,
    base: CanvasSize,
    opts: &ResolveOpts,
) -> ImprintResult<Region> {
    match input {
        RegionInput::Point { center } => resolve_fixed_box(center, base, opts),
        RegionInput::Drag { from, to } => {
            resolve_corners(from.x, from.y, to.x, to.y, base, "drag")
        }
        RegionInput::Explicit { rect } => {
            resolve_corners(rect.x0, rect.y0, rect.x1, rect.y1, base, "rect")
        }
    }
}

fn resolve_fixed_box(center: Point, base: CanvasSize, opts: &ResolveOpts) -> ImprintResult<Region> {
    opts.validate()?;
    let edge = opts.box_edge();
    let cx = round_px(center.x)?;
    let cy = round_px(center.y)?;

    let half = i64::from(edge) / 2;
    let left = shift_into(cx - half, edge, base.width);
    let top = shift_into(cy - half, edge, base.height);
    Region::new(left, top, edge, edge)
}

/// Shift a box start into `[0, limit - edge]` without changing its size.
///
/// When `edge > limit` the valid interval is empty and the start pins to 0;
/// the box then overhangs the far side and the compositor clips it.
fn shift_into(pos: i64, edge: u32, limit: u32) -> u32 {
    let max_pos = (i64::from(limit) - i64::from(edge)).max(0);
    pos.clamp(0, max_pos) as u32
}

fn resolve_corners(
    ax: f64,
    ay: f64,
    bx: f64,
    by: f64,
    base: CanvasSize,
    kind: &str,
) -> ImprintResult<Region> {
    let (ax, ay) = (round_px(ax)?, round_px(ay)?);
    let (bx, by) = (round_px(bx)?, round_px(by)?);

    let left = ax.min(bx);
    let top = ay.min(by);
    let right = ax.max(bx);
    let bottom = ay.max(by);
    if left == right || top == bottom {
        return Err(ImprintError::invalid_region(format!(
            "{kind} collapses to a zero-area region"
        )));
    }

    // Clip to the canvas; a region entirely outside it has nothing to place.
    let l = left.max(0);
    let t = top.max(0);
    let r = right.min(i64::from(base.width));
    let b = bottom.min(i64::from(base.height));
    if r <= l || b <= t {
        return Err(ImprintError::invalid_region(format!(
            "{kind} lies outside the {}x{} canvas",
            base.width, base.height
        )));
    }

    Region::new(l as u32, t as u32, (r - l) as u32, (b - t) as u32)
}

fn round_px(v: f64) -> ImprintResult<i64> {
    if !v.is_finite() {
        return Err(ImprintError::invalid_region(
            "coordinate is not a finite number",
        ));
    }
    Ok(v.round() as i64)
}
