use std::path::Path;

use image::RgbaImage;

use crate::assets::DesignAsset;
use crate::core::{CanvasSize, FitMode, Region};
use crate::error::{ImprintError, ImprintResult};
use crate::normalize::normalize;

/// Immutable base template (e.g. a garment mockup photo) that designs are
/// composited onto.
///
/// Render steps copy the base; nothing writes to it after construction, so
/// one canvas can back any number of renders.
#[derive(Clone, Debug)]
pub struct BaseCanvas {
    image: RgbaImage,
}

impl BaseCanvas {
    /// Load a base template from disk, converting to RGBA8 once.
    pub fn load(path: impl AsRef<Path>) -> ImprintResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            ImprintError::not_found(format!("base canvas '{}': {e}", path.display()))
        })?;
        let image = image::load_from_memory(&bytes).map_err(|e| {
            ImprintError::unsupported_format(format!(
                "decode base canvas '{}': {e}",
                path.display()
            ))
        })?;
        Ok(Self {
            image: image.to_rgba8(),
        })
    }

    pub fn from_image(image: image::DynamicImage) -> Self {
        Self {
            image: image.to_rgba8(),
        }
    }

    pub fn from_rgba(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn size(&self) -> CanvasSize {
        CanvasSize {
            width: self.image.width(),
            height: self.image.height(),
        }
    }

    pub fn as_rgba(&self) -> &RgbaImage {
        &self.image
    }
}

/// One design asset bound to one target region.
#[derive(Clone, Debug)]
pub struct Placement {
    pub region: Region,
    pub asset: DesignAsset,
    pub fit: FitMode,
}

/// Composite `placements` onto a fresh copy of `base`, in order.
///
/// Later placements occlude earlier ones where they overlap. Each asset is
/// normalized to its region and alpha-blended with the source alpha as the
/// per-pixel weight; regions overhanging the base (the oversized fixed-box
/// case) are clipped. Neither the base nor any asset is mutated, and equal
/// inputs produce byte-identical output.
#[tracing::instrument(skip(base, placements))]
pub fn composite(base: &BaseCanvas, placements: &[Placement]) -> RgbaImage {
    let mut out = base.as_rgba().clone();
    for placement in placements {
        let scaled = normalize(&placement.asset, placement.region, placement.fit);
        blend_over(&mut out, &scaled, placement.region.left, placement.region.top);
    }
    out
}

/// Alpha-blend `src` onto `dst` with its top-left at `(left, top)`, clipping
/// to `dst` bounds.
fn blend_over(dst: &mut RgbaImage, src: &RgbaImage, left: u32, top: u32) {
    let (dw, dh) = dst.dimensions();
    if left >= dw || top >= dh {
        return;
    }
    let w = src.width().min(dw - left) as usize;
    let h = src.height().min(dh - top) as usize;

    let dst_stride = dw as usize * 4;
    let src_stride = src.width() as usize * 4;
    let (left, top) = (left as usize, top as usize);

    let src_buf: &[u8] = src;
    let dst_buf: &mut [u8] = dst;
    for y in 0..h {
        let d0 = (top + y) * dst_stride + left * 4;
        let s0 = y * src_stride;
        let drow = &mut dst_buf[d0..d0 + w * 4];
        let srow = &src_buf[s0..s0 + w * 4];
        for (d, s) in drow.chunks_exact_mut(4).zip(srow.chunks_exact(4)) {
            let out = blend_px([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
            d.copy_from_slice(&out);
        }
    }
}

/// Straight-alpha blend of one pixel: the source alpha weights the source,
/// the remainder keeps the destination, and the output alpha keeps whichever
/// side was more opaque.
fn blend_px(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    let sa = u16::from(src[3]);
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let inv = 255u16 - sa;
    let mut out = [0u8; 4];
    for i in 0..3 {
        let sc = mul_div255(u16::from(src[i]), sa);
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out[3] = src[3].max(dst[3]);
    out
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}
