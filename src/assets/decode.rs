use image::RgbaImage;

use crate::assets::DesignAsset;
use crate::error::{ImprintError, ImprintResult};

// Avoid pathological allocations for runaway scale requests.
const MAX_SVG_DIM: u32 = 16_384;

/// Decode an encoded raster image into a straight-alpha asset.
pub fn decode_image(bytes: &[u8]) -> ImprintResult<DesignAsset> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| ImprintError::unsupported_format(format!("decode image from memory: {e}")))?;
    Ok(DesignAsset::from_image(dyn_img))
}

/// Decode a payload that may be an encoded raster or an SVG document.
pub fn decode_payload(bytes: &[u8], raster_width: Option<u32>) -> ImprintResult<DesignAsset> {
    if looks_like_svg(bytes) {
        rasterize_svg(bytes, raster_width)
    } else {
        decode_image(bytes)
    }
}

/// True when the payload starts like an SVG/XML document rather than an
/// encoded raster image.
pub fn looks_like_svg(bytes: &[u8]) -> bool {
    let body = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);
    let start = body
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(body.len());
    let body = &body[start..];
    body.starts_with(b"<svg") || body.starts_with(b"<?xml") || body.starts_with(b"<!DOCTYPE svg")
}

/// Rasterize an SVG document into a straight-alpha asset.
///
/// With `target_width` the document is scaled uniformly so the raster comes
/// out that wide; rasterizing at the natural size and upscaling afterwards
/// is visibly blurry on mockup output.
pub fn rasterize_svg(bytes: &[u8], target_width: Option<u32>) -> ImprintResult<DesignAsset> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts)
        .map_err(|e| ImprintError::rasterize_failed(format!("parse svg tree: {e}")))?;

    let size = tree.size();
    let base_w = svg_px(size.width())?;
    let base_h = svg_px(size.height())?;

    let scale = match target_width {
        Some(w) if w > 0 => f64::from(w) / f64::from(base_w),
        _ => 1.0,
    };
    let w = (f64::from(base_w) * scale).round().max(1.0) as u32;
    let h = (f64::from(base_h) * scale).round().max(1.0) as u32;
    if w > MAX_SVG_DIM || h > MAX_SVG_DIM {
        return Err(ImprintError::rasterize_failed(format!(
            "svg raster size too large: {w}x{h} (max {MAX_SVG_DIM}x{MAX_SVG_DIM})"
        )));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(w, h)
        .ok_or_else(|| ImprintError::rasterize_failed("failed to allocate svg pixmap"))?;
    let sx = (w as f32) / size.width();
    let sy = (h as f32) / size.height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);
    resvg::render(&tree, xform, &mut pixmap.as_mut());

    let mut rgba = pixmap.data().to_vec();
    demultiply_rgba8_in_place(&mut rgba);
    let image = RgbaImage::from_raw(w, h, rgba)
        .ok_or_else(|| ImprintError::rasterize_failed("svg pixmap size mismatch"))?;
    Ok(DesignAsset::from_rgba(image))
}

fn svg_px(v: f32) -> ImprintResult<u32> {
    if !v.is_finite() || v <= 0.0 {
        return Err(ImprintError::rasterize_failed("svg has invalid width/height"));
    }
    Ok((v.ceil() as u32).max(1))
}

/// Pixmaps come out of resvg premultiplied; the rest of the pipeline works
/// in straight alpha.
fn demultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        if a == 255 {
            continue;
        }
        px[0] = ((px[0] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[1] = ((px[1] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[2] = ((px[2] as u16 * 255 + a / 2) / a).min(255) as u8;
    }
}
