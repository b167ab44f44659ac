pub mod decode;
pub mod generate;
pub mod store;

use std::sync::Arc;

use image::RgbaImage;

use crate::core::CanvasSize;
use crate::error::ImprintResult;

/// A decoded design graphic in canonical straight-alpha RGBA8 form.
///
/// Every constructor goes through RGBA8 conversion, so sources without an
/// alpha channel come out fully opaque and downstream stages can rely on
/// per-pixel alpha being present. The pixel buffer is shared; cloning an
/// asset to place it at several regions is cheap.
#[derive(Clone, Debug)]
pub struct DesignAsset {
    image: Arc<RgbaImage>,
}

impl DesignAsset {
    /// Decode an encoded raster image (PNG, JPEG, GIF, BMP, WebP).
    pub fn decode(bytes: &[u8]) -> ImprintResult<Self> {
        decode::decode_image(bytes)
    }

    /// Decode a payload that may be either an encoded raster or an SVG
    /// document, sniffing which it is.
    ///
    /// `raster_width` sets the width SVG sources are rasterized at; raster
    /// sources ignore it.
    pub fn from_payload(bytes: &[u8], raster_width: Option<u32>) -> ImprintResult<Self> {
        decode::decode_payload(bytes, raster_width)
    }

    /// Rasterize an SVG document, scaled so its width is `raster_width`
    /// when given.
    pub fn from_svg(bytes: &[u8], raster_width: Option<u32>) -> ImprintResult<Self> {
        decode::rasterize_svg(bytes, raster_width)
    }

    /// Wrap an already decoded image, converting to RGBA8.
    pub fn from_image(image: image::DynamicImage) -> Self {
        Self {
            image: Arc::new(image.to_rgba8()),
        }
    }

    /// Wrap a straight-alpha RGBA8 buffer as-is.
    pub fn from_rgba(image: RgbaImage) -> Self {
        Self {
            image: Arc::new(image),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn size(&self) -> CanvasSize {
        CanvasSize {
            width: self.image.width(),
            height: self.image.height(),
        }
    }

    /// Natural width over height of the source bitmap.
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.image.width()) / f64::from(self.image.height())
    }

    pub fn as_rgba(&self) -> &RgbaImage {
        &self.image
    }
}
