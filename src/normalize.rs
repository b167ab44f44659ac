use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::assets::DesignAsset;
use crate::core::{FitMode, Region};

/// Scale `asset` for placement into `region` under `fit`.
///
/// The result is always a fresh straight-alpha RGBA8 bitmap; the asset is
/// never modified, so one asset can be normalized for several regions.
///
/// - [`FitMode::Stretch`] returns exactly `region.width x region.height`.
/// - [`FitMode::WidthLed`] returns `region.width` wide and
///   `round(width / aspect_ratio)` tall (at least 1 px); the caller decides
///   how to reconcile the height difference with the region.
///
/// Scaling uses Lanczos3 resampling in both directions.
pub fn normalize(asset: &DesignAsset, region: Region, fit: FitMode) -> RgbaImage {
    let (tw, th) = target_size(asset, region, fit);
    if asset.width() == tw && asset.height() == th {
        return asset.as_rgba().clone();
    }
    imageops::resize(asset.as_rgba(), tw, th, FilterType::Lanczos3)
}

fn target_size(asset: &DesignAsset, region: Region, fit: FitMode) -> (u32, u32) {
    match fit {
        FitMode::Stretch => (region.width, region.height),
        FitMode::WidthLed => {
            let h = (f64::from(region.width) / asset.aspect_ratio())
                .round()
                .max(1.0) as u32;
            (region.width, h)
        }
    }
}
