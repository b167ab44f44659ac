use std::path::Path;

use image::RgbaImage;

use crate::assets::store::{load_source, normalize_rel_path};
use crate::composite::BaseCanvas;
use crate::core::{FitMode, RegionInput};
use crate::error::{ImprintError, ImprintResult};
use crate::geometry::{ResolveOpts, resolve_region};
use crate::session::DesignSession;

/// Declarative description of one composed design: a base mockup plus an
/// ordered list of placements.
///
/// One manifest format covers the fixed-box, drag and pre-resolved
/// interaction styles; the `region` input of each placement selects the
/// mode. Regions are resolved against the base at render time, so the same
/// manifest works across base images of different sizes.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct DesignManifest {
    /// Base mockup path relative to the assets root.
    pub base: String,
    #[serde(default)]
    pub defaults: PlacementDefaults,
    pub placements: Vec<PlacementSpec>,
}

/// Shared placement parameters for a manifest.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlacementDefaults {
    /// Reference edge for fixed-size boxes, typically the generation
    /// resolution.
    pub reference_dim: u32,
    /// Fixed box edge as a fraction of `reference_dim`.
    pub box_ratio: f64,
    /// Fit policy used when a placement does not override it.
    pub fit: FitMode,
}

impl Default for PlacementDefaults {
    fn default() -> Self {
        Self {
            reference_dim: 1024,
            box_ratio: 0.25,
            fit: FitMode::Stretch,
        }
    }
}

impl PlacementDefaults {
    pub fn resolve_opts(&self) -> ResolveOpts {
        ResolveOpts {
            reference_dim: self.reference_dim,
            box_ratio: self.box_ratio,
        }
    }
}

/// One asset source bound to one raw region input.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct PlacementSpec {
    /// Asset path relative to the assets root (raster or SVG).
    pub source: String,
    /// Raw placement input, resolved against the base at render time.
    pub region: RegionInput,
    /// Per-placement fit override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fit: Option<FitMode>,
}

impl DesignManifest {
    pub fn validate(&self) -> ImprintResult<()> {
        if self.base.trim().is_empty() {
            return Err(ImprintError::validation("manifest base must be non-empty"));
        }
        self.defaults.resolve_opts().validate()?;
        for (i, placement) in self.placements.iter().enumerate() {
            if placement.source.trim().is_empty() {
                return Err(ImprintError::validation(format!(
                    "placement #{i} has an empty source"
                )));
            }
        }
        Ok(())
    }

    /// Load the base and every placement asset under `assets_root`, resolve
    /// each region against the base, and compose the final image.
    ///
    /// SVG sources are rasterized at their resolved region width so they
    /// stay crisp at the placed size.
    #[tracing::instrument(skip(self, assets_root))]
    pub fn render(&self, assets_root: &Path) -> ImprintResult<RgbaImage> {
        self.validate()?;

        let base_rel = normalize_rel_path(&self.base)?;
        let base = BaseCanvas::load(assets_root.join(Path::new(&base_rel)))?;
        let opts = self.defaults.resolve_opts();

        let mut session = DesignSession::new();
        for placement in &self.placements {
            let region = resolve_region(placement.region, base.size(), &opts)?;
            let asset = load_source(assets_root, &placement.source, Some(region.width))?;
            session.set_candidate(region);
            session.commit(asset, placement.fit.unwrap_or(self.defaults.fit))?;
        }
        Ok(session.render(&base))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Point;

    fn basic_manifest() -> DesignManifest {
        DesignManifest {
            base: "shirt.png".to_string(),
            defaults: PlacementDefaults::default(),
            placements: vec![
                PlacementSpec {
                    source: "art/logo.png".to_string(),
                    region: RegionInput::Point {
                        center: Point::new(512.0, 512.0),
                    },
                    fit: None,
                },
                PlacementSpec {
                    source: "art/badge.svg".to_string(),
                    region: RegionInput::Drag {
                        from: Point::new(100.0, 100.0),
                        to: Point::new(300.0, 200.0),
                    },
                    fit: Some(FitMode::WidthLed),
                },
            ],
        }
    }

    #[test]
    fn json_roundtrip() {
        let manifest = basic_manifest();
        let s = serde_json::to_string_pretty(&manifest).unwrap();
        let de: DesignManifest = serde_json::from_str(&s).unwrap();
        assert_eq!(de.base, "shirt.png");
        assert_eq!(de.placements.len(), 2);
        assert_eq!(de.placements[1].fit, Some(FitMode::WidthLed));
    }

    #[test]
    fn defaults_fill_in_when_omitted() {
        let s = r#"{
            "base": "shirt.png",
            "placements": []
        }"#;
        let de: DesignManifest = serde_json::from_str(s).unwrap();
        assert_eq!(de.defaults.reference_dim, 1024);
        assert_eq!(de.defaults.box_ratio, 0.25);
        assert_eq!(de.defaults.fit, FitMode::Stretch);
    }

    #[test]
    fn validate_rejects_empty_base() {
        let mut manifest = basic_manifest();
        manifest.base = "  ".to_string();
        assert!(manifest.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_defaults() {
        let mut manifest = basic_manifest();
        manifest.defaults.box_ratio = 0.0;
        assert!(manifest.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_source() {
        let mut manifest = basic_manifest();
        manifest.placements[0].source = String::new();
        assert!(manifest.validate().is_err());
    }
}
