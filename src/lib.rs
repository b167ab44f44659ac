//! Imprint places generated or preset graphics onto base mockup images
//! (t-shirts, posters, anything with a flat print area) and composites them
//! into a final PNG.
//!
//! The pipeline has four stages: resolve pointer input into a placement
//! [`Region`], normalize the design asset to that region, alpha-composite
//! onto a fresh copy of the base, and encode the result. [`DesignSession`]
//! drives the interactive multi-placement flow; [`DesignManifest`] drives
//! the same pipeline declaratively from JSON.
#![forbid(unsafe_code)]

pub mod assets;
pub mod composite;
pub mod core;
pub mod encode;
pub mod error;
pub mod geometry;
pub mod manifest;
pub mod normalize;
pub mod session;

pub use assets::DesignAsset;
pub use assets::generate::DesignGenerator;
pub use assets::store::{PresetRef, PresetStore};
pub use composite::{BaseCanvas, Placement, composite};
pub use crate::core::{CanvasSize, FitMode, Point, Rect, Region, RegionInput};
pub use encode::{encode_png, write_png};
pub use error::{ImprintError, ImprintResult};
pub use geometry::{ResolveOpts, resolve_region};
pub use manifest::{DesignManifest, PlacementDefaults, PlacementSpec};
pub use normalize::normalize;
pub use session::DesignSession;
