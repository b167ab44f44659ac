use crate::error::{ImprintError, ImprintResult};

pub use kurbo::{Point, Rect};

/// Pixel dimensions of a base canvas or bitmap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CanvasSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Axis-aligned placement rectangle in base-canvas pixel coordinates.
///
/// `left`/`top` are always inside the canvas for resolved regions; `width`
/// and `height` may overhang it (the oversized fixed-box case), in which case
/// the compositor clips the overhang.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Region {
    /// Left edge in pixels.
    pub left: u32,
    /// Top edge in pixels.
    pub top: u32,
    /// Width in pixels, must be > 0.
    pub width: u32,
    /// Height in pixels, must be > 0.
    pub height: u32,
}

impl Region {
    /// Create a validated region with non-zero extent.
    pub fn new(left: u32, top: u32, width: u32, height: u32) -> ImprintResult<Self> {
        if width == 0 || height == 0 {
            return Err(ImprintError::invalid_region(format!(
                "region extent must be non-zero, got {width}x{height}"
            )));
        }
        Ok(Self {
            left,
            top,
            width,
            height,
        })
    }

    /// Exclusive right edge, saturating at `u32::MAX`.
    pub fn right(self) -> u32 {
        self.left.saturating_add(self.width)
    }

    /// Exclusive bottom edge, saturating at `u32::MAX`.
    pub fn bottom(self) -> u32 {
        self.top.saturating_add(self.height)
    }
}

/// How an asset's aspect ratio is reconciled with its target region when
/// scaling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FitMode {
    /// Fill the region exactly, ignoring the source aspect ratio.
    #[default]
    Stretch,
    /// Match the region's width and derive the height from the source aspect
    /// ratio; the scaled height may differ from the region's height.
    WidthLed,
}

/// Raw placement input captured from an interaction layer, before any
/// clamping or normalization.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum RegionInput {
    /// A single click point; resolves to a fixed-size box centered on it.
    Point { center: Point },
    /// Two drag corners, in either order.
    Drag { from: Point, to: Point },
    /// A caller-drawn rectangle, taken as-is apart from canvas clipping.
    Explicit { rect: Rect },
}
