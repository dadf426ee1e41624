use crate::foundation::error::{FramecraftError, FramecraftResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Straight-alpha RGBA8 color used by recipes, backgrounds, and brushes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (straight, not premultiplied).
    pub a: u8,
}

impl Rgba8 {
    /// Fully opaque color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color from RGBA components.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// Premultiplied `[r, g, b, a]` bytes for writing into pixel buffers.
    pub fn premultiplied(self) -> [u8; 4] {
        use crate::foundation::math::mul_div255;
        [
            mul_div255(self.r, self.a),
            mul_div255(self.g, self.a),
            mul_div255(self.b, self.a),
            self.a,
        ]
    }
}

/// Logical viewport dimensions plus the device pixel ratio of the host
/// display.
///
/// The backing store is `logical × dpr` in each axis; all drawing happens in a
/// coordinate space pre-scaled by dpr so call sites use logical units only.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewportSpec {
    /// CSS-pixel width of the drawable area.
    pub logical_width: u32,
    /// CSS-pixel height of the drawable area.
    pub logical_height: u32,
    /// Device pixel ratio reported by the host (1.0 on standard displays).
    pub device_pixel_ratio: f64,
}

impl ViewportSpec {
    /// Validate and build a viewport description.
    pub fn new(logical_width: u32, logical_height: u32, dpr: f64) -> FramecraftResult<Self> {
        if logical_width == 0 || logical_height == 0 {
            return Err(FramecraftError::validation(
                "viewport dimensions must be > 0",
            ));
        }
        if !dpr.is_finite() || dpr <= 0.0 {
            return Err(FramecraftError::validation(
                "device pixel ratio must be finite and > 0",
            ));
        }
        let spec = Self {
            logical_width,
            logical_height,
            device_pixel_ratio: dpr,
        };
        if spec.backing_width_px() > u32::from(u16::MAX)
            || spec.backing_height_px() > u32::from(u16::MAX)
        {
            return Err(FramecraftError::validation(
                "backing store dimensions exceed u16",
            ));
        }
        Ok(spec)
    }

    /// Backing-store width in device pixels.
    pub fn backing_width_px(self) -> u32 {
        (f64::from(self.logical_width) * self.device_pixel_ratio).round() as u32
    }

    /// Backing-store height in device pixels.
    pub fn backing_height_px(self) -> u32 {
        (f64::from(self.logical_height) * self.device_pixel_ratio).round() as u32
    }
}

/// The centered, aspect-correct sub-region of a container in which the
/// product artwork is drawn.
///
/// Derived state: recomputed from the container dimensions on every render
/// pass, never stored across frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FitRect {
    /// Rect width in logical units.
    pub width: f64,
    /// Rect height in logical units.
    pub height: f64,
    /// Left edge offset from the container origin.
    pub offset_x: f64,
    /// Top edge offset from the container origin.
    pub offset_y: f64,
}

impl FitRect {
    /// Zero-size rect used when the container cannot host a fit.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
        offset_x: 0.0,
        offset_y: 0.0,
    };

    /// Center point of the rect in container coordinates.
    pub fn center(self) -> Point {
        Point::new(
            self.offset_x + self.width / 2.0,
            self.offset_y + self.height / 2.0,
        )
    }

    /// The rect as a [`kurbo::Rect`].
    pub fn to_rect(self) -> Rect {
        Rect::new(
            self.offset_x,
            self.offset_y,
            self.offset_x + self.width,
            self.offset_y + self.height,
        )
    }

    /// Rect shrunk by `by` logical units on every side.
    pub fn inset(self, by: f64) -> Self {
        Self {
            width: self.width - 2.0 * by,
            height: self.height - 2.0 * by,
            offset_x: self.offset_x + by,
            offset_y: self.offset_y + by,
        }
    }

    /// True when the rect cannot be drawn: non-finite or non-positive extent.
    pub fn is_degenerate(self) -> bool {
        !(self.width.is_finite()
            && self.height.is_finite()
            && self.offset_x.is_finite()
            && self.offset_y.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }
}
