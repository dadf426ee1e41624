//! Product descriptions: which decoration and silhouette a design gets.

use crate::decoration::style::DecorationStyle;
use crate::foundation::error::{FramecraftError, FramecraftResult};

/// Smallest orderable frame edge in inches.
pub(crate) const MIN_FRAME_INCHES: u32 = 1;
/// Largest orderable frame edge in inches.
pub(crate) const MAX_FRAME_INCHES: u32 = 120;
/// Corner radius of the rounded-rect keychain silhouette, logical units.
pub(crate) const SILHOUETTE_CORNER_RADIUS: f64 = 12.0;

/// Die-cut shape of a keychain design. Selected by product configuration,
/// not by decoration style.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Silhouette {
    /// 3:2 rounded rectangle.
    #[default]
    RoundedRect,
    /// 1:1 circle.
    Circle,
}

impl Silhouette {
    /// Target aspect ratio (width / height) of the die-cut area.
    pub fn aspect_ratio(self) -> f64 {
        match self {
            Silhouette::RoundedRect => 1.5,
            Silhouette::Circle => 1.0,
        }
    }
}

/// The product a design is being composed for.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "product", rename_all = "lowercase")]
pub enum ProductSpec {
    /// Photo frame: decorated border with an inset mat, sized in inches.
    Frame {
        /// Border decoration recipe.
        style: DecorationStyle,
        /// Frame width in inches (1..=120).
        width_in: u32,
        /// Frame height in inches (1..=120).
        height_in: u32,
    },
    /// Keychain: artwork clipped to a die-cut silhouette.
    Keychain {
        /// Die-cut shape variant.
        silhouette: Silhouette,
    },
}

impl ProductSpec {
    /// Validated frame product.
    pub fn frame(style: DecorationStyle, width_in: u32, height_in: u32) -> FramecraftResult<Self> {
        for (name, v) in [("width", width_in), ("height", height_in)] {
            if !(MIN_FRAME_INCHES..=MAX_FRAME_INCHES).contains(&v) {
                return Err(FramecraftError::validation(format!(
                    "frame {name} must be {MIN_FRAME_INCHES}..={MAX_FRAME_INCHES} inches, got {v}"
                )));
            }
        }
        Ok(Self::Frame {
            style,
            width_in,
            height_in,
        })
    }

    /// Keychain product with the given die-cut shape.
    pub fn keychain(silhouette: Silhouette) -> Self {
        Self::Keychain { silhouette }
    }

    /// Target aspect ratio (width / height) of the product rectangle.
    pub fn aspect_ratio(&self) -> f64 {
        match *self {
            ProductSpec::Frame {
                width_in,
                height_in,
                ..
            } => f64::from(width_in) / f64::from(height_in),
            ProductSpec::Keychain { silhouette } => silhouette.aspect_ratio(),
        }
    }

    /// Decoration style driving border fill and bevel colors.
    pub fn style(&self) -> DecorationStyle {
        match *self {
            ProductSpec::Frame { style, .. } => style,
            ProductSpec::Keychain { .. } => DecorationStyle::None,
        }
    }

    /// Dimension label drawn under the fit rect, when the product has one.
    pub fn label(&self) -> Option<String> {
        match *self {
            ProductSpec::Frame {
                width_in,
                height_in,
                ..
            } => Some(format!("{width_in}\" × {height_in}\"")),
            ProductSpec::Keychain { .. } => None,
        }
    }

    /// File-name fragment for exported designs.
    pub fn slug(&self) -> &'static str {
        match self {
            ProductSpec::Frame { .. } => "frame",
            ProductSpec::Keychain { .. } => "keychain",
        }
    }

    /// Placeholder headline and hint shown before an upload.
    pub fn placeholder_text(&self) -> (&'static str, &'static str) {
        match self {
            ProductSpec::Frame { .. } => {
                ("Upload your photo", "Drag to position • Scroll to zoom")
            }
            ProductSpec::Keychain { .. } => (
                "Upload your design to get started",
                "Drag to position • Scroll to zoom",
            ),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/product.rs"]
mod tests;
