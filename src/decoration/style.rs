//! Decoration styles and their immutable fill recipes.
//!
//! A recipe is deterministic in its structural parameters (tile size, base
//! and accent colors); randomized placement (wood grain curves, vintage
//! distress spots) is resolved from a seed at fill construction time, never
//! per frame.

use crate::foundation::core::Rgba8;

/// Named border decoration recipe for the frame editor.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum DecorationStyle {
    /// Wood grain: warm brown base with seeded grain curves.
    #[default]
    Wood,
    /// Brushed metal: gray base with fine highlight rows.
    Metal,
    /// Ornate gold: circle motifs on a 30-unit grid.
    Ornate,
    /// Modern: dark two-tone diagonal gradient with an inset square.
    Modern,
    /// Vintage: weathered tan base with seeded distress spots.
    Vintage,
    /// No decoration; the border falls back to a flat neutral fill.
    None,
}

impl DecorationStyle {
    /// Every style, in display order.
    pub const ALL: [DecorationStyle; 6] = [
        DecorationStyle::Wood,
        DecorationStyle::Metal,
        DecorationStyle::Ornate,
        DecorationStyle::Modern,
        DecorationStyle::Vintage,
        DecorationStyle::None,
    ];

    pub(crate) fn seed_salt(self) -> u64 {
        match self {
            DecorationStyle::Wood => 0x77_6f_6f_64,
            DecorationStyle::Metal => 0x6d_65_74_61,
            DecorationStyle::Ornate => 0x6f_72_6e_61,
            DecorationStyle::Modern => 0x6d_6f_64_65,
            DecorationStyle::Vintage => 0x76_69_6e_74,
            DecorationStyle::None => 0,
        }
    }
}

/// Structural parameters of one style's tileable fill.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PatternRecipe {
    /// Square tile edge length in pixels.
    pub tile: u32,
    /// Base fill color painted before accents.
    pub base: Rgba8,
    /// Accent placement rules for the tile.
    pub accents: PatternAccents,
}

/// Per-style accent drawing rules inside one pattern tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PatternAccents {
    /// `count` seeded vertical grain curves of `stroke` color.
    GrainCurves {
        /// Number of curves per tile.
        count: u32,
        /// Curve color.
        stroke: Rgba8,
        /// Curve thickness in pixels.
        width: f64,
    },
    /// Horizontal highlight rows every `spacing` pixels.
    BrushedRows {
        /// Row color (translucent white).
        line: Rgba8,
        /// Distance between row tops in pixels.
        spacing: u32,
    },
    /// Circle outlines of `radius` centered in every `cell`-sized grid cell.
    CircleGrid {
        /// Outline color.
        stroke: Rgba8,
        /// Circle radius in pixels.
        radius: f64,
        /// Grid cell edge length in pixels.
        cell: u32,
    },
    /// Diagonal gradient from `from` to `to` with a centered square outline.
    DiagonalGradient {
        /// Gradient start color (top-left).
        from: Rgba8,
        /// Gradient end color (bottom-right).
        to: Rgba8,
        /// Outline color of the inset square.
        outline: Rgba8,
    },
    /// `count` seeded translucent distress spots with radius in `[1, 6)`.
    DistressSpots {
        /// Spot color (translucent).
        spot: Rgba8,
        /// Number of spots per tile.
        count: u32,
    },
    /// No accents: the tile is the flat base color.
    Flat,
}

/// The recipe for `style`.
pub fn recipe(style: DecorationStyle) -> PatternRecipe {
    match style {
        DecorationStyle::Wood => PatternRecipe {
            tile: 100,
            base: Rgba8::rgb(0x8d, 0x55, 0x24),
            accents: PatternAccents::GrainCurves {
                count: 10,
                stroke: Rgba8::rgb(0x6d, 0x45, 0x1c),
                width: 2.0,
            },
        },
        DecorationStyle::Metal => PatternRecipe {
            tile: 50,
            base: Rgba8::rgb(0xad, 0xb5, 0xbd),
            accents: PatternAccents::BrushedRows {
                line: Rgba8::rgba(255, 255, 255, 77),
                spacing: 4,
            },
        },
        DecorationStyle::Ornate => PatternRecipe {
            tile: 120,
            base: Rgba8::rgb(0xd4, 0xaf, 0x37),
            accents: PatternAccents::CircleGrid {
                stroke: Rgba8::rgb(0xb8, 0x94, 0x1f),
                radius: 8.0,
                cell: 30,
            },
        },
        DecorationStyle::Modern => PatternRecipe {
            tile: 80,
            base: Rgba8::rgb(0x2c, 0x3e, 0x50),
            accents: PatternAccents::DiagonalGradient {
                from: Rgba8::rgb(0x2c, 0x3e, 0x50),
                to: Rgba8::rgb(0x34, 0x49, 0x5e),
                outline: Rgba8::rgba(255, 255, 255, 26),
            },
        },
        DecorationStyle::Vintage => PatternRecipe {
            tile: 100,
            base: Rgba8::rgb(0x8b, 0x73, 0x55),
            accents: PatternAccents::DistressSpots {
                spot: Rgba8::rgba(109, 76, 65, 77),
                count: 20,
            },
        },
        DecorationStyle::None => PatternRecipe {
            tile: 1,
            base: FALLBACK_BORDER,
            accents: PatternAccents::Flat,
        },
    }
}

/// One stop of a bevel gradient.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BevelStop {
    /// Offset along the gradient axis, `0.0..=1.0`.
    pub offset: f64,
    /// Stop color.
    pub color: Rgba8,
}

const fn stop(offset: f64, color: Rgba8) -> BevelStop {
    BevelStop { offset, color }
}

/// Highlight / mid / shadow stops of the diagonal bevel stroke for `style`.
///
/// Light source is top-left, so every table runs light-to-dark.
pub fn bevel_stops(style: DecorationStyle) -> [BevelStop; 3] {
    let white = |a| Rgba8::rgba(255, 255, 255, a);
    let black = |a| Rgba8::rgba(0, 0, 0, a);
    match style {
        DecorationStyle::Wood | DecorationStyle::Vintage => {
            [stop(0.0, white(77)), stop(0.5, white(26)), stop(1.0, black(77))]
        }
        DecorationStyle::Metal => {
            [stop(0.0, white(102)), stop(0.5, white(26)), stop(1.0, black(102))]
        }
        DecorationStyle::Ornate => [
            stop(0.0, white(128)),
            stop(0.5, Rgba8::rgba(0xd4, 0xaf, 0x37, 204)),
            stop(1.0, Rgba8::rgba(0xb8, 0x94, 0x1f, 230)),
        ],
        DecorationStyle::Modern => {
            [stop(0.0, white(51)), stop(0.5, white(13)), stop(1.0, black(89))]
        }
        DecorationStyle::None => [
            stop(0.0, Rgba8::TRANSPARENT),
            stop(0.5, Rgba8::TRANSPARENT),
            stop(1.0, Rgba8::TRANSPARENT),
        ],
    }
}

/// Editor canvas background.
pub(crate) const CANVAS_BACKGROUND: Rgba8 = Rgba8::rgb(0xf8, 0xf9, 0xfa);
/// Cosmetic grid line color.
pub(crate) const GRID_LINE: Rgba8 = Rgba8::rgb(0xe9, 0xec, 0xef);
/// Placeholder panel fill shown before an upload.
pub(crate) const PLACEHOLDER_FILL: Rgba8 = Rgba8::rgb(0xe9, 0xec, 0xef);
/// Placeholder / hint text color.
pub(crate) const PLACEHOLDER_TEXT: Rgba8 = Rgba8::rgb(0xad, 0xb5, 0xbd);
/// Mat color inside the frame border.
pub(crate) const MAT: Rgba8 = Rgba8::rgb(255, 255, 255);
/// Dimension label text color.
pub(crate) const LABEL_TEXT: Rgba8 = Rgba8::rgb(0x49, 0x50, 0x57);
/// Keychain silhouette outline accent.
pub(crate) const KEYCHAIN_ACCENT: Rgba8 = Rgba8::rgb(0xff, 0x67, 0x00);
/// Border fill when the style is [`DecorationStyle::None`].
pub(crate) const FALLBACK_BORDER: Rgba8 = Rgba8::rgb(0xcc, 0xcc, 0xcc);
/// Snapshot background (grid-free export).
pub(crate) const SNAPSHOT_BACKGROUND: Rgba8 = Rgba8::rgb(255, 255, 255);
