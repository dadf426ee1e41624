//! Framecraft is the canvas compositing and interactive transform engine
//! behind a set of print-on-demand product customizers (photo frames and
//! keychains).
//!
//! The engine turns user gestures (drag, wheel zoom, keyboard nudges) into an
//! image transform and composites the transformed artwork with a parametric
//! border or die-cut silhouette, correctly across device pixel ratios and
//! viewport resizes.
//!
//! # Pipeline overview
//!
//! 1. **Input**: [`EditorController`] normalizes host events (upload, drag,
//!    wheel, key, resize) into engine operations
//! 2. **State**: [`ImageTransformState`] folds gesture deltas into pan / zoom /
//!    rotation
//! 3. **Layout**: [`fit`] computes the aspect-correct product rectangle inside
//!    the viewport; [`cover`] sizes the bitmap to fully cover it
//! 4. **Render**: [`CompositeRenderer`] draws background, artwork, decoration,
//!    bevel, and label onto a [`ViewportSurface`]
//! 5. **Export**: [`ProductSnapshot`] captures a clean PNG plus the design
//!    parameters for the cart collaborator
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: decoration patterns are seeded once per
//!   library and memoized, so re-rendering never re-randomizes.
//! - **No IO in renderers**: upload bytes are decoded up front in
//!   [`decode_bitmap`]; draw code only reads prepared state.
//! - **Host-agnostic**: no DOM, timers, or global singletons — collaborators
//!   (notifier, cart sink, clock) are injected.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod decoration;
mod editor;
mod foundation;
mod layout;
mod render;
mod transform;

pub use assets::decode::{BitmapId, SourceBitmap, decode_bitmap};
pub use decoration::pattern::PatternLibrary;
pub use decoration::style::{
    BevelStop, DecorationStyle, PatternAccents, PatternRecipe, bevel_stops, recipe,
};
pub use editor::controller::{
    EditorConfig, EditorController, Notifier, PendingUpload, RotateKeyBehavior, Severity,
    UploadFile, UploadPolicy,
};
pub use editor::product::{ProductSpec, Silhouette};
pub use editor::snapshot::{CartSink, ProductSnapshot};
pub use foundation::core::{Affine, BezPath, FitRect, Point, Rect, Rgba8, Vec2, ViewportSpec};
pub use foundation::error::{FramecraftError, FramecraftResult};
pub use layout::fit::{cover, fit};
pub use render::composite::{CompositeRenderer, Scene};
pub use render::surface::ViewportSurface;
pub use render::text::{LabelBrush, LabelEngine};
pub use transform::state::{ImageTransformState, TransformLimits, TransformParams};
