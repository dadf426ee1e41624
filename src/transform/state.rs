use std::f64::consts::TAU;

use crate::assets::decode::SourceBitmap;
use crate::foundation::core::{Affine, Point, Vec2};

/// Bounds applied to gesture-driven transform mutations.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransformLimits {
    /// Lower zoom clamp.
    pub zoom_min: f64,
    /// Upper zoom clamp.
    pub zoom_max: f64,
    /// Optional symmetric per-axis pan clamp in logical units. `None`
    /// preserves the free-placement behavior of the original editors, where
    /// an image can be dragged fully out of view.
    pub pan_limit: Option<f64>,
}

impl Default for TransformLimits {
    fn default() -> Self {
        Self {
            zoom_min: 0.1,
            zoom_max: 3.0,
            pan_limit: None,
        }
    }
}

/// Plain transform values captured into snapshot metadata.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransformParams {
    /// Horizontal pan in pre-zoom logical units.
    pub pan_x: f64,
    /// Vertical pan in pre-zoom logical units.
    pub pan_y: f64,
    /// Zoom scale factor.
    pub zoom: f64,
    /// Accumulated rotation in radians (free-running, not normalized).
    pub rotation: f64,
}

/// Mutable transform state for one editor's uploaded artwork.
///
/// A two-state machine: `Empty` (no bitmap) and `Loaded`. Gesture mutations
/// are silent no-ops while `Empty`; loading a bitmap atomically resets the
/// transform to identity.
#[derive(Clone, Debug)]
pub struct ImageTransformState {
    bitmap: Option<SourceBitmap>,
    pan: Vec2,
    zoom: f64,
    rotation: f64,
    limits: TransformLimits,
}

impl ImageTransformState {
    /// New `Empty` state with the given mutation limits.
    pub fn new(limits: TransformLimits) -> Self {
        Self {
            bitmap: None,
            pan: Vec2::ZERO,
            zoom: 1.0,
            rotation: 0.0,
            limits,
        }
    }

    /// True once a bitmap has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.bitmap.is_some()
    }

    /// The loaded bitmap, if any.
    pub fn bitmap(&self) -> Option<&SourceBitmap> {
        self.bitmap.as_ref()
    }

    /// Current pan vector in pre-zoom logical units.
    pub fn pan_vec(&self) -> Vec2 {
        self.pan
    }

    /// Current zoom factor.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Accumulated rotation in radians. May exceed one turn.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Rotation wrapped into `[0, 2π)` for trig calls.
    pub fn rotation_normalized(&self) -> f64 {
        self.rotation.rem_euclid(TAU)
    }

    /// Replace the bitmap and reset pan/zoom/rotation to identity.
    ///
    /// Format validation happens upstream in the controller; this state
    /// machine trusts its input.
    pub fn load_bitmap(&mut self, bitmap: SourceBitmap) {
        self.bitmap = Some(bitmap);
        self.pan = Vec2::ZERO;
        self.zoom = 1.0;
        self.rotation = 0.0;
    }

    /// Apply a screen-space drag of `(dx, dy)` logical units.
    ///
    /// The delta is divided by the current zoom so perceived drag speed is
    /// constant regardless of zoom level.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        if self.bitmap.is_none() {
            return;
        }
        self.pan.x += dx / self.zoom;
        self.pan.y += dy / self.zoom;
        if let Some(limit) = self.limits.pan_limit {
            self.pan.x = self.pan.x.clamp(-limit, limit);
            self.pan.y = self.pan.y.clamp(-limit, limit);
        }
    }

    /// Multiply the zoom by `factor`, clamped to the configured bounds.
    pub fn zoom_by(&mut self, factor: f64) {
        if self.bitmap.is_none() {
            return;
        }
        self.zoom = (self.zoom * factor).clamp(self.limits.zoom_min, self.limits.zoom_max);
    }

    /// Accumulate `radians` of rotation. Unbounded.
    pub fn rotate_by(&mut self, radians: f64) {
        if self.bitmap.is_none() {
            return;
        }
        self.rotation += radians;
    }

    /// Return to the initial `Empty` identity state, clearing the bitmap.
    pub fn reset(&mut self) {
        self.bitmap = None;
        self.pan = Vec2::ZERO;
        self.zoom = 1.0;
        self.rotation = 0.0;
    }

    /// Snapshot of the transform values.
    pub fn params(&self) -> TransformParams {
        TransformParams {
            pan_x: self.pan.x,
            pan_y: self.pan.y,
            zoom: self.zoom,
            rotation: self.rotation,
        }
    }

    /// The gesture affine anchored at `center`.
    ///
    /// Canonical order: translate-to-center, rotate, zoom, then pan. Pan is
    /// expressed in the post-rotation, post-zoom local frame so a drag feels
    /// natural regardless of how the artwork is rotated or zoomed.
    pub fn to_affine(&self, center: Point) -> Affine {
        Affine::translate(center.to_vec2())
            * Affine::rotate(self.rotation_normalized())
            * Affine::scale(self.zoom)
            * Affine::translate(self.pan)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/state.rs"]
mod tests;
