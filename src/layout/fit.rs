//! Aspect-ratio fitting math.
//!
//! Two distinct fits live here and must not be confused:
//!
//! - [`fit`] is a **contain** fit: the product rectangle is letterboxed inside
//!   the viewport, fully visible, padding respected on the constraining axis.
//! - [`cover`] is a **cover** fit: the uploaded bitmap is scaled to fully fill
//!   the product rectangle, cropping whichever axis overflows.

use crate::foundation::core::FitRect;

/// Compute the centered rectangle of `target_aspect` (width / height) that
/// fits inside a `container_w × container_h` area with `padding` logical
/// units respected on the constraining axis.
///
/// Degenerate inputs (non-positive container, padding swallowing the
/// container, non-finite or non-positive aspect) return [`FitRect::ZERO`]
/// rather than fail, so a single bad layout read never poisons a render pass.
pub fn fit(container_w: f64, container_h: f64, target_aspect: f64, padding: f64) -> FitRect {
    if !(container_w.is_finite() && container_h.is_finite() && padding.is_finite()) {
        return FitRect::ZERO;
    }
    if container_w <= 0.0 || container_h <= 0.0 {
        return FitRect::ZERO;
    }
    let padded_w = container_w - 2.0 * padding;
    let padded_h = container_h - 2.0 * padding;
    if padded_w <= 0.0 || padded_h <= 0.0 {
        return FitRect::ZERO;
    }
    if !target_aspect.is_finite() || target_aspect <= 0.0 {
        return FitRect::ZERO;
    }

    let container_aspect = padded_w / padded_h;
    if target_aspect > container_aspect {
        // Width constrains: full-bleed horizontally, centered vertically.
        let width = padded_w;
        let height = width / target_aspect;
        FitRect {
            width,
            height,
            offset_x: padding,
            offset_y: (container_h - height) / 2.0,
        }
    } else {
        let height = padded_h;
        let width = height * target_aspect;
        FitRect {
            width,
            height,
            offset_x: (container_w - width) / 2.0,
            offset_y: padding,
        }
    }
}

/// Compute the render size of a `bitmap_w × bitmap_h` bitmap scaled to fully
/// cover a `rect_w × rect_h` target while preserving the bitmap's own aspect
/// ratio. The overflowing dimension is the one the target crops.
pub fn cover(bitmap_w: f64, bitmap_h: f64, rect_w: f64, rect_h: f64) -> (f64, f64) {
    if bitmap_w <= 0.0 || bitmap_h <= 0.0 || rect_w <= 0.0 || rect_h <= 0.0 {
        return (0.0, 0.0);
    }
    let bitmap_aspect = bitmap_w / bitmap_h;
    let rect_aspect = rect_w / rect_h;
    if bitmap_aspect > rect_aspect {
        // Wider than the target: height matches, width overflows.
        (rect_h * bitmap_aspect, rect_h)
    } else {
        (rect_w, rect_w / bitmap_aspect)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/fit.rs"]
mod tests;
