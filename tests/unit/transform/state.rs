use super::*;
use crate::assets::decode::{BitmapId, SourceBitmap};
use std::sync::Arc;

fn test_bitmap() -> SourceBitmap {
    SourceBitmap {
        id: BitmapId(1),
        width: 4,
        height: 4,
        rgba8_premul: Arc::new(vec![255; 4 * 4 * 4]),
    }
}

fn loaded_state() -> ImageTransformState {
    let mut s = ImageTransformState::new(TransformLimits::default());
    s.load_bitmap(test_bitmap());
    s
}

#[test]
fn mutations_in_empty_state_have_no_effect() {
    let mut s = ImageTransformState::new(TransformLimits::default());
    s.pan(10.0, -4.0);
    s.zoom_by(2.0);
    s.rotate_by(1.0);
    let p = s.params();
    assert_eq!(p.pan_x, 0.0);
    assert_eq!(p.pan_y, 0.0);
    assert_eq!(p.zoom, 1.0);
    assert_eq!(p.rotation, 0.0);
    assert!(!s.is_loaded());
}

#[test]
fn load_bitmap_resets_to_identity() {
    let mut s = loaded_state();
    s.pan(10.0, 10.0);
    s.zoom_by(2.0);
    s.rotate_by(1.0);
    s.load_bitmap(test_bitmap());
    let p = s.params();
    assert_eq!((p.pan_x, p.pan_y, p.zoom, p.rotation), (0.0, 0.0, 1.0, 0.0));
}

#[test]
fn pan_is_scaled_by_inverse_zoom() {
    for &target_zoom in &[1.0, 0.1, 3.0] {
        let mut s = loaded_state();
        s.zoom_by(target_zoom);
        assert!((s.zoom() - target_zoom).abs() < 1e-12);
        s.pan(10.0, -6.0);
        let p = s.params();
        assert!((p.pan_x - 10.0 / target_zoom).abs() < 1e-9, "zoom {target_zoom}");
        assert!((p.pan_y + 6.0 / target_zoom).abs() < 1e-9, "zoom {target_zoom}");
    }
}

#[test]
fn zoom_round_trip_returns_to_start() {
    let mut s = loaded_state();
    for _ in 0..5 {
        s.zoom_by(1.1);
    }
    for _ in 0..5 {
        s.zoom_by(1.0 / 1.1);
    }
    assert!((s.zoom() - 1.0).abs() < 1e-9);
}

#[test]
fn zoom_never_escapes_the_clamp() {
    let mut s = loaded_state();
    for _ in 0..100 {
        s.zoom_by(10.0);
        assert!(s.zoom() <= 3.0);
    }
    assert_eq!(s.zoom(), 3.0);
    for _ in 0..100 {
        s.zoom_by(0.001);
        assert!(s.zoom() >= 0.1);
    }
    assert_eq!(s.zoom(), 0.1);
}

#[test]
fn rotation_accumulates_unbounded_but_normalizes_for_rendering() {
    let mut s = loaded_state();
    for _ in 0..10 {
        s.rotate_by(std::f64::consts::FRAC_PI_2);
    }
    assert!((s.rotation() - 5.0 * std::f64::consts::PI).abs() < 1e-9);
    assert!((s.rotation_normalized() - std::f64::consts::PI).abs() < 1e-9);

    let mut neg = loaded_state();
    neg.rotate_by(-std::f64::consts::FRAC_PI_2);
    assert!((neg.rotation_normalized() - 1.5 * std::f64::consts::PI).abs() < 1e-9);
}

#[test]
fn reset_returns_exactly_to_empty() {
    let mut s = loaded_state();
    s.pan(3.0, 4.0);
    s.zoom_by(1.7);
    s.rotate_by(0.5);
    s.reset();
    assert!(!s.is_loaded());
    assert!(s.bitmap().is_none());
    let p = s.params();
    assert_eq!((p.pan_x, p.pan_y, p.zoom, p.rotation), (0.0, 0.0, 1.0, 0.0));
}

#[test]
fn optional_pan_limit_clamps_each_axis() {
    let limits = TransformLimits {
        pan_limit: Some(50.0),
        ..TransformLimits::default()
    };
    let mut s = ImageTransformState::new(limits);
    s.load_bitmap(test_bitmap());
    s.pan(500.0, -500.0);
    let p = s.params();
    assert_eq!(p.pan_x, 50.0);
    assert_eq!(p.pan_y, -50.0);
}

#[test]
fn affine_is_identity_translation_at_rest() {
    let s = loaded_state();
    let center = Point::new(100.0, 50.0);
    let a = s.to_affine(center);
    assert_eq!(a, Affine::translate(center.to_vec2()));
}

#[test]
fn affine_applies_pan_in_the_zoomed_frame() {
    let mut s = loaded_state();
    s.zoom_by(2.0);
    s.pan(10.0, 0.0);
    // pan stored as 5 pre-zoom units; zoom doubles it back to 10 on screen.
    let a = s.to_affine(Point::new(0.0, 0.0));
    let moved = a * Point::new(0.0, 0.0);
    assert!((moved.x - 10.0).abs() < 1e-9);
    assert!(moved.y.abs() < 1e-9);
}
