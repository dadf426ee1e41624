use super::*;

#[test]
fn backing_store_scales_with_dpr() {
    let s = ViewportSurface::new(ViewportSpec::new(400, 300, 2.0).unwrap()).unwrap();
    assert_eq!(s.backing_width(), 800);
    assert_eq!(s.backing_height(), 600);
    assert_eq!(s.logical_width(), 400.0);
    assert_eq!(s.base_transform(), Affine::scale(2.0));
}

#[test]
fn clear_writes_premultiplied_pixels() {
    let mut s = ViewportSurface::new(ViewportSpec::new(4, 4, 1.0).unwrap()).unwrap();
    s.clear(Rgba8::rgba(200, 100, 50, 128));
    assert_eq!(s.pixel_at(0, 0), [100, 50, 25, 128]);
    assert_eq!(s.pixel_at(3, 3), [100, 50, 25, 128]);
}

#[test]
fn rebuild_replaces_backing_dimensions() {
    let mut s = ViewportSurface::new(ViewportSpec::new(100, 100, 1.0).unwrap()).unwrap();
    s.rebuild(ViewportSpec::new(50, 80, 2.0).unwrap()).unwrap();
    assert_eq!(s.backing_width(), 100);
    assert_eq!(s.backing_height(), 160);
    assert_eq!(s.spec().logical_width, 50);
}

#[test]
fn snapshot_unpremultiplies() {
    let mut s = ViewportSurface::new(ViewportSpec::new(2, 1, 1.0).unwrap()).unwrap();
    s.clear(Rgba8::rgba(200, 100, 50, 128));
    let straight = s.snapshot_rgba8();
    // 100/128 ≈ 199, 50/128 ≈ 100, 25/128 ≈ 50 after the round trip.
    assert_eq!(straight[3], 128);
    assert!(i16::from(straight[0]).abs_diff(200) <= 1);
    assert!(i16::from(straight[1]).abs_diff(100) <= 1);
    assert!(i16::from(straight[2]).abs_diff(50) <= 1);
}

#[test]
fn premul_byte_length_is_validated() {
    let err = pixmap_from_premul_bytes(&[0u8; 12], 2, 2).unwrap_err();
    assert!(matches!(err, FramecraftError::Validation(_)));
}

#[test]
fn affine_conversion_preserves_coefficients() {
    let a = Affine::new([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    assert_eq!(affine_to_cpu(a).as_coeffs(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
}
