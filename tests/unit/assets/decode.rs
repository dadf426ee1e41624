use super::*;

fn encode_test_png(w: u32, h: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(rgba));
    let mut out = Vec::new();
    img.write_to(
        &mut std::io::Cursor::new(&mut out),
        image::ImageFormat::Png,
    )
    .unwrap();
    out
}

#[test]
fn decodes_and_premultiplies() {
    let bytes = encode_test_png(3, 2, [200, 100, 50, 128]);
    let bmp = decode_bitmap(&bytes).unwrap();
    assert_eq!((bmp.width, bmp.height), (3, 2));
    assert_eq!(bmp.rgba8_premul.len(), 3 * 2 * 4);
    let px = &bmp.rgba8_premul[0..4];
    // (200 * 128 + 127) / 255 = 100, and so on down the channels.
    assert_eq!(px, &[100, 50, 25, 128]);
}

#[test]
fn opaque_pixels_pass_through() {
    let bytes = encode_test_png(1, 1, [10, 20, 30, 255]);
    let bmp = decode_bitmap(&bytes).unwrap();
    assert_eq!(&bmp.rgba8_premul[0..4], &[10, 20, 30, 255]);
}

#[test]
fn garbage_bytes_are_a_decode_failure() {
    let err = decode_bitmap(b"definitely not an image").unwrap_err();
    assert!(matches!(err, FramecraftError::DecodeFailure(_)));
}

#[test]
fn bitmap_ids_are_unique() {
    let bytes = encode_test_png(1, 1, [0, 0, 0, 255]);
    let a = decode_bitmap(&bytes).unwrap();
    let b = decode_bitmap(&bytes).unwrap();
    assert_ne!(a.id, b.id);
}

#[test]
fn unpremultiply_roundtrips_within_rounding() {
    let mut straight = vec![200, 100, 50, 128, 10, 20, 30, 255, 0, 0, 0, 0];
    let original = straight.clone();
    premultiply_rgba8_in_place(&mut straight);
    let back = unpremultiply_rgba8(&straight);
    for (a, b) in back.iter().zip(original.iter()) {
        assert!(i16::from(*a).abs_diff(i16::from(*b)) <= 1, "{back:?} vs {original:?}");
    }
}

#[test]
fn aspect_ratio_is_width_over_height() {
    let bytes = encode_test_png(4, 2, [1, 2, 3, 255]);
    let bmp = decode_bitmap(&bytes).unwrap();
    assert_eq!(bmp.aspect_ratio(), 2.0);
}
