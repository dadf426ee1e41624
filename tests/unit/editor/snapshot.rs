use super::*;
use crate::decoration::style::DecorationStyle;

fn sample_snapshot() -> ProductSnapshot {
    ProductSnapshot {
        png: vec![1, 2, 3],
        product: ProductSpec::frame(DecorationStyle::Wood, 10, 14).unwrap(),
        transform: TransformParams {
            pan_x: 1.0,
            pan_y: -2.0,
            zoom: 1.5,
            rotation: 0.25,
        },
        pixel_width: 800,
        pixel_height: 400,
    }
}

#[test]
fn metadata_json_carries_everything_but_the_raster() {
    let json = sample_snapshot().metadata_json().unwrap();
    assert!(json.contains("\"product\":\"frame\""));
    assert!(json.contains("\"zoom\":1.5"));
    assert!(json.contains("\"pixel_width\":800"));
    assert!(!json.contains("png"));
}

#[test]
fn filename_follows_the_convention() {
    assert_eq!(
        sample_snapshot().suggested_filename(1700000000123),
        "frame-design-1700000000123.png"
    );
}

#[test]
fn encode_png_roundtrips_through_the_decoder() {
    let rgba = vec![10u8, 20, 30, 255].repeat(6);
    let png = encode_png(&rgba, 3, 2).unwrap();
    let back = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(back.dimensions(), (3, 2));
    assert_eq!(back.get_pixel(0, 0).0, [10, 20, 30, 255]);
}

#[test]
fn encode_png_rejects_length_mismatch() {
    let err = encode_png(&[0u8; 10], 3, 2).unwrap_err();
    assert!(matches!(err, FramecraftError::Validation(_)));
}
