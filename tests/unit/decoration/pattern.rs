use super::*;
use crate::decoration::style::{DecorationStyle, recipe};

#[test]
fn tiles_are_deterministic_for_a_seed() {
    for style in DecorationStyle::ALL {
        let r = recipe(style);
        let a = rasterize_tile(&r, 42 ^ style.seed_salt());
        let b = rasterize_tile(&r, 42 ^ style.seed_salt());
        assert_eq!(a, b, "style {style:?} re-randomized");
    }
}

#[test]
fn seeded_styles_differ_across_seeds() {
    for style in [DecorationStyle::Wood, DecorationStyle::Vintage] {
        let r = recipe(style);
        let a = rasterize_tile(&r, 1);
        let b = rasterize_tile(&r, 2);
        assert_ne!(a, b, "style {style:?} ignored its seed");
    }
}

#[test]
fn tile_buffers_have_expected_length_and_base_pixels() {
    let r = recipe(DecorationStyle::Metal);
    let buf = rasterize_tile(&r, 0);
    assert_eq!(buf.len(), (r.tile * r.tile * 4) as usize);
    // Row 1 sits between highlight rows and keeps the base color.
    let idx = ((r.tile + 1) * 4) as usize;
    assert_eq!(&buf[idx..idx + 4], &r.base.premultiplied());
}

#[test]
fn tiling_repeats_by_pixel_modulo() {
    let tile = vec![
        1, 1, 1, 255, 2, 2, 2, 255, //
        3, 3, 3, 255, 4, 4, 4, 255,
    ];
    let band = tile_into(&tile, 2, 4, 3);
    let px = |x: usize, y: usize| &band[(y * 4 + x) * 4..(y * 4 + x) * 4 + 4];
    assert_eq!(px(0, 0), px(2, 0));
    assert_eq!(px(1, 0), px(3, 0));
    assert_eq!(px(0, 0), px(0, 2));
    assert_eq!(px(1, 1), &[4, 4, 4, 255]);
}

#[test]
fn library_memoizes_fills_per_style_and_size() {
    let mut lib = PatternLibrary::new(7);
    let a = lib.fill(DecorationStyle::Wood, 64, 32).unwrap();
    let b = lib.fill(DecorationStyle::Wood, 64, 32).unwrap();
    // Same cached pixmap behind both paints.
    let (vello_cpu::ImageSource::Pixmap(pa), vello_cpu::ImageSource::Pixmap(pb)) =
        (&a.image, &b.image)
    else {
        panic!("pattern paints must be pixmap-backed");
    };
    assert!(std::sync::Arc::ptr_eq(pa, pb));

    let c = lib.fill(DecorationStyle::Wood, 65, 32).unwrap();
    let vello_cpu::ImageSource::Pixmap(pc) = &c.image else {
        panic!("pattern paints must be pixmap-backed");
    };
    assert!(!std::sync::Arc::ptr_eq(pa, pc));
}

#[test]
fn bevel_gradient_runs_light_to_dark() {
    let stops = crate::decoration::style::bevel_stops(DecorationStyle::Metal);
    let band = rasterize_bevel(&stops, 16, 16);
    // Highlight corner is exactly the first stop.
    assert_eq!(&band[0..4], &stops[0].color.premultiplied());
    // Shadow corner has darker color channels than the highlight corner.
    let first_rgb: u16 = band[0..3].iter().map(|&b| u16::from(b)).sum();
    let last = band.len() - 4;
    let last_rgb: u16 = band[last..last + 3].iter().map(|&b| u16::from(b)).sum();
    assert!(first_rgb > last_rgb, "{first_rgb} vs {last_rgb}");
}

#[test]
fn none_style_fill_is_flat() {
    let mut lib = PatternLibrary::new(0);
    let img = lib.fill(DecorationStyle::None, 8, 8).unwrap();
    let vello_cpu::ImageSource::Pixmap(p) = &img.image else {
        panic!("pattern paints must be pixmap-backed");
    };
    let data = p.data_as_u8_slice();
    let first = &data[0..4];
    for px in data.chunks_exact(4) {
        assert_eq!(px, first);
    }
}
