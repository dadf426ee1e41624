//! Seeded, memoized pattern and gradient paints.
//!
//! Fills are rasterized CPU-side into premultiplied RGBA8 buffers and wrapped
//! as [`vello_cpu::Image`] paints. Randomized placement (grain curves,
//! distress spots) is derived from the library seed at construction time and
//! the result cached, so re-rendering a frame never re-randomizes the
//! texture.

use std::collections::HashMap;

use crate::decoration::style::{
    BevelStop, DecorationStyle, PatternAccents, PatternRecipe, bevel_stops, recipe,
};
use crate::foundation::error::FramecraftResult;
use crate::foundation::math::Rng64;
use crate::render::surface::rgba_premul_to_image;

/// Pattern paint factory owned by one editor / surface pair.
///
/// Paints are memoized by `(style, width, height)`; the seed is fixed for the
/// library's lifetime so a style's texture is stable across frames and
/// resizes.
pub struct PatternLibrary {
    seed: u64,
    fills: HashMap<(DecorationStyle, u32, u32), vello_cpu::Image>,
    bevels: HashMap<(DecorationStyle, u32, u32), vello_cpu::Image>,
}

impl PatternLibrary {
    /// New library with the given determinism seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            fills: HashMap::new(),
            bevels: HashMap::new(),
        }
    }

    /// Border fill paint for `style`, sized `w × h` device pixels.
    pub fn fill(
        &mut self,
        style: DecorationStyle,
        w: u32,
        h: u32,
    ) -> FramecraftResult<vello_cpu::Image> {
        let key = (style, w.max(1), h.max(1));
        if let Some(img) = self.fills.get(&key) {
            return Ok(img.clone());
        }
        let r = recipe(style);
        let tile = rasterize_tile(&r, self.seed ^ style.seed_salt());
        let band = tile_into(&tile, r.tile, key.1, key.2);
        let img = rgba_premul_to_image(&band, key.1, key.2)?;
        self.fills.insert(key, img.clone());
        Ok(img)
    }

    /// Diagonal 3-stop bevel gradient paint for `style`, sized `w × h`.
    pub fn bevel_gradient(
        &mut self,
        style: DecorationStyle,
        w: u32,
        h: u32,
    ) -> FramecraftResult<vello_cpu::Image> {
        let key = (style, w.max(1), h.max(1));
        if let Some(img) = self.bevels.get(&key) {
            return Ok(img.clone());
        }
        let band = rasterize_bevel(&bevel_stops(style), key.1, key.2);
        let img = rgba_premul_to_image(&band, key.1, key.2)?;
        self.bevels.insert(key, img.clone());
        Ok(img)
    }
}

/// Rasterize one pattern tile into premultiplied RGBA8.
pub(crate) fn rasterize_tile(r: &PatternRecipe, seed: u64) -> Vec<u8> {
    let tile = r.tile.max(1);
    let mut buf = vec![0u8; (tile as usize) * (tile as usize) * 4];
    fill_solid(&mut buf, r.base.premultiplied());

    let mut rng = Rng64::new(seed);
    match r.accents {
        PatternAccents::Flat => {}
        PatternAccents::GrainCurves {
            count,
            stroke,
            width,
        } => {
            let src = stroke.premultiplied();
            let t = f64::from(tile);
            for _ in 0..count {
                // Cubic through four seeded x positions, top to bottom.
                let p0 = (rng.next_range(0.0, t), 0.0);
                let p1 = (rng.next_range(0.0, t), 0.3 * t);
                let p2 = (rng.next_range(0.0, t), 0.7 * t);
                let p3 = (rng.next_range(0.0, t), t);
                let steps = (tile * 3).max(8);
                for i in 0..=steps {
                    let s = f64::from(i) / f64::from(steps);
                    let omv = 1.0 - s;
                    let x = omv * omv * omv * p0.0
                        + 3.0 * omv * omv * s * p1.0
                        + 3.0 * omv * s * s * p2.0
                        + s * s * s * p3.0;
                    let y = omv * omv * omv * p0.1
                        + 3.0 * omv * omv * s * p1.1
                        + 3.0 * omv * s * s * p2.1
                        + s * s * s * p3.1;
                    stamp_disc(&mut buf, tile, x, y, width / 2.0, src);
                }
            }
        }
        PatternAccents::BrushedRows { line, spacing } => {
            let src = line.premultiplied();
            let mut y = 0u32;
            while y < tile {
                for x in 0..tile {
                    blend_over(&mut buf, tile, x, y, src);
                }
                y += spacing.max(1);
            }
        }
        PatternAccents::CircleGrid {
            stroke,
            radius,
            cell,
        } => {
            let src = stroke.premultiplied();
            let cell = cell.max(1);
            let half = f64::from(cell) / 2.0;
            let mut cy = 0u32;
            while cy < tile {
                let mut cx = 0u32;
                while cx < tile {
                    stamp_ring(
                        &mut buf,
                        tile,
                        f64::from(cx) + half,
                        f64::from(cy) + half,
                        radius,
                        1.0,
                        src,
                    );
                    cx += cell;
                }
                cy += cell;
            }
        }
        PatternAccents::DiagonalGradient { from, to, outline } => {
            let a = from.premultiplied();
            let b = to.premultiplied();
            let denom = (2 * tile.saturating_sub(1)).max(1) as f64;
            for y in 0..tile {
                for x in 0..tile {
                    let t = f64::from(x + y) / denom;
                    let c = lerp_premul(a, b, t);
                    put_px(&mut buf, tile, x, y, c);
                }
            }
            // Inset square outline at quarter margins.
            let src = outline.premultiplied();
            let lo = tile / 4;
            let hi = (3 * tile) / 4;
            for x in lo..=hi.min(tile - 1) {
                blend_over(&mut buf, tile, x, lo, src);
                blend_over(&mut buf, tile, x, hi.min(tile - 1), src);
            }
            for y in lo..=hi.min(tile - 1) {
                blend_over(&mut buf, tile, lo, y, src);
                blend_over(&mut buf, tile, hi.min(tile - 1), y, src);
            }
        }
        PatternAccents::DistressSpots { spot, count } => {
            let src = spot.premultiplied();
            let t = f64::from(tile);
            for _ in 0..count {
                let cx = rng.next_range(0.0, t);
                let cy = rng.next_range(0.0, t);
                let radius = rng.next_range(1.0, 6.0);
                stamp_disc(&mut buf, tile, cx, cy, radius, src);
            }
        }
    }
    buf
}

/// Tile `tile`-sized square bytes into a `w × h` band by pixel modulo.
fn tile_into(tile_bytes: &[u8], tile: u32, w: u32, h: u32) -> Vec<u8> {
    let tile = tile.max(1) as usize;
    let (w, h) = (w as usize, h as usize);
    let mut out = vec![0u8; w * h * 4];
    for y in 0..h {
        let ty = y % tile;
        for x in 0..w {
            let tx = x % tile;
            let src = (ty * tile + tx) * 4;
            let dst = (y * w + x) * 4;
            out[dst..dst + 4].copy_from_slice(&tile_bytes[src..src + 4]);
        }
    }
    out
}

/// Rasterize the light-to-dark diagonal gradient across `w × h`.
pub(crate) fn rasterize_bevel(stops: &[BevelStop; 3], w: u32, h: u32) -> Vec<u8> {
    let s0 = stops[0].color.premultiplied();
    let s1 = stops[1].color.premultiplied();
    let s2 = stops[2].color.premultiplied();
    let (wf, hf) = (f64::from(w), f64::from(h));
    let denom = (wf * wf + hf * hf).max(1.0);
    let mut out = vec![0u8; (w as usize) * (h as usize) * 4];
    for y in 0..h {
        for x in 0..w {
            // Projection onto the top-left → bottom-right gradient axis.
            let t = (f64::from(x) * wf + f64::from(y) * hf) / denom;
            let c = if t <= 0.5 {
                lerp_premul(s0, s1, t * 2.0)
            } else {
                lerp_premul(s1, s2, (t - 0.5) * 2.0)
            };
            put_px(&mut out, w, x, y, c);
        }
    }
    out
}

fn fill_solid(buf: &mut [u8], premul: [u8; 4]) {
    for px in buf.chunks_exact_mut(4) {
        px.copy_from_slice(&premul);
    }
}

fn put_px(buf: &mut [u8], w: u32, x: u32, y: u32, premul: [u8; 4]) {
    let idx = ((y as usize) * (w as usize) + (x as usize)) * 4;
    buf[idx..idx + 4].copy_from_slice(&premul);
}

/// Premultiplied source-over blend of `src` onto the pixel at `(x, y)`.
fn blend_over(buf: &mut [u8], w: u32, x: u32, y: u32, src: [u8; 4]) {
    let idx = ((y as usize) * (w as usize) + (x as usize)) * 4;
    let inv = 255 - u16::from(src[3]);
    for c in 0..4 {
        let d = u16::from(buf[idx + c]);
        buf[idx + c] = (u16::from(src[c]) + (d * inv + 127) / 255).min(255) as u8;
    }
}

fn lerp_premul(a: [u8; 4], b: [u8; 4], t: f64) -> [u8; 4] {
    let t = t.clamp(0.0, 1.0);
    let mut out = [0u8; 4];
    for c in 0..4 {
        let av = f64::from(a[c]);
        let bv = f64::from(b[c]);
        out[c] = (av + (bv - av) * t).round().clamp(0.0, 255.0) as u8;
    }
    out
}

/// Stamp a filled disc of `radius` at `(cx, cy)`, blending `src` over.
fn stamp_disc(buf: &mut [u8], size: u32, cx: f64, cy: f64, radius: f64, src: [u8; 4]) {
    let r = radius.max(0.5);
    let x0 = (cx - r).floor().max(0.0) as u32;
    let x1 = ((cx + r).ceil() as u32).min(size.saturating_sub(1));
    let y0 = (cy - r).floor().max(0.0) as u32;
    let y1 = ((cy + r).ceil() as u32).min(size.saturating_sub(1));
    for y in y0..=y1.min(size - 1) {
        for x in x0..=x1 {
            let dx = f64::from(x) + 0.5 - cx;
            let dy = f64::from(y) + 0.5 - cy;
            if dx * dx + dy * dy <= r * r {
                put_or_blend(buf, size, x, y, src);
            }
        }
    }
}

/// Stamp a circle outline of `radius` and `width` at `(cx, cy)`.
fn stamp_ring(buf: &mut [u8], size: u32, cx: f64, cy: f64, radius: f64, width: f64, src: [u8; 4]) {
    let outer = radius + width;
    let x0 = (cx - outer).floor().max(0.0) as u32;
    let x1 = ((cx + outer).ceil() as u32).min(size.saturating_sub(1));
    let y0 = (cy - outer).floor().max(0.0) as u32;
    let y1 = ((cy + outer).ceil() as u32).min(size.saturating_sub(1));
    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = f64::from(x) + 0.5 - cx;
            let dy = f64::from(y) + 0.5 - cy;
            let dist = (dx * dx + dy * dy).sqrt();
            if (dist - radius).abs() <= width {
                put_or_blend(buf, size, x, y, src);
            }
        }
    }
}

fn put_or_blend(buf: &mut [u8], w: u32, x: u32, y: u32, src: [u8; 4]) {
    if src[3] == 255 {
        put_px(buf, w, x, y, src);
    } else {
        blend_over(buf, w, x, y, src);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/decoration/pattern.rs"]
mod tests;
