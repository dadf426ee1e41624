//! The composite draw sequence: background, artwork, decoration, bevel,
//! label.
//!
//! Each render pass is a pure function of its inputs; the renderer only keeps
//! paint caches (patterns, shaped text, bitmap upload) between frames. A
//! malformed rect or non-finite transform skips the affected layer instead of
//! failing, so one bad frame never corrupts the session.

use kurbo::Shape;

use crate::assets::decode::{BitmapId, SourceBitmap};
use crate::decoration::pattern::PatternLibrary;
use crate::decoration::style::{
    DecorationStyle, GRID_LINE, KEYCHAIN_ACCENT, LABEL_TEXT, MAT, PLACEHOLDER_FILL,
    PLACEHOLDER_TEXT,
};
use crate::editor::product::{ProductSpec, SILHOUETTE_CORNER_RADIUS, Silhouette};
use crate::foundation::core::{Affine, BezPath, FitRect, Rect, Rgba8, Vec2};
use crate::foundation::error::FramecraftResult;
use crate::layout::fit::cover;
use crate::render::surface::{
    ViewportSurface, affine_to_cpu, bezpath_to_cpu, color_to_cpu, rgba_premul_to_image,
};
use crate::render::text::{LabelBrush, LabelEngine, layout_size};
use crate::transform::state::ImageTransformState;

/// Cosmetic background grid spacing in logical units.
const GRID_SPACING: f64 = 25.0;
/// Bevel stroke thickness in logical units.
const BEVEL_WIDTH: f64 = 3.0;
/// Keychain silhouette outline thickness in logical units.
const OUTLINE_WIDTH: f64 = 3.0;
/// Gap between the fit rect bottom and the dimension label baseline.
const LABEL_OFFSET: f64 = 30.0;

/// Everything one render pass reads.
pub struct Scene<'a> {
    /// Product rectangle inside the viewport, from [`crate::fit`].
    pub fit: FitRect,
    /// Gesture transform state for the uploaded artwork.
    pub transform: &'a ImageTransformState,
    /// The product being customized (selects decoration and silhouette).
    pub product: &'a ProductSpec,
    /// Optional dimension label drawn below the fit rect.
    pub label: Option<&'a str>,
    /// Whether to draw the cosmetic background grid (off for exports).
    pub draw_grid: bool,
    /// Flat background color behind everything.
    pub background: Rgba8,
    /// Frame mat inset in logical units.
    pub mat_thickness: f64,
}

/// Draws a [`Scene`] onto a [`ViewportSurface`].
///
/// Owned by one editor; holds the per-surface pattern library and label
/// engine.
pub struct CompositeRenderer {
    patterns: PatternLibrary,
    labels: LabelEngine,
    bitmap_paint: Option<(BitmapId, vello_cpu::Image)>,
}

impl CompositeRenderer {
    /// Build a renderer with the given pattern seed and optional label font.
    pub fn new(pattern_seed: u64, label_font: Option<Vec<u8>>) -> FramecraftResult<Self> {
        Ok(Self {
            patterns: PatternLibrary::new(pattern_seed),
            labels: LabelEngine::new(label_font)?,
            bitmap_paint: None,
        })
    }

    /// Render one frame. Draw order: clear, background, artwork or
    /// placeholder, decoration, bevel, label.
    pub fn render(
        &mut self,
        surface: &mut ViewportSurface,
        scene: &Scene<'_>,
    ) -> FramecraftResult<()> {
        let base = surface.base_transform();
        surface.clear(Rgba8::TRANSPARENT);
        let mut ctx = surface.begin_frame();

        self.draw_background(&mut ctx, surface, base, scene);

        if scene.fit.is_degenerate() {
            tracing::warn!(fit = ?scene.fit, "degenerate fit rect, skipping product layers");
            surface.end_frame(ctx);
            return Ok(());
        }

        if scene.transform.is_loaded() {
            self.draw_artwork(&mut ctx, base, scene)?;
        } else {
            self.draw_placeholder(&mut ctx, base, scene)?;
        }

        match *scene.product {
            ProductSpec::Frame { style, .. } => {
                self.draw_frame_border(&mut ctx, surface, base, scene, style)?;
            }
            ProductSpec::Keychain { silhouette } => {
                self.draw_keychain_silhouette(&mut ctx, surface, base, scene, silhouette);
            }
        }

        let style = scene.product.style();
        if style != DecorationStyle::None {
            self.draw_bevel(&mut ctx, surface, scene, style)?;
        }

        if let Some(text) = scene.label {
            let anchor_y = scene.fit.offset_y + scene.fit.height + LABEL_OFFSET;
            self.draw_text(
                &mut ctx,
                base,
                text,
                14.0,
                LABEL_TEXT,
                scene.fit.center().x,
                anchor_y,
                Anchor::Bottom,
            )?;
        }

        surface.end_frame(ctx);
        Ok(())
    }

    fn draw_background(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        surface: &ViewportSurface,
        base: Affine,
        scene: &Scene<'_>,
    ) {
        let (lw, lh) = (surface.logical_width(), surface.logical_height());
        ctx.set_transform(affine_to_cpu(base));
        ctx.set_paint(color_to_cpu(scene.background));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, lw, lh));

        if !scene.draw_grid {
            return;
        }
        ctx.set_paint(color_to_cpu(GRID_LINE));
        let mut x = 0.0;
        while x <= lw {
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(x - 0.5, 0.0, x + 0.5, lh));
            x += GRID_SPACING;
        }
        let mut y = 0.0;
        while y <= lh {
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, y - 0.5, lw, y + 0.5));
            y += GRID_SPACING;
        }
    }

    fn draw_artwork(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        base: Affine,
        scene: &Scene<'_>,
    ) -> FramecraftResult<()> {
        let Some(bmp) = scene.transform.bitmap() else {
            return Ok(());
        };
        let p = scene.transform.params();
        if !(p.pan_x.is_finite() && p.pan_y.is_finite() && p.zoom.is_finite() && p.rotation.is_finite())
        {
            tracing::warn!(params = ?p, "non-finite transform, skipping artwork layer");
            return Ok(());
        }

        let (render_w, render_h) = cover(
            f64::from(bmp.width),
            f64::from(bmp.height),
            scene.fit.width,
            scene.fit.height,
        );
        if render_w <= 0.0 || render_h <= 0.0 {
            tracing::warn!("cover fit collapsed, skipping artwork layer");
            return Ok(());
        }

        let (iw, ih) = (f64::from(bmp.width), f64::from(bmp.height));
        let place = base
            * scene.transform.to_affine(scene.fit.center())
            * Affine::scale_non_uniform(render_w / iw, render_h / ih)
            * Affine::translate(Vec2::new(-iw / 2.0, -ih / 2.0));

        let paint = self.bitmap_paint_for(bmp)?;
        ctx.set_transform(affine_to_cpu(place));
        ctx.set_paint(paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, iw, ih));
        Ok(())
    }

    fn draw_placeholder(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        base: Affine,
        scene: &Scene<'_>,
    ) -> FramecraftResult<()> {
        ctx.set_transform(affine_to_cpu(base));
        ctx.set_paint(color_to_cpu(PLACEHOLDER_FILL));
        ctx.fill_rect(&to_cpu_rect(scene.fit.to_rect()));

        let (primary, secondary) = scene.product.placeholder_text();
        let center = scene.fit.center();
        self.draw_text(
            ctx,
            base,
            primary,
            16.0,
            PLACEHOLDER_TEXT,
            center.x,
            center.y - 10.0,
            Anchor::Middle,
        )?;
        self.draw_text(
            ctx,
            base,
            secondary,
            14.0,
            PLACEHOLDER_TEXT,
            center.x,
            center.y + 15.0,
            Anchor::Middle,
        )?;
        Ok(())
    }

    fn draw_frame_border(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        surface: &ViewportSurface,
        base: Affine,
        scene: &Scene<'_>,
        frame_style: DecorationStyle,
    ) -> FramecraftResult<()> {
        let fit = scene.fit;
        let dpr = surface.spec().device_pixel_ratio;
        let dev_w = (fit.width * dpr).round().max(1.0) as u32;
        let dev_h = (fit.height * dpr).round().max(1.0) as u32;

        // The pattern band is rasterized at device resolution and placed in
        // device units, bypassing the dpr pre-scale, so texture pixels stay
        // crisp on high-density displays.
        let paint = self.patterns.fill(frame_style, dev_w, dev_h)?;
        let origin = Affine::translate(Vec2::new(fit.offset_x * dpr, fit.offset_y * dpr));
        ctx.set_transform(affine_to_cpu(origin));
        ctx.set_paint(paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(dev_w),
            f64::from(dev_h),
        ));

        let mat = fit.inset(scene.mat_thickness);
        if mat.is_degenerate() {
            tracing::debug!("mat inset collapses the fit rect, showing border only");
            return Ok(());
        }
        ctx.set_transform(affine_to_cpu(base));
        ctx.set_paint(color_to_cpu(MAT));
        ctx.fill_rect(&to_cpu_rect(mat.to_rect()));
        Ok(())
    }

    fn draw_keychain_silhouette(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        surface: &ViewportSurface,
        base: Affine,
        scene: &Scene<'_>,
        silhouette: Silhouette,
    ) {
        let fit = scene.fit;
        let outer = silhouette_path(silhouette, fit);

        // Punch out everything the die-cut shape does not keep. Drawn as a
        // non-zero fill of the canvas rect plus the reversed silhouette, so
        // no clip layer is needed.
        let canvas = Rect::new(0.0, 0.0, surface.logical_width(), surface.logical_height());
        let mut punch = canvas.to_path(0.1);
        punch.extend(outer.reverse_subpaths());
        ctx.set_transform(affine_to_cpu(base));
        ctx.set_paint(color_to_cpu(scene.background));
        ctx.fill_path(&bezpath_to_cpu(&punch));

        let inner = silhouette_path(silhouette, fit.inset(OUTLINE_WIDTH));
        let mut ring = outer;
        ring.extend(inner.reverse_subpaths());
        ctx.set_paint(color_to_cpu(KEYCHAIN_ACCENT));
        ctx.fill_path(&bezpath_to_cpu(&ring));
    }

    fn draw_bevel(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        surface: &ViewportSurface,
        scene: &Scene<'_>,
        frame_style: DecorationStyle,
    ) -> FramecraftResult<()> {
        let fit = scene.fit;
        let dpr = surface.spec().device_pixel_ratio;
        let dev_w = (fit.width * dpr).round().max(1.0) as u32;
        let dev_h = (fit.height * dpr).round().max(1.0) as u32;
        let paint = self.patterns.bevel_gradient(frame_style, dev_w, dev_h)?;

        let t = (BEVEL_WIDTH * dpr).max(1.0);
        let (w, h) = (f64::from(dev_w), f64::from(dev_h));
        let origin = Affine::translate(Vec2::new(fit.offset_x * dpr, fit.offset_y * dpr));
        ctx.set_transform(affine_to_cpu(origin));
        ctx.set_paint(paint);
        for bar in [
            vello_cpu::kurbo::Rect::new(0.0, 0.0, w, t),
            vello_cpu::kurbo::Rect::new(0.0, h - t, w, h),
            vello_cpu::kurbo::Rect::new(0.0, t, t, h - t),
            vello_cpu::kurbo::Rect::new(w - t, t, w, h - t),
        ] {
            ctx.fill_rect(&bar);
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_text(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        base: Affine,
        text: &str,
        size_px: f32,
        color: Rgba8,
        center_x: f64,
        anchor_y: f64,
        anchor: Anchor,
    ) -> FramecraftResult<()> {
        let brush = LabelBrush {
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
        };
        let Some(layout) = self.labels.layout(text, size_px, brush)? else {
            return Ok(());
        };
        let Some(font) = self.labels.font_data() else {
            return Ok(());
        };
        let (w, h) = layout_size(&layout);
        let top = match anchor {
            Anchor::Middle => anchor_y - h / 2.0,
            Anchor::Bottom => anchor_y - h,
        };
        if !(top.is_finite() && center_x.is_finite()) {
            tracing::warn!("non-finite text anchor, skipping text layer");
            return Ok(());
        }

        ctx.set_transform(affine_to_cpu(
            base * Affine::translate(Vec2::new(center_x - w / 2.0, top)),
        ));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let b = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(b.r, b.g, b.b, b.a));
                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        Ok(())
    }

    fn bitmap_paint_for(&mut self, bmp: &SourceBitmap) -> FramecraftResult<vello_cpu::Image> {
        if let Some((id, paint)) = &self.bitmap_paint
            && *id == bmp.id
        {
            return Ok(paint.clone());
        }
        let paint = rgba_premul_to_image(bmp.rgba8_premul.as_slice(), bmp.width, bmp.height)?;
        self.bitmap_paint = Some((bmp.id, paint.clone()));
        Ok(paint)
    }
}

#[derive(Clone, Copy)]
enum Anchor {
    Middle,
    Bottom,
}

fn silhouette_path(silhouette: Silhouette, fit: FitRect) -> BezPath {
    match silhouette {
        Silhouette::RoundedRect => {
            let radius = SILHOUETTE_CORNER_RADIUS.min(fit.width.min(fit.height) / 2.0);
            kurbo::RoundedRect::from_rect(fit.to_rect(), radius).to_path(0.1)
        }
        Silhouette::Circle => {
            let r = fit.width.min(fit.height) / 2.0;
            kurbo::Circle::new(fit.center(), r).to_path(0.1)
        }
    }
}

fn to_cpu_rect(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
