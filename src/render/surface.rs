//! Device-pixel-aware drawable surface.

use std::sync::Arc;

use crate::assets::decode::unpremultiply_rgba8;
use crate::foundation::core::{Affine, BezPath, Point, Rgba8, ViewportSpec};
use crate::foundation::error::{FramecraftError, FramecraftResult};

/// A drawable surface sized for device pixel density.
///
/// The backing pixmap is `logical × dpr` pixels; [`ViewportSurface::base_transform`]
/// pre-scales drawing by dpr so all draw code works in logical (CSS-pixel)
/// units. One surface is owned exclusively by one editor; surfaces are never
/// shared.
pub struct ViewportSurface {
    spec: ViewportSpec,
    pixmap: vello_cpu::Pixmap,
}

impl ViewportSurface {
    /// Allocate a surface for `spec`.
    pub fn new(spec: ViewportSpec) -> FramecraftResult<Self> {
        let (w, h) = backing_u16(spec)?;
        Ok(Self {
            spec,
            pixmap: vello_cpu::Pixmap::new(w, h),
        })
    }

    /// The viewport description this surface was built for.
    pub fn spec(&self) -> ViewportSpec {
        self.spec
    }

    /// Logical width in CSS pixels.
    pub fn logical_width(&self) -> f64 {
        f64::from(self.spec.logical_width)
    }

    /// Logical height in CSS pixels.
    pub fn logical_height(&self) -> f64 {
        f64::from(self.spec.logical_height)
    }

    /// Backing-store width in device pixels.
    pub fn backing_width(&self) -> u16 {
        self.pixmap.width()
    }

    /// Backing-store height in device pixels.
    pub fn backing_height(&self) -> u16 {
        self.pixmap.height()
    }

    /// The dpr pre-scale every logical-unit draw goes through.
    pub fn base_transform(&self) -> Affine {
        Affine::scale(self.spec.device_pixel_ratio)
    }

    /// Replace the backing store for a new viewport (resize / orientation
    /// change). Previous pixel content is dropped; callers re-render.
    pub fn rebuild(&mut self, spec: ViewportSpec) -> FramecraftResult<()> {
        let (w, h) = backing_u16(spec)?;
        self.spec = spec;
        self.pixmap = vello_cpu::Pixmap::new(w, h);
        Ok(())
    }

    /// Fill the whole backing store with `color`.
    pub(crate) fn clear(&mut self, color: Rgba8) {
        let premul = color.premultiplied();
        for px in self.pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
            px.copy_from_slice(&premul);
        }
    }

    /// Start recording a frame at backing resolution.
    pub(crate) fn begin_frame(&self) -> vello_cpu::RenderContext {
        vello_cpu::RenderContext::new(self.pixmap.width(), self.pixmap.height())
    }

    /// Flush the recorded frame into the backing store.
    pub(crate) fn end_frame(&mut self, mut ctx: vello_cpu::RenderContext) {
        ctx.flush();
        ctx.render_to_pixmap(&mut self.pixmap);
    }

    /// Premultiplied RGBA8 backing bytes, row-major.
    pub fn pixel_bytes(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    /// Premultiplied RGBA8 of the pixel at device coordinates `(x, y)`.
    pub fn pixel_at(&self, x: u16, y: u16) -> [u8; 4] {
        let idx = (usize::from(y) * usize::from(self.pixmap.width()) + usize::from(x)) * 4;
        let data = self.pixmap.data_as_u8_slice();
        [data[idx], data[idx + 1], data[idx + 2], data[idx + 3]]
    }

    /// Straight-alpha RGBA8 copy of the backing store, for export encoders.
    pub fn snapshot_rgba8(&self) -> Vec<u8> {
        unpremultiply_rgba8(self.pixmap.data_as_u8_slice())
    }
}

fn backing_u16(spec: ViewportSpec) -> FramecraftResult<(u16, u16)> {
    let w: u16 = spec
        .backing_width_px()
        .try_into()
        .map_err(|_| FramecraftError::validation("backing width exceeds u16"))?;
    let h: u16 = spec
        .backing_height_px()
        .try_into()
        .map_err(|_| FramecraftError::validation("backing height exceeds u16"))?;
    if w == 0 || h == 0 {
        return Err(FramecraftError::validation("backing dimensions must be > 0"));
    }
    Ok((w, h))
}

/// Wrap premultiplied RGBA8 bytes as a pixmap.
pub(crate) fn pixmap_from_premul_bytes(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> FramecraftResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| FramecraftError::validation("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| FramecraftError::validation("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(FramecraftError::validation(
            "pixel byte length does not match dimensions",
        ));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

/// Wrap premultiplied RGBA8 bytes as an image paint.
pub(crate) fn rgba_premul_to_image(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> FramecraftResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(rgba8_premul, width, height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

pub(crate) fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

pub(crate) fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

pub(crate) fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
