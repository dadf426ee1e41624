//! The editor controller: wires host input events to transform state and
//! render passes.
//!
//! All collaborators are injected — the controller never reaches into
//! ambient globals, so a full editor session can run headless in tests.
//! Every accepted mutation renders synchronously before control returns, so
//! the surface always reflects the final transform state after a gesture
//! burst.

use std::time::{Duration, Instant};

use crate::assets::decode::decode_bitmap;
use crate::decoration::style::{CANVAS_BACKGROUND, DecorationStyle, SNAPSHOT_BACKGROUND};
use crate::editor::product::{ProductSpec, Silhouette};
use crate::editor::snapshot::{CartSink, ProductSnapshot, encode_png};
use crate::foundation::core::{FitRect, ViewportSpec};
use crate::foundation::error::{FramecraftError, FramecraftResult};
use crate::layout::fit::fit;
use crate::render::composite::{CompositeRenderer, Scene};
use crate::render::surface::ViewportSurface;
use crate::transform::state::{ImageTransformState, TransformLimits};

/// Severity of a user-facing notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    /// Neutral status message.
    Info,
    /// Action completed.
    Success,
    /// Action rejected or failed.
    Error,
}

/// Receives user-facing messages. The engine renders no notification UI
/// itself.
pub trait Notifier {
    /// Report one message at the given severity.
    fn notify(&mut self, message: &str, severity: Severity);
}

/// What a modified `R` keypress does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RotateKeyBehavior {
    /// Rotate the artwork by the configured step (the default binding).
    #[default]
    RotateStep,
    /// Reset the whole design, matching the alternate legacy binding.
    Reset,
}

/// Upload validation rules, checked before any decode work starts.
#[derive(Clone, Debug)]
pub struct UploadPolicy {
    /// Accepted MIME types, compared case-insensitively.
    pub allowed_mime: Vec<String>,
    /// Upload byte ceiling.
    pub max_bytes: u64,
    /// Optional minimum decoded edge length in pixels.
    pub min_dimension_px: Option<u32>,
}

impl UploadPolicy {
    /// Frame editor defaults: JPEG/PNG/WebP up to 10 MiB.
    pub fn frame_default() -> Self {
        Self {
            allowed_mime: ["image/jpeg", "image/png", "image/webp"]
                .map(String::from)
                .to_vec(),
            max_bytes: 10 * 1024 * 1024,
            min_dimension_px: None,
        }
    }

    /// Keychain editor defaults: JPEG/PNG/WebP/GIF up to 5 MiB.
    pub fn keychain_default() -> Self {
        Self {
            allowed_mime: ["image/jpeg", "image/png", "image/webp", "image/gif"]
                .map(String::from)
                .to_vec(),
            max_bytes: 5 * 1024 * 1024,
            min_dimension_px: None,
        }
    }

    fn check(&self, mime: &str, size: u64) -> FramecraftResult<()> {
        if !self
            .allowed_mime
            .iter()
            .any(|m| m.eq_ignore_ascii_case(mime))
        {
            return Err(FramecraftError::UnsupportedFormat(mime.to_string()));
        }
        if size > self.max_bytes {
            return Err(FramecraftError::FileTooLarge {
                size,
                limit: self.max_bytes,
            });
        }
        Ok(())
    }
}

/// Raw upload handed in by the host: bytes plus the declared MIME type.
#[derive(Clone, Debug)]
pub struct UploadFile {
    /// Encoded image bytes.
    pub bytes: Vec<u8>,
    /// MIME type declared by the upload source.
    pub mime: String,
}

/// A validated upload awaiting decode.
///
/// Decode is the only suspension point in the editor's event model; the host
/// performs it whenever convenient by passing this ticket back to
/// [`EditorController::complete_upload`]. Starting another upload first makes
/// this ticket stale (last-write-wins).
#[derive(Debug)]
pub struct PendingUpload {
    generation: u64,
    bytes: Vec<u8>,
}

/// Editor tuning knobs. Divergences between the legacy editor copies
/// (padding, zoom bounds, rotate binding) are configuration here, not code
/// paths.
#[derive(Clone, Debug)]
pub struct EditorConfig {
    /// Upload validation rules.
    pub upload: UploadPolicy,
    /// Transform mutation bounds.
    pub limits: TransformLimits,
    /// Multiplicative zoom per wheel notch or keyboard press.
    pub zoom_step: f64,
    /// Rotation increment in radians for the rotate key.
    pub rotate_step: f64,
    /// What a modified `R` keypress does.
    pub rotate_key: RotateKeyBehavior,
    /// Letterbox padding around the fit rect, logical units.
    pub padding: f64,
    /// Frame mat inset, logical units.
    pub mat_thickness: f64,
    /// Quiet window before a resize burst is applied.
    pub resize_debounce: Duration,
    /// Determinism seed for decoration patterns.
    pub pattern_seed: u64,
    /// Optional font bytes for placeholder and label text.
    pub label_font: Option<Vec<u8>>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            upload: UploadPolicy::frame_default(),
            limits: TransformLimits::default(),
            zoom_step: 1.1,
            rotate_step: std::f64::consts::FRAC_PI_4,
            rotate_key: RotateKeyBehavior::default(),
            padding: 40.0,
            mat_thickness: 25.0,
            resize_debounce: Duration::from_millis(250),
            pattern_seed: 0x66_72_61_6d,
            label_font: None,
        }
    }
}

/// Orchestrates one product editor: input normalization, upload lifecycle,
/// debounced resize, and synchronous redraws.
pub struct EditorController {
    product: ProductSpec,
    config: EditorConfig,
    surface: ViewportSurface,
    renderer: CompositeRenderer,
    state: ImageTransformState,
    notifier: Box<dyn Notifier>,
    cart: Box<dyn CartSink>,
    upload_generation: u64,
    decode_pending: bool,
    pending_resize: Option<(ViewportSpec, Instant)>,
}

impl EditorController {
    /// Build a controller and render the initial (empty) frame.
    pub fn new(
        product: ProductSpec,
        config: EditorConfig,
        viewport: ViewportSpec,
        notifier: Box<dyn Notifier>,
        cart: Box<dyn CartSink>,
    ) -> FramecraftResult<Self> {
        let surface = ViewportSurface::new(viewport)?;
        let renderer = CompositeRenderer::new(config.pattern_seed, config.label_font.clone())?;
        let state = ImageTransformState::new(config.limits);
        let mut controller = Self {
            product,
            config,
            surface,
            renderer,
            state,
            notifier,
            cart,
            upload_generation: 0,
            decode_pending: false,
            pending_resize: None,
        };
        controller.render()?;
        Ok(controller)
    }

    /// The product currently being edited.
    pub fn product(&self) -> &ProductSpec {
        &self.product
    }

    /// Read access to the transform state, for hosts and tests.
    pub fn state(&self) -> &ImageTransformState {
        &self.state
    }

    /// Read access to the surface pixels.
    pub fn surface(&self) -> &ViewportSurface {
        &self.surface
    }

    /// The fit rect the current viewport and product produce.
    pub fn fit_rect(&self) -> FitRect {
        fit(
            self.surface.logical_width(),
            self.surface.logical_height(),
            self.product.aspect_ratio(),
            self.config.padding,
        )
    }

    fn inputs_enabled(&self) -> bool {
        self.state.is_loaded() && !self.decode_pending
    }

    fn render(&mut self) -> FramecraftResult<()> {
        let fit_rect = self.fit_rect();
        let label = self.product.label();
        let scene = Scene {
            fit: fit_rect,
            transform: &self.state,
            product: &self.product,
            label: label.as_deref(),
            draw_grid: true,
            background: CANVAS_BACKGROUND,
            mat_thickness: self.config.mat_thickness,
        };
        self.renderer.render(&mut self.surface, &scene)
    }

    /// Validate an upload and hand back a decode ticket.
    ///
    /// Rejections are reported through the notifier and return `None`; the
    /// editor stays fully usable for a retry. A ticket supersedes any earlier
    /// one still awaiting [`Self::complete_upload`].
    pub fn on_upload(&mut self, file: UploadFile) -> Option<PendingUpload> {
        if let Err(e) = self.config.upload.check(&file.mime, file.bytes.len() as u64) {
            tracing::debug!(error = %e, mime = %file.mime, "upload rejected");
            self.notifier.notify(&e.to_string(), Severity::Error);
            return None;
        }
        self.upload_generation += 1;
        self.decode_pending = true;
        tracing::debug!(generation = self.upload_generation, "upload accepted, decode pending");
        Some(PendingUpload {
            generation: self.upload_generation,
            bytes: file.bytes,
        })
    }

    /// Decode a validated upload and load it into the editor.
    ///
    /// Stale tickets (superseded by a later upload or a reset) are dropped
    /// silently. Decode failures are reported and leave the prior design
    /// untouched.
    pub fn complete_upload(&mut self, pending: PendingUpload) -> FramecraftResult<()> {
        if pending.generation != self.upload_generation {
            tracing::debug!(
                generation = pending.generation,
                current = self.upload_generation,
                "stale decode result dropped"
            );
            return Ok(());
        }

        let bitmap = match decode_bitmap(&pending.bytes) {
            Ok(b) => b,
            Err(e) => {
                self.decode_pending = false;
                tracing::debug!(error = %e, "upload decode failed");
                self.notifier
                    .notify("Failed to load image. Please try another file.", Severity::Error);
                return Ok(());
            }
        };

        if let Some(min) = self.config.upload.min_dimension_px
            && (bitmap.width < min || bitmap.height < min)
        {
            self.decode_pending = false;
            let e = FramecraftError::DimensionTooSmall {
                width: bitmap.width,
                height: bitmap.height,
                min,
            };
            self.notifier.notify(&e.to_string(), Severity::Error);
            return Ok(());
        }

        self.decode_pending = false;
        self.state.load_bitmap(bitmap);
        self.render()?;
        self.notifier.notify(
            "Image uploaded successfully! Drag to position.",
            Severity::Success,
        );
        Ok(())
    }

    /// Pan the artwork by a pointer drag of `(dx, dy)` logical units.
    pub fn on_pointer_drag(&mut self, dx: f64, dy: f64) -> FramecraftResult<()> {
        if !self.inputs_enabled() {
            return Ok(());
        }
        self.state.pan(dx, dy);
        self.render()
    }

    /// Zoom one multiplicative notch per wheel event; scrolling up zooms in.
    ///
    /// The step is symmetric: N notches in followed by N notches out returns
    /// to the starting zoom (clamp saturation aside).
    pub fn on_wheel(&mut self, delta_y: f64) -> FramecraftResult<()> {
        if !self.inputs_enabled() || delta_y == 0.0 || !delta_y.is_finite() {
            return Ok(());
        }
        let factor = if delta_y < 0.0 {
            self.config.zoom_step
        } else {
            1.0 / self.config.zoom_step
        };
        self.state.zoom_by(factor);
        self.render()
    }

    /// Keyboard shortcuts: `+`/`=` and `-` zoom by the wheel step; a
    /// ctrl/cmd-modified `r` rotates (or resets, per configuration).
    pub fn on_key(&mut self, key: char, ctrl: bool) -> FramecraftResult<()> {
        if !self.inputs_enabled() {
            return Ok(());
        }
        match key {
            '+' | '=' => {
                self.state.zoom_by(self.config.zoom_step);
                self.render()
            }
            '-' => {
                self.state.zoom_by(1.0 / self.config.zoom_step);
                self.render()
            }
            'r' | 'R' if ctrl => match self.config.rotate_key {
                RotateKeyBehavior::RotateStep => {
                    self.state.rotate_by(self.config.rotate_step);
                    self.render()
                }
                RotateKeyBehavior::Reset => self.reset_design(),
            },
            _ => Ok(()),
        }
    }

    /// Record a resize event. Bursts are coalesced; the new viewport applies
    /// once [`Self::on_tick`] observes a quiet window.
    pub fn on_resize(&mut self, viewport: ViewportSpec, now: Instant) {
        self.pending_resize = Some((viewport, now));
    }

    /// Apply a quiesced resize, if any. Returns `true` when a re-render
    /// happened. Pan/zoom/rotation survive; only the fit rect moves.
    pub fn on_tick(&mut self, now: Instant) -> FramecraftResult<bool> {
        let Some((viewport, at)) = self.pending_resize else {
            return Ok(false);
        };
        if now.duration_since(at) < self.config.resize_debounce {
            return Ok(false);
        }
        self.pending_resize = None;
        self.surface.rebuild(viewport)?;
        tracing::debug!(?viewport, "resize applied");
        self.render()?;
        Ok(true)
    }

    /// Change the frame decoration style and redraw.
    pub fn set_style(&mut self, style: DecorationStyle) -> FramecraftResult<()> {
        match &mut self.product {
            ProductSpec::Frame { style: s, .. } => {
                *s = style;
                self.render()
            }
            ProductSpec::Keychain { .. } => {
                tracing::debug!("style change ignored for keychain product");
                Ok(())
            }
        }
    }

    /// Change the frame dimensions (inches) and redraw.
    pub fn set_frame_dimensions(&mut self, width_in: u32, height_in: u32) -> FramecraftResult<()> {
        let ProductSpec::Frame { style, .. } = self.product else {
            return Err(FramecraftError::validation(
                "dimensions only apply to frame products",
            ));
        };
        self.product = ProductSpec::frame(style, width_in, height_in)?;
        self.render()
    }

    /// Change the keychain die-cut shape and redraw.
    pub fn set_silhouette(&mut self, silhouette: Silhouette) -> FramecraftResult<()> {
        match &mut self.product {
            ProductSpec::Keychain { silhouette: s } => {
                *s = silhouette;
                self.render()
            }
            ProductSpec::Frame { .. } => {
                tracing::debug!("silhouette change ignored for frame product");
                Ok(())
            }
        }
    }

    /// Clear the design back to the empty placeholder state.
    ///
    /// Also invalidates any upload still awaiting decode.
    pub fn reset_design(&mut self) -> FramecraftResult<()> {
        self.state.reset();
        self.upload_generation += 1;
        self.decode_pending = false;
        self.render()?;
        self.notifier.notify("Design has been reset", Severity::Info);
        Ok(())
    }

    /// Capture the current design as a clean export: white background, no
    /// grid, same viewport resolution.
    pub fn capture_snapshot(&mut self) -> FramecraftResult<ProductSnapshot> {
        let mut export = ViewportSurface::new(self.surface.spec())?;
        let fit_rect = self.fit_rect();
        let label = self.product.label();
        let scene = Scene {
            fit: fit_rect,
            transform: &self.state,
            product: &self.product,
            label: label.as_deref(),
            draw_grid: false,
            background: SNAPSHOT_BACKGROUND,
            mat_thickness: self.config.mat_thickness,
        };
        self.renderer.render(&mut export, &scene)?;

        let (w, h) = (
            u32::from(export.backing_width()),
            u32::from(export.backing_height()),
        );
        let png = encode_png(&export.snapshot_rgba8(), w, h)?;
        Ok(ProductSnapshot {
            png,
            product: self.product,
            transform: self.state.params(),
            pixel_width: w,
            pixel_height: h,
        })
    }

    /// Capture the design and hand it to the cart collaborator.
    pub fn add_to_cart(&mut self) -> FramecraftResult<()> {
        if !self.state.is_loaded() {
            self.notifier
                .notify("Please upload an image first!", Severity::Error);
            return Ok(());
        }
        let snapshot = self.capture_snapshot()?;
        match self.cart.add_item(snapshot) {
            Ok(()) => {
                self.notifier
                    .notify("Custom design added to cart!", Severity::Success);
                Ok(())
            }
            Err(e) => {
                tracing::debug!(error = %e, "cart handoff failed");
                self.notifier
                    .notify("Failed to add design to cart", Severity::Error);
                Ok(())
            }
        }
    }

    /// Download name for the current product following the
    /// `<product>-design-<timestamp>.png` convention.
    pub fn download_filename(&self, timestamp_ms: u64) -> String {
        format!("{}-design-{}.png", self.product.slug(), timestamp_ms)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/controller.rs"]
mod tests;
