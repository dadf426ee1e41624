//! Parley-backed shaping for placeholder and dimension labels.
//!
//! The host supplies font bytes once at construction; with no font configured
//! the engine yields no layouts and text layers are skipped entirely (labels
//! are an optional draw layer).

use crate::foundation::error::{FramecraftError, FramecraftResult};

/// RGBA8 brush color used by Parley label layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LabelBrush {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

struct LoadedFont {
    family: String,
    font: vello_cpu::peniko::FontData,
}

/// Stateful helper for building Parley text layouts from raw font bytes.
pub struct LabelEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<LabelBrush>,
    loaded: Option<LoadedFont>,
}

impl LabelEngine {
    /// Construct an engine, registering `font_bytes` when provided.
    pub fn new(font_bytes: Option<Vec<u8>>) -> FramecraftResult<Self> {
        let mut engine = Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            loaded: None,
        };
        if let Some(bytes) = font_bytes {
            engine.load_font(bytes)?;
        }
        Ok(engine)
    }

    /// True when a font is registered and text can be drawn.
    pub fn has_font(&self) -> bool {
        self.loaded.is_some()
    }

    /// The glyph-run font for the renderer, if a font is loaded.
    pub(crate) fn font_data(&self) -> Option<&vello_cpu::peniko::FontData> {
        self.loaded.as_ref().map(|f| &f.font)
    }

    fn load_font(&mut self, bytes: Vec<u8>) -> FramecraftResult<()> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            FramecraftError::validation("no font families registered from font bytes")
        })?;
        let family = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| FramecraftError::validation("registered font family has no name"))?
            .to_string();
        let font = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0);
        self.loaded = Some(LoadedFont { family, font });
        Ok(())
    }

    /// Shape and lay out plain text. Returns `None` when no font is loaded.
    pub(crate) fn layout(
        &mut self,
        text: &str,
        size_px: f32,
        brush: LabelBrush,
    ) -> FramecraftResult<Option<parley::Layout<LabelBrush>>> {
        let Some(loaded) = &self.loaded else {
            return Ok(None);
        };
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(FramecraftError::validation(
                "text size_px must be finite and > 0",
            ));
        }
        let family = loaded.family.clone();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<LabelBrush> = builder.build(text);
        layout.break_all_lines(None);
        Ok(Some(layout))
    }
}

/// Advance-width and line-stacked height of a built layout.
pub(crate) fn layout_size(layout: &parley::Layout<LabelBrush>) -> (f64, f64) {
    let mut w = 0.0f64;
    let mut h = 0.0f64;
    for line in layout.lines() {
        let m = line.metrics();
        w = w.max(f64::from(m.advance));
        h += f64::from(m.ascent + m.descent + m.leading);
    }
    (w, h)
}
