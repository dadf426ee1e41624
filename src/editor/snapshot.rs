//! Captured design artifacts handed to the cart/checkout collaborator.

use std::io::Cursor;

use anyhow::Context;

use crate::editor::product::ProductSpec;
use crate::foundation::error::{FramecraftError, FramecraftResult};
use crate::transform::state::TransformParams;

/// Receives finished designs. The cart subsystem persists these however it
/// likes; the engine neither reads nor writes the cart list.
pub trait CartSink {
    /// Accept one captured design.
    fn add_item(&mut self, snapshot: ProductSnapshot) -> FramecraftResult<()>;
}

/// One finished custom design: an encoded raster plus the design parameters
/// at capture time. Immutable once created; the engine does not retain it
/// after handoff.
#[derive(Clone, Debug, PartialEq)]
pub struct ProductSnapshot {
    /// PNG-encoded raster of the clean (grid-free) composite.
    pub png: Vec<u8>,
    /// Product parameters at capture time.
    pub product: ProductSpec,
    /// Transform values at capture time.
    pub transform: TransformParams,
    /// Raster width in device pixels.
    pub pixel_width: u32,
    /// Raster height in device pixels.
    pub pixel_height: u32,
}

#[derive(serde::Serialize)]
struct SnapshotMeta<'a> {
    product: &'a ProductSpec,
    transform: &'a TransformParams,
    pixel_width: u32,
    pixel_height: u32,
}

impl ProductSnapshot {
    /// JSON record of everything except the raster bytes; the persistence
    /// contract with the cart collaborator.
    pub fn metadata_json(&self) -> FramecraftResult<String> {
        serde_json::to_string(&SnapshotMeta {
            product: &self.product,
            transform: &self.transform,
            pixel_width: self.pixel_width,
            pixel_height: self.pixel_height,
        })
        .map_err(|e| FramecraftError::validation(format!("serialize snapshot metadata: {e}")))
    }

    /// Download name following the `<product>-design-<timestamp>.png`
    /// convention.
    pub fn suggested_filename(&self, timestamp_ms: u64) -> String {
        format!("{}-design-{}.png", self.product.slug(), timestamp_ms)
    }
}

/// Encode straight-alpha RGBA8 bytes as PNG.
pub(crate) fn encode_png(rgba: &[u8], width: u32, height: u32) -> FramecraftResult<Vec<u8>> {
    let img = image::RgbaImage::from_raw(width, height, rgba.to_vec())
        .ok_or_else(|| FramecraftError::validation("raster byte length mismatch"))?;
    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .context("encode snapshot png")?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/editor/snapshot.rs"]
mod tests;
