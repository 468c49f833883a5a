//! Texture synthesis seam.
//!
//! Rasterizing facade and cladding bitmaps is the job of an external
//! synthesizer; the cache only requires that a call produces the image
//! file at `<out_dir>/<name>` or fails. The built-in [`FlatColorSynthesizer`]
//! is the smallest implementation that makes the pipeline runnable end to
//! end; real exporters composite facade layouts and cladding patterns.

use image::{ImageFormat, Rgba, RgbaImage};
use std::path::Path;

use crate::color::color_to_rgb;
use crate::error::{ExportError, Result};
use crate::types::TextureDescriptor;

/// External texture-synthesis contract.
///
/// Both operations must write the image file `<out_dir>/<name>` as a side
/// effect, or return [`ExportError::TextureSynthesis`]. `name` already
/// carries its extension when the material id encodes one.
pub trait TextureSynthesizer {
    /// Produce a facade texture, optionally composited with cladding.
    fn make_facade_texture(
        &mut self,
        name: &str,
        out_dir: &Path,
        color: Option<&str>,
        facade: &TextureDescriptor,
        cladding: Option<&TextureDescriptor>,
    ) -> Result<()>;

    /// Produce a cladding texture.
    fn make_cladding_texture(
        &mut self,
        name: &str,
        out_dir: &Path,
        color: Option<&str>,
        cladding: &TextureDescriptor,
    ) -> Result<()>;
}

/// Minimal synthesizer writing a solid-color PNG per texture.
///
/// The pixel size is fixed; the color comes from the cladding color token,
/// falling back to a neutral gray when none is given or the token is not
/// resolvable to RGB.
#[derive(Debug, Clone)]
pub struct FlatColorSynthesizer {
    /// Edge length of the generated square texture in pixels.
    pub size: u32,
}

impl FlatColorSynthesizer {
    pub fn new(size: u32) -> Self {
        Self { size }
    }

    fn write_png(&self, name: &str, out_dir: &Path, color: Option<&str>) -> Result<()> {
        let rgb = color
            .and_then(color_to_rgb)
            .unwrap_or([0xb0, 0xb0, 0xb0]);

        std::fs::create_dir_all(out_dir)?;
        let path = out_dir.join(name);

        let image = RgbaImage::from_pixel(self.size, self.size, Rgba([rgb[0], rgb[1], rgb[2], 255]));
        // Material ids may carry no extension, so the format is explicit.
        image
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|e| {
                ExportError::TextureSynthesis(format!("cannot write {}: {}", path.display(), e))
            })
    }
}

impl Default for FlatColorSynthesizer {
    fn default() -> Self {
        Self::new(16)
    }
}

impl TextureSynthesizer for FlatColorSynthesizer {
    fn make_facade_texture(
        &mut self,
        name: &str,
        out_dir: &Path,
        color: Option<&str>,
        _facade: &TextureDescriptor,
        _cladding: Option<&TextureDescriptor>,
    ) -> Result<()> {
        self.write_png(name, out_dir, color)
    }

    fn make_cladding_texture(
        &mut self,
        name: &str,
        out_dir: &Path,
        color: Option<&str>,
        _cladding: &TextureDescriptor,
    ) -> Result<()> {
        self.write_png(name, out_dir, color)
    }
}
