//! Wheel rendering: supersampled CPU rasterization followed by a Lanczos downsample.

pub(crate) mod cpu;
pub(crate) mod resample;

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::RgbImage;

use crate::assets::font::FontFace;
use crate::foundation::core::LetterSet;
use crate::foundation::error::{WheelError, WheelResult};
use crate::layout::geometry::{
    DEFAULT_OUTPUT_SIZE, SUPERSAMPLING_RATIO, WheelGeometry, WheelProportions,
};

/// Font used when none is configured.
pub const DEFAULT_FONT_FILE: &str = "leaguespartan-bold.ttf";

/// Largest canvas side the rasterizer accepts.
pub const MAX_CANVAS_SIZE: u32 = u16::MAX as u32;

/// Immutable settings for one render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    /// Side of the final square image, in pixels.
    pub output_size: u32,
    /// Scalable font used for every letter.
    pub font_file: PathBuf,
    /// Canvas multiplier; all geometry is computed at `output_size * supersampling_ratio`.
    pub supersampling_ratio: u32,
}

impl RenderConfig {
    pub fn new(output_size: u32, font_file: impl Into<PathBuf>) -> Self {
        Self {
            output_size,
            font_file: font_file.into(),
            supersampling_ratio: SUPERSAMPLING_RATIO,
        }
    }

    pub fn with_supersampling_ratio(mut self, ratio: u32) -> Self {
        self.supersampling_ratio = ratio;
        self
    }

    /// Supersampled canvas side, validated against the rasterizer limits.
    pub fn image_size(&self) -> WheelResult<u32> {
        canvas_size(self.output_size, self.supersampling_ratio)
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_SIZE, DEFAULT_FONT_FILE)
    }
}

fn canvas_size(output_size: u32, ratio: u32) -> WheelResult<u32> {
    if output_size == 0 {
        return Err(WheelError::invalid_size("output size must be > 0"));
    }
    if ratio == 0 {
        return Err(WheelError::invalid_size("supersampling ratio must be > 0"));
    }
    output_size
        .checked_mul(ratio)
        .filter(|&s| s <= MAX_CANVAS_SIZE)
        .ok_or_else(|| {
            WheelError::invalid_size(format!(
                "output size {output_size} x supersampling {ratio} exceeds {MAX_CANVAS_SIZE}px canvas"
            ))
        })
}

/// Final square RGB8 raster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedImage {
    rgb: RgbImage,
}

impl RenderedImage {
    pub fn width(&self) -> u32 {
        self.rgb.width()
    }

    pub fn height(&self) -> u32 {
        self.rgb.height()
    }

    /// RGB triple at `(x, y)`; panics when out of bounds, like [`RgbImage::get_pixel`].
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.rgb.get_pixel(x, y).0
    }

    pub fn as_rgb(&self) -> &RgbImage {
        &self.rgb
    }

    pub fn into_rgb(self) -> RgbImage {
        self.rgb
    }

    /// Encode as PNG bytes.
    pub fn encode_png(&self) -> WheelResult<Vec<u8>> {
        let mut out = Cursor::new(Vec::new());
        self.rgb
            .write_to(&mut out, image::ImageFormat::Png)
            .map_err(|e| WheelError::render(format!("png encode: {e}")))?;
        Ok(out.into_inner())
    }

    /// Write a PNG file, creating parent directories as needed.
    pub fn save_png(&self, path: &Path) -> WheelResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| WheelError::storage(parent.display().to_string(), e))?;
        }
        self.rgb
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|e| WheelError::render(format!("write png '{}': {e}", path.display())))
    }
}

/// Renders wheels with a preloaded font.
///
/// Holds no mutable state and can be shared across threads. Each call uses its own canvas.
#[derive(Clone, Debug)]
pub struct WheelRenderer {
    font: FontFace,
    proportions: WheelProportions,
    supersampling_ratio: u32,
}

impl WheelRenderer {
    pub fn new(font: FontFace) -> Self {
        Self {
            font,
            proportions: WheelProportions::STANDARD,
            supersampling_ratio: SUPERSAMPLING_RATIO,
        }
    }

    pub fn with_supersampling_ratio(mut self, ratio: u32) -> Self {
        self.supersampling_ratio = ratio;
        self
    }

    pub fn font(&self) -> &FontFace {
        &self.font
    }

    /// Render `letters` into an `output_size` x `output_size` image.
    #[tracing::instrument(skip(self, letters), fields(letters = %letters))]
    pub fn render(&self, letters: &LetterSet, output_size: u32) -> WheelResult<RenderedImage> {
        let image_size = canvas_size(output_size, self.supersampling_ratio)?;
        let geometry = WheelGeometry::compute(image_size, &self.proportions);

        let pixmap = cpu::rasterize_wheel(&geometry, letters, &self.font)?;
        let canvas = resample::pixmap_to_rgb(&pixmap)?;
        let rgb = resample::downsample(canvas, output_size);
        tracing::debug!(image_size, output_size, "wheel rendered");
        Ok(RenderedImage { rgb })
    }
}

/// Render one wheel, loading the font named by `config`.
///
/// Size problems are reported before any font I/O.
pub fn render(letters: &LetterSet, config: &RenderConfig) -> WheelResult<RenderedImage> {
    config.image_size()?;
    let font = FontFace::load(&config.font_file)?;
    render_with_font(letters, config, &font)
}

/// Render one wheel with an already loaded font; `config.font_file` is ignored.
pub fn render_with_font(
    letters: &LetterSet,
    config: &RenderConfig,
    font: &FontFace,
) -> WheelResult<RenderedImage> {
    WheelRenderer::new(font.clone())
        .with_supersampling_ratio(config.supersampling_ratio)
        .render(letters, config.output_size)
}

#[cfg(test)]
#[path = "../../tests/unit/render/config.rs"]
mod tests;
