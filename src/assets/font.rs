use std::path::{Path, PathBuf};

use crate::foundation::error::{WheelError, WheelResult};

/// Font loaded once and shared read-only between renders.
///
/// Both the shaping blob and the rasterizer's font data are reference counted; cloning a face
/// or rendering with it never copies the font bytes.
#[derive(Clone)]
pub struct FontFace {
    source: PathBuf,
    shaping: parley::fontique::Blob<u8>,
    data: vello_cpu::peniko::FontData,
    family: String,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("source", &self.source)
            .field("family", &self.family)
            .field("len", &self.bytes().len())
            .finish()
    }
}

impl FontFace {
    /// Read and validate a font file.
    ///
    /// There is no fallback font: a missing or unparsable file is a [`WheelError::FontLoad`].
    #[tracing::instrument(level = "debug")]
    pub fn load(path: &Path) -> WheelResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| WheelError::font_load(path, e.to_string()))?;
        Self::from_bytes(path, bytes)
    }

    /// Validate in-memory font bytes; `source` is only used for diagnostics.
    pub fn from_bytes(source: impl Into<PathBuf>, bytes: Vec<u8>) -> WheelResult<Self> {
        let source = source.into();
        let len = bytes.len();
        let shaping = parley::fontique::Blob::from(bytes.clone());
        let mut engine = TextLayoutEngine::new();
        let family = engine
            .register(shaping.clone())
            .map_err(|e| match e {
                WheelError::Render(reason) => WheelError::font_load(&source, reason),
                other => other,
            })?;
        tracing::debug!(family = %family, bytes = len, "font loaded");
        Ok(Self {
            source,
            shaping,
            data: vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0),
            family,
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Family name reported by the font's name table.
    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn bytes(&self) -> &[u8] {
        self.data.data.data()
    }

    /// Shared font blob for registering with a shaping context.
    pub(crate) fn shaping_blob(&self) -> parley::fontique::Blob<u8> {
        self.shaping.clone()
    }

    /// Font data in the form the rasterizer consumes.
    pub(crate) fn font_data(&self) -> &vello_cpu::peniko::FontData {
        &self.data
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Parley brush; letters are always drawn in a single solid color.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl TextBrushRgba8 {
    pub(crate) const BLACK: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 255,
    };
}

/// Stateful helper for shaping text with Parley from raw font bytes.
///
/// Holds per-render contexts; create one per render call rather than sharing it between threads.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family: Option<String>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            family: None,
        }
    }

    /// Register a font blob and remember the first family it defines.
    pub(crate) fn register(&mut self, font: parley::fontique::Blob<u8>) -> WheelResult<String> {
        let families = self.font_ctx.collection.register_fonts(font, None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| WheelError::render("no font families registered from font bytes"))?;

        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| WheelError::render("registered font family has no name"))?
            .to_string();
        self.family = Some(family_name.clone());
        Ok(family_name)
    }

    /// Shape a single line of text with the registered family.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
    ) -> WheelResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(WheelError::invalid_size(
                "font size must be finite and > 0",
            ));
        }
        let family_name = self
            .family
            .clone()
            .ok_or_else(|| WheelError::render("no font registered before layout"))?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(TextBrushRgba8::BLACK));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;
