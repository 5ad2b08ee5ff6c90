use image::{RgbImage, imageops::FilterType};

use crate::foundation::error::{WheelError, WheelResult};

/// Drop alpha from an opaque premultiplied pixmap.
pub(crate) fn pixmap_to_rgb(pixmap: &vello_cpu::Pixmap) -> WheelResult<RgbImage> {
    let (w, h) = (u32::from(pixmap.width()), u32::from(pixmap.height()));
    let rgb: Vec<u8> = pixmap
        .data_as_u8_slice()
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();
    RgbImage::from_raw(w, h, rgb)
        .ok_or_else(|| WheelError::render("pixmap byte length does not match its size"))
}

/// Downsample a supersampled square canvas to `output_size` with a Lanczos3 filter.
///
/// This is the only antialiasing step; a canvas already at the target size is returned as is.
pub(crate) fn downsample(canvas: RgbImage, output_size: u32) -> RgbImage {
    if canvas.width() == output_size && canvas.height() == output_size {
        return canvas;
    }
    image::imageops::resize(&canvas, output_size, output_size, FilterType::Lanczos3)
}

#[cfg(test)]
#[path = "../../tests/unit/render/resample.rs"]
mod tests;
