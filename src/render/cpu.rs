use kurbo::Shape;

use crate::assets::font::{FontFace, TextBrushRgba8, TextLayoutEngine};
use crate::foundation::core::{LetterSet, Point};
use crate::foundation::error::{WheelError, WheelResult};
use crate::layout::geometry::{Ring, WheelGeometry, thick_line_path};

const BLACK: [u8; 3] = [0, 0, 0];
const WHITE: [u8; 3] = [255, 255, 255];

/// Curve flattening tolerance in canvas pixels.
const PATH_TOLERANCE: f64 = 0.1;

/// Rasterize the full wheel at the geometry's (supersampled) canvas size.
///
/// Drawing order matters: outer ring, inner ring on top of it, spokes, radial letters, centre
/// letter. The returned pixmap is fully opaque.
pub(crate) fn rasterize_wheel(
    geometry: &WheelGeometry,
    letters: &LetterSet,
    font: &FontFace,
) -> WheelResult<vello_cpu::Pixmap> {
    let side: u16 = geometry
        .image_size
        .try_into()
        .map_err(|_| WheelError::invalid_size("canvas size exceeds u16"))?;
    if side == 0 {
        return Err(WheelError::invalid_size("canvas size must be > 0"));
    }

    let mut ctx = vello_cpu::RenderContext::new(side, side);
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(solid(WHITE));
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        0.0,
        0.0,
        f64::from(side),
        f64::from(side),
    ));

    draw_ring(&mut ctx, &geometry.outer_ring);
    draw_ring(&mut ctx, &geometry.inner_ring);

    ctx.set_paint(solid(BLACK));
    for spoke in &geometry.spokes {
        let path = thick_line_path(*spoke, geometry.line_width);
        ctx.fill_path(&bezpath_to_cpu(&path));
    }

    let mut engine = TextLayoutEngine::new();
    engine.register(font.shaping_blob())?;
    let font_data = font.font_data();

    for (letter, anchor) in letters.radial().iter().zip(geometry.radial_anchors.iter()) {
        draw_centered_letter(
            &mut ctx,
            &mut engine,
            font_data,
            *letter,
            *anchor,
            geometry.outer_font_size,
        )?;
    }
    draw_centered_letter(
        &mut ctx,
        &mut engine,
        font_data,
        letters.center(),
        geometry.center_anchor(),
        geometry.center_font_size,
    )?;

    ctx.flush();
    let mut pixmap = vello_cpu::Pixmap::new(side, side);
    ctx.render_to_pixmap(&mut pixmap);
    Ok(pixmap)
}

fn draw_ring(ctx: &mut vello_cpu::RenderContext, ring: &Ring) {
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(solid(BLACK));
    ctx.fill_path(&circle_to_cpu(ring.center, ring.radius));
    if ring.fill_radius > 0.0 {
        ctx.set_paint(solid(ring.fill_rgb));
        ctx.fill_path(&circle_to_cpu(ring.center, ring.fill_radius));
    }
}

/// Draw `letter` so that its inked bounding box is centred on `anchor`.
fn draw_centered_letter(
    ctx: &mut vello_cpu::RenderContext,
    engine: &mut TextLayoutEngine,
    font: &vello_cpu::peniko::FontData,
    letter: char,
    anchor: Point,
    size_px: f32,
) -> WheelResult<()> {
    let mut buf = [0u8; 4];
    let layout = engine.layout_line(letter.encode_utf8(&mut buf), size_px)?;

    let bounds = match measure_ink(&layout, font, size_px)? {
        Some(ink) => ink,
        None => {
            tracing::debug!(%letter, size_px, "glyph has no ink, centring on layout box");
            kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(layout.width()),
                f64::from(layout.height()),
            )
        }
    };

    let offset = anchor - bounds.center();
    ctx.set_transform(vello_cpu::kurbo::Affine::translate((offset.x, offset.y)));
    fill_layout(ctx, &layout, font);
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    Ok(())
}

/// Rasterize `layout` on a scratch surface and return the bounding box of its covered pixels,
/// in layout coordinates. `None` when nothing is inked.
pub(crate) fn measure_ink(
    layout: &parley::Layout<TextBrushRgba8>,
    font: &vello_cpu::peniko::FontData,
    size_px: f32,
) -> WheelResult<Option<kurbo::Rect>> {
    let pad = ink_padding(size_px);
    let width = f64::from(layout.width()).ceil() + 2.0 * pad;
    let height = f64::from(layout.height()).ceil() + 2.0 * pad;
    let to_u16 = |v: f64| -> WheelResult<u16> {
        if v > f64::from(u16::MAX) {
            return Err(WheelError::invalid_size("glyph scratch surface exceeds u16"));
        }
        Ok(v as u16)
    };
    let (w, h) = (to_u16(width)?, to_u16(height)?);

    let mut ctx = vello_cpu::RenderContext::new(w, h);
    ctx.set_transform(vello_cpu::kurbo::Affine::translate((pad, pad)));
    fill_layout(&mut ctx, layout, font);
    ctx.flush();
    let mut scratch = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut scratch);

    let row = usize::from(w);
    let mut min = (usize::MAX, usize::MAX);
    let mut max = (0usize, 0usize);
    let mut inked = false;
    for (i, px) in scratch.data_as_u8_slice().chunks_exact(4).enumerate() {
        if px[3] == 0 {
            continue;
        }
        let (x, y) = (i % row, i / row);
        inked = true;
        min = (min.0.min(x), min.1.min(y));
        max = (max.0.max(x), max.1.max(y));
    }
    if !inked {
        return Ok(None);
    }
    if min.0 == 0 || min.1 == 0 || max.0 + 1 == row || max.1 + 1 == usize::from(h) {
        tracing::warn!(size_px, "glyph ink touches the measuring surface edge");
    }

    Ok(Some(kurbo::Rect::new(
        min.0 as f64 - pad,
        min.1 as f64 - pad,
        (max.0 + 1) as f64 - pad,
        (max.1 + 1) as f64 - pad,
    )))
}

/// Margin around the layout box on the measuring surface. Glyph ink may overshoot the line box
/// (accents, deep descenders), but not by more than half an em.
pub(crate) fn ink_padding(size_px: f32) -> f64 {
    f64::from(size_px).ceil() / 2.0 + 2.0
}

fn fill_layout(
    ctx: &mut vello_cpu::RenderContext,
    layout: &parley::Layout<TextBrushRgba8>,
    font: &vello_cpu::peniko::FontData,
) {
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));
            // Positioned glyphs carry the run offset and baseline, so the layout box
            // (0, 0, width, height) encloses them.
            let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
}

fn solid([r, g, b]: [u8; 3]) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(r, g, b, 255)
}

fn circle_to_cpu(center: Point, radius: f64) -> vello_cpu::kurbo::BezPath {
    let circle = kurbo::Circle::new(center, radius);
    bezpath_to_cpu(&circle.to_path(PATH_TOLERANCE))
}

fn point_to_cpu(p: kurbo::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
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

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
