use super::*;
use crate::layout::geometry::WheelProportions;

fn pixel(pixmap: &vello_cpu::Pixmap, x: u16, y: u16) -> [u8; 4] {
    let i = (usize::from(y) * usize::from(pixmap.width()) + usize::from(x)) * 4;
    let d = pixmap.data_as_u8_slice();
    [d[i], d[i + 1], d[i + 2], d[i + 3]]
}

fn rings_only(size: u16) -> vello_cpu::Pixmap {
    let g = WheelGeometry::compute(u32::from(size), &WheelProportions::STANDARD);
    let mut ctx = vello_cpu::RenderContext::new(size, size);
    ctx.set_paint(solid(WHITE));
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        0.0,
        0.0,
        f64::from(size),
        f64::from(size),
    ));
    draw_ring(&mut ctx, &g.outer_ring);
    draw_ring(&mut ctx, &g.inner_ring);
    ctx.flush();
    let mut pixmap = vello_cpu::Pixmap::new(size, size);
    ctx.render_to_pixmap(&mut pixmap);
    pixmap
}

#[test]
fn rings_paint_outline_fill_and_border() {
    let pixmap = rings_only(400);
    // corner is outside the wheel
    assert_eq!(pixel(&pixmap, 2, 2), [255, 255, 255, 255]);
    // centre sits in the gray inner disc
    assert_eq!(pixel(&pixmap, 200, 200), [200, 200, 200, 255]);
    // between the rings is the white outer fill
    assert_eq!(pixel(&pixmap, 300, 200), [255, 255, 255, 255]);
    // outer outline: radius 180, line width 4 -> x in (376, 380)
    assert_eq!(pixel(&pixmap, 378, 200), [0, 0, 0, 255]);
    // inner outline: radius 66.6 -> x in (262.6, 266.6)
    assert_eq!(pixel(&pixmap, 264, 200), [0, 0, 0, 255]);
}

#[test]
fn bezpath_conversion_keeps_elements() {
    let mut path = kurbo::BezPath::new();
    path.move_to((0.0, 0.0));
    path.line_to((1.0, 0.0));
    path.quad_to((2.0, 1.0), (3.0, 0.0));
    path.curve_to((4.0, 1.0), (5.0, 1.0), (6.0, 0.0));
    path.close_path();
    let cpu = bezpath_to_cpu(&path);
    assert_eq!(cpu.elements().len(), 5);
}

#[test]
fn circle_path_is_closed_and_bounded() {
    let path = circle_to_cpu(Point::new(10.0, 10.0), 5.0);
    let bbox = vello_cpu::kurbo::Shape::bounding_box(&path);
    assert!((bbox.x0 - 5.0).abs() < 0.2);
    assert!((bbox.x1 - 15.0).abs() < 0.2);
    assert!((bbox.y0 - 5.0).abs() < 0.2);
    assert!((bbox.y1 - 15.0).abs() < 0.2);
}

fn system_font() -> Option<FontFace> {
    let path = std::env::var_os("WORDWHEEL_TEST_FONT")
        .map(std::path::PathBuf::from)
        .or_else(|| {
            [
                "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
                "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
                "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
                "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
            ]
            .iter()
            .map(std::path::PathBuf::from)
            .find(|p| p.is_file())
        })?;
    Some(FontFace::load(&path).unwrap())
}

#[test]
fn capital_ink_fits_inside_measuring_surface() {
    let Some(font) = system_font() else {
        return;
    };
    let mut engine = TextLayoutEngine::new();
    engine.register(font.shaping_blob()).unwrap();

    for size_px in [580.0f32, 880.0, 120.0] {
        let layout = engine.layout_line("E", size_px).unwrap();
        let ink = measure_ink(&layout, font.font_data(), size_px)
            .unwrap()
            .expect("E has ink");
        let pad = ink_padding(size_px);
        let size = f64::from(size_px);

        assert!(ink.y0 > -pad, "top clipped at {size_px}: {ink:?}");
        assert!(ink.x0 > -pad, "left clipped at {size_px}: {ink:?}");
        // A capital sits inside the line box, well above its bottom edge.
        assert!(ink.y0 >= -1.0 && ink.y1 <= f64::from(layout.height()) + 1.0, "{ink:?}");
        // Cap height of a Latin sans is roughly 0.7 em.
        let cap = ink.height();
        assert!(cap > 0.6 * size && cap < 0.85 * size, "cap {cap} at {size_px}");
    }
}

#[test]
fn drawn_letter_ink_is_centred_on_anchor() {
    let Some(font) = system_font() else {
        return;
    };
    let mut engine = TextLayoutEngine::new();
    engine.register(font.shaping_blob()).unwrap();

    let side = 400u16;
    let mut ctx = vello_cpu::RenderContext::new(side, side);
    ctx.set_paint(solid(WHITE));
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, 400.0, 400.0));
    let anchor = Point::new(200.0, 200.0);
    draw_centered_letter(&mut ctx, &mut engine, font.font_data(), 'E', anchor, 160.0).unwrap();
    ctx.flush();
    let mut pixmap = vello_cpu::Pixmap::new(side, side);
    ctx.render_to_pixmap(&mut pixmap);

    let (mut x0, mut y0, mut x1, mut y1) = (u16::MAX, u16::MAX, 0u16, 0u16);
    for y in 0..side {
        for x in 0..side {
            if pixel(&pixmap, x, y)[0] < 128 {
                x0 = x0.min(x);
                y0 = y0.min(y);
                x1 = x1.max(x);
                y1 = y1.max(y);
            }
        }
    }
    assert!(x0 <= x1, "letter drew nothing");
    let cx = (f64::from(x0) + f64::from(x1) + 1.0) / 2.0;
    let cy = (f64::from(y0) + f64::from(y1) + 1.0) / 2.0;
    assert!((cx - 200.0).abs() <= 1.5, "x centre {cx}");
    assert!((cy - 200.0).abs() <= 1.5, "y centre {cy}");
}
