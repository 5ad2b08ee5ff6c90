use super::*;

fn letters() -> LetterSet {
    LetterSet::new("CATSDOGRE".chars()).unwrap()
}

#[test]
fn default_config_matches_reference_constants() {
    let cfg = RenderConfig::default();
    assert_eq!(cfg.output_size, 500);
    assert_eq!(cfg.supersampling_ratio, 8);
    assert_eq!(cfg.image_size().unwrap(), 4000);
}

#[test]
fn zero_size_is_invalid_before_font_io() {
    let cfg = RenderConfig::new(0, "/definitely/not/here.ttf");
    let err = render(&letters(), &cfg).unwrap_err();
    assert!(matches!(err, WheelError::InvalidSize(_)), "{err:?}");
}

#[test]
fn zero_ratio_is_invalid() {
    let cfg = RenderConfig::new(10, "x.ttf").with_supersampling_ratio(0);
    assert!(matches!(cfg.image_size(), Err(WheelError::InvalidSize(_))));
}

#[test]
fn canvas_limit_is_enforced() {
    assert_eq!(
        RenderConfig::new(8191, "x.ttf").image_size().unwrap(),
        65_528
    );
    assert!(matches!(
        RenderConfig::new(8192, "x.ttf").image_size(),
        Err(WheelError::InvalidSize(_))
    ));
    assert!(matches!(
        RenderConfig::new(u32::MAX, "x.ttf").image_size(),
        Err(WheelError::InvalidSize(_))
    ));
}

#[test]
fn missing_font_surfaces_unchanged() {
    let cfg = RenderConfig::new(16, "/definitely/not/here.ttf");
    let err = render(&letters(), &cfg).unwrap_err();
    assert!(matches!(err, WheelError::FontLoad { .. }), "{err:?}");
}

#[test]
fn rendered_image_encodes_png() {
    let img = RenderedImage {
        rgb: RgbImage::from_pixel(3, 3, image::Rgb([255, 0, 0])),
    };
    let png = img.encode_png().unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    let decoded = image::load_from_memory(&png).unwrap().to_rgb8();
    assert_eq!(decoded.get_pixel(1, 1).0, [255, 0, 0]);
}
