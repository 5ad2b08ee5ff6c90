use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        WheelError::invalid_letter_count(9, 8)
            .to_string()
            .contains("invalid letter count: expected 9, got 8")
    );
    assert!(
        WheelError::invalid_size("x")
            .to_string()
            .contains("invalid size:")
    );
    assert!(
        WheelError::font_load("fonts/missing.ttf", "x")
            .to_string()
            .contains("font load error for 'fonts/missing.ttf'")
    );
    assert!(
        WheelError::word_source("x")
            .to_string()
            .contains("word source error:")
    );
    assert!(WheelError::render("x").to_string().contains("render error:"));
}

#[test]
fn storage_keeps_io_source() {
    let err = WheelError::storage("images/a.png", std::io::Error::other("disk on fire"));
    assert!(err.to_string().contains("images/a.png"));
    let source = std::error::Error::source(&err).unwrap();
    assert!(source.to_string().contains("disk on fire"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = WheelError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn only_input_errors_are_client_errors() {
    assert!(WheelError::invalid_letter_count(9, 3).is_client_error());
    assert!(WheelError::invalid_size("0").is_client_error());
    assert!(!WheelError::font_load("f.ttf", "missing").is_client_error());
    assert!(!WheelError::NotFound("k".to_string()).is_client_error());
}
