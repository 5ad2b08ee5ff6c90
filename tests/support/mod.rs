#![allow(dead_code)]

use std::path::PathBuf;

const FONT_CANDIDATES: &[&str] = &[
    "tests/data/fonts/leaguespartan-bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

/// A TrueType font usable by the renderer, if the machine has one.
///
/// `WORDWHEEL_TEST_FONT` overrides the search.
pub fn font_path() -> Option<PathBuf> {
    if let Some(p) = std::env::var_os("WORDWHEEL_TEST_FONT") {
        return Some(PathBuf::from(p));
    }
    let found = FONT_CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|p| p.is_file());
    if found.is_none() {
        eprintln!("no test font found; set WORDWHEEL_TEST_FONT to run font-dependent tests");
    }
    found
}

pub fn font() -> Option<wordwheel::FontFace> {
    font_path().map(|p| wordwheel::FontFace::load(&p).unwrap())
}

pub fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "wordwheel_{tag}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

pub fn letters(word: &str) -> wordwheel::LetterSet {
    wordwheel::LetterSet::new(word.chars()).unwrap()
}

/// Mean luminance over a square window centred on `(cx, cy)`.
pub fn mean_luma(img: &wordwheel::RenderedImage, cx: u32, cy: u32, half: u32) -> f64 {
    let mut sum = 0.0;
    let mut n = 0.0;
    for y in cy.saturating_sub(half)..=(cy + half).min(img.height() - 1) {
        for x in cx.saturating_sub(half)..=(cx + half).min(img.width() - 1) {
            let [r, g, b] = img.pixel(x, y);
            sum += (f64::from(r) + f64::from(g) + f64::from(b)) / 3.0;
            n += 1.0;
        }
    }
    sum / n
}
