//! Pure wheel geometry.
//!
//! Every absolute measurement is derived from the supersampled canvas size and a fixed set of
//! dimensionless proportions. Angles are radians, measured from the positive x axis (3 o'clock)
//! and increasing clockwise because image y grows downward.

use std::f64::consts::{FRAC_PI_4, FRAC_PI_8};

use kurbo::{BezPath, Line, Point, Vec2};

use crate::foundation::core::RADIAL_LETTERS;

/// Default size of the final image, in pixels.
pub const DEFAULT_OUTPUT_SIZE: u32 = 500;

/// Default canvas multiplier used for antialiasing.
pub const SUPERSAMPLING_RATIO: u32 = 8;

/// Dimensionless ratios that shape the wheel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelProportions {
    /// Empty margin around the outer circle, as a fraction of the canvas size.
    pub border: f64,
    /// Inner circle diameter as a fraction of the outer circle diameter.
    pub inner_circle_diameter: f64,
    /// Radial letter position along a spoke, 0 at the inner circle and 1 at the outer circle.
    pub letter_position: f64,
    /// Ring thickness and spoke width, as a fraction of the canvas size.
    pub line_width: f64,
    /// Centre letter font size, as a fraction of the canvas size.
    pub center_font_size: f64,
    /// Radial letter font size, as a fraction of the canvas size.
    pub outer_font_size: f64,
}

impl WheelProportions {
    pub const STANDARD: Self = Self {
        border: 0.1,
        inner_circle_diameter: 0.37,
        letter_position: 0.5,
        line_width: 0.012,
        center_font_size: 0.22,
        outer_font_size: 0.145,
    };
}

impl Default for WheelProportions {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// A ring drawn as a black disc with a smaller fill disc on top.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ring {
    pub center: Point,
    /// Radius of the black outline disc.
    pub radius: f64,
    /// Radius of the fill disc; never negative.
    pub fill_radius: f64,
    pub fill_rgb: [u8; 3],
}

/// Fully resolved layout for one canvas size.
#[derive(Clone, Debug, PartialEq)]
pub struct WheelGeometry {
    pub image_size: u32,
    pub center: Point,
    pub outer_radius: f64,
    pub inner_radius: f64,
    pub line_width: f64,
    pub letter_radius: f64,
    pub outer_font_size: f32,
    pub center_font_size: f32,
    pub outer_ring: Ring,
    pub inner_ring: Ring,
    pub spokes: [Line; RADIAL_LETTERS],
    pub radial_anchors: [Point; RADIAL_LETTERS],
}

impl WheelGeometry {
    /// Resolve all measurements for a square canvas of `image_size` pixels.
    ///
    /// Line width and font sizes are truncated to whole pixels and clamped to at least one pixel
    /// so that tiny canvases still produce visible strokes and valid fonts.
    pub fn compute(image_size: u32, p: &WheelProportions) -> Self {
        let size = f64::from(image_size);
        let center = Point::new(size / 2.0, size / 2.0);

        let outer_radius = size * (1.0 - p.border) / 2.0;
        let inner_radius = outer_radius * p.inner_circle_diameter;
        let line_width = whole_px(size * p.line_width);
        let letter_radius = inner_radius + p.letter_position * (outer_radius - inner_radius);

        let outer_ring = Ring {
            center,
            radius: outer_radius,
            fill_radius: (outer_radius - line_width).max(0.0),
            fill_rgb: [255, 255, 255],
        };
        let inner_ring = Ring {
            center,
            radius: inner_radius,
            fill_radius: (inner_radius - line_width).max(0.0),
            fill_rgb: [200, 200, 200],
        };

        let spokes = std::array::from_fn(|k| {
            let theta = spoke_angle(k);
            Line::new(
                polar(center, inner_radius, theta),
                polar(center, outer_radius, theta),
            )
        });
        let radial_anchors =
            std::array::from_fn(|k| polar(center, letter_radius, anchor_angle(k)));

        Self {
            image_size,
            center,
            outer_radius,
            inner_radius,
            line_width,
            letter_radius,
            outer_font_size: whole_px(size * p.outer_font_size) as f32,
            center_font_size: whole_px(size * p.center_font_size) as f32,
            outer_ring,
            inner_ring,
            spokes,
            radial_anchors,
        }
    }

    /// Anchor of the centre letter: the exact canvas centre.
    pub fn center_anchor(&self) -> Point {
        self.center
    }
}

/// Angle of spoke `k`: multiples of 45 degrees.
pub fn spoke_angle(k: usize) -> f64 {
    FRAC_PI_4 * k as f64
}

/// Angle of radial anchor `k`: 22.5 degrees past spoke `k`, bisecting adjacent spokes.
pub fn anchor_angle(k: usize) -> f64 {
    FRAC_PI_8 + FRAC_PI_4 * k as f64
}

/// Point at distance `r` from `origin` along `theta`.
pub fn polar(origin: Point, r: f64, theta: f64) -> Point {
    origin + Vec2::from_angle(theta) * r
}

/// Closed quadrilateral covering `line` with the given width and square (butt) ends.
pub fn thick_line_path(line: Line, width: f64) -> BezPath {
    let dir = line.p1 - line.p0;
    let len = dir.hypot();
    let mut path = BezPath::new();
    if len <= f64::EPSILON {
        return path;
    }
    let normal = Vec2::new(-dir.y, dir.x) * (width / 2.0 / len);
    path.move_to(line.p0 + normal);
    path.line_to(line.p1 + normal);
    path.line_to(line.p1 - normal);
    path.line_to(line.p0 - normal);
    path.close_path();
    path
}

fn whole_px(v: f64) -> f64 {
    v.floor().max(1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/geometry.rs"]
mod tests;
