//! Drawing surface abstraction
//!
//! The face is drawn through a small set of primitives. Coordinates are in
//! surface units with the origin at the top-left and y growing downward.

use deci_core::Color;

/// Point in surface units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `distance` from `self`, rotated `angle` radians clockwise
    /// from 12 o'clock
    pub fn polar(&self, angle: f64, distance: f64) -> Point {
        Point {
            x: self.x + angle.sin() * distance,
            y: self.y - angle.cos() * distance,
        }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
}

/// Soft halo drawn around a shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub color: Color,
    pub blur: f64,
}

impl Glow {
    pub fn new(color: Color, blur: f64) -> Self {
        Self { color, blur }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: Color,
    pub width: f64,
    pub cap: LineCap,
    pub glow: Option<Glow>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// Position along the radius, 0.0 - 1.0
    pub offset: f32,
    pub color: Color,
}

impl GradientStop {
    pub const fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Colour of a gradient at `t` (0.0 - 1.0), interpolating between stops
pub fn gradient_color(stops: &[GradientStop], t: f32) -> Color {
    let Some(first) = stops.first() else {
        return Color::TRANSPARENT;
    };
    if t <= first.offset {
        return first.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if t <= b.offset {
            let span = (b.offset - a.offset).max(f32::EPSILON);
            return a.color.lerp(&b.color, (t - a.offset) / span);
        }
    }
    stops[stops.len() - 1].color
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    Left,
    #[default]
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub color: Color,
    /// Font size in surface units
    pub size: f64,
    pub bold: bool,
    pub align: TextAlign,
}

/// Two-dimensional drawing target
pub trait Surface {
    /// Width and height in surface units
    fn size(&self) -> (f64, f64);

    fn clear(&mut self);

    /// Disc filled with a gradient running from the centre outward
    fn fill_radial_gradient(&mut self, center: Point, radius: f64, stops: &[GradientStop]);

    fn stroke_line(&mut self, from: Point, to: Point, style: &LineStyle);

    fn fill_polygon(&mut self, points: &[Point], color: Color, glow: Option<Glow>);

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color, glow: Option<Glow>);

    /// Text positioned at `at` (middle baseline)
    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle);
}
