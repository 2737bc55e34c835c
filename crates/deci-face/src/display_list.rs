//! Display list - a surface that records draw operations

use deci_core::Color;

use crate::{GradientStop, Glow, LineStyle, Point, Surface, TextStyle};

/// One recorded primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    RadialGradient {
        center: Point,
        radius: f64,
        stops: Vec<GradientStop>,
    },
    Line {
        from: Point,
        to: Point,
        style: LineStyle,
    },
    Polygon {
        points: Vec<Point>,
        color: Color,
        glow: Option<Glow>,
    },
    Circle {
        center: Point,
        radius: f64,
        color: Color,
        glow: Option<Glow>,
    },
    Text {
        text: String,
        at: Point,
        style: TextStyle,
    },
}

/// Recording surface of a fixed size
#[derive(Debug, Clone)]
pub struct DisplayList {
    width: f64,
    height: f64,
    ops: Vec<DrawOp>,
}

impl DisplayList {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Operations recorded since the last clear
    pub fn current_frame(&self) -> &[DrawOp] {
        let start = self
            .ops
            .iter()
            .rposition(|op| matches!(op, DrawOp::Clear))
            .map_or(0, |i| i + 1);
        &self.ops[start..]
    }
}

impl Surface for DisplayList {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn fill_radial_gradient(&mut self, center: Point, radius: f64, stops: &[GradientStop]) {
        self.ops.push(DrawOp::RadialGradient {
            center,
            radius,
            stops: stops.to_vec(),
        });
    }

    fn stroke_line(&mut self, from: Point, to: Point, style: &LineStyle) {
        self.ops.push(DrawOp::Line {
            from,
            to,
            style: *style,
        });
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color, glow: Option<Glow>) {
        self.ops.push(DrawOp::Polygon {
            points: points.to_vec(),
            color,
            glow,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color, glow: Option<Glow>) {
        self.ops.push(DrawOp::Circle {
            center,
            radius,
            color,
            glow,
        });
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            at,
            style: *style,
        });
    }
}
