//! Character-cell rasterizer
//!
//! Rasterizes surface primitives into a grid of terminal cells. The logical
//! surface is scaled independently on each axis, so a grid with half as many
//! rows as columns keeps the dial round on a terminal with 1:2 cells.

use deci_core::{Color, DeciError, DeciResult};

use crate::{gradient_color, Glow, GradientStop, LineStyle, Point, Surface, TextAlign, TextStyle};

/// One terminal cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
}

impl Cell {
    fn blank(bg: Color) -> Self {
        Cell {
            ch: ' ',
            fg: Color::WHITE,
            bg,
            bold: false,
        }
    }
}

/// Grid of cells covering a logical surface
#[derive(Debug, Clone)]
pub struct CellCanvas {
    cols: usize,
    rows: usize,
    width: f64,
    height: f64,
    backdrop: Color,
    cells: Vec<Cell>,
}

impl CellCanvas {
    /// `cols` x `rows` cells covering a `width` x `height` surface
    pub fn new(cols: usize, rows: usize, width: f64, height: f64) -> DeciResult<Self> {
        if cols == 0 || rows == 0 {
            return Err(DeciError::Surface(format!("empty grid {cols}x{rows}")));
        }
        if !(width > 0.0 && height > 0.0) {
            return Err(DeciError::Surface(format!(
                "invalid surface size {width}x{height}"
            )));
        }
        let backdrop = Color::BLACK;
        Ok(CellCanvas {
            cols,
            rows,
            width,
            height,
            backdrop,
            cells: vec![Cell::blank(backdrop); cols * rows],
        })
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Cells of one row, left to right
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row.min(self.rows) * self.cols;
        let end = (start + self.cols).min(self.cells.len());
        &self.cells[start..end]
    }

    /// Grid characters, one line per row, trailing spaces kept
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity((self.cols + 1) * self.rows);
        for r in 0..self.rows {
            out.extend(self.row(r).iter().map(|c| c.ch));
            out.push('\n');
        }
        out
    }

    fn cell_w(&self) -> f64 {
        self.width / self.cols as f64
    }

    fn cell_h(&self) -> f64 {
        self.height / self.rows as f64
    }

    fn cell_center(&self, col: usize, row: usize) -> Point {
        Point::new(
            (col as f64 + 0.5) * self.cell_w(),
            (row as f64 + 0.5) * self.cell_h(),
        )
    }

    fn locate(&self, p: Point) -> Option<(usize, usize)> {
        let col = (p.x / self.cell_w()).floor();
        let row = (p.y / self.cell_h()).floor();
        if col < 0.0 || row < 0.0 || col >= self.cols as f64 || row >= self.rows as f64 {
            return None;
        }
        Some((col as usize, row as usize))
    }

    fn put(&mut self, col: usize, row: usize, ch: char, fg: Color, bold: bool) {
        let bg = self.cells[row * self.cols + col].bg;
        let cell = &mut self.cells[row * self.cols + col];
        cell.ch = ch;
        cell.fg = fg.over(&bg);
        cell.bold = bold;
    }

    /// Part of the segment inside the surface (Liang-Barsky), or `None`
    /// when it misses the surface entirely
    fn clip(&self, from: Point, to: Point) -> Option<(Point, Point)> {
        if ![from.x, from.y, to.x, to.y].iter().all(|v| v.is_finite()) {
            return None;
        }
        let (dx, dy) = (to.x - from.x, to.y - from.y);
        let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
        let edges = [
            (-dx, from.x),
            (dx, self.width - from.x),
            (-dy, from.y),
            (dy, self.height - from.y),
        ];
        for (p, q) in edges {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
            if t0 > t1 {
                return None;
            }
        }
        let at = |t: f64| Point::new(from.x + dx * t, from.y + dy * t);
        Some((at(t0), at(t1)))
    }

    /// Cell rectangle (inclusive) covering a bounding box
    fn span(&self, min: Point, max: Point) -> (usize, usize, usize, usize) {
        let clamp_col = |x: f64| ((x / self.cell_w()).floor().max(0.0) as usize).min(self.cols - 1);
        let clamp_row = |y: f64| ((y / self.cell_h()).floor().max(0.0) as usize).min(self.rows - 1);
        (clamp_col(min.x), clamp_row(min.y), clamp_col(max.x), clamp_row(max.y))
    }
}

/// Glyph approximating a line running along `(dx, dy)`
fn line_glyph(dx: f64, dy: f64) -> char {
    // Terminal cells are about twice as tall as wide
    let angle = (-dy * 2.0).atan2(dx).to_degrees().rem_euclid(180.0);
    match angle {
        a if !(22.5..157.5).contains(&a) => '─',
        a if a < 67.5 => '╱',
        a if a < 112.5 => '│',
        _ => '╲',
    }
}

fn inside_polygon(points: &[Point], p: Point) -> bool {
    let mut inside = false;
    let mut j = points.len().wrapping_sub(1);
    for i in 0..points.len() {
        let (a, b) = (points[i], points[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

impl Surface for CellCanvas {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        let blank = Cell::blank(self.backdrop);
        self.cells.iter_mut().for_each(|c| *c = blank);
    }

    fn fill_radial_gradient(&mut self, center: Point, radius: f64, stops: &[GradientStop]) {
        if radius <= 0.0 {
            return;
        }
        for row in 0..self.rows {
            for col in 0..self.cols {
                let d = self.cell_center(col, row).distance(&center);
                if d <= radius {
                    let shade = gradient_color(stops, (d / radius) as f32);
                    let cell = &mut self.cells[row * self.cols + col];
                    cell.bg = shade.over(&cell.bg);
                }
            }
        }
    }

    fn stroke_line(&mut self, from: Point, to: Point, style: &LineStyle) {
        let glyph = if style.width >= 3.0 {
            '█'
        } else {
            line_glyph(to.x - from.x, to.y - from.y)
        };
        let Some((from, to)) = self.clip(from, to) else {
            return;
        };
        let step = self.cell_w().min(self.cell_h()) / 2.0;
        let steps = (from.distance(&to) / step).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let p = Point::new(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t);
            if let Some((col, row)) = self.locate(p) {
                self.put(col, row, glyph, style.color, style.glow.is_some());
            }
        }
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color, glow: Option<Glow>) {
        if points.len() < 3 {
            return;
        }
        let min = points.iter().fold(Point::new(f64::MAX, f64::MAX), |m, p| {
            Point::new(m.x.min(p.x), m.y.min(p.y))
        });
        let max = points.iter().fold(Point::new(f64::MIN, f64::MIN), |m, p| {
            Point::new(m.x.max(p.x), m.y.max(p.y))
        });
        let (c0, r0, c1, r1) = self.span(min, max);
        for row in r0..=r1 {
            for col in c0..=c1 {
                if inside_polygon(points, self.cell_center(col, row)) {
                    self.put(col, row, '█', color, glow.is_some());
                }
            }
        }

        // Bars thinner than a cell still need a visible spine
        let n = points.len();
        let mid = |a: Point, b: Point| Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
        let base = mid(points[0], points[n - 1]);
        let tip = mid(points[1], points[2]);
        self.stroke_line(
            base,
            tip,
            &LineStyle {
                color,
                width: 3.0,
                cap: crate::LineCap::Butt,
                glow,
            },
        );
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color, glow: Option<Glow>) {
        let min = Point::new(center.x - radius, center.y - radius);
        let max = Point::new(center.x + radius, center.y + radius);
        let (c0, r0, c1, r1) = self.span(min, max);
        let mut hit = false;
        for row in r0..=r1 {
            for col in c0..=c1 {
                if self.cell_center(col, row).distance(&center) <= radius {
                    self.put(col, row, '█', color, glow.is_some());
                    hit = true;
                }
            }
        }
        if !hit {
            if let Some((col, row)) = self.locate(center) {
                self.put(col, row, '●', color, glow.is_some());
            }
        }
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) {
        let Some((col, row)) = self.locate(at) else {
            return;
        };
        let len = text.chars().count();
        let start = match style.align {
            TextAlign::Left => col as isize,
            TextAlign::Center => col as isize - (len as isize - 1) / 2,
        };
        for (i, ch) in text.chars().enumerate() {
            let c = start + i as isize;
            if c >= 0 && (c as usize) < self.cols {
                self.put(c as usize, row, ch, style.color, style.bold);
            }
        }
    }
}
