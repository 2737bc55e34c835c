//! Clock face - draws one frame of the decimal dial
//!
//! Draw order per frame:
//! 1. clear
//! 2. background gradient disc
//! 3. hour ticks and numeric labels
//! 4. hour, unit and subunit hands
//! 5. centre pivot

use std::f64::consts::{FRAC_PI_2, TAU};

use deci_core::{Color, DecimalTime, TimeSystem};
use deci_time::HandFractions;

use crate::{GradientStop, Glow, LineCap, LineStyle, Point, Surface, TextAlign, TextStyle};

/// Default dial radius in surface units
pub const DEFAULT_RADIUS: f64 = 220.0;

/// How one hand is drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandStyle {
    /// `None` uses the time system's display colour
    pub color: Option<Color>,
    pub width: f64,
    /// Length as a fraction of the dial radius
    pub length: f64,
    pub glow_blur: f64,
    /// Filled bar instead of a stroked line
    pub filled: bool,
}

/// Visual parameters of the dial
#[derive(Debug, Clone, PartialEq)]
pub struct FaceStyle {
    pub radius: f64,
    pub tick_inner_inset: f64,
    pub tick_outer_inset: f64,
    pub tick_width: f64,
    pub major_tick: Color,
    pub minor_tick: Color,
    pub label_inset: f64,
    pub label: TextStyle,
    pub background: Vec<GradientStop>,
    pub hour_hand: HandStyle,
    pub unit_hand: HandStyle,
    pub subunit_hand: HandStyle,
    pub pivot_radius: f64,
    pub pivot_color: Color,
    pub pivot_glow: f64,
}

impl Default for FaceStyle {
    fn default() -> Self {
        FaceStyle {
            radius: DEFAULT_RADIUS,
            tick_inner_inset: 20.0,
            tick_outer_inset: 5.0,
            tick_width: 3.0,
            major_tick: Color::WHITE,
            minor_tick: Color::WHITE.with_alpha(0.3),
            label_inset: 40.0,
            label: TextStyle {
                color: Color::WHITE,
                size: 20.0,
                bold: true,
                align: TextAlign::Center,
            },
            background: vec![
                GradientStop::new(0.0, Color::WHITE.with_alpha(0.05)),
                GradientStop::new(0.7, Color::BLACK.with_alpha(0.2)),
                GradientStop::new(1.0, Color::BLACK.with_alpha(0.6)),
            ],
            hour_hand: HandStyle {
                color: None,
                width: 8.0,
                length: 0.6,
                glow_blur: 10.0,
                filled: true,
            },
            unit_hand: HandStyle {
                color: Some(Color::from_rgb8(0xBB, 0x86, 0xFC)),
                width: 3.0,
                length: 0.75,
                glow_blur: 8.0,
                filled: false,
            },
            subunit_hand: HandStyle {
                color: Some(Color::from_rgb8(0xFF, 0x98, 0x00)),
                width: 2.0,
                length: 0.85,
                glow_blur: 12.0,
                filled: false,
            },
            pivot_radius: 10.0,
            pivot_color: Color::WHITE,
            pivot_glow: 15.0,
        }
    }
}

impl FaceStyle {
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }
}

/// Geometry of one hour tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickMark {
    pub index: u32,
    /// Clockwise from 12 o'clock, radians
    pub angle: f64,
    pub inner: Point,
    pub outer: Point,
    pub major: bool,
    pub label: String,
    pub label_at: Point,
}

/// Decimal clock dial bound to a time system and a style
#[derive(Debug, Clone)]
pub struct ClockFace {
    system: TimeSystem,
    style: FaceStyle,
}

impl ClockFace {
    pub fn new(system: TimeSystem) -> Self {
        Self::with_style(system, FaceStyle::default())
    }

    pub fn with_style(system: TimeSystem, style: FaceStyle) -> Self {
        ClockFace { system, style }
    }

    /// Dial centre for a surface of the given size
    pub fn center(size: (f64, f64)) -> Point {
        Point::new(size.0 / 2.0, size.1 / 2.0)
    }

    /// Hour ticks around `center`
    pub fn tick_marks(&self, center: Point) -> Vec<TickMark> {
        let hours = self.system.hours_per_day();
        let r = self.style.radius;

        (0..hours)
            .map(|i| {
                let angle = TAU * i as f64 / hours as f64;
                TickMark {
                    index: i,
                    angle,
                    inner: center.polar(angle, r - self.style.tick_inner_inset),
                    outer: center.polar(angle, r - self.style.tick_outer_inset),
                    major: self.system.is_major_tick(i),
                    label: self.system.hour_label(i),
                    label_at: center.polar(angle, r - self.style.label_inset),
                }
            })
            .collect()
    }

    /// Draw one complete frame
    pub fn draw(&self, surface: &mut dyn Surface, time: &DecimalTime) {
        let center = Self::center(surface.size());
        let style = &self.style;

        surface.clear();
        surface.fill_radial_gradient(center, style.radius, &style.background);

        for tick in self.tick_marks(center) {
            let color = if tick.major {
                style.major_tick
            } else {
                style.minor_tick
            };
            surface.stroke_line(
                tick.inner,
                tick.outer,
                &LineStyle {
                    color,
                    width: style.tick_width,
                    cap: LineCap::Round,
                    glow: None,
                },
            );
            surface.fill_text(&tick.label, tick.label_at, &style.label);
        }

        let [hour, unit, subunit] = HandFractions::new(time, &self.system).angles();
        self.draw_hand(surface, center, hour, &style.hour_hand);
        self.draw_hand(surface, center, unit, &style.unit_hand);
        self.draw_hand(surface, center, subunit, &style.subunit_hand);

        surface.fill_circle(
            center,
            style.pivot_radius,
            style.pivot_color,
            Some(Glow::new(style.pivot_color, style.pivot_glow)),
        );
    }

    fn draw_hand(&self, surface: &mut dyn Surface, center: Point, angle: f64, hand: &HandStyle) {
        let color = hand.color.unwrap_or(self.system.display_color());
        let glow = Some(Glow::new(color, hand.glow_blur));
        let tip = center.polar(angle, self.style.radius * hand.length);

        if hand.filled {
            surface.fill_polygon(&hand_bar(center, tip, angle, hand.width), color, glow);
        } else {
            surface.stroke_line(
                center,
                tip,
                &LineStyle {
                    color,
                    width: hand.width,
                    cap: LineCap::Round,
                    glow,
                },
            );
        }
    }
}

/// Rectangle of `width` running from `base` to `tip`
fn hand_bar(base: Point, tip: Point, angle: f64, width: f64) -> [Point; 4] {
    let half = width / 2.0;
    let left = angle - FRAC_PI_2;
    let right = angle + FRAC_PI_2;
    [
        base.polar(left, half),
        tip.polar(left, half),
        tip.polar(right, half),
        base.polar(right, half),
    ]
}
