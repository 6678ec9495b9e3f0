use std::f64::consts::{FRAC_PI_2, TAU};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Painter, Shape},
        Widget,
    },
};

const RADIUS: f64 = 0.95;
const SAMPLES: usize = 720;

/// Circular progress indicator. Starts at twelve o'clock and runs clockwise;
/// the elapsed share is drawn in `elapsed`, the rest in `remaining`.
#[derive(Debug, Clone, Copy)]
pub struct Ring {
    pub progress: f64,
    pub remaining: Color,
    pub elapsed: Color,
}

/// Whether the point at fraction `t` of the way round is already used up
pub fn is_elapsed(t: f64, progress: f64) -> bool {
    t < progress.clamp(0.0, 1.0)
}

impl Shape for Ring {
    fn draw(&self, painter: &mut Painter) {
        for i in 0..SAMPLES {
            let t = i as f64 / SAMPLES as f64;
            let angle = FRAC_PI_2 - t * TAU;
            let color = if is_elapsed(t, self.progress) {
                self.elapsed
            } else {
                self.remaining
            };
            if let Some((x, y)) = painter.get_point(RADIUS * angle.cos(), RADIUS * angle.sin()) {
                painter.paint(x, y, color);
            }
        }
    }
}

pub fn render_ring(progress: f64, accent: Color, area: Rect, buf: &mut Buffer) {
    if area.is_empty() {
        return;
    }
    let ring = Ring {
        progress,
        remaining: accent,
        elapsed: Color::DarkGray,
    };
    Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-1.0, 1.0])
        .y_bounds([-1.0, 1.0])
        .paint(|ctx| ctx.draw(&ring))
        .render(area, buf);
}
