//! Scatter bubble charts.

use super::axes::{self, range_or, Frame, Ticks};
use super::legend::LegendEntry;
use super::Painter;
use crate::charts::canvas::{Canvas, HAlign, Stroke, VAlign};
use crate::charts::color::Color;
use crate::charts::layout::{padded_range, value_bounds, AxisScale, PixelRect};
use crate::charts::spec::{BubbleChart, BubblePoint, Plot};
use crate::error::{RenderError, RenderResult};

pub fn paint(
    painter: &Painter<'_>,
    canvas: &mut dyn Canvas,
    plot: &Plot,
    chart: &BubbleChart,
    cell: PixelRect,
    entries: &[LegendEntry],
) -> RenderResult<Frame> {
    let bounds = |f: fn(&BubblePoint) -> f64| {
        value_bounds(chart.points.iter().map(f))
            .map(|(lo, hi)| padded_range(lo, hi, 0.1))
            .ok_or_else(|| RenderError::invalid("bubble chart has no points"))
    };
    let (x_lo, x_hi) = range_or(plot.x_range, bounds(|p| p.x)?);
    let (y_lo, y_hi) = range_or(plot.y_range, bounds(|p| p.y)?);
    let x = AxisScale::linear(x_lo, x_hi);
    let y = AxisScale::linear(y_lo, y_hi);

    let x_ticks = Ticks::numeric(painter, &x, 8);
    let y_ticks = Ticks::numeric(painter, &y, 8);
    let frame = axes::draw(painter, canvas, plot, cell, x, y, &x_ticks, &y_ticks, entries)?;

    let edge = Stroke::solid(Color::BLACK, painter.pt(0.6));
    for point in &chart.points {
        let center = frame.map((point.x, point.y));
        let radius = painter.pt(chart.size_scale.radius(point.size_value));
        canvas.circle(center, radius, chart.bubble_color(point), Some(&edge))?;
    }

    let label_style = painter.style(10.0).align(HAlign::Left, VAlign::Bottom);
    for point in &chart.points {
        let (px, py) = frame.map((point.x, point.y));
        let offset = painter.pt(5.0);
        canvas.text(&point.label, (px + offset, py - offset), &label_style)?;
    }
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::canvas::RecordingCanvas;
    use crate::charts::color::ColorScale;
    use crate::charts::spec::SizeScale;
    use crate::config::RenderConfig;
    use approx::assert_relative_eq;

    #[test]
    fn bubble_radius_and_color_follow_their_scalars() {
        let chart = BubbleChart::new(
            vec![
                BubblePoint::new("low", 30.0, 80.0, 50.0, 0.0),
                BubblePoint::new("high", 85.0, 95.0, 10.0, 100.0),
            ],
            SizeScale {
                factor: 20.0,
                offset: 0.0,
            },
            ColorScale::RdYlGn,
        );
        let plot = Plot::new("matrix", chart.clone()).with_x_range(20.0, 100.0).with_y_range(60.0, 100.0);

        let config = RenderConfig::default().with_dpi(144);
        let painter = Painter::new(&config, &config.palette);
        let mut canvas = RecordingCanvas::new(800, 600);
        paint(&painter, &mut canvas, &plot, &chart, PixelRect::new(0.0, 0.0, 800.0, 600.0), &[])
            .unwrap();

        let circles: Vec<_> = canvas.circles().collect();
        assert_eq!(circles.len(), 2);
        // area 1000 pt² at 2 px/pt
        assert_relative_eq!(circles[0].1, 1000f64.sqrt() / 2.0 * 2.0, epsilon = 1e-9);
        assert_relative_eq!(circles[1].1, 200f64.sqrt() / 2.0 * 2.0, epsilon = 1e-9);
        assert_eq!(circles[0].2, Color::hex(0xA50026).with_alpha(0.7));
        assert_eq!(circles[1].2, Color::hex(0x006837).with_alpha(0.7));
    }
}
