//! Radar (polar) charts.
//!
//! Category `i` sits at angle `2πi/n`, measured counter-clockwise from east.

use super::axes::{panel_title, Frame};
use super::legend::LegendEntry;
use super::{circle_path, marker, Painter};
use crate::charts::canvas::{Canvas, HAlign, Stroke, VAlign};
use crate::charts::layout::{PixelRect, Point};
use crate::charts::spec::{Marker, Plot, RadarChart};
use crate::error::RenderResult;

pub fn legend_entries(painter: &Painter<'_>, chart: &RadarChart) -> Vec<LegendEntry> {
    chart
        .series
        .iter()
        .enumerate()
        .map(|(i, s)| LegendEntry::line(s.label.clone(), painter.series_color(s.color, i), Marker::Circle))
        .collect()
}

fn polar(center: Point, radius: f64, angle: f64) -> Point {
    (center.0 + radius * angle.cos(), center.1 - radius * angle.sin())
}

pub fn paint(
    painter: &Painter<'_>,
    canvas: &mut dyn Canvas,
    plot: &Plot,
    chart: &RadarChart,
    cell: PixelRect,
) -> RenderResult<Frame> {
    let body = panel_title(painter, canvas, &plot.title, cell)?;
    let side = body.w.min(body.h);
    let region = PixelRect::new(
        body.center().0 - side / 2.0,
        body.center().1 - side / 2.0,
        side,
        side,
    );
    let center = region.center();
    let outer = (side / 2.0 - painter.pt(36.0)).max(side / 4.0);
    let angles = chart.angles();
    let theme = painter.theme();

    // Polar background, rings and spokes
    canvas.circle(center, outer, theme.axes_background(), None)?;
    let grid = Stroke::solid(theme.grid_color(), painter.pt(0.8));
    let ring_style = painter.style(8.0).align(HAlign::Left, VAlign::Bottom);
    for ring in &chart.rings {
        let r = ring / chart.max * outer;
        canvas.polyline(&circle_path(center, r, 120), &grid)?;
        let at = polar(center, r, std::f64::consts::PI / 8.0);
        canvas.text(&painter.number(*ring), at, &ring_style)?;
    }
    canvas.polyline(&circle_path(center, outer, 120), &grid)?;
    for &angle in &angles[..chart.categories.len()] {
        canvas.polyline(&[center, polar(center, outer, angle)], &grid)?;
    }

    // Category labels just outside the outer ring
    let label_gap = painter.pt(10.0);
    for (category, &angle) in chart.categories.iter().zip(&angles) {
        let (cos, sin) = (angle.cos(), angle.sin());
        let h_align = if cos > 0.1 {
            HAlign::Left
        } else if cos < -0.1 {
            HAlign::Right
        } else {
            HAlign::Center
        };
        let v_align = if sin > 0.1 {
            VAlign::Bottom
        } else if sin < -0.1 {
            VAlign::Top
        } else {
            VAlign::Middle
        };
        let style = painter.style(10.0).align(h_align, v_align);
        canvas.text(category, polar(center, outer + label_gap, angle), &style)?;
    }

    // Series: filled polygon, outline, markers
    for (i, series) in chart.series.iter().enumerate() {
        let color = painter.series_color(series.color, i);
        let points: Vec<Point> = series
            .closed_scores()
            .iter()
            .zip(&angles)
            .map(|(score, &angle)| polar(center, score / chart.max * outer, angle))
            .collect();
        canvas.polygon(&points, color.with_alpha(chart.fill_alpha), None)?;
        canvas.polyline(&points, &Stroke::solid(color, painter.pt(2.0)))?;
        for &point in &points[..series.scores.len()] {
            marker(canvas, Marker::Circle, point, painter.pt(3.0), color)?;
        }
    }
    Ok(Frame::unit(region))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::canvas::RecordingCanvas;
    use crate::charts::color::Color;
    use crate::charts::spec::RadarSeries;
    use crate::config::RenderConfig;
    use approx::assert_relative_eq;

    #[test]
    fn first_category_points_east() {
        let chart = RadarChart::new(
            vec!["e".into(), "n".into(), "w".into(), "s".into()],
            vec![RadarSeries::new("s", vec![10.0, 10.0, 10.0, 10.0]).with_color(Color::RED)],
            10.0,
        );
        let config = RenderConfig::default().with_dpi(72);
        let painter = Painter::new(&config, &config.palette);
        let mut canvas = RecordingCanvas::new(400, 400);
        let plot = Plot::new("", chart.clone());
        paint(&painter, &mut canvas, &plot, &chart, PixelRect::new(0.0, 0.0, 400.0, 400.0))
            .unwrap();

        let outline = canvas.polylines_with_color(Color::RED)[0];
        assert_eq!(outline.len(), 5);
        let (cx, cy) = (200.0, 202.0);
        assert!(outline[0].0 > cx);
        assert_relative_eq!(outline[0].1, cy, epsilon = 1e-9);
        // Second category is straight up
        assert_relative_eq!(outline[1].0, cx, epsilon = 1e-9);
        assert!(outline[1].1 < cy);
    }
}
