//! Pie charts.

use super::axes::{panel_title, Frame};
use super::Painter;
use crate::charts::canvas::{Canvas, HAlign, Stroke, VAlign};
use crate::charts::color::Color;
use crate::charts::layout::{PixelRect, Point};
use crate::charts::spec::{PieChart, Plot};
use crate::error::RenderResult;

/// Degrees per polygon step along a slice arc.
const ARC_STEP_DEG: f64 = 2.0;

/// `(start, sweep)` in degrees for every slice, counter-clockwise.
pub fn slice_angles(chart: &PieChart) -> Vec<(f64, f64)> {
    let total = chart.total();
    let mut start = chart.start_angle;
    chart
        .slices
        .iter()
        .map(|s| {
            let sweep = s.value / total * 360.0;
            let angles = (start, sweep);
            start += sweep;
            angles
        })
        .collect()
}

fn polar(center: Point, radius: f64, degrees: f64) -> Point {
    let a = degrees.to_radians();
    (center.0 + radius * a.cos(), center.1 - radius * a.sin())
}

fn wedge(center: Point, radius: f64, start: f64, sweep: f64) -> Vec<Point> {
    let steps = ((sweep / ARC_STEP_DEG).ceil() as usize).max(2);
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    for k in 0..=steps {
        points.push(polar(center, radius, start + sweep * k as f64 / steps as f64));
    }
    points
}

pub fn paint(
    painter: &Painter<'_>,
    canvas: &mut dyn Canvas,
    plot: &Plot,
    chart: &PieChart,
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
    // Leave room for the outside labels
    let radius = side / 2.0 * 0.72;

    let edge = Stroke::solid(Color::WHITE, painter.pt(1.0));
    let label_style = painter.style(10.0);
    let percent_style = painter
        .style(10.0)
        .bold()
        .color(chart.percent_color.unwrap_or(painter.theme().text_color()));
    let percents = chart.percent_labels();

    for (i, (slice, (start, sweep))) in chart.slices.iter().zip(slice_angles(chart)).enumerate() {
        let mid = start + sweep / 2.0;
        let origin = if chart.is_exploded(slice) {
            polar(center, radius * chart.explode_offset, mid)
        } else {
            center
        };
        let color = painter.series_color(slice.color, i);
        // Zero slices keep their labels but have no wedge
        if sweep > 0.0 {
            canvas.polygon(&wedge(origin, radius, start, sweep), color, Some(&edge))?;
        }

        let anchor = polar(origin, radius * 1.1, mid);
        let h_align = if mid.to_radians().cos() >= 0.0 {
            HAlign::Left
        } else {
            HAlign::Right
        };
        let style = label_style.clone().align(h_align, VAlign::Middle);
        canvas.text(&slice.label, anchor, &style)?;
        canvas.text(&percents[i], polar(origin, radius * 0.6, mid), &percent_style)?;
    }
    Ok(Frame::unit(region))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::canvas::RecordingCanvas;
    use crate::charts::spec::PieSlice;
    use crate::config::RenderConfig;
    use approx::assert_relative_eq;

    fn chart() -> PieChart {
        PieChart::new(vec![
            PieSlice::new("a", 18.0),
            PieSlice::new("b", 12.0),
            PieSlice::new("c", 15.0),
            PieSlice::new("d", 55.0),
        ])
        .explode_from(15.0)
    }

    #[test]
    fn slices_start_at_top_and_cover_full_circle() {
        let angles = slice_angles(&chart());
        assert_relative_eq!(angles[0].0, 90.0);
        let swept: f64 = angles.iter().map(|a| a.1).sum();
        assert_relative_eq!(swept, 360.0, epsilon = 1e-9);
        assert_relative_eq!(angles[1].0, 90.0 + 18.0 * 3.6, epsilon = 1e-9);
    }

    #[test]
    fn draws_one_wedge_and_two_labels_per_slice() {
        let config = RenderConfig::default().with_dpi(72);
        let painter = Painter::new(&config, &config.palette);
        let mut canvas = RecordingCanvas::new(400, 400);
        let plot = Plot::new("", chart());
        paint(&painter, &mut canvas, &plot, &chart(), PixelRect::new(0.0, 0.0, 400.0, 400.0))
            .unwrap();

        assert_eq!(canvas.polygons().count(), 4);
        let texts = canvas.texts();
        assert!(texts.contains(&"55.0%"));
        assert!(texts.contains(&"18.0%"));
        assert!(texts.contains(&"d"));
    }

    #[test]
    fn zero_slice_is_labelled_without_a_wedge() {
        let config = RenderConfig::default().with_dpi(72);
        let painter = Painter::new(&config, &config.palette);
        let mut canvas = RecordingCanvas::new(400, 400);
        let pie = PieChart::new(vec![
            PieSlice::new("a", 40.0),
            PieSlice::new("none", 0.0),
            PieSlice::new("b", 60.0),
        ]);
        let plot = Plot::new("", pie.clone());
        paint(&painter, &mut canvas, &plot, &pie, PixelRect::new(0.0, 0.0, 400.0, 400.0))
            .unwrap();

        assert_eq!(canvas.polygons().count(), 2);
        let texts = canvas.texts();
        let percents = texts.iter().filter(|t| t.ends_with('%')).count();
        assert_eq!(percents, pie.slices.len());
        assert!(texts.contains(&"none"));
        assert!(texts.contains(&"0.0%"));
    }

    #[test]
    fn exploded_slice_moves_outwards() {
        let config = RenderConfig::default().with_dpi(72);
        let painter = Painter::new(&config, &config.palette);
        let mut canvas = RecordingCanvas::new(400, 400);
        let plot = Plot::new("", chart());
        paint(&painter, &mut canvas, &plot, &chart(), PixelRect::new(0.0, 0.0, 400.0, 400.0))
            .unwrap();

        let origins: Vec<Point> = canvas.polygons().map(|(points, _)| points[0]).collect();
        let center = (200.0, 202.0);
        // "b" (12) stays put, "a" (18) is offset
        let dist = |p: Point| ((p.0 - center.0).powi(2) + (p.1 - center.1).powi(2)).sqrt();
        assert!(dist(origins[0]) > dist(origins[1]));
    }
}
