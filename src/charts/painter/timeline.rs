//! Milestone timelines on horizontal lanes.

use super::axes::{self, range_or, Frame, Ticks};
use super::legend::LegendEntry;
use super::{boxed_text, Painter};
use crate::charts::canvas::{Canvas, HAlign, Stroke, VAlign};
use crate::charts::layout::{value_bounds, AxisScale, PixelRect};
use crate::charts::spec::{Plot, TimelineChart};
use crate::error::{RenderError, RenderResult};

/// Vertical offset of milestone labels from their lane, alternating.
const LABEL_OFFSET: f64 = 0.15;

pub fn label_offset(index: usize) -> f64 {
    if index % 2 == 0 {
        LABEL_OFFSET
    } else {
        -LABEL_OFFSET
    }
}

pub fn paint(
    painter: &Painter<'_>,
    canvas: &mut dyn Canvas,
    plot: &Plot,
    chart: &TimelineChart,
    cell: PixelRect,
    entries: &[LegendEntry],
) -> RenderResult<Frame> {
    let (lo, hi) = value_bounds(chart.lanes.iter().flat_map(|l| l.milestones.iter().map(|m| m.x)))
        .ok_or_else(|| RenderError::invalid("timeline has no milestones"))?;
    let (x_lo, x_hi) = range_or(plot.x_range, (lo - 1.0, hi + 1.0));
    let lanes = chart.lanes.len() as f64;
    let (y_lo, y_hi) = range_or(plot.y_range, (-0.5, lanes - 0.5));
    let x = AxisScale::linear(x_lo, x_hi);
    let y = AxisScale::linear(y_lo, y_hi);

    let x_ticks = Ticks::numeric(painter, &x, 8);
    let y_ticks = Ticks(
        chart
            .lanes
            .iter()
            .enumerate()
            .map(|(i, lane)| (chart.lane_position(i), lane.label.clone()))
            .collect(),
    );
    let frame = axes::draw(painter, canvas, plot, cell, x, y, &x_ticks, &y_ticks, entries)?;

    let label_style = painter.style(8.0).align(HAlign::Center, VAlign::Middle);
    for (i, lane) in chart.lanes.iter().enumerate() {
        let color = painter.series_color(lane.color, i);
        let level = chart.lane_position(i);

        // Lane baseline spans the milestones plus half a unit
        let (first, last) = value_bounds(lane.milestones.iter().map(|m| m.x)).unwrap_or((lo, hi));
        canvas.polyline(
            &[frame.map((first - 0.5, level)), frame.map((last + 0.5, level))],
            &Stroke::solid(color.with_alpha(0.7), painter.pt(3.0)),
        )?;

        for (j, milestone) in lane.milestones.iter().enumerate() {
            let point = frame.map((milestone.x, level));
            let radius = painter.pt(chart.size_scale.radius(milestone.value));
            let label_at = frame.map((milestone.x, level + label_offset(j)));

            canvas.polyline(
                &[label_at, point],
                &Stroke::solid(color.with_alpha(0.6), painter.pt(1.0)),
            )?;
            canvas.circle(point, radius, color.with_alpha(0.8), None)?;

            let text = format!(
                "{}\n({}{})",
                milestone.event,
                painter.number(milestone.value),
                chart.value_suffix
            );
            boxed_text(
                canvas,
                &text,
                label_at,
                &label_style,
                color.with_alpha(0.7),
                painter.pt(2.5),
            )?;
        }
    }
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::canvas::RecordingCanvas;
    use crate::charts::spec::{Milestone, TimelineLane};
    use crate::config::RenderConfig;

    #[test]
    fn labels_alternate_above_and_below() {
        assert_eq!(label_offset(0), 0.15);
        assert_eq!(label_offset(1), -0.15);
        assert_eq!(label_offset(4), 0.15);
    }

    #[test]
    fn first_lane_is_drawn_on_top() {
        let chart = TimelineChart::new(vec![
            TimelineLane::new("top", vec![Milestone::new(2000.0, "a", 10.0)]),
            TimelineLane::new("bottom", vec![Milestone::new(2010.0, "b", 50.0)]),
        ])
        .with_value_suffix("%");
        let plot = Plot::new("lanes", chart.clone());
        let config = RenderConfig::default().with_dpi(72);
        let painter = Painter::new(&config, &config.palette);
        let mut canvas = RecordingCanvas::new(600, 400);
        paint(&painter, &mut canvas, &plot, &chart, PixelRect::new(0.0, 0.0, 600.0, 400.0), &[])
            .unwrap();

        let circles: Vec<_> = canvas.circles().collect();
        assert_eq!(circles.len(), 2);
        assert!(circles[0].0 .1 < circles[1].0 .1);
        // Larger value, larger marker
        assert!(circles[1].1 > circles[0].1);
        assert!(canvas.texts().contains(&"b\n(50%)"));
    }
}
