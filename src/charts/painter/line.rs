//! Line charts, linear or log-scaled.

use super::axes::{self, range_or, Frame, Ticks};
use super::legend::LegendEntry;
use super::{marker, Painter};
use crate::charts::canvas::{Canvas, HAlign, Stroke, VAlign};
use crate::charts::layout::{padded_log_range, padded_range, value_bounds, AxisScale, PixelRect, Scale};
use crate::charts::spec::{LineChart, Plot};
use crate::error::{RenderError, RenderResult};

pub fn legend_entries(painter: &Painter<'_>, chart: &LineChart) -> Vec<LegendEntry> {
    chart
        .series
        .iter()
        .enumerate()
        .filter(|(_, s)| !s.label.is_empty())
        .map(|(i, s)| LegendEntry::line(s.label.clone(), painter.series_color(s.color, i), s.marker))
        .collect()
}

fn y_axis(plot: &Plot, chart: &LineChart) -> RenderResult<AxisScale> {
    let (lo, hi) = value_bounds(chart.series.iter().flat_map(|s| s.present().map(|p| p.1)))
        .ok_or_else(|| RenderError::invalid("line chart has no present samples"))?;
    let labelled = chart.series.iter().any(|s| s.value_labels.is_some());

    Ok(match chart.y_scale {
        Scale::Linear => {
            let (lo, mut hi) = padded_range(lo, hi, 0.05);
            if labelled {
                hi += (hi - lo) * 0.08;
            }
            let (lo, hi) = range_or(plot.y_range, (lo, hi));
            AxisScale::linear(lo, hi)
        }
        Scale::Log10 => {
            let (lo, hi) = range_or(plot.y_range, padded_log_range(lo, hi, 0.05));
            AxisScale::log10(lo, hi)
        }
    })
}

pub fn paint(
    painter: &Painter<'_>,
    canvas: &mut dyn Canvas,
    plot: &Plot,
    chart: &LineChart,
    cell: PixelRect,
    entries: &[LegendEntry],
) -> RenderResult<Frame> {
    let (x_lo, x_hi) = value_bounds(chart.series.iter().flat_map(|s| s.points.iter().map(|p| p.0)))
        .ok_or_else(|| RenderError::invalid("line chart has no x values"))?;
    let (x_lo, x_hi) = range_or(plot.x_range, padded_range(x_lo, x_hi, 0.05));
    let x = AxisScale::linear(x_lo, x_hi);
    let y = y_axis(plot, chart)?;

    let x_ticks = Ticks::numeric(painter, &x, 8);
    let y_ticks = Ticks::numeric(painter, &y, 6);
    let frame = axes::draw(painter, canvas, plot, cell, x, y, &x_ticks, &y_ticks, entries)?;

    let label_style = painter.style(9.0).align(HAlign::Center, VAlign::Bottom);
    for (i, series) in chart.series.iter().enumerate() {
        let color = painter.series_color(series.color, i);
        let stroke = Stroke::solid(color, painter.pt(series.width));

        // One polyline per run of present samples
        for run in series.segments() {
            if run.len() >= 2 {
                let pixels: Vec<_> = run.iter().map(|&p| frame.map(p)).collect();
                canvas.polyline(&pixels, &stroke)?;
            }
        }

        for (px, py) in series.present().map(|p| frame.map(p)) {
            marker(canvas, series.marker, (px, py), painter.pt(3.5), color)?;
        }

        if let Some(labels) = &series.value_labels {
            for (xv, yv) in series.present() {
                let (px, py) = frame.map((xv, yv));
                let text = format!("{}{}{}", labels.prefix, painter.number(yv), labels.suffix);
                canvas.text(&text, (px, py - painter.pt(7.0)), &label_style)?;
            }
        }
    }
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::canvas::RecordingCanvas;
    use crate::charts::color::Color;
    use crate::charts::spec::{Legend, LineSeries};
    use crate::config::RenderConfig;

    fn render(plot: &Plot) -> RecordingCanvas {
        let config = RenderConfig::default().with_dpi(72);
        let painter = Painter::new(&config, &config.palette);
        let mut canvas = RecordingCanvas::new(640, 480);
        painter
            .plot(&mut canvas, plot, PixelRect::new(0.0, 0.0, 640.0, 480.0))
            .unwrap();
        canvas
    }

    #[test]
    fn gap_splits_line_into_two_polylines() {
        let series = LineSeries::new(
            "gappy",
            vec![(1.0, Some(1.0)), (2.0, Some(2.0)), (3.0, None), (4.0, Some(3.0)), (5.0, Some(4.0))],
        )
        .with_color(Color::RED);
        let plot = Plot::new("gap", LineChart::new(vec![series])).with_legend(Legend::Hidden);
        let canvas = render(&plot);

        let lines = canvas.polylines_with_color(Color::RED);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].len(), 2);
        assert_eq!(lines[1].len(), 2);
        // No segment spans the missing x = 3
        assert!(lines[0][1].0 < lines[1][0].0);
        assert_eq!(canvas.circles().count(), 4);
    }

    #[test]
    fn value_labels_use_prefix_and_suffix() {
        let series = LineSeries::dense("m", &[2019.0, 2022.0], &[7.2, 11.4]).with_value_labels("$", "B");
        let plot = Plot::new("labels", LineChart::new(vec![series]));
        let texts: Vec<String> = render(&plot).texts().iter().map(|t| t.to_string()).collect();
        assert!(texts.contains(&"$7.2B".to_string()));
        assert!(texts.contains(&"$11.4B".to_string()));
    }

    #[test]
    fn log_scale_ticks_are_decades() {
        let series = LineSeries::dense("m", &[1.0, 2.0, 3.0], &[5.0, 100.0, 2000.0]);
        let plot = Plot::new("log", LineChart::new(vec![series]).log_y());
        let canvas = render(&plot);
        let texts = canvas.texts();
        for decade in ["10", "100", "1000"] {
            assert!(texts.contains(&decade));
        }
    }
}
