//! Stacked bar charts with segment and total labels.

use super::axes::{self, range_or, Frame, Ticks};
use super::legend::LegendEntry;
use super::{boxed_text, Painter};
use crate::charts::canvas::{Canvas, HAlign, VAlign};
use crate::charts::color::Color;
use crate::charts::layout::{AxisScale, PixelRect};
use crate::charts::spec::{Plot, StackedBarChart};
use crate::error::RenderResult;

const LAYER_ALPHA: f64 = 0.8;

fn layer_color(painter: &Painter<'_>, explicit: Option<Color>, index: usize) -> Color {
    explicit.unwrap_or_else(|| painter.series_color(None, index).with_alpha(LAYER_ALPHA))
}

pub fn legend_entries(painter: &Painter<'_>, chart: &StackedBarChart) -> Vec<LegendEntry> {
    chart
        .layers
        .iter()
        .enumerate()
        .filter(|(_, l)| !l.label.is_empty())
        .map(|(i, l)| LegendEntry::patch(l.label.clone(), layer_color(painter, l.color, i)))
        .collect()
}

pub fn paint(
    painter: &Painter<'_>,
    canvas: &mut dyn Canvas,
    plot: &Plot,
    chart: &StackedBarChart,
    cell: PixelRect,
    entries: &[LegendEntry],
) -> RenderResult<Frame> {
    let totals = chart.totals();
    let max_total = totals.iter().copied().fold(0.0, f64::max);
    let n = chart.categories.len() as f64;

    let (x_lo, x_hi) = range_or(plot.x_range, (-0.5, n - 0.5));
    let x = AxisScale::linear(x_lo, x_hi);
    let (y_lo, y_hi) = range_or(plot.y_range, (0.0, max_total.max(f64::EPSILON) * 1.2));
    let y = AxisScale::linear(y_lo, y_hi);

    let x_ticks = Ticks::categories(&chart.categories);
    let y_ticks = Ticks::numeric(painter, &y, 6);
    let frame = axes::draw(painter, canvas, plot, cell, x, y, &x_ticks, &y_ticks, entries)?;

    let half = chart.bar_width / 2.0;
    let segment_style = painter.style(9.0).bold().align(HAlign::Center, VAlign::Middle);

    for ((l, layer), offsets) in chart.layers.iter().enumerate().zip(chart.offsets()) {
        let color = layer_color(painter, layer.color, l);
        for (i, (&value, &bottom)) in layer.values.iter().zip(&offsets).enumerate() {
            let center = i as f64;
            let (left, top) = frame.map((center - half, bottom + value));
            let (right, base) = frame.map((center + half, bottom));
            canvas.rect(
                PixelRect::new(left, top, right - left, base - top),
                Some(color),
                None,
            )?;

            if value > chart.segment_label_min {
                let text = format!("{}{}", painter.number(value), chart.unit);
                canvas.text(&text, frame.map((center, bottom + value / 2.0)), &segment_style)?;
            }
        }
    }

    // Totals above each stack
    let total_style = painter.style(11.0).bold().align(HAlign::Center, VAlign::Bottom);
    let pad = painter.pt(3.0);
    for (i, (label, total)) in chart.total_labels().iter().zip(&totals).enumerate() {
        let (px, py) = frame.map((i as f64, *total));
        let at = (px, py - painter.pt(4.0) - pad);
        match chart.total_fill {
            Some(fill) => boxed_text(canvas, label, at, &total_style, fill, pad)?,
            None => canvas.text(label, at, &total_style)?,
        }
    }
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::canvas::RecordingCanvas;
    use crate::charts::spec::StackLayer;
    use crate::config::RenderConfig;

    #[test]
    fn small_segments_stay_unlabelled() {
        let chart = StackedBarChart::new(
            vec!["a".into(), "b".into()],
            vec![
                StackLayer::new("one", vec![3.0, 0.25]),
                StackLayer::new("two", vec![2.0, 1.5]),
            ],
        )
        .with_unit("y")
        .with_total_prefix("sum ")
        .with_segment_label_min(0.3);
        let plot = Plot::new("stack", chart);

        let config = RenderConfig::default().with_dpi(72);
        let painter = Painter::new(&config, &config.palette);
        let mut canvas = RecordingCanvas::new(400, 300);
        painter
            .plot(&mut canvas, &plot, PixelRect::new(0.0, 0.0, 400.0, 300.0))
            .unwrap();

        let texts = canvas.texts();
        assert!(texts.contains(&"3y"));
        assert!(texts.contains(&"1.5y"));
        assert!(!texts.contains(&"0.25y"));
        assert!(texts.contains(&"sum 5y"));
        assert!(texts.contains(&"sum 1.75y"));
    }
}
