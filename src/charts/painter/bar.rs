//! Grouped bar charts.

use super::axes::{self, range_or, Frame, Ticks};
use super::legend::LegendEntry;
use super::{arrow, Painter};
use crate::charts::canvas::{Canvas, HAlign, Stroke, VAlign};
use crate::charts::color::Color;
use crate::charts::layout::{value_bounds, AxisScale, PixelRect};
use crate::charts::spec::{BarChart, Plot};
use crate::error::RenderResult;

pub fn legend_entries(painter: &Painter<'_>, chart: &BarChart) -> Vec<LegendEntry> {
    chart
        .groups
        .iter()
        .enumerate()
        .filter(|(_, g)| !g.label.is_empty())
        .map(|(j, g)| LegendEntry::patch(g.label.clone(), painter.series_color(g.color, j)))
        .collect()
}

/// Horizontal center of bar `group` within category `index`.
pub fn bar_center(chart: &BarChart, index: usize, group: usize) -> f64 {
    let n = chart.groups.len() as f64;
    let w = chart.bar_width / n;
    index as f64 + (group as f64 - (n - 1.0) / 2.0) * w
}

fn y_range(chart: &BarChart) -> (f64, f64) {
    let (lo, hi) =
        value_bounds(chart.groups.iter().flat_map(|g| g.values.iter().copied())).unwrap_or((0.0, 1.0));
    let (lo, hi) = (lo.min(0.0), hi.max(0.0));
    let span = if hi > lo { hi - lo } else { 1.0 };
    let multiline = chart
        .groups
        .iter()
        .any(|g| g.bar_labels.iter().any(|l| l.contains('\n')));
    let headroom = if multiline { 0.2 } else { 0.1 };
    let bottom = if lo < 0.0 { lo - span * headroom } else { 0.0 };
    (bottom, hi + span * headroom)
}

pub fn paint(
    painter: &Painter<'_>,
    canvas: &mut dyn Canvas,
    plot: &Plot,
    chart: &BarChart,
    cell: PixelRect,
    entries: &[LegendEntry],
) -> RenderResult<Frame> {
    let n = chart.categories.len() as f64;
    let (x_lo, x_hi) = range_or(plot.x_range, (-0.5, n - 0.5));
    let (y_lo, y_hi) = range_or(plot.y_range, y_range(chart));
    let x = AxisScale::linear(x_lo, x_hi);
    let y = AxisScale::linear(y_lo, y_hi);

    let x_ticks = Ticks::categories(&chart.categories);
    let y_ticks = Ticks::numeric(painter, &y, 6);
    let frame = axes::draw(painter, canvas, plot, cell, x, y, &x_ticks, &y_ticks, entries)?;

    let width = chart.bar_width / chart.groups.len() as f64;
    let edge = chart.edge_color.map(|c| Stroke::solid(c, painter.pt(0.8)));
    let label_style = painter.style(10.0).align(HAlign::Center, VAlign::Bottom);

    for (j, group) in chart.groups.iter().enumerate() {
        let group_color = painter.series_color(group.color, j);
        for (i, &value) in group.values.iter().enumerate() {
            let center = bar_center(chart, i, j);
            let left = frame.map_x(center - width / 2.0);
            let right = frame.map_x(center + width / 2.0);
            let top = frame.map_y(value.max(0.0));
            let bottom = frame.map_y(value.min(0.0));
            let fill = group.bar_colors.get(i).copied().unwrap_or(group_color);
            canvas.rect(
                PixelRect::new(left, top, right - left, bottom - top),
                Some(fill),
                edge.as_ref(),
            )?;

            let text = match group.bar_labels.get(i) {
                Some(label) => label.clone(),
                None => format!("{}{}", painter.number(value), chart.value_suffix),
            };
            canvas.text(&text, ((left + right) / 2.0, top - painter.pt(3.0)), &label_style)?;
        }
    }

    // Stage progression arrows between consecutive bars
    if chart.stage_arrows {
        if let Some(first) = chart.groups.first() {
            let stroke = Stroke::solid(Color::GRAY.with_alpha(0.6), painter.pt(1.5));
            let drop = (y_hi - y_lo) * 0.05;
            for (i, pair) in first.values.windows(2).enumerate() {
                let level = pair[0] - drop;
                let from = frame.map((i as f64 + chart.bar_width / 2.0, level));
                let to = frame.map((i as f64 + 1.0 - chart.bar_width / 2.0, level));
                arrow(canvas, from, to, &stroke, painter.pt(6.0))?;
            }
        }
    }
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::spec::BarGroup;
    use approx::assert_relative_eq;

    fn chart(groups: usize) -> BarChart {
        BarChart::new(
            vec!["a".into(), "b".into(), "c".into(), "d".into()],
            (0..groups)
                .map(|g| BarGroup::new(format!("g{}", g), vec![1.0, 2.0, 3.0, 4.0]))
                .collect(),
        )
    }

    #[test]
    fn grouped_bars_straddle_the_category() {
        let grouped = chart(3).with_bar_width(0.75);
        assert_relative_eq!(bar_center(&grouped, 0, 0), -0.25);
        assert_relative_eq!(bar_center(&grouped, 0, 1), 0.0);
        assert_relative_eq!(bar_center(&grouped, 2, 2), 2.25);
        assert_relative_eq!(bar_center(&chart(1), 1, 0), 1.0);
    }

    #[test]
    fn range_starts_at_zero_with_headroom() {
        let (lo, hi) = y_range(&chart(1));
        assert_eq!(lo, 0.0);
        assert_relative_eq!(hi, 4.4);
    }
}
