//! Cartesian axes: frame layout, grid, ticks and titles.

use super::legend::{self, LegendEntry};
use super::Painter;
use crate::charts::canvas::{Canvas, HAlign, Stroke, VAlign};
use crate::charts::layout::{format_tick, format_value, AxisScale, PixelRect, Point, Scale};
use crate::charts::spec::{GridLines, Legend, Plot};
use crate::error::RenderResult;

/// Pixel area of a panel plus the data ranges mapped onto it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub area: PixelRect,
    pub x: AxisScale,
    pub y: AxisScale,
}

impl Frame {
    pub fn new(area: PixelRect, x: AxisScale, y: AxisScale) -> Self {
        Self { area, x, y }
    }

    /// Frame whose data space is `0..1` on both axes.
    pub fn unit(area: PixelRect) -> Self {
        Self::new(area, AxisScale::linear(0.0, 1.0), AxisScale::linear(0.0, 1.0))
    }

    pub fn map_x(&self, x: f64) -> f64 {
        self.area.x + self.x.fraction(x) * self.area.w
    }

    pub fn map_y(&self, y: f64) -> f64 {
        self.area.bottom() - self.y.fraction(y) * self.area.h
    }

    pub fn map(&self, (x, y): (f64, f64)) -> Point {
        (self.map_x(x), self.map_y(y))
    }

    /// Clip a data-space segment to the frame ranges.
    pub fn clip(&self, from: (f64, f64), to: (f64, f64)) -> Option<((f64, f64), (f64, f64))> {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let mut t0: f64 = 0.0;
        let mut t1: f64 = 1.0;
        let edges = [
            (-dx, from.0 - self.x.min),
            (dx, self.x.max - from.0),
            (-dy, from.1 - self.y.min),
            (dy, self.y.max - from.1),
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
        let at = |t: f64| (from.0 + dx * t, from.1 + dy * t);
        Some((at(t0), at(t1)))
    }
}

/// Tick positions in data space with their labels.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ticks(pub Vec<(f64, String)>);

impl Ticks {
    pub fn numeric(painter: &Painter<'_>, axis: &AxisScale, target: usize) -> Self {
        let step = axis.tick_step(target);
        let eps = (axis.max - axis.min).abs() * 1e-9;
        Self(
            axis.ticks(target)
                .into_iter()
                .filter(|v| *v >= axis.min - eps && *v <= axis.max + eps)
                .map(|v| {
                    let label = match axis.scale {
                        Scale::Linear => format_tick(v, step),
                        Scale::Log10 => format_value(v),
                    };
                    (v, painter.minus(label))
                })
                .collect(),
        )
    }

    /// One tick per category at `0, 1, 2, ...`.
    pub fn categories(labels: &[String]) -> Self {
        Self(
            labels
                .iter()
                .enumerate()
                .map(|(i, l)| (i as f64, l.clone()))
                .collect(),
        )
    }
}

/// Explicit range if given, otherwise the computed one.
pub fn range_or(explicit: Option<(f64, f64)>, auto: (f64, f64)) -> (f64, f64) {
    explicit.unwrap_or(auto)
}

/// Draw the panel title at the top of `cell` and return the space below it.
pub fn panel_title(
    painter: &Painter<'_>,
    canvas: &mut dyn Canvas,
    title: &str,
    cell: PixelRect,
) -> RenderResult<PixelRect> {
    if title.is_empty() {
        return Ok(cell.inset(0.0, painter.pt(4.0), 0.0, 0.0));
    }
    let style = painter.style(14.0).bold().align(HAlign::Center, VAlign::Top);
    let (_, h) = canvas.measure_text(title, &style);
    canvas.text(title, (cell.center().0, cell.y), &style)?;
    Ok(cell.inset(0.0, h + painter.pt(10.0), 0.0, 0.0))
}

/// Lay out and draw a cartesian frame; series are drawn on top afterwards.
#[allow(clippy::too_many_arguments)]
pub fn draw(
    painter: &Painter<'_>,
    canvas: &mut dyn Canvas,
    plot: &Plot,
    cell: PixelRect,
    x: AxisScale,
    y: AxisScale,
    x_ticks: &Ticks,
    y_ticks: &Ticks,
    entries: &[LegendEntry],
) -> RenderResult<Frame> {
    let theme = painter.theme();
    let tick_style = painter.style(10.0);
    let label_style = painter.style(12.0);
    let gap = painter.pt(5.0);

    let cell = panel_title(painter, canvas, &plot.title, cell)?;

    let y_tick_w = y_ticks
        .0
        .iter()
        .map(|(_, l)| canvas.measure_text(l, &tick_style).0)
        .fold(0.0, f64::max);
    let x_tick_h = x_ticks
        .0
        .iter()
        .map(|(_, l)| canvas.measure_text(l, &tick_style).1)
        .fold(0.0, f64::max);
    let y_label_w = plot
        .y_label
        .as_deref()
        .map(|l| canvas.measure_text(l, &label_style).1 + gap)
        .unwrap_or(0.0);
    let x_label_h = plot
        .x_label
        .as_deref()
        .map(|l| canvas.measure_text(l, &label_style).1 + gap)
        .unwrap_or(0.0);
    let legend_w = if plot.legend == Legend::OutsideRight && !entries.is_empty() {
        legend::size(painter, canvas, entries).0 + painter.pt(12.0)
    } else {
        0.0
    };

    let area = cell.inset(
        y_tick_w + gap + y_label_w,
        painter.pt(4.0),
        painter.pt(10.0) + legend_w,
        x_tick_h + gap + x_label_h,
    );
    let frame = Frame::new(area, x, y);

    // Background and grid
    canvas.rect(area, Some(theme.axes_background()), None)?;
    let grid = Stroke::solid(theme.grid_color(), painter.pt(0.8));
    if plot.grid_lines == GridLines::Both {
        for (v, _) in &x_ticks.0 {
            let px = frame.map_x(*v);
            canvas.polyline(&[(px, area.y), (px, area.bottom())], &grid)?;
        }
    }
    if plot.grid_lines != GridLines::Hidden {
        for (v, _) in &y_ticks.0 {
            let py = frame.map_y(*v);
            canvas.polyline(&[(area.x, py), (area.right(), py)], &grid)?;
        }
    }
    if let Some(spine) = theme.spine_color() {
        canvas.rect(area, None, Some(&Stroke::solid(spine, painter.pt(0.8))))?;
    }

    // Tick labels
    let x_style = tick_style.clone().align(HAlign::Center, VAlign::Top);
    for (v, label) in &x_ticks.0 {
        canvas.text(label, (frame.map_x(*v), area.bottom() + gap), &x_style)?;
    }
    let y_style = tick_style.align(HAlign::Right, VAlign::Middle);
    for (v, label) in &y_ticks.0 {
        canvas.text(label, (area.x - gap, frame.map_y(*v)), &y_style)?;
    }

    // Axis labels
    if let Some(label) = plot.x_label.as_deref() {
        let style = label_style.clone().align(HAlign::Center, VAlign::Top);
        canvas.text(label, (area.center().0, area.bottom() + gap * 2.0 + x_tick_h), &style)?;
    }
    if let Some(label) = plot.y_label.as_deref() {
        let style = label_style.vertical().align(HAlign::Center, VAlign::Top);
        canvas.text(label, (cell.x, area.center().1), &style)?;
    }

    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn frame() -> Frame {
        Frame::new(
            PixelRect::new(10.0, 10.0, 100.0, 50.0),
            AxisScale::linear(0.0, 10.0),
            AxisScale::linear(0.0, 5.0),
        )
    }

    #[test]
    fn maps_data_corners_to_pixel_corners() {
        let f = frame();
        assert_eq!(f.map((0.0, 0.0)), (10.0, 60.0));
        assert_eq!(f.map((10.0, 5.0)), (110.0, 10.0));
    }

    #[test]
    fn clips_segments_to_ranges() {
        let f = Frame::new(
            PixelRect::new(0.0, 0.0, 80.0, 40.0),
            AxisScale::linear(20.0, 100.0),
            AxisScale::linear(60.0, 100.0),
        );
        let (a, b) = f.clip((0.0, 0.0), (100.0, 100.0)).unwrap();
        assert_relative_eq!(a.0, 60.0);
        assert_relative_eq!(a.1, 60.0);
        assert_relative_eq!(b.0, 100.0);
        assert!(f.clip((0.0, 0.0), (10.0, 10.0)).is_none());
    }

    #[test]
    fn category_ticks_sit_on_integers() {
        let ticks = Ticks::categories(&["a".to_string(), "b".to_string()]);
        assert_eq!(ticks.0, vec![(0.0, "a".to_string()), (1.0, "b".to_string())]);
    }
}
