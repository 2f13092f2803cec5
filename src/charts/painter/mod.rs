//! Chart Painter
//! Lays out a figure and paints every panel onto a [`Canvas`].
//!
//! Painting is split per chart kind. Each kind maps its data to pixel
//! coordinates itself and returns the [`Frame`] it drew in, so annotations
//! and legends can be placed on top in data space.

mod annotate;
mod axes;
mod bar;
mod bubble;
mod legend;
mod line;
mod pie;
mod radar;
mod stacked;
mod timeline;

pub use axes::{Frame, Ticks};
pub use legend::{LegendEntry, Swatch};

use crate::charts::canvas::{Canvas, HAlign, Stroke, TextStyle, VAlign};
use crate::charts::color::{Color, Palette};
use crate::charts::layout::{apply_minus, format_value, PixelRect, Point};
use crate::charts::spec::{ChartKind, ChartSpec, Marker, Plot};
use crate::config::{RenderConfig, Theme};
use crate::error::RenderResult;
use tracing::debug;

/// Draw the whole figure described by `spec`.
pub fn paint(spec: &ChartSpec, config: &RenderConfig, canvas: &mut dyn Canvas) -> RenderResult<()> {
    let figure = Painter::new(config, &config.palette);
    let (width, height) = canvas.size();
    canvas.fill(config.theme.figure_background())?;

    let margin = figure.pt(8.0);
    let mut area =
        PixelRect::new(0.0, 0.0, width as f64, height as f64).inset(margin, margin, margin, margin);

    // Figure title
    if let Some(title) = spec.title.as_deref().filter(|t| !t.is_empty()) {
        let style = figure.style(16.0).bold().align(HAlign::Center, VAlign::Top);
        let (_, text_h) = canvas.measure_text(title, &style);
        canvas.text(title, (area.center().0, area.y), &style)?;
        area = area.inset(0.0, text_h + figure.pt(10.0), 0.0, 0.0);
    }

    let cells = area.cells(spec.grid.rows, spec.grid.cols, figure.pt(28.0));
    for (plot, cell) in spec.panels.iter().zip(cells) {
        debug!(kind = plot.kind.name(), title = %plot.title, "painting panel");
        let palette = plot.palette.as_ref().unwrap_or(&config.palette);
        Painter::new(config, palette).plot(canvas, plot, cell)?;
    }
    Ok(())
}

/// Shared drawing context of one panel: unit conversion, fonts and colors.
pub struct Painter<'a> {
    config: &'a RenderConfig,
    palette: &'a Palette,
}

impl<'a> Painter<'a> {
    pub fn new(config: &'a RenderConfig, palette: &'a Palette) -> Self {
        Self { config, palette }
    }

    /// Typographic points to pixels.
    pub fn pt(&self, points: f64) -> f64 {
        points * self.config.px_per_pt()
    }

    pub fn style(&self, size_pt: f64) -> TextStyle {
        TextStyle::new(self.pt(size_pt), self.theme().text_color())
    }

    pub fn theme(&self) -> Theme {
        self.config.theme
    }

    /// Explicit color if set, otherwise the palette entry for `index`.
    pub fn series_color(&self, explicit: Option<Color>, index: usize) -> Color {
        explicit.unwrap_or_else(|| self.palette.get(index))
    }

    /// Number formatted for display, honoring the minus-sign setting.
    pub fn number(&self, value: f64) -> String {
        apply_minus(format_value(value), self.config.unicode_minus)
    }

    pub fn minus(&self, label: String) -> String {
        apply_minus(label, self.config.unicode_minus)
    }

    fn plot(&self, canvas: &mut dyn Canvas, plot: &Plot, cell: PixelRect) -> RenderResult<()> {
        let mut entries = match &plot.kind {
            ChartKind::Line(chart) => line::legend_entries(self, chart),
            ChartKind::Bar(chart) => bar::legend_entries(self, chart),
            ChartKind::StackedBar(chart) => stacked::legend_entries(self, chart),
            ChartKind::Radar(chart) => radar::legend_entries(self, chart),
            ChartKind::Pie(_) | ChartKind::Bubble(_) | ChartKind::Timeline(_) => Vec::new(),
        };
        entries.extend(annotate::legend_entries(&plot.annotations));

        let frame = match &plot.kind {
            ChartKind::Line(chart) => line::paint(self, canvas, plot, chart, cell, &entries)?,
            ChartKind::Bar(chart) => bar::paint(self, canvas, plot, chart, cell, &entries)?,
            ChartKind::StackedBar(chart) => {
                stacked::paint(self, canvas, plot, chart, cell, &entries)?
            }
            ChartKind::Pie(chart) => pie::paint(self, canvas, plot, chart, cell)?,
            ChartKind::Bubble(chart) => bubble::paint(self, canvas, plot, chart, cell, &entries)?,
            ChartKind::Radar(chart) => radar::paint(self, canvas, plot, chart, cell)?,
            ChartKind::Timeline(chart) => {
                timeline::paint(self, canvas, plot, chart, cell, &entries)?
            }
        };

        annotate::draw(self, canvas, &frame, &plot.annotations)?;
        legend::draw(self, canvas, frame.area, plot.legend, &entries)
    }
}

/// Draw a data marker centered on `center`.
pub(crate) fn marker(
    canvas: &mut dyn Canvas,
    kind: Marker,
    center: Point,
    radius: f64,
    color: Color,
) -> RenderResult<()> {
    let (x, y) = center;
    match kind {
        Marker::None => Ok(()),
        Marker::Circle => canvas.circle(center, radius, color, None),
        Marker::Square => canvas.rect(
            PixelRect::new(x - radius, y - radius, radius * 2.0, radius * 2.0),
            Some(color),
            None,
        ),
        Marker::Triangle => canvas.polygon(
            &[
                (x, y - radius * 1.15),
                (x + radius, y + radius * 0.85),
                (x - radius, y + radius * 0.85),
            ],
            color,
            None,
        ),
    }
}

/// Straight arrow with a filled head at `to`.
pub(crate) fn arrow(
    canvas: &mut dyn Canvas,
    from: Point,
    to: Point,
    stroke: &Stroke,
    head: f64,
) -> RenderResult<()> {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let len = (dx * dx + dy * dy).sqrt();
    if len < f64::EPSILON {
        return Ok(());
    }
    let (ux, uy) = (dx / len, dy / len);
    let base = (to.0 - ux * head, to.1 - uy * head);
    canvas.polyline(&[from, base], stroke)?;
    let half = head * 0.45;
    canvas.polygon(
        &[
            to,
            (base.0 - uy * half, base.1 + ux * half),
            (base.0 + uy * half, base.1 - ux * half),
        ],
        stroke.color,
        None,
    )
}

/// Text on a filled box; the box hugs the text plus `pad` on each side.
pub(crate) fn boxed_text(
    canvas: &mut dyn Canvas,
    text: &str,
    at: Point,
    style: &TextStyle,
    fill: Color,
    pad: f64,
) -> RenderResult<()> {
    let (w, h) = canvas.measure_text(text, style);
    let x = match style.h_align {
        HAlign::Left => at.0,
        HAlign::Center => at.0 - w / 2.0,
        HAlign::Right => at.0 - w,
    };
    let y = match style.v_align {
        VAlign::Top => at.1,
        VAlign::Middle => at.1 - h / 2.0,
        VAlign::Bottom => at.1 - h,
    };
    let outline = Stroke::solid(Color::GRAY.with_alpha(0.6), (pad / 6.0).max(1.0));
    canvas.rect(
        PixelRect::new(x - pad, y - pad, w + pad * 2.0, h + pad * 2.0),
        Some(fill),
        Some(&outline),
    )?;
    canvas.text(text, at, style)
}

/// Points approximating a circle, closed.
pub(crate) fn circle_path(center: Point, radius: f64, steps: usize) -> Vec<Point> {
    (0..=steps)
        .map(|i| {
            let a = 2.0 * std::f64::consts::PI * i as f64 / steps as f64;
            (center.0 + radius * a.cos(), center.1 - radius * a.sin())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::canvas::{DrawCall, RecordingCanvas};
    use crate::charts::spec::{
        FigureSize, Grid, Legend, LineChart, LineSeries, PieChart, PieSlice,
    };

    fn config() -> RenderConfig {
        RenderConfig::default().with_dpi(72)
    }

    #[test]
    fn figure_starts_with_background_fill() {
        let plot = Plot::new("p", PieChart::new(vec![PieSlice::new("a", 1.0)]));
        let spec = ChartSpec::single(plot, FigureSize::new(4.0, 3.0), "x.png");
        let mut canvas = RecordingCanvas::new(288, 216);
        paint(&spec, &config(), &mut canvas).unwrap();
        assert_eq!(canvas.calls[0], DrawCall::Fill(Color::WHITE));
    }

    #[test]
    fn every_panel_and_title_is_painted() {
        let line = |t: &str| {
            Plot::new(t, LineChart::new(vec![LineSeries::dense("s", &[1.0, 2.0], &[3.0, 4.0])]))
                .with_legend(Legend::Hidden)
        };
        let spec = ChartSpec::multi(
            Grid::new(1, 3),
            vec![line("left"), line("middle"), line("right")],
            FigureSize::new(9.0, 3.0),
            "x.png",
        )
        .with_title("figure");
        let mut canvas = RecordingCanvas::new(648, 216);
        paint(&spec, &config(), &mut canvas).unwrap();

        let texts = canvas.texts();
        for expected in ["figure", "left", "middle", "right"] {
            assert!(texts.contains(&expected), "missing `{}`", expected);
        }
    }

    #[test]
    fn arrow_ends_at_target() {
        let mut canvas = RecordingCanvas::new(100, 100);
        let stroke = Stroke::solid(Color::RED, 1.0);
        arrow(&mut canvas, (0.0, 50.0), (80.0, 50.0), &stroke, 10.0).unwrap();
        let (points, fill) = canvas.polygons().next().unwrap();
        assert_eq!(points[0], (80.0, 50.0));
        assert_eq!(fill, Color::RED);
        let shaft = canvas.polylines_with_color(Color::RED);
        assert_eq!(shaft[0], &[(0.0, 50.0), (70.0, 50.0)][..]);
    }

    #[test]
    fn circle_path_is_closed() {
        let path = circle_path((10.0, 10.0), 5.0, 36);
        assert_eq!(path.len(), 37);
        let (first, last) = (path[0], path[36]);
        assert!((first.0 - last.0).abs() < 1e-9 && (first.1 - last.1).abs() < 1e-9);
    }
}
