//! Chart Specification
//! Immutable description of one output image: its plots, their data and the
//! target path. Specs are validated up front so a malformed chart never
//! produces partial output.

use crate::charts::color::{Color, ColorScale, Palette};
use crate::charts::layout::{format_value, round_to, value_bounds, Scale};
use crate::error::{RenderError, RenderResult};
use std::path::{Path, PathBuf};

/// One y sample; `None` is the missing marker and breaks the line there.
pub type Sample = Option<f64>;

/// Figure size in inches; pixel size follows from the configured DPI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureSize {
    pub width_in: f64,
    pub height_in: f64,
}

impl FigureSize {
    pub const fn new(width_in: f64, height_in: f64) -> Self {
        Self {
            width_in,
            height_in,
        }
    }

    pub fn to_pixels(&self, dpi: u32) -> (u32, u32) {
        let px = |inches: f64| (inches * dpi as f64).round().max(1.0) as u32;
        (px(self.width_in), px(self.height_in))
    }
}

/// Panel arrangement inside a figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub rows: usize,
    pub cols: usize,
}

impl Grid {
    pub const SINGLE: Grid = Grid { rows: 1, cols: 1 };

    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    pub fn capacity(&self) -> usize {
        self.rows * self.cols
    }
}

/// Description of one output image.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    /// Figure-level title, drawn above all panels.
    pub title: Option<String>,
    pub panels: Vec<Plot>,
    pub grid: Grid,
    pub size: FigureSize,
    pub output_path: PathBuf,
}

impl ChartSpec {
    pub fn single(plot: Plot, size: FigureSize, output_path: impl Into<PathBuf>) -> Self {
        Self {
            title: None,
            panels: vec![plot],
            grid: Grid::SINGLE,
            size,
            output_path: output_path.into(),
        }
    }

    pub fn multi(
        grid: Grid,
        panels: Vec<Plot>,
        size: FigureSize,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            title: None,
            panels,
            grid,
            size,
            output_path: output_path.into(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn file_name(&self) -> String {
        self.output_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn validate(&self) -> RenderResult<()> {
        if self.panels.is_empty() {
            return Err(RenderError::invalid("chart has no panels"));
        }
        if self.grid.capacity() == 0 || self.panels.len() > self.grid.capacity() {
            return Err(RenderError::invalid(format!(
                "{} panels do not fit a {}x{} grid",
                self.panels.len(),
                self.grid.rows,
                self.grid.cols
            )));
        }
        let size_ok = |v: f64| v.is_finite() && v > 0.0;
        if !size_ok(self.size.width_in) || !size_ok(self.size.height_in) {
            return Err(RenderError::invalid(format!(
                "figure size must be positive, got {}x{} in",
                self.size.width_in, self.size.height_in
            )));
        }
        for plot in &self.panels {
            plot.validate()
                .map_err(|e| prefix_error(e, &format!("panel `{}`", plot.title)))?;
        }
        Ok(())
    }
}

fn prefix_error(err: RenderError, context: &str) -> RenderError {
    match err {
        RenderError::InvalidSeries(reason) => {
            RenderError::InvalidSeries(format!("{}: {}", context, reason))
        }
        other => other,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Legend {
    Hidden,
    UpperLeft,
    #[default]
    UpperRight,
    LowerLeft,
    LowerRight,
    /// Outside the axes, to the right.
    OutsideRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridLines {
    #[default]
    Both,
    YOnly,
    Hidden,
}

/// Extra marks placed in data coordinates (or panel space for notes).
#[derive(Debug, Clone, PartialEq)]
pub enum Annotation {
    /// Text centered at a data point, optionally on a filled box.
    Text {
        text: String,
        at: (f64, f64),
        fill: Option<Color>,
    },
    /// Arrow from `from` to `to`, with optional text at the tail.
    Arrow {
        from: (f64, f64),
        to: (f64, f64),
        text: Option<String>,
        color: Color,
    },
    /// Dashed reference line, listed in the legend when labelled.
    ReferenceLine {
        from: (f64, f64),
        to: (f64, f64),
        label: Option<String>,
        color: Color,
    },
    /// Free-standing note in the panel's top-left corner.
    Note(String),
}

impl Annotation {
    pub fn text(text: impl Into<String>, at: (f64, f64)) -> Self {
        Annotation::Text {
            text: text.into(),
            at,
            fill: None,
        }
    }

    pub fn boxed(text: impl Into<String>, at: (f64, f64), fill: Color) -> Self {
        Annotation::Text {
            text: text.into(),
            at,
            fill: Some(fill),
        }
    }

    pub fn note(text: impl Into<String>) -> Self {
        Annotation::Note(text.into())
    }

    fn points(&self) -> Vec<(f64, f64)> {
        match self {
            Annotation::Text { at, .. } => vec![*at],
            Annotation::Arrow { from, to, .. } | Annotation::ReferenceLine { from, to, .. } => {
                vec![*from, *to]
            }
            Annotation::Note(_) => Vec::new(),
        }
    }
}

/// One chart panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Plot {
    pub title: String,
    pub kind: ChartKind,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    /// Overrides the config palette for this panel.
    pub palette: Option<Palette>,
    pub x_range: Option<(f64, f64)>,
    pub y_range: Option<(f64, f64)>,
    pub annotations: Vec<Annotation>,
    pub legend: Legend,
    pub grid_lines: GridLines,
}

impl Plot {
    pub fn new(title: impl Into<String>, kind: impl Into<ChartKind>) -> Self {
        Self {
            title: title.into(),
            kind: kind.into(),
            x_label: None,
            y_label: None,
            palette: None,
            x_range: None,
            y_range: None,
            annotations: Vec::new(),
            legend: Legend::default(),
            grid_lines: GridLines::default(),
        }
    }

    pub fn with_x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = Some(label.into());
        self
    }

    pub fn with_y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = Some(label.into());
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = Some(palette);
        self
    }

    pub fn with_x_range(mut self, min: f64, max: f64) -> Self {
        self.x_range = Some((min, max));
        self
    }

    pub fn with_y_range(mut self, min: f64, max: f64) -> Self {
        self.y_range = Some((min, max));
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_legend(mut self, legend: Legend) -> Self {
        self.legend = legend;
        self
    }

    pub fn with_grid_lines(mut self, grid_lines: GridLines) -> Self {
        self.grid_lines = grid_lines;
        self
    }

    pub fn validate(&self) -> RenderResult<()> {
        for (axis, range) in [("x", self.x_range), ("y", self.y_range)] {
            if let Some((lo, hi)) = range {
                if !(lo.is_finite() && hi.is_finite() && lo < hi && span_fits(lo, hi)) {
                    return Err(RenderError::invalid(format!(
                        "{} range must be finite and increasing, got {}..{}",
                        axis, lo, hi
                    )));
                }
            }
        }
        let log_y = matches!(&self.kind, ChartKind::Line(line) if line.y_scale == Scale::Log10);
        if log_y && matches!(self.y_range, Some((lo, _)) if lo <= 0.0) {
            return Err(RenderError::invalid("log scale y range must be positive"));
        }
        for annotation in &self.annotations {
            let points = annotation.points();
            if points.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
                return Err(RenderError::invalid("annotation coordinates must be finite"));
            }
            if log_y && points.iter().any(|&(_, y)| y <= 0.0) {
                return Err(RenderError::invalid(
                    "annotations on a log scale need positive y values",
                ));
            }
        }
        self.kind.validate()
    }
}

/// Chart kind together with its series data.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartKind {
    Line(LineChart),
    Bar(BarChart),
    StackedBar(StackedBarChart),
    Pie(PieChart),
    Bubble(BubbleChart),
    Radar(RadarChart),
    Timeline(TimelineChart),
}

impl ChartKind {
    pub fn name(&self) -> &'static str {
        match self {
            ChartKind::Line(_) => "line",
            ChartKind::Bar(_) => "bar",
            ChartKind::StackedBar(_) => "stacked_bar",
            ChartKind::Pie(_) => "pie",
            ChartKind::Bubble(_) => "scatter_bubble",
            ChartKind::Radar(_) => "radar",
            ChartKind::Timeline(_) => "timeline",
        }
    }

    pub fn validate(&self) -> RenderResult<()> {
        match self {
            ChartKind::Line(c) => c.validate(),
            ChartKind::Bar(c) => c.validate(),
            ChartKind::StackedBar(c) => c.validate(),
            ChartKind::Pie(c) => c.validate(),
            ChartKind::Bubble(c) => c.validate(),
            ChartKind::Radar(c) => c.validate(),
            ChartKind::Timeline(c) => c.validate(),
        }
    }
}

macro_rules! impl_into_kind {
    ($($chart:ident => $variant:ident),* $(,)?) => {
        $(impl From<$chart> for ChartKind {
            fn from(chart: $chart) -> Self {
                ChartKind::$variant(chart)
            }
        })*
    };
}

impl_into_kind!(
    LineChart => Line,
    BarChart => Bar,
    StackedBarChart => StackedBar,
    PieChart => Pie,
    BubbleChart => Bubble,
    RadarChart => Radar,
    TimelineChart => Timeline,
);

fn ensure_finite(values: impl IntoIterator<Item = f64>, what: &str) -> RenderResult<()> {
    if values.into_iter().all(f64::is_finite) {
        Ok(())
    } else {
        Err(RenderError::invalid(format!("{} must be finite", what)))
    }
}

/// The spread of `values` must leave headroom for axis padding and ticks.
fn ensure_span(values: impl IntoIterator<Item = f64>, what: &str) -> RenderResult<()> {
    match value_bounds(values) {
        Some((lo, hi)) if !span_fits(lo, hi) => Err(RenderError::invalid(format!(
            "{} span {}..{} is too wide to plot",
            what, lo, hi
        ))),
        _ => Ok(()),
    }
}

fn span_fits(lo: f64, hi: f64) -> bool {
    [lo * 2.0, hi * 2.0, (hi - lo) * 2.0].iter().all(|v| v.is_finite())
}

fn ensure_len<T>(items: &[T], expected: usize, what: &str) -> RenderResult<()> {
    if items.len() == expected {
        Ok(())
    } else {
        Err(RenderError::invalid(format!(
            "{} has {} entries, expected {}",
            what,
            items.len(),
            expected
        )))
    }
}

// ---------------------------------------------------------------- line

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Marker {
    None,
    #[default]
    Circle,
    Square,
    Triangle,
}

/// Text drawn above each present sample: `{prefix}{value}{suffix}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueLabels {
    pub prefix: String,
    pub suffix: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub label: String,
    pub points: Vec<(f64, Sample)>,
    pub color: Option<Color>,
    pub marker: Marker,
    /// Stroke width in points.
    pub width: f64,
    pub value_labels: Option<ValueLabels>,
}

impl LineSeries {
    pub fn new(label: impl Into<String>, points: Vec<(f64, Sample)>) -> Self {
        Self {
            label: label.into(),
            points,
            color: None,
            marker: Marker::Circle,
            width: 2.0,
            value_labels: None,
        }
    }

    /// Series without gaps.
    pub fn dense(label: impl Into<String>, xs: &[f64], ys: &[f64]) -> Self {
        Self::new(
            label,
            xs.iter().zip(ys).map(|(&x, &y)| (x, Some(y))).collect(),
        )
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.marker = marker;
        self
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn with_value_labels(mut self, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        self.value_labels = Some(ValueLabels {
            prefix: prefix.into(),
            suffix: suffix.into(),
        });
        self
    }

    pub fn present(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points.iter().filter_map(|&(x, y)| y.map(|y| (x, y)))
    }

    /// Runs of consecutive present samples; a missing sample ends a run.
    pub fn segments(&self) -> Vec<Vec<(f64, f64)>> {
        let mut runs = Vec::new();
        let mut current = Vec::new();
        for &(x, y) in &self.points {
            match y {
                Some(y) => current.push((x, y)),
                None => {
                    if !current.is_empty() {
                        runs.push(std::mem::take(&mut current));
                    }
                }
            }
        }
        if !current.is_empty() {
            runs.push(current);
        }
        runs
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub series: Vec<LineSeries>,
    pub y_scale: Scale,
}

impl LineChart {
    pub fn new(series: Vec<LineSeries>) -> Self {
        Self {
            series,
            y_scale: Scale::Linear,
        }
    }

    pub fn log_y(mut self) -> Self {
        self.y_scale = Scale::Log10;
        self
    }

    pub fn validate(&self) -> RenderResult<()> {
        if self.series.is_empty() {
            return Err(RenderError::invalid("line chart has no series"));
        }
        for s in &self.series {
            if s.points.is_empty() {
                return Err(RenderError::invalid(format!("series `{}` is empty", s.label)));
            }
            ensure_finite(s.points.iter().map(|p| p.0), "x values")?;
            ensure_finite(s.present().map(|p| p.1), "y values")?;
            if self.y_scale == Scale::Log10 && s.present().any(|(_, y)| y <= 0.0) {
                return Err(RenderError::invalid(format!(
                    "series `{}` has non-positive values on a log scale",
                    s.label
                )));
            }
        }
        if self.series.iter().all(|s| s.present().next().is_none()) {
            return Err(RenderError::invalid("line chart has no present samples"));
        }
        let xs = self.series.iter().flat_map(|s| s.points.iter().map(|p| p.0));
        ensure_span(xs, "x values")?;
        ensure_span(self.series.iter().flat_map(|s| s.present().map(|p| p.1)), "y values")
    }
}

// ----------------------------------------------------------------- bar

#[derive(Debug, Clone, PartialEq)]
pub struct BarGroup {
    pub label: String,
    pub values: Vec<f64>,
    pub color: Option<Color>,
    /// Per-bar colors; empty means the group color.
    pub bar_colors: Vec<Color>,
    /// Per-bar label text; empty means the formatted value.
    pub bar_labels: Vec<String>,
}

impl BarGroup {
    pub fn new(label: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            values,
            color: None,
            bar_colors: Vec::new(),
            bar_labels: Vec::new(),
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_bar_colors(mut self, colors: Vec<Color>) -> Self {
        self.bar_colors = colors;
        self
    }

    pub fn with_bar_labels(mut self, labels: Vec<String>) -> Self {
        self.bar_labels = labels;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub categories: Vec<String>,
    pub groups: Vec<BarGroup>,
    /// Appended to default bar labels, e.g. `%`.
    pub value_suffix: String,
    /// Share of each category slot covered by its bars.
    pub bar_width: f64,
    /// Arrows between consecutive bars, for stage progressions.
    pub stage_arrows: bool,
    pub edge_color: Option<Color>,
}

impl BarChart {
    pub fn new(categories: Vec<String>, groups: Vec<BarGroup>) -> Self {
        Self {
            categories,
            groups,
            value_suffix: String::new(),
            bar_width: 0.8,
            stage_arrows: false,
            edge_color: None,
        }
    }

    pub fn with_value_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.value_suffix = suffix.into();
        self
    }

    pub fn with_bar_width(mut self, width: f64) -> Self {
        self.bar_width = width;
        self
    }

    pub fn with_stage_arrows(mut self) -> Self {
        self.stage_arrows = true;
        self
    }

    pub fn with_edge_color(mut self, color: Color) -> Self {
        self.edge_color = Some(color);
        self
    }

    pub fn validate(&self) -> RenderResult<()> {
        if self.categories.is_empty() || self.groups.is_empty() {
            return Err(RenderError::invalid("bar chart has no data"));
        }
        if !(self.bar_width > 0.0 && self.bar_width <= 1.0) {
            return Err(RenderError::invalid("bar width must be within 0..=1"));
        }
        let n = self.categories.len();
        for group in &self.groups {
            ensure_len(&group.values, n, &format!("bar group `{}`", group.label))?;
            ensure_finite(group.values.iter().copied(), "bar values")?;
            if !group.bar_colors.is_empty() {
                ensure_len(&group.bar_colors, n, "bar colors")?;
            }
            if !group.bar_labels.is_empty() {
                ensure_len(&group.bar_labels, n, "bar labels")?;
            }
        }
        // Bars grow from zero, so the baseline counts towards the span
        let values = self.groups.iter().flat_map(|g| g.values.iter().copied());
        ensure_span(values.chain([0.0]), "bar values")
    }
}

// --------------------------------------------------------- stacked bar

#[derive(Debug, Clone, PartialEq)]
pub struct StackLayer {
    pub label: String,
    pub values: Vec<f64>,
    pub color: Option<Color>,
}

impl StackLayer {
    pub fn new(label: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            values,
            color: None,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StackedBarChart {
    pub categories: Vec<String>,
    /// Bottom to top.
    pub layers: Vec<StackLayer>,
    pub unit: String,
    /// Prefix of the per-category total label.
    pub total_prefix: String,
    /// Segments at or below this value are left unlabelled.
    pub segment_label_min: f64,
    pub bar_width: f64,
    /// Background of the total labels.
    pub total_fill: Option<Color>,
}

impl StackedBarChart {
    pub fn new(categories: Vec<String>, layers: Vec<StackLayer>) -> Self {
        Self {
            categories,
            layers,
            unit: String::new(),
            total_prefix: String::new(),
            segment_label_min: 0.0,
            bar_width: 0.6,
            total_fill: None,
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn with_total_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.total_prefix = prefix.into();
        self
    }

    pub fn with_segment_label_min(mut self, min: f64) -> Self {
        self.segment_label_min = min;
        self
    }

    pub fn with_total_fill(mut self, color: Color) -> Self {
        self.total_fill = Some(color);
        self
    }

    pub fn total_labels(&self) -> Vec<String> {
        self.totals()
            .iter()
            .map(|t| format!("{}{}{}", self.total_prefix, format_value(round_to(*t, 6)), self.unit))
            .collect()
    }

    /// Bottom offset of every layer per category, summed in layer order.
    pub fn offsets(&self) -> Vec<Vec<f64>> {
        let mut bottom = vec![0.0; self.categories.len()];
        self.layers
            .iter()
            .map(|layer| {
                let current = bottom.clone();
                for (b, v) in bottom.iter_mut().zip(&layer.values) {
                    *b += v;
                }
                current
            })
            .collect()
    }

    /// Per-category sum across all layers.
    pub fn totals(&self) -> Vec<f64> {
        (0..self.categories.len())
            .map(|i| {
                self.layers
                    .iter()
                    .map(|l| l.values.get(i).copied().unwrap_or(0.0))
                    .sum()
            })
            .collect()
    }

    pub fn validate(&self) -> RenderResult<()> {
        if self.categories.is_empty() || self.layers.is_empty() {
            return Err(RenderError::invalid("stacked bar chart has no data"));
        }
        for layer in &self.layers {
            ensure_len(&layer.values, self.categories.len(), &format!("layer `{}`", layer.label))?;
            ensure_finite(layer.values.iter().copied(), "stack values")?;
            if layer.values.iter().any(|&v| v < 0.0) {
                return Err(RenderError::invalid(format!(
                    "layer `{}` has negative values",
                    layer.label
                )));
            }
        }
        let totals = self.totals();
        ensure_finite(totals.iter().copied(), "stack totals")?;
        ensure_span(totals.into_iter().chain([0.0]), "stack totals")
    }
}

// ----------------------------------------------------------------- pie

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    pub color: Option<Color>,
}

impl PieSlice {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
            color: None,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    pub slices: Vec<PieSlice>,
    /// Angle of the first slice edge, degrees counter-clockwise from east.
    pub start_angle: f64,
    /// Slices whose value reaches this threshold are pulled out.
    pub explode_threshold: Option<f64>,
    /// Pull-out distance as a share of the radius.
    pub explode_offset: f64,
    /// Color of the in-slice percentage text.
    pub percent_color: Option<Color>,
}

impl PieChart {
    pub fn new(slices: Vec<PieSlice>) -> Self {
        Self {
            slices,
            start_angle: 90.0,
            explode_threshold: None,
            explode_offset: 0.05,
            percent_color: None,
        }
    }

    pub fn explode_from(mut self, threshold: f64) -> Self {
        self.explode_threshold = Some(threshold);
        self
    }

    pub fn with_percent_color(mut self, color: Color) -> Self {
        self.percent_color = Some(color);
        self
    }

    pub fn total(&self) -> f64 {
        self.slices.iter().map(|s| s.value).sum()
    }

    /// Share of each slice in percent, rounded to one decimal.
    pub fn percentages(&self) -> Vec<f64> {
        let total = self.total();
        self.slices
            .iter()
            .map(|s| round_to(s.value / total * 100.0, 1))
            .collect()
    }

    pub fn percent_labels(&self) -> Vec<String> {
        self.percentages()
            .iter()
            .map(|p| format!("{:.1}%", p))
            .collect()
    }

    pub fn is_exploded(&self, slice: &PieSlice) -> bool {
        self.explode_threshold
            .is_some_and(|threshold| slice.value >= threshold)
    }

    pub fn validate(&self) -> RenderResult<()> {
        if self.slices.is_empty() {
            return Err(RenderError::invalid("pie chart has no slices"));
        }
        ensure_finite(self.slices.iter().map(|s| s.value), "pie values")?;
        if self.slices.iter().any(|s| s.value < 0.0) {
            return Err(RenderError::invalid("pie values must be non-negative"));
        }
        let total = self.total();
        if !(total > 0.0 && total.is_finite()) {
            return Err(RenderError::invalid("pie values must sum to a positive total"));
        }
        Ok(())
    }
}

// -------------------------------------------------------------- bubble

#[derive(Debug, Clone, PartialEq)]
pub struct BubblePoint {
    pub label: String,
    pub x: f64,
    pub y: f64,
    /// Drives the bubble area.
    pub size_value: f64,
    /// Drives the bubble color.
    pub color_value: f64,
}

impl BubblePoint {
    pub fn new(label: impl Into<String>, x: f64, y: f64, size_value: f64, color_value: f64) -> Self {
        Self {
            label: label.into(),
            x,
            y,
            size_value,
            color_value,
        }
    }
}

/// `area = |value| * factor + offset`, in square points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeScale {
    pub factor: f64,
    pub offset: f64,
}

impl SizeScale {
    pub fn area(&self, value: f64) -> f64 {
        (value.abs() * self.factor + self.offset).max(0.0)
    }

    /// Marker radius in points for a marker of the given area.
    pub fn radius(&self, value: f64) -> f64 {
        self.area(value).sqrt() / 2.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BubbleChart {
    pub points: Vec<BubblePoint>,
    pub size_scale: SizeScale,
    pub color_scale: ColorScale,
    /// Range of `color_value` mapped onto the color scale.
    pub color_domain: (f64, f64),
    pub alpha: f64,
}

impl BubbleChart {
    pub fn new(points: Vec<BubblePoint>, size_scale: SizeScale, color_scale: ColorScale) -> Self {
        Self {
            points,
            size_scale,
            color_scale,
            color_domain: (0.0, 100.0),
            alpha: 0.7,
        }
    }

    pub fn with_color_domain(mut self, lo: f64, hi: f64) -> Self {
        self.color_domain = (lo, hi);
        self
    }

    pub fn bubble_area(&self, point: &BubblePoint) -> f64 {
        self.size_scale.area(point.size_value)
    }

    pub fn bubble_color(&self, point: &BubblePoint) -> Color {
        self.color_scale
            .map(point.color_value, self.color_domain)
            .with_alpha(self.alpha)
    }

    pub fn validate(&self) -> RenderResult<()> {
        if self.points.is_empty() {
            return Err(RenderError::invalid("bubble chart has no points"));
        }
        ensure_finite(
            self.points
                .iter()
                .flat_map(|p| [p.x, p.y, p.size_value, p.color_value]),
            "bubble values",
        )?;
        ensure_span(self.points.iter().map(|p| p.x), "bubble x values")?;
        ensure_span(self.points.iter().map(|p| p.y), "bubble y values")?;
        if !(self.size_scale.factor >= 0.0 && self.size_scale.offset.is_finite()) {
            return Err(RenderError::invalid("bubble size factor must be non-negative"));
        }
        let (lo, hi) = self.color_domain;
        if !(lo.is_finite() && hi.is_finite() && lo < hi) {
            return Err(RenderError::invalid("bubble color domain must be increasing"));
        }
        Ok(())
    }
}

// --------------------------------------------------------------- radar

#[derive(Debug, Clone, PartialEq)]
pub struct RadarSeries {
    pub label: String,
    pub scores: Vec<f64>,
    pub color: Option<Color>,
}

impl RadarSeries {
    pub fn new(label: impl Into<String>, scores: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            scores,
            color: None,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Scores with the first one repeated at the end.
    pub fn closed_scores(&self) -> Vec<f64> {
        let mut closed = self.scores.clone();
        if let Some(&first) = self.scores.first() {
            closed.push(first);
        }
        closed
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadarChart {
    pub categories: Vec<String>,
    pub series: Vec<RadarSeries>,
    /// Score at the outer ring.
    pub max: f64,
    pub rings: Vec<f64>,
    pub fill_alpha: f64,
}

impl RadarChart {
    pub fn new(categories: Vec<String>, series: Vec<RadarSeries>, max: f64) -> Self {
        Self {
            categories,
            series,
            max,
            rings: Vec::new(),
            fill_alpha: 0.25,
        }
    }

    pub fn with_rings(mut self, rings: Vec<f64>) -> Self {
        self.rings = rings;
        self
    }

    /// Evenly spaced category angles in radians, first angle repeated at the end.
    pub fn angles(&self) -> Vec<f64> {
        let n = self.categories.len();
        let mut angles: Vec<f64> = (0..n)
            .map(|i| 2.0 * std::f64::consts::PI * i as f64 / n as f64)
            .collect();
        if let Some(&first) = angles.first() {
            angles.push(first);
        }
        angles
    }

    pub fn validate(&self) -> RenderResult<()> {
        if self.categories.len() < 3 {
            return Err(RenderError::invalid("radar chart needs at least 3 categories"));
        }
        if self.series.is_empty() {
            return Err(RenderError::invalid("radar chart has no series"));
        }
        if !(self.max > 0.0 && self.max.is_finite()) {
            return Err(RenderError::invalid("radar max must be positive"));
        }
        for s in &self.series {
            ensure_len(&s.scores, self.categories.len(), &format!("radar series `{}`", s.label))?;
            ensure_finite(s.scores.iter().copied(), "radar scores")?;
        }
        ensure_finite(self.rings.iter().copied(), "radar rings")
    }
}

// ------------------------------------------------------------ timeline

#[derive(Debug, Clone, PartialEq)]
pub struct Milestone {
    pub x: f64,
    pub event: String,
    pub value: f64,
}

impl Milestone {
    pub fn new(x: f64, event: impl Into<String>, value: f64) -> Self {
        Self {
            x,
            event: event.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineLane {
    pub label: String,
    pub color: Option<Color>,
    pub milestones: Vec<Milestone>,
}

impl TimelineLane {
    pub fn new(label: impl Into<String>, milestones: Vec<Milestone>) -> Self {
        Self {
            label: label.into(),
            color: None,
            milestones,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

/// Horizontal lanes of milestones; lane 0 is drawn at the top.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineChart {
    pub lanes: Vec<TimelineLane>,
    /// Milestone marker area from its value.
    pub size_scale: SizeScale,
    pub value_suffix: String,
}

impl TimelineChart {
    pub fn new(lanes: Vec<TimelineLane>) -> Self {
        Self {
            lanes,
            size_scale: SizeScale {
                factor: 3.0,
                offset: 50.0,
            },
            value_suffix: String::new(),
        }
    }

    pub fn with_value_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.value_suffix = suffix.into();
        self
    }

    /// Vertical position of a lane; the first lane sits highest.
    pub fn lane_position(&self, lane: usize) -> f64 {
        (self.lanes.len() - 1 - lane) as f64
    }

    pub fn validate(&self) -> RenderResult<()> {
        if self.lanes.is_empty() {
            return Err(RenderError::invalid("timeline has no lanes"));
        }
        for lane in &self.lanes {
            if lane.milestones.is_empty() {
                return Err(RenderError::invalid(format!("lane `{}` has no milestones", lane.label)));
            }
            ensure_finite(
                lane.milestones.iter().flat_map(|m| [m.x, m.value]),
                "milestone values",
            )?;
        }
        let xs = self.lanes.iter().flat_map(|l| l.milestones.iter().map(|m| m.x));
        ensure_span(xs, "milestone positions")
    }
}
