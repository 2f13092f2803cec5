//! Charts module - Chart description, painting and PNG rendering

pub mod bitmap;
pub mod canvas;
pub mod color;
pub mod layout;
pub mod painter;
mod renderer;
pub mod spec;

pub use color::{Color, ColorScale, Palette};
pub use renderer::{content_bounds, render, tight_crop, ChartRenderer, RenderedChart};
pub use spec::{
    Annotation, BarChart, BarGroup, BubbleChart, BubblePoint, ChartKind, ChartSpec, FigureSize,
    Grid, GridLines, Legend, LineChart, LineSeries, Marker, Milestone, PieChart, PieSlice, Plot,
    RadarChart, RadarSeries, Sample, SizeScale, StackLayer, StackedBarChart, TimelineChart,
    TimelineLane,
};
