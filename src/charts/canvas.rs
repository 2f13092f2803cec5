//! Canvas Module
//! Drawing-primitive sink used by the painters.
//!
//! Painters never touch a rendering library directly: they map data to pixel
//! coordinates and issue calls on a [`Canvas`]. The bitmap backend rasterizes
//! those calls; [`RecordingCanvas`] keeps them as a log for assertions.

use crate::charts::color::Color;
use crate::charts::layout::{estimate_text_size, PixelRect, Point};
use crate::error::{RenderError, RenderResult};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
    /// `(on, off)` dash lengths in pixels.
    pub dash: Option<(f64, f64)>,
}

impl Stroke {
    pub fn solid(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    pub fn dashed(color: Color, width: f64, on: f64, off: f64) -> Self {
        Self {
            color,
            width,
            dash: Some((on, off)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HAlign {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VAlign {
    Top,
    #[default]
    Middle,
    Bottom,
}

/// Text appearance; `size` is in pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub color: Color,
    pub bold: bool,
    pub h_align: HAlign,
    pub v_align: VAlign,
    /// Rotated 90° counter-clockwise (y-axis labels).
    pub vertical: bool,
}

impl TextStyle {
    pub fn new(size: f64, color: Color) -> Self {
        Self {
            size,
            color,
            bold: false,
            h_align: HAlign::Center,
            v_align: VAlign::Middle,
            vertical: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn align(mut self, h_align: HAlign, v_align: VAlign) -> Self {
        self.h_align = h_align;
        self.v_align = v_align;
        self
    }

    pub fn vertical(mut self) -> Self {
        self.vertical = true;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn line_height(&self) -> f64 {
        self.size * 1.2
    }
}

/// Pixel-space drawing surface.
///
/// Text may contain `\n`; implementations lay lines out around the anchor
/// according to the style's alignment.
pub trait Canvas {
    fn size(&self) -> (u32, u32);

    fn fill(&mut self, color: Color) -> RenderResult<()>;

    fn rect(
        &mut self,
        rect: PixelRect,
        fill: Option<Color>,
        stroke: Option<&Stroke>,
    ) -> RenderResult<()>;

    fn polyline(&mut self, points: &[Point], stroke: &Stroke) -> RenderResult<()>;

    fn polygon(&mut self, points: &[Point], fill: Color, stroke: Option<&Stroke>)
        -> RenderResult<()>;

    fn circle(
        &mut self,
        center: Point,
        radius: f64,
        fill: Color,
        stroke: Option<&Stroke>,
    ) -> RenderResult<()>;

    fn text(&mut self, text: &str, at: Point, style: &TextStyle) -> RenderResult<()>;

    /// Width and height of `text` in pixels.
    fn measure_text(&self, text: &str, style: &TextStyle) -> (f64, f64) {
        estimate_text_size(text, style.size)
    }
}

/// One recorded canvas call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Fill(Color),
    Rect {
        rect: PixelRect,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
    Polyline {
        points: Vec<Point>,
        stroke: Stroke,
    },
    Polygon {
        points: Vec<Point>,
        fill: Color,
    },
    Circle {
        center: Point,
        radius: f64,
        fill: Color,
    },
    Text {
        text: String,
        at: Point,
        style: TextStyle,
    },
}

/// Canvas that logs every call instead of rasterizing.
///
/// It still rejects non-finite geometry so tests catch bad projections.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    width: u32,
    height: u32,
    pub calls: Vec<DrawCall>,
}

impl RecordingCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            calls: Vec::new(),
        }
    }

    pub fn polylines(&self) -> impl Iterator<Item = (&[Point], &Stroke)> {
        self.calls.iter().filter_map(|call| match call {
            DrawCall::Polyline { points, stroke } => Some((points.as_slice(), stroke)),
            _ => None,
        })
    }

    /// Polylines stroked in exactly `color`.
    pub fn polylines_with_color(&self, color: Color) -> Vec<&[Point]> {
        self.polylines()
            .filter(|(_, stroke)| stroke.color == color)
            .map(|(points, _)| points)
            .collect()
    }

    pub fn polygons(&self) -> impl Iterator<Item = (&[Point], Color)> {
        self.calls.iter().filter_map(|call| match call {
            DrawCall::Polygon { points, fill } => Some((points.as_slice(), *fill)),
            _ => None,
        })
    }

    pub fn circles(&self) -> impl Iterator<Item = (Point, f64, Color)> + '_ {
        self.calls.iter().filter_map(|call| match call {
            DrawCall::Circle {
                center,
                radius,
                fill,
            } => Some((*center, *radius, *fill)),
            _ => None,
        })
    }

    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn check(points: &[Point]) -> RenderResult<()> {
        if points.iter().all(|(x, y)| x.is_finite() && y.is_finite()) {
            Ok(())
        } else {
            Err(RenderError::backend("non-finite coordinate"))
        }
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill(&mut self, color: Color) -> RenderResult<()> {
        self.calls.push(DrawCall::Fill(color));
        Ok(())
    }

    fn rect(
        &mut self,
        rect: PixelRect,
        fill: Option<Color>,
        stroke: Option<&Stroke>,
    ) -> RenderResult<()> {
        Self::check(&[(rect.x, rect.y), (rect.right(), rect.bottom())])?;
        self.calls.push(DrawCall::Rect {
            rect,
            fill,
            stroke: stroke.copied(),
        });
        Ok(())
    }

    fn polyline(&mut self, points: &[Point], stroke: &Stroke) -> RenderResult<()> {
        Self::check(points)?;
        self.calls.push(DrawCall::Polyline {
            points: points.to_vec(),
            stroke: *stroke,
        });
        Ok(())
    }

    fn polygon(
        &mut self,
        points: &[Point],
        fill: Color,
        _stroke: Option<&Stroke>,
    ) -> RenderResult<()> {
        Self::check(points)?;
        self.calls.push(DrawCall::Polygon {
            points: points.to_vec(),
            fill,
        });
        Ok(())
    }

    fn circle(
        &mut self,
        center: Point,
        radius: f64,
        fill: Color,
        _stroke: Option<&Stroke>,
    ) -> RenderResult<()> {
        Self::check(&[center, (radius, radius)])?;
        self.calls.push(DrawCall::Circle {
            center,
            radius,
            fill,
        });
        Ok(())
    }

    fn text(&mut self, text: &str, at: Point, style: &TextStyle) -> RenderResult<()> {
        Self::check(&[at])?;
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            at,
            style: style.clone(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_canvas_logs_calls_in_order() {
        let mut canvas = RecordingCanvas::new(100, 50);
        let stroke = Stroke::solid(Color::BLACK, 1.0);
        canvas.fill(Color::WHITE).unwrap();
        canvas.polyline(&[(0.0, 0.0), (10.0, 10.0)], &stroke).unwrap();
        canvas
            .text("hello", (5.0, 5.0), &TextStyle::new(10.0, Color::BLACK))
            .unwrap();

        assert_eq!(canvas.size(), (100, 50));
        assert_eq!(canvas.calls.len(), 3);
        assert_eq!(canvas.polylines_with_color(Color::BLACK).len(), 1);
        assert_eq!(canvas.texts(), vec!["hello"]);
    }

    #[test]
    fn recording_canvas_rejects_nan_geometry() {
        let mut canvas = RecordingCanvas::new(10, 10);
        let stroke = Stroke::solid(Color::BLACK, 1.0);
        let err = canvas.polyline(&[(0.0, f64::NAN), (1.0, 1.0)], &stroke);
        assert!(matches!(err, Err(RenderError::Backend(_))));
        assert!(canvas.calls.is_empty());
    }
}
