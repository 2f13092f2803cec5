//! Bitmap Canvas
//! `Canvas` implementation on a plotters `BitMapBackend` drawing into an
//! in-memory RGB buffer.

use crate::charts::canvas::{Canvas, HAlign, Stroke, TextStyle, VAlign};
use crate::charts::color::Color;
use crate::charts::layout::{dash_segments, estimate_text_size, PixelRect, Point};
use crate::error::{RenderError, RenderResult};
use plotters::coord::Shift;
use plotters::drawing::IntoDrawingArea;
use plotters::element::{Circle, PathElement, Polygon, Rectangle, Text};
use plotters::prelude::{BitMapBackend, DrawingArea};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, FontFamily, FontStyle, FontTransform, RGBAColor, ShapeStyle};
use tracing::warn;

pub struct BitmapCanvas<'a> {
    area: DrawingArea<BitMapBackend<'a>, Shift>,
    /// Resolved font family; `None` means text is skipped.
    font: Option<&'a str>,
    width: u32,
    height: u32,
}

impl<'a> BitmapCanvas<'a> {
    /// `buffer` must hold exactly `width * height * 3` bytes.
    pub fn new(buffer: &'a mut [u8], width: u32, height: u32, font: Option<&'a str>) -> Self {
        let area = BitMapBackend::with_buffer(buffer, (width, height)).into_drawing_area();
        Self {
            area,
            font,
            width,
            height,
        }
    }

    pub fn present(&self) -> RenderResult<()> {
        self.area.present().map_err(RenderError::backend)
    }

    fn font_desc(family: &'a str, style: &TextStyle) -> FontDesc<'a> {
        let weight = if style.bold {
            FontStyle::Bold
        } else {
            FontStyle::Normal
        };
        FontDesc::new(FontFamily::from(family), style.size, weight)
    }

    fn shape(color: Color, filled: bool, width: f64) -> ShapeStyle {
        ShapeStyle {
            color: rgba(color),
            filled,
            stroke_width: width.round().max(1.0) as u32,
        }
    }

    fn stroke_path(&self, points: &[Point], stroke: &Stroke) -> RenderResult<()> {
        let style = Self::shape(stroke.color, false, stroke.width);
        let runs = match stroke.dash {
            Some((on, off)) => dash_segments(points, on, off),
            None => vec![points.to_vec()],
        };
        for run in runs {
            self.area
                .draw(&PathElement::new(pixels(&run), style))
                .map_err(RenderError::backend)?;
        }
        Ok(())
    }
}

impl Canvas for BitmapCanvas<'_> {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill(&mut self, color: Color) -> RenderResult<()> {
        self.area.fill(&rgba(color)).map_err(RenderError::backend)
    }

    fn rect(
        &mut self,
        rect: PixelRect,
        fill: Option<Color>,
        stroke: Option<&Stroke>,
    ) -> RenderResult<()> {
        let corners = [
            to_pixel((rect.x, rect.y)),
            to_pixel((rect.right(), rect.bottom())),
        ];
        if let Some(color) = fill {
            self.area
                .draw(&Rectangle::new(corners, Self::shape(color, true, 1.0)))
                .map_err(RenderError::backend)?;
        }
        if let Some(stroke) = stroke {
            let outline = [
                (rect.x, rect.y),
                (rect.right(), rect.y),
                (rect.right(), rect.bottom()),
                (rect.x, rect.bottom()),
                (rect.x, rect.y),
            ];
            self.stroke_path(&outline, stroke)?;
        }
        Ok(())
    }

    fn polyline(&mut self, points: &[Point], stroke: &Stroke) -> RenderResult<()> {
        self.stroke_path(points, stroke)
    }

    fn polygon(
        &mut self,
        points: &[Point],
        fill: Color,
        stroke: Option<&Stroke>,
    ) -> RenderResult<()> {
        self.area
            .draw(&Polygon::new(pixels(points), Self::shape(fill, true, 1.0)))
            .map_err(RenderError::backend)?;
        if let (Some(stroke), Some(first)) = (stroke, points.first()) {
            let mut outline = points.to_vec();
            outline.push(*first);
            self.stroke_path(&outline, stroke)?;
        }
        Ok(())
    }

    fn circle(
        &mut self,
        center: Point,
        radius: f64,
        fill: Color,
        stroke: Option<&Stroke>,
    ) -> RenderResult<()> {
        let radius = radius.round().max(1.0) as i32;
        self.area
            .draw(&Circle::new(
                to_pixel(center),
                radius,
                Self::shape(fill, true, 1.0),
            ))
            .map_err(RenderError::backend)?;
        if let Some(stroke) = stroke {
            self.area
                .draw(&Circle::new(
                    to_pixel(center),
                    radius,
                    Self::shape(stroke.color, false, stroke.width),
                ))
                .map_err(RenderError::backend)?;
        }
        Ok(())
    }

    /// Text the font backend cannot draw is logged and skipped; missing fonts
    /// degrade labels but never fail a render.
    fn text(&mut self, text: &str, at: Point, style: &TextStyle) -> RenderResult<()> {
        let Some(family) = self.font else {
            return Ok(());
        };
        let desc = Self::font_desc(family, style);
        let color = rgba(style.color);

        if style.vertical {
            let line = text.split('\n').collect::<Vec<_>>().join(" ");
            let text_style = desc
                .transform(FontTransform::Rotate270)
                .color(&color)
                .pos(Pos::new(h_pos(style.h_align), v_pos(style.v_align)));
            if let Err(err) = self.area.draw(&Text::new(line, to_pixel(at), text_style)) {
                warn!(error = %err, "skipping text the font backend could not draw");
            }
            return Ok(());
        }

        let lines: Vec<&str> = text.split('\n').collect();
        let line_h = style.line_height();
        let block_h = line_h * lines.len() as f64;
        let top = match style.v_align {
            VAlign::Top => at.1,
            VAlign::Middle => at.1 - block_h / 2.0,
            VAlign::Bottom => at.1 - block_h,
        };
        let text_style = desc
            .color(&color)
            .pos(Pos::new(h_pos(style.h_align), VPos::Center));

        for (i, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let y = top + line_h * (i as f64 + 0.5);
            let drawn = self.area.draw(&Text::new(
                line.to_string(),
                to_pixel((at.0, y)),
                text_style.clone(),
            ));
            if let Err(err) = drawn {
                warn!(error = %err, "skipping text the font backend could not draw");
            }
        }
        Ok(())
    }

    fn measure_text(&self, text: &str, style: &TextStyle) -> (f64, f64) {
        let Some(family) = self.font else {
            return estimate_text_size(text, style.size);
        };
        let desc = Self::font_desc(family, style);
        let lines: Vec<&str> = text.split('\n').collect();
        let mut width: f64 = 0.0;
        for line in &lines {
            match desc.box_size(line) {
                Ok((w, _)) => width = width.max(w as f64),
                Err(_) => return estimate_text_size(text, style.size),
            }
        }
        (width, style.line_height() * lines.len() as f64)
    }
}

fn rgba(color: Color) -> RGBAColor {
    RGBAColor(color.r, color.g, color.b, color.a)
}

fn to_pixel(point: Point) -> (i32, i32) {
    (point.0.round() as i32, point.1.round() as i32)
}

fn pixels(points: &[Point]) -> Vec<(i32, i32)> {
    points.iter().copied().map(to_pixel).collect()
}

fn h_pos(align: HAlign) -> HPos {
    match align {
        HAlign::Left => HPos::Left,
        HAlign::Center => HPos::Center,
        HAlign::Right => HPos::Right,
    }
}

fn v_pos(align: VAlign) -> VPos {
    match align {
        VAlign::Top => VPos::Top,
        VAlign::Middle => VPos::Center,
        VAlign::Bottom => VPos::Bottom,
    }
}
