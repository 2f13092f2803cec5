//! Legend box.

use super::{marker, Painter};
use crate::charts::canvas::{Canvas, HAlign, Stroke, TextStyle, VAlign};
use crate::charts::color::Color;
use crate::charts::layout::PixelRect;
use crate::charts::spec::{Legend, Marker};
use crate::error::RenderResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swatch {
    Line { marker: Marker, dashed: bool },
    Patch,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: Color,
    pub swatch: Swatch,
}

impl LegendEntry {
    pub fn line(label: impl Into<String>, color: Color, marker: Marker) -> Self {
        Self {
            label: label.into(),
            color,
            swatch: Swatch::Line {
                marker,
                dashed: false,
            },
        }
    }

    pub fn dashed(label: impl Into<String>, color: Color) -> Self {
        Self {
            label: label.into(),
            color,
            swatch: Swatch::Line {
                marker: Marker::None,
                dashed: true,
            },
        }
    }

    pub fn patch(label: impl Into<String>, color: Color) -> Self {
        Self {
            label: label.into(),
            color,
            swatch: Swatch::Patch,
        }
    }
}

struct Metrics {
    style: TextStyle,
    pad: f64,
    swatch_w: f64,
    gap: f64,
    rows: Vec<(f64, f64)>,
}

fn metrics(painter: &Painter<'_>, canvas: &dyn Canvas, entries: &[LegendEntry]) -> Metrics {
    let style = painter.style(10.0).align(HAlign::Left, VAlign::Middle);
    let min_row = painter.pt(13.0);
    let rows = entries
        .iter()
        .map(|e| {
            let (w, h) = canvas.measure_text(&e.label, &style);
            (w, h.max(min_row))
        })
        .collect();
    Metrics {
        style,
        pad: painter.pt(5.0),
        swatch_w: painter.pt(22.0),
        gap: painter.pt(5.0),
        rows,
    }
}

impl Metrics {
    fn size(&self) -> (f64, f64) {
        let text_w = self.rows.iter().map(|r| r.0).fold(0.0, f64::max);
        let text_h: f64 = self.rows.iter().map(|r| r.1).sum();
        (
            self.pad * 2.0 + self.swatch_w + self.gap + text_w,
            self.pad * 2.0 + text_h,
        )
    }
}

/// Pixel size of the legend box for `entries`.
pub fn size(painter: &Painter<'_>, canvas: &dyn Canvas, entries: &[LegendEntry]) -> (f64, f64) {
    metrics(painter, canvas, entries).size()
}

pub fn draw(
    painter: &Painter<'_>,
    canvas: &mut dyn Canvas,
    area: PixelRect,
    position: Legend,
    entries: &[LegendEntry],
) -> RenderResult<()> {
    if entries.is_empty() || position == Legend::Hidden {
        return Ok(());
    }
    let m = metrics(painter, canvas, entries);
    let (w, h) = m.size();
    let inset = painter.pt(8.0);
    let (x, y) = match position {
        Legend::UpperLeft => (area.x + inset, area.y + inset),
        Legend::UpperRight | Legend::Hidden => (area.right() - inset - w, area.y + inset),
        Legend::LowerLeft => (area.x + inset, area.bottom() - inset - h),
        Legend::LowerRight => (area.right() - inset - w, area.bottom() - inset - h),
        Legend::OutsideRight => (area.right() + painter.pt(12.0), area.y),
    };

    canvas.rect(
        PixelRect::new(x, y, w, h),
        Some(Color::WHITE.with_alpha(0.8)),
        Some(&Stroke::solid(Color::hex(0xCCCCCC), painter.pt(0.8))),
    )?;

    let mut row_y = y + m.pad;
    for (entry, (_, row_h)) in entries.iter().zip(&m.rows) {
        let mid = row_y + row_h / 2.0;
        let left = x + m.pad;
        match entry.swatch {
            Swatch::Line { marker: kind, dashed } => {
                let stroke = if dashed {
                    Stroke::dashed(entry.color, painter.pt(1.5), painter.pt(4.0), painter.pt(2.0))
                } else {
                    Stroke::solid(entry.color, painter.pt(2.0))
                };
                canvas.polyline(&[(left, mid), (left + m.swatch_w, mid)], &stroke)?;
                marker(canvas, kind, (left + m.swatch_w / 2.0, mid), painter.pt(3.0), entry.color)?;
            }
            Swatch::Patch => {
                let ph = painter.pt(8.0);
                canvas.rect(
                    PixelRect::new(left, mid - ph / 2.0, m.swatch_w, ph),
                    Some(entry.color),
                    None,
                )?;
            }
        }
        canvas.text(&entry.label, (left + m.swatch_w + m.gap, mid), &m.style)?;
        row_y += row_h;
    }
    Ok(())
}
