//! Annotations drawn over a painted panel.

use super::legend::LegendEntry;
use super::{arrow, boxed_text, Frame, Painter};
use crate::charts::canvas::{Canvas, HAlign, Stroke, VAlign};
use crate::charts::color::Color;
use crate::charts::spec::Annotation;
use crate::error::RenderResult;

/// Legend rows contributed by labelled reference lines.
pub fn legend_entries(annotations: &[Annotation]) -> Vec<LegendEntry> {
    annotations
        .iter()
        .filter_map(|a| match a {
            Annotation::ReferenceLine {
                label: Some(label),
                color,
                ..
            } => Some(LegendEntry::dashed(label.clone(), *color)),
            _ => None,
        })
        .collect()
}

pub fn draw(
    painter: &Painter<'_>,
    canvas: &mut dyn Canvas,
    frame: &Frame,
    annotations: &[Annotation],
) -> RenderResult<()> {
    for annotation in annotations {
        match annotation {
            Annotation::ReferenceLine {
                from, to, color, ..
            } => {
                let Some((a, b)) = frame.clip(*from, *to) else {
                    continue;
                };
                let stroke =
                    Stroke::dashed(*color, painter.pt(1.5), painter.pt(5.5), painter.pt(2.5));
                canvas.polyline(&[frame.map(a), frame.map(b)], &stroke)?;
            }
            Annotation::Text { text, at, fill } => {
                let style = painter.style(12.0).align(HAlign::Center, VAlign::Middle);
                let at = frame.map(*at);
                match fill {
                    Some(fill) => boxed_text(canvas, text, at, &style, *fill, painter.pt(4.0))?,
                    None => canvas.text(text, at, &style)?,
                }
            }
            Annotation::Arrow {
                from,
                to,
                text,
                color,
            } => {
                let tail = frame.map(*from);
                let stroke = Stroke::solid(*color, painter.pt(2.0));
                arrow(canvas, tail, frame.map(*to), &stroke, painter.pt(9.0))?;
                if let Some(text) = text {
                    let style = painter
                        .style(12.0)
                        .bold()
                        .color(*color)
                        .align(HAlign::Left, VAlign::Bottom);
                    canvas.text(text, tail, &style)?;
                }
            }
            Annotation::Note(text) => {
                let style = painter.style(9.0).align(HAlign::Left, VAlign::Top);
                let pad = painter.pt(3.0);
                let at = (frame.area.x + painter.pt(6.0) + pad, frame.area.y + painter.pt(6.0) + pad);
                boxed_text(canvas, text, at, &style, Color::hex(0xD3D3D3).with_alpha(0.5), pad)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::canvas::RecordingCanvas;
    use approx::assert_relative_eq;
    use crate::charts::layout::{AxisScale, PixelRect};
    use crate::config::RenderConfig;

    #[test]
    fn reference_line_is_clipped_and_dashed() {
        let config = RenderConfig::default().with_dpi(72);
        let painter = Painter::new(&config, &config.palette);
        let frame = Frame::new(
            PixelRect::new(0.0, 0.0, 80.0, 40.0),
            AxisScale::linear(20.0, 100.0),
            AxisScale::linear(60.0, 100.0),
        );
        let line = Annotation::ReferenceLine {
            from: (0.0, 0.0),
            to: (100.0, 100.0),
            label: Some("diagonal".into()),
            color: Color::BLACK,
        };
        let mut canvas = RecordingCanvas::new(80, 40);
        draw(&painter, &mut canvas, &frame, std::slice::from_ref(&line)).unwrap();

        let (points, stroke) = canvas.polylines().next().unwrap();
        assert!(stroke.dash.is_some());
        assert_relative_eq!(points[0].0, 40.0, epsilon = 1e-9);
        assert_relative_eq!(points[0].1, 40.0, epsilon = 1e-9);
        assert_relative_eq!(points[1].0, 80.0, epsilon = 1e-9);
        assert_relative_eq!(points[1].1, 0.0, epsilon = 1e-9);
        assert_eq!(legend_entries(&[line]).len(), 1);
    }
}
