//! Chart Renderer
//! Turns a validated [`ChartSpec`] into a PNG file.
//!
//! Pipeline:
//! 1. Validate the `ChartSpec` (nothing is drawn for malformed data)
//! 2. Paint into an in-memory RGB buffer through the plotters bitmap backend
//! 3. Optionally crop to the drawn content, keeping `pad_inches` of margin
//! 4. Encode PNG in memory, then write the file in one step

use crate::charts::bitmap::BitmapCanvas;
use crate::charts::painter::paint;
use crate::charts::spec::ChartSpec;
use crate::config::{resolve_font_family, RenderConfig};
use crate::error::{RenderError, RenderResult};
use image::codecs::png::PngEncoder;
use image::{imageops, ExtendedColorType, ImageEncoder, Rgb, RgbImage};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Largest figure, in pixels, a single render may allocate.
pub const MAX_PIXELS: u64 = 200_000_000;

/// Result of a successful render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedChart {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Renderer bound to one rendering environment.
///
/// Holds no drawing state: every [`render`](Self::render) call allocates its
/// own buffer, so one renderer can be shared across threads.
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    config: RenderConfig,
    font: Option<String>,
}

impl ChartRenderer {
    /// Resolve the font family once and keep it for every render.
    pub fn new(config: RenderConfig) -> Self {
        let font = resolve_font_family(&config.font_families);
        match &font {
            Some(family) => info!(font = %family, "resolved font family"),
            None => warn!("no usable font family found, text will be skipped"),
        }
        Self { config, font }
    }

    /// Override the resolved family; `None` renders without text.
    pub fn with_font(mut self, font: Option<String>) -> Self {
        self.font = font;
        self
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn font(&self) -> Option<&str> {
        self.font.as_deref()
    }

    /// Render `spec` and write it to `spec.output_path`, replacing any
    /// existing file.
    pub fn render(&self, spec: &ChartSpec) -> RenderResult<RenderedChart> {
        let image = self.rasterize(spec)?;
        let bytes = Self::encode_png(&image)?;

        let path = spec.output_path.clone();
        fs::write(&path, &bytes).map_err(|source| RenderError::io(&path, source))?;

        debug!(path = %path.display(), bytes = bytes.len(), "wrote chart");
        Ok(RenderedChart {
            path,
            width: image.width(),
            height: image.height(),
        })
    }

    /// Paint `spec` into an image without touching the filesystem.
    pub fn rasterize(&self, spec: &ChartSpec) -> RenderResult<RgbImage> {
        self.config.validate()?;
        spec.validate()?;

        let (width, height) = spec.size.to_pixels(self.config.dpi);
        let pixels = (width as u64)
            .checked_mul(height as u64)
            .filter(|&n| n <= MAX_PIXELS)
            .ok_or_else(|| {
                RenderError::invalid(format!(
                    "figure of {}x{} px exceeds the {} pixel limit",
                    width, height, MAX_PIXELS
                ))
            })?;
        let mut buffer = vec![0u8; pixels as usize * 3];
        {
            let mut canvas = BitmapCanvas::new(&mut buffer, width, height, self.font.as_deref());
            paint(spec, &self.config, &mut canvas)?;
            canvas.present()?;
        }

        let image = RgbImage::from_raw(width, height, buffer)
            .ok_or_else(|| RenderError::backend("pixel buffer does not match image size"))?;

        if self.config.tight_bbox {
            let background = self.config.theme.figure_background();
            let background = Rgb([background.r, background.g, background.b]);
            Ok(tight_crop(&image, background, self.config.pad_pixels()))
        } else {
            Ok(image)
        }
    }

    pub fn encode_png(image: &RgbImage) -> RenderResult<Vec<u8>> {
        let mut bytes = Vec::new();
        PngEncoder::new(&mut bytes)
            .write_image(
                image.as_raw(),
                image.width(),
                image.height(),
                ExtendedColorType::Rgb8,
            )
            .map_err(RenderError::backend)?;
        Ok(bytes)
    }
}

/// Render with a one-off renderer for `config`.
pub fn render(spec: &ChartSpec, config: &RenderConfig) -> RenderResult<RenderedChart> {
    ChartRenderer::new(config.clone()).render(spec)
}

/// Bounding box `(x, y, w, h)` of pixels that differ from `background`.
pub fn content_bounds(image: &RgbImage, background: Rgb<u8>) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, pixel) in image.enumerate_pixels() {
        if *pixel == background {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }
    bounds.map(|(x0, y0, x1, y1)| (x0, y0, x1 - x0 + 1, y1 - y0 + 1))
}

/// Crop to the content plus `pad` pixels, clamped to the image.
/// A blank image is returned unchanged.
pub fn tight_crop(image: &RgbImage, background: Rgb<u8>, pad: u32) -> RgbImage {
    let Some((x, y, w, h)) = content_bounds(image, background) else {
        return image.clone();
    };
    let left = x.saturating_sub(pad);
    let top = y.saturating_sub(pad);
    let right = (x + w + pad).min(image.width());
    let bottom = (y + h + pad).min(image.height());
    imageops::crop_imm(image, left, top, right - left, bottom - top).to_image()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas_with_dot(w: u32, h: u32, dot: (u32, u32)) -> RgbImage {
        let mut image = RgbImage::from_pixel(w, h, Rgb([255, 255, 255]));
        image.put_pixel(dot.0, dot.1, Rgb([0, 0, 0]));
        image
    }

    #[test]
    fn crop_keeps_padding_around_content() {
        let image = canvas_with_dot(100, 80, (50, 40));
        let cropped = tight_crop(&image, Rgb([255, 255, 255]), 10);
        assert_eq!(cropped.dimensions(), (21, 21));
        assert_eq!(*cropped.get_pixel(10, 10), Rgb([0, 0, 0]));
    }

    #[test]
    fn crop_padding_is_clamped_to_image() {
        let image = canvas_with_dot(30, 30, (1, 28));
        let cropped = tight_crop(&image, Rgb([255, 255, 255]), 5);
        assert_eq!(cropped.dimensions(), (7, 7));
    }

    #[test]
    fn blank_image_is_not_cropped() {
        let image = RgbImage::from_pixel(10, 10, Rgb([255, 255, 255]));
        assert_eq!(tight_crop(&image, Rgb([255, 255, 255]), 2).dimensions(), (10, 10));
        assert!(content_bounds(&image, Rgb([255, 255, 255])).is_none());
    }

    #[test]
    fn encoded_png_has_signature() {
        let image = canvas_with_dot(4, 4, (1, 1));
        let bytes = ChartRenderer::encode_png(&image).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
