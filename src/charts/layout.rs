//! Layout Helpers
//! Axis scales, tick generation, number formatting and pixel geometry.

use serde::{Deserialize, Serialize};

/// Pixel-space point, y growing downwards.
pub type Point = (f64, f64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl PixelRect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    pub fn center(&self) -> Point {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Shrink by the given margins; never collapses below one pixel.
    pub fn inset(&self, left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            x: self.x + left,
            y: self.y + top,
            w: (self.w - left - right).max(1.0),
            h: (self.h - top - bottom).max(1.0),
        }
    }

    /// Split into a `rows` x `cols` grid, row-major, with `gap` between cells.
    pub fn cells(&self, rows: usize, cols: usize, gap: f64) -> Vec<PixelRect> {
        let rows = rows.max(1);
        let cols = cols.max(1);
        let cell_w = ((self.w - gap * (cols - 1) as f64) / cols as f64).max(1.0);
        let cell_h = ((self.h - gap * (rows - 1) as f64) / rows as f64).max(1.0);

        (0..rows)
            .flat_map(|r| (0..cols).map(move |c| (r, c)))
            .map(|(r, c)| {
                PixelRect::new(
                    self.x + c as f64 * (cell_w + gap),
                    self.y + r as f64 * (cell_h + gap),
                    cell_w,
                    cell_h,
                )
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scale {
    #[default]
    Linear,
    Log10,
}

/// Data range of one axis plus its transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisScale {
    pub min: f64,
    pub max: f64,
    pub scale: Scale,
}

impl AxisScale {
    pub fn linear(min: f64, max: f64) -> Self {
        let max = if max > min { max } else { min + 1.0 };
        Self {
            min,
            max,
            scale: Scale::Linear,
        }
    }

    /// Log axis; bounds must be positive (non-positive bounds fall back to 1..10).
    pub fn log10(min: f64, max: f64) -> Self {
        let (min, max) = if min > 0.0 && max > min {
            (min, max)
        } else {
            (1.0, 10.0)
        };
        Self {
            min,
            max,
            scale: Scale::Log10,
        }
    }

    /// Position of `value` along the axis, 0 at `min` and 1 at `max`.
    pub fn fraction(&self, value: f64) -> f64 {
        match self.scale {
            Scale::Linear => (value - self.min) / (self.max - self.min),
            Scale::Log10 => {
                (value.log10() - self.min.log10()) / (self.max.log10() - self.min.log10())
            }
        }
    }

    pub fn ticks(&self, target: usize) -> Vec<f64> {
        match self.scale {
            Scale::Linear => linear_ticks(self.min, self.max, target),
            Scale::Log10 => log_ticks(self.min, self.max),
        }
    }

    /// Distance between consecutive linear ticks; 1 for log axes.
    pub fn tick_step(&self, target: usize) -> f64 {
        match self.scale {
            Scale::Linear => nice_step(self.max - self.min, target),
            Scale::Log10 => 1.0,
        }
    }
}

pub fn nice_step(range: f64, target_steps: usize) -> f64 {
    if !(range > 0.0) || !range.is_finite() {
        return 1.0;
    }
    let raw_step = range / target_steps.max(1) as f64;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let normalized = raw_step / magnitude;

    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };

    nice * magnitude
}

/// Upper bound on ticks per axis; wider requests yield no ticks.
pub const MAX_TICKS: i64 = 10_000;

pub fn linear_ticks(min: f64, max: f64, target: usize) -> Vec<f64> {
    if !(min.is_finite() && max.is_finite() && min <= max) {
        return Vec::new();
    }
    let step = nice_step(max - min, target);
    let first = (min / step).ceil() as i64;
    let last = (max / step + 1e-9).floor() as i64;
    if last.saturating_sub(first) > MAX_TICKS {
        return Vec::new();
    }
    (first..=last)
        .map(|i| {
            let v = i as f64 * step;
            // Snap away float noise such as 0.30000000000000004
            let snapped = (v / step).round() * step;
            if snapped == 0.0 {
                0.0
            } else {
                snapped
            }
        })
        .collect()
}

/// Powers of ten inside `min..=max`.
pub fn log_ticks(min: f64, max: f64) -> Vec<f64> {
    if !(min > 0.0 && max > min) {
        return Vec::new();
    }
    let lo = (min.log10() - 1e-9).ceil() as i32;
    let hi = (max.log10() + 1e-9).floor() as i32;
    (lo..=hi).map(|e| 10f64.powi(e)).collect()
}

pub fn value_bounds(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Widen `lo..hi` by `margin` of its span on both sides.
pub fn padded_range(lo: f64, hi: f64, margin: f64) -> (f64, f64) {
    if (hi - lo).abs() < f64::EPSILON {
        let pad = if lo == 0.0 { 1.0 } else { lo.abs() * 0.1 };
        return (lo - pad, hi + pad);
    }
    let pad = (hi - lo) * margin;
    (lo - pad, hi + pad)
}

/// Same as [`padded_range`], applied in log10 space.
pub fn padded_log_range(lo: f64, hi: f64, margin: f64) -> (f64, f64) {
    let (llo, lhi) = padded_range(lo.log10(), hi.log10(), margin);
    (10f64.powf(llo), 10f64.powf(lhi))
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Shortest representation of a value: `45`, `7.2`, `0.5`.
pub fn format_value(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}

/// Tick label with as many decimals as the tick step needs.
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step >= 1.0 || step <= 0.0 {
        0
    } else {
        (-step.log10().floor()) as usize
    };
    let label = format!("{:.*}", decimals, value);
    if label.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        label.trim_start_matches('-').to_string()
    } else {
        label
    }
}

/// Swap ASCII hyphen-minus for U+2212 when the config asks for it.
pub fn apply_minus(label: String, unicode_minus: bool) -> String {
    if unicode_minus && label.contains('-') {
        label.replace('-', "\u{2212}")
    } else {
        label
    }
}

/// Rough text extent without font metrics: ASCII at 0.6em, wide glyphs at 1em.
pub fn estimate_text_size(text: &str, size: f64) -> (f64, f64) {
    let lines: Vec<&str> = text.split('\n').collect();
    let width = lines
        .iter()
        .map(|line| {
            line.chars()
                .map(|c| if c.is_ascii() { 0.6 } else { 1.0 })
                .sum::<f64>()
                * size
        })
        .fold(0.0, f64::max);
    (width, lines.len() as f64 * size * 1.2)
}

/// Cut a polyline into dash runs of `on` pixels separated by `off` pixels.
pub fn dash_segments(points: &[Point], on: f64, off: f64) -> Vec<Vec<Point>> {
    let mut runs = Vec::new();
    if points.len() < 2 || on <= 0.0 {
        return runs;
    }
    let period = on + off.max(0.0);
    let mut phase = 0.0;
    let mut current: Vec<Point> = Vec::new();

    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let len = ((b.0 - a.0).powi(2) + (b.1 - a.1).powi(2)).sqrt();
        if len == 0.0 {
            continue;
        }
        let at = |d: f64| (a.0 + (b.0 - a.0) * d / len, a.1 + (b.1 - a.1) * d / len);

        let mut walked = 0.0;
        while walked < len {
            let drawing = phase < on;
            let boundary = if drawing { on } else { period };
            let step = (boundary - phase).min(len - walked);
            if drawing {
                if current.is_empty() {
                    current.push(at(walked));
                }
                current.push(at(walked + step));
            }
            walked += step;
            phase += step;

            if drawing && phase >= on - 1e-9 {
                if current.len() >= 2 {
                    runs.push(std::mem::take(&mut current));
                }
                current.clear();
            }
            if phase >= period - 1e-9 {
                phase = 0.0;
            }
        }
    }
    if current.len() >= 2 {
        runs.push(current);
    }
    runs
}
