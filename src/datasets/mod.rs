//! Datasets module - Literal chart suites
//!
//! Two fixed suites of market-trend charts. All numbers are constants taken
//! from the market reports the charts illustrate; nothing is fetched.

mod geo_trends;
mod historical;

pub use geo_trends::geo_trends;
pub use historical::historical_comparison;

use crate::charts::{Annotation, ChartSpec};
use std::path::Path;

/// Default output directory, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "../public/workspace/charts";

/// Note attached to plots whose figures include projections.
pub(crate) fn projected(text: &str) -> Annotation {
    Annotation::note(format!("注：{}", text))
}

/// Logistic adoption curve `max / (1 + e^(-rate * (x - midpoint)))`.
pub fn logistic(x: f64, max: f64, rate: f64, midpoint: f64) -> f64 {
    max / (1.0 + (-rate * (x - midpoint)).exp())
}

/// Every suite by name, in rendering order.
pub fn suites(output_dir: &Path) -> Vec<(&'static str, Vec<ChartSpec>)> {
    vec![
        ("geo_trends", geo_trends(output_dir)),
        ("historical_comparison", historical_comparison(output_dir)),
    ]
}
