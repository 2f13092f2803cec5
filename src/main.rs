//! Market Charts - renders the GEO trend and historical comparison suites
//!
//! Output goes to `MARKET_CHARTS_OUTPUT_DIR` (default `../public/workspace/charts`).
//! `MARKET_CHARTS_CONFIG` may point at a JSON render config.

use anyhow::{bail, Context, Result};
use market_charts::config::RenderConfig;
use market_charts::datasets::{self, DEFAULT_OUTPUT_DIR};
use market_charts::telemetry::init_tracing;
use market_charts::ChartRenderer;
use rayon::prelude::*;
use std::env;
use std::fs;
use std::path::PathBuf;
use tracing::{error, info};

fn load_config() -> Result<RenderConfig> {
    match env::var_os("MARKET_CHARTS_CONFIG") {
        Some(path) => {
            let path = PathBuf::from(path);
            RenderConfig::load(&path)
                .with_context(|| format!("loading render config {}", path.display()))
        }
        None => Ok(RenderConfig::default()),
    }
}

fn main() -> Result<()> {
    init_tracing();

    let config = load_config()?;
    let output_dir = env::var_os("MARKET_CHARTS_OUTPUT_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("creating output directory {}", output_dir.display()))?;

    let renderer = ChartRenderer::new(config);
    let mut failed = 0usize;

    for (suite, specs) in datasets::suites(&output_dir) {
        info!(suite, charts = specs.len(), "rendering suite");

        // Each render owns its buffer; the renderer is only read
        let results: Vec<_> = specs
            .par_iter()
            .map(|spec| (spec.file_name(), renderer.render(spec)))
            .collect();

        for (name, result) in results {
            match result {
                Ok(chart) => info!(
                    chart = %name,
                    width = chart.width,
                    height = chart.height,
                    "chart written"
                ),
                Err(err) => {
                    error!(chart = %name, error = %err, "chart failed");
                    failed += 1;
                }
            }
        }
    }

    if failed > 0 {
        bail!("{} chart(s) failed to render", failed);
    }
    info!(dir = %output_dir.display(), "all charts written");
    Ok(())
}
