use market_charts::datasets::{self, geo_trends, historical_comparison};
use market_charts::{ChartRenderer, RenderConfig};
use std::collections::BTreeSet;
use std::path::Path;

const EXPECTED_FILES: [&str; 11] = [
    "comprehensive_radar_comparison.png",
    "development_speed_comparison.png",
    "geo_application_domains.png",
    "geo_cagr_comparison.png",
    "geo_market_size_trends.png",
    "geo_regional_market_comparison.png",
    "geo_technology_adoption_timeline.png",
    "geo_technology_trend_matrix.png",
    "market_share_evolution.png",
    "roi_business_impact_comparison.png",
    "technology_adoption_timeline.png",
];

#[test]
fn every_dataset_chart_validates() {
    for (suite, specs) in datasets::suites(Path::new("out")) {
        for spec in specs {
            spec.validate()
                .unwrap_or_else(|err| panic!("{suite}/{}: {err}", spec.file_name()));
        }
    }
}

#[test]
fn suites_cover_the_eleven_charts_once() {
    let names: Vec<String> = datasets::suites(Path::new("out"))
        .into_iter()
        .flat_map(|(_, specs)| specs)
        .map(|spec| spec.file_name())
        .collect();
    let unique: BTreeSet<&str> = names.iter().map(String::as_str).collect();
    let expected: BTreeSet<&str> = EXPECTED_FILES.into_iter().collect();

    assert_eq!(names.len(), EXPECTED_FILES.len());
    assert_eq!(unique, expected);
}

#[test]
fn outputs_land_in_the_requested_directory() {
    let dir = Path::new("some/charts");
    for spec in geo_trends(dir).iter().chain(historical_comparison(dir).iter()) {
        assert_eq!(spec.output_path().parent(), Some(dir));
    }
}

#[test]
fn multi_panel_figures_fill_their_grids() {
    let panels: Vec<(String, usize, usize)> = datasets::suites(Path::new("out"))
        .into_iter()
        .flat_map(|(_, specs)| specs)
        .map(|spec| (spec.file_name(), spec.panels.len(), spec.grid.capacity()))
        .collect();

    for (name, count, capacity) in &panels {
        assert!(count <= capacity, "{name} overflows its grid");
    }
    let count_of = |file: &str| {
        panels
            .iter()
            .find(|(name, _, _)| name == file)
            .map(|(_, count, _)| *count)
    };
    assert_eq!(count_of("geo_regional_market_comparison.png"), Some(2));
    assert_eq!(count_of("market_share_evolution.png"), Some(3));
    assert_eq!(count_of("roi_business_impact_comparison.png"), Some(4));
    assert_eq!(count_of("geo_market_size_trends.png"), Some(1));
}

#[test]
fn suites_render_end_to_end() {
    let dir = tempfile::tempdir().expect("temp dir");
    let renderer = ChartRenderer::new(RenderConfig::default().with_dpi(24));

    for (_, specs) in datasets::suites(dir.path()) {
        for spec in specs {
            let rendered = renderer
                .render(&spec)
                .unwrap_or_else(|err| panic!("{}: {err}", spec.file_name()));
            assert!(rendered.path.is_file());
        }
    }

    let written = std::fs::read_dir(dir.path()).expect("read dir").count();
    assert_eq!(written, EXPECTED_FILES.len());
}
