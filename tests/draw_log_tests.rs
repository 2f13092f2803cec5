use market_charts::charts::canvas::RecordingCanvas;
use market_charts::charts::painter::paint;
use market_charts::charts::{
    ChartSpec, Color, FigureSize, Legend, LineChart, LineSeries, PieChart, PieSlice, Plot,
    RadarChart, RadarSeries, StackLayer, StackedBarChart,
};
use market_charts::RenderConfig;

fn draw(plot: Plot) -> RecordingCanvas {
    let config = RenderConfig::default().with_dpi(72);
    let spec = ChartSpec::single(plot, FigureSize::new(8.0, 6.0), "unused.png");
    spec.validate().expect("valid spec");
    let (w, h) = spec.size.to_pixels(config.dpi);
    let mut canvas = RecordingCanvas::new(w, h);
    paint(&spec, &config, &mut canvas).expect("paint should succeed");
    canvas
}

#[test]
fn missing_sample_breaks_the_line() {
    let series = LineSeries::new(
        "gap",
        vec![
            (2019.0, Some(7.2)),
            (2022.0, Some(11.4)),
            (2024.0, None),
            (2025.0, Some(14.5)),
            (2028.0, Some(36.5)),
        ],
    )
    .with_color(Color::hex(0x2E86AB));
    let canvas = draw(
        Plot::new("gap", LineChart::new(vec![series])).with_legend(Legend::Hidden),
    );

    let runs = canvas.polylines_with_color(Color::hex(0x2E86AB));
    assert_eq!(runs.len(), 2, "one polyline per run of present samples");
    assert!(runs.iter().all(|run| run.len() == 2));
}

#[test]
fn dense_series_is_one_polyline() {
    let series = LineSeries::dense("dense", &[1.0, 2.0, 3.0, 4.0], &[1.0, 4.0, 9.0, 16.0])
        .with_color(Color::hex(0xA23B72));
    let canvas = draw(
        Plot::new("dense", LineChart::new(vec![series])).with_legend(Legend::Hidden),
    );

    let runs = canvas.polylines_with_color(Color::hex(0xA23B72));
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].len(), 4);
}

#[test]
fn radar_polygons_are_closed() {
    let categories: Vec<String> = ["a", "b", "c", "d", "e"].iter().map(|s| s.to_string()).collect();
    let colors = [Color::hex(0xFF6B6B), Color::hex(0x4ECDC4)];
    let chart = RadarChart::new(
        categories.clone(),
        vec![
            RadarSeries::new("one", vec![8.0, 9.0, 6.0, 8.0, 7.0]).with_color(colors[0]),
            RadarSeries::new("two", vec![9.0, 10.0, 8.0, 9.0, 9.0]).with_color(colors[1]),
        ],
        10.0,
    )
    .with_rings(vec![2.0, 4.0, 6.0, 8.0, 10.0]);
    let canvas = draw(Plot::new("radar", chart).with_legend(Legend::Hidden));

    for color in colors {
        let outlines = canvas.polylines_with_color(color);
        assert_eq!(outlines.len(), 1);
        let outline = outlines[0];
        assert_eq!(outline.len(), categories.len() + 1);
        assert_eq!(outline.first(), outline.last());
    }
    assert!(canvas
        .polygons()
        .filter(|(points, _)| points.len() == categories.len() + 1)
        .all(|(points, _)| points.first() == points.last()));
}

#[test]
fn stacked_totals_are_labelled_with_category_sums() {
    let chart = StackedBarChart::new(
        vec!["search".into(), "mobile".into(), "geo".into()],
        vec![
            StackLayer::new("p1", vec![3.0, 0.5, 0.5]),
            StackLayer::new("p2", vec![2.0, 1.0, 1.0]),
            StackLayer::new("p3", vec![3.0, 1.5, 0.5]),
            StackLayer::new("p4", vec![3.0, 2.0, 1.0]),
            StackLayer::new("p5", vec![2.0, 1.0, 1.0]),
        ],
    )
    .with_unit("y")
    .with_total_prefix("total: ");
    let canvas = draw(Plot::new("speed", chart));

    let texts = canvas.texts();
    for expected in ["total: 13y", "total: 6y", "total: 4y"] {
        assert!(texts.contains(&expected), "missing `{}`", expected);
    }
}

#[test]
fn pie_labels_sum_to_one_hundred() {
    let chart = PieChart::new(vec![
        PieSlice::new("ChatGPT", 60.4),
        PieSlice::new("Copilot", 14.1),
        PieSlice::new("Gemini", 13.5),
        PieSlice::new("Perplexity", 6.5),
        PieSlice::new("Claude", 3.5),
        PieSlice::new("other", 2.0),
    ]);
    let canvas = draw(Plot::new("share", chart));

    let sum: f64 = canvas
        .texts()
        .iter()
        .filter_map(|t| t.strip_suffix('%'))
        .map(|t| t.parse::<f64>().expect("numeric percentage"))
        .sum();
    assert!((sum - 100.0).abs() <= 0.1, "sum was {}", sum);
}
