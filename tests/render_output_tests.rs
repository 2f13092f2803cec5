use market_charts::charts::{
    BarChart, BarGroup, ChartSpec, FigureSize, LineChart, LineSeries, PieChart, PieSlice, Plot,
};
use market_charts::{render, ChartRenderer, RenderConfig, RenderError};
use std::fs;
use std::path::Path;

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

fn config() -> RenderConfig {
    RenderConfig::default().with_dpi(40)
}

fn line_spec(path: &Path) -> ChartSpec {
    let series = LineSeries::new(
        "market",
        vec![(2019.0, Some(7.2)), (2022.0, Some(11.4)), (2024.0, None), (2025.0, Some(14.5))],
    );
    let plot = Plot::new("trend", LineChart::new(vec![series]))
        .with_x_label("year")
        .with_y_label("size");
    ChartSpec::single(plot, FigureSize::new(6.0, 4.0), path)
}

fn files_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("read dir")
        .map(|e| e.expect("dir entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn render_writes_exactly_one_png() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("trend.png");

    let rendered = render(&line_spec(&path), &config()).expect("render should succeed");

    assert_eq!(rendered.path, path);
    assert_eq!(files_in(dir.path()), vec!["trend.png".to_string()]);
    let bytes = fs::read(&path).expect("read png");
    assert!(bytes.len() > PNG_SIGNATURE.len());
    assert_eq!(&bytes[..8], PNG_SIGNATURE);

    let decoded = image::load_from_memory(&bytes).expect("decode png");
    assert_eq!((decoded.width(), decoded.height()), (rendered.width, rendered.height));
}

#[test]
fn render_overwrites_existing_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("trend.png");
    fs::write(&path, b"stale").expect("seed file");

    render(&line_spec(&path), &config()).expect("render should succeed");

    let bytes = fs::read(&path).expect("read png");
    assert_eq!(&bytes[..8], PNG_SIGNATURE);
    assert_eq!(files_in(dir.path()).len(), 1);
}

#[test]
fn missing_directory_is_an_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("not-created").join("trend.png");

    let err = render(&line_spec(&path), &config()).expect_err("render should fail");

    match err {
        RenderError::Io { path: failed, .. } => assert_eq!(failed, path),
        other => panic!("expected io error, got {other:?}"),
    }
    assert!(!path.exists());
}

#[test]
fn invalid_series_leaves_no_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("empty.png");
    let plot = Plot::new("empty", PieChart::new(vec![PieSlice::new("a", 0.0)]));
    let spec = ChartSpec::single(plot, FigureSize::new(4.0, 4.0), &path);

    let err = render(&spec, &config()).expect_err("render should fail");

    assert!(matches!(err, RenderError::InvalidSeries(_)));
    assert!(files_in(dir.path()).is_empty());
}

#[test]
fn mismatched_bar_lengths_are_invalid() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("bars.png");
    let chart = BarChart::new(
        vec!["a".into(), "b".into()],
        vec![BarGroup::new("g", vec![1.0])],
    );
    let spec = ChartSpec::single(Plot::new("bars", chart), FigureSize::new(4.0, 4.0), &path);

    assert!(matches!(
        render(&spec, &config()),
        Err(RenderError::InvalidSeries(_))
    ));
    assert!(!path.exists());
}

#[test]
fn repeated_renders_are_identical() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("trend.png");
    let renderer = ChartRenderer::new(config());
    let spec = line_spec(&path);

    let first = renderer.render(&spec).expect("first render");
    let first_bytes = fs::read(&path).expect("read first");
    let second = renderer.render(&spec).expect("second render");
    let second_bytes = fs::read(&path).expect("read second");

    assert_eq!(first, second);
    assert_eq!(first_bytes, second_bytes);
}

#[test]
fn tight_bbox_never_grows_the_figure() {
    let dir = tempfile::tempdir().expect("temp dir");
    let loose = ChartRenderer::new(config().with_tight_bbox(false));
    let tight = ChartRenderer::new(config());

    let full = loose
        .render(&line_spec(&dir.path().join("loose.png")))
        .expect("loose render");
    let cropped = tight
        .render(&line_spec(&dir.path().join("tight.png")))
        .expect("tight render");

    assert_eq!((full.width, full.height), (240, 160));
    assert!(cropped.width <= full.width);
    assert!(cropped.height <= full.height);
}

#[test]
fn renders_without_any_font() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("no-text.png");
    let renderer = ChartRenderer::new(config()).with_font(None);

    renderer.render(&line_spec(&path)).expect("render without text");
    assert_eq!(&fs::read(&path).expect("read png")[..8], PNG_SIGNATURE);
}

#[test]
fn overflowing_value_span_is_invalid() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("huge.png");
    let series = LineSeries::dense("s", &[0.0, 1.0], &[-1e308, 1e308]);
    let spec = ChartSpec::single(
        Plot::new("huge", LineChart::new(vec![series])),
        FigureSize::new(4.0, 3.0),
        &path,
    );

    assert!(matches!(
        render(&spec, &config()),
        Err(RenderError::InvalidSeries(_))
    ));
    assert!(!path.exists());
}

#[test]
fn oversized_figure_is_rejected_before_allocating() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("poster.png");
    let mut spec = line_spec(&path);
    spec.size = FigureSize::new(1e5, 1e5);

    let err = render(&spec, &RenderConfig::default()).expect_err("render should fail");

    assert!(matches!(err, RenderError::InvalidSeries(_)));
    assert!(files_in(dir.path()).is_empty());
}

#[test]
fn out_of_range_dpi_is_a_config_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("trend.png");
    let config = RenderConfig {
        dpi: u32::MAX,
        ..RenderConfig::default()
    };

    let err = ChartRenderer::new(config)
        .render(&line_spec(&path))
        .expect_err("render should fail");

    assert!(matches!(err, RenderError::Config(_)));
    assert!(!path.exists());
}
