//! Historical comparison charts: early web search, the first mobile internet
//! years and the GEO era side by side.

use super::{logistic, projected};
use crate::charts::{
    Annotation, BarChart, BarGroup, ChartSpec, Color, FigureSize, Grid, GridLines, Legend,
    LineChart, LineSeries, Marker, Milestone, PieChart, PieSlice, Plot, RadarChart, RadarSeries,
    StackLayer, StackedBarChart, TimelineChart, TimelineLane,
};
use std::path::Path;

/// One color per era: search, mobile, GEO.
const ERA_COLORS: [u32; 3] = [0xFF6B6B, 0x4ECDC4, 0x45B7D1];
const MARKERS: [Marker; 3] = [Marker::Circle, Marker::Square, Marker::Triangle];

fn era(index: usize) -> Color {
    Color::hex(ERA_COLORS[index])
}

fn labels(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Three line series sharing one x axis, styled per era.
fn era_lines(names: [&str; 3], xs: [&[f64]; 3], ys: [&[f64]; 3]) -> Vec<LineSeries> {
    (0..3)
        .map(|i| {
            LineSeries::dense(names[i], xs[i], ys[i])
                .with_color(era(i))
                .with_marker(MARKERS[i])
        })
        .collect()
}

/// Market share lines of one era's competitors.
fn share_lines(names: [&str; 3], colors: [Color; 3], years: &[f64], shares: [&[f64]; 3]) -> Vec<LineSeries> {
    (0..3)
        .map(|i| {
            LineSeries::dense(names[i], years, shares[i])
                .with_color(colors[i])
                .with_marker(MARKERS[i])
        })
        .collect()
}

fn adoption_timeline(dir: &Path) -> ChartSpec {
    let lane = |label: &str, years: [f64; 6], events: [&str; 6], adoption: [f64; 6], color: usize| {
        let milestones = years
            .iter()
            .zip(events)
            .zip(adoption)
            .map(|((&year, event), rate)| Milestone::new(year, event, rate))
            .collect();
        TimelineLane::new(label, milestones).with_color(era(color))
    };

    let lanes = vec![
        lane(
            "早期互联网搜索时代\n(1995-2005)",
            [1995.0, 1998.0, 2000.0, 2002.0, 2004.0, 2005.0],
            ["Yahoo目录上线", "Google成立", "AdWords推出", "Google超越竞对", "搜索广告成熟", "市场份额稳定"],
            [5.0, 15.0, 25.0, 45.0, 65.0, 75.0],
            0,
        ),
        lane(
            "移动互联网初期\n(2007-2012)",
            [2007.0, 2008.0, 2009.0, 2010.0, 2011.0, 2012.0],
            ["iPhone发布", "App Store上线", "3G网络普及", "iPhone 4发布", "智能机爆发", "市场成型"],
            [3.0, 8.0, 15.0, 25.0, 40.0, 55.0],
            1,
        ),
        lane(
            "GEO时代\n(2024至今)",
            [2022.0, 2023.0, 2024.0, 2024.3, 2024.6, 2025.0],
            ["ChatGPT发布", "GEO概念提出", "AI搜索普及", "工具生态形成", "企业大规模采用", "预测成熟期"],
            [1.0, 15.0, 35.0, 50.0, 65.0, 80.0],
            2,
        ),
    ];

    let plot = Plot::new(
        "三个技术时代发展时间线对比\n技术采用曲线与关键里程碑",
        TimelineChart::new(lanes).with_value_suffix("%"),
    )
    .with_x_label("年份")
    .with_x_range(1994.0, 2026.0)
    .with_y_range(-0.5, 2.5)
    .with_annotation(Annotation::note(
        "注：圆点大小表示技术采用率，百分比为各阶段的市场渗透率；GEO时代2025年为预测值",
    ));

    ChartSpec::single(plot, FigureSize::new(14.0, 8.0), dir.join("technology_adoption_timeline.png"))
}

fn market_share_evolution(dir: &Path) -> ChartSpec {
    let search = Plot::new(
        "早期搜索引擎市场\n(2000-2007)",
        LineChart::new(share_lines(
            ["Google", "Yahoo!", "其他"],
            [Color::hex(0x4285F4), Color::hex(0x7B68EE), Color::GRAY],
            &[2000.0, 2002.0, 2004.0, 2006.0, 2007.0],
            [
                &[0.0, 15.0, 35.0, 55.0, 64.0],
                &[60.0, 45.0, 35.0, 25.0, 19.0],
                &[40.0, 40.0, 30.0, 20.0, 17.0],
            ],
        )),
    )
    .with_x_label("年份")
    .with_y_label("市场份额 (%)")
    .with_y_range(0.0, 70.0);

    let mobile = Plot::new(
        "智能手机系统市场\n(2007-2012)",
        LineChart::new(share_lines(
            ["iOS", "Android", "其他"],
            [Color::hex(0x007AFF), Color::hex(0x34C759), Color::GRAY],
            &[2007.0, 2008.0, 2009.0, 2010.0, 2011.0, 2012.0],
            [
                &[100.0, 85.0, 65.0, 45.0, 35.0, 29.0],
                &[0.0, 5.0, 20.0, 35.0, 45.0, 47.0],
                &[0.0, 10.0, 15.0, 20.0, 20.0, 24.0],
            ],
        )),
    )
    .with_x_label("年份")
    .with_y_label("市场份额 (%)")
    .with_y_range(0.0, 110.0);

    let engines = ["ChatGPT", "Microsoft\nCopilot", "Google\nGemini", "Perplexity", "Claude AI", "其他"];
    let shares = [60.4, 14.1, 13.5, 6.5, 3.5, 2.0];
    let colors = [
        Color::hex(0x00A67E),
        Color::hex(0x0078D4),
        Color::hex(0x4285F4),
        Color::hex(0x20B2AA),
        Color::hex(0xFF6B6B),
        Color::GRAY,
    ];
    let slices = engines
        .iter()
        .zip(shares)
        .zip(colors)
        .map(|((name, share), color)| PieSlice::new(*name, share).with_color(color))
        .collect();
    let ai = Plot::new(
        "AI搜索引擎市场\n(2024年)",
        PieChart::new(slices).with_percent_color(Color::WHITE),
    );

    ChartSpec::multi(
        Grid::new(1, 3),
        vec![search, mobile, ai],
        FigureSize::new(16.0, 6.0),
        dir.join("market_share_evolution.png"),
    )
    .with_title("三个技术时代的市场格局演变")
}

fn development_speed(dir: &Path) -> ChartSpec {
    let phases = ["概念萌芽", "技术突破", "商业化", "大规模采用", "市场成熟"];
    // Years spent per phase, one row per technology
    let durations: [[f64; 5]; 3] = [
        [3.0, 2.0, 3.0, 3.0, 2.0],
        [0.5, 1.0, 1.5, 2.0, 1.0],
        [0.5, 1.0, 0.5, 1.0, 1.0],
    ];
    let layers = phases
        .iter()
        .enumerate()
        .map(|(p, phase)| StackLayer::new(*phase, durations.iter().map(|row| row[p]).collect()))
        .collect();
    let chart = StackedBarChart::new(labels(&["早期互联网搜索", "移动互联网", "GEO技术"]), layers)
        .with_unit("年")
        .with_total_prefix("总计: ")
        .with_segment_label_min(0.3)
        .with_total_fill(Color::hex(0xFFFF00).with_alpha(0.7));

    let totals = chart.totals();
    let longest = totals.iter().copied().fold(0.0, f64::max);
    let plot = Plot::new("三个技术时代发展速度对比\n从概念到市场成熟的时间周期", chart)
        .with_y_label("时间 (年)")
        .with_y_range(0.0, longest * 1.2)
        .with_legend(Legend::OutsideRight)
        .with_grid_lines(GridLines::YOnly)
        .with_annotation(Annotation::Arrow {
            from: (1.5, longest * 0.9),
            to: (2.0, totals[2]),
            text: Some("发展加速".into()),
            color: Color::RED,
        })
        .with_annotation(projected("GEO技术各阶段耗时为预计值"));

    ChartSpec::single(plot, FigureSize::new(12.0, 8.0), dir.join("development_speed_comparison.png"))
}

fn roi_business_impact(dir: &Path) -> ChartSpec {
    let maturity = Plot::new(
        "技术成熟度曲线对比",
        LineChart::new(era_lines(
            ["早期搜索引擎", "移动互联网", "GEO技术"],
            [
                &[0.0, 2.0, 5.0, 8.0, 10.0],
                &[0.0, 1.0, 2.5, 4.0, 5.0],
                &[0.0, 0.5, 1.5, 2.5, 4.0],
            ],
            [
                &[10.0, 30.0, 60.0, 85.0, 95.0],
                &[5.0, 25.0, 50.0, 80.0, 90.0],
                &[15.0, 40.0, 70.0, 85.0, 95.0],
            ],
        )),
    )
    .with_x_label("时间 (年)")
    .with_y_label("技术成熟度 (%)")
    .with_legend(Legend::LowerRight)
    .with_annotation(projected("GEO曲线为2024-2028预测"));

    let years = [1.0, 2.0, 3.0, 4.0, 5.0];
    let market = Plot::new(
        "市场规模增长对比",
        LineChart::new(era_lines(
            ["搜索广告市场", "移动应用市场", "GEO服务市场"],
            [&years, &years, &years],
            [
                &[10.0, 50.0, 150.0, 400.0, 800.0],
                &[5.0, 100.0, 500.0, 1200.0, 2000.0],
                &[1.0, 50.0, 200.0, 500.0, 1000.0],
            ],
        ))
        .log_y(),
    )
    .with_x_label("发展年数")
    .with_y_label("市场规模 (亿美元, 对数刻度)")
    .with_legend(Legend::LowerRight)
    .with_annotation(projected("GEO服务市场为预测数据"));

    let months: Vec<f64> = (0..=60).step_by(6).map(f64::from).collect();
    let curve = |max: f64, rate: f64, midpoint: f64| -> Vec<f64> {
        months.iter().map(|&m| logistic(m, max, rate, midpoint)).collect()
    };
    let (search, mobile, geo) = (curve(75.0, 0.15, 30.0), curve(90.0, 0.25, 24.0), curve(85.0, 0.35, 18.0));
    let adoption = Plot::new(
        "用户采用曲线对比",
        LineChart::new(
            era_lines(
                ["搜索引擎", "智能手机", "GEO策略"],
                [&months, &months, &months],
                [&search, &mobile, &geo],
            )
            .into_iter()
            .map(|s| s.with_marker(Marker::None))
            .collect(),
        ),
    )
    .with_x_label("时间 (月)")
    .with_y_label("用户采用率 (%)")
    .with_legend(Legend::LowerRight);

    let roi = [
        ("搜索引擎", [50.0, 150.0, 300.0, 250.0]),
        ("移动互联网", [25.0, 200.0, 400.0, 350.0]),
        ("GEO技术", [100.0, 300.0, 500.0, 450.0]),
    ];
    let groups = roi
        .iter()
        .enumerate()
        .map(|(i, (name, values))| BarGroup::new(*name, values.to_vec()).with_color(era(i).with_alpha(0.8)))
        .collect();
    let returns = Plot::new(
        "投资回报率对比",
        BarChart::new(labels(&["初期投资", "扩张期", "成熟期", "优化期"]), groups)
            .with_bar_width(0.75)
            .with_value_suffix("%"),
    )
    .with_x_label("投资阶段")
    .with_y_label("投资回报率 (%)")
    .with_legend(Legend::UpperLeft)
    .with_grid_lines(GridLines::YOnly)
    .with_annotation(projected("GEO技术回报率为预测数据"));

    ChartSpec::multi(
        Grid::new(2, 2),
        vec![maturity, market, adoption, returns],
        FigureSize::new(15.0, 12.0),
        dir.join("roi_business_impact_comparison.png"),
    )
    .with_title("技术商业化进程与投资回报对比分析")
}

fn comprehensive_radar(dir: &Path) -> ChartSpec {
    let categories = labels(&[
        "技术创新度", "市场影响力", "采用速度", "商业价值",
        "用户体验", "生态完整性", "竞争壁垒", "发展潜力",
    ]);
    let scores = [
        ("早期搜索引擎", [8.0, 9.0, 6.0, 8.0, 7.0, 7.0, 9.0, 6.0]),
        ("移动互联网", [9.0, 10.0, 8.0, 9.0, 9.0, 8.0, 8.0, 7.0]),
        ("GEO技术", [10.0, 8.0, 9.0, 9.0, 8.0, 6.0, 7.0, 10.0]),
    ];
    let series = scores
        .iter()
        .enumerate()
        .map(|(i, (name, values))| RadarSeries::new(*name, values.to_vec()).with_color(era(i)))
        .collect();
    let chart = RadarChart::new(categories, series, 10.0).with_rings(vec![2.0, 4.0, 6.0, 8.0, 10.0]);

    let plot = Plot::new("三个技术时代综合能力对比\n(雷达图评估)", chart).with_legend(Legend::LowerLeft);
    ChartSpec::single(plot, FigureSize::new(10.0, 10.0), dir.join("comprehensive_radar_comparison.png"))
}

/// The five historical comparison charts.
pub fn historical_comparison(output_dir: &Path) -> Vec<ChartSpec> {
    vec![
        adoption_timeline(output_dir),
        market_share_evolution(output_dir),
        development_speed(output_dir),
        roi_business_impact(output_dir),
        comprehensive_radar(output_dir),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ChartKind;

    #[test]
    fn development_totals_match_phase_sums() {
        let spec = development_speed(Path::new("out"));
        let ChartKind::StackedBar(chart) = &spec.panels[0].kind else {
            panic!("expected a stacked bar chart");
        };
        assert_eq!(chart.totals(), vec![13.0, 6.0, 4.0]);
        assert_eq!(chart.total_labels()[0], "总计: 13年");
    }

    #[test]
    fn adoption_curves_sample_every_six_months() {
        let spec = roi_business_impact(Path::new("out"));
        let ChartKind::Line(chart) = &spec.panels[2].kind else {
            panic!("expected a line chart");
        };
        assert_eq!(chart.series[0].points.len(), 11);
        assert_eq!(chart.series[0].points[10].0, 60.0);
        assert!(chart.series.iter().all(|s| s.marker == Marker::None));
    }

    #[test]
    fn radar_scores_match_categories() {
        let spec = comprehensive_radar(Path::new("out"));
        let ChartKind::Radar(chart) = &spec.panels[0].kind else {
            panic!("expected a radar chart");
        };
        assert!(chart.series.iter().all(|s| s.scores.len() == chart.categories.len()));
    }
}
