//! GEO technology trend charts: market sizes, growth rates, adoption stages,
//! application domains, regions and the maturity/potential matrix.

use super::projected;
use crate::charts::{
    Annotation, BarChart, BarGroup, BubbleChart, BubblePoint, ChartSpec, Color, ColorScale,
    FigureSize, Grid, GridLines, Legend, LineChart, LineSeries, Marker, PieChart, PieSlice, Plot,
    SizeScale,
};
use std::path::Path;

const BAR_ALPHA: f64 = 0.8;

fn labels(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn colors(values: &[u32], alpha: f64) -> Vec<Color> {
    values.iter().map(|&v| Color::hex(v).with_alpha(alpha)).collect()
}

fn market_size(dir: &Path) -> ChartSpec {
    let geo = LineSeries::dense(
        "GEO整体市场 (中国)",
        &[2019.0, 2022.0, 2024.0, 2025.0, 2028.0],
        &[7.2, 11.4, 16.7, 14.5, 36.5],
    )
    .with_color(Color::hex(0x2E86AB))
    .with_width(3.0)
    .with_value_labels("$", "B");
    let analytics = LineSeries::dense("地理空间分析市场 (全球)", &[2024.0, 2034.0], &[38.3, 118.1])
        .with_color(Color::hex(0xA23B72))
        .with_marker(Marker::Square)
        .with_width(3.0);
    let mobile = LineSeries::dense("移动GIS市场 (全球)", &[2024.0, 2033.0], &[6.66, 12.7])
        .with_color(Color::hex(0xF18F01))
        .with_marker(Marker::Triangle)
        .with_width(3.0);

    let plot = Plot::new(
        "GEO技术各细分市场规模发展趋势",
        LineChart::new(vec![geo, analytics, mobile]),
    )
    .with_x_label("年份")
    .with_y_label("市场规模 (十亿美元)")
    .with_legend(Legend::LowerRight)
    .with_annotation(projected("2025年以后的数值为预测值"));

    ChartSpec::single(plot, FigureSize::new(12.0, 8.0), dir.join("geo_market_size_trends.png"))
}

fn cagr_comparison(dir: &Path) -> ChartSpec {
    let cagrs = [189.8, 13.6, 12.4, 7.5];
    let periods = ["2024-2028", "2025-2034", "2022-2025", "2025-2033"];
    let bar_labels = cagrs
        .iter()
        .zip(periods)
        .map(|(cagr, period)| format!("{}%\n({})", cagr, period))
        .collect();

    let group = BarGroup::new("", cagrs.to_vec())
        .with_bar_colors(colors(&[0xFF6B6B, 0x4ECDC4, 0x45B7D1, 0x96CEB4], BAR_ALPHA))
        .with_bar_labels(bar_labels);
    let chart = BarChart::new(
        labels(&["GEO整体市场\n(中国)", "地理空间分析\n(全球)", "GIS市场\n(全球)", "移动GIS\n(全球)"]),
        vec![group],
    )
    .with_edge_color(Color::BLACK);

    let plot = Plot::new("GEO技术各细分市场复合年增长率对比", chart)
        .with_x_label("市场类型")
        .with_y_label("复合年增长率 (%)")
        .with_y_range(0.0, 189.8 * 1.2)
        .with_grid_lines(GridLines::YOnly)
        .with_annotation(projected("增长率区间包含预测年份"));

    ChartSpec::single(plot, FigureSize::new(10.0, 6.0), dir.join("geo_cagr_comparison.png"))
}

fn adoption_stages(dir: &Path) -> ChartSpec {
    let stage_colors = ColorScale::Viridis
        .spread(4, 0.2, 0.9)
        .into_iter()
        .map(|c| c.with_alpha(BAR_ALPHA))
        .collect();
    let group = BarGroup::new("", vec![20.0, 45.0, 75.0, 95.0]).with_bar_colors(stage_colors);
    let chart = BarChart::new(
        labels(&[
            "数据挖掘阶段\n(2000-2010)",
            "机器学习阶段\n(2010-2020)",
            "大模型阶段\n(2020-2025)",
            "智能化阶段\n(2025-2030)",
        ]),
        vec![group],
    )
    .with_value_suffix("%")
    .with_edge_color(Color::BLACK)
    .with_stage_arrows();

    let plot = Plot::new("GEO技术发展阶段与采用率演进", chart)
        .with_x_label("技术发展阶段")
        .with_y_label("技术采用率 (%)")
        .with_y_range(0.0, 100.0)
        .with_grid_lines(GridLines::YOnly)
        .with_annotation(projected("智能化阶段采用率为预测值"));

    ChartSpec::single(
        plot,
        FigureSize::new(12.0, 6.0),
        dir.join("geo_technology_adoption_timeline.png"),
    )
}

fn application_domains(dir: &Path) -> ChartSpec {
    let domains = ["智慧城市", "交通运输", "农业监测", "环境保护", "国防安全", "商业智能", "应急管理", "其他"];
    let shares = [18.0, 15.0, 12.0, 12.0, 10.0, 10.0, 8.0, 15.0];
    let palette = [
        0xFF9999, 0x66B2FF, 0x99FF99, 0xFFCC99, 0xFF99CC, 0x99CCFF, 0xFFB366, 0xB3B3FF,
    ];
    let slices = domains
        .iter()
        .zip(shares)
        .zip(palette)
        .map(|((domain, share), color)| PieSlice::new(*domain, share).with_color(Color::hex(color)))
        .collect();

    let chart = PieChart::new(slices)
        .explode_from(15.0)
        .with_percent_color(Color::WHITE);
    let plot = Plot::new("GEO技术主要应用领域市场分布", chart);
    ChartSpec::single(plot, FigureSize::new(10.0, 8.0), dir.join("geo_application_domains.png"))
}

fn regional_comparison(dir: &Path) -> ChartSpec {
    let regions = labels(&["北美", "亚太地区", "欧洲", "拉丁美洲", "中东非洲"]);
    let panel = |title: &str, y_label: &str, values: Vec<f64>, palette: &[u32]| {
        let group = BarGroup::new("", values).with_bar_colors(colors(palette, BAR_ALPHA));
        let chart = BarChart::new(regions.clone(), vec![group])
            .with_value_suffix("%")
            .with_edge_color(Color::BLACK);
        Plot::new(title, chart)
            .with_x_label("地区")
            .with_y_label(y_label)
    };

    let shares = panel(
        "2024年全球GEO技术市场地区分布",
        "市场份额 (%)",
        vec![45.0, 25.0, 20.0, 6.0, 4.0],
        &[0xFF6B6B, 0x4ECDC4, 0x45B7D1, 0x96CEB4, 0xFFEAA7],
    );
    let growth = panel(
        "各地区预期增长率对比",
        "预期增长率 (%)",
        vec![12.0, 16.0, 10.0, 14.0, 18.0],
        &[0xE17055, 0x00B894, 0x0984E3, 0x6C5CE7, 0xFDCB6E],
    )
    .with_annotation(projected("增长率为预期值"));

    ChartSpec::multi(
        Grid::new(1, 2),
        vec![shares, growth],
        FigureSize::new(15.0, 6.0),
        dir.join("geo_regional_market_comparison.png"),
    )
}

fn trend_matrix(dir: &Path) -> ChartSpec {
    let technologies = [
        "AI/机器学习", "云端GIS", "移动GIS", "实时分析", "3D可视化",
        "边缘计算", "量子计算", "IoT集成", "区块链", "数字孪生",
    ];
    let current = [85.0, 90.0, 80.0, 75.0, 70.0, 60.0, 30.0, 85.0, 40.0, 65.0];
    let future = [95.0, 85.0, 90.0, 95.0, 90.0, 85.0, 80.0, 90.0, 70.0, 95.0];

    // Size tracks the maturity gap, color the future potential
    let points = technologies
        .iter()
        .zip(current.iter().zip(future))
        .map(|(tech, (&c, f))| BubblePoint::new(*tech, c, f, f - c, f))
        .collect();
    let chart = BubbleChart::new(
        points,
        SizeScale {
            factor: 20.0,
            offset: 0.0,
        },
        ColorScale::RdYlGn,
    )
    .with_color_domain(0.0, 100.0);

    let quadrant = |text: &str, at: (f64, f64), fill: u32| Annotation::boxed(text, at, Color::hex(fill));
    let plot = Plot::new("GEO技术发展成熟度与未来潜力矩阵", chart)
        .with_x_label("当前技术成熟度")
        .with_y_label("未来发展潜力")
        .with_x_range(20.0, 100.0)
        .with_y_range(60.0, 100.0)
        .with_legend(Legend::LowerRight)
        .with_annotation(Annotation::ReferenceLine {
            from: (0.0, 0.0),
            to: (100.0, 100.0),
            label: Some("成熟度=潜力线".into()),
            color: Color::BLACK.with_alpha(0.5),
        })
        .with_annotation(quadrant("高潜力\n低成熟度", (25.0, 95.0), 0xADD8E6))
        .with_annotation(quadrant("高潜力\n高成熟度", (95.0, 95.0), 0x90EE90))
        .with_annotation(quadrant("低潜力\n低成熟度", (25.0, 65.0), 0xF08080))
        .with_annotation(quadrant("低潜力\n高成熟度", (95.0, 65.0), 0xFFFFE0));

    ChartSpec::single(plot, FigureSize::new(12.0, 9.0), dir.join("geo_technology_trend_matrix.png"))
}

/// The six GEO trend charts.
pub fn geo_trends(output_dir: &Path) -> Vec<ChartSpec> {
    vec![
        market_size(output_dir),
        cagr_comparison(output_dir),
        adoption_stages(output_dir),
        application_domains(output_dir),
        regional_comparison(output_dir),
        trend_matrix(output_dir),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ChartKind;

    #[test]
    fn matrix_bubbles_scale_with_maturity_gap() {
        let spec = trend_matrix(Path::new("out"));
        let ChartKind::Bubble(chart) = &spec.panels[0].kind else {
            panic!("expected a bubble chart");
        };
        // 量子计算: |80 - 30| * 20
        assert_eq!(chart.bubble_area(&chart.points[6]), 1000.0);
        // 云端GIS: |85 - 90| * 20
        assert_eq!(chart.bubble_area(&chart.points[1]), 100.0);
    }

    #[test]
    fn domain_shares_sum_to_one_hundred() {
        let spec = application_domains(Path::new("out"));
        let ChartKind::Pie(pie) = &spec.panels[0].kind else {
            panic!("expected a pie chart");
        };
        let sum: f64 = pie.percentages().iter().sum();
        assert!((sum - 100.0).abs() <= 0.1);
        let exploded = pie.slices.iter().filter(|s| pie.is_exploded(s)).count();
        assert_eq!(exploded, 3);
    }

    #[test]
    fn cagr_labels_carry_periods() {
        let spec = cagr_comparison(Path::new("out"));
        let ChartKind::Bar(bar) = &spec.panels[0].kind else {
            panic!("expected a bar chart");
        };
        assert_eq!(bar.groups[0].bar_labels[0], "189.8%\n(2024-2028)");
    }
}
