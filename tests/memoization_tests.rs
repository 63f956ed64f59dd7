use std::sync::Arc;

use histogram_chart::api::{AxisSettings, HistogramChart, HistogramChartConfig, MemoStats};
use histogram_chart::core::{BinnedSeries, DefaultTheme};
use histogram_chart::render::{Color, NullRenderer};

fn ready_chart() -> HistogramChart<NullRenderer> {
    let mut chart =
        HistogramChart::new(NullRenderer::default(), HistogramChartConfig::default())
            .expect("chart");
    chart.set_converter(Some(Arc::new(BinnedSeries::from_counts([
        ("a", 1.0),
        ("b", 5.0),
    ]))));
    chart.set_container_size(300.0, 200.0);
    chart
}

#[test]
fn unchanged_inputs_reuse_layout_and_axes() {
    let mut chart = ready_chart();
    chart.build_frame().expect("frame");
    chart.build_frame().expect("frame");

    assert_eq!(chart.layout_memo_stats(), MemoStats { hits: 1, misses: 1 });
    assert_eq!(chart.axis_memo_stats(), MemoStats { hits: 1, misses: 1 });
}

#[test]
fn reused_layout_is_the_same_allocation() {
    let mut chart = ready_chart();
    let first = chart.layout().expect("layout");
    let second = chart.layout().expect("layout");
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn container_resize_recomputes_layout_and_axes() {
    let mut chart = ready_chart();
    let before = chart.build_frame().expect("frame");
    chart.set_container_size(600.0, 200.0);
    let after = chart.build_frame().expect("frame");

    assert_eq!(chart.layout_memo_stats(), MemoStats { hits: 0, misses: 2 });
    assert_eq!(chart.axis_memo_stats(), MemoStats { hits: 0, misses: 2 });
    assert!(after.plot.width > before.plot.width);

    // Same size again is a no-op for the cache key.
    chart.set_container_size(600.0, 200.0);
    chart.build_frame().expect("frame");
    assert_eq!(chart.layout_memo_stats().hits, 1);
}

#[test]
fn new_converter_invalidates_layout() {
    let mut chart = ready_chart();
    chart.build_frame().expect("frame");
    chart.set_converter(Some(Arc::new(BinnedSeries::from_counts([("a", 1.0)]))));
    let frame = chart.build_frame().expect("frame");

    assert_eq!(chart.layout_memo_stats().misses, 2);
    assert_eq!(frame.bars.len(), 1);
}

#[test]
fn theme_change_rebuilds_axes_only() {
    let mut chart = ready_chart();
    chart.build_frame().expect("frame");
    chart.set_theme(Arc::new(DefaultTheme::default()));
    chart.build_frame().expect("frame");

    assert_eq!(chart.layout_memo_stats(), MemoStats { hits: 1, misses: 1 });
    assert_eq!(chart.axis_memo_stats(), MemoStats { hits: 0, misses: 2 });
}

#[test]
fn non_geometry_config_change_keeps_layout() {
    let mut chart = ready_chart();
    chart.build_frame().expect("frame");
    chart
        .set_config(HistogramChartConfig::default().with_color(Color::rgb(1.0, 0.0, 0.0)))
        .expect("config");
    chart.build_frame().expect("frame");
    assert_eq!(chart.layout_memo_stats(), MemoStats { hits: 1, misses: 1 });

    chart
        .set_config(
            HistogramChartConfig::default().with_y_axis(AxisSettings::default().with_title("n")),
        )
        .expect("config");
    chart.build_frame().expect("frame");
    assert_eq!(chart.layout_memo_stats(), MemoStats { hits: 1, misses: 2 });
}
