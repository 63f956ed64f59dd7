use std::sync::{Arc, Mutex};

use approx::assert_relative_eq;
use histogram_chart::api::{
    BarClick, BarClickCallback, HistogramCallbacks, HistogramChart, HistogramChartConfig,
    SuppressReason,
};
use histogram_chart::core::{
    BinId, BinnedSeries, BoundingBox, DataConverter, DefaultTheme, PlotRow, RelativePosition,
    Theme, color_for_index,
};
use histogram_chart::interaction::{SelectionGate, SelectionSet, SelectionState};
use histogram_chart::render::{Color, NullRenderer};

fn chart() -> HistogramChart<NullRenderer> {
    HistogramChart::new(NullRenderer::default(), HistogramChartConfig::default()).expect("chart")
}

fn three_bins() -> Arc<dyn DataConverter> {
    Arc::new(BinnedSeries::from_counts([
        ("0-10", 4.0),
        ("10-20", 9.0),
        ("20-30", 2.0),
    ]))
}

fn ready_chart() -> HistogramChart<NullRenderer> {
    let mut chart = chart();
    chart.set_converter(Some(three_bins()));
    chart.set_container_size(300.0, 200.0);
    chart
}

#[test]
fn absent_converter_produces_no_frame() {
    let mut chart = chart();
    chart.set_container_size(300.0, 200.0);

    assert!(chart.build_frame().is_none());
    assert_eq!(chart.readiness(), Err(SuppressReason::NotReady));
    assert!(chart.layout().is_none());
    assert_eq!(chart.footer_offset_left(), None);
    assert!(!chart.render().expect("render"));
    assert_eq!(chart.renderer().frames_rendered, 0);
}

#[test]
fn horizontal_only_converter_renders_horizontal_axis_and_baseline() {
    let mut chart = chart();
    chart.set_converter(Some(Arc::new(
        BinnedSeries::from_counts([("a", 1.0), ("b", 3.0)]).without_y_axis(),
    )));
    chart.set_container_size(300.0, 200.0);

    let frame = chart.build_frame().expect("frame");
    assert!(frame.x_axis.is_some());
    assert!(frame.y_axis.is_none());
    assert_eq!(frame.grid_lines().count(), 0);
    assert_eq!(frame.highlighted_bar_count(), 0);
    assert_eq!(frame.bars.len(), 2);
    assert_relative_eq!(frame.baseline.y1, frame.plot.bottom(), epsilon = 1e-9);
    assert_eq!(frame.baseline.color, DefaultTheme::default().baseline_color());
    assert!(frame.baseline.crisp_edges);
    assert!(frame.popup_menu.is_none());
}

#[test]
fn unmeasured_container_suppresses_frame() {
    let mut chart = chart();
    chart.set_converter(Some(three_bins()));

    assert_eq!(chart.readiness(), Err(SuppressReason::NotReady));
    assert!(chart.build_frame().is_none());

    chart.set_container_size(300.0, 0.0);
    assert!(chart.build_frame().is_none());

    chart.set_container_size(300.0, 200.0);
    assert_eq!(chart.readiness(), Ok(()));
    assert!(chart.build_frame().is_some());
}

#[test]
fn incorrect_data_suppresses_frame_and_footer() {
    let mut chart = chart();
    chart.set_converter(Some(Arc::new(BinnedSeries::new(vec![PlotRow::new(
        0,
        "broken",
        f64::NAN,
    )]))));
    chart.set_container_size(300.0, 200.0);

    assert_eq!(chart.readiness(), Err(SuppressReason::InvalidData));
    assert!(chart.build_frame().is_none());
    assert_eq!(chart.footer_offset_left(), None);

    chart.set_converter(Some(Arc::new(BinnedSeries::new(Vec::new()))));
    assert_eq!(chart.readiness(), Err(SuppressReason::InvalidData));
}

#[test]
fn render_hands_validated_frame_to_renderer() {
    let mut chart = ready_chart();

    assert!(chart.render().expect("render"));
    let renderer = chart.renderer();
    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_bar_count, 3);
    assert!(renderer.last_line_count > 0);
    assert!(renderer.last_text_count > 0);
}

#[test]
fn footer_offset_matches_value_axis_width() {
    let mut chart = ready_chart();
    let width = chart.layout().expect("layout").y1_axis.width;
    assert!(width > 0.0);
    assert_eq!(chart.footer_offset_left(), Some(width));

    let frame = chart.build_frame().expect("frame");
    assert_eq!(frame.footer_offset_left, width);
}

#[test]
fn bar_color_defaults_to_first_palette_entry() {
    let mut chart = ready_chart();
    let frame = chart.build_frame().expect("frame");
    assert!(frame.bars.iter().all(|bar| bar.rect.fill_color == color_for_index(0)));

    let accent = Color::rgb(0.2, 0.4, 0.6);
    chart
        .set_config(HistogramChartConfig::default().with_color(accent))
        .expect("config");
    let frame = chart.build_frame().expect("frame");
    assert!(frame.bars.iter().all(|bar| bar.rect.fill_color == accent));
}

#[test]
fn baseline_stroke_follows_device_pixel_ratio() {
    let mut chart = ready_chart();
    chart
        .set_config(HistogramChartConfig::default().with_device_pixel_ratio(2.0))
        .expect("config");
    let frame = chart.build_frame().expect("frame");
    assert_relative_eq!(frame.baseline.stroke_width, 0.5);
}

#[test]
fn selection_highlights_bars_and_respects_gate() {
    let mut chart = ready_chart();
    assert_eq!(chart.selection_state(), SelectionState::Empty);

    assert!(chart.add_bin(BinId(1)));
    let frame = chart.build_frame().expect("frame");
    assert_eq!(frame.highlighted_bar_count(), 1);
    assert!(frame.bars[1].highlighted);

    chart.deny_selection();
    assert_eq!(chart.selection_gate(), SelectionGate::Denied);
    assert!(!chart.add_bin(BinId(2)));
    assert!(!chart.remove_bin(BinId(1)));
    chart.clear_selection();
    assert_eq!(chart.selection_state(), SelectionState::Empty);

    chart.allow_selection();
    assert!(chart.add_bin(BinId(2)));
}

#[test]
fn externally_owned_selection_is_rendered() {
    let mut chart = ready_chart();
    chart.set_selected_bins([BinId(0), BinId(2)].into_iter().collect::<SelectionSet>());

    let frame = chart.build_frame().expect("frame");
    assert_eq!(frame.highlighted_bar_count(), 2);
    assert_eq!(chart.selection().last(), Some(BinId(2)));
}

#[test]
fn popup_menu_is_anchored_relative_to_root_container() {
    let mut chart = chart();
    chart
        .set_config(HistogramChartConfig::default().with_popup_menu(true))
        .expect("config");
    chart.set_converter(Some(three_bins()));
    chart.set_container_box(Some(BoundingBox::new(50.0, 20.0, 300.0, 200.0)));

    let frame = chart.build_frame().expect("frame");
    assert!(frame.popup_menu.is_none());

    chart.set_root_container_box(Some(BoundingBox::new(10.0, 10.0, 1024.0, 768.0)));
    assert_eq!(
        chart.relative_position(),
        Some(RelativePosition { x: 40.0, y: 10.0 })
    );
    let frame = chart.build_frame().expect("frame");
    let menu = frame.popup_menu.expect("popup");
    assert_eq!(menu.anchor, RelativePosition { x: 40.0, y: 10.0 });
    assert_eq!(menu.container, chart.container_size());
    assert!(!menu.selection_denied);
}

#[test]
fn hiding_popup_menu_reopens_selection_gate() {
    let mut chart = ready_chart();
    chart.set_popup_menu_visible(true);
    chart.deny_selection();
    assert_eq!(chart.selection_gate(), SelectionGate::Denied);

    chart.set_popup_menu_visible(false);
    assert_eq!(chart.selection_gate(), SelectionGate::Allowed);
}

#[test]
fn click_reports_bar_under_pointer_regardless_of_gate() {
    let clicks = Arc::new(Mutex::new(Vec::<BarClick>::new()));
    let on_bar_click: BarClickCallback = {
        let clicks = Arc::clone(&clicks);
        Arc::new(move |click| {
            if let Ok(mut clicks) = clicks.lock() {
                clicks.push(click);
            }
        })
    };
    let mut chart = ready_chart();
    chart.set_callbacks(HistogramCallbacks::default().with_on_bar_click(on_bar_click));
    chart.deny_selection();

    let layout = chart.layout().expect("layout");
    let x = layout.slot_x(1) + layout.slot_width() * 0.5;
    let y = layout.plot.y + layout.plot.height * 0.5;

    let click = chart.click_at(x, y).expect("click");
    assert_eq!(click.bin, BinId(1));
    assert_eq!(click.index, 1);
    assert_eq!(click.value, 9.0);
    assert!(chart.click_at(-5.0, -5.0).is_none());

    let recorded = clicks.lock().expect("lock").clone();
    assert_eq!(recorded, vec![click]);
}

#[test]
fn hover_cursor_tracks_pointer() {
    let mut chart = ready_chart();
    let layout = chart.layout().expect("layout");
    let x = layout.slot_x(2) + 1.0;
    let y = layout.plot.y + 1.0;

    chart.pointer_move(x, y);
    assert_eq!(chart.hovered_bin(), Some(2));
    let frame = chart.build_frame().expect("frame");
    let cursor = frame.cursor.expect("cursor");
    assert_relative_eq!(cursor.x, layout.slot_x(2), epsilon = 1e-9);
    assert_relative_eq!(cursor.width, layout.slot_width(), epsilon = 1e-9);
    assert_relative_eq!(cursor.height, layout.plot.height, epsilon = 1e-9);

    chart.pointer_leave();
    assert_eq!(chart.hovered_bin(), None);
    assert!(chart.build_frame().expect("frame").cursor.is_none());
}

#[test]
fn custom_theme_colors_flow_into_frame() {
    let theme = DefaultTheme {
        grey4: Color::rgb(0.1, 0.1, 0.1),
        grey6: Color::rgb(0.5, 0.0, 0.0),
        grey8: Color::rgb(0.0, 0.0, 0.5),
    };
    let mut chart = ready_chart();
    chart.set_theme(Arc::new(theme));

    let frame = chart.build_frame().expect("frame");
    assert_eq!(frame.baseline.color, theme.baseline_color());
    assert!(frame.grid_lines().all(|line| line.color == theme.grid_color()));
    assert!(frame.texts().all(|text| text.color == theme.axis_label_color()));
}

#[test]
fn invalid_config_is_rejected() {
    let err = HistogramChart::new(
        NullRenderer::default(),
        HistogramChartConfig::default().with_text_size(0.0),
    )
    .err()
    .expect("must reject");
    assert!(format!("{err}").contains("text size"));

    let mut chart = chart();
    assert!(
        chart
            .set_config(HistogramChartConfig::default().with_device_pixel_ratio(f64::NAN))
            .is_err()
    );
    assert_eq!(chart.config(), &HistogramChartConfig::default());
}

fn chart_over(values: &[f64]) -> HistogramChart<NullRenderer> {
    let mut chart = chart();
    let converter: Arc<dyn DataConverter> = Arc::new(BinnedSeries::from_counts(
        values
            .iter()
            .enumerate()
            .map(|(index, value)| (format!("b{index}"), *value)),
    ));
    chart.set_converter(Some(converter));
    chart.set_container_size(300.0, 200.0);
    chart
}

#[test]
fn values_near_f64_limits_render_a_finite_frame() {
    let mut chart = chart_over(&[-1e308, 1e308]);

    let layout = chart.layout().expect("layout");
    let (lo, hi) = layout.y1_axis.domain;
    assert!(lo.is_finite() && hi.is_finite() && lo < hi);
    assert!(layout.y1_axis.ticks.iter().all(|tick| tick.y.is_finite()));

    assert!(chart.render().expect("render"));
    assert_eq!(chart.renderer().last_bar_count, 2);
}

#[test]
fn tiny_values_keep_a_non_empty_domain() {
    let mut chart = chart_over(&[1e-13, 2e-13, 3e-13]);

    let layout = chart.layout().expect("layout");
    let (lo, hi) = layout.y1_axis.domain;
    assert!(lo < hi);
    assert!(hi >= 3e-13);
    assert!(layout.y1_axis.ticks.len() >= 2);
    assert!(layout.y1_axis.ticks.iter().all(|tick| tick.y.is_finite()));

    assert!(chart.render().expect("render"));
}
