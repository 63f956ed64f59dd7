use histogram_chart::api::{AxisSettings, BAR_GAP_RATIO, DEFAULT_TEXT_SIZE_PX, HistogramChartConfig};
use histogram_chart::core::PaletteWrap;
use histogram_chart::render::Color;
use histogram_chart::ChartError;

#[test]
fn config_json_round_trip_preserves_values() {
    let config = HistogramChartConfig::default()
        .with_text_size(14.0)
        .with_x_axis(AxisSettings::default().with_title("Latency, ms"))
        .with_y_axis(AxisSettings::default().with_show_ticks(false))
        .with_color(Color::rgb(0.25, 0.5, 0.75))
        .with_popup_menu(true)
        .with_device_pixel_ratio(2.0)
        .with_bar_gap_ratio(0.2)
        .with_palette_wrap(PaletteWrap::Clamp);

    let json = config.to_json_pretty().expect("serialize");
    let restored = HistogramChartConfig::from_json_str(&json).expect("parse");
    assert_eq!(restored, config);
}

#[test]
fn missing_fields_take_defaults() {
    let config = HistogramChartConfig::from_json_str("{}").expect("parse");
    assert_eq!(config, HistogramChartConfig::default());
    assert_eq!(config.text_size, DEFAULT_TEXT_SIZE_PX);
    assert_eq!(config.bar_gap_ratio, BAR_GAP_RATIO);
    assert_eq!(config.device_pixel_ratio, 1.0);
    assert!(!config.is_show_popup_menu);
    assert!(config.color.is_none());
    assert_eq!(config.palette_wrap, PaletteWrap::Cycle);
    assert!(config.x_axis.visible && config.x_axis.show_ticks);
}

#[test]
fn partial_axis_settings_take_defaults() {
    let config =
        HistogramChartConfig::from_json_str(r#"{ "y_axis": { "title": "Count" } }"#).expect("parse");
    assert!(config.y_axis.visible);
    assert!(config.y_axis.show_ticks);
    assert_eq!(config.y_axis.title.as_deref(), Some("Count"));
}

#[test]
fn invalid_json_is_reported_as_settings_error() {
    let err = HistogramChartConfig::from_json_str("{ not json").expect_err("must fail");
    assert!(matches!(err, ChartError::InvalidSettings(_)));
    assert!(format!("{err}").contains("failed to parse config"));
}

#[test]
fn out_of_range_values_are_rejected() {
    for json in [
        r#"{ "text_size": -1.0 }"#,
        r#"{ "device_pixel_ratio": 0.0 }"#,
        r#"{ "bar_gap_ratio": 0.95 }"#,
        r#"{ "color": { "red": 2.0, "green": 0.0, "blue": 0.0, "alpha": 1.0 } }"#,
    ] {
        let err = HistogramChartConfig::from_json_str(json).expect_err("must reject");
        assert!(matches!(err, ChartError::InvalidSettings(_)), "{json}: {err}");
    }
}
