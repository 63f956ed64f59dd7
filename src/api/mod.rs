mod axis;
mod bars;
mod callbacks;
mod chart;
mod config;
mod memo;
mod settings;
mod sizing;

pub use axis::{
    AxisDescriptor, AxisOrientation, AxisTickDescriptor, build_x_axis, build_y_axis,
};
pub use bars::{
    BAR_GAP_RATIO, BarGeometry, DIMMED_BAR_ALPHA, HistogramBar, MAX_BAR_GAP_RATIO, bar_info,
    bar_info_with_gap_ratio, build_bars, stroke_width_for_scale,
};
pub use callbacks::{BarClick, BarClickCallback, HistogramCallbacks};
pub use chart::{HistogramChart, SuppressReason};
pub use config::HistogramChartConfig;
pub use memo::MemoStats;
pub use settings::{
    AxisSettings, DEFAULT_TEXT_SIZE_PX, GeometrySettings, LegendPosition, LegendSettings,
    ValueLabelsSettings, resolve_geometry_settings,
};
pub use sizing::{
    LayoutRecord, MAX_LAYOUT_PASSES, ValueTick, XAxisLayout, YAxisLayout, compute_layout,
};
