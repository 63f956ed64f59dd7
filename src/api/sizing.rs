use smallvec::SmallVec;
use tracing::{trace, warn};

use crate::core::ticks::{
    VALUE_AXIS_MAX_TICKS, VALUE_AXIS_MIN_TICKS, VALUE_AXIS_TARGET_SPACING_PX,
    axis_tick_target_count,
};
use crate::core::{
    ContainerSize, DataConverter, Margin, PlotArea, PlotRow, estimate_label_text_width_px,
    format_tick_label, nice_ticks, widest_label_px,
};

use super::settings::{GeometrySettings, LegendPosition, sanitize_text_size};

/// Upper bound on sizing passes; axis reservations only grow, so real inputs
/// settle in two or three.
pub const MAX_LAYOUT_PASSES: u8 = 6;

pub(crate) const AXIS_TICK_SIZE_PX: f64 = 4.0;
pub(crate) const AXIS_LABEL_GAP_PX: f64 = 6.0;
pub(crate) const AXIS_TITLE_GAP_PX: f64 = 4.0;
const PLOT_PADDING_TOP_PX: f64 = 4.0;
const PLOT_PADDING_SIDE_PX: f64 = 8.0;
const X_LABEL_MIN_SPACING_PX: f64 = 6.0;
const LEGEND_BAND_PADDING_PX: f64 = 8.0;
const VALUE_LABEL_BAND_PADDING_PX: f64 = 4.0;

/// One labelled tick on the value axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueTick {
    pub value: f64,
    pub label: String,
    /// Pixel y of the tick inside the container.
    pub y: f64,
}

/// Resolved vertical (value) axis.
#[derive(Debug, Clone, PartialEq)]
pub struct YAxisLayout {
    pub visible: bool,
    /// Horizontal space reserved left of the plot; zero when hidden.
    pub width: f64,
    pub is_show_ticks: bool,
    pub ticks: SmallVec<[ValueTick; 12]>,
    /// Value range mapped onto the plot height.
    pub domain: (f64, f64),
    pub step: f64,
    pub title: Option<String>,
}

/// Resolved horizontal (bin) axis.
#[derive(Debug, Clone, PartialEq)]
pub struct XAxisLayout {
    pub visible: bool,
    /// Vertical space reserved below the plot; zero when hidden.
    pub height: f64,
    pub is_show_labels: bool,
    pub is_show_ticks: bool,
    /// Every `label_step`-th bin gets a label.
    pub label_step: usize,
    pub title: Option<String>,
}

/// Output of the sizing engine for one container size.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutRecord {
    pub container: ContainerSize,
    pub text_size: f64,
    pub margin: Margin,
    pub plot: PlotArea,
    pub y1_axis: YAxisLayout,
    pub x1_axis: XAxisLayout,
    pub bin_count: usize,
    /// Sizing passes used to settle the axis reservations.
    pub passes: u8,
    pub converged: bool,
}

impl LayoutRecord {
    /// `false` for records computed against an unmeasured container.
    #[must_use]
    pub fn is_paintable(&self) -> bool {
        self.container.is_measured()
    }

    /// Maps a data value to a pixel y, clamped into the plot.
    #[must_use]
    pub fn value_to_y(&self, value: f64) -> f64 {
        let (lo, hi) = self.y1_axis.domain;
        let span = hi - lo;
        if !value.is_finite() || span <= 0.0 {
            return self.plot.bottom();
        }
        let ratio = ((value - lo) / span).clamp(0.0, 1.0);
        self.plot.bottom() - ratio * self.plot.height
    }

    /// Pixel y of the zero-value reference line.
    #[must_use]
    pub fn baseline_y(&self) -> f64 {
        self.value_to_y(0.0)
    }

    /// Horizontal span allotted to each bin.
    #[must_use]
    pub fn slot_width(&self) -> f64 {
        if self.bin_count == 0 {
            0.0
        } else {
            self.plot.width / self.bin_count as f64
        }
    }

    /// Left edge of the slot for `index`.
    #[must_use]
    pub fn slot_x(&self, index: usize) -> f64 {
        self.plot.x + self.slot_width() * index as f64
    }

    /// Bin index whose slot contains the point, if any.
    #[must_use]
    pub fn bin_at(&self, x: f64, y: f64) -> Option<usize> {
        let slot = self.slot_width();
        if slot <= 0.0 || !self.plot.contains(x, y) {
            return None;
        }
        let index = ((x - self.plot.x) / slot).floor() as usize;
        Some(index.min(self.bin_count - 1))
    }
}

/// Computes margins, axis reservations and the plot rectangle.
///
/// Returns `None` while no converter is available. The axis label width
/// depends on the plot height (tick count) and the horizontal label density
/// depends on the plot width (which depends on that label width); both
/// reservations are resolved by repeated passes in which they may only grow,
/// which rules out oscillation.
#[must_use]
pub fn compute_layout(
    settings: &GeometrySettings,
    converter: Option<&dyn DataConverter>,
    container_width: f64,
    container_height: f64,
) -> Option<LayoutRecord> {
    let converter = converter?;
    let container = ContainerSize::new(container_width, container_height);
    let text_size = sanitize_text_size(settings.text_size);
    let rows = converter.chart_data();
    let bin_count = rows.len();

    let x1 = converter.x1_data();
    let y1 = converter.y1_data();
    let x_visible = x1.is_some() && settings.x_axis.visible;
    let y_visible = y1.is_some() && settings.y_axis.visible;
    let x_title = settings
        .x_axis
        .title
        .clone()
        .or_else(|| x1.and_then(|data| data.title.clone()));
    let y_title = settings
        .y_axis
        .title
        .clone()
        .or_else(|| y1.and_then(|data| data.title.clone()));

    let value_domain = y1
        .and_then(|data| data.numeric_domain())
        .filter(|(min, max)| min.is_finite() && max.is_finite())
        .unwrap_or_else(|| rows_domain(rows));

    let widest_category = match x1.map(|data| data.category_labels()) {
        Some(labels) if !labels.is_empty() => {
            widest_label_px(labels.iter().map(String::as_str), text_size)
        }
        _ => widest_label_px(rows.iter().map(|row| row.label.as_str()), text_size),
    };

    let reserve = fixed_reservations(settings, text_size, y_visible, y_title.as_deref());
    let state_input = PassInput {
        container,
        text_size,
        reserve,
        value_domain,
        bin_count,
        x_visible,
        y_visible,
        x_has_title: x_title.is_some(),
        y_has_title: y_title.is_some(),
        widest_category,
    };

    let mut state = PassState {
        y_width: if y_visible {
            AXIS_TICK_SIZE_PX + AXIS_LABEL_GAP_PX + text_size
        } else {
            0.0
        },
        label_step: 1,
        x_labels_shown: x_visible && bin_count > 0,
    };
    let mut passes = 0;
    let mut converged = false;
    while passes < MAX_LAYOUT_PASSES {
        passes += 1;
        let next = state_input.next_state(state);
        trace!(
            pass = passes,
            y_width = next.y_width,
            label_step = next.label_step,
            x_labels_shown = next.x_labels_shown,
            "layout sizing pass"
        );
        if next == state {
            converged = true;
            break;
        }
        state = next;
    }
    if !converged {
        warn!(
            passes,
            width = container.width,
            height = container.height,
            "layout sizing did not settle; using last reservations"
        );
    }

    let (margin, plot) = state_input.arrange(state);
    let ticks = nice_ticks(
        value_domain.0,
        value_domain.1,
        value_tick_target(plot.height),
    );
    let map_y = |value: f64| {
        let (lo, hi) = ticks.domain;
        let span = hi - lo;
        if !span.is_finite() || span <= 0.0 {
            return plot.bottom();
        }
        plot.bottom() - (value - lo) / span * plot.height
    };
    let tick_list: SmallVec<[ValueTick; 12]> = if y_visible {
        ticks
            .values
            .iter()
            .map(|value| ValueTick {
                value: *value,
                label: format_tick_label(*value, ticks.step),
                y: map_y(*value),
            })
            .collect()
    } else {
        SmallVec::new()
    };
    let is_show_ticks = y_visible
        && settings.y_axis.show_ticks
        && tick_list.len() >= 2
        && plot.height >= text_size;

    Some(LayoutRecord {
        container,
        text_size,
        margin,
        plot,
        y1_axis: YAxisLayout {
            visible: y_visible,
            width: state.y_width,
            is_show_ticks,
            ticks: tick_list,
            domain: ticks.domain,
            step: ticks.step,
            title: y_title,
        },
        x1_axis: XAxisLayout {
            visible: x_visible,
            height: state_input.x_axis_height(state.x_labels_shown),
            is_show_labels: state.x_labels_shown,
            is_show_ticks: x_visible && settings.x_axis.show_ticks,
            label_step: state.label_step,
            title: x_title,
        },
        bin_count,
        passes,
        converged,
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PassState {
    y_width: f64,
    label_step: usize,
    x_labels_shown: bool,
}

#[derive(Debug, Clone, Copy)]
struct PassInput {
    container: ContainerSize,
    text_size: f64,
    reserve: Margin,
    value_domain: (f64, f64),
    bin_count: usize,
    x_visible: bool,
    y_visible: bool,
    x_has_title: bool,
    y_has_title: bool,
    widest_category: f64,
}

impl PassInput {
    fn x_axis_height(&self, labels_shown: bool) -> f64 {
        if !self.x_visible {
            return 0.0;
        }
        let mut height = AXIS_TICK_SIZE_PX;
        if labels_shown {
            height += AXIS_LABEL_GAP_PX + self.text_size;
        }
        if self.x_has_title {
            height += AXIS_TITLE_GAP_PX + self.text_size;
        }
        height
    }

    fn arrange(&self, state: PassState) -> (Margin, PlotArea) {
        let margin = Margin {
            top: self.reserve.top,
            right: self.reserve.right,
            bottom: self.reserve.bottom + self.x_axis_height(state.x_labels_shown),
            left: self.reserve.left + state.y_width.max(PLOT_PADDING_SIDE_PX),
        };
        let plot = PlotArea {
            x: margin.left,
            y: margin.top,
            width: (self.container.width - margin.left - margin.right).max(0.0),
            height: (self.container.height - margin.top - margin.bottom).max(0.0),
        };
        (margin, plot)
    }

    fn next_state(&self, state: PassState) -> PassState {
        let (_, plot) = self.arrange(state);

        let required_y_width = if self.y_visible {
            let ticks = nice_ticks(
                self.value_domain.0,
                self.value_domain.1,
                value_tick_target(plot.height),
            );
            let widest = ticks
                .values
                .iter()
                .map(|value| {
                    estimate_label_text_width_px(
                        &format_tick_label(*value, ticks.step),
                        self.text_size,
                    )
                })
                .fold(0.0, f64::max);
            let title = if self.y_has_title {
                self.text_size + AXIS_TITLE_GAP_PX
            } else {
                0.0
            };
            (AXIS_TICK_SIZE_PX + AXIS_LABEL_GAP_PX + widest + title).ceil()
        } else {
            0.0
        };

        let (required_step, fits) =
            x_label_density(plot.width, self.bin_count, self.widest_category);

        PassState {
            y_width: state.y_width.max(required_y_width),
            label_step: state.label_step.max(required_step),
            x_labels_shown: state.x_labels_shown && fits,
        }
    }
}

fn fixed_reservations(
    settings: &GeometrySettings,
    text_size: f64,
    y_visible: bool,
    series_name: Option<&str>,
) -> Margin {
    let mut reserve = Margin {
        top: if y_visible {
            PLOT_PADDING_TOP_PX.max((text_size * 0.5).ceil())
        } else {
            PLOT_PADDING_TOP_PX
        },
        right: PLOT_PADDING_SIDE_PX,
        bottom: 0.0,
        left: 0.0,
    };

    if settings.value_labels.enabled {
        reserve.top += text_size + VALUE_LABEL_BAND_PADDING_PX;
        if settings.value_labels.show_total {
            reserve.top += text_size + VALUE_LABEL_BAND_PADDING_PX;
        }
    }

    let legend_band = text_size + LEGEND_BAND_PADDING_PX;
    let legend_width = text_size
        + LEGEND_BAND_PADDING_PX
        + estimate_label_text_width_px(series_name.unwrap_or_default(), text_size);
    match settings.legend.position {
        LegendPosition::None => {}
        LegendPosition::Top => reserve.top += legend_band,
        LegendPosition::Bottom => reserve.bottom += legend_band,
        LegendPosition::Left => reserve.left += legend_width,
        LegendPosition::Right => reserve.right += legend_width,
    }
    reserve
}

fn value_tick_target(plot_height: f64) -> usize {
    axis_tick_target_count(
        plot_height,
        VALUE_AXIS_TARGET_SPACING_PX,
        VALUE_AXIS_MIN_TICKS,
        VALUE_AXIS_MAX_TICKS,
    )
}

/// Returns `(label_step, fits)` for the bin labels.
fn x_label_density(plot_width: f64, bin_count: usize, widest_label: f64) -> (usize, bool) {
    if bin_count == 0 || plot_width <= 0.0 || widest_label > plot_width {
        return (1, false);
    }
    let slot = plot_width / bin_count as f64;
    let needed = widest_label + X_LABEL_MIN_SPACING_PX;
    let step = (needed / slot).ceil() as usize;
    (step.clamp(1, bin_count), true)
}

fn rows_domain(rows: &[PlotRow]) -> (f64, f64) {
    rows.iter()
        .map(|row| row.value)
        .filter(|value| value.is_finite())
        .fold((0.0, 0.0), |(min, max), value| (min.min(value), max.max(value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_density_thins_crowded_labels() {
        assert_eq!(x_label_density(100.0, 10, 14.0), (2, true));
        assert_eq!(x_label_density(1000.0, 10, 14.0), (1, true));
    }

    #[test]
    fn label_density_hides_labels_wider_than_plot() {
        assert_eq!(x_label_density(10.0, 3, 40.0), (1, false));
        assert_eq!(x_label_density(0.0, 3, 4.0), (1, false));
        assert_eq!(x_label_density(100.0, 0, 4.0), (1, false));
    }

    #[test]
    fn rows_domain_always_contains_zero() {
        let rows = vec![PlotRow::new(0, "a", 3.0), PlotRow::new(1, "b", f64::NAN)];
        assert_eq!(rows_domain(&rows), (0.0, 3.0));
    }
}
