use serde::{Deserialize, Serialize};

use crate::core::{BinId, PlotRow};
use crate::interaction::SelectionSet;
use crate::render::{Color, RectPrimitive};

use super::sizing::LayoutRecord;

/// Share of each bin slot left empty between neighbouring bars.
pub const BAR_GAP_RATIO: f64 = 0.1;
pub const MAX_BAR_GAP_RATIO: f64 = 0.9;
/// Opacity applied to bars outside a non-empty selection.
pub const DIMMED_BAR_ALPHA: f64 = 0.35;

/// Bar width and inter-bar gap in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BarGeometry {
    pub bar_size: f64,
    pub bar_gap: f64,
}

/// One positioned histogram bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBar {
    pub bin: BinId,
    pub index: usize,
    pub value: f64,
    pub rect: RectPrimitive,
    pub highlighted: bool,
}

/// Sizes bars so they evenly fill the plot width with a proportional gap.
#[must_use]
pub fn bar_info(layout: &LayoutRecord) -> BarGeometry {
    bar_info_with_gap_ratio(layout, BAR_GAP_RATIO)
}

/// Same as [`bar_info`] with an explicit gap ratio (clamped into `[0, 0.9]`).
#[must_use]
pub fn bar_info_with_gap_ratio(layout: &LayoutRecord, gap_ratio: f64) -> BarGeometry {
    let slot = layout.slot_width();
    if !slot.is_finite() || slot <= 0.0 {
        return BarGeometry::default();
    }
    let gap_ratio = if gap_ratio.is_finite() {
        gap_ratio.clamp(0.0, MAX_BAR_GAP_RATIO)
    } else {
        BAR_GAP_RATIO
    };
    let bar_gap = slot * gap_ratio;
    BarGeometry {
        bar_size: slot - bar_gap,
        bar_gap,
    }
}

/// Converts a logical stroke width into one that renders at the same
/// physical thickness on high-density displays.
///
/// Invalid pixel ratios are treated as `1.0`.
#[must_use]
pub fn stroke_width_for_scale(base_width: f64, device_pixel_ratio: f64) -> f64 {
    let ratio = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio
    } else {
        1.0
    };
    base_width.max(0.0) / ratio
}

/// Positions one bar per row between the zero baseline and the row value.
///
/// With a non-empty selection, selected bins are highlighted and the rest
/// are dimmed; an empty selection leaves every bar at the base color.
#[must_use]
pub fn build_bars(
    rows: &[PlotRow],
    layout: &LayoutRecord,
    geometry: BarGeometry,
    color: Color,
    selection: &SelectionSet,
) -> Vec<HistogramBar> {
    let baseline_y = layout.baseline_y();
    let dimmed = color.with_alpha(color.alpha * DIMMED_BAR_ALPHA);

    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let x = layout.slot_x(index) + geometry.bar_gap * 0.5;
            let value_y = layout.value_to_y(row.value);
            let highlighted = selection.contains(row.bin);
            let fill_color = if selection.is_empty() || highlighted {
                color
            } else {
                dimmed
            };
            HistogramBar {
                bin: row.bin,
                index,
                value: row.value,
                rect: RectPrimitive::new(
                    x,
                    value_y.min(baseline_y),
                    geometry.bar_size,
                    (value_y - baseline_y).abs(),
                    fill_color,
                ),
                highlighted,
            }
        })
        .collect()
}
