use std::fmt;

use crate::render::Color;

/// Named color tokens consumed by the chart.
///
/// Values pass straight through to render primitives; the chart never
/// interprets them.
pub trait Theme: fmt::Debug + Send + Sync {
    /// Horizontal grid lines.
    fn grid_color(&self) -> Color;

    /// Zero-value reference line.
    fn baseline_color(&self) -> Color;

    /// Axis tracks and tick marks.
    fn axis_line_color(&self) -> Color;

    /// Tick labels and axis titles.
    fn axis_label_color(&self) -> Color;

    /// Hover cursor band drawn behind the bars.
    fn cursor_color(&self) -> Color {
        self.grid_color().with_alpha(0.35)
    }
}

/// Light grey palette matching common dashboard defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefaultTheme {
    pub grey4: Color,
    pub grey6: Color,
    pub grey8: Color,
}

impl Default for DefaultTheme {
    fn default() -> Self {
        Self {
            grey4: Color::from_hex(0xE8E8E8),
            grey6: Color::from_hex(0xBFBFBF),
            grey8: Color::from_hex(0x595959),
        }
    }
}

impl Theme for DefaultTheme {
    fn grid_color(&self) -> Color {
        self.grey4
    }

    fn baseline_color(&self) -> Color {
        self.grey6
    }

    fn axis_line_color(&self) -> Color {
        self.grey6
    }

    fn axis_label_color(&self) -> Color {
        self.grey8
    }
}
