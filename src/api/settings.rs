use serde::{Deserialize, Serialize};

pub const DEFAULT_TEXT_SIZE_PX: f64 = 12.0;

/// Per-axis display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSettings {
    /// Reserve space for and draw tick labels.
    #[serde(default = "default_true")]
    pub visible: bool,
    /// Draw tick marks and, for the value axis, the horizontal grid.
    #[serde(default = "default_true")]
    pub show_ticks: bool,
    /// Overrides the dataset title when set.
    #[serde(default)]
    pub title: Option<String>,
}

impl Default for AxisSettings {
    fn default() -> Self {
        Self {
            visible: true,
            show_ticks: true,
            title: None,
        }
    }
}

impl AxisSettings {
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            visible: false,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_show_ticks(mut self, show_ticks: bool) -> Self {
        self.show_ticks = show_ticks;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LegendPosition {
    #[default]
    None,
    Top,
    Right,
    Bottom,
    Left,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LegendSettings {
    pub position: LegendPosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValueLabelsSettings {
    pub enabled: bool,
    pub show_total: bool,
}

/// Canonical settings consumed by the sizing engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometrySettings {
    pub text_size: f64,
    pub x_axis: AxisSettings,
    pub y_axis: AxisSettings,
    pub legend: LegendSettings,
    pub value_labels: ValueLabelsSettings,
}

/// Normalizes histogram display settings.
///
/// Histograms never show a legend or value labels, so both are forced off
/// regardless of the caller's other chart settings.
#[must_use]
pub fn resolve_geometry_settings(
    text_size: f64,
    x_axis: &AxisSettings,
    y_axis: &AxisSettings,
) -> GeometrySettings {
    GeometrySettings {
        text_size: sanitize_text_size(text_size),
        x_axis: x_axis.clone(),
        y_axis: y_axis.clone(),
        legend: LegendSettings {
            position: LegendPosition::None,
        },
        value_labels: ValueLabelsSettings {
            enabled: false,
            show_total: false,
        },
    }
}

pub(crate) fn sanitize_text_size(text_size: f64) -> f64 {
    if text_size.is_finite() && text_size > 0.0 {
        text_size
    } else {
        DEFAULT_TEXT_SIZE_PX
    }
}

fn default_true() -> bool {
    true
}
