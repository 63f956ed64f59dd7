use serde::{Deserialize, Serialize};

use crate::core::PaletteWrap;
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

use super::bars::{BAR_GAP_RATIO, MAX_BAR_GAP_RATIO};
use super::settings::{AxisSettings, DEFAULT_TEXT_SIZE_PX};

/// Public histogram chart configuration.
///
/// Serializable so hosts can persist chart setup as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramChartConfig {
    #[serde(default = "default_text_size")]
    pub text_size: f64,
    #[serde(default)]
    pub x_axis: AxisSettings,
    #[serde(default)]
    pub y_axis: AxisSettings,
    /// Bar color; falls back to the first palette entry.
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default)]
    pub is_show_popup_menu: bool,
    #[serde(default = "default_device_pixel_ratio")]
    pub device_pixel_ratio: f64,
    #[serde(default = "default_bar_gap_ratio")]
    pub bar_gap_ratio: f64,
    #[serde(default)]
    pub palette_wrap: PaletteWrap,
}

impl Default for HistogramChartConfig {
    fn default() -> Self {
        Self {
            text_size: default_text_size(),
            x_axis: AxisSettings::default(),
            y_axis: AxisSettings::default(),
            color: None,
            is_show_popup_menu: false,
            device_pixel_ratio: default_device_pixel_ratio(),
            bar_gap_ratio: default_bar_gap_ratio(),
            palette_wrap: PaletteWrap::default(),
        }
    }
}

impl HistogramChartConfig {
    #[must_use]
    pub fn with_text_size(mut self, text_size: f64) -> Self {
        self.text_size = text_size;
        self
    }

    #[must_use]
    pub fn with_x_axis(mut self, x_axis: AxisSettings) -> Self {
        self.x_axis = x_axis;
        self
    }

    #[must_use]
    pub fn with_y_axis(mut self, y_axis: AxisSettings) -> Self {
        self.y_axis = y_axis;
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn with_popup_menu(mut self, show: bool) -> Self {
        self.is_show_popup_menu = show;
        self
    }

    #[must_use]
    pub fn with_device_pixel_ratio(mut self, ratio: f64) -> Self {
        self.device_pixel_ratio = ratio;
        self
    }

    #[must_use]
    pub fn with_bar_gap_ratio(mut self, ratio: f64) -> Self {
        self.bar_gap_ratio = ratio;
        self
    }

    #[must_use]
    pub fn with_palette_wrap(mut self, wrap: PaletteWrap) -> Self {
        self.palette_wrap = wrap;
        self
    }

    /// Rejects values the chart would otherwise silently replace.
    pub fn validate(&self) -> ChartResult<()> {
        if !self.text_size.is_finite() || self.text_size <= 0.0 {
            return Err(ChartError::InvalidSettings(format!(
                "text size must be finite and > 0, got {}",
                self.text_size
            )));
        }
        if !self.device_pixel_ratio.is_finite() || self.device_pixel_ratio <= 0.0 {
            return Err(ChartError::InvalidSettings(format!(
                "device pixel ratio must be finite and > 0, got {}",
                self.device_pixel_ratio
            )));
        }
        if !(0.0..=MAX_BAR_GAP_RATIO).contains(&self.bar_gap_ratio) {
            return Err(ChartError::InvalidSettings(format!(
                "bar gap ratio must be in [0, {MAX_BAR_GAP_RATIO}], got {}",
                self.bar_gap_ratio
            )));
        }
        if let Some(color) = self.color {
            color
                .validate()
                .map_err(|e| ChartError::InvalidSettings(format!("bar color: {e}")))?;
        }
        Ok(())
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidSettings(format!("failed to serialize config: {e}")))
    }

    /// Deserializes and validates config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidSettings(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

fn default_text_size() -> f64 {
    DEFAULT_TEXT_SIZE_PX
}

fn default_device_pixel_ratio() -> f64 {
    1.0
}

fn default_bar_gap_ratio() -> f64 {
    BAR_GAP_RATIO
}
