use std::sync::Arc;

use crate::api::{AxisDescriptor, BarGeometry, HistogramBar};
use crate::core::{ContainerSize, Margin, PlotArea};
use crate::error::{ChartError, ChartResult};
use crate::interaction::PopupMenu;
use crate::render::{LinePrimitive, RectPrimitive, TextPrimitive};

/// Backend-agnostic scene for one histogram draw pass.
///
/// Paint order: cursor band, grid, bars, baseline, axes.
#[derive(Debug, Clone)]
pub struct HistogramFrame {
    pub container: ContainerSize,
    pub margin: Margin,
    pub plot: PlotArea,
    pub x_axis: Option<Arc<AxisDescriptor>>,
    pub y_axis: Option<Arc<AxisDescriptor>>,
    /// Zero-value reference line; always present.
    pub baseline: LinePrimitive,
    pub bars: Vec<HistogramBar>,
    pub bar_geometry: BarGeometry,
    pub cursor: Option<RectPrimitive>,
    pub popup_menu: Option<PopupMenu>,
    /// Left offset aligning host content under the plot.
    pub footer_offset_left: f64,
}

impl HistogramFrame {
    pub fn axes(&self) -> impl Iterator<Item = &AxisDescriptor> {
        self.x_axis.iter().chain(self.y_axis.iter()).map(|axis| &**axis)
    }

    pub fn grid_lines(&self) -> impl Iterator<Item = &LinePrimitive> {
        self.axes().flat_map(|axis| axis.grid_lines.iter())
    }

    /// Every line in paint order.
    pub fn lines(&self) -> impl Iterator<Item = &LinePrimitive> {
        self.grid_lines()
            .chain(std::iter::once(&self.baseline))
            .chain(self.axes().flat_map(|axis| {
                std::iter::once(&axis.track)
                    .chain(axis.ticks.iter().filter_map(|tick| tick.mark.as_ref()))
            }))
    }

    pub fn rects(&self) -> impl Iterator<Item = &RectPrimitive> {
        self.cursor
            .iter()
            .chain(self.bars.iter().map(|bar| &bar.rect))
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextPrimitive> {
        self.axes().flat_map(AxisDescriptor::labels)
    }

    #[must_use]
    pub fn highlighted_bar_count(&self) -> usize {
        self.bars.iter().filter(|bar| bar.highlighted).count()
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.container.is_measured() {
            return Err(ChartError::InvalidContainer {
                width: self.container.width,
                height: self.container.height,
            });
        }
        if self.bar_geometry.bar_size < 0.0 || self.bar_geometry.bar_gap < 0.0 {
            return Err(ChartError::InvalidFrame(
                "bar size and gap must be non-negative".to_owned(),
            ));
        }

        for line in self.lines() {
            line.validate()?;
        }
        for rect in self.rects() {
            rect.validate()?;
        }
        for text in self.texts() {
            text.validate()?;
        }

        Ok(())
    }
}
