use smallvec::SmallVec;

use crate::core::{DataConverter, Theme};
use crate::render::{LinePrimitive, TextHAlign, TextPrimitive};

use super::sizing::{AXIS_LABEL_GAP_PX, AXIS_TICK_SIZE_PX, LayoutRecord};

const AXIS_STROKE_WIDTH_PX: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrientation {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisTickDescriptor {
    /// Pixel x for horizontal axes, pixel y for vertical axes.
    pub position: f64,
    pub mark: Option<LinePrimitive>,
    pub label: Option<TextPrimitive>,
}

/// Renderable pieces of one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisDescriptor {
    pub orientation: AxisOrientation,
    pub track: LinePrimitive,
    pub ticks: SmallVec<[AxisTickDescriptor; 12]>,
    pub grid_lines: Vec<LinePrimitive>,
    pub title: Option<TextPrimitive>,
}

impl AxisDescriptor {
    pub fn labels(&self) -> impl Iterator<Item = &TextPrimitive> {
        self.ticks
            .iter()
            .filter_map(|tick| tick.label.as_ref())
            .chain(self.title.as_ref())
    }

    pub fn lines(&self) -> impl Iterator<Item = &LinePrimitive> {
        std::iter::once(&self.track)
            .chain(self.ticks.iter().filter_map(|tick| tick.mark.as_ref()))
            .chain(self.grid_lines.iter())
    }
}

/// Builds the horizontal (bin) axis; `None` without horizontal axis data.
#[must_use]
pub fn build_x_axis(
    converter: &dyn DataConverter,
    layout: &LayoutRecord,
    theme: &dyn Theme,
) -> Option<AxisDescriptor> {
    let x1 = converter.x1_data()?;
    let plot = layout.plot;
    let axis = &layout.x1_axis;
    let line_color = theme.axis_line_color();
    let label_color = theme.axis_label_color();
    let text_size = layout.text_size;

    let track = LinePrimitive::horizontal(
        plot.bottom(),
        plot.x,
        plot.right(),
        AXIS_STROKE_WIDTH_PX,
        line_color,
    )
    .with_crisp_edges();

    let mut ticks = SmallVec::new();
    if axis.visible {
        let categories = x1.category_labels();
        let slot = layout.slot_width();
        let step = axis.label_step.max(1);
        for (index, row) in converter.chart_data().iter().enumerate() {
            if index % step != 0 {
                continue;
            }
            let center = layout.slot_x(index) + slot * 0.5;
            let mark = axis.is_show_ticks.then(|| {
                LinePrimitive::vertical(
                    center,
                    plot.bottom(),
                    plot.bottom() + AXIS_TICK_SIZE_PX,
                    AXIS_STROKE_WIDTH_PX,
                    line_color,
                )
                .with_crisp_edges()
            });
            let text = categories.get(index).unwrap_or(&row.label);
            let label = (axis.is_show_labels && !text.is_empty()).then(|| {
                TextPrimitive::new(
                    text.clone(),
                    center,
                    plot.bottom() + AXIS_TICK_SIZE_PX + AXIS_LABEL_GAP_PX,
                    text_size,
                    label_color,
                    TextHAlign::Center,
                )
            });
            ticks.push(AxisTickDescriptor {
                position: center,
                mark,
                label,
            });
        }
    }

    let title = axis
        .title
        .as_ref()
        .filter(|title| axis.visible && !title.is_empty())
        .map(|title| {
            TextPrimitive::new(
                title.clone(),
                plot.x + plot.width * 0.5,
                plot.bottom() + axis.height - text_size,
                text_size,
                label_color,
                TextHAlign::Center,
            )
        });

    Some(AxisDescriptor {
        orientation: AxisOrientation::Horizontal,
        track,
        ticks,
        grid_lines: Vec::new(),
        title,
    })
}

/// Builds the vertical (value) axis; `None` without vertical axis data.
///
/// Horizontal grid lines follow `layout.y1_axis.is_show_ticks`; the track is
/// emitted either way.
#[must_use]
pub fn build_y_axis(
    converter: &dyn DataConverter,
    layout: &LayoutRecord,
    theme: &dyn Theme,
) -> Option<AxisDescriptor> {
    converter.y1_data()?;
    let plot = layout.plot;
    let axis = &layout.y1_axis;
    let line_color = theme.axis_line_color();
    let label_color = theme.axis_label_color();
    let text_size = layout.text_size;

    let track = LinePrimitive::vertical(
        plot.x,
        plot.y,
        plot.bottom(),
        AXIS_STROKE_WIDTH_PX,
        line_color,
    )
    .with_crisp_edges();

    let ticks = axis
        .ticks
        .iter()
        .map(|tick| AxisTickDescriptor {
            position: tick.y,
            mark: axis.is_show_ticks.then(|| {
                LinePrimitive::horizontal(
                    tick.y,
                    plot.x - AXIS_TICK_SIZE_PX,
                    plot.x,
                    AXIS_STROKE_WIDTH_PX,
                    line_color,
                )
                .with_crisp_edges()
            }),
            label: Some(TextPrimitive::new(
                tick.label.clone(),
                plot.x - AXIS_TICK_SIZE_PX - AXIS_LABEL_GAP_PX,
                tick.y - text_size * 0.5,
                text_size,
                label_color,
                TextHAlign::Right,
            )),
        })
        .collect();

    let grid_lines = if axis.is_show_ticks && plot.width > 0.0 {
        axis.ticks
            .iter()
            .map(|tick| {
                LinePrimitive::horizontal(
                    tick.y,
                    plot.x,
                    plot.right(),
                    AXIS_STROKE_WIDTH_PX,
                    theme.grid_color(),
                )
                .with_crisp_edges()
            })
            .collect()
    } else {
        Vec::new()
    };

    let title = axis
        .title
        .as_ref()
        .filter(|title| axis.visible && !title.is_empty())
        .map(|title| {
            TextPrimitive::new(
                title.clone(),
                plot.x - axis.width + text_size * 0.5,
                plot.y + plot.height * 0.5,
                text_size,
                label_color,
                TextHAlign::Center,
            )
        });

    Some(AxisDescriptor {
        orientation: AxisOrientation::Vertical,
        track,
        ticks,
        grid_lines,
        title,
    })
}
