use std::sync::Arc;

use ordered_float::OrderedFloat;
use tracing::{debug, warn};

use crate::core::{
    BinId, BoundingBox, ContainerSize, DataConverter, DefaultTheme, Palette, RelativePosition,
    Theme,
};
use crate::error::ChartResult;
use crate::interaction::{
    HoverState, RelativePositionTracker, SelectionGate, SelectionSet, SelectionState,
    SelectionTracker, resolve_popup_menu,
};
use crate::render::{Color, HistogramFrame, LinePrimitive, RectPrimitive, Renderer};

use super::axis::{AxisDescriptor, build_x_axis, build_y_axis};
use super::bars::{bar_info_with_gap_ratio, build_bars, stroke_width_for_scale};
use super::callbacks::{BarClick, HistogramCallbacks};
use super::config::HistogramChartConfig;
use super::memo::{AxisMemoKey, LayoutMemoKey, Memo, MemoStats};
use super::settings::{GeometrySettings, resolve_geometry_settings};
use super::sizing::{LayoutRecord, compute_layout};

const BASELINE_STROKE_WIDTH_PX: f64 = 1.0;

/// Why no frame is produced for the current inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuppressReason {
    /// No converter, no layout, or an unmeasured container.
    NotReady,
    /// The converter reports its data as unusable.
    InvalidData,
}

#[derive(Debug, Clone)]
struct StampedLayout {
    stamp: u64,
    record: Arc<LayoutRecord>,
}

#[derive(Debug, Clone, Default)]
struct AxisPair {
    x: Option<Arc<AxisDescriptor>>,
    y: Option<Arc<AxisDescriptor>>,
}

/// Histogram chart orchestrator.
///
/// Holds the current inputs, recomputes derived geometry when one of them
/// changes and hands finished frames to the renderer.
pub struct HistogramChart<R: Renderer> {
    renderer: R,
    config: HistogramChartConfig,
    settings: GeometrySettings,
    settings_generation: u64,
    converter: Option<Arc<dyn DataConverter>>,
    converter_generation: u64,
    theme: Arc<dyn Theme>,
    theme_generation: u64,
    palette: Palette,
    container: ContainerSize,
    selection: SelectionSet,
    selection_tracker: SelectionTracker,
    position: RelativePositionTracker,
    hover: HoverState,
    callbacks: HistogramCallbacks,
    layout_stamp: u64,
    layout_memo: Memo<LayoutMemoKey, Option<StampedLayout>>,
    axis_memo: Memo<AxisMemoKey, AxisPair>,
}

impl<R: Renderer> HistogramChart<R> {
    pub fn new(renderer: R, config: HistogramChartConfig) -> ChartResult<Self> {
        config.validate()?;
        let settings = resolve_geometry_settings(config.text_size, &config.x_axis, &config.y_axis);
        let palette = Palette::default().with_wrap(config.palette_wrap);
        debug!(
            text_size = settings.text_size,
            popup_menu = config.is_show_popup_menu,
            "histogram chart created"
        );
        Ok(Self {
            renderer,
            config,
            settings,
            settings_generation: 0,
            converter: None,
            converter_generation: 0,
            theme: Arc::new(DefaultTheme::default()),
            theme_generation: 0,
            palette,
            container: ContainerSize::default(),
            selection: SelectionSet::new(),
            selection_tracker: SelectionTracker::default(),
            position: RelativePositionTracker::default(),
            hover: HoverState::default(),
            callbacks: HistogramCallbacks::default(),
            layout_stamp: 0,
            layout_memo: Memo::new("layout"),
            axis_memo: Memo::new("axes"),
        })
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn config(&self) -> &HistogramChartConfig {
        &self.config
    }

    #[must_use]
    pub fn geometry_settings(&self) -> &GeometrySettings {
        &self.settings
    }

    /// Replaces the configuration.
    ///
    /// Hiding the popup menu reopens a denied selection gate.
    pub fn set_config(&mut self, config: HistogramChartConfig) -> ChartResult<()> {
        config.validate()?;
        let settings = resolve_geometry_settings(config.text_size, &config.x_axis, &config.y_axis);
        if settings != self.settings {
            self.settings = settings;
            self.settings_generation = self.settings_generation.wrapping_add(1);
            debug!(
                generation = self.settings_generation,
                text_size = self.settings.text_size,
                "geometry settings changed"
            );
        }
        if self.config.is_show_popup_menu && !config.is_show_popup_menu {
            self.selection_tracker.allow_selection();
        }
        self.palette = self.palette.clone().with_wrap(config.palette_wrap);
        self.config = config;
        Ok(())
    }

    pub fn set_popup_menu_visible(&mut self, show: bool) {
        if self.config.is_show_popup_menu && !show {
            self.selection_tracker.allow_selection();
        }
        self.config.is_show_popup_menu = show;
    }

    pub fn set_converter(&mut self, converter: Option<Arc<dyn DataConverter>>) {
        self.converter = converter;
        self.converter_generation = self.converter_generation.wrapping_add(1);
        debug!(
            generation = self.converter_generation,
            present = self.converter.is_some(),
            bins = self.converter.as_ref().map_or(0, |c| c.chart_data().len()),
            "data converter changed"
        );
    }

    #[must_use]
    pub fn converter(&self) -> Option<&Arc<dyn DataConverter>> {
        self.converter.as_ref()
    }

    pub fn set_theme(&mut self, theme: Arc<dyn Theme>) {
        self.theme = theme;
        self.theme_generation = self.theme_generation.wrapping_add(1);
        debug!(generation = self.theme_generation, "theme changed");
    }

    pub fn set_callbacks(&mut self, callbacks: HistogramCallbacks) {
        self.callbacks = callbacks;
    }

    pub fn set_container_size(&mut self, width: f64, height: f64) {
        let container = ContainerSize::new(width, height);
        if container != self.container {
            self.container = container;
            debug!(
                width = container.width,
                height = container.height,
                "container size changed"
            );
        }
    }

    #[must_use]
    pub fn container_size(&self) -> ContainerSize {
        self.container
    }

    /// Records the chart container's measured box; its size becomes the
    /// container size.
    pub fn set_container_box(&mut self, container_box: Option<BoundingBox>) {
        if let Some(container_box) = container_box {
            self.set_container_size(container_box.width, container_box.height);
        }
        self.position.set_tracked_box(container_box);
    }

    pub fn set_root_container_box(&mut self, root_box: Option<BoundingBox>) {
        self.position.set_root_box(root_box);
    }

    #[must_use]
    pub fn relative_position(&self) -> Option<RelativePosition> {
        self.position.position()
    }

    pub fn set_selected_bins(&mut self, selection: SelectionSet) {
        self.selection = selection;
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    #[must_use]
    pub fn selection_state(&self) -> SelectionState {
        SelectionState::of(&self.selection)
    }

    #[must_use]
    pub fn selection_gate(&self) -> SelectionGate {
        self.selection_tracker.gate()
    }

    pub fn add_bin(&mut self, bin: BinId) -> bool {
        self.selection_tracker.add_bin(&mut self.selection, bin)
    }

    pub fn remove_bin(&mut self, bin: BinId) -> bool {
        self.selection_tracker.remove_bin(&mut self.selection, bin)
    }

    pub fn clear_selection(&mut self) {
        self.selection_tracker.clear_selection(&mut self.selection);
    }

    pub fn deny_selection(&mut self) {
        self.selection_tracker.deny_selection();
    }

    pub fn allow_selection(&mut self) {
        self.selection_tracker.allow_selection();
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.hover.on_pointer_move(x, y);
    }

    pub fn pointer_leave(&mut self) {
        self.hover.on_pointer_leave();
    }

    /// Index of the bin under the pointer, if any.
    pub fn hovered_bin(&mut self) -> Option<usize> {
        let (x, y) = self.hover.pointer()?;
        let layout = self.layout()?;
        layout.bin_at(x, y)
    }

    /// Hit-tests the bin slots and forwards the hit to `on_bar_click`.
    ///
    /// Clicks are reported regardless of the selection gate.
    pub fn click_at(&mut self, x: f64, y: f64) -> Option<BarClick> {
        let (converter, layout) = self.ready_inputs().ok()?;
        let index = layout.record.bin_at(x, y)?;
        let row = converter.chart_data().get(index)?;
        let click = BarClick {
            bin: row.bin,
            index,
            value: row.value,
        };
        (self.callbacks.on_bar_click)(click);
        Some(click)
    }

    /// Current layout; `None` while no converter is set.
    pub fn layout(&mut self) -> Option<Arc<LayoutRecord>> {
        self.stamped_layout().map(|layout| layout.record)
    }

    /// `Ok(())` when a frame would be produced.
    pub fn readiness(&mut self) -> Result<(), SuppressReason> {
        self.ready_inputs().map(|_| ())
    }

    /// Left offset for host content placed under the chart; mirrors the value
    /// axis width.
    pub fn footer_offset_left(&mut self) -> Option<f64> {
        let converter = self.converter.clone()?;
        if !converter.is_correct() {
            return None;
        }
        self.layout().map(|layout| layout.y1_axis.width)
    }

    #[must_use]
    pub fn layout_memo_stats(&self) -> MemoStats {
        self.layout_memo.stats()
    }

    #[must_use]
    pub fn axis_memo_stats(&self) -> MemoStats {
        self.axis_memo.stats()
    }

    /// Assembles the frame for the current inputs; `None` while suppressed.
    pub fn build_frame(&mut self) -> Option<HistogramFrame> {
        let (converter, layout) = match self.ready_inputs() {
            Ok(inputs) => inputs,
            Err(SuppressReason::InvalidData) => {
                debug!(
                    generation = self.converter_generation,
                    "converter data is not correct; frame suppressed"
                );
                return None;
            }
            Err(SuppressReason::NotReady) => return None,
        };
        let axes = self.axes(converter.as_ref(), &layout);
        let record = layout.record.as_ref();
        let plot = record.plot;

        let bar_geometry = bar_info_with_gap_ratio(record, self.config.bar_gap_ratio);
        let bars = build_bars(
            converter.chart_data(),
            record,
            bar_geometry,
            self.bar_color(),
            &self.selection,
        );
        let baseline = LinePrimitive::horizontal(
            record.baseline_y(),
            plot.x,
            plot.right(),
            stroke_width_for_scale(BASELINE_STROKE_WIDTH_PX, self.config.device_pixel_ratio),
            self.theme.baseline_color(),
        )
        .with_crisp_edges();
        let cursor = self.cursor_band(record);
        let popup_menu = resolve_popup_menu(
            self.config.is_show_popup_menu,
            self.position.position(),
            self.container,
            &self.selection,
            &self.callbacks.selection,
            self.selection_tracker.gate(),
        );

        debug!(
            width = self.container.width,
            height = self.container.height,
            bars = bars.len(),
            x_axis = axes.x.is_some(),
            y_axis = axes.y.is_some(),
            popup_menu = popup_menu.is_some(),
            "histogram frame assembled"
        );

        Some(HistogramFrame {
            container: self.container,
            margin: record.margin,
            plot,
            x_axis: axes.x,
            y_axis: axes.y,
            baseline,
            bars,
            bar_geometry,
            cursor,
            popup_menu,
            footer_offset_left: record.y1_axis.width,
        })
    }

    /// Builds and paints a frame; returns whether anything was painted.
    pub fn render(&mut self) -> ChartResult<bool> {
        let Some(frame) = self.build_frame() else {
            return Ok(false);
        };
        if let Err(err) = frame.validate() {
            warn!(error = %err, "histogram frame failed validation");
            return Err(err);
        }
        self.renderer.render(&frame)?;
        Ok(true)
    }

    fn bar_color(&self) -> Color {
        self.config
            .color
            .unwrap_or_else(|| self.palette.color_for_index(0))
    }

    fn cursor_band(&self, record: &LayoutRecord) -> Option<RectPrimitive> {
        let (x, y) = self.hover.pointer()?;
        let index = record.bin_at(x, y)?;
        Some(RectPrimitive::new(
            record.slot_x(index),
            record.plot.y,
            record.slot_width(),
            record.plot.height,
            self.theme.cursor_color(),
        ))
    }

    fn ready_inputs(
        &mut self,
    ) -> Result<(Arc<dyn DataConverter>, StampedLayout), SuppressReason> {
        let converter = self.converter.clone().ok_or(SuppressReason::NotReady)?;
        if !converter.is_correct() {
            return Err(SuppressReason::InvalidData);
        }
        let layout = self.stamped_layout().ok_or(SuppressReason::NotReady)?;
        if !self.container.is_measured() || !layout.record.is_paintable() {
            return Err(SuppressReason::NotReady);
        }
        Ok((converter, layout))
    }

    fn stamped_layout(&mut self) -> Option<StampedLayout> {
        let key = LayoutMemoKey {
            converter_generation: self.converter_generation,
            settings_generation: self.settings_generation,
            width: OrderedFloat(self.container.width),
            height: OrderedFloat(self.container.height),
        };
        let settings = &self.settings;
        let converter = self.converter.as_deref();
        let container = self.container;
        let stamp = &mut self.layout_stamp;
        self.layout_memo.get_or_compute(key, || {
            let record = compute_layout(settings, converter, container.width, container.height)?;
            *stamp = stamp.wrapping_add(1);
            Some(StampedLayout {
                stamp: *stamp,
                record: Arc::new(record),
            })
        })
    }

    fn axes(&mut self, converter: &dyn DataConverter, layout: &StampedLayout) -> AxisPair {
        let key = AxisMemoKey {
            converter_generation: self.converter_generation,
            layout_stamp: layout.stamp,
            theme_generation: self.theme_generation,
        };
        let theme = &*self.theme;
        let record = layout.record.as_ref();
        self.axis_memo.get_or_compute(key, || AxisPair {
            x: build_x_axis(converter, record, theme).map(Arc::new),
            y: build_y_axis(converter, record, theme).map(Arc::new),
        })
    }
}
