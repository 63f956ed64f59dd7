pub mod converter;
pub mod palette;
pub mod text_metrics;
pub mod theme;
pub mod ticks;
pub mod types;

pub use converter::{AxisDataset, AxisValues, BinnedSeries, DataConverter, PlotRow};
pub use palette::{DEFAULT_PALETTE, Palette, PaletteWrap, color_for_index};
pub use text_metrics::{estimate_label_text_width_px, widest_label_px};
pub use theme::{DefaultTheme, Theme};
pub use ticks::{NiceTicks, format_tick_label, nice_ticks};
pub use types::{BinId, BoundingBox, ContainerSize, Margin, PlotArea, RelativePosition};
