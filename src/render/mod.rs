mod frame;
mod null_renderer;
mod primitives;

pub use frame::HistogramFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{Color, LinePrimitive, RectPrimitive, TextHAlign, TextPrimitive};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `HistogramFrame` so
/// drawing code stays isolated from layout and selection logic.
pub trait Renderer {
    fn render(&mut self, frame: &HistogramFrame) -> ChartResult<()>;
}
