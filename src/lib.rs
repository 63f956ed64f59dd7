//! histogram-chart: backend-agnostic histogram layout and selection engine.
//!
//! The crate turns a binned dataset, display settings and the live container
//! size into a deterministic `HistogramFrame` (axes, grid, bars, baseline,
//! hover cursor and popup menu model) that any `Renderer` can paint.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{HistogramChart, HistogramChartConfig};
pub use error::{ChartError, ChartResult};
