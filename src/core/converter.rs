use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::BinId;
use crate::error::{ChartError, ChartResult};

/// Data backing one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AxisValues {
    /// One label per bin, in plotting order (horizontal axis).
    Categories(Vec<String>),
    /// Continuous value domain (vertical axis).
    Numeric { min: f64, max: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisDataset {
    pub values: AxisValues,
    pub title: Option<String>,
}

impl AxisDataset {
    #[must_use]
    pub fn categories(labels: Vec<String>) -> Self {
        Self {
            values: AxisValues::Categories(labels),
            title: None,
        }
    }

    #[must_use]
    pub fn numeric(min: f64, max: f64) -> Self {
        Self {
            values: AxisValues::Numeric { min, max },
            title: None,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn category_labels(&self) -> &[String] {
        match &self.values {
            AxisValues::Categories(labels) => labels,
            AxisValues::Numeric { .. } => &[],
        }
    }

    /// Returns the value domain for numeric datasets.
    #[must_use]
    pub fn numeric_domain(&self) -> Option<(f64, f64)> {
        match self.values {
            AxisValues::Numeric { min, max } => Some((min, max)),
            AxisValues::Categories(_) => None,
        }
    }
}

/// One plotted histogram row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotRow {
    pub bin: BinId,
    pub label: String,
    pub value: f64,
}

impl PlotRow {
    #[must_use]
    pub fn new(bin: impl Into<BinId>, label: impl Into<String>, value: f64) -> Self {
        Self {
            bin: bin.into(),
            label: label.into(),
            value,
        }
    }
}

/// Capability contract for data adapters feeding the chart.
///
/// Implementations are immutable for the duration of a render pass. Several
/// dataset shapes (different binning strategies) can implement it.
pub trait DataConverter: fmt::Debug + Send + Sync {
    /// Validity gate; an incorrect converter suppresses chart output.
    fn is_correct(&self) -> bool;

    /// Horizontal axis data, if the horizontal axis should exist.
    fn x1_data(&self) -> Option<&AxisDataset>;

    /// Vertical axis data, if the vertical axis should exist.
    fn y1_data(&self) -> Option<&AxisDataset>;

    /// Plotted rows in display order.
    fn chart_data(&self) -> &[PlotRow];
}

/// Converter over rows that were binned upstream.
#[derive(Debug, Clone, PartialEq)]
pub struct BinnedSeries {
    rows: Vec<PlotRow>,
    x1: Option<AxisDataset>,
    y1: Option<AxisDataset>,
    correct: bool,
}

impl BinnedSeries {
    /// Builds a converter exposing both axes.
    ///
    /// The value domain always includes zero so bars grow from the baseline.
    #[must_use]
    pub fn new(rows: Vec<PlotRow>) -> Self {
        let correct = !rows.is_empty() && rows.iter().all(|row| row.value.is_finite());
        let labels = rows.iter().map(|row| row.label.clone()).collect();
        let (min, max) = value_domain(&rows);
        Self {
            rows,
            x1: Some(AxisDataset::categories(labels)),
            y1: Some(AxisDataset::numeric(min, max)),
            correct,
        }
    }

    /// Like [`BinnedSeries::new`], but rejects rows the chart would refuse to
    /// draw.
    pub fn try_new(rows: Vec<PlotRow>) -> ChartResult<Self> {
        if rows.is_empty() {
            return Err(ChartError::InvalidData("histogram has no bins".to_owned()));
        }
        if let Some(row) = rows.iter().find(|row| !row.value.is_finite()) {
            return Err(ChartError::InvalidData(format!(
                "bin {} has non-finite value {}",
                row.bin.0, row.value
            )));
        }
        Ok(Self::new(rows))
    }

    /// Builds a converter from `(label, count)` pairs, numbering bins from zero.
    #[must_use]
    pub fn from_counts<S: Into<String>>(counts: impl IntoIterator<Item = (S, f64)>) -> Self {
        let rows = counts
            .into_iter()
            .enumerate()
            .map(|(index, (label, value))| PlotRow::new(index as u64, label, value))
            .collect();
        Self::new(rows)
    }

    #[must_use]
    pub fn without_x_axis(mut self) -> Self {
        self.x1 = None;
        self
    }

    #[must_use]
    pub fn without_y_axis(mut self) -> Self {
        self.y1 = None;
        self
    }

    #[must_use]
    pub fn with_x_title(mut self, title: impl Into<String>) -> Self {
        if let Some(x1) = self.x1.take() {
            self.x1 = Some(x1.with_title(title));
        }
        self
    }

    #[must_use]
    pub fn with_y_title(mut self, title: impl Into<String>) -> Self {
        if let Some(y1) = self.y1.take() {
            self.y1 = Some(y1.with_title(title));
        }
        self
    }
}

impl DataConverter for BinnedSeries {
    fn is_correct(&self) -> bool {
        self.correct
    }

    fn x1_data(&self) -> Option<&AxisDataset> {
        self.x1.as_ref()
    }

    fn y1_data(&self) -> Option<&AxisDataset> {
        self.y1.as_ref()
    }

    fn chart_data(&self) -> &[PlotRow] {
        &self.rows
    }
}

fn value_domain(rows: &[PlotRow]) -> (f64, f64) {
    let mut min: f64 = 0.0;
    let mut max: f64 = 0.0;
    for row in rows.iter().filter(|row| row.value.is_finite()) {
        min = min.min(row.value);
        max = max.max(row.value);
    }
    if min == max {
        max = min + 1.0;
    }
    (min, max)
}
