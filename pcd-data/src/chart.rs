//! Horizontal bar chart specifications.
//!
//! A [`ChartRequest`] names which column of the input rows becomes the bar
//! length and which becomes the category axis. The columns are enumerated,
//! so a view can only ask for columns that exist somewhere in the data
//! model; asking a row type for a column it does not carry is reported as
//! [`ChartError::ColumnNotFound`].
//!
//! The resulting [`BarChart`] is plain data: the D3.js side draws it as-is.

use pcd_db::models::{ClusterFirmCount, ClusterFirmTotal, FirmClusterCount};
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

/// Height of a chart with no bars, in pixels.
pub const BASE_HEIGHT: u32 = 250;
/// Height added per input row, in pixels.
pub const ROW_HEIGHT: u32 = 35;

/// Numeric columns that can drive bar length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueColumn {
    /// `n_patents`
    PatentCount,
    /// `n_firms`, the distinct firm count of the overview
    FirmCount,
}

impl ValueColumn {
    pub fn name(self) -> &'static str {
        match self {
            ValueColumn::PatentCount => "n_patents",
            ValueColumn::FirmCount => "n_firms",
        }
    }
}

/// Text columns that can label the category axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryColumn {
    /// `words`, the keyword label of a cluster
    ClusterWords,
    /// `firm`
    Firm,
}

impl CategoryColumn {
    pub fn name(self) -> &'static str {
        match self {
            CategoryColumn::ClusterWords => "words",
            CategoryColumn::Firm => "firm",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChartError {
    #[error("column `{0}` not found in chart rows")]
    ColumnNotFound(&'static str),
}

/// A row that can feed a bar chart.
///
/// The associated constants list the columns the row type carries; they are
/// checked before any row is read, so a bad request fails even on empty input.
pub trait ChartRow {
    const VALUE_COLUMNS: &'static [ValueColumn];
    const CATEGORY_COLUMNS: &'static [CategoryColumn];

    fn value(&self, column: ValueColumn) -> Option<i64>;
    fn category(&self, column: CategoryColumn) -> Option<&str>;
}

impl ChartRow for FirmClusterCount {
    const VALUE_COLUMNS: &'static [ValueColumn] = &[ValueColumn::PatentCount];
    const CATEGORY_COLUMNS: &'static [CategoryColumn] = &[CategoryColumn::ClusterWords];

    fn value(&self, column: ValueColumn) -> Option<i64> {
        match column {
            ValueColumn::PatentCount => Some(self.n_patents),
            ValueColumn::FirmCount => None,
        }
    }

    fn category(&self, column: CategoryColumn) -> Option<&str> {
        match column {
            CategoryColumn::ClusterWords => Some(&self.words),
            CategoryColumn::Firm => None,
        }
    }
}

impl ChartRow for ClusterFirmCount {
    const VALUE_COLUMNS: &'static [ValueColumn] = &[ValueColumn::PatentCount];
    const CATEGORY_COLUMNS: &'static [CategoryColumn] =
        &[CategoryColumn::ClusterWords, CategoryColumn::Firm];

    fn value(&self, column: ValueColumn) -> Option<i64> {
        match column {
            ValueColumn::PatentCount => Some(self.n_patents),
            ValueColumn::FirmCount => None,
        }
    }

    fn category(&self, column: CategoryColumn) -> Option<&str> {
        match column {
            CategoryColumn::ClusterWords => Some(&self.words),
            CategoryColumn::Firm => Some(&self.firm),
        }
    }
}

impl ChartRow for ClusterFirmTotal {
    const VALUE_COLUMNS: &'static [ValueColumn] = &[ValueColumn::FirmCount];
    const CATEGORY_COLUMNS: &'static [CategoryColumn] = &[CategoryColumn::ClusterWords];

    fn value(&self, column: ValueColumn) -> Option<i64> {
        match column {
            ValueColumn::FirmCount => Some(self.n_firms),
            ValueColumn::PatentCount => None,
        }
    }

    fn category(&self, column: CategoryColumn) -> Option<&str> {
        match column {
            CategoryColumn::ClusterWords => Some(&self.words),
            CategoryColumn::Firm => None,
        }
    }
}

/// Axis titles. `x` labels the value axis, `y` the category axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisLabels {
    pub x: String,
    pub y: String,
}

impl AxisLabels {
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }
}

/// Everything needed to turn a set of rows into a [`BarChart`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartRequest {
    pub value: ValueColumn,
    pub category: CategoryColumn,
    pub title: String,
    pub labels: AxisLabels,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Bar {
    pub category: String,
    pub value: i64,
}

/// Renderable horizontal bar chart.
///
/// `bars` runs from the bottom of the category axis to the top, so values
/// are non-decreasing along the vector.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub value_column: &'static str,
    pub category_column: &'static str,
    pub bars: Vec<Bar>,
    pub height: u32,
    /// Where the value annotation is drawn relative to its bar.
    pub text_position: &'static str,
    /// One tooltip per category, covering every field of that category.
    pub hover_mode: &'static str,
}

impl BarChart {
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Serialize the bars for the JS bridge.
    pub fn data_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.bars)
    }

    /// Serialize everything except the bars for the JS bridge.
    pub fn config_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&serde_json::json!({
            "title": self.title,
            "xLabel": self.x_label,
            "yLabel": self.y_label,
            "valueColumn": self.value_column,
            "categoryColumn": self.category_column,
            "height": self.height,
            "textPosition": self.text_position,
            "hoverMode": self.hover_mode,
        }))
    }
}

/// Height of a chart built from `rows` input rows.
pub fn chart_height(rows: usize) -> u32 {
    let rows = u32::try_from(rows).unwrap_or(u32::MAX);
    BASE_HEIGHT.saturating_add(ROW_HEIGHT.saturating_mul(rows))
}

/// Build a horizontal bar chart from `rows`.
///
/// Rows sharing a category are summed into a single bar, and bars are
/// ordered by ascending total. Ties keep the order in which their category
/// first appears in `rows`. The height counts input rows, not bars.
pub fn build_bar_chart<R: ChartRow>(
    rows: &[R],
    request: &ChartRequest,
) -> Result<BarChart, ChartError> {
    if !R::CATEGORY_COLUMNS.contains(&request.category) {
        return Err(ChartError::ColumnNotFound(request.category.name()));
    }
    if !R::VALUE_COLUMNS.contains(&request.value) {
        return Err(ChartError::ColumnNotFound(request.value.name()));
    }

    let mut bars: Vec<Bar> = Vec::new();
    let mut slot_of: HashMap<&str, usize> = HashMap::new();
    for row in rows {
        let category = row
            .category(request.category)
            .ok_or(ChartError::ColumnNotFound(request.category.name()))?;
        let value = row
            .value(request.value)
            .ok_or(ChartError::ColumnNotFound(request.value.name()))?;

        match slot_of.get(category) {
            Some(&slot) => bars[slot].value += value,
            None => {
                slot_of.insert(category, bars.len());
                bars.push(Bar {
                    category: category.to_string(),
                    value,
                });
            }
        }
    }
    bars.sort_by_key(|b| b.value);

    Ok(BarChart {
        title: request.title.clone(),
        x_label: request.labels.x.clone(),
        y_label: request.labels.y.clone(),
        value_column: request.value.name(),
        category_column: request.category.name(),
        bars,
        height: chart_height(rows.len()),
        text_position: "inside",
        hover_mode: "y unified",
    })
}
