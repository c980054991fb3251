use serde::Serialize;

use crate::{data::stock::DividendRecord, utils::datetime::date_to_str};

/// Share of the value range left above the highest point.
pub const TOP_PADDING_RATIO: f64 = 0.2;
/// Share of the value range left below the lowest point, floored at zero.
pub const BOTTOM_PADDING_RATIO: f64 = 0.4;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub y_axis_min: f64,
    pub y_axis_max: f64,
}

impl ChartSeries {
    /// Builds the series from records in ascending date order.
    ///
    /// When every value is the same the range collapses and both axis bounds
    /// equal that value, which renders as a flat axis.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a DividendRecord>) -> Self {
        let (labels, values): (Vec<String>, Vec<f64>) = records
            .into_iter()
            .map(|record| (date_to_str(&record.date), record.adj_dividend))
            .unzip();

        if values.is_empty() {
            return Self::default();
        }

        let max_value = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min_value = values.iter().copied().fold(f64::INFINITY, f64::min);
        let range = max_value - min_value;

        let top_padding = range * TOP_PADDING_RATIO;
        let bottom_padding = range * BOTTOM_PADDING_RATIO;

        Self {
            labels,
            values,
            y_axis_min: (min_value - bottom_padding).max(0.0),
            y_axis_max: max_value + top_padding,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_flat(&self) -> bool {
        self.y_axis_max <= self.y_axis_min
    }

    /// Position of `value` between the axis bounds, in `0.0..=1.0`.
    pub fn scale(&self, value: f64) -> f64 {
        if self.is_flat() {
            1.0
        } else {
            ((value - self.y_axis_min) / (self.y_axis_max - self.y_axis_min)).clamp(0.0, 1.0)
        }
    }

    pub fn points(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}
