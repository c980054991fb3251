use std::fmt::Display;

use serde::Serialize;

use crate::data::stock::DividendRecord;

pub const DIVIDEND_GROWTH_HORIZONS: [u32; 3] = [3, 5, 10];

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthFigure {
    Rate(f64),
    NotAvailable,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HorizonGrowth {
    pub years: u32,
    pub figure: GrowthFigure,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct GrowthTable(Vec<HorizonGrowth>);

/// Compounded annual dividend growth between the latest record and the record
/// `horizon_years - 1` steps back, with records ordered newest first.
///
/// The lookback index is capped at the last record while the exponent keeps
/// using `horizon_years`, so short histories give an approximate figure.
pub fn dividend_growth(records: &[DividendRecord], horizon_years: u32) -> GrowthFigure {
    let available = records.len();
    if horizon_years == 0 || available < horizon_years as usize {
        return GrowthFigure::NotAvailable;
    }

    let latest = records[0].adj_dividend;
    let oldest_index = (horizon_years as usize - 1).min(available - 1);
    let oldest = records[oldest_index].adj_dividend;

    if oldest == 0.0 {
        return GrowthFigure::NotAvailable;
    }

    let rate = ((latest / oldest).powf(1.0 / horizon_years as f64) - 1.0) * 100.0;
    if rate.is_finite() {
        GrowthFigure::Rate(round_to_cents(rate))
    } else {
        GrowthFigure::NotAvailable
    }
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl Display for GrowthFigure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rate(rate) => write!(f, "{rate:.2}%"),
            Self::NotAvailable => write!(f, "N/A"),
        }
    }
}

impl GrowthTable {
    pub fn new(records: &[DividendRecord], horizons: &[u32]) -> Self {
        Self(
            horizons
                .iter()
                .map(|&years| HorizonGrowth {
                    years,
                    figure: dividend_growth(records, years),
                })
                .collect(),
        )
    }

    pub fn get(&self, years: u32) -> Option<GrowthFigure> {
        self.0
            .iter()
            .find(|item| item.years == years)
            .map(|item| item.figure)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HorizonGrowth> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn descending(values: &[f64]) -> Vec<DividendRecord> {
        let start = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                DividendRecord::new(start - chrono::Months::new(12 * i as u32), v)
            })
            .collect()
    }

    #[test]
    fn test_dividend_growth() {
        let records = descending(&[1.10, 1.05, 1.00]);
        assert_eq!(dividend_growth(&records, 3), GrowthFigure::Rate(3.23));

        let records = descending(&[0.70, 0.65, 0.60, 0.55, 0.50]);
        assert_eq!(dividend_growth(&records, 3), GrowthFigure::Rate(5.27));
        assert_eq!(dividend_growth(&records, 5), GrowthFigure::Rate(6.96));
    }

    #[test]
    fn test_dividend_growth_not_enough_records() {
        let records = descending(&[0.70, 0.65, 0.60, 0.55, 0.50]);
        assert_eq!(dividend_growth(&records, 10), GrowthFigure::NotAvailable);
        assert_eq!(dividend_growth(&[], 3), GrowthFigure::NotAvailable);
    }

    #[test]
    fn test_dividend_growth_zero_oldest() {
        let records = descending(&[0.50, 0.40, 0.0, 0.30]);
        assert_eq!(dividend_growth(&records, 3), GrowthFigure::NotAvailable);
    }

    #[test]
    fn test_dividend_growth_uses_horizon_as_depth() {
        // More records than the horizon: only the first `horizon` count
        let records = descending(&[2.0, 1.5, 1.0, 0.1, 0.1, 0.1]);
        assert_eq!(dividend_growth(&records, 3), GrowthFigure::Rate(25.99));
    }

    #[test]
    fn test_dividend_growth_flat_and_cut() {
        let records = descending(&[0.5, 0.5, 0.5]);
        assert_eq!(dividend_growth(&records, 3), GrowthFigure::Rate(0.0));

        let records = descending(&[0.0, 0.5, 0.5]);
        assert_eq!(dividend_growth(&records, 3), GrowthFigure::Rate(-100.0));
    }

    #[test]
    fn test_growth_figure_display() {
        assert_eq!(GrowthFigure::Rate(5.27).to_string(), "5.27%");
        assert_eq!(GrowthFigure::Rate(-3.5).to_string(), "-3.50%");
        assert_eq!(GrowthFigure::NotAvailable.to_string(), "N/A");
    }

    #[test]
    fn test_growth_table() {
        let records = descending(&[0.70, 0.65, 0.60, 0.55, 0.50]);
        let table = GrowthTable::new(&records, &DIVIDEND_GROWTH_HORIZONS);

        assert_eq!(table.iter().count(), 3);
        assert_eq!(table.get(3), Some(GrowthFigure::Rate(5.27)));
        assert_eq!(table.get(10), Some(GrowthFigure::NotAvailable));
        assert_eq!(table.get(7), None);
    }
}
