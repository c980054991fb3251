use chrono::NaiveDate;
use itertools::Itertools;
use serde::Serialize;

use crate::{data::stock::DividendRecord, utils::datetime::years_before};

pub const TRAILING_WINDOW_YEARS: u32 = 5;

/// Dividend records inside the trailing window, newest first.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct WindowedRecordSet {
    window_start: NaiveDate,
    records: Vec<DividendRecord>,
}

pub fn filter_trailing_window(records: &[DividendRecord], today: &NaiveDate) -> WindowedRecordSet {
    let window_start = years_before(today, TRAILING_WINDOW_YEARS);

    // Stable sort keeps input order among equal dates
    let records = records
        .iter()
        .filter(|record| record.date >= window_start)
        .cloned()
        .sorted_by(|a, b| b.date.cmp(&a.date))
        .collect();

    WindowedRecordSet {
        window_start,
        records,
    }
}

impl WindowedRecordSet {
    pub fn window_start(&self) -> &NaiveDate {
        &self.window_start
    }

    /// Table order.
    pub fn descending(&self) -> &[DividendRecord] {
        &self.records
    }

    /// Chart order.
    pub fn ascending(&self) -> impl DoubleEndedIterator<Item = &DividendRecord> + ExactSizeIterator {
        self.records.iter().rev()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_filter_trailing_window() {
        let records = vec![
            DividendRecord::new(date(2019, 6, 1), 0.40),
            DividendRecord::new(date(2023, 6, 1), 0.46),
            DividendRecord::new(date(2021, 1, 14), 0.41),
            DividendRecord::new(date(2025, 6, 1), 0.50),
            DividendRecord::new(date(2021, 1, 15), 0.42),
        ];
        let today = date(2026, 1, 15);

        let windowed = filter_trailing_window(&records, &today);

        assert_eq!(windowed.window_start(), &date(2021, 1, 15));
        assert_eq!(
            windowed
                .descending()
                .iter()
                .map(|r| r.date)
                .collect::<Vec<_>>(),
            vec![date(2025, 6, 1), date(2023, 6, 1), date(2021, 1, 15)]
        );
        assert!(windowed.descending().iter().all(|r| r.date >= today - chrono::Months::new(60)));
        assert!(
            windowed
                .descending()
                .windows(2)
                .all(|pair| pair[0].date >= pair[1].date)
        );
    }

    #[test]
    fn test_ascending_view_reverses_descending() {
        let records = vec![
            DividendRecord::new(date(2024, 3, 1), 0.3),
            DividendRecord::new(date(2025, 3, 1), 0.4),
            DividendRecord::new(date(2023, 3, 1), 0.2),
        ];
        let windowed = filter_trailing_window(&records, &date(2025, 10, 1));

        let ascending: Vec<f64> = windowed.ascending().map(|r| r.adj_dividend).collect();
        assert_eq!(ascending, vec![0.2, 0.3, 0.4]);
        assert_eq!(windowed.len(), 3);
    }

    #[test]
    fn test_equal_dates_keep_input_order() {
        let records = vec![
            DividendRecord::new(date(2024, 3, 1), 0.10),
            DividendRecord::new(date(2025, 3, 1), 0.20),
            DividendRecord::new(date(2024, 3, 1), 0.11),
            DividendRecord::new(date(2024, 3, 1), 0.12),
        ];
        let windowed = filter_trailing_window(&records, &date(2025, 10, 1));

        let values: Vec<f64> = windowed.descending().iter().map(|r| r.adj_dividend).collect();
        assert_eq!(values, vec![0.20, 0.10, 0.11, 0.12]);
    }

    #[test]
    fn test_everything_outside_window() {
        let records = vec![
            DividendRecord::new(date(2010, 3, 1), 0.10),
            DividendRecord::new(date(2012, 3, 1), 0.20),
        ];
        let windowed = filter_trailing_window(&records, &date(2025, 10, 1));

        assert!(windowed.is_empty());
    }
}
