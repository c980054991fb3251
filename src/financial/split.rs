use serde::Serialize;

use crate::data::{Presence, stock::SplitRecord};

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(tag = "status", content = "splits", rename_all = "snake_case")]
pub enum SplitHistory {
    #[default]
    Absent,
    Sorted(Vec<SplitRecord>),
}

pub fn sort_splits_desc(mut splits: Vec<SplitRecord>) -> Vec<SplitRecord> {
    splits.sort_by(|a, b| b.date.cmp(&a.date));
    splits
}

pub fn sort_split_history(splits: Presence<Vec<SplitRecord>>) -> SplitHistory {
    match splits {
        Presence::Populated(splits) if !splits.is_empty() => {
            SplitHistory::Sorted(sort_splits_desc(splits))
        }
        _ => SplitHistory::Absent,
    }
}

impl SplitHistory {
    pub fn splits(&self) -> &[SplitRecord] {
        match self {
            Self::Sorted(splits) => splits,
            Self::Absent => &[],
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn split(y: i32, m: u32, d: u32, numerator: u32, denominator: u32) -> SplitRecord {
        SplitRecord::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), numerator, denominator)
    }

    #[test]
    fn test_sort_splits_desc() {
        let sorted = sort_splits_desc(vec![
            split(2014, 6, 9, 7, 1),
            split(2020, 8, 31, 4, 1),
            split(2005, 2, 28, 2, 1),
        ]);

        assert_eq!(
            sorted,
            vec![
                split(2020, 8, 31, 4, 1),
                split(2014, 6, 9, 7, 1),
                split(2005, 2, 28, 2, 1),
            ]
        );
        assert!(sorted.windows(2).all(|pair| pair[0].date >= pair[1].date));
        assert!(sort_splits_desc(vec![]).is_empty());
    }

    #[test]
    fn test_sort_split_history() {
        assert_eq!(sort_split_history(Presence::Absent), SplitHistory::Absent);
        assert_eq!(sort_split_history(Presence::Empty), SplitHistory::Absent);
        assert_eq!(
            sort_split_history(Presence::Populated(vec![])),
            SplitHistory::Absent
        );

        let history = sort_split_history(Presence::Populated(vec![
            split(2021, 7, 20, 4, 1),
            split(2022, 6, 6, 20, 1),
        ]));
        assert!(!history.is_absent());
        assert_eq!(history.splits()[0], split(2022, 6, 6, 20, 1));
        assert!(SplitHistory::Absent.splits().is_empty());
    }
}
