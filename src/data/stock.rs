use std::fmt::Display;

use chrono::NaiveDate;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DividendRecord {
    pub date: NaiveDate,
    pub adj_dividend: f64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SplitRecord {
    pub date: NaiveDate,
    pub numerator: u32,
    pub denominator: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CompanyProfile {
    pub company_name: Option<String>,
}

impl DividendRecord {
    pub fn new(date: NaiveDate, adj_dividend: f64) -> Self {
        Self { date, adj_dividend }
    }
}

impl SplitRecord {
    pub fn new(date: NaiveDate, numerator: u32, denominator: u32) -> Self {
        Self {
            date,
            numerator,
            denominator,
        }
    }
}

impl Display for SplitRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.numerator, self.denominator)
    }
}
