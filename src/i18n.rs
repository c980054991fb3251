//! Display strings for the two supported locales.
//!
//! The pipeline never formats for display; everything user-facing goes
//! through [`Translations`] and [`Locale::format_date`].

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    error::DlResult,
    pipeline::{FailureKind, NoDataReason},
};

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Locale {
    #[default]
    Zh,
    En,
}

pub struct Translations {
    pub title: &'static str,
    pub loading: &'static str,
    pub please_enter_symbol: &'static str,
    pub invalid_symbol: &'static str,
    pub no_data: &'static str,
    pub no_recent_data: &'static str,
    pub error_fetch: &'static str,
    pub dividend_history: &'static str,
    pub adjusted_dividend: &'static str,
    pub date: &'static str,
    pub dividend_growth: &'static str,
    pub years: &'static str,
    pub dividend_records: &'static str,
    pub stock_split_history: &'static str,
    pub split_ratio: &'static str,
    pub flat_axis: &'static str,
    pub instructions: &'static str,
    pub examples: &'static str,
    pub example_symbols: &'static [&'static str],
    pub notes: &'static str,
    pub note_lines: &'static [&'static str],
}

static EXAMPLE_SYMBOLS: &[&str] = &[
    "AAPL - Apple Inc.",
    "MSFT - Microsoft Corporation",
    "JNJ - Johnson & Johnson",
    "KO - The Coca-Cola Company",
    "PG - Procter & Gamble Company",
];

static ZH: Translations = Translations {
    title: "美股股息历史查询",
    loading: "加载中...",
    please_enter_symbol: "请输入股票代码",
    invalid_symbol: "无效的股票代码",
    no_data: "未找到该股票的股息数据",
    no_recent_data: "最近5年没有股息数据",
    error_fetch: "获取数据失败",
    dividend_history: "股息历史",
    adjusted_dividend: "调整后股息",
    date: "日期",
    dividend_growth: "股息成长率",
    years: "年",
    dividend_records: "股息发放记录",
    stock_split_history: "股票分拆历史",
    split_ratio: "分拆比例",
    flat_axis: "股息金额保持不变",
    instructions: "使用说明",
    examples: "输入美股代码查询股息历史，例如：",
    example_symbols: EXAMPLE_SYMBOLS,
    notes: "注意事项：",
    note_lines: &[
        "仅显示最近5年的股息数据",
        "股息金额已按拆股进行调整",
        "股息成长率为复合年增长率，记录不足时显示 N/A",
    ],
};

static EN: Translations = Translations {
    title: "US Stock Dividend History",
    loading: "Loading...",
    please_enter_symbol: "Please enter a stock symbol",
    invalid_symbol: "Invalid stock symbol",
    no_data: "No dividend data found for this symbol",
    no_recent_data: "No dividend data in the last 5 years",
    error_fetch: "Failed to fetch data",
    dividend_history: "Dividend History",
    adjusted_dividend: "Adjusted Dividend",
    date: "Date",
    dividend_growth: "Dividend Growth Rate",
    years: "Years",
    dividend_records: "Dividend Records",
    stock_split_history: "Stock Split History",
    split_ratio: "Split Ratio",
    flat_axis: "Dividend amount unchanged",
    instructions: "Instructions",
    examples: "Enter a US stock symbol to look up its dividend history, e.g.:",
    example_symbols: EXAMPLE_SYMBOLS,
    notes: "Notes:",
    note_lines: &[
        "Only dividends from the last 5 years are shown",
        "Dividend amounts are adjusted for stock splits",
        "Growth rates are compounded annually and show N/A when records are insufficient",
    ],
};

pub fn parse_locale(s: &str) -> DlResult<Locale> {
    Ok(Locale::from_str(s.trim())?)
}

impl Locale {
    pub fn translations(&self) -> &'static Translations {
        match self {
            Self::Zh => &ZH,
            Self::En => &EN,
        }
    }

    pub fn format_date(&self, date: &NaiveDate) -> String {
        match self {
            Self::Zh => date.format("%Y/%-m/%-d").to_string(),
            Self::En => date.format("%m/%d/%Y").to_string(),
        }
    }
}

impl Translations {
    pub fn failure_message(&self, kind: &FailureKind, detail: &str) -> String {
        match kind {
            FailureKind::InvalidInput if detail.trim().is_empty() => {
                self.please_enter_symbol.to_string()
            }
            FailureKind::InvalidInput => format!("{}: {detail}", self.invalid_symbol),
            FailureKind::ProviderUnavailable | FailureKind::UnknownFailure => {
                format!("{}: {detail}", self.error_fetch)
            }
        }
    }

    pub fn no_data_message(&self, reason: &NoDataReason) -> &'static str {
        match reason {
            NoDataReason::NoDividendData => self.no_data,
            NoDataReason::NoRecentDividendData => self.no_recent_data,
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_parse_locale() {
        assert_eq!(parse_locale("zh").unwrap(), Locale::Zh);
        assert_eq!(parse_locale(" EN ").unwrap(), Locale::En);
        assert!(parse_locale("fr").is_err());
        assert_eq!(Locale::En.to_string(), "en");
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(Locale::Zh.format_date(&date), "2024/3/5");
        assert_eq!(Locale::En.format_date(&date), "03/05/2024");
    }

    #[test]
    fn test_messages_are_distinct() {
        for locale in Locale::iter() {
            let t = locale.translations();
            assert_ne!(
                t.no_data_message(&NoDataReason::NoDividendData),
                t.no_data_message(&NoDataReason::NoRecentDividendData)
            );
            assert_eq!(
                t.failure_message(&FailureKind::InvalidInput, ""),
                t.please_enter_symbol
            );
            assert_eq!(
                t.failure_message(&FailureKind::InvalidInput, "KO/X"),
                format!("{}: KO/X", t.invalid_symbol)
            );
            assert!(
                t.failure_message(&FailureKind::ProviderUnavailable, "503 Service Unavailable")
                    .ends_with("503 Service Unavailable")
            );
        }
    }
}
