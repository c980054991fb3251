use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{
    data::{
        Presence,
        stock::{CompanyProfile, DividendRecord, SplitRecord},
    },
    error::DlResult,
    symbol::Symbol,
};

pub mod fmp;

/// Read-only market-data endpoints keyed by symbol.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    async fn fetch_dividend_history(
        &self,
        symbol: &Symbol,
    ) -> DlResult<Presence<Vec<DividendRecord>>>;

    async fn fetch_company_profile(&self, symbol: &Symbol) -> DlResult<CompanyProfile>;

    async fn fetch_split_calendar(
        &self,
        symbol: &Symbol,
        from: &NaiveDate,
    ) -> DlResult<Presence<Vec<SplitRecord>>>;
}
