//! One fetch cycle per symbol: dividend history first, then company profile
//! and split calendar, folded into a single [`PipelineState`] value.
//!
//! Every transition replaces the whole state through a `watch` channel, so a
//! subscriber never sees records of one symbol next to the chart of another.
//! Only the dividend history is mandatory; profile and splits degrade to
//! "absent" on failure.

use std::{future::Future, str::FromStr, time::Duration};

use chrono::{Local, NaiveDate};
use log::{debug, error, info, warn};
use serde::Serialize;
use tokio::{
    sync::{Mutex, watch},
    time::timeout,
};

use crate::{
    data::Presence,
    ds::MarketDataProvider,
    error::{DlError, DlResult},
    financial::{
        chart::ChartSeries,
        growth::{DIVIDEND_GROWTH_HORIZONS, GrowthTable},
        split::{SplitHistory, sort_split_history},
        window::{WindowedRecordSet, filter_trailing_window},
    },
    symbol::Symbol,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, strum::Display)]
pub enum FailureKind {
    InvalidInput,
    ProviderUnavailable,
    UnknownFailure,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, strum::Display)]
pub enum NoDataReason {
    NoDividendData,
    NoRecentDividendData,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DividendView {
    pub symbol: Symbol,
    pub company_name: Option<String>,
    pub records: WindowedRecordSet,
    pub chart: ChartSeries,
    pub growth: GrowthTable,
    pub splits: SplitHistory,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PipelineState {
    #[default]
    Idle,
    Fetching {
        symbol: Symbol,
    },
    Success(Box<DividendView>),
    NoData {
        symbol: Symbol,
        reason: NoDataReason,
    },
    Failed {
        kind: FailureKind,
        detail: String,
    },
}

#[derive(Clone, Debug)]
pub struct PipelineOptions {
    pub growth_horizons: Vec<u32>,
    pub split_calendar_from: NaiveDate,
    pub timeout: Duration,
}

pub struct DividendPipeline<P> {
    provider: P,
    options: PipelineOptions,
    state: watch::Sender<PipelineState>,
    cycle: Mutex<()>,
}

impl From<&DlError> for FailureKind {
    fn from(err: &DlError) -> Self {
        match err {
            DlError::Invalid {
                code: "MISSING_SYMBOL" | "INVALID_SYMBOL",
                ..
            } => Self::InvalidInput,
            err if err.is_transport() => Self::ProviderUnavailable,
            _ => Self::UnknownFailure,
        }
    }
}

impl DividendView {
    pub fn title(&self) -> String {
        match &self.company_name {
            Some(name) => format!("{name} ({})", self.symbol),
            None => self.symbol.to_string(),
        }
    }
}

impl PipelineState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Fetching { .. })
    }

    pub fn has_data(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn view(&self) -> Option<&DividendView> {
        match self {
            Self::Success(view) => Some(view),
            _ => None,
        }
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            growth_horizons: DIVIDEND_GROWTH_HORIZONS.to_vec(),
            split_calendar_from: NaiveDate::from_ymd_opt(2019, 1, 1).unwrap_or_default(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl<P: MarketDataProvider> DividendPipeline<P> {
    pub fn new(provider: P, options: PipelineOptions) -> Self {
        let (state, _) = watch::channel(PipelineState::Idle);

        Self {
            provider,
            options,
            state,
            cycle: Mutex::new(()),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn subscribe(&self) -> watch::Receiver<PipelineState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> PipelineState {
        self.state.borrow().clone()
    }

    pub async fn run(&self, input: &str) -> Option<PipelineState> {
        self.run_at(input, &Local::now().date_naive()).await
    }

    /// Runs one cycle with `today` as the end of the trailing window.
    ///
    /// Returns `None` without touching the state when another cycle is still
    /// in flight.
    pub async fn run_at(&self, input: &str, today: &NaiveDate) -> Option<PipelineState> {
        let Ok(_cycle) = self.cycle.try_lock() else {
            warn!("[Pipeline] Ignore '{input}', another cycle is in flight");
            return None;
        };

        let state = self.execute(input, today).await;
        self.transition(state.clone());

        Some(state)
    }

    fn transition(&self, state: PipelineState) {
        debug!("[Pipeline] -> {}", state_name(&state));
        self.state.send_replace(state);
    }

    async fn execute(&self, input: &str, today: &NaiveDate) -> PipelineState {
        let symbol = match Symbol::from_str(input) {
            Ok(symbol) => symbol,
            Err(err) => {
                warn!("[Pipeline] {err}");
                // The rejected text itself, empty when nothing was entered
                return PipelineState::Failed {
                    kind: FailureKind::from(&err),
                    detail: input.trim().to_string(),
                };
            }
        };

        self.transition(PipelineState::Fetching {
            symbol: symbol.clone(),
        });

        match self.derive(&symbol, today).await {
            Ok(state) => state,
            Err(err) => {
                error!("[Pipeline] [{symbol}] {err}");
                PipelineState::Failed {
                    kind: FailureKind::from(&err),
                    detail: err.to_string(),
                }
            }
        }
    }

    async fn derive(&self, symbol: &Symbol, today: &NaiveDate) -> DlResult<PipelineState> {
        let history = self
            .bounded(self.provider.fetch_dividend_history(symbol))
            .await?;

        let records = match history {
            Presence::Populated(records) if !records.is_empty() => records,
            _ => {
                info!("[Pipeline] [{symbol}] No dividend history");
                return Ok(PipelineState::NoData {
                    symbol: symbol.clone(),
                    reason: NoDataReason::NoDividendData,
                });
            }
        };

        let records: WindowedRecordSet = filter_trailing_window(&records, today);
        if records.is_empty() {
            info!(
                "[Pipeline] [{symbol}] No dividend since {}",
                records.window_start()
            );
            return Ok(PipelineState::NoData {
                symbol: symbol.clone(),
                reason: NoDataReason::NoRecentDividendData,
            });
        }

        let (company_name, splits) = tokio::join!(
            self.fetch_company_name(symbol),
            self.fetch_split_history(symbol)
        );

        let growth = GrowthTable::new(records.descending(), &self.options.growth_horizons);
        let chart = ChartSeries::from_records(records.ascending());

        Ok(PipelineState::Success(Box::new(DividendView {
            symbol: symbol.clone(),
            company_name,
            records,
            chart,
            growth,
            splits,
        })))
    }

    async fn bounded<T>(&self, fetch: impl Future<Output = DlResult<T>>) -> DlResult<T> {
        timeout(self.options.timeout, fetch).await?
    }

    async fn fetch_company_name(&self, symbol: &Symbol) -> Option<String> {
        match self
            .bounded(self.provider.fetch_company_profile(symbol))
            .await
        {
            Ok(profile) => profile.company_name,
            Err(err) => {
                warn!("[Pipeline] [{symbol}] Company profile unavailable: {err}");
                None
            }
        }
    }

    async fn fetch_split_history(&self, symbol: &Symbol) -> SplitHistory {
        match self
            .bounded(
                self.provider
                    .fetch_split_calendar(symbol, &self.options.split_calendar_from),
            )
            .await
        {
            Ok(splits) => sort_split_history(splits),
            Err(err) => {
                warn!("[Pipeline] [{symbol}] Split calendar unavailable: {err}");
                SplitHistory::Absent
            }
        }
    }
}

fn state_name(state: &PipelineState) -> String {
    match state {
        PipelineState::Idle => "Idle".to_string(),
        PipelineState::Fetching { symbol } => format!("Fetching({symbol})"),
        PipelineState::Success(view) => format!("Success({})", view.symbol),
        PipelineState::NoData { symbol, reason } => format!("NoData({symbol}, {reason})"),
        PipelineState::Failed { kind, .. } => format!("Failed({kind})"),
    }
}
