use std::{collections::HashMap, str::FromStr};

use async_trait::async_trait;
use chrono::NaiveDate;
use fake_user_agent::get_rua;
use log::debug;
use serde_json::Value;

use crate::{
    config::Config,
    data::{
        Presence,
        stock::{CompanyProfile, DividendRecord, SplitRecord},
    },
    ds::MarketDataProvider,
    error::{DlError, DlResult},
    symbol::Symbol,
    utils::{
        datetime::{date_from_str, date_to_str},
        net::http_get,
    },
};

/// Financial Modeling Prep data source.
pub struct FmpProvider {
    api: String,
    api_key: String,
    timeout_secs: u64,
    max_retries: u64,
}

impl FmpProvider {
    pub fn new(api: &str, api_key: &str, timeout_secs: u64, max_retries: u64) -> Self {
        Self {
            api: api.to_string(),
            api_key: api_key.to_string(),
            timeout_secs,
            max_retries,
        }
    }

    pub fn from_config(config: &Config) -> DlResult<Self> {
        match config.api_key() {
            Some(api_key) => Ok(Self::new(
                &config.fmp_api,
                &api_key,
                config.timeout_secs,
                config.max_retries,
            )),
            None => Err(DlError::Invalid {
                code: "MISSING_API_KEY",
                message: "No FMP access key, run `config set fmp_api_key <KEY>` or set FMP_API_KEY"
                    .to_string(),
            }),
        }
    }

    async fn call_api(&self, path: &str, params: &[(&str, String)]) -> DlResult<Value> {
        let mut query: HashMap<String, String> = params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        query.insert("apikey".to_string(), self.api_key.clone());

        let mut headers: HashMap<String, String> = HashMap::new();
        headers.insert(
            reqwest::header::USER_AGENT.to_string(),
            get_rua().to_string(),
        );

        debug!("[FMP] GET {path}");

        let bytes = http_get(
            &self.api,
            Some(path),
            &query,
            &headers,
            self.timeout_secs,
            self.max_retries,
        )
        .await?;

        let json: Value = serde_json::from_slice(&bytes)?;

        Ok(json)
    }

    /// Probes every endpoint with a well-known symbol.
    pub async fn check(&self) -> Vec<(String, Option<DlError>)> {
        let mut status: Vec<(String, Option<DlError>)> = vec![];

        let symbol = match Symbol::from_str("AAPL") {
            Ok(symbol) => symbol,
            Err(err) => return vec![("Symbol".to_string(), Some(err))],
        };

        status.push((
            "Dividend history".to_string(),
            self.fetch_dividend_history(&symbol).await.err(),
        ));
        status.push((
            "Company profile".to_string(),
            self.fetch_company_profile(&symbol).await.err(),
        ));
        status.push((
            "Split calendar".to_string(),
            self.fetch_split_calendar(&symbol, &NaiveDate::default())
                .await
                .err(),
        ));

        status
    }
}

#[async_trait]
impl MarketDataProvider for FmpProvider {
    async fn fetch_dividend_history(
        &self,
        symbol: &Symbol,
    ) -> DlResult<Presence<Vec<DividendRecord>>> {
        let json = self
            .call_api(
                &format!("/historical-price-full/stock_dividend/{symbol}"),
                &[],
            )
            .await?;

        Ok(parse_dividend_history(&json))
    }

    async fn fetch_company_profile(&self, symbol: &Symbol) -> DlResult<CompanyProfile> {
        let json = self.call_api(&format!("/profile/{symbol}"), &[]).await?;

        Ok(parse_company_profile(&json))
    }

    async fn fetch_split_calendar(
        &self,
        symbol: &Symbol,
        from: &NaiveDate,
    ) -> DlResult<Presence<Vec<SplitRecord>>> {
        let json = self
            .call_api(
                &format!("/stock_split_calendar/{symbol}"),
                &[("from", date_to_str(from))],
            )
            .await?;

        Ok(parse_split_calendar(&json, symbol))
    }
}

pub fn parse_dividend_history(json: &Value) -> Presence<Vec<DividendRecord>> {
    let Some(array) = json.get("historical").and_then(Value::as_array) else {
        return Presence::Absent;
    };

    let mut records = vec![];
    for item in array {
        let date = item["date"].as_str().map(date_from_str);
        let adj_dividend = item["adjDividend"].as_f64();

        if let (Some(Ok(date)), Some(adj_dividend)) = (date, adj_dividend) {
            if adj_dividend.is_finite() && adj_dividend >= 0.0 {
                records.push(DividendRecord { date, adj_dividend });
                continue;
            }
        }

        debug!("[FMP] Skip malformed dividend entry {item}");
    }

    Presence::from_items(records)
}

pub fn parse_company_profile(json: &Value) -> CompanyProfile {
    let company_name = json
        .as_array()
        .and_then(|array| array.first())
        .and_then(|item| item["companyName"].as_str())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string);

    CompanyProfile { company_name }
}

pub fn parse_split_calendar(json: &Value, symbol: &Symbol) -> Presence<Vec<SplitRecord>> {
    let Some(array) = json.as_array() else {
        return Presence::Absent;
    };

    let mut splits = vec![];
    for item in array {
        // The calendar may list other securities
        if let Some(item_symbol) = item["symbol"].as_str() {
            if !item_symbol.eq_ignore_ascii_case(symbol.as_str()) {
                continue;
            }
        }

        let date = item["date"].as_str().map(date_from_str);
        let numerator = positive_integer(&item["numerator"]);
        let denominator = positive_integer(&item["denominator"]);

        if let (Some(Ok(date)), Some(numerator), Some(denominator)) = (date, numerator, denominator)
        {
            splits.push(SplitRecord {
                date,
                numerator,
                denominator,
            });
        } else {
            debug!("[FMP] Skip malformed split entry {item}");
        }
    }

    Presence::from_items(splits)
}

fn positive_integer(value: &Value) -> Option<u32> {
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).ok().filter(|n| *n > 0);
    }

    value
        .as_f64()
        .filter(|f| f.fract() == 0.0 && *f >= 1.0 && *f <= u32::MAX as f64)
        .map(|f| f as u32)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_dividend_history() {
        let json = json!({
            "symbol": "KO",
            "historical": [
                {
                    "date": "2024-11-29",
                    "label": "November 29, 24",
                    "adjDividend": 0.485,
                    "dividend": 0.485,
                    "recordDate": "2024-11-29",
                    "paymentDate": "2024-12-16",
                    "declarationDate": "2024-10-17"
                },
                {
                    "date": "2024-09-13",
                    "label": "September 13, 24",
                    "adjDividend": 0.485,
                    "dividend": 0.485
                }
            ]
        });

        assert_eq!(
            parse_dividend_history(&json),
            Presence::Populated(vec![
                DividendRecord::new(date(2024, 11, 29), 0.485),
                DividendRecord::new(date(2024, 9, 13), 0.485),
            ])
        );
    }

    #[test]
    fn test_parse_dividend_history_presence() {
        assert_eq!(parse_dividend_history(&json!({})), Presence::Absent);
        assert_eq!(parse_dividend_history(&json!([])), Presence::Absent);
        assert_eq!(
            parse_dividend_history(&json!({"symbol": "XYZ", "historical": []})),
            Presence::Empty
        );
    }

    #[test]
    fn test_parse_dividend_history_skips_malformed() {
        let json = json!({
            "historical": [
                {"date": "not a date", "adjDividend": 0.2},
                {"date": "2023-05-01"},
                {"date": "2023-06-01", "adjDividend": -0.1},
                {"date": "2023-07-01", "adjDividend": 0.0},
                "garbage"
            ]
        });

        assert_eq!(
            parse_dividend_history(&json),
            Presence::Populated(vec![DividendRecord::new(date(2023, 7, 1), 0.0)])
        );

        let json = json!({"historical": [{"date": "2023-05-01"}]});
        assert_eq!(parse_dividend_history(&json), Presence::Empty);
    }

    #[test]
    fn test_parse_company_profile() {
        let json = json!([{"symbol": "KO", "companyName": "The Coca-Cola Company"}]);
        assert_eq!(
            parse_company_profile(&json).company_name.as_deref(),
            Some("The Coca-Cola Company")
        );

        assert_eq!(parse_company_profile(&json!([])).company_name, None);
        assert_eq!(parse_company_profile(&json!({})).company_name, None);
        assert_eq!(
            parse_company_profile(&json!([{"companyName": "  "}])).company_name,
            None
        );
    }

    #[test]
    fn test_parse_split_calendar() {
        let symbol = Symbol::from_str("AAPL").unwrap();
        let json = json!([
            {"date": "2020-08-31", "label": "August 31, 20", "symbol": "AAPL", "numerator": 4, "denominator": 1},
            {"date": "2021-07-20", "symbol": "NVDA", "numerator": 4, "denominator": 1},
            {"date": "2014-06-09", "numerator": 7.0, "denominator": 1.0},
            {"date": "2019-01-01", "symbol": "AAPL", "numerator": 0, "denominator": 1},
            {"date": "2019-01-01", "symbol": "AAPL", "numerator": 1.5, "denominator": 1}
        ]);

        assert_eq!(
            parse_split_calendar(&json, &symbol),
            Presence::Populated(vec![
                SplitRecord::new(date(2020, 8, 31), 4, 1),
                SplitRecord::new(date(2014, 6, 9), 7, 1),
            ])
        );
    }

    #[test]
    fn test_parse_split_calendar_presence() {
        let symbol = Symbol::from_str("KO").unwrap();
        assert_eq!(
            parse_split_calendar(&json!({"Error Message": "Limit Reach"}), &symbol),
            Presence::Absent
        );
        assert_eq!(parse_split_calendar(&json!([]), &symbol), Presence::Empty);
    }

    #[test]
    fn test_positive_integer() {
        assert_eq!(positive_integer(&json!(3)), Some(3));
        assert_eq!(positive_integer(&json!(2.0)), Some(2));
        assert_eq!(positive_integer(&json!(0)), None);
        assert_eq!(positive_integer(&json!(-1)), None);
        assert_eq!(positive_integer(&json!(0.5)), None);
        assert_eq!(positive_integer(&json!("4")), None);
    }

    #[tokio::test]
    async fn test_unreachable_provider_keeps_key_out_of_errors() {
        let provider = FmpProvider::new("http://127.0.0.1:9/api/v3", "demo1234", 2, 0);
        let symbol = Symbol::from_str("KO").unwrap();

        let err = provider.fetch_dividend_history(&symbol).await.unwrap_err();

        assert!(err.is_transport());
        assert!(!err.to_string().contains("demo1234"), "{err}");
    }
}
