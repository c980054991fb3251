use std::{env, path::Path, str::FromStr, time::Duration};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    error::{DlError, DlResult},
    i18n::Locale,
    utils::datetime::date_from_str,
};

pub static API_KEY_ENV: &str = "FMP_API_KEY";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    pub fmp_api: String,
    pub fmp_api_key: String,
    pub lang: Locale,
    pub split_calendar_from: String,
    pub timeout_secs: u64,
    pub max_retries: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fmp_api: "https://financialmodelingprep.com/api/v3".to_string(),
            fmp_api_key: String::new(),
            lang: Locale::default(),
            split_calendar_from: "2019-01-01".to_string(),
            timeout_secs: 30,
            max_retries: 0,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> DlResult<Self> {
        confy::load_path(path).map_err(Into::into)
    }

    pub fn store(&self, path: &Path) -> DlResult<()> {
        confy::store_path(path, self).map_err(Into::into)
    }

    /// The environment variable wins over the stored key.
    pub fn api_key(&self) -> Option<String> {
        env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| Some(self.fmp_api_key.clone()).filter(|key| !key.trim().is_empty()))
    }

    pub fn split_calendar_start(&self) -> DlResult<NaiveDate> {
        date_from_str(&self.split_calendar_from)
    }

    /// Bound for one provider call: every attempt plus the backoff wait before
    /// each retry, both capped at `timeout_secs`.
    pub fn fetch_timeout(&self) -> Duration {
        let attempts_and_waits = self.max_retries.saturating_mul(2).saturating_add(1);
        Duration::from_secs(self.timeout_secs.max(1).saturating_mul(attempts_and_waits))
    }

    pub fn set(&mut self, key: &str, value: &str) -> DlResult<()> {
        let value = value.trim();

        match key.to_lowercase().as_str() {
            "fmp_api" => {
                url::Url::parse(value)?;
                self.fmp_api = value.to_string();
            }
            "fmp_api_key" => {
                self.fmp_api_key = value.to_string();
            }
            "lang" => {
                self.lang = Locale::from_str(value)?;
            }
            "split_calendar_from" => {
                date_from_str(value)?;
                self.split_calendar_from = value.to_string();
            }
            "timeout_secs" => {
                self.timeout_secs = parse_number(key, value)?.max(1);
            }
            "max_retries" => {
                self.max_retries = parse_number(key, value)?;
            }
            _ => {
                return Err(DlError::Invalid {
                    code: "UNKNOWN_CONFIG_KEY",
                    message: format!("Unknown configuration '{key}'"),
                });
            }
        }

        Ok(())
    }

    pub fn masked_api_key(&self) -> String {
        let key = self.fmp_api_key.trim();
        let shown = if key.chars().count() > 4 { 4 } else { 0 };

        if key.is_empty() {
            "-".to_string()
        } else {
            key.chars()
                .enumerate()
                .map(|(i, c)| if i < shown { c } else { '*' })
                .collect()
        }
    }
}

fn parse_number(key: &str, value: &str) -> DlResult<u64> {
    value.parse::<u64>().map_err(|_| DlError::Invalid {
        code: "INVALID_CONFIG_VALUE",
        message: format!("Invalid value '{value}' for '{key}'"),
    })
}
