use std::path::PathBuf;

use crate::{
    CONFIG, CONFIG_PATH,
    config::Config,
    ds::fmp::FmpProvider,
    error::*,
    pipeline::{DividendPipeline, PipelineOptions},
};

pub async fn check() -> DlResult<Vec<(String, Option<DlError>)>> {
    let config = { CONFIG.read().await.clone() };
    let provider = FmpProvider::from_config(&config)?;

    Ok(provider.check().await)
}

pub async fn dividend_pipeline() -> DlResult<DividendPipeline<FmpProvider>> {
    let config = { CONFIG.read().await.clone() };
    let provider = FmpProvider::from_config(&config)?;

    let options = PipelineOptions {
        split_calendar_from: config.split_calendar_start()?,
        timeout: config.fetch_timeout(),
        ..Default::default()
    };

    Ok(DividendPipeline::new(provider, options))
}

pub async fn get_config() -> DlResult<Config> {
    Ok(CONFIG.read().await.clone())
}

pub fn get_config_path() -> PathBuf {
    CONFIG_PATH.to_path_buf()
}

pub async fn set_config(key: &str, value: &str) -> DlResult<()> {
    let mut config = CONFIG.write().await;

    let mut updated = config.clone();
    updated.set(key, value)?;
    updated.store(&CONFIG_PATH)?;

    *config = updated;

    Ok(())
}
