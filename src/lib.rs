//! # divlens lib

use std::{env, path::PathBuf, sync::LazyLock};

use directories::ProjectDirs;
use log::warn;
use tokio::sync::RwLock;

use crate::config::Config;

pub mod api;
pub mod config;
pub mod data;
pub mod ds;
pub mod error;
pub mod financial;
pub mod i18n;
pub mod pipeline;
pub mod symbol;
pub mod utils;

pub static VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn init() {
    env_logger::Builder::new()
        .parse_filters(env::var("LOG").as_deref().unwrap_or("off"))
        .init();
}

static CONFIG_PATH: LazyLock<PathBuf> = LazyLock::new(|| {
    match ProjectDirs::from("", "", env!("CARGO_PKG_NAME")) {
        Some(proj_dirs) => proj_dirs.config_dir().to_path_buf(),
        None => env::current_dir().unwrap_or_default(),
    }
    .join("config.toml")
});

static CONFIG: LazyLock<RwLock<Config>> = LazyLock::new(|| {
    RwLock::new(Config::load(&CONFIG_PATH).unwrap_or_else(|err| {
        warn!("Load config error, fallback to defaults: {err}");
        Config::default()
    }))
});
