use colored::Colorize;
use divlens::api;
use tabled::settings::{Color, object::Columns};

#[derive(clap::Args)]
pub struct ConfigShowCommand;

impl ConfigShowCommand {
    pub async fn exec(&self) {
        match api::get_config().await {
            Ok(config) => {
                let table_data: Vec<Vec<String>> = vec![
                    vec![
                        "path".to_string(),
                        api::get_config_path().to_string_lossy().to_string(),
                    ],
                    vec!["fmp_api".to_string(), config.fmp_api.to_string()],
                    vec!["fmp_api_key".to_string(), config.masked_api_key()],
                    vec!["lang".to_string(), config.lang.to_string()],
                    vec![
                        "split_calendar_from".to_string(),
                        config.split_calendar_from.to_string(),
                    ],
                    vec!["timeout_secs".to_string(), config.timeout_secs.to_string()],
                    vec!["max_retries".to_string(), config.max_retries.to_string()],
                ];

                let mut table = tabled::builder::Builder::from_iter(&table_data).build();
                table.modify(Columns::first(), Color::FG_CYAN);
                println!("{table}");
            }
            Err(err) => {
                println!("[!] {}", err.to_string().red());
            }
        }
    }
}
