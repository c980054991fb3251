use colored::Colorize;
use divlens::api;
use tabled::settings::{Color, object::Columns};

#[derive(clap::Args)]
pub struct ConfigSetCommand {
    key: String,
    value: String,
}

impl ConfigSetCommand {
    pub async fn exec(&self) {
        match api::set_config(&self.key, &self.value).await {
            Ok(_) => {
                let value = if self.key.eq_ignore_ascii_case("fmp_api_key") {
                    match api::get_config().await {
                        Ok(config) => config.masked_api_key(),
                        Err(_) => "-".to_string(),
                    }
                } else {
                    self.value.trim().to_string()
                };

                let table_data: Vec<Vec<String>> = vec![vec![self.key.to_lowercase(), value]];

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
