use clap::Subcommand;

mod check;
mod config;
mod show;

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Check the market-data provider endpoints")]
    Check(Box<check::CheckCommand>),

    #[command(about = "Show or change configurations", subcommand)]
    Config(Box<config::ConfigCommand>),

    #[command(about = "Show dividend history of a stock")]
    #[clap(visible_aliases = &["div"])]
    Show(Box<show::ShowCommand>),
}
