use colored::Colorize;
use divlens::{
    api,
    data::stock::{DividendRecord, SplitRecord},
    financial::{chart::ChartSeries, growth::GrowthTable},
    i18n::{Locale, Translations, parse_locale},
    pipeline::{DividendView, PipelineState},
    utils::datetime::date_from_str,
};
use indicatif::{ProgressBar, ProgressStyle};
use tabled::settings::{
    Alignment, Color,
    object::{Columns, Rows},
};
use tokio::time::Duration;

static CHART_BAR_WIDTH: f64 = 40.0;

#[derive(clap::Args)]
pub struct ShowCommand {
    #[arg(help = "Stock symbol, e.g. KO")]
    symbol: String,

    #[arg(
        short = 'l',
        long = "lang",
        value_parser = parse_locale,
        help = "Display language, zh or en, the default value comes from the configuration"
    )]
    lang: Option<Locale>,

    #[arg(long = "json", help = "Print the result as JSON")]
    json: bool,
}

impl ShowCommand {
    pub async fn exec(&self) {
        let locale = match self.lang {
            Some(locale) => locale,
            None => api::get_config()
                .await
                .map(|config| config.lang)
                .unwrap_or_default(),
        };
        let t = locale.translations();

        let pipeline = match api::dividend_pipeline().await {
            Ok(pipeline) => pipeline,
            Err(err) => {
                println!("[!] {}", err.to_string().red());
                return;
            }
        };

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{msg} [{elapsed}] {spinner:.cyan}") {
            spinner.set_style(style);
        }
        spinner.set_message(t.loading);
        spinner.enable_steady_tick(Duration::from_millis(100));

        let state = pipeline.run(&self.symbol).await.unwrap_or_else(|| pipeline.state());

        spinner.finish_and_clear();

        if self.json {
            match serde_json::to_string_pretty(&state) {
                Ok(json) => println!("{json}"),
                Err(err) => println!("[!] {}", err.to_string().red()),
            }
            return;
        }

        println!("{}", t.title.bold());

        match &state {
            PipelineState::Success(view) => render_view(view, locale),
            PipelineState::NoData { reason, .. } => {
                println!("[!] {}", t.no_data_message(reason).yellow());
            }
            PipelineState::Failed { kind, detail } => {
                println!("[!] {}", t.failure_message(kind, detail).red());
            }
            PipelineState::Idle | PipelineState::Fetching { .. } => {}
        }

        if !state.has_data() {
            render_tips(t);
        }
    }
}

fn render_view(view: &DividendView, locale: Locale) {
    let t = locale.translations();

    println!("\n{} {}", view.title().cyan(), t.dividend_history);
    render_chart(&view.chart, locale);

    println!("\n{}", t.dividend_growth.bold());
    render_growth(&view.growth, t);

    println!("\n{}", t.dividend_records.bold());
    render_records(view.records.descending(), locale);

    if !view.splits.is_absent() {
        println!("\n{}", t.stock_split_history.bold());
        render_splits(view.splits.splits(), locale);
    }
}

fn render_chart(chart: &ChartSeries, locale: Locale) {
    let t = locale.translations();

    let mut table_data: Vec<Vec<String>> = vec![vec![
        t.date.to_string(),
        t.adjusted_dividend.to_string(),
        format!("${:.4} ~ ${:.4}", chart.y_axis_min, chart.y_axis_max),
    ]];
    for (label, value) in chart.points() {
        let bar_len = ((chart.scale(value) * CHART_BAR_WIDTH).round() as usize).max(1);
        table_data.push(vec![
            localize_label(label, locale),
            format!("${value:.4}"),
            "█".repeat(bar_len),
        ]);
    }

    let mut table = tabled::builder::Builder::from_iter(&table_data).build();
    table.modify(Rows::first(), Color::FG_BRIGHT_BLACK);
    table.modify(Columns::new(1..2), Alignment::right());
    table.modify(Columns::new(2..3), Color::FG_CYAN);
    println!("{table}");

    if chart.is_flat() {
        println!("{}", t.flat_axis.bright_black());
    }
}

fn render_growth(growth: &GrowthTable, t: &Translations) {
    let table_data: Vec<Vec<String>> = vec![
        growth
            .iter()
            .map(|item| format!("{} {}", item.years, t.years))
            .collect(),
        growth.iter().map(|item| item.figure.to_string()).collect(),
    ];

    let mut table = tabled::builder::Builder::from_iter(&table_data).build();
    table.modify(Rows::first(), Color::FG_BRIGHT_BLACK);
    table.modify(Columns::new(0..), Alignment::right());
    println!("{table}");
}

fn render_records(records: &[DividendRecord], locale: Locale) {
    let t = locale.translations();

    let mut table_data: Vec<Vec<String>> =
        vec![vec![t.date.to_string(), t.adjusted_dividend.to_string()]];
    for record in records {
        table_data.push(vec![
            locale.format_date(&record.date),
            format!("{:.4}", record.adj_dividend),
        ]);
    }

    let mut table = tabled::builder::Builder::from_iter(&table_data).build();
    table.modify(Rows::first(), Color::FG_BRIGHT_BLACK);
    table.modify(Columns::new(1..2), Alignment::right());
    println!("{table}");
}

fn render_splits(splits: &[SplitRecord], locale: Locale) {
    let t = locale.translations();

    let mut table_data: Vec<Vec<String>> =
        vec![vec![t.date.to_string(), t.split_ratio.to_string()]];
    for split in splits {
        table_data.push(vec![locale.format_date(&split.date), split.to_string()]);
    }

    let mut table = tabled::builder::Builder::from_iter(&table_data).build();
    table.modify(Rows::first(), Color::FG_BRIGHT_BLACK);
    table.modify(Columns::new(1..2), Alignment::right());
    println!("{table}");
}

fn render_tips(t: &Translations) {
    println!("\n{}:", t.instructions.bold());
    println!("  {}", t.examples);
    for example in t.example_symbols {
        println!("    - {}", example.cyan());
    }

    println!("  {}", t.notes);
    for note in t.note_lines {
        println!("    - {note}");
    }
}

fn localize_label(label: &str, locale: Locale) -> String {
    date_from_str(label)
        .map(|date| locale.format_date(&date))
        .unwrap_or_else(|_| label.to_string())
}
