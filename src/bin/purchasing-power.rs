//! purchasing-power CLI - purchasing-power erosion dashboard in the terminal
//!
//! ## Example Usage
//!
//! ```bash
//! # 1000 USD a month since January 2022, with today's live rate
//! purchasing-power analyze --amount 1000 --currency USD --start 2022-01 --live
//!
//! # Fixed guaraní salary, exported as CSV
//! purchasing-power analyze -a 5000000 -c PYG -s 2023-01 -e 2024-12 --format csv -o pyg.csv
//!
//! # Show the effective exchange-rate table
//! purchasing-power rates --live
//!
//! # Keep the current month's rate fresh until Ctrl-C
//! purchasing-power watch --interval-secs 900
//! ```

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use purchasing_power::calendar::{month_count, MonthKey};
use purchasing_power::currency::CurrencyBasis;
use purchasing_power::data::sources::{ExchangeRateApiSource, EXCHANGERATE_API_URL};
use purchasing_power::data::{reference_inflation, reference_rates, InflationTable, RateProvider, RateTable};
use purchasing_power::finance::constants::{
    DEFAULT_EXCHANGE_RATE, DEFAULT_MONTHLY_INFLATION, DEFAULT_REFRESH_INTERVAL_SECS,
    DEFAULT_START_MONTH, LOCAL_CURRENCY_CODE,
};
use purchasing_power::finance::{aggregate, MonthlySnapshot, SeriesKpis, SeriesRequest};
use purchasing_power::report::{
    format_currency, format_month_label, format_number, format_short, provenance_badge, Report,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::time::Duration;

/// purchasing-power: inflation and exchange-rate erosion of a fixed monthly income
#[derive(Parser)]
#[command(name = "purchasing-power")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Purchasing-power erosion of a fixed USD or PYG monthly income", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the monthly series and KPIs
    Analyze {
        /// Fixed monthly amount
        #[arg(short = 'a', long)]
        amount: f64,

        /// Currency of the amount (USD or PYG)
        #[arg(short = 'c', long, default_value = "USD")]
        currency: CurrencyBasis,

        /// First month (YYYY-MM)
        #[arg(short = 's', long)]
        start: Option<MonthKey>,

        /// Last month (YYYY-MM, default: current month)
        #[arg(short = 'e', long)]
        end: Option<MonthKey>,

        /// Patch the current month with a live exchange rate
        #[arg(short = 'l', long)]
        live: bool,

        /// CSV (month,value) overriding exchange rates
        #[arg(long)]
        rates_file: Option<PathBuf>,

        /// CSV (month,value) overriding monthly inflation
        #[arg(long)]
        inflation_file: Option<PathBuf>,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Write output to a file instead of stdout
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// Show the effective exchange-rate table
    Rates {
        /// Patch the current month with a live exchange rate
        #[arg(short = 'l', long)]
        live: bool,

        /// CSV (month,value) overriding exchange rates
        #[arg(long)]
        rates_file: Option<PathBuf>,
    },

    /// Refresh the live rate on an interval until interrupted
    Watch {
        /// Seconds between refreshes
        #[arg(short = 'i', long)]
        interval_secs: Option<u64>,
    },

    /// Show version and configuration
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
    Json,
}

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Config {
    #[serde(default = "default_api_url")]
    api_url: String,
    #[serde(default = "default_local_currency")]
    local_currency: String,
    #[serde(default = "default_rate")]
    default_rate: f64,
    #[serde(default = "default_inflation")]
    default_inflation: f64,
    #[serde(default = "default_refresh_interval")]
    refresh_interval_secs: u64,
    #[serde(default = "default_start")]
    default_start: String,
    #[serde(default)]
    rates_file: Option<PathBuf>,
    #[serde(default)]
    inflation_file: Option<PathBuf>,
}

fn default_api_url() -> String {
    EXCHANGERATE_API_URL.to_string()
}

fn default_local_currency() -> String {
    LOCAL_CURRENCY_CODE.to_string()
}

fn default_rate() -> f64 {
    DEFAULT_EXCHANGE_RATE
}

fn default_inflation() -> f64 {
    DEFAULT_MONTHLY_INFLATION
}

fn default_refresh_interval() -> u64 {
    DEFAULT_REFRESH_INTERVAL_SECS
}

fn default_start() -> String {
    DEFAULT_START_MONTH.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            local_currency: default_local_currency(),
            default_rate: default_rate(),
            default_inflation: default_inflation(),
            refresh_interval_secs: default_refresh_interval(),
            default_start: default_start(),
            rates_file: None,
            inflation_file: None,
        }
    }
}

impl Config {
    fn load(path: Option<&Path>) -> Self {
        let path = match path {
            Some(path) => Some(path.to_path_buf()),
            None => dirs::home_dir().map(|home| home.join(".purchasing-power").join("config.toml")),
        };

        if let Some(config_path) = path.filter(|p| p.exists()) {
            match fs::read_to_string(&config_path) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(config) => return config,
                    Err(e) => {
                        eprintln!("{} Failed to parse config: {}", "Warning:".yellow(), e);
                    }
                },
                Err(e) => {
                    eprintln!("{} Failed to read config: {}", "Warning:".yellow(), e);
                }
            }
        }

        Config::default()
    }

    /// Reference rates under the configured default, with file overrides applied
    fn rate_table(&self, override_file: Option<&Path>) -> anyhow::Result<RateTable> {
        let mut table = RateTable::with_default(self.default_rate)?;
        table.add_rates(reference_rates().iter())?;

        if let Some(path) = override_file.or(self.rates_file.as_deref()) {
            table
                .load_from_path(path)
                .with_context(|| format!("Failed to load rates from {}", path.display()))?;
        }
        Ok(table)
    }

    fn inflation_table(&self, override_file: Option<&Path>) -> anyhow::Result<InflationTable> {
        let mut table = InflationTable::with_default(self.default_inflation)?;
        table.add_rates(reference_inflation().iter())?;

        if let Some(path) = override_file.or(self.inflation_file.as_deref()) {
            table
                .load_from_path(path)
                .with_context(|| format!("Failed to load inflation from {}", path.display()))?;
        }
        Ok(table)
    }

    fn provider(&self, table: RateTable) -> anyhow::Result<RateProvider<ExchangeRateApiSource>> {
        let source = ExchangeRateApiSource::with_url(self.api_url.clone())?;
        Ok(RateProvider::with_table(source, table)
            .with_currency(self.local_currency.clone())
            .with_status_callback(|note| {
                eprintln!("{} {}", "Note:".cyan(), note.dimmed());
            }))
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = Config::load(cli.config.as_deref());

    if cli.verbose {
        eprintln!(
            "{} v{}",
            "purchasing-power".cyan().bold(),
            env!("CARGO_PKG_VERSION")
        );
    }

    let result = match cli.command {
        Commands::Analyze {
            amount,
            currency,
            start,
            end,
            live,
            rates_file,
            inflation_file,
            format,
            output,
        } => {
            run_analysis(AnalyzeConfig {
                amount,
                currency,
                start,
                end,
                live,
                rates_file,
                inflation_file,
                format,
                output,
                config,
            })
            .await
        }

        Commands::Rates { live, rates_file } => show_rates(live, rates_file, &config).await,

        Commands::Watch { interval_secs } => watch_rates(interval_secs, &config).await,

        Commands::Info => show_info(&config),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

struct AnalyzeConfig {
    amount: f64,
    currency: CurrencyBasis,
    start: Option<MonthKey>,
    end: Option<MonthKey>,
    live: bool,
    rates_file: Option<PathBuf>,
    inflation_file: Option<PathBuf>,
    format: OutputFormat,
    output: Option<PathBuf>,
    config: Config,
}

async fn fetch_live<S>(provider: &RateProvider<S>)
where
    S: purchasing_power::data::RateSource,
{
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner());
    spinner.set_message(format!("Fetching live rate from {}...", provider.source_name()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let provenance = provider.refresh().await;

    if provenance.is_live() {
        spinner.finish_with_message(format!("Live rate from {}", provider.source_name()));
    } else {
        spinner.finish_and_clear();
    }
    log::debug!("Provenance after refresh: {}", provenance);
}

async fn run_analysis(cfg: AnalyzeConfig) -> anyhow::Result<()> {
    let start = match cfg.start {
        Some(start) => start,
        None => cfg
            .config
            .default_start
            .parse()
            .context("Invalid default_start in config")?,
    };
    let end = cfg.end.unwrap_or_else(MonthKey::current);

    if month_count(start, end) == 0 {
        bail!("Start month {} is after end month {}", start, end);
    }

    let provider = cfg
        .config
        .provider(cfg.config.rate_table(cfg.rates_file.as_deref())?)?;
    let inflation = cfg.config.inflation_table(cfg.inflation_file.as_deref())?;

    if cfg.live {
        fetch_live(&provider).await;
    }

    let request = SeriesRequest::new(cfg.amount, cfg.currency, start, end);
    let rates = provider.rates();
    let snapshots = request.compute(&rates, &inflation)?;
    let kpis = aggregate(&snapshots)?;
    let report = Report::new(request, provider.provenance(), kpis, snapshots);

    let mut out: Box<dyn Write> = match &cfg.output {
        Some(path) => Box::new(
            fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };

    match cfg.format {
        OutputFormat::Table => print_dashboard(&mut out, &report)?,
        OutputFormat::Csv => report.write_csv(&mut out)?,
        OutputFormat::Json => writeln!(out, "{}", report.to_json()?)?,
    }
    out.flush()?;

    if let Some(path) = &cfg.output {
        eprintln!("{} Report saved to: {}", "✓".green().bold(), path.display());
    }

    Ok(())
}

fn print_dashboard(out: &mut dyn Write, report: &Report) -> anyhow::Result<()> {
    let request = &report.request;
    let kpis = &report.kpis;

    writeln!(out, "{}", "Análisis de Poder Adquisitivo".cyan().bold())?;
    writeln!(
        out,
        "  {} {} mensuales, {} a {}  [{}]",
        "Ingreso:".bold(),
        format_currency(request.principal, request.basis),
        format_month_label(request.start),
        format_month_label(request.end),
        provenance_badge(report.provenance)
    )?;
    writeln!(out)?;

    print_kpis(out, kpis)?;
    writeln!(out)?;
    print_detail_table(out, &report.snapshots)?;
    writeln!(out)?;
    writeln!(out, "{}", report.narrative().dimmed())?;
    Ok(())
}

fn print_kpis(out: &mut dyn Write, kpis: &SeriesKpis) -> anyhow::Result<()> {
    let other = kpis.basis.other();
    let (initial_other, final_other) = if other.is_local() {
        (kpis.initial_nominal, kpis.final_nominal)
    } else {
        (kpis.initial_nominal_foreign, kpis.final_nominal_foreign)
    };

    writeln!(out, "{}", "Indicadores".bold())?;
    writeln!(out, "{}", "===========".dimmed())?;
    writeln!(
        out,
        "  {:<28} {} ({})",
        "Equivalente inicial:",
        format_currency(initial_other, other),
        format_short(initial_other)
    )?;
    writeln!(
        out,
        "  {:<28} {} ({})",
        "Equivalente final:",
        format_currency(final_other, other),
        format_short(final_other)
    )?;
    writeln!(
        out,
        "  {:<28} {}",
        "Poder de compra real:",
        format_currency(kpis.final_real, CurrencyBasis::Pyg)
    )?;
    writeln!(
        out,
        "  {:<28} {} ({})",
        "Pérdida de poder:",
        format_currency(kpis.loss, CurrencyBasis::Pyg).red(),
        format_short(kpis.loss)
    )?;
    writeln!(
        out,
        "  {:<28} {}",
        "Erosión acumulada:",
        format!("{}%", format_number(kpis.loss_percent)).red()
    )?;
    writeln!(
        out,
        "  {:<28} {}%",
        "Inflación acumulada:",
        format_number(kpis.cumulative_inflation_percent)
    )?;
    writeln!(
        out,
        "  {:<28} {}%",
        "Variación tipo de cambio:",
        format_number(kpis.exchange_rate_change_percent)
    )?;
    writeln!(
        out,
        "  {:<28} Compra {} / Venta {}",
        "USD / PYG:",
        format_number(kpis.buy_rate),
        format_number(kpis.sell_rate)
    )?;
    Ok(())
}

fn print_detail_table(out: &mut dyn Write, snapshots: &[MonthlySnapshot]) -> anyhow::Result<()> {
    writeln!(
        out,
        "{}",
        format!(
            "{:<10} {:>14} {:>12} {:>18} {:>10} {:>18} {:>14}",
            "Fecha",
            "Nominal (USD)",
            "Tipo Cambio",
            "Nominal (PYG)",
            "Factor IPC",
            "Real (PYG)",
            "Real (USD)"
        )
        .bold()
    )?;

    for row in snapshots {
        writeln!(
            out,
            "{:<10} {:>14} {:>12} {:>18} {:>10.4} {:>18} {:>14}",
            format_month_label(row.month),
            format_number(row.nominal_foreign),
            format_number(row.exchange_rate),
            format_number(row.nominal_local),
            row.cumulative_inflation_factor,
            format_number(row.real_local),
            format_number(row.real_foreign)
        )?;
    }
    Ok(())
}

async fn show_rates(live: bool, rates_file: Option<PathBuf>, config: &Config) -> anyhow::Result<()> {
    let provider = config.provider(config.rate_table(rates_file.as_deref())?)?;
    if live {
        fetch_live(&provider).await;
    }

    let rates = provider.rates();
    println!(
        "{} ({})",
        format!("USD / {}", provider.currency_code()).cyan().bold(),
        provenance_badge(provider.provenance())
    );
    for (month, rate) in rates.iter() {
        println!("  {:<10} {:>12}", format_month_label(month), format_number(rate));
    }
    println!(
        "  {} {}",
        "Other months:".dimmed(),
        format_number(rates.default_rate())
    );
    Ok(())
}

async fn watch_rates(interval_secs: Option<u64>, config: &Config) -> anyhow::Result<()> {
    let interval = Duration::from_secs(interval_secs.unwrap_or(config.refresh_interval_secs));
    let provider = Arc::new(config.provider(config.rate_table(None)?)?);

    println!(
        "{} every {}s from {} (Ctrl-C to stop)",
        "Refreshing".cyan().bold(),
        interval.as_secs(),
        config.api_url
    );

    let task = provider.spawn_refresh_task(interval);
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;
    task.cancel();

    let current = MonthKey::current();
    println!(
        "{} {} = {} ({})",
        "Last rate:".bold(),
        format_month_label(current),
        format_number(provider.rates().get(current)),
        provider.provenance()
    );
    Ok(())
}

fn show_info(config: &Config) -> anyhow::Result<()> {
    println!(
        "{} v{}",
        "purchasing-power".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("{}", "Configuration".bold());
    println!("{}", "=============".dimmed());
    println!("  {} {}", "Rate source:".bold(), config.api_url);
    println!("  {} {}", "Local currency:".bold(), config.local_currency);
    println!("  {} {}", "Default rate:".bold(), format_number(config.default_rate));
    println!(
        "  {} {}%",
        "Default inflation:".bold(),
        format_number(config.default_inflation * 100.0)
    );
    println!("  {} {}s", "Refresh interval:".bold(), config.refresh_interval_secs);
    println!("  {} {}", "Default start:".bold(), config.default_start);

    let rates = reference_rates();
    if let Some((first, last)) = rates.coverage() {
        println!(
            "  {} {} - {}",
            "Reference data:".bold(),
            format_month_label(first),
            format_month_label(last)
        );
    }
    Ok(())
}
