//! Energy Insights - command line entry point
//!
//! Imports daily consumption data, stores it in the configured record store
//! and prints the estimated bill with savings recommendations.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use energy_insights_lib::core::{BillBreakdown, Config, InsightReport, StorageBackend};
use energy_insights_lib::i18n::{I18n, LANGUAGES};
use energy_insights_lib::insights::InsightEngine;
use energy_insights_lib::pricing::TariffCalculator;
use energy_insights_lib::service::EnergyDataService;
use energy_insights_lib::storage::RecordStorage;
use std::path::PathBuf;

/// Estimate electricity bills and find savings in daily usage data
#[derive(Parser)]
#[command(name = "energy-insights", version, about, long_about = None)]
struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Record store to use, overriding the configuration
    #[arg(long, global = true, value_enum)]
    store: Option<StoreArg>,

    /// Data directory, overriding the configuration
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Language: auto, en, fr
    #[arg(long, global = true)]
    lang: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a CSV of appliance readings and show the resulting report
    Import {
        /// CSV file to import
        #[arg(short, long)]
        file: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the report for the stored data
    Report {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compute the bill for a monthly quantity
    Bill {
        /// Monthly consumption
        #[arg(allow_negative_numbers = true)]
        quantity: f64,

        /// Print the breakdown as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove the stored data
    Clear,
}

#[derive(Clone, Copy, ValueEnum)]
enum StoreArg {
    File,
    Cookie,
    BrowserLocal,
}

impl From<StoreArg> for StorageBackend {
    fn from(value: StoreArg) -> Self {
        match value {
            StoreArg::File => StorageBackend::File,
            StoreArg::Cookie => StorageBackend::Cookie,
            StoreArg::BrowserLocal => StorageBackend::BrowserLocal,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    log::debug!("Starting Energy Insights v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;
    let i18n = I18n::new(&config.general.language);

    match cli.command {
        Commands::Bill { quantity, json } => {
            let bill = TariffCalculator::default().compute_bill(quantity)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&bill)?);
            } else {
                print_bill(&bill, &i18n, &config);
            }
        }
        Commands::Import { file, json } => {
            let mut service = open_service(&config, &i18n)?;
            let (import_report, outcome) = service
                .import_csv_file(&file)
                .with_context(|| format!("Failed to import {}", file.display()))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                println!(
                    "{}\n",
                    i18n.format(
                        "import.summary",
                        &[
                            ("rows", &import_report.imported_rows.to_string()),
                            ("days", &import_report.days.to_string()),
                            ("skipped", &import_report.skipped_rows.to_string()),
                        ],
                    )
                );
                print_report(outcome.predictions.as_ref(), &i18n, &config);
            }
        }
        Commands::Report { json } => {
            let snapshot = open_service(&config, &i18n)?.get_energy_data()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot.predictions)?);
            } else {
                print_report(snapshot.predictions.as_ref(), &i18n, &config);
            }
        }
        Commands::Clear => {
            open_service(&config, &i18n)?.clear_energy_data()?;
            println!("{}", i18n.get("storage.cleared"));
        }
    }

    Ok(())
}

fn open_service(config: &Config, i18n: &I18n) -> Result<EnergyDataService> {
    let storage = RecordStorage::from_config(config).context("Failed to open record store")?;
    log::debug!("Using {}", storage.backend_name());
    let engine = InsightEngine::new(TariffCalculator::default(), i18n.clone());
    Ok(EnergyDataService::new(storage, engine).with_data_key(&config.storage.data_key))
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load().unwrap_or_else(|e| {
            log::warn!("Failed to load config, using defaults: {}", e);
            Config::default()
        }),
    };

    if let Some(store) = cli.store {
        config.storage.backend = store.into();
    }
    if let Some(dir) = &cli.data_dir {
        config.general.data_dir = Some(dir.clone());
    }
    if let Some(lang) = &cli.lang {
        if !I18n::is_supported(lang) {
            let available: Vec<String> = LANGUAGES
                .iter()
                .map(|(code, name)| format!("{} ({})", code, name))
                .collect();
            bail!("Unsupported language `{}`; use auto, {}", lang, available.join(", "));
        }
        config.general.language = lang.clone();
    }

    Ok(config)
}

fn print_report(report: Option<&InsightReport>, i18n: &I18n, config: &Config) {
    let Some(report) = report else {
        println!("{}", i18n.get("report.no_data"));
        return;
    };
    let symbol = &config.pricing.currency_symbol;

    println!("=== {} ===\n", i18n.get("report.title"));
    println!("  {:<28} {:>10.2} kWh", i18n.get("report.average_daily"), report.average_daily_quantity);
    println!("  {:<28} {:>10.2} kWh", i18n.get("report.projected_monthly"), report.projected_monthly_quantity);
    println!("  {:<28} {:>10} {}", i18n.get("report.predicted_bill"), report.predicted_bill, symbol);
    match &report.dominant_category {
        Some(category) => println!(
            "  {:<28} {} ({:.2} kWh)",
            i18n.get("report.dominant_category"),
            category,
            report.dominant_category_quantity
        ),
        None => println!("  {:<28} {}", i18n.get("report.dominant_category"), i18n.get("report.none")),
    }
    println!(
        "  {:<28} {:>10} {} ({}%)",
        i18n.get("report.savings"),
        report.savings_amount,
        symbol,
        report.savings_percent
    );
    println!();

    print_bill(&report.bill_breakdown, i18n, config);

    println!("--- {} ---\n", i18n.get("report.recommendations"));
    for (i, recommendation) in report.recommendations.iter().enumerate() {
        println!("  {}. {}", i + 1, recommendation.text);
        println!("     {}", recommendation.description);
        println!(
            "     {} {} {}\n",
            i18n.get("report.save_up_to"),
            recommendation.apportioned_savings,
            symbol
        );
    }
}

fn print_bill(bill: &BillBreakdown, i18n: &I18n, config: &Config) {
    let symbol = &config.pricing.currency_symbol;

    println!("--- {} ---\n", i18n.get("bill.title"));
    println!("  {:<28} {:>10.3}", i18n.get("bill.units"), bill.units_consumed);
    for tier in &bill.tiers {
        println!(
            "  {:<14} {:>8.3} x {:>5.2} = {:>10.2} {}",
            tier.range_label, tier.units_in_tier, tier.rate, tier.charge_amount, symbol
        );
    }
    println!("  {:<28} {:>10.2} {}", i18n.get("bill.variable_charge"), bill.variable_charge, symbol);
    println!("  {:<28} {:>10.2} {}", i18n.get("bill.fixed_charge"), bill.fixed_charge, symbol);
    println!("  {:<28} {:>10.2} {}", i18n.get("bill.total"), bill.total, symbol);
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bill_accepts_negative_quantity() {
        let cli = Cli::try_parse_from(["energy-insights", "bill", "-5"]).unwrap();
        match cli.command {
            Commands::Bill { quantity, json } => {
                assert_eq!(quantity, -5.0);
                assert!(!json);
            }
            _ => panic!("expected bill command"),
        }
        assert!(TariffCalculator::default().compute_bill(-5.0).is_err());
    }

    #[test]
    fn test_lang_flag_is_validated() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.toml");
        let config = config.to_str().unwrap();

        let cli = Cli::try_parse_from(["energy-insights", "--config", config, "--lang", "fr", "clear"]).unwrap();
        assert_eq!(load_config(&cli).unwrap().general.language, "fr");

        let cli = Cli::try_parse_from(["energy-insights", "--config", config, "--lang", "de", "clear"]).unwrap();
        let err = load_config(&cli).unwrap_err().to_string();
        assert!(err.contains("de"));
        assert!(err.contains("fr (Fran\u{00E7}ais)"));
    }

    #[test]
    fn test_store_flag_overrides_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.toml");
        let cli = Cli::try_parse_from([
            "energy-insights",
            "--config",
            config.to_str().unwrap(),
            "--store",
            "browser-local",
            "report",
        ])
        .unwrap();
        assert_eq!(load_config(&cli).unwrap().storage.backend, StorageBackend::BrowserLocal);
    }
}
