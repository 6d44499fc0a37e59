//! Energy Insights - Demo CLI
//!
//! Walks through the tariff boundaries and derives a report from a
//! synthetic month of readings kept in an in-memory local store.

use chrono::{Duration, NaiveDate};

use energy_insights_lib::core::DailyRecord;
use energy_insights_lib::i18n::I18n;
use energy_insights_lib::insights::InsightEngine;
use energy_insights_lib::pricing::TariffCalculator;
use energy_insights_lib::service::EnergyDataService;
use energy_insights_lib::storage::{BrowserLocalStore, RecordStorage};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("==============================================");
    println!("   Energy Insights - Demo CLI");
    println!("==============================================\n");

    // 1. Tariff boundaries
    println!("[1/3] Tariff Calculator ({})...\n", TariffCalculator::default().schedule().version);
    let calculator = TariffCalculator::default();

    println!("----------------------------------------------");
    println!("  Quantity |  Units  |  Fixed  |  Total");
    println!("----------------------------------------------");
    for quantity in [0.0, 30_000.0, 45_000.0, 60_000.0, 90_000.0] {
        match calculator.compute_bill(quantity) {
            Ok(bill) => println!(
                "  {:>8.0} | {:>7.1} | {:>7.2} | {:>8.2}",
                quantity, bill.units_consumed, bill.fixed_charge, bill.total
            ),
            Err(e) => eprintln!("  {:>8.0} | error: {}", quantity, e),
        }
    }
    println!("----------------------------------------------\n");

    // 2. Store
    println!("[2/3] Opening in-memory local store...");
    let store = match BrowserLocalStore::open_in_memory() {
        Ok(store) => store,
        Err(e) => {
            eprintln!("      Could not open store: {}", e);
            return;
        }
    };
    let storage = RecordStorage::new(Box::new(store));
    println!("      Backend: {}\n", storage.backend_name());

    let engine = InsightEngine::new(calculator, I18n::default());
    let mut service = EnergyDataService::new(storage, engine);

    // 3. Synthetic month
    println!("[3/3] Saving 14 days of readings...\n");
    let records = synthetic_records(14);
    let outcome = match service.save_energy_data(records) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("      Save failed: {}", e);
            return;
        }
    };

    let Some(report) = outcome.predictions else {
        println!("      No report could be derived");
        return;
    };

    println!("=== Report ===\n");
    println!("  Average daily:     {:.2}", report.average_daily_quantity);
    println!("  Projected monthly: {:.2}", report.projected_monthly_quantity);
    println!("  Predicted bill:    {} Rs.", report.predicted_bill);
    println!(
        "  Dominant category: {}",
        report.dominant_category.as_deref().unwrap_or("-")
    );
    println!("  Savings ({}%):     {} Rs.\n", report.savings_percent, report.savings_amount);

    for recommendation in &report.recommendations {
        println!("  * {}", recommendation.text);
        println!("    {} (up to {} Rs.)", recommendation.description, recommendation.apportioned_savings);
    }

    println!("\n==============================================");
    println!("   Demo complete ({} records stored)", outcome.record_count);
    println!("==============================================\n");
}

/// A fortnight of readings with a dominant air conditioner
fn synthetic_records(days: i64) -> Vec<DailyRecord> {
    let Some(start) = NaiveDate::from_ymd_opt(2024, 1, 1) else {
        return Vec::new();
    };

    (0..days)
        .map(|i| {
            let ac = 4.0 + (i % 3) as f64;
            let fridge = 1.5;
            let lights = 0.5 + (i % 2) as f64 * 0.25;
            DailyRecord::new(start + Duration::days(i), ac + fridge + lights)
                .with_category("airConditioner", ac)
                .with_category("refrigerator", fridge)
                .with_category("lighting", lights)
        })
        .collect()
}
