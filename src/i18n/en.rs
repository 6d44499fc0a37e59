//! English translations

use std::collections::HashMap;

pub fn get_translations() -> HashMap<String, String> {
    let mut t = HashMap::new();

    // Recommendations
    t.insert("insight.generic_category".into(), "appliance".into());
    t.insert("insight.dominant.text".into(), "Reduce {category} usage by 1 hour per day".into());
    t.insert("insight.dominant.description".into(), "Your {category} is consuming the most energy. Consider reducing its usage.".into());
    t.insert("insight.offpeak.text".into(), "Shift high-energy activities to off-peak hours (10 PM - 6 AM)".into());
    t.insert("insight.offpeak.description".into(), "Running high-consumption appliances during off-peak hours can reduce your electricity costs significantly.".into());
    t.insert("insight.refrigeration.text".into(), "Ensure optimal temperature settings for refrigeration".into());
    t.insert("insight.refrigeration.description".into(), "Set your refrigerator to 3-4\u{00B0}C and freezer to -18\u{00B0}C for optimal energy efficiency.".into());
    t.insert("insight.led.text".into(), "Consider installing LED lighting throughout your home".into());
    t.insert("insight.led.description".into(), "LED bulbs use up to 80% less energy than incandescent bulbs and last much longer.".into());
    t.insert("insight.reduce_below.text".into(), "Try to reduce consumption below 60 kWh per month".into());
    t.insert("insight.reduce_below.description".into(), "Your consumption puts you in a higher tariff bracket. Reducing usage below 60 kWh per month can significantly lower your bill.".into());

    // Report
    t.insert("report.title".into(), "Energy Insights Report".into());
    t.insert("report.no_data".into(), "No energy data yet. Import a CSV file to get started.".into());
    t.insert("report.average_daily".into(), "Average daily usage".into());
    t.insert("report.projected_monthly".into(), "Projected monthly usage".into());
    t.insert("report.predicted_bill".into(), "Predicted bill".into());
    t.insert("report.dominant_category".into(), "Highest consumer".into());
    t.insert("report.none".into(), "none".into());
    t.insert("report.savings".into(), "Potential savings".into());
    t.insert("report.recommendations".into(), "Recommendations".into());
    t.insert("report.save_up_to".into(), "save up to".into());

    // Bill
    t.insert("bill.title".into(), "Bill Breakdown".into());
    t.insert("bill.units".into(), "Units consumed".into());
    t.insert("bill.fixed_charge".into(), "Fixed charge".into());
    t.insert("bill.variable_charge".into(), "Energy charge".into());
    t.insert("bill.total".into(), "Total".into());

    // Import
    t.insert("import.summary".into(), "Imported {rows} rows into {days} days ({skipped} skipped)".into());
    t.insert("storage.cleared".into(), "Stored energy data removed".into());

    t
}
