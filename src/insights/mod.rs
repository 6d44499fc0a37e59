//! Consumption insights
//!
//! Aggregates daily records into a monthly projection, prices it with the
//! tariff engine and attaches a fixed set of savings recommendations.

use crate::core::{DailyRecord, InsightReport, Recommendation, RecommendationKind};
use crate::i18n::I18n;
use crate::pricing::TariffCalculator;
use indexmap::IndexMap;

/// Headline share of the bill the recommendations could save
pub const SAVINGS_PERCENT: f64 = 15.0;

/// Month length used for projections
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Projected monthly quantity above which the "reduce below 60" advice is added
pub const REDUCE_BELOW_THRESHOLD: f64 = 60.0;

const OFFPEAK_SHARE: f64 = 0.40;
const REFRIGERATION_SHARE: f64 = 0.25;
const LED_SHARE: f64 = 0.35;
const REDUCE_BELOW_SHARE: f64 = 0.50;

/// Derives insight reports from daily records
#[derive(Debug, Clone)]
pub struct InsightEngine {
    calculator: TariffCalculator,
    i18n: I18n,
}

impl InsightEngine {
    pub fn new(calculator: TariffCalculator, i18n: I18n) -> Self {
        Self { calculator, i18n }
    }

    /// Build the report for a record set. `None` means "no data yet".
    pub fn derive_report(&self, records: &[DailyRecord]) -> Option<InsightReport> {
        if records.is_empty() {
            return None;
        }

        let total_quantity: f64 = records.iter().map(|r| r.total_quantity).sum();
        let average_daily = total_quantity / records.len() as f64;
        let projected_monthly = average_daily * DAYS_PER_MONTH;

        let totals = category_totals(records);
        let dominant = dominant_category(&totals);
        let dominant_quantity = dominant.map_or(0.0, |(_, quantity)| quantity);

        // Records are non-negative by contract; clamp so a bad upload cannot fail the report
        let bill = self.calculator.compute_bill(projected_monthly.max(0.0)).ok()?;

        let savings = bill.total * SAVINGS_PERCENT / 100.0;
        let dominant_share = if total_quantity > 0.0 {
            dominant_quantity / total_quantity
        } else {
            0.0
        };

        let mut recommendations = vec![
            self.dominant_recommendation(dominant.map(|(name, _)| name), savings * dominant_share),
            self.recommendation("offpeak", RecommendationKind::Scheduling, savings * OFFPEAK_SHARE),
            self.recommendation("refrigeration", RecommendationKind::Appliance, savings * REFRIGERATION_SHARE),
            self.recommendation("led", RecommendationKind::Installation, savings * LED_SHARE),
        ];
        if projected_monthly > REDUCE_BELOW_THRESHOLD {
            recommendations.push(self.recommendation(
                "reduce_below",
                RecommendationKind::Behavioral,
                savings * REDUCE_BELOW_SHARE,
            ));
        }

        log::debug!(
            "Derived report from {} records: {:.2}/day, bill {:.2}, dominant {:?}",
            records.len(),
            average_daily,
            bill.total,
            dominant
        );

        Some(InsightReport {
            average_daily_quantity: round2(average_daily),
            projected_monthly_quantity: round2(projected_monthly),
            predicted_bill: bill.total.round(),
            bill_breakdown: bill,
            dominant_category: dominant.map(|(name, _)| name.to_string()),
            dominant_category_quantity: round2(dominant_quantity),
            savings_percent: SAVINGS_PERCENT,
            savings_amount: savings.round(),
            recommendations,
        })
    }

    fn dominant_recommendation(&self, category: Option<&str>, savings: f64) -> Recommendation {
        let label = match category {
            Some(name) => humanize_category(name),
            None => self.i18n.get("insight.generic_category"),
        };
        let args = [("category", label.as_str())];

        Recommendation {
            text: self.i18n.format("insight.dominant.text", &args),
            description: self.i18n.format("insight.dominant.description", &args),
            apportioned_savings: savings.round(),
            category: RecommendationKind::Behavioral,
        }
    }

    fn recommendation(&self, key: &str, kind: RecommendationKind, savings: f64) -> Recommendation {
        Recommendation {
            text: self.i18n.get(&format!("insight.{}.text", key)),
            description: self.i18n.get(&format!("insight.{}.description", key)),
            apportioned_savings: savings.round(),
            category: kind,
        }
    }
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new(TariffCalculator::default(), I18n::default())
    }
}

/// Sum every category across all records, in first-seen order
pub fn category_totals(records: &[DailyRecord]) -> IndexMap<&str, f64> {
    let mut totals: IndexMap<&str, f64> = IndexMap::new();
    for record in records {
        for (category, quantity) in &record.category_breakdown {
            *totals.entry(category.as_str()).or_insert(0.0) += quantity;
        }
    }
    totals
}

/// Category with the strictly largest total; the first one seen wins ties
pub fn dominant_category<'a>(totals: &IndexMap<&'a str, f64>) -> Option<(&'a str, f64)> {
    totals
        .iter()
        .fold(None, |best: Option<(&'a str, f64)>, (&name, &quantity)| {
            let best_quantity = best.map_or(0.0, |(_, q)| q);
            if quantity > best_quantity {
                Some((name, quantity))
            } else {
                best
            }
        })
}

/// "airConditioner" -> "air conditioner"
pub fn humanize_category(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for c in name.chars() {
        if c.is_uppercase() && prev_lower {
            out.push(' ');
        }
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
        out.extend(c.to_lowercase());
    }
    out
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn savings_of(report: &InsightReport) -> Vec<f64> {
        report.recommendations.iter().map(|r| r.apportioned_savings).collect()
    }

    #[test]
    fn test_empty_records_no_report() {
        assert!(InsightEngine::default().derive_report(&[]).is_none());
    }

    #[test]
    fn test_single_record() {
        let records = vec![DailyRecord::new(day(1), 10.0).with_category("airConditioner", 10.0)];
        let report = InsightEngine::default().derive_report(&records).unwrap();

        assert_eq!(report.average_daily_quantity, 10.0);
        assert_eq!(report.projected_monthly_quantity, 300.0);
        assert_eq!(report.dominant_category.as_deref(), Some("airConditioner"));
        assert_eq!(report.dominant_category_quantity, 10.0);

        // 0.3 units: 0.75 energy + 30.00 fixed
        assert_abs_diff_eq!(report.bill_breakdown.total, 30.75, epsilon = 1e-9);
        assert_eq!(report.predicted_bill, 31.0);
        assert_eq!(report.savings_percent, 15.0);
        assert_eq!(report.savings_amount, 5.0);
        assert_eq!(savings_of(&report), vec![5.0, 2.0, 1.0, 2.0, 2.0]);

        assert_eq!(report.recommendations[0].text, "Reduce air conditioner usage by 1 hour per day");
        assert_eq!(report.recommendations[0].category, RecommendationKind::Behavioral);
        assert_eq!(report.recommendations[1].category, RecommendationKind::Scheduling);
        assert_eq!(report.recommendations[2].category, RecommendationKind::Appliance);
        assert_eq!(report.recommendations[3].category, RecommendationKind::Installation);
        assert_eq!(report.recommendations[4].text, "Try to reduce consumption below 60 kWh per month");
    }

    #[test]
    fn test_reduce_below_only_above_threshold() {
        // 2/day projects to exactly 60, which does not qualify
        let records = vec![DailyRecord::new(day(1), 2.0)];
        let report = InsightEngine::default().derive_report(&records).unwrap();
        assert_eq!(report.projected_monthly_quantity, 60.0);
        assert_eq!(report.recommendations.len(), 4);

        let records = vec![DailyRecord::new(day(1), 2.1)];
        let report = InsightEngine::default().derive_report(&records).unwrap();
        assert_eq!(report.recommendations.len(), 5);
    }

    #[test]
    fn test_missing_totals_count_as_zero() {
        let records = vec![DailyRecord::new(day(1), 10.0), DailyRecord::new(day(2), 0.0)];
        let report = InsightEngine::default().derive_report(&records).unwrap();
        assert_eq!(report.average_daily_quantity, 5.0);
        assert_eq!(report.projected_monthly_quantity, 150.0);
    }

    #[test]
    fn test_dominant_category_sums_across_records() {
        let records = vec![
            DailyRecord::new(day(1), 8.0).with_category("refrigerator", 3.0).with_category("waterHeater", 5.0),
            DailyRecord::new(day(2), 8.0).with_category("refrigerator", 4.0).with_category("waterHeater", 1.0),
        ];
        let report = InsightEngine::default().derive_report(&records).unwrap();
        assert_eq!(report.dominant_category.as_deref(), Some("refrigerator"));
        assert_eq!(report.dominant_category_quantity, 7.0);
    }

    #[test]
    fn test_tie_goes_to_first_seen_category() {
        let records = vec![
            DailyRecord::new(day(1), 4.0).with_category("lights", 2.0).with_category("tv", 2.0),
        ];
        let totals = category_totals(&records);
        assert_eq!(dominant_category(&totals), Some(("lights", 2.0)));

        let records = vec![
            DailyRecord::new(day(1), 4.0).with_category("tv", 2.0).with_category("lights", 2.0),
        ];
        let totals = category_totals(&records);
        assert_eq!(dominant_category(&totals), Some(("tv", 2.0)));
    }

    #[test]
    fn test_no_categories() {
        let records = vec![DailyRecord::new(day(1), 3.0).with_category("fan", 0.0)];
        let report = InsightEngine::default().derive_report(&records).unwrap();

        assert_eq!(report.dominant_category, None);
        assert_eq!(report.dominant_category_quantity, 0.0);
        assert_eq!(report.recommendations[0].text, "Reduce appliance usage by 1 hour per day");
        assert_eq!(report.recommendations[0].apportioned_savings, 0.0);
    }

    #[test]
    fn test_all_zero_usage() {
        let records = vec![DailyRecord::new(day(1), 0.0).with_category("fan", 0.0)];
        let report = InsightEngine::default().derive_report(&records).unwrap();

        assert_eq!(report.projected_monthly_quantity, 0.0);
        assert_eq!(report.predicted_bill, 30.0);
        assert_eq!(report.recommendations[0].apportioned_savings, 0.0);
        assert_eq!(report.recommendations.len(), 4);
    }

    #[test]
    fn test_high_regime_projection() {
        let records = vec![DailyRecord::new(day(1), 3000.0).with_category("airConditioner", 1500.0)];
        let report = InsightEngine::default().derive_report(&records).unwrap();

        assert_eq!(report.projected_monthly_quantity, 90_000.0);
        assert_eq!(report.bill_breakdown.tiers.len(), 3);
        assert_eq!(report.predicted_bill, 367.0);
        // 366.99 * 15% = 55.0485
        assert_eq!(report.savings_amount, 55.0);
        assert_eq!(savings_of(&report), vec![28.0, 22.0, 14.0, 19.0, 28.0]);
    }

    #[test]
    fn test_changing_dominant_only_changes_first_recommendation() {
        let a = vec![DailyRecord::new(day(1), 10.0).with_category("airConditioner", 6.0).with_category("tv", 1.0)];
        let b = vec![DailyRecord::new(day(1), 10.0).with_category("airConditioner", 1.0).with_category("tv", 3.0)];

        let engine = InsightEngine::default();
        let report_a = engine.derive_report(&a).unwrap();
        let report_b = engine.derive_report(&b).unwrap();

        assert_eq!(report_a.savings_amount, report_b.savings_amount);
        assert_ne!(report_a.recommendations[0], report_b.recommendations[0]);
        assert_eq!(report_a.recommendations[1..], report_b.recommendations[1..]);
    }

    #[test]
    fn test_idempotent() {
        let records = vec![
            DailyRecord::new(day(1), 12.3).with_category("airConditioner", 5.5),
            DailyRecord::new(day(2), 9.7).with_category("refrigerator", 2.25),
        ];
        let engine = InsightEngine::default();
        let first = serde_json::to_string(&engine.derive_report(&records)).unwrap();
        let second = serde_json::to_string(&engine.derive_report(&records)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_french_recommendations() {
        let engine = InsightEngine::new(TariffCalculator::default(), I18n::new("fr"));
        let records = vec![DailyRecord::new(day(1), 10.0).with_category("waterHeater", 4.0)];
        let report = engine.derive_report(&records).unwrap();
        assert!(report.recommendations[0].text.contains("water heater"));
        assert!(report.recommendations[1].text.starts_with("D\u{00E9}calez"));
    }

    #[test]
    fn test_humanize_category() {
        assert_eq!(humanize_category("airConditioner"), "air conditioner");
        assert_eq!(humanize_category("TV"), "tv");
        assert_eq!(humanize_category("Refrigerator"), "refrigerator");
        assert_eq!(humanize_category("washingMachine2"), "washing machine2");
    }

    #[test]
    fn test_report_json_field_names() {
        let records = vec![DailyRecord::new(day(1), 10.0).with_category("airConditioner", 10.0)];
        let value = serde_json::to_value(InsightEngine::default().derive_report(&records)).unwrap();

        for field in [
            "averageDailyQuantity",
            "projectedMonthlyQuantity",
            "predictedBill",
            "billBreakdown",
            "dominantCategory",
            "dominantCategoryQuantity",
            "savingsPercent",
            "savingsAmount",
            "recommendations",
        ] {
            assert!(value.get(field).is_some(), "missing {}", field);
        }
        assert_eq!(value["billBreakdown"]["tiers"][0]["rangeLabel"], "0-30 units");
        assert_eq!(value["recommendations"][1]["category"], "scheduling");
        assert!(value["recommendations"][0].get("apportionedSavings").is_some());
    }
}
