//! Common types used across the application

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One day of consumption as uploaded by the user
///
/// On the wire this is the flat object produced by the upload page:
/// `{"date": "1/15/2024", "totalKwh": 12.5, "airConditioner": 6.0, ...}`.
/// Every key other than the date and the total is a consumption category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    /// Calendar day of the reading
    #[serde(with = "record_date")]
    pub date: NaiveDate,
    /// Energy consumed that day, authoritative for averaging
    #[serde(rename = "totalKwh", alias = "totalQuantity", default)]
    pub total_quantity: f64,
    /// Per-category consumption in first-seen order. Need not sum to the total.
    #[serde(flatten)]
    pub category_breakdown: IndexMap<String, f64>,
}

impl DailyRecord {
    pub fn new(date: NaiveDate, total_quantity: f64) -> Self {
        Self {
            date,
            total_quantity,
            category_breakdown: IndexMap::new(),
        }
    }

    pub fn with_category(mut self, category: &str, quantity: f64) -> Self {
        *self.category_breakdown.entry(category.to_string()).or_insert(0.0) += quantity;
        self
    }

    /// Copy of the record without its category breakdown
    pub fn minimal(&self) -> Self {
        Self::new(self.date, self.total_quantity)
    }
}

/// Serde adapter for record dates (`MM/DD/YYYY` out, `M/D/YYYY` or `MM/DD/YYYY` in)
pub mod record_date {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%m/%d/%Y";

    /// Parse a record date, rejecting anything but a valid month/day/four-digit-year triple
    pub fn parse(value: &str) -> Option<NaiveDate> {
        let mut parts = value.trim().split('/');
        let (Some(month), Some(day), Some(year), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return None;
        };

        if !is_digits(month, 1, 2) || !is_digits(day, 1, 2) || !is_digits(year, 4, 4) {
            return None;
        }

        NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
    }

    fn is_digits(part: &str, min_len: usize, max_len: usize) -> bool {
        (min_len..=max_len).contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit())
    }

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| {
            de::Error::custom(format!("invalid date `{raw}`, expected MM/DD/YYYY or M/D/YYYY"))
        })
    }
}

/// Charge for one consumption band of a bill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierCharge {
    /// Human-readable band, e.g. "31-60 units"
    pub range_label: String,
    pub units_in_tier: f64,
    /// Per-unit rate
    pub rate: f64,
    pub charge_amount: f64,
}

/// Itemized monthly bill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillBreakdown {
    /// Monthly quantity the bill was computed for
    pub consumption_quantity: f64,
    /// Billing units (quantity / 1000)
    pub units_consumed: f64,
    pub fixed_charge: f64,
    pub variable_charge: f64,
    /// Band line items, lowest band first
    pub tiers: Vec<TierCharge>,
    pub total: f64,
}

/// Kind of action a recommendation asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Behavioral,
    Scheduling,
    Appliance,
    Installation,
}

/// A single savings recommendation
///
/// `apportioned_savings` is an "if you only did this" estimate; the
/// recommendations of a report do not partition the headline savings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub text: String,
    pub description: String,
    /// Whole currency units
    pub apportioned_savings: f64,
    pub category: RecommendationKind,
}

/// Insights derived from a set of daily records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightReport {
    /// Mean daily total, 2 decimal places
    pub average_daily_quantity: f64,
    /// Average times 30 days, 2 decimal places
    pub projected_monthly_quantity: f64,
    /// Rounded to whole currency units
    pub predicted_bill: f64,
    pub bill_breakdown: BillBreakdown,
    /// `None` when no category recorded any consumption
    pub dominant_category: Option<String>,
    pub dominant_category_quantity: f64,
    pub savings_percent: f64,
    /// Rounded to whole currency units
    pub savings_amount: f64,
    pub recommendations: Vec<Recommendation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_record_date_accepts_padded_and_unpadded() {
        assert_eq!(record_date::parse("1/5/2024"), Some(date(2024, 1, 5)));
        assert_eq!(record_date::parse("01/05/2024"), Some(date(2024, 1, 5)));
        assert_eq!(record_date::parse(" 12/31/2023 "), Some(date(2023, 12, 31)));
    }

    #[test]
    fn test_record_date_rejects_invalid() {
        assert_eq!(record_date::parse("2024-01-05"), None);
        assert_eq!(record_date::parse("13/01/2024"), None);
        assert_eq!(record_date::parse("2/30/2024"), None);
        assert_eq!(record_date::parse("1/5/24"), None);
        assert_eq!(record_date::parse("1/5/2024/1"), None);
        assert_eq!(record_date::parse(""), None);
    }

    #[test]
    fn test_daily_record_flat_json() {
        let json = r#"{"date":"1/15/2024","totalKwh":12.5,"airConditioner":6.0,"refrigerator":2.5}"#;
        let record: DailyRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.date, date(2024, 1, 15));
        assert_eq!(record.total_quantity, 12.5);
        let categories: Vec<_> = record.category_breakdown.keys().cloned().collect();
        assert_eq!(categories, vec!["airConditioner", "refrigerator"]);

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["date"], "01/15/2024");
        assert_eq!(value["totalKwh"], 12.5);
        assert_eq!(value["refrigerator"], 2.5);
    }

    #[test]
    fn test_daily_record_missing_total_is_zero() {
        let record: DailyRecord = serde_json::from_str(r#"{"date":"3/1/2024","fan":1.5}"#).unwrap();
        assert_eq!(record.total_quantity, 0.0);
        assert_eq!(record.category_breakdown.get("fan"), Some(&1.5));
    }

    #[test]
    fn test_daily_record_rejects_bad_date() {
        let result: std::result::Result<DailyRecord, _> =
            serde_json::from_str(r#"{"date":"2024-03-01","totalKwh":1.0}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_minimal_drops_breakdown() {
        let record = DailyRecord::new(date(2024, 1, 1), 4.0).with_category("tv", 1.0);
        let minimal = record.minimal();
        assert_eq!(minimal.total_quantity, 4.0);
        assert!(minimal.category_breakdown.is_empty());
    }

    #[test]
    fn test_with_category_accumulates() {
        let record = DailyRecord::new(date(2024, 1, 1), 4.0)
            .with_category("tv", 1.0)
            .with_category("tv", 0.5);
        assert_eq!(record.category_breakdown.get("tv"), Some(&1.5));
    }
}
