//! Core module - configuration, errors and the shared data model

mod config;
mod error;
mod types;

pub use config::{Config, GeneralConfig, PricingConfig, StorageBackend, StorageConfig};
pub use error::{Error, Result};
pub use types::{record_date, BillBreakdown, DailyRecord, InsightReport, Recommendation, RecommendationKind, TierCharge};
