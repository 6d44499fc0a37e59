//! Energy Insights library
//!
//! Tiered electricity bill estimation and consumption insights from daily
//! usage records, plus the storage and import plumbing around them.

pub mod core;
pub mod i18n;
pub mod import;
pub mod insights;
pub mod pricing;
pub mod service;
pub mod storage;
