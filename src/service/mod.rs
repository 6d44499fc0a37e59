//! Energy data service
//!
//! The request boundary in front of the core: validates uploads, persists
//! them through a record store and derives the insight report on every call.

use crate::core::{DailyRecord, Error, InsightReport, Result};
use crate::import::{self, ImportReport};
use crate::insights::InsightEngine;
use crate::storage::RecordStorage;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// Key the record set is stored under unless configured otherwise
pub const ENERGY_DATA_KEY: &str = "energy-data";

/// Stored data together with the report derived from it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnergyDataSnapshot {
    pub data: Vec<DailyRecord>,
    pub predictions: Option<InsightReport>,
}

/// Result of saving an upload
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveOutcome {
    pub record_count: usize,
    pub predictions: Option<InsightReport>,
}

/// Upload request body: `{"energyData": [...]}`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadBody {
    energy_data: Option<Vec<serde_json::Value>>,
}

pub struct EnergyDataService {
    storage: RecordStorage,
    engine: InsightEngine,
    data_key: String,
}

impl EnergyDataService {
    pub fn new(storage: RecordStorage, engine: InsightEngine) -> Self {
        Self {
            storage,
            engine,
            data_key: ENERGY_DATA_KEY.to_string(),
        }
    }

    /// Store records under a different key
    pub fn with_data_key(mut self, key: &str) -> Self {
        self.data_key = key.to_string();
        self
    }

    /// Validate and persist a record set, returning the fresh report
    pub fn save_energy_data(&mut self, records: Vec<DailyRecord>) -> Result<SaveOutcome> {
        if records.is_empty() {
            return Err(Error::Validation(
                "Invalid data format. Expected an array of energy data entries.".to_string(),
            ));
        }

        self.storage.save_records(&self.data_key, &records)?;
        log::info!(
            "Saved {} records to {}",
            records.len(),
            self.storage.backend_name()
        );

        Ok(SaveOutcome {
            record_count: records.len(),
            predictions: self.engine.derive_report(&records),
        })
    }

    /// Accept a JSON upload body of the form `{"energyData": [...]}`
    pub fn save_energy_json(&mut self, body: &str) -> Result<SaveOutcome> {
        let body: UploadBody = serde_json::from_str(body)
            .map_err(|e| Error::Validation(format!("Malformed request body: {}", e)))?;

        let entries = match body.energy_data {
            Some(entries) if !entries.is_empty() => entries,
            _ => {
                return Err(Error::Validation(
                    "Invalid data format. Expected an array of energy data entries.".to_string(),
                ))
            }
        };

        let records = entries
            .into_iter()
            .map(parse_entry)
            .collect::<Result<Vec<_>>>()?;

        self.save_energy_data(records)
    }

    /// Parse a CSV upload and save it
    pub fn import_csv<R: Read>(&mut self, reader: R) -> Result<(ImportReport, SaveOutcome)> {
        let parsed = import::import_csv(reader)?;
        self.save_imported(parsed)
    }

    /// Parse a CSV file from disk and save it
    pub fn import_csv_file(&mut self, path: &Path) -> Result<(ImportReport, SaveOutcome)> {
        let parsed = import::import_csv_file(path)?;
        self.save_imported(parsed)
    }

    fn save_imported(
        &mut self,
        (records, report): (Vec<DailyRecord>, ImportReport),
    ) -> Result<(ImportReport, SaveOutcome)> {
        if records.is_empty() {
            return Err(Error::Validation(
                "No valid data could be parsed from the file".to_string(),
            ));
        }
        let outcome = self.save_energy_data(records)?;
        Ok((report, outcome))
    }

    /// Load the stored record set and derive its report
    pub fn get_energy_data(&self) -> Result<EnergyDataSnapshot> {
        let data = self.storage.load_records(&self.data_key)?;
        let predictions = self.engine.derive_report(&data);
        log::debug!("Loaded {} records from {}", data.len(), self.storage.backend_name());
        Ok(EnergyDataSnapshot { data, predictions })
    }

    /// Remove the stored record set. Returns whether anything was stored.
    pub fn clear_energy_data(&mut self) -> Result<bool> {
        self.storage.remove(&self.data_key)
    }
}

fn parse_entry(entry: serde_json::Value) -> Result<DailyRecord> {
    let date_ok = entry
        .get("date")
        .and_then(|d| d.as_str())
        .and_then(crate::core::record_date::parse)
        .is_some();
    if !date_ok {
        return Err(Error::Validation(
            "Invalid date format. Expected MM/DD/YYYY or M/D/YYYY format.".to_string(),
        ));
    }

    serde_json::from_value(entry)
        .map_err(|e| Error::Validation(format!("Invalid energy data entry: {}", e)))
}
