//! FILENAME: datasource/src/db_list.rs
//! The "DB-ified data" listing: which time ranges have already been
//! extracted into the analysis database, grouped plant -> machine ->
//! stored ranges. Purely descriptive; nothing here touches the database
//! itself.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DataSourceError;

const BUNDLED: &str = include_str!("../data/db_list.json");

/// One stored time range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: String,
    pub end: String,
}

/// Stored ranges for one machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineDbInfo {
    pub machine_no: String,
    pub ranges: Vec<TimeRange>,
}

/// Stored ranges for one plant's machines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantDbInfo {
    pub plant_name: String,
    pub machines: Vec<MachineDbInfo>,
}

/// Deserializes a DB listing from any reader.
pub fn db_list_from_reader(reader: impl Read) -> Result<Vec<PlantDbInfo>, DataSourceError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Loads a DB listing JSON file.
pub fn load_db_list(path: &Path) -> Result<Vec<PlantDbInfo>, DataSourceError> {
    let file = File::open(path)?;
    db_list_from_reader(BufReader::new(file))
}

/// The bundled fallback dataset.
pub fn bundled_db_list() -> Result<Vec<PlantDbInfo>, DataSourceError> {
    Ok(serde_json::from_str(BUNDLED)?)
}

/// Loads the listing from `path`, degrading to the bundled dataset with a
/// logged warning on any error.
pub fn db_list_or_bundled(path: &Path) -> Result<Vec<PlantDbInfo>, DataSourceError> {
    match load_db_list(path) {
        Ok(plants) => Ok(plants),
        Err(err) => {
            log::warn!(
                "DB listing unavailable at {}: {}; using bundled data",
                path.display(),
                err
            );
            bundled_db_list()
        }
    }
}
