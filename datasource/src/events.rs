//! FILENAME: datasource/src/events.rs
//! The event master feed: labelled time windows (trials, alarms,
//! changeovers) the user can pick as data-selection conditions.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DataSourceError;

const BUNDLED: &str = include_str!("../data/event_master.json");

/// One entry of the event master feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: u32,
    pub plant_name: String,
    pub machine_no: String,

    /// Short label, e.g. a lot or campaign code.
    pub label: String,
    pub label_description: String,

    /// Event category.
    pub event: String,
    pub event_detail: String,

    pub start_time: String,
    pub end_time: String,
}

/// Deserializes an event feed from any reader.
pub fn events_from_reader(reader: impl Read) -> Result<Vec<EventRecord>, DataSourceError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Loads an event master JSON file.
pub fn load_events(path: &Path) -> Result<Vec<EventRecord>, DataSourceError> {
    let file = File::open(path)?;
    events_from_reader(BufReader::new(file))
}

/// The bundled fallback dataset.
pub fn bundled_events() -> Result<Vec<EventRecord>, DataSourceError> {
    Ok(serde_json::from_str(BUNDLED)?)
}

/// Loads the feed from `path`, degrading to the bundled dataset with a
/// logged warning on any error.
pub fn events_or_bundled(path: &Path) -> Result<Vec<EventRecord>, DataSourceError> {
    match load_events(path) {
        Ok(records) => Ok(records),
        Err(err) => {
            log::warn!(
                "event master unavailable at {}: {}; using bundled data",
                path.display(),
                err
            );
            bundled_events()
        }
    }
}
