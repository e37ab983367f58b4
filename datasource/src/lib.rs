//! FILENAME: datasource/src/lib.rs
//! Data feeds for the dashboard.
//!
//! Handles loading the three JSON feeds the dashboard consumes: the
//! parameter master (input to the pivot builder), the event master, and
//! the DB-ified data listing. Each feed has a bundled fallback dataset so
//! the dashboard keeps working when the external provider is unreachable;
//! falling back is logged, never fatal.

mod db_list;
mod error;
mod events;
mod parameter_master;

pub use db_list::{
    bundled_db_list, db_list_from_reader, db_list_or_bundled, load_db_list, MachineDbInfo,
    PlantDbInfo, TimeRange,
};
pub use error::DataSourceError;
pub use events::{
    bundled_events, events_from_reader, events_or_bundled, load_events, EventRecord,
};
pub use parameter_master::{
    bundled_parameter_master, load_parameter_master, parameter_master_from_reader,
    parameter_master_or_bundled,
};
