//! FILENAME: datasource/src/parameter_master.rs
//! The parameter master feed: the flat record list the pivot builder
//! consumes. Loaded from a JSON snapshot of the external provider, with a
//! bundled dataset as the degraded-mode fallback.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use pivot_engine::ParameterRecord;

use crate::error::DataSourceError;

/// Bundled fallback snapshot, compiled into the binary.
const BUNDLED: &str = include_str!("../data/parameter_master.json");

/// Deserializes a parameter master feed from any reader.
pub fn parameter_master_from_reader(
    reader: impl Read,
) -> Result<Vec<ParameterRecord>, DataSourceError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Loads a parameter master JSON file.
pub fn load_parameter_master(path: &Path) -> Result<Vec<ParameterRecord>, DataSourceError> {
    let file = File::open(path)?;
    parameter_master_from_reader(BufReader::new(file))
}

/// The bundled fallback dataset.
pub fn bundled_parameter_master() -> Result<Vec<ParameterRecord>, DataSourceError> {
    Ok(serde_json::from_str(BUNDLED)?)
}

/// Loads the feed from `path`, degrading to the bundled dataset with a
/// logged warning when the file is missing or malformed — the same
/// fallback the dashboard's proxy applies when the external provider is
/// unreachable.
pub fn parameter_master_or_bundled(path: &Path) -> Result<Vec<ParameterRecord>, DataSourceError> {
    match load_parameter_master(path) {
        Ok(records) => Ok(records),
        Err(err) => {
            log::warn!(
                "parameter master unavailable at {}: {}; using bundled data",
                path.display(),
                err
            );
            bundled_parameter_master()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn bundled_data_deserializes_and_pivots() {
        let records = bundled_parameter_master().unwrap();
        assert!(!records.is_empty());

        let view = pivot_engine::build_pivot(&records);
        assert!(!view.rows.is_empty());
        assert_eq!(view.column_keys().len(), view.leaf_keys().len());
    }

    #[test]
    fn loads_a_feed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{
                "param_id": "PI-001",
                "param_name": "inlet temperature",
                "param_name_ja": "入口温度",
                "plant_name": "Chiba",
                "machine_no": "M1",
                "data_source": "PI",
                "insert_date": "2024-04-01"
            }}]"#
        )
        .unwrap();

        let records = load_parameter_master(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].column_key(), "Chiba_M1_PI");
    }

    #[test]
    fn missing_file_falls_back_to_bundled_data() {
        let records =
            parameter_master_or_bundled(Path::new("/nonexistent/parameter_master.json")).unwrap();
        assert_eq!(records, bundled_parameter_master().unwrap());
    }

    #[test]
    fn malformed_file_is_an_error_without_fallback() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            load_parameter_master(file.path()),
            Err(DataSourceError::Json(_))
        ));
    }
}
