//! FILENAME: pivot-engine/src/definition.rs
//! Parameter master records - the input to the pivot builder.
//!
//! One record describes where a single measured parameter lives: which
//! plant, which machine, and which data source stores it. The same
//! logical parameter (identified by its name pair) typically appears once
//! per location, each time with a location-specific `param_id`. The pivot
//! builder turns that flat list into one row per logical parameter with
//! one column per location.

use serde::{Deserialize, Serialize};

/// One entry of the parameter master feed. Immutable, externally
/// supplied; uniqueness is not guaranteed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterRecord {
    /// Location-specific parameter id (the value placed into the grid).
    pub param_id: String,

    /// Parameter name.
    pub param_name: String,

    /// Japanese parameter name.
    pub param_name_ja: String,

    pub plant_name: String,
    pub machine_no: String,

    /// Which backing store holds this parameter's data.
    pub data_source: String,

    /// When the record was registered. Opaque; nothing interprets it.
    pub insert_date: String,
}

impl ParameterRecord {
    /// The row identity: parameters with the same name pair land in the
    /// same pivot row regardless of location.
    pub fn row_key(&self) -> String {
        format!("{}|{}", self.param_name, self.param_name_ja)
    }

    /// The synthesized column identity, unique per distinct
    /// (plant, machine, data source) combination.
    pub fn column_key(&self) -> String {
        format!(
            "{}_{}_{}",
            self.plant_name, self.machine_no, self.data_source
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ParameterRecord {
        ParameterRecord {
            param_id: "PI-001".to_string(),
            param_name: "inlet temperature".to_string(),
            param_name_ja: "入口温度".to_string(),
            plant_name: "Chiba".to_string(),
            machine_no: "M1".to_string(),
            data_source: "PI".to_string(),
            insert_date: "2024-04-01".to_string(),
        }
    }

    #[test]
    fn row_key_pairs_both_names() {
        assert_eq!(record().row_key(), "inlet temperature|入口温度");
    }

    #[test]
    fn column_key_is_the_three_part_composite() {
        assert_eq!(record().column_key(), "Chiba_M1_PI");
    }
}
