//! FILENAME: pivot-engine/src/view.rs
//! Pivot View - Renderable output for the frontend.
//!
//! This module defines the structures the grid renderer consumes:
//! - one row per logical parameter, mapping column keys to param ids
//! - the flat column list in first-seen order
//! - the three-level column-group tree (plant, machine, data source)
//!   used purely for header rendering
//!
//! Invariant: every column key appears in exactly one leaf of the group
//! tree, and the tree's leaf set equals the column list's key set.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// One pivot row: a logical parameter identified by its name pair, with
/// the param id found at each location it appears in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PivotRow {
    /// Row identity (the name-pair key).
    pub id: String,

    pub param_name: String,
    pub param_name_ja: String,

    /// Column key -> param id at that location. Absent keys render as
    /// empty cells.
    pub cells: FxHashMap<String, String>,
}

/// One data column of the grid, headed by its data-source name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PivotColumn {
    /// The synthesized column key this column is bound to.
    pub key: String,

    /// Header text: the data-source segment of the key.
    pub header: String,
}

/// A leaf of the column-group tree, referencing one full column key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafColumn {
    pub key: String,

    /// Header text: the data-source name.
    pub header: String,
}

/// Second grouping level: one machine within a plant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineGroup {
    /// Group identity: `plant-machine`.
    pub id: String,

    /// Header text: the machine number.
    pub header: String,

    /// Leaf columns under this machine, in first-seen order.
    pub columns: SmallVec<[LeafColumn; 4]>,
}

/// Top grouping level: one plant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantGroup {
    /// Group identity: the plant name.
    pub id: String,

    /// Header text: the plant name.
    pub header: String,

    /// Machine groups under this plant, in first-seen order.
    pub machines: Vec<MachineGroup>,
}

/// The complete pivot output handed to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PivotView {
    /// Rows in first-seen order of their name-pair key.
    pub rows: Vec<PivotRow>,

    /// Data columns in first-seen order of their column key.
    pub columns: Vec<PivotColumn>,

    /// The plant -> machine -> data-source header tree.
    pub column_groups: Vec<PlantGroup>,
}

impl PivotView {
    /// Column keys in column order.
    pub fn column_keys(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.key.as_str()).collect()
    }

    /// All leaf column keys of the group tree, in tree order.
    pub fn leaf_keys(&self) -> Vec<&str> {
        self.column_groups
            .iter()
            .flat_map(|plant| plant.machines.iter())
            .flat_map(|machine| machine.columns.iter())
            .map(|leaf| leaf.key.as_str())
            .collect()
    }
}
