//! FILENAME: pivot-engine/src/engine.rs
//! Pivot Builder - reshapes the flat parameter master into a grid.
//!
//! Single pass over the record sequence:
//! 1. Derive the row key from the name pair; merge into the existing row
//!    or append a new one.
//! 2. Derive the column key from (plant, machine, data source); register
//!    the column on first sight.
//! 3. Place the record's param id into the row's cell for that column.
//!    A later record with the same row and column keys silently replaces
//!    the earlier value (last write wins; documented policy).
//! 4. Grow the plant -> machine -> data-source header tree, first-seen
//!    order at every level.
//!
//! Ordering everywhere is first-seen order of the input sequence, never
//! sorted, so the output is deterministic for a given input.

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::definition::ParameterRecord;
use crate::view::{LeafColumn, MachineGroup, PivotColumn, PivotRow, PivotView, PlantGroup};

/// Builds the pivot view from a flat sequence of parameter records.
/// An empty input yields an empty view; this is not an error.
pub fn build_pivot(records: &[ParameterRecord]) -> PivotView {
    let mut view = PivotView::default();

    // Row-key -> index into view.rows; column keys already registered.
    let mut row_index: FxHashMap<String, usize> = FxHashMap::default();
    let mut seen_columns: FxHashSet<String> = FxHashSet::default();

    for record in records {
        let row_key = record.row_key();
        let column_key = record.column_key();

        // Merge into the existing row for this name pair, if any.
        let index = match row_index.get(&row_key).copied() {
            Some(index) => index,
            None => {
                let index = view.rows.len();
                row_index.insert(row_key.clone(), index);
                view.rows.push(PivotRow {
                    id: row_key,
                    param_name: record.param_name.clone(),
                    param_name_ja: record.param_name_ja.clone(),
                    cells: FxHashMap::default(),
                });
                index
            }
        };

        // Last write wins on duplicate (row key, column key) pairs.
        view.rows[index]
            .cells
            .insert(column_key.clone(), record.param_id.clone());

        if seen_columns.insert(column_key.clone()) {
            view.columns.push(PivotColumn {
                key: column_key.clone(),
                header: record.data_source.clone(),
            });
        }

        place_in_groups(&mut view.column_groups, record, &column_key);
    }

    view
}

/// Registers the record's location in the header tree, creating plant and
/// machine groups on first sight. The distinct plant/machine counts are
/// small, so lookup is a linear scan.
fn place_in_groups(groups: &mut Vec<PlantGroup>, record: &ParameterRecord, column_key: &str) {
    let plant_index = match groups.iter().position(|g| g.header == record.plant_name) {
        Some(index) => index,
        None => {
            groups.push(PlantGroup {
                id: record.plant_name.clone(),
                header: record.plant_name.clone(),
                machines: Vec::new(),
            });
            groups.len() - 1
        }
    };
    let plant = &mut groups[plant_index];

    let machine_index = match plant
        .machines
        .iter()
        .position(|m| m.header == record.machine_no)
    {
        Some(index) => index,
        None => {
            plant.machines.push(MachineGroup {
                id: format!("{}-{}", record.plant_name, record.machine_no),
                header: record.machine_no.clone(),
                columns: SmallVec::new(),
            });
            plant.machines.len() - 1
        }
    };
    let machine = &mut plant.machines[machine_index];

    if !machine.columns.iter().any(|leaf| leaf.key == column_key) {
        machine.columns.push(LeafColumn {
            key: column_key.to_string(),
            header: record.data_source.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        param_id: &str,
        param_name: &str,
        param_name_ja: &str,
        plant: &str,
        machine: &str,
        source: &str,
    ) -> ParameterRecord {
        ParameterRecord {
            param_id: param_id.to_string(),
            param_name: param_name.to_string(),
            param_name_ja: param_name_ja.to_string(),
            plant_name: plant.to_string(),
            machine_no: machine.to_string(),
            data_source: source.to_string(),
            insert_date: "2024-04-01".to_string(),
        }
    }

    fn sample_records() -> Vec<ParameterRecord> {
        vec![
            record("PI-001", "inlet temp", "入口温度", "Chiba", "M1", "PI"),
            record("PI-002", "inlet temp", "入口温度", "Chiba", "M2", "PI"),
            record("DB-010", "inlet temp", "入口温度", "Chiba", "M1", "DB"),
            record("PI-101", "outlet temp", "出口温度", "Chiba", "M1", "PI"),
            record("PI-201", "inlet temp", "入口温度", "Osaka", "M1", "PI"),
        ]
    }

    #[test]
    fn empty_input_yields_empty_view() {
        let view = build_pivot(&[]);
        assert!(view.rows.is_empty());
        assert!(view.columns.is_empty());
        assert!(view.column_groups.is_empty());
    }

    #[test]
    fn row_count_equals_distinct_name_pairs() {
        let view = build_pivot(&sample_records());
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.rows[0].id, "inlet temp|入口温度");
        assert_eq!(view.rows[1].id, "outlet temp|出口温度");
    }

    #[test]
    fn records_with_the_same_name_pair_merge_into_one_row() {
        let view = build_pivot(&sample_records());
        let inlet = &view.rows[0];
        assert_eq!(inlet.cells.len(), 4);
        assert_eq!(inlet.cells["Chiba_M1_PI"], "PI-001");
        assert_eq!(inlet.cells["Chiba_M2_PI"], "PI-002");
        assert_eq!(inlet.cells["Chiba_M1_DB"], "DB-010");
        assert_eq!(inlet.cells["Osaka_M1_PI"], "PI-201");
    }

    #[test]
    fn column_order_is_first_seen_order() {
        let view = build_pivot(&sample_records());
        assert_eq!(
            view.column_keys(),
            vec!["Chiba_M1_PI", "Chiba_M2_PI", "Chiba_M1_DB", "Osaka_M1_PI"]
        );
        // Deterministic: building again gives the same order.
        assert_eq!(build_pivot(&sample_records()), view);
    }

    #[test]
    fn column_headers_show_the_data_source() {
        let view = build_pivot(&sample_records());
        let headers: Vec<&str> = view.columns.iter().map(|c| c.header.as_str()).collect();
        assert_eq!(headers, vec!["PI", "PI", "DB", "PI"]);
    }

    #[test]
    fn group_tree_nests_plant_machine_source_in_first_seen_order() {
        let view = build_pivot(&sample_records());
        assert_eq!(view.column_groups.len(), 2);

        let chiba = &view.column_groups[0];
        assert_eq!(chiba.header, "Chiba");
        assert_eq!(chiba.machines.len(), 2);
        assert_eq!(chiba.machines[0].id, "Chiba-M1");
        assert_eq!(chiba.machines[0].header, "M1");
        let m1_leaves: Vec<&str> = chiba.machines[0]
            .columns
            .iter()
            .map(|l| l.header.as_str())
            .collect();
        assert_eq!(m1_leaves, vec!["PI", "DB"]);
        assert_eq!(chiba.machines[1].header, "M2");

        let osaka = &view.column_groups[1];
        assert_eq!(osaka.header, "Osaka");
        assert_eq!(osaka.machines.len(), 1);
    }

    #[test]
    fn every_column_key_appears_in_exactly_one_leaf() {
        let view = build_pivot(&sample_records());
        let mut leaf_keys = view.leaf_keys();
        let mut column_keys = view.column_keys();
        // Leaf set equals column set, with no duplicates in either.
        leaf_keys.sort_unstable();
        column_keys.sort_unstable();
        assert_eq!(leaf_keys, column_keys);
        let deduped: FxHashSet<&str> = leaf_keys.iter().copied().collect();
        assert_eq!(deduped.len(), leaf_keys.len());
    }

    #[test]
    fn every_record_lands_in_a_row_cell_under_a_known_column() {
        let records = sample_records();
        let view = build_pivot(&records);
        let column_keys: FxHashSet<&str> = view.column_keys().into_iter().collect();

        for rec in &records {
            let row = view.rows.iter().find(|r| r.id == rec.row_key()).unwrap();
            assert_eq!(row.cells[&rec.column_key()], rec.param_id);
            assert!(column_keys.contains(rec.column_key().as_str()));
        }
    }

    #[test]
    fn duplicate_row_and_column_key_takes_the_later_param_id() {
        // Same name pair and same location, different param ids: the later
        // record wins. This is deliberate last-write-wins policy.
        let records = vec![
            record("PI-001", "inlet temp", "入口温度", "Chiba", "M1", "PI"),
            record("PI-999", "inlet temp", "入口温度", "Chiba", "M1", "PI"),
        ];
        let view = build_pivot(&records);
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.columns.len(), 1);
        assert_eq!(view.rows[0].cells["Chiba_M1_PI"], "PI-999");
    }

    #[test]
    fn same_machine_number_under_different_plants_stays_separate() {
        let records = vec![
            record("A", "x", "エックス", "Chiba", "M1", "PI"),
            record("B", "x", "エックス", "Osaka", "M1", "PI"),
        ];
        let view = build_pivot(&records);
        assert_eq!(view.column_keys(), vec!["Chiba_M1_PI", "Osaka_M1_PI"]);
        assert_eq!(view.column_groups.len(), 2);
        assert_eq!(view.column_groups[0].machines[0].id, "Chiba-M1");
        assert_eq!(view.column_groups[1].machines[0].id, "Osaka-M1");
    }
}
