//! FILENAME: pivot-engine/src/lib.rs
//! Parameter-matrix pivot subsystem.
//!
//! This crate turns the flat parameter master feed into the cross-tabulated
//! structure the dashboard grid renders: one row per logical parameter
//! (name pair), one column per (plant, machine, data source) location, and
//! a three-level column-group header tree. It is a pure, single-pass,
//! in-memory transformation with no I/O.
//!
//! Layers:
//! - `definition`: The input record shape and key derivation
//! - `engine`: The pivot builder (HOW we reshape)
//! - `view`: Renderable output for the frontend (WHAT we display)

pub mod definition;
pub mod engine;
pub mod view;

pub use definition::ParameterRecord;
pub use engine::build_pivot;
pub use view::{LeafColumn, MachineGroup, PivotColumn, PivotRow, PivotView, PlantGroup};
