//! egui rendering: filter panel, menu bar, tables, charts and the wreck map.

pub mod panels;
pub mod plot;
