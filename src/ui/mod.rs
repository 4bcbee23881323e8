/// egui rendering: menu bar and genre filter, data tables, charts.
pub mod panels;
pub mod plot;
pub mod tables;
