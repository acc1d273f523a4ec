/// Rendering: one function per display region, all reading from `AppState`.

pub mod heatmap;
pub mod panels;
pub mod plot;
pub mod tables;
