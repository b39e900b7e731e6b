pub mod chart;
pub mod format;
pub mod point;
pub mod settings;
