pub mod axis_service;
pub mod chart_service;
pub mod layout_service;
pub mod payload;
pub mod series_service;
