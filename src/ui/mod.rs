/// UI layer: menu/filter panels, the division chart, and the table grids.
pub mod chart;
pub mod panels;
pub mod tables;
