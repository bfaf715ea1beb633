pub mod models;
pub mod results;
pub mod sort;
pub mod ui;
