pub mod browse;
pub mod chart;
pub mod convert;
pub mod list;
pub mod setup;
pub mod show;
pub mod ui;
