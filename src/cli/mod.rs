//! Terminal presentation for each command

pub mod chart;
pub mod dashboard;
pub mod fortune;
pub mod portfolio;
pub mod quote;
pub mod setup;
pub mod trade;
pub mod ui;
