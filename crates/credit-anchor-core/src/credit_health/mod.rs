pub mod report;
pub mod tracking;
