pub mod countries;
pub mod dashboard;
