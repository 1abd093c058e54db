// Data module: in-memory dataset store, filter pipeline, and the
// geography join used by the choropleths.

pub mod filter;
pub mod geo;
pub mod loader;
pub mod models;

pub use filter::{filter_for_year, sort_descending_by};
pub use loader::{load_bundle, DataBundle, LoadError};
pub use models::{Dataset, Record};
