use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

const DEFAULT_DATA_FILE: &str = "data/life-expectancy.csv";
const DEFAULT_WORLD_FILE: &str = "data/countries-110m.geojson";

/// Initializes the application configuration from the environment.
/// Returns the dataset path and the world geometry path.
pub fn init_app_config() -> (PathBuf, PathBuf) {
    // Load environment variables from .env file, if present.
    dotenv().ok();

    (get_data_path(), get_world_path())
}

/// Path to the dataset CSV (`DATA_PATH` override).
pub fn get_data_path() -> PathBuf {
    env::var("DATA_PATH").map_or_else(|_| PathBuf::from(DEFAULT_DATA_FILE), PathBuf::from)
}

/// Path to the world GeoJSON base layer (`WORLD_PATH` override).
pub fn get_world_path() -> PathBuf {
    env::var("WORLD_PATH").map_or_else(|_| PathBuf::from(DEFAULT_WORLD_FILE), PathBuf::from)
}

pub fn debug_enabled() -> bool {
    env::var("DEBUG").is_ok_and(|value| value == "1")
}
