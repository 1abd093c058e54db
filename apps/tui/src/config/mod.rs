mod config;

pub use config::{debug_enabled, get_data_path, get_world_path, init_app_config};
