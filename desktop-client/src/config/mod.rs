mod main_config;

pub use main_config::{default_config_path, get_config_manager};
