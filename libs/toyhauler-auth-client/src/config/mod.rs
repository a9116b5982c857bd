//! File-backed client configuration.

mod auth_client_config;
mod error;
mod json_file;
mod loader;

pub use auth_client_config::{AuthClientConfig, CONFIG_FILE_NAME, CONFIG_FOLDER_PATH};
pub use error::ConfigError;
pub use json_file::{read_json_file, write_json_file};
pub use loader::ConfigLoader;
