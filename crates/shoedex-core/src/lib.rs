pub mod app_config;
pub mod config;
pub mod product;

pub use app_config::{AppConfig, ScrollPolicy, Strictness};
pub use config::{load_app_config, load_app_config_from_env};
pub use product::{ProductRecord, DEFAULT_IMAGE_KEY};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
