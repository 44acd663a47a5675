pub mod app_config;
pub mod config;
pub mod products;
pub mod report;

pub use app_config::{AppConfig, OutputFormat};
pub use config::{load_app_config, load_app_config_from_env};
pub use products::{CanonicalProduct, CategoryResult, PageStop, SENTINEL};
pub use report::{AggregateReport, PriceBucket, PriceRanges};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
