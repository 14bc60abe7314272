//! Domain types and configuration shared across the eandash workspace.

use thiserror::Error;

pub mod app_config;
pub mod config;
pub mod ean;
pub mod product;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use ean::{EanCode, EanCodeError};
pub use product::{
    Dimensions, LengthUnit, MarketplaceAttributes, NewProduct, ProductStatus, Weight, WeightUnit,
};

/// Errors produced while loading or validating application configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
