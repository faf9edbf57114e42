pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

#[cfg(feature = "lambda")]
pub use crate::config::lambda::SecretsManagerSource;

pub use crate::adapters::MySqlConnector;
pub use crate::app::client::BmiClient;
pub use crate::config::{client::ClientConfig, ConfigProvider, DbConfig, StaticSecretSource};
pub use crate::core::handler::{ApiRequest, ApiResponse, BmiHandler};
pub use crate::domain::model::calculate_bmi;
pub use crate::utils::error::{BmiError, Result};
